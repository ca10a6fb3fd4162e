use tracing::trace;

use crate::error::{VmError, VmResult};
use crate::val::{Func, Kind, MapKey, Val, to_int};

/// Keyed read access into `from`.
///
/// Custom accessors answer first. Otherwise the container's shape decides:
/// lists and strings index by integer, maps look up the key and fall back to
/// the zero value of their value kind, records look up a field by name.
/// `nil_safe` turns a miss into `nil` instead of an error; out-of-range
/// indices and unusable map keys fail regardless.
pub fn fetch(from: &Val, key: &Val, nil_safe: bool) -> VmResult<Val> {
    if let Val::Custom(fetcher) = from {
        if let Some(value) = fetcher.try_fetch(key) {
            trace!(target: "xpr::fetch", accessor = fetcher.type_name(), %key, "custom accessor hit");
            return Ok(value);
        }
        return miss(from, key, nil_safe);
    }

    match follow(from) {
        Val::List(items) => {
            let idx = checked_index(from, key, items.len())?;
            Ok(normalize(&items[idx]))
        }
        Val::Str(s) => {
            let idx = checked_index(from, key, s.chars().count())?;
            // checked_index guarantees the char exists
            Ok(s.chars().nth(idx).map(|c| Val::from(c.to_string())).unwrap_or_default())
        }
        Val::Null(Kind::List) => Err(VmError::lookup("fetch", from, key)),
        Val::Map(map) => {
            let Some(k) = map.key_for(key) else {
                return Err(VmError::lookup("fetch", from, key));
            };
            match map.get(&k) {
                Some(value) => Ok(normalize(value)),
                None => {
                    trace!(target: "xpr::fetch", %key, "missing map key, using zero value");
                    Ok(map.missing())
                }
            }
        }
        Val::Null(Kind::Map(value_kind)) => Ok(value_kind.zero()),
        Val::Record(record) => match key {
            Val::Str(name) => match record.get(name) {
                Some(value) => Ok(normalize(value)),
                None => miss(from, key, nil_safe),
            },
            _ => miss(from, key, nil_safe),
        },
        _ => miss(from, key, nil_safe),
    }
}

fn miss(from: &Val, key: &Val, nil_safe: bool) -> VmResult<Val> {
    if nil_safe {
        trace!(target: "xpr::fetch", %key, kind = %from.kind(), "nil-safe miss");
        return Ok(Val::Nil);
    }
    Err(VmError::lookup("fetch", from, key))
}

fn checked_index(from: &Val, key: &Val, len: usize) -> VmResult<usize> {
    if !is_finite_index(key) {
        return Err(VmError::lookup("fetch", from, key));
    }
    let idx = to_int(key)?;
    match usize::try_from(idx) {
        Ok(idx) if idx < len => Ok(idx),
        _ => Err(VmError::lookup("fetch", from, key)),
    }
}

/// NaN and infinities have no position; `as` would saturate them into one.
pub(crate) fn is_finite_index(key: &Val) -> bool {
    match key {
        Val::Float(f) => f.as_f64().is_finite(),
        _ => true,
    }
}

/// Follows one reference to a container so it is read in place.
fn follow(v: &Val) -> &Val {
    match v {
        Val::Ref(target) => match target.as_ref() {
            Val::List(_) | Val::Map(_) | Val::Record(_) | Val::Null(Kind::List | Kind::Map(_)) => target.as_ref(),
            _ => v,
        },
        _ => v,
    }
}

/// Dereferences a reference to a value-semantics kind (scalars, strings,
/// lists, maps). References to records and other references pass through.
pub fn normalize(v: &Val) -> Val {
    match v {
        Val::Ref(target) => match target.as_ref() {
            Val::Bool(_)
            | Val::Int(_)
            | Val::Float(_)
            | Val::Str(_)
            | Val::List(_)
            | Val::Map(_)
            | Val::Null(Kind::List | Kind::Map(_)) => target.as_ref().clone(),
            _ => v.clone(),
        },
        _ => v.clone(),
    }
}

/// Resolves `name` to something callable on `from`.
///
/// Methods win when the container's type exposes any. Then a map entry
/// named `name`, then a record field, both taken as stored without
/// normalization.
pub fn fetch_fn(from: &Val, name: &str) -> VmResult<Func> {
    if let Some(method) = find_method(from, name) {
        return Ok(method);
    }

    let target = match from {
        Val::Ref(target) => target.as_ref(),
        _ => from,
    };
    let found = match target {
        Val::Map(map) => map.get(&MapKey::from(name)),
        Val::Record(record) => record.get(name),
        _ => None,
    };
    match found {
        Some(Val::Func(func)) => Ok(func.clone()),
        Some(other) => {
            trace!(target: "xpr::fetch", name, kind = %other.kind(), "entry is not callable");
            Err(VmError::lookup("call", from, name))
        }
        None => Err(VmError::lookup("call", from, name)),
    }
}

/// Like [`fetch_fn`], but an absent receiver yields `None` instead of an error.
pub fn fetch_fn_nil(from: &Val, name: &str) -> VmResult<Option<Func>> {
    if matches!(from, Val::Nil) {
        return Ok(None);
    }
    fetch_fn(from, name).map(Some)
}

fn find_method(from: &Val, name: &str) -> Option<Func> {
    let record = match from {
        Val::Custom(fetcher) => return fetcher.method(name),
        Val::Record(record) => record,
        Val::Ref(target) => match target.as_ref() {
            Val::Record(record) => record,
            _ => return None,
        },
        _ => return None,
    };
    let method = record.ty().find_method(name)?;
    Some(Func::bind(name, from.clone(), method))
}
