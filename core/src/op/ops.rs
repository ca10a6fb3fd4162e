use std::sync::Arc;

use crate::error::{VmError, VmResult};
use crate::val::{Kind, Val, to_float64, to_int};

use super::fetch::is_finite_index;

/// Equality operator; see the `PartialEq` impl on [`Val`] for the rules.
#[inline]
pub fn equal(a: &Val, b: &Val) -> bool {
    a == b
}

/// Membership: element of a list, key of a map, or field name of a record.
pub fn is_in(needle: &Val, container: &Val) -> VmResult<bool> {
    match container {
        Val::Nil | Val::Null(Kind::List | Kind::Map(_) | Kind::Ref) => Ok(false),
        Val::List(items) => Ok(items.iter().any(|item| item == needle)),
        Val::Map(map) => match map.key_for(needle) {
            Some(key) => Ok(map.contains_key(&key)),
            None => Err(VmError::type_error("in", needle)),
        },
        Val::Record(record) => match needle {
            Val::Str(name) => Ok(record.ty().field_index(name).is_some()),
            _ => Err(VmError::type_error("in", needle)),
        },
        Val::Ref(target) => is_in(needle, target),
        _ => Err(VmError::unsupported("in", container)),
    }
}

pub fn length(v: &Val) -> VmResult<usize> {
    match v {
        Val::List(items) => Ok(items.len()),
        Val::Str(s) => Ok(s.chars().count()),
        Val::Map(map) => Ok(map.len()),
        Val::Null(Kind::List | Kind::Map(_)) => Ok(0),
        _ => Err(VmError::type_error("len", v)),
    }
}

/// `container[from:to]` with overruns absorbed: `to` is clamped to the
/// length, then `from` is clamped to `to`. Negative bounds are rejected.
pub fn slice(container: &Val, from: &Val, to: &Val) -> VmResult<Val> {
    match container {
        Val::List(items) => {
            let (a, b) = clamp_bounds(container, from, to, items.len())?;
            Ok(Val::List(Arc::from(&items[a..b])))
        }
        Val::Str(s) => {
            let (a, b) = clamp_bounds(container, from, to, s.chars().count())?;
            Ok(Val::from(s.chars().skip(a).take(b - a).collect::<String>()))
        }
        Val::Null(Kind::List) => {
            clamp_bounds(container, from, to, 0)?;
            Ok(container.clone())
        }
        Val::Ref(target) => slice(target, from, to),
        _ => Err(VmError::type_error("slice", container)),
    }
}

fn clamp_bounds(container: &Val, from: &Val, to: &Val, len: usize) -> VmResult<(usize, usize)> {
    for bound in [from, to] {
        if !is_finite_index(bound) {
            return Err(VmError::lookup("slice", container, bound));
        }
    }
    let a = to_int(from)?;
    let b = to_int(to)?;
    let a = usize::try_from(a).map_err(|_| VmError::lookup("slice", container, a))?;
    let b = usize::try_from(b).map_err(|_| VmError::lookup("slice", container, b))?;
    let b = b.min(len);
    Ok((a.min(b), b))
}

/// Arithmetic negation within the operand's own width. Unsigned integers
/// wrap to their additive inverse.
pub fn negate(v: &Val) -> VmResult<Val> {
    match v {
        Val::Int(i) => Ok(Val::Int(i.wrapping_neg())),
        Val::Float(f) => Ok(Val::Float(f.neg())),
        _ => Err(VmError::type_error("-", v)),
    }
}

pub fn exponent(a: &Val, b: &Val) -> VmResult<f64> {
    Ok(to_float64(a)?.powf(to_float64(b)?))
}

/// Inclusive integer range; empty when `max < min`.
pub fn make_range(min: isize, max: isize) -> Vec<isize> {
    (min..=max).collect()
}
