use std::collections::HashMap;
use std::sync::Arc;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::{Float, Func, Int, Kind, MapKey, MapVal, Record, Val};

impl From<bool> for Val {
    #[inline]
    fn from(b: bool) -> Self {
        Val::Bool(b)
    }
}

impl From<&str> for Val {
    #[inline]
    fn from(s: &str) -> Self {
        Val::Str(Arc::from(s))
    }
}

impl From<String> for Val {
    #[inline]
    fn from(s: String) -> Self {
        Val::Str(Arc::<str>::from(s))
    }
}

impl From<Int> for Val {
    #[inline]
    fn from(i: Int) -> Self {
        Val::Int(i)
    }
}

impl From<Float> for Val {
    #[inline]
    fn from(f: Float) -> Self {
        Val::Float(f)
    }
}

impl From<MapVal> for Val {
    fn from(m: MapVal) -> Self {
        Val::Map(Arc::new(m))
    }
}

impl From<Record> for Val {
    fn from(r: Record) -> Self {
        Val::Record(Arc::new(r))
    }
}

impl From<Func> for Val {
    fn from(f: Func) -> Self {
        Val::Func(f)
    }
}

impl<T> From<Vec<T>> for Val
where
    T: Into<Val>,
{
    fn from(v: Vec<T>) -> Self {
        Val::list(v)
    }
}

/// Host maps carry no declared value kind, so missing keys read as `nil`.
impl<K, V, H> From<HashMap<K, V, H>> for Val
where
    K: Into<MapKey>,
    V: Into<Val>,
    H: core::hash::BuildHasher,
{
    fn from(m: HashMap<K, V, H>) -> Self {
        Val::map(MapVal::with_entries(Kind::Any, m))
    }
}

impl<T> From<Option<T>> for Val
where
    T: Into<Val>,
{
    fn from(o: Option<T>) -> Self {
        match o {
            Some(v) => v.into(),
            None => Val::Nil,
        }
    }
}

impl From<()> for Val {
    fn from(_: ()) -> Self {
        Val::Nil
    }
}

impl From<serde_json::Value> for Val {
    fn from(val: serde_json::Value) -> Self {
        match val {
            serde_json::Value::Null => Val::Nil,
            serde_json::Value::Bool(b) => Val::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Val::from(i)
                } else if let Some(u) = n.as_u64() {
                    Val::from(u)
                } else if let Some(f) = n.as_f64() {
                    Val::from(f)
                } else {
                    Val::Nil
                }
            }
            serde_json::Value::String(s) => Val::from(s),
            serde_json::Value::Array(a) => Val::list(a),
            serde_json::Value::Object(o) => Val::map(MapVal::with_entries(Kind::Any, o).with_key_kind(Kind::Str)),
        }
    }
}

impl Serialize for Val {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Val::Nil | Val::Null(_) => serializer.serialize_unit(),
            Val::Bool(b) => serializer.serialize_bool(*b),
            Val::Int(i) => match *i {
                Int::U64(u) => serializer.serialize_u64(u),
                Int::Usize(u) => serializer.serialize_u64(u as u64),
                other => serializer.serialize_i64(other.as_i64()),
            },
            Val::Float(f) => serializer.serialize_f64(f.as_f64()),
            Val::Str(s) => serializer.serialize_str(s),
            Val::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Val::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m.sorted_entries() {
                    map.serialize_entry(&k.to_string(), v)?;
                }
                map.end()
            }
            Val::Record(r) => {
                let mut map = serializer.serialize_map(Some(r.ty().fields().len() + 1))?;
                map.serialize_entry("__type", r.type_name())?;
                for (name, v) in r.fields() {
                    map.serialize_entry(name, v)?;
                }
                map.end()
            }
            Val::Ref(target) => target.serialize(serializer),
            // Functions and custom accessors have no data representation, use placeholder
            Val::Func(_) => serializer.serialize_str("<function>"),
            Val::Custom(c) => serializer.serialize_str(&format!("<{}>", c.type_name())),
        }
    }
}
