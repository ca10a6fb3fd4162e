use std::fmt;
use std::sync::Arc;

use super::{Float, FloatWidth, Int, IntWidth, Record, RecordType, Val};

/// Declared or observed shape of a value.
///
/// Kinds double as the static element type of containers: a map remembers the
/// kind of its values so that a missing key can produce that kind's zero value.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Dynamic slot with no declared shape; its zero value is `nil`.
    Any,
    Bool,
    Int(IntWidth),
    Float(FloatWidth),
    Str,
    List,
    /// Map with the kind of its values.
    Map(Box<Kind>),
    Record(Arc<RecordType>),
    Func,
    Custom(Arc<str>),
    Ref,
}

impl Kind {
    pub fn of(val: &Val) -> Kind {
        match val {
            Val::Nil => Kind::Any,
            Val::Bool(_) => Kind::Bool,
            Val::Int(i) => Kind::Int(i.width()),
            Val::Float(f) => Kind::Float(f.width()),
            Val::Str(_) => Kind::Str,
            Val::List(_) => Kind::List,
            Val::Map(m) => Kind::Map(Box::new(m.value_kind().clone())),
            Val::Record(r) => Kind::Record(r.ty().clone()),
            Val::Func(_) => Kind::Func,
            Val::Custom(c) => Kind::Custom(Arc::from(c.type_name())),
            Val::Ref(_) => Kind::Ref,
            Val::Null(kind) => kind.clone(),
        }
    }

    /// The value an unset slot of this kind holds.
    pub fn zero(&self) -> Val {
        match self {
            Kind::Any | Kind::Custom(_) => Val::Nil,
            Kind::Bool => Val::Bool(false),
            Kind::Int(w) => Val::Int(Int::zero(*w)),
            Kind::Float(w) => Val::Float(Float::zero(*w)),
            Kind::Str => Val::Str(Arc::from("")),
            Kind::Record(ty) => Val::Record(Arc::new(Record::new(ty.clone()))),
            Kind::List | Kind::Map(_) | Kind::Func | Kind::Ref => Val::Null(self.clone()),
        }
    }

    /// Kinds whose unset binding is nil rather than a concrete zero.
    pub fn is_nilable(&self) -> bool {
        matches!(self, Kind::List | Kind::Map(_) | Kind::Func | Kind::Ref)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Int(_) | Kind::Float(_))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Any => write!(f, "nil"),
            Kind::Bool => write!(f, "bool"),
            Kind::Int(w) => write!(f, "{}", w.name()),
            Kind::Float(w) => write!(f, "{}", w.name()),
            Kind::Str => write!(f, "string"),
            Kind::List => write!(f, "list"),
            Kind::Map(value) => write!(f, "map[{value}]"),
            Kind::Record(ty) => write!(f, "record {}", ty.name()),
            Kind::Func => write!(f, "func"),
            Kind::Custom(name) => write!(f, "{name}"),
            Kind::Ref => write!(f, "ref"),
        }
    }
}

