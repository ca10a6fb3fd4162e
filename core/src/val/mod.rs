//! Dynamic values handed to the VM by its host.
//!
//! [`Val`] is a closed set of shapes. Operators branch on it exhaustively
//! instead of inspecting types at runtime, and host types that want custom
//! indexing opt in through [`Fetcher`].

use std::fmt;
use std::sync::Arc;

mod convert;
mod eq;
mod host;
mod kind;
mod map;
mod numeric;
mod record;

pub use host::{Fetcher, Func};
pub use kind::Kind;
pub use map::{MapKey, MapVal};
pub use numeric::{Float, FloatWidth, Int, IntWidth, to_float64, to_int, to_int64};
pub use record::{Field, MethodFn, Record, RecordType};


#[derive(Debug, Clone, Default)]
pub enum Val {
    /// Absent value.
    #[default]
    Nil,
    Bool(bool),
    Int(Int),
    Float(Float),
    Str(Arc<str>),
    List(Arc<[Val]>),
    Map(Arc<MapVal>),
    Record(Arc<Record>),
    Func(Func),
    Custom(Arc<dyn Fetcher>),
    /// Reference to another value. Containers reached through a reference
    /// are read in place.
    Ref(Arc<Val>),
    /// A binding of a nil-able kind (list, map, func, ref) that holds nothing.
    /// Build it with [`Val::null`]; a payload outside [`Kind::is_nilable`]
    /// is not nil.
    Null(Kind),
}

impl Val {
    pub fn list<T: Into<Val>>(items: impl IntoIterator<Item = T>) -> Val {
        Val::List(items.into_iter().map(Into::<Val>::into).collect())
    }

    pub fn map(map: MapVal) -> Val {
        Val::Map(Arc::new(map))
    }

    pub fn record(record: Record) -> Val {
        Val::Record(Arc::new(record))
    }

    pub fn reference(target: Val) -> Val {
        Val::Ref(Arc::new(target))
    }

    /// Nil binding of `kind`. Kinds that cannot be nil get their zero value.
    pub fn null(kind: Kind) -> Val {
        kind.zero()
    }

    pub fn custom<F: Fetcher + 'static>(fetcher: F) -> Val {
        Val::Custom(Arc::new(fetcher))
    }

    pub fn func<F>(name: &str, f: F) -> Val
    where
        F: Fn(&[Val]) -> anyhow::Result<Val> + Send + Sync + 'static,
    {
        Val::Func(Func::new(name, f))
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        Kind::of(self)
    }

    /// True for the absent value and for nil bindings of nil-able kinds.
    /// Zero-valued scalars (`0`, `""`, `false`) are not nil.
    #[inline]
    pub fn is_nil(&self) -> bool {
        match self {
            Val::Nil => true,
            Val::Null(kind) => kind.is_nilable(),
            _ => false,
        }
    }
}

/// Free-function form of [`Val::is_nil`] for the dispatch loop.
#[inline]
pub fn is_nil(v: &Val) -> bool {
    v.is_nil()
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Val::Nil | Val::Null(_) => write!(f, "nil"),
            Val::Bool(b) => write!(f, "{b}"),
            Val::Int(i) => write!(f, "{i}"),
            Val::Float(x) => write!(f, "{x}"),
            Val::Str(s) => write!(f, "{}", s.as_ref()),
            Val::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Val::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.sorted_entries().into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Val::Record(r) => {
                write!(f, "{}{{", r.type_name())?;
                for (i, (name, v)) in r.fields().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {v}")?;
                }
                write!(f, "}}")
            }
            Val::Func(func) => write!(f, "<fn {}>", func.name()),
            Val::Custom(c) => write!(f, "<{}>", c.type_name()),
            Val::Ref(target) => write!(f, "&{target}"),
        }
    }
}
