use std::sync::Arc;

use super::Val;

/// Equality used by comparison opcodes and membership tests.
///
/// Numbers compare by value across widths and signedness; integers compare
/// exactly, mixed integer/float pairs compare as `f64`. Containers compare
/// structurally. Values from different categories are never equal.
impl PartialEq for Val {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (a, b) if a.is_nil() && b.is_nil() => true,
            (Val::Bool(a), Val::Bool(b)) => a == b,
            (Val::Int(a), Val::Int(b)) => a.to_i128() == b.to_i128(),
            (Val::Float(a), Val::Float(b)) => a.as_f64() == b.as_f64(),
            (Val::Int(a), Val::Float(b)) => a.as_f64() == b.as_f64(),
            (Val::Float(a), Val::Int(b)) => a.as_f64() == b.as_f64(),
            (Val::Str(a), Val::Str(b)) => a == b,
            (Val::List(a), Val::List(b)) => a == b,
            (Val::Map(a), Val::Map(b)) => a == b,
            (Val::Record(a), Val::Record(b)) => a == b,
            (Val::Ref(a), Val::Ref(b)) => Arc::ptr_eq(a, b) || a == b,
            (Val::Func(a), Val::Func(b)) => a.ptr_eq(b),
            (Val::Custom(a), Val::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
