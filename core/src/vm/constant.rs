use std::fmt;
use std::sync::Arc;

use crate::val::Val;

/// Call site referenced by `Call`/`CallFast`: the callee's name and the
/// number of arguments popped for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: Arc<str>,
    pub size: usize,
}

impl Call {
    pub fn new(name: &str, size: usize) -> Self {
        Self {
            name: Arc::from(name),
            size,
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.size)
    }
}

/// Entry of a program's constant pool.
#[derive(Debug, Clone)]
pub enum Constant {
    Val(Val),
    Call(Call),
}

impl Constant {
    pub fn as_val(&self) -> Option<&Val> {
        match self {
            Constant::Val(v) => Some(v),
            Constant::Call(_) => None,
        }
    }

    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Constant::Call(c) => Some(c),
            Constant::Val(_) => None,
        }
    }
}

impl From<Val> for Constant {
    fn from(v: Val) -> Self {
        Constant::Val(v)
    }
}

impl From<Call> for Constant {
    fn from(c: Call) -> Self {
        Constant::Call(c)
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Constant::Val(a), Constant::Val(b)) => a == b,
            (Constant::Call(a), Constant::Call(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Val(v) => write!(f, "{v}"),
            Constant::Call(c) => write!(f, "{c}"),
        }
    }
}
