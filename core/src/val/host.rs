use std::fmt;
use std::sync::Arc;

use super::{MethodFn, Val};

type Callable = dyn Fn(&[Val]) -> anyhow::Result<Val> + Send + Sync;

/// Invocable host value.
#[derive(Clone)]
pub struct Func {
    name: Arc<str>,
    call: Arc<Callable>,
}

impl Func {
    pub fn new<F>(name: &str, f: F) -> Self
    where
        F: Fn(&[Val]) -> anyhow::Result<Val> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            call: Arc::new(f),
        }
    }

    /// Binds `method` to `receiver`; the receiver is passed ahead of the call arguments.
    pub fn bind(name: &str, receiver: Val, method: MethodFn) -> Self {
        Self::new(name, move |args| method(&receiver, args))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Val]) -> anyhow::Result<Val> {
        (self.call)(args)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Func) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Func({})", self.name)
    }
}

/// Opt-in custom indexing for host types.
///
/// A value carrying this capability is opaque to structural access: `fetch`
/// asks it first and only reports a miss when `try_fetch` returns `None`.
pub trait Fetcher: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &str;

    fn try_fetch(&self, key: &Val) -> Option<Val>;

    /// Methods exposed by the host type, consulted before anything else when
    /// resolving a call target.
    fn method(&self, _name: &str) -> Option<Func> {
        None
    }
}
