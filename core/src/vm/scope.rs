use std::sync::Arc;

use crate::error::{VmError, VmResult};
use crate::util::fast_map::{FastHashMap, fast_hash_map_new};
use crate::val::Val;

/// Variables bound between a `Begin` and its matching `End`.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    vars: FastHashMap<Arc<str>, Val>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            vars: fast_hash_map_new(),
        }
    }

    pub fn store(&mut self, name: &str, value: impl Into<Val>) {
        self.vars.insert(Arc::from(name), value.into());
    }

    /// Unbound names read as `nil`.
    pub fn load(&self, name: &str) -> Val {
        self.vars.get(name).cloned().unwrap_or_default()
    }

    /// Adds one to an integer variable within its own width.
    pub fn inc(&mut self, name: &str) -> VmResult<()> {
        match self.vars.get_mut(name) {
            Some(Val::Int(i)) => {
                *i = i.wrapping_inc();
                Ok(())
            }
            Some(other) => Err(VmError::type_error("inc", other)),
            None => Err(VmError::type_error("inc", &Val::Nil)),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Nested scopes; the root is never closed.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }

    pub fn begin(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Closes the innermost scope. Returns `None` at the root.
    pub fn end(&mut self) -> Option<Scope> {
        if self.scopes.len() > 1 { self.scopes.pop() } else { None }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current(&self) -> &Scope {
        // root is never popped
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub fn store(&mut self, name: &str, value: impl Into<Val>) {
        self.current_mut().store(name, value);
    }

    /// Reads from the innermost scope binding `name`.
    pub fn load(&self, name: &str) -> Val {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.vars.get(name))
            .cloned()
            .unwrap_or_default()
    }

    pub fn inc(&mut self, name: &str) -> VmResult<()> {
        let owner = self.scopes.iter_mut().rev().find(|scope| scope.vars.contains_key(name));
        match owner {
            Some(scope) => scope.inc(name),
            None => Err(VmError::type_error("inc", &Val::Nil)),
        }
    }
}

