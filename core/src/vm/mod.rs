//! Instruction set and compiled program representation.
//!
//! Executing a [`Program`] is the dispatch loop's job; this module names,
//! encodes and renders instructions, and holds the variable scopes the loop
//! opens and closes with `Begin`/`End`.

mod constant;
mod opcode;
mod program;
mod scope;

pub use constant::{Call, Constant};
pub use opcode::{Opcode, Operand};
pub use program::{Instruction, Program};
pub use scope::{Scope, ScopeStack};

#[cfg(test)]
mod vm_test;
