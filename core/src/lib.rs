//! Runtime core of the xpr expression VM.
//!
//! Provides the dynamic value model handed over by the host, the pure
//! operators the dispatch loop calls per opcode (keyed access, call-target
//! resolution, membership, slicing, numeric helpers), and the instruction set
//! with its disassembler.

pub mod error;
pub mod op;
pub mod util;
pub mod val;
pub mod vm;

pub use error::{DecodeError, InvalidOpcode, VmError, VmResult};
pub use val::{Kind, Val};
pub use vm::{Call, Constant, Instruction, Opcode, Program, Scope};
