//! Failures raised by the VM's operators and bytecode codec.
//!
//! Every operator error is final: it aborts the current evaluation and carries
//! the operator name plus the kind of the value that could not be handled.

use std::fmt::Display;

use thiserror::Error;

use crate::val::{Kind, Val};
use crate::vm::Opcode;

pub type VmResult<T> = Result<T, VmError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VmError {
    /// Key, field or method not found, or the container cannot be indexed.
    #[error("{op}: cannot fetch {key} from {kind}")]
    Lookup { op: &'static str, kind: Kind, key: String },

    /// Operand is not of a kind the operation accepts.
    #[error("{op}: invalid operand of type {kind}")]
    Type { op: &'static str, kind: Kind },

    /// The operator has no meaning for the container's kind.
    #[error("operator \"{op}\" not defined on {kind}")]
    Unsupported { op: &'static str, kind: Kind },
}

impl VmError {
    pub(crate) fn lookup(op: &'static str, from: &Val, key: impl Display) -> Self {
        VmError::Lookup {
            op,
            kind: from.kind(),
            key: key.to_string(),
        }
    }

    pub(crate) fn type_error(op: &'static str, operand: &Val) -> Self {
        VmError::Type {
            op,
            kind: operand.kind(),
        }
    }

    pub(crate) fn unsupported(op: &'static str, container: &Val) -> Self {
        VmError::Unsupported {
            op,
            kind: container.kind(),
        }
    }

    pub fn op(&self) -> &'static str {
        match self {
            VmError::Lookup { op, .. } | VmError::Type { op, .. } | VmError::Unsupported { op, .. } => op,
        }
    }

    pub fn kind(&self) -> &Kind {
        match self {
            VmError::Lookup { kind, .. } | VmError::Type { kind, .. } | VmError::Unsupported { kind, .. } => kind,
        }
    }
}

/// Byte outside the opcode range `[0, Opcode::COUNT)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown opcode {0}")]
pub struct InvalidOpcode(pub u8);

/// Malformed encoded bytecode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown opcode {code} at offset {offset}")]
    UnknownOpcode { code: u8, offset: usize },

    #[error("truncated operand for {op} at offset {offset}")]
    TruncatedOperand { op: Opcode, offset: usize },
}
