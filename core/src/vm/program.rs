use std::fmt::{self, Write as _};

use tracing::debug;

use crate::error::{DecodeError, InvalidOpcode};

use super::{Constant, Opcode, Operand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Opcode,
    /// Operand; meaningful only when `op.has_operand()`.
    pub arg: u16,
}

impl Instruction {
    pub fn new(op: Opcode, arg: u16) -> Self {
        Self { op, arg }
    }

    pub fn bare(op: Opcode) -> Self {
        Self { op, arg: 0 }
    }
}

/// Compiled expression: instruction stream plus the constant pool its
/// operands index into. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Program {
    constants: Vec<Constant>,
    code: Vec<Instruction>,
}

impl Program {
    pub fn new<C>(constants: impl IntoIterator<Item = C>, code: Vec<Instruction>) -> Self
    where
        C: Into<Constant>,
    {
        Self {
            constants: constants.into_iter().map(Into::into).collect(),
            code,
        }
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn code(&self) -> &[Instruction] {
        &self.code
    }

    #[inline]
    pub fn constant(&self, idx: u16) -> Option<&Constant> {
        self.constants.get(idx as usize)
    }

    /// Packs the instruction stream: one opcode byte, followed by a
    /// little-endian `u16` only for opcodes that take an operand.
    pub fn encode_code(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.code.len() * 3);
        for ins in &self.code {
            out.push(ins.op.code());
            if ins.op.has_operand() {
                out.extend_from_slice(&ins.arg.to_le_bytes());
            }
        }
        out
    }

    /// Inverse of [`Program::encode_code`].
    pub fn decode<C>(constants: impl IntoIterator<Item = C>, bytes: &[u8]) -> Result<Self, DecodeError>
    where
        C: Into<Constant>,
    {
        let mut code = Vec::with_capacity(bytes.len());
        let mut offset = 0;
        while offset < bytes.len() {
            let byte = bytes[offset];
            let op = Opcode::try_from(byte).map_err(|InvalidOpcode(code)| {
                debug!(target: "xpr::decode", code, offset, "rejecting unknown opcode");
                DecodeError::UnknownOpcode { code, offset }
            })?;
            let arg = if op.has_operand() {
                match bytes.get(offset + 1..offset + 3) {
                    Some(&[lo, hi]) => u16::from_le_bytes([lo, hi]),
                    _ => {
                        debug!(target: "xpr::decode", %op, offset, "operand cut short");
                        return Err(DecodeError::TruncatedOperand { op, offset });
                    }
                }
            } else {
                0
            };
            code.push(Instruction { op, arg });
            offset += if op.has_operand() { 3 } else { 1 };
        }
        Ok(Self::new(constants, code))
    }

    /// One line per instruction: offset, mnemonic, then the decoded operand.
    pub fn disassemble(&self) -> String {
        let mut out = String::new();
        for (ip, ins) in self.code.iter().enumerate() {
            // Writing into a String cannot fail.
            let _ = self.write_instruction(&mut out, ip, ins);
        }
        out
    }

    fn write_instruction(&self, out: &mut String, ip: usize, ins: &Instruction) -> fmt::Result {
        write!(out, "{ip:04}\t{}", ins.op.mnemonic())?;
        let next = ip + 1;
        match ins.op.operand() {
            Operand::None => {}
            Operand::Const => match self.constant(ins.arg) {
                Some(value) => {
                    write!(out, "\t<{}>\t", ins.arg)?;
                    write_escaped(out, &value.to_string());
                }
                None => write!(out, "\t<{}>\t<missing>", ins.arg)?,
            },
            Operand::Jump => write!(out, "\t<{}>\t({:04})", ins.arg, next + ins.arg as usize)?,
            Operand::JumpBack => write!(out, "\t<{}>\t({:04})", ins.arg, next.saturating_sub(ins.arg as usize))?,
            Operand::Arg => write!(out, "\t<{}>", ins.arg)?,
        }
        out.push('\n');
        Ok(())
    }
}

// Control characters in constants would break the one-line-per-instruction layout.
fn write_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disassemble())
    }
}
