use std::fmt;

use crate::error::InvalidOpcode;

// Declares the opcode enum and its ordered table from one list, so the table
// cannot drift from the discriminants.
macro_rules! opcodes {
    ($($name:ident),* $(,)?) => {
        /// Instruction tags. Codes are contiguous from `Push` (0) up to the
        /// exclusive end [`Opcode::COUNT`].
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Opcode {
            $($name),*
        }

        impl Opcode {
            /// Every opcode in ascending code order.
            pub const ALL: &'static [Opcode] = &[$(Opcode::$name),*];
        }
    };
}

opcodes! {
    Push,
    Pop,
    Rot,
    Fetch,
    FetchNilSafe,
    FetchMap,
    True,
    False,
    Nil,
    Negate,
    Not,
    Equal,
    EqualInt,
    EqualString,
    Jump,
    JumpIfTrue,
    JumpIfFalse,
    JumpIfNil,
    JumpIfEnd,
    JumpBackward,
    In,
    Less,
    More,
    LessOrEqual,
    MoreOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
    Range,
    Matches,
    MatchesConst,
    Contains,
    StartsWith,
    EndsWith,
    Field,
    FieldNilSafe,
    Method,
    MethodNilSafe,
    Slice,
    Call,
    CallFast,
    Array,
    Map,
    Len,
    Cast,
    Store,
    Load,
    Inc,
    Begin,
    End,
}

/// How an instruction's 16-bit operand is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    /// Index into the constant pool: a literal, a variable name, or a
    /// [`Call`](super::Call) site.
    Const,
    /// Forward offset relative to the next instruction.
    Jump,
    /// Backward offset relative to the next instruction.
    JumpBack,
    /// Plain selector (cast target).
    Arg,
}

impl Opcode {
    pub const FIRST: Opcode = Opcode::Push;
    pub const COUNT: u8 = Opcode::ALL.len() as u8;

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Push => "OpPush",
            Opcode::Pop => "OpPop",
            Opcode::Rot => "OpRot",
            Opcode::Fetch => "OpFetch",
            Opcode::FetchNilSafe => "OpFetchNilSafe",
            Opcode::FetchMap => "OpFetchMap",
            Opcode::True => "OpTrue",
            Opcode::False => "OpFalse",
            Opcode::Nil => "OpNil",
            Opcode::Negate => "OpNegate",
            Opcode::Not => "OpNot",
            Opcode::Equal => "OpEqual",
            Opcode::EqualInt => "OpEqualInt",
            Opcode::EqualString => "OpEqualString",
            Opcode::Jump => "OpJump",
            Opcode::JumpIfTrue => "OpJumpIfTrue",
            Opcode::JumpIfFalse => "OpJumpIfFalse",
            Opcode::JumpIfNil => "OpJumpIfNil",
            Opcode::JumpIfEnd => "OpJumpIfEnd",
            Opcode::JumpBackward => "OpJumpBackward",
            Opcode::In => "OpIn",
            Opcode::Less => "OpLess",
            Opcode::More => "OpMore",
            Opcode::LessOrEqual => "OpLessOrEqual",
            Opcode::MoreOrEqual => "OpMoreOrEqual",
            Opcode::Add => "OpAdd",
            Opcode::Subtract => "OpSubtract",
            Opcode::Multiply => "OpMultiply",
            Opcode::Divide => "OpDivide",
            Opcode::Modulo => "OpModulo",
            Opcode::Exponent => "OpExponent",
            Opcode::Range => "OpRange",
            Opcode::Matches => "OpMatches",
            Opcode::MatchesConst => "OpMatchesConst",
            Opcode::Contains => "OpContains",
            Opcode::StartsWith => "OpStartsWith",
            Opcode::EndsWith => "OpEndsWith",
            Opcode::Field => "OpField",
            Opcode::FieldNilSafe => "OpFieldNilSafe",
            Opcode::Method => "OpMethod",
            Opcode::MethodNilSafe => "OpMethodNilSafe",
            Opcode::Slice => "OpSlice",
            Opcode::Call => "OpCall",
            Opcode::CallFast => "OpCallFast",
            Opcode::Array => "OpArray",
            Opcode::Map => "OpMap",
            Opcode::Len => "OpLen",
            Opcode::Cast => "OpCast",
            Opcode::Store => "OpStore",
            Opcode::Load => "OpLoad",
            Opcode::Inc => "OpInc",
            Opcode::Begin => "OpBegin",
            Opcode::End => "OpEnd",
        }
    }

    pub fn operand(self) -> Operand {
        match self {
            Opcode::Push
            | Opcode::FetchMap
            | Opcode::MatchesConst
            | Opcode::Field
            | Opcode::FieldNilSafe
            | Opcode::Method
            | Opcode::MethodNilSafe
            | Opcode::Call
            | Opcode::CallFast
            | Opcode::Store
            | Opcode::Load
            | Opcode::Inc => Operand::Const,
            Opcode::Jump | Opcode::JumpIfTrue | Opcode::JumpIfFalse | Opcode::JumpIfNil | Opcode::JumpIfEnd => {
                Operand::Jump
            }
            Opcode::JumpBackward => Operand::JumpBack,
            Opcode::Cast => Operand::Arg,
            Opcode::Pop
            | Opcode::Rot
            | Opcode::Fetch
            | Opcode::FetchNilSafe
            | Opcode::True
            | Opcode::False
            | Opcode::Nil
            | Opcode::Negate
            | Opcode::Not
            | Opcode::Equal
            | Opcode::EqualInt
            | Opcode::EqualString
            | Opcode::In
            | Opcode::Less
            | Opcode::More
            | Opcode::LessOrEqual
            | Opcode::MoreOrEqual
            | Opcode::Add
            | Opcode::Subtract
            | Opcode::Multiply
            | Opcode::Divide
            | Opcode::Modulo
            | Opcode::Exponent
            | Opcode::Range
            | Opcode::Matches
            | Opcode::Contains
            | Opcode::StartsWith
            | Opcode::EndsWith
            | Opcode::Slice
            | Opcode::Array
            | Opcode::Map
            | Opcode::Len
            | Opcode::Begin
            | Opcode::End => Operand::None,
        }
    }

    #[inline]
    pub fn has_operand(self) -> bool {
        self.operand() != Operand::None
    }
}

impl TryFrom<u8> for Opcode {
    type Error = InvalidOpcode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Opcode::ALL.get(code as usize).copied().ok_or(InvalidOpcode(code))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
