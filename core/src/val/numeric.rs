use std::fmt;

use crate::error::{VmError, VmResult};

use super::Val;

/// Storage width and signedness of an integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl IntWidth {
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            IntWidth::I8 | IntWidth::I16 | IntWidth::I32 | IntWidth::I64 | IntWidth::Isize
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            IntWidth::I8 => "int8",
            IntWidth::I16 => "int16",
            IntWidth::I32 => "int32",
            IntWidth::I64 => "int64",
            IntWidth::Isize => "int",
            IntWidth::U8 => "uint8",
            IntWidth::U16 => "uint16",
            IntWidth::U32 => "uint32",
            IntWidth::U64 => "uint64",
            IntWidth::Usize => "uint",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    pub fn name(self) -> &'static str {
        match self {
            FloatWidth::F32 => "float32",
            FloatWidth::F64 => "float64",
        }
    }
}

/// A fixed-width integer. Every width keeps its native representation so that
/// wrapping arithmetic stays within the width it came from.
#[derive(Debug, Clone, Copy)]
pub enum Int {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
}

// Applies `$body` to the payload of every width and rewraps it in the same variant.
macro_rules! map_int {
    ($v:expr, |$x:ident| $body:expr) => {
        match $v {
            Int::I8($x) => Int::I8($body),
            Int::I16($x) => Int::I16($body),
            Int::I32($x) => Int::I32($body),
            Int::I64($x) => Int::I64($body),
            Int::Isize($x) => Int::Isize($body),
            Int::U8($x) => Int::U8($body),
            Int::U16($x) => Int::U16($body),
            Int::U32($x) => Int::U32($body),
            Int::U64($x) => Int::U64($body),
            Int::Usize($x) => Int::Usize($body),
        }
    };
}

// Applies `$body` to the payload of every width, yielding a common type.
macro_rules! each_int {
    ($v:expr, |$x:ident| $body:expr) => {
        match $v {
            Int::I8($x) => $body,
            Int::I16($x) => $body,
            Int::I32($x) => $body,
            Int::I64($x) => $body,
            Int::Isize($x) => $body,
            Int::U8($x) => $body,
            Int::U16($x) => $body,
            Int::U32($x) => $body,
            Int::U64($x) => $body,
            Int::Usize($x) => $body,
        }
    };
}

impl Int {
    pub fn zero(width: IntWidth) -> Int {
        match width {
            IntWidth::I8 => Int::I8(0),
            IntWidth::I16 => Int::I16(0),
            IntWidth::I32 => Int::I32(0),
            IntWidth::I64 => Int::I64(0),
            IntWidth::Isize => Int::Isize(0),
            IntWidth::U8 => Int::U8(0),
            IntWidth::U16 => Int::U16(0),
            IntWidth::U32 => Int::U32(0),
            IntWidth::U64 => Int::U64(0),
            IntWidth::Usize => Int::Usize(0),
        }
    }

    pub fn width(self) -> IntWidth {
        match self {
            Int::I8(_) => IntWidth::I8,
            Int::I16(_) => IntWidth::I16,
            Int::I32(_) => IntWidth::I32,
            Int::I64(_) => IntWidth::I64,
            Int::Isize(_) => IntWidth::Isize,
            Int::U8(_) => IntWidth::U8,
            Int::U16(_) => IntWidth::U16,
            Int::U32(_) => IntWidth::U32,
            Int::U64(_) => IntWidth::U64,
            Int::Usize(_) => IntWidth::Usize,
        }
    }

    /// Lossless widening used for cross-width comparison and map keys.
    pub fn to_i128(self) -> i128 {
        each_int!(self, |x| x as i128)
    }

    pub fn as_isize(self) -> isize {
        each_int!(self, |x| x as isize)
    }

    pub fn as_i64(self) -> i64 {
        each_int!(self, |x| x as i64)
    }

    pub fn as_f64(self) -> f64 {
        each_int!(self, |x| x as f64)
    }

    /// Negation within the same width. Unsigned widths yield the modular
    /// additive inverse, so `-1u8` is `255u8`.
    pub fn wrapping_neg(self) -> Int {
        map_int!(self, |x| x.wrapping_neg())
    }

    /// `self + 1`, wrapping at the width's bounds.
    pub fn wrapping_inc(self) -> Int {
        map_int!(self, |x| x.wrapping_add(1))
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = itoa::Buffer::new();
        f.write_str(each_int!(*self, |x| buf.format(x)))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl Float {
    pub fn zero(width: FloatWidth) -> Float {
        match width {
            FloatWidth::F32 => Float::F32(0.0),
            FloatWidth::F64 => Float::F64(0.0),
        }
    }

    pub fn width(self) -> FloatWidth {
        match self {
            Float::F32(_) => FloatWidth::F32,
            Float::F64(_) => FloatWidth::F64,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Float::F32(x) => x as f64,
            Float::F64(x) => x,
        }
    }

    pub fn neg(self) -> Float {
        match self {
            Float::F32(x) => Float::F32(-x),
            Float::F64(x) => Float::F64(-x),
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = ryu::Buffer::new();
        match self {
            Float::F32(x) => f.write_str(buf.format(*x)),
            Float::F64(x) => f.write_str(buf.format(*x)),
        }
    }
}

macro_rules! impl_from_prim {
    ($($prim:ty => $outer:ident :: $variant:ident),* $(,)?) => {
        $(
            impl From<$prim> for $outer {
                #[inline]
                fn from(x: $prim) -> Self {
                    $outer::$variant(x)
                }
            }

            impl From<$prim> for Val {
                #[inline]
                fn from(x: $prim) -> Self {
                    Val::$outer($outer::$variant(x))
                }
            }
        )*
    };
}

impl_from_prim! {
    i8 => Int::I8,
    i16 => Int::I16,
    i32 => Int::I32,
    i64 => Int::I64,
    isize => Int::Isize,
    u8 => Int::U8,
    u16 => Int::U16,
    u32 => Int::U32,
    u64 => Int::U64,
    usize => Int::Usize,
    f32 => Float::F32,
    f64 => Float::F64,
}

/// Coerces any numeric value to a machine-width integer. Floats truncate
/// toward zero.
pub fn to_int(v: &Val) -> VmResult<isize> {
    match v {
        Val::Int(i) => Ok(i.as_isize()),
        Val::Float(f) => Ok(f.as_f64() as isize),
        _ => Err(VmError::type_error("int", v)),
    }
}

pub fn to_int64(v: &Val) -> VmResult<i64> {
    match v {
        Val::Int(i) => Ok(i.as_i64()),
        Val::Float(f) => Ok(f.as_f64() as i64),
        _ => Err(VmError::type_error("int64", v)),
    }
}

pub fn to_float64(v: &Val) -> VmResult<f64> {
    match v {
        Val::Int(i) => Ok(i.as_f64()),
        Val::Float(f) => Ok(f.as_f64()),
        _ => Err(VmError::type_error("float64", v)),
    }
}
