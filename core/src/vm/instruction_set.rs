//! Moa VM instruction set.
//!
//! Every instruction is one opcode byte followed by an operand whose layout
//! is determined by the opcode alone. All multi-byte fields are
//! little-endian.
//!
//! ```text
//! ┌────────┬─────────────────────────────┐
//! │ opcode │ operand (0, 8 or variable)  │
//! └────────┴─────────────────────────────┘
//! ```
//!
//! The VM is stack based: arithmetic pops its operands and pushes the
//! result. Stack effects are noted per opcode as `[..., a, b] -> [..., r]`.
//!
//! [`OPCODES`] is the single registry shared by the encoder and the
//! disassembler, indexed by opcode byte.

use core::fmt;

use hashbrown::HashMap;
use lazy_static::lazy_static;

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Does nothing.
    Nop = 0x00,

    // ========================================================================
    // Int (0x01 - 0x08)
    // ========================================================================
    /// Operand: i64 | Stack: [...] -> [..., int]
    IntPush = 0x01,
    /// Stack: [..., a, b] -> [..., a + b]
    IntAdd = 0x02,
    /// Stack: [..., a, b] -> [..., a - b]
    IntSub = 0x03,
    /// Stack: [..., a, b] -> [..., a * b]
    IntMul = 0x04,
    /// Stack: [..., a, b] -> [..., a / b]
    ///
    /// Part of the format but never selected by the compiler, which always
    /// divides in floating point.
    IntDiv = 0x05,
    /// Stack: [..., a, b] -> [..., a % b]
    IntMod = 0x06,
    /// Stack: [..., a] -> [..., -a]
    IntNeg = 0x07,
    /// Stack: [..., int] -> [..., float]
    IntFloat = 0x08,

    // ========================================================================
    // Float (0x09 - 0x0F)
    // ========================================================================
    /// Operand: f64 | Stack: [...] -> [..., float]
    FloatPush = 0x09,
    /// Stack: [..., a, b] -> [..., a + b]
    FloatAdd = 0x0a,
    /// Stack: [..., a, b] -> [..., a - b]
    FloatSub = 0x0b,
    /// Stack: [..., a, b] -> [..., a * b]
    FloatMul = 0x0c,
    /// Stack: [..., a, b] -> [..., a / b]
    FloatDiv = 0x0d,
    /// Stack: [..., a] -> [..., -a]
    FloatNeg = 0x0e,
    /// Stack: [..., float] -> [..., int]
    FloatInt = 0x0f,

    // ========================================================================
    // Metadata (0x10)
    // ========================================================================
    /// Source context for a fault raised by the next instruction.
    ///
    /// Operand: see [`crate::vm::ErrorData`]. No stack effect.
    ErrorData = 0x10,
}
static_assertions::assert_eq_size!(Opcode, u8);

/// Shape of the bytes following an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandLayout {
    None,
    I64,
    F64,
    /// `u8 len + type, u32 line, u16 col, u16 len, u16 len + lexeme, u16 len + file`
    ErrorData,
}

impl OperandLayout {
    /// Size of the operand when it does not depend on its contents.
    pub const fn fixed_size(&self) -> Option<usize> {
        match self {
            OperandLayout::None => Some(0),
            OperandLayout::I64 | OperandLayout::F64 => Some(8),
            OperandLayout::ErrorData => None,
        }
    }
}

#[derive(Debug)]
pub struct OpcodeInfo {
    pub opcode: Opcode,
    pub mnemonic: &'static str,
    pub operand: OperandLayout,
}

const OPCODE_COUNT: usize = 17;
static_assertions::const_assert_eq!(OPCODE_COUNT, Opcode::ErrorData as usize + 1);

macro_rules! opcode {
    ($opcode:ident, $mnemonic:literal, $operand:ident) => {
        OpcodeInfo {
            opcode: Opcode::$opcode,
            mnemonic: $mnemonic,
            operand: OperandLayout::$operand,
        }
    };
}

/// Registry of every opcode, indexed by its byte value.
pub static OPCODES: [OpcodeInfo; OPCODE_COUNT] = [
    opcode!(Nop, "NOP", None),
    opcode!(IntPush, "INT_PUSH", I64),
    opcode!(IntAdd, "INT_ADD", None),
    opcode!(IntSub, "INT_SUB", None),
    opcode!(IntMul, "INT_MUL", None),
    opcode!(IntDiv, "INT_DIV", None),
    opcode!(IntMod, "INT_MOD", None),
    opcode!(IntNeg, "INT_NEG", None),
    opcode!(IntFloat, "INT_FLOAT", None),
    opcode!(FloatPush, "FLOAT_PUSH", F64),
    opcode!(FloatAdd, "FLOAT_ADD", None),
    opcode!(FloatSub, "FLOAT_SUB", None),
    opcode!(FloatMul, "FLOAT_MUL", None),
    opcode!(FloatDiv, "FLOAT_DIV", None),
    opcode!(FloatNeg, "FLOAT_NEG", None),
    opcode!(FloatInt, "FLOAT_INT", None),
    opcode!(ErrorData, "ERROR_DATA", ErrorData),
];

lazy_static! {
    static ref BY_MNEMONIC: HashMap<&'static str, Opcode> =
        OPCODES.iter().map(|info| (info.mnemonic, info.opcode)).collect();
}

impl Opcode {
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        OPCODES.get(byte as usize).map(|info| info.opcode)
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        BY_MNEMONIC.get(mnemonic).copied()
    }

    pub const fn byte(self) -> u8 {
        self as u8
    }

    pub fn info(self) -> &'static OpcodeInfo {
        &OPCODES[self as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    pub fn operand(self) -> OperandLayout {
        self.info().operand
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
