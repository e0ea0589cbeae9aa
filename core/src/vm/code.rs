use core::fmt;
use core::ops::Deref;

use crate::vm::{ErrorData, Opcode, OperandLayout};

/// Append-only instruction builder.
///
/// Each opcode has a method that appends the opcode byte and its operand and
/// returns the builder, so emission chains:
///
/// ```
/// use moa_core::vm::Codegen;
///
/// let mut code = Codegen::new();
/// code.int_push(4).int_push(2).int_float().float_push(2.5).float_div();
/// let bytecode = code.build();
/// assert_eq!(bytecode[0], 0x01);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Codegen {
    bytes: Vec<u8>,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an opcode that takes no operand.
    pub fn emit(&mut self, opcode: Opcode) -> &mut Self {
        debug_assert_eq!(opcode.operand(), OperandLayout::None, "{:?}", opcode);
        self.bytes.push(opcode.byte());
        self
    }

    /// Appends another fragment after this one.
    pub fn extend(&mut self, fragment: &Codegen) -> &mut Self {
        self.bytes.extend_from_slice(&fragment.bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Snapshot of the bytes emitted so far.
    pub fn build(&self) -> Bytecode {
        Bytecode(self.bytes.clone().into_boxed_slice())
    }

    pub fn nop(&mut self) -> &mut Self {
        self.emit(Opcode::Nop)
    }

    pub fn int_push(&mut self, value: i64) -> &mut Self {
        self.bytes.push(Opcode::IntPush.byte());
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn int_add(&mut self) -> &mut Self {
        self.emit(Opcode::IntAdd)
    }

    pub fn int_sub(&mut self) -> &mut Self {
        self.emit(Opcode::IntSub)
    }

    pub fn int_mul(&mut self) -> &mut Self {
        self.emit(Opcode::IntMul)
    }

    pub fn int_div(&mut self) -> &mut Self {
        self.emit(Opcode::IntDiv)
    }

    pub fn int_mod(&mut self) -> &mut Self {
        self.emit(Opcode::IntMod)
    }

    pub fn int_neg(&mut self) -> &mut Self {
        self.emit(Opcode::IntNeg)
    }

    pub fn int_float(&mut self) -> &mut Self {
        self.emit(Opcode::IntFloat)
    }

    pub fn float_push(&mut self, value: f64) -> &mut Self {
        self.bytes.push(Opcode::FloatPush.byte());
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn float_add(&mut self) -> &mut Self {
        self.emit(Opcode::FloatAdd)
    }

    pub fn float_sub(&mut self) -> &mut Self {
        self.emit(Opcode::FloatSub)
    }

    pub fn float_mul(&mut self) -> &mut Self {
        self.emit(Opcode::FloatMul)
    }

    pub fn float_div(&mut self) -> &mut Self {
        self.emit(Opcode::FloatDiv)
    }

    pub fn float_neg(&mut self) -> &mut Self {
        self.emit(Opcode::FloatNeg)
    }

    pub fn float_int(&mut self) -> &mut Self {
        self.emit(Opcode::FloatInt)
    }

    pub fn error_data(&mut self, data: &ErrorData) -> &mut Self {
        self.bytes.push(Opcode::ErrorData.byte());
        data.encode_into(&mut self.bytes);
        self
    }
}

impl fmt::Debug for Codegen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codegen({})", HexBytes(&self.bytes))
    }
}

/// Frozen instruction stream, as returned by [`Codegen::build`].
#[derive(Clone, PartialEq, Eq)]
pub struct Bytecode(Box<[u8]>);

impl Bytecode {
    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_vec()
    }
}

impl Deref for Bytecode {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Bytecode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytecode({})", HexBytes(&self.0))
    }
}

/// Space-separated lowercase hex.
pub(crate) struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::OPCODES;

    #[test]
    fn test_push_encodings() {
        let mut code = Codegen::new();
        code.int_push(-2).float_push(2.5);
        let bytes = code.build();

        assert_eq!(bytes.len(), 18);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(&bytes[1..9], &(-2i64).to_le_bytes());
        assert_eq!(bytes[9], 0x09);
        assert_eq!(&bytes[10..18], &2.5f64.to_le_bytes());
    }

    #[test]
    fn test_every_operandless_method_emits_its_opcode() {
        let mut code = Codegen::new();
        code.nop()
            .int_add()
            .int_sub()
            .int_mul()
            .int_div()
            .int_mod()
            .int_neg()
            .int_float()
            .float_add()
            .float_sub()
            .float_mul()
            .float_div()
            .float_neg()
            .float_int();

        let expected: Vec<u8> = OPCODES
            .iter()
            .filter(|info| info.operand == OperandLayout::None)
            .map(|info| info.opcode.byte())
            .collect();
        assert_eq!(code.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_extend_preserves_order() {
        let mut left = Codegen::new();
        left.int_push(1);
        let mut right = Codegen::new();
        right.int_push(2);

        let mut code = Codegen::new();
        code.extend(&left).extend(&right).int_add();
        assert_eq!(code.len(), 19);
        assert_eq!(code.as_bytes()[9], 0x01);
        assert_eq!(code.as_bytes()[18], 0x02);
    }

    #[test]
    fn test_build_is_a_snapshot() {
        let mut code = Codegen::new();
        code.int_push(1);
        let first = code.build();
        code.int_neg();
        assert_eq!(first.len(), 9);
        assert_eq!(code.build().len(), 10);
    }

    #[test]
    fn test_error_data_record() {
        let data = ErrorData::new("ZeroDivisionError", 1, 4, 1, "1 / 0", "t.moa");
        let mut code = Codegen::new();
        code.error_data(&data).float_div();
        assert_eq!(code.len(), 1 + data.encoded_len() + 1);
        assert_eq!(code.as_bytes()[0], 0x10);
    }

    #[test]
    fn test_debug_hex() {
        let mut code = Codegen::new();
        code.int_add().float_neg();
        assert_eq!(format!("{:?}", code), "Codegen(02 0e)");
    }
}
