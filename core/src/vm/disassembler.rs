use core::fmt;
use core::ops::Deref;

use tracing::{debug, trace};

use crate::vm::code::HexBytes;
use crate::vm::{ErrorData, Opcode, OperandLayout};

/// The byte stream does not match the instruction format.
///
/// There is no resynchronization: once an operand is misread every later
/// offset is wrong, so decoding stops at the first inconsistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisassembleError {
    #[error("Unknown opcode 0x{byte:02x} at address 0x{address:04x}")]
    UnknownOpcode { address: usize, byte: u8 },

    #[error(
        "Truncated {opcode:?} at address 0x{address:04x}: needs {needed} more bytes, {available} left"
    )]
    Truncated {
        address: usize,
        opcode: Opcode,
        needed: usize,
        available: usize,
    },

    #[error("Invalid UTF-8 in {field} of {opcode:?} at address 0x{address:04x}")]
    InvalidUtf8 {
        address: usize,
        opcode: Opcode,
        field: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    None,
    Int(i64),
    Float(f64),
    ErrorData(ErrorData),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Int(value) => write!(f, "{}", value),
            Operand::Float(value) => write!(f, "{:?}", value),
            Operand::ErrorData(data) => write!(
                f,
                "{} {}:{}:{} len={} lexeme={:?}",
                data.error_type, data.file, data.line, data.column, data.length, data.lexeme
            ),
        }
    }
}

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub address: usize,
    pub opcode: Opcode,
    pub operand: Operand,
    /// The raw bytes of the instruction, opcode included.
    pub bytes: Vec<u8>,
}

impl Instruction {
    pub fn mnemonic(&self) -> &'static str {
        self.opcode.mnemonic()
    }

    pub fn operand_text(&self) -> String {
        self.operand.to_string()
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}  {:<10}  {:<12}  {}",
            self.address,
            self.mnemonic(),
            self.operand_text(),
            HexBytes(&self.bytes)
        )
    }
}

/// Decoded instruction stream, in address order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    instructions: Vec<Instruction>,
}

impl Listing {
    pub fn mnemonics(&self) -> Vec<&'static str> {
        self.instructions.iter().map(Instruction::mnemonic).collect()
    }

    /// Total bytes covered by the listing.
    pub fn byte_len(&self) -> usize {
        self.instructions.iter().map(Instruction::size).sum()
    }
}

impl Deref for Listing {
    type Target = [Instruction];

    fn deref(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl IntoIterator for Listing {
    type Item = Instruction;
    type IntoIter = std::vec::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.into_iter()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

/// Decodes `bytes` into a listing, one entry per instruction.
pub fn disassemble(bytes: &[u8]) -> Result<Listing, DisassembleError> {
    let mut instructions = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        let opcode = Opcode::from_byte(byte)
            .ok_or(DisassembleError::UnknownOpcode { address: pos, byte })?;

        let mut reader = OperandReader {
            bytes,
            address: pos,
            pos: pos + 1,
            opcode,
        };
        let operand = match opcode.operand() {
            OperandLayout::None => Operand::None,
            OperandLayout::I64 => Operand::Int(i64::from_le_bytes(reader.array()?)),
            OperandLayout::F64 => Operand::Float(f64::from_le_bytes(reader.array()?)),
            OperandLayout::ErrorData => Operand::ErrorData(reader.error_data()?),
        };

        let end = reader.pos;
        trace!(address = pos, %opcode, size = end - pos, "Decoded instruction");
        instructions.push(Instruction {
            address: pos,
            opcode,
            operand,
            bytes: bytes[pos..end].to_vec(),
        });
        pos = end;
    }

    debug!(instructions = instructions.len(), bytes = bytes.len(), "Disassembled");
    Ok(Listing { instructions })
}

struct OperandReader<'b> {
    bytes: &'b [u8],
    address: usize,
    pos: usize,
    opcode: Opcode,
}

impl<'b> OperandReader<'b> {
    fn take(&mut self, n: usize) -> Result<&'b [u8], DisassembleError> {
        let available = self.bytes.len() - self.pos;
        if n > available {
            return Err(DisassembleError::Truncated {
                address: self.address,
                opcode: self.opcode,
                needed: n,
                available,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], DisassembleError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn string(&mut self, len: usize, field: &'static str) -> Result<String, DisassembleError> {
        let raw = self.take(len)?;
        core::str::from_utf8(raw)
            .map(str::to_string)
            .map_err(|_| DisassembleError::InvalidUtf8 {
                address: self.address,
                opcode: self.opcode,
                field,
            })
    }

    fn error_data(&mut self) -> Result<ErrorData, DisassembleError> {
        let type_len = u8::from_le_bytes(self.array()?) as usize;
        let error_type = self.string(type_len, "type")?;
        let line = u32::from_le_bytes(self.array()?);
        let column = u16::from_le_bytes(self.array()?);
        let length = u16::from_le_bytes(self.array()?);
        let lexeme_len = u16::from_le_bytes(self.array()?) as usize;
        let lexeme = self.string(lexeme_len, "lexeme")?;
        let file_len = u16::from_le_bytes(self.array()?) as usize;
        let file = self.string(file_len, "file")?;

        Ok(ErrorData {
            error_type,
            line,
            column,
            length,
            lexeme,
            file,
        })
    }
}
