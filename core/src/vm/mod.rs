//! Binary instruction format: opcode registry, encoder and disassembler.

mod code;
mod disassembler;
mod error_data;
mod instruction_set;


pub use code::{Bytecode, Codegen};
pub use disassembler::{DisassembleError, Instruction, Listing, Operand, disassemble};
pub use error_data::ErrorData;
pub use instruction_set::{OPCODES, Opcode, OpcodeInfo, OperandLayout};
