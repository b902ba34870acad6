//! RISC-V Multiply/Divide Extension (M) Opcodes.
//!
//! The M extension shares the `OP_REG` opcode with base integer instructions.
//! It is distinguished by bit 25 of the instruction (the low bit of `funct7`).

/// M-Extension selector in funct7 field.
pub const M_EXTENSION: u32 = 0b0000001;
