//! RISC-V Base Integer Instruction Set (RV32I).
//!
//! Defines the encodings of the 32-bit base integer instructions the pipeline
//! executes.
//!
//! # Structure
//!
//! - `opcodes`: Major opcodes plus the fixed encodings the core treats specially
//!   (canonical NOP and the three halt encodings).
//! - `funct3`: Minor opcodes distinguishing instructions within a major opcode.
//! - `funct7`: Additional opcode bits for R-type instructions.

/// Function code 3 definitions for base integer operations.
pub mod funct3;

/// Function code 7 definitions for base integer operations.
pub mod funct7;

/// Base integer instruction set opcodes and fixed encodings.
pub mod opcodes;
