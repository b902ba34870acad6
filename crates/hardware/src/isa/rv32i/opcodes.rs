//! RISC-V Base Integer (I) Opcodes.
//!
//! Defines the major opcodes (bits 6-0) for the RV32I instruction set, and the
//! complete instruction words the pipeline recognises without decoding.

/// Load instructions (LB, LH, LW, LBU, LHU).
pub const OP_LOAD: u32 = 0b0000011;

/// Immediate arithmetic instructions (ADDI, ANDI, SLLI, etc.).
pub const OP_IMM: u32 = 0b0010011;

/// Add Upper Immediate to PC (AUIPC).
pub const OP_AUIPC: u32 = 0b0010111;

/// Store instructions (SB, SH, SW).
pub const OP_STORE: u32 = 0b0100011;

/// Register-Register arithmetic (ADD, SUB, SLL, etc.) and the M extension.
pub const OP_REG: u32 = 0b0110011;

/// Load Upper Immediate (LUI).
pub const OP_LUI: u32 = 0b0110111;

/// Conditional Branch instructions (BEQ, BNE, etc.).
pub const OP_BRANCH: u32 = 0b1100011;

/// Jump and Link Register (JALR).
pub const OP_JALR: u32 = 0b1100111;

/// Jump and Link (JAL).
pub const OP_JAL: u32 = 0b1101111;

/// System instructions (ECALL, EBREAK).
pub const OP_SYSTEM: u32 = 0b1110011;

/// Canonical NOP (`addi x0, x0, 0`).
///
/// Substituted for an all-zero instruction word, which only appears while the
/// instruction memory output is still in its reset state.
pub const NOP: u32 = 0x0000_0013;

/// Environment call; halts the simulation when it retires.
pub const ECALL: u32 = 0x0000_0073;

/// Breakpoint; halts the simulation when it retires.
pub const EBREAK: u32 = 0x0010_0073;

/// `sw x0, -1(x0)`: store of -1 through register 0, reserved as a halt marker.
pub const HALT_STORE: u32 = 0xFE00_0FA3;
