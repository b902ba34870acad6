//! RISC-V Application Binary Interface (ABI) register name constants.
//!
//! Names for the registers the simulator touches directly: the hardwired zero
//! register and the stack pointer it seeds at reset.

/// Register x0 (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register x2 (stack pointer, sp).
pub const REG_SP: usize = 2;
/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;
