//! Execution units and functional components.
//!
//! This module contains the processor's execution units: the single-cycle ALU,
//! the branch prediction unit, the pipelined multiplier and the multi-cycle
//! dividers.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch prediction unit: BTB and direction predictors.
pub mod bru;

/// Restoring and radix-16 dividers behind one start/tick/poll interface.
pub mod div;

/// Three-stage pipelined multiplier.
pub mod mul;
