//! Core processor implementation.
//!
//! This module contains the CPU state, the five-stage instruction pipeline and
//! the execution units the pipeline drives.

/// CPU state and the per-cycle tick.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, branch unit, multiplier, dividers).
pub mod units;

pub use self::cpu::Cpu;
