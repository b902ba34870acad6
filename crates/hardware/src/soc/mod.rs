//! System-on-Chip (SoC) Components.
//!
//! The simulated system is a Harvard machine: one instruction SRAM feeding
//! fetch and one data SRAM driven by the execute stage. Both are word
//! addressed and share the configured depth.

/// System builder for assembling the two memories.
pub mod builder;

/// Synchronous SRAM model and memory image parsing.
pub mod memory;

pub use builder::System;
