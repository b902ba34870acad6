//! RV32IM pipeline simulator library.
//!
//! This crate implements a cycle-accurate, in-order, five-stage RV32IM pipeline with the following:
//! 1. **Core:** Fetch, decode, execute, memory and writeback stages with operand forwarding,
//!    load-use stalls and misprediction flushes.
//! 2. **Units:** ALU, BTB plus direction predictors, a three-stage multiplier and two
//!    interchangeable multi-cycle dividers.
//! 3. **ISA:** Field extraction, immediates and instruction classification for RV32I and RV32M.
//! 4. **SoC:** Separate instruction and data SRAMs loaded from hex images.
//! 5. **Simulation:** Loader, run loop with cycle and idle bounds, configuration and statistics.

/// Common types (errors, register file, halt dump).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (state, pipeline, functional units).
pub mod core;
/// Instruction set (field extraction, decode, ABI, RV32I/M encodings).
pub mod isa;
/// Workload loader and run loop.
pub mod sim;
/// Instruction and data memories.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main CPU type; holds registers, pipeline latches, functional units and stats.
pub use crate::core::Cpu;
/// Run loop over a `Cpu`.
pub use crate::sim::{RunOutcome, Simulator};
/// Instruction and data memories; construct with `System::new`.
pub use crate::soc::System;
