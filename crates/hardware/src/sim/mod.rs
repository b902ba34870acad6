//! Simulation driver and workload loading.
//!
//! Provides the workload loader that fills both memories from hex images and
//! the `Simulator` that clocks the CPU until it halts or hits a run bound.

/// Memory image loading for a test case.
pub mod loader;

/// Run loop and run outcome.
pub mod simulator;

pub use simulator::{RunOutcome, Simulator};
