//! # Integration Tests
//!
//! Whole programs run through the `Simulator`. Each file focuses on one
//! pipeline behaviour and checks both architectural results and the cycle,
//! stall and flush counters that expose the timing.

/// Straight-line programs, halt encodings and drain behaviour.
pub mod basic;

/// Branches, jumps, flushes and the predictors.
pub mod control;




/// Multiplier and divider programs.
pub mod units;
