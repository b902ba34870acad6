//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Error Handling:** The `SimError` type returned by loading and configuration.
//! 2. **Register Management:** The 32-entry integer register file and its halt dump.

/// Error types for image loading and configuration.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::SimError;
pub use reg::{RegisterDump, RegisterFile};
