//! Memory models.
//!
//! This module provides:
//! 1. **Sram:** word-addressed synchronous memory with one read port, one
//!    write port and a registered output.
//! 2. **Image:** the plain-text hex format used to preload both memories.

/// Hex memory image reader.
pub mod image;

/// Synchronous SRAM.
pub mod sram;

pub use sram::Sram;
