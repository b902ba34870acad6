//! Integer Register File.
//!
//! This module implements the 32-entry RV32 register file. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Observability:** Captures the complete register state as a `RegisterDump`
//!    when the program halts.

use std::fmt;

use crate::isa::abi::NUM_REGS;

/// Integer register file.
///
/// Register `x0` is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a register. Writes to `x0` are ignored.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Snapshots every register for the halt log.
    pub fn dump(&self) -> RegisterDump {
        RegisterDump { regs: self.regs }
    }
}

/// Snapshot of the register file taken when a halt instruction commits.
///
/// Displays as 32 lines of the form `x{i} = 0x{value:08x}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterDump {
    regs: [u32; NUM_REGS],
}

impl RegisterDump {
    /// Value of register `idx` at halt time.
    pub fn get(&self, idx: usize) -> u32 {
        self.regs[idx]
    }

    /// All register values, `x0` first.
    pub fn values(&self) -> &[u32; NUM_REGS] {
        &self.regs
    }

    /// The dump as individual log lines.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.regs
            .iter()
            .enumerate()
            .map(|(i, v)| format!("x{i} = 0x{v:08x}"))
    }
}

impl fmt::Display for RegisterDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
