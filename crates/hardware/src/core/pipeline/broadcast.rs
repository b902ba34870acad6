//! Cycle-scoped feedback values.
//!
//! The pipeline has four single-writer, multi-reader registers: the branch
//! redirect written by EX and the bypass values written by EX, MEM and WB.
//! They live in a `Broadcast` that is produced during one cycle and read,
//! unchanged, during the next. No stage reads a value written in the same cycle.

/// Registered feedback from one cycle to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Broadcast {
    /// Corrected next PC after a misprediction detected in EX.
    pub redirect: Option<u32>,
    /// Result emitted by EX.
    pub ex_bypass: u32,
    /// Result handled by MEM (load data or passed-through ALU value).
    pub mem_bypass: u32,
    /// Value committed by WB.
    pub wb_bypass: u32,
}

impl Broadcast {
    /// Starting point for the next cycle's broadcast.
    ///
    /// Bypass registers keep their value until a stage overwrites them; the
    /// redirect is consumed after one cycle.
    pub fn carry(&self) -> Self {
        Self {
            redirect: None,
            ..*self
        }
    }
}

/// Destination tags published by EX, MEM and WB for the hazard unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageTags {
    /// Destination of the packet EX emitted this cycle.
    pub ex_rd: usize,
    /// Whether that packet is a load.
    pub ex_is_load: bool,
    /// EX holds an operation in the multiplier or divider.
    pub ex_unit_busy: bool,
    /// Destination of the packet MEM handled this cycle.
    pub mem_rd: usize,
    /// Destination of the packet WB committed this cycle.
    pub wb_rd: usize,
}
