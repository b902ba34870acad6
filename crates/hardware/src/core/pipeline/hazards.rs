//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! dependencies exist between instructions. It provides:
//! 1. **Operand Forwarding:** Resolves Read-After-Write (RAW) hazards by selecting
//!    the EX, MEM or WB result instead of the register file value.
//! 2. **Hazard Detection:** Identifies load-use hazards that require a one-cycle stall.
//!
//! The unit is a pure function of the decoding instruction's sources and the
//! destination tags published by the later stages this cycle.

use crate::core::pipeline::broadcast::StageTags;
use crate::core::pipeline::signals::FwdSel;

/// Source operands of the instruction in decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardInputs {
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Whether rs1 is read.
    pub rs1_used: bool,
    /// Whether rs2 is read.
    pub rs2_used: bool,
}

/// Result of hazard evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardOutcome {
    /// Forwarding source for rs1.
    pub rs1_sel: FwdSel,
    /// Forwarding source for rs2.
    pub rs2_sel: FwdSel,
    /// A source depends on a load still in EX.
    pub load_use_stall: bool,
}

/// Evaluates forwarding selectors and the load-use stall.
///
/// # Arguments
///
/// * `inputs` - Source registers of the instruction in decode.
/// * `tags` - Destinations published by EX, MEM and WB this cycle.
///
/// # Returns
///
/// One selector per operand (priority EX > MEM > WB > register file) and the
/// load-use stall flag. Register 0 and unused operands always select the
/// register file.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::broadcast::StageTags;
/// use rvpipe_core::core::pipeline::hazards::{evaluate, HazardInputs};
/// use rvpipe_core::core::pipeline::signals::FwdSel;
///
/// // lw x1, 0(x2) in EX; add x3, x1, x1 in decode
/// let tags = StageTags { ex_rd: 1, ex_is_load: true, ..StageTags::default() };
/// let inputs = HazardInputs { rs1: 1, rs2: 1, rs1_used: true, rs2_used: true };
/// let out = evaluate(inputs, tags);
/// assert!(out.load_use_stall);
/// assert_eq!(out.rs1_sel, FwdSel::RegFile);
/// ```
pub fn evaluate(inputs: HazardInputs, tags: StageTags) -> HazardOutcome {
    let load_use = |rs: usize, used: bool| used && rs != 0 && tags.ex_is_load && rs == tags.ex_rd;

    HazardOutcome {
        rs1_sel: select(inputs.rs1, inputs.rs1_used, tags),
        rs2_sel: select(inputs.rs2, inputs.rs2_used, tags),
        load_use_stall: load_use(inputs.rs1, inputs.rs1_used)
            || load_use(inputs.rs2, inputs.rs2_used),
    }
}

/// Forwarding source for one operand; the most recent producer wins.
fn select(rs: usize, used: bool, tags: StageTags) -> FwdSel {
    if !used || rs == 0 {
        FwdSel::RegFile
    } else if rs == tags.ex_rd && !tags.ex_is_load {
        FwdSel::Ex
    } else if rs == tags.mem_rd {
        FwdSel::Mem
    } else if rs == tags.wb_rd {
        FwdSel::Wb
    } else {
        FwdSel::RegFile
    }
}
