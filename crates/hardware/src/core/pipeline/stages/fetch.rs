//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! It picks the fetch address (redirect target, the held address during a
//! stall, or the predicted PC), reads instruction memory and asks the branch
//! unit for the next PC.

use crate::core::Cpu;
use crate::core::pipeline::broadcast::Broadcast;
use crate::core::pipeline::latches::IfIdEntry;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `prev` - Broadcast registered at the end of the previous cycle
/// * `stall` - Decode stalled this cycle
///
/// # Behavior
///
/// - A redirect from EX wins over everything else
/// - On a stall the previous address is fetched again so decode sees the same word
/// - The predicted next PC travels with the instruction for checking in EX
pub fn fetch_stage(cpu: &mut Cpu, prev: &Broadcast, stall: bool) {
    let pc = match prev.redirect {
        Some(target) => target,
        None if stall => cpu.last_pc,
        None => cpu.pc,
    };

    let inst = cpu.system.imem.read(pc);
    let prediction = cpu.branch_unit.predict(pc);
    if prediction.btb_hit {
        cpu.stats.btb_hits += 1;
    }

    tracing::trace!(
        "IF: pc={:#010x} inst={:#010x} next={:#010x} (btb_hit={}, taken={})",
        pc,
        inst,
        prediction.next_pc,
        prediction.btb_hit,
        prediction.taken
    );

    cpu.pc = prediction.next_pc;
    cpu.last_pc = pc;
    cpu.if_id = IfIdEntry {
        valid: true,
        pc,
        predicted_next_pc: prediction.next_pc,
        inst,
        stalled: stall && prev.redirect.is_none(),
    };
}
