//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Decoding:** Resolves the instruction class once and derives its control signals.
//! 2. **Register Read:** Reads both source operands from the register file.
//! 3. **Hazard Detection:** Asks the hazard unit for forwarding selectors and stall.
//! 4. **Bubble Insertion:** Emits an inert packet on a stall, a redirect or an empty latch.

use crate::core::Cpu;
use crate::core::pipeline::broadcast::{Broadcast, StageTags};
use crate::core::pipeline::hazards::{self, HazardInputs};
use crate::core::pipeline::latches::IdExEntry;
use crate::isa::decode::decode as instruction_decode;
use crate::isa::rv32i::opcodes;

/// Executes the instruction decode stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `prev` - Broadcast registered at the end of the previous cycle.
/// * `tags` - Destinations published this cycle by EX, MEM and WB.
///
/// # Returns
///
/// `true` when decode stalls; fetch then repeats the previous address.
pub fn decode_stage(cpu: &mut Cpu, prev: &Broadcast, tags: StageTags) -> bool {
    let if_id = std::mem::take(&mut cpu.if_id);

    let fetched = if if_id.stalled {
        cpu.last_inst
    } else {
        if_id.inst
    };
    let word = if fetched == 0 { opcodes::NOP } else { fetched };
    cpu.last_inst = word;

    let d = instruction_decode(word);
    let hazard = hazards::evaluate(
        HazardInputs {
            rs1: d.rs1,
            rs2: d.rs2,
            rs1_used: d.rs1_used,
            rs2_used: d.rs2_used,
        },
        tags,
    );
    let stall = hazard.load_use_stall || tags.ex_unit_busy;

    if prev.redirect.is_some() {
        if if_id.valid {
            cpu.stats.flushed += 1;
            tracing::debug!("ID: flush pc={:#010x} inst={:#010x}", if_id.pc, word);
        }
        cpu.id_ex = IdExEntry::default();
        return false;
    }

    if !if_id.valid {
        cpu.id_ex = IdExEntry::default();
        return false;
    }

    if stall {
        if hazard.load_use_stall {
            cpu.stats.stalls_load_use += 1;
        } else {
            cpu.stats.stalls_unit += 1;
        }
        tracing::debug!(
            "ID: stall pc={:#010x} (load_use={}, unit_busy={})",
            if_id.pc,
            hazard.load_use_stall,
            tags.ex_unit_busy
        );
        cpu.id_ex = IdExEntry::default();
        return true;
    }

    tracing::trace!(
        "ID: pc={:#010x} inst={:#010x} {:?} rd=x{} rs1=x{}({:?}) rs2=x{}({:?})",
        if_id.pc,
        word,
        d.class,
        d.rd,
        d.rs1,
        hazard.rs1_sel,
        d.rs2,
        hazard.rs2_sel
    );

    cpu.id_ex = IdExEntry {
        valid: true,
        pc: if_id.pc,
        predicted_next_pc: if_id.predicted_next_pc,
        inst: word,
        ctrl: d.ctrl,
        rd: d.rd,
        imm: d.imm,
        rs1: d.rs1,
        rs2: d.rs2,
        rv1: cpu.regs.read(d.rs1),
        rv2: cpu.regs.read(d.rs2),
        rs1_sel: hazard.rs1_sel,
        rs2_sel: hazard.rs2_sel,
    };
    false
}
