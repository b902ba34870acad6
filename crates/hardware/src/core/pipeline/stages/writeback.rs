//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It commits results to the register file, publishes the WB bypass value,
//! counts retirements and stops the machine when a halt instruction commits.

use crate::core::Cpu;
use crate::core::pipeline::broadcast::Broadcast;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `next` - Broadcast being built for the next cycle
///
/// # Returns
///
/// The destination register committed this cycle (zero for none), for the
/// hazard unit.
///
/// # Behavior
///
/// - Writes the packet's data to `rd` unless `rd` is zero
/// - Captures the register file and marks the CPU halted on a committed halt
pub fn wb_stage(cpu: &mut Cpu, next: &mut Broadcast) -> usize {
    let wb = std::mem::take(&mut cpu.mem_wb);

    if wb.rd != 0 {
        cpu.regs.write(wb.rd, wb.data);
        next.wb_bypass = wb.data;
        tracing::trace!("WB: pc={:#010x} x{} <- {:#010x}", wb.pc, wb.rd, wb.data);
    }

    if wb.valid {
        cpu.stats.instructions_retired += 1;
    }

    if wb.halt {
        let dump = cpu.regs.dump();
        tracing::info!(
            "WB: halt at pc={:#010x} after {} cycles",
            wb.pc,
            cpu.stats.cycles + 1
        );
        for line in dump.lines() {
            tracing::info!("{}", line);
        }
        cpu.halted = Some(dump);
    }

    wb.rd
}
