//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the following:
//! 1. **Flush:** Squashes its resident instruction when the previous cycle redirected fetch,
//!    and everything younger than a halt.
//! 2. **Operand Resolution:** Applies the forwarding selectors chosen in decode.
//! 3. **Arithmetic Execution:** Runs the ALU, or parks MUL/DIV/REM in the multiplier or
//!    divider until the unit reports a result.
//! 4. **Branch Resolution:** Recomputes the next PC, trains the branch unit and raises a
//!    redirect on misprediction.
//! 5. **Data Memory:** Issues loads and byte-masked stores to the data SRAM.

use crate::core::Cpu;
use crate::core::pipeline::broadcast::Broadcast;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::core::pipeline::signals::{BranchKind, FwdSel, Op1Sel, Op2Sel, UnitOp};
use crate::core::pipeline::stages::memory::store_lanes;
use crate::core::units::alu::Alu;
use crate::core::units::div::Divider;

/// Bit mask to clear the low bit of `JALR` targets.
const JALR_ALIGNMENT_MASK: u32 = !1;

/// Execute-stage outputs consumed by the hazard unit in the same cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExReport {
    /// Destination of the packet emitted into EX/MEM.
    pub rd: usize,
    /// That packet is a load whose data arrives next cycle.
    pub is_load: bool,
    /// The multiplier or divider holds an operation or an unconsumed result.
    pub unit_busy: bool,
}

/// Whether a resolved branch or jump leaves the fall-through path.
///
/// # Arguments
///
/// * `kind` - Branch kind from the control packet.
/// * `alu` - The ALU comparison result: a difference for BEQ/BNE, the
///   set-less-than bit for the ordered comparisons.
pub fn branch_taken(kind: BranchKind, alu: u32) -> bool {
    match kind {
        BranchKind::None => false,
        BranchKind::Beq => alu == 0,
        BranchKind::Bne => alu != 0,
        BranchKind::Blt | BranchKind::Bltu => alu & 1 != 0,
        BranchKind::Bge | BranchKind::Bgeu => alu & 1 == 0,
        BranchKind::Jal | BranchKind::Jalr => true,
    }
}

/// Operand value after forwarding.
#[inline(always)]
fn forward(sel: FwdSel, regfile: u32, prev: &Broadcast) -> u32 {
    match sel {
        FwdSel::RegFile => regfile,
        FwdSel::Ex => prev.ex_bypass,
        FwdSel::Mem => prev.mem_bypass,
        FwdSel::Wb => prev.wb_bypass,
    }
}

/// Executes the instruction execute stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `prev` - Broadcast registered at the end of the previous cycle.
/// * `next` - Broadcast being built for the next cycle.
///
/// # Returns
///
/// The destination, load flag and unit occupancy the hazard unit needs.
pub fn execute_stage(cpu: &mut Cpu, prev: &Broadcast, next: &mut Broadcast) -> ExReport {
    let mut id = std::mem::take(&mut cpu.id_ex);

    if id.valid && (prev.redirect.is_some() || cpu.halt_pending) {
        if prev.redirect.is_some() {
            cpu.stats.flushed += 1;
            tracing::debug!("EX: flush pc={:#010x} inst={:#010x}", id.pc, id.inst);
        }
        id = IdExEntry::default();
    }

    cpu.multiplier.tick();
    cpu.divider.tick();

    let out = if let Some(done) = complete_unit_op(cpu) {
        done
    } else if id.valid && id.ctrl.unit != UnitOp::None {
        dispatch_unit_op(cpu, &id, prev);
        ExMemEntry::default()
    } else {
        execute_alu(cpu, &id, prev, next)
    };

    next.ex_bypass = out.alu;
    let report = ExReport {
        rd: out.rd,
        is_load: out.ctrl.is_load(),
        unit_busy: cpu.multiplier.is_busy() || cpu.divider.is_busy() || cpu.held.is_some(),
    };
    cpu.ex_mem = out;
    report
}

/// Emits the parked packet once its unit has a result.
fn complete_unit_op(cpu: &mut Cpu) -> Option<ExMemEntry> {
    let unit = cpu.held.as_ref()?.ctrl.unit;

    let result = match unit {
        UnitOp::Mul(_) => {
            let product = cpu.multiplier.result()?;
            cpu.multiplier.clear_result();
            product
        }
        UnitOp::Div(_) => {
            let outcome = cpu.divider.poll();
            if !outcome.ready {
                return None;
            }
            cpu.divider.clear_result();
            if outcome.error {
                cpu.stats.div_faults += 1;
                tracing::debug!("DIV: fault flagged, result={:#010x}", outcome.result);
            }
            outcome.result
        }
        UnitOp::None => return None,
    };

    let mut out = cpu.held.take()?;
    out.alu = result;
    tracing::trace!(
        "EX: pc={:#010x} {:?} done -> {:#010x}",
        out.pc,
        unit,
        result
    );
    Some(out)
}

/// Starts the multiplier or divider and parks the packet until it finishes.
fn dispatch_unit_op(cpu: &mut Cpu, id: &IdExEntry, prev: &Broadcast) {
    let rs1 = forward(id.rs1_sel, id.rv1, prev);
    let rs2 = forward(id.rs2_sel, id.rv2, prev);

    let started = match id.ctrl.unit {
        UnitOp::Mul(op) => {
            cpu.stats.mul_ops += 1;
            cpu.multiplier.start(rs1, rs2, op)
        }
        UnitOp::Div(op) => {
            cpu.stats.div_ops += 1;
            cpu.divider
                .start(rs1, rs2, op.is_signed(), op.wants_remainder())
        }
        UnitOp::None => false,
    };
    // Decode stalls while a unit is busy, so a dispatch always finds it idle.
    debug_assert!(started, "functional unit busy at dispatch");

    cpu.held = Some(ExMemEntry {
        valid: true,
        pc: id.pc,
        inst: id.inst,
        rd: id.rd,
        alu: 0,
        ctrl: id.ctrl,
    });
}

/// Single-cycle path: ALU, branch resolution and data memory.
fn execute_alu(
    cpu: &mut Cpu,
    id: &IdExEntry,
    prev: &Broadcast,
    next: &mut Broadcast,
) -> ExMemEntry {
    let rs1 = forward(id.rs1_sel, id.rv1, prev);
    let rs2 = forward(id.rs2_sel, id.rv2, prev);

    let op1 = match id.ctrl.op1_sel {
        Op1Sel::Rs1 => rs1,
        Op1Sel::Pc => id.pc,
        Op1Sel::Zero => 0,
    };
    let op2 = match id.ctrl.op2_sel {
        Op2Sel::Rs2 => rs2,
        Op2Sel::Imm => id.imm,
        Op2Sel::Const4 => 4,
    };
    let alu = Alu::execute(id.ctrl.alu_op, op1, op2);

    if id.valid {
        resolve_next_pc(cpu, id, rs1, alu, next);
        tracing::trace!(
            "EX: pc={:#010x} {:?} {:#010x}, {:#010x} -> {:#010x}",
            id.pc,
            id.ctrl.alu_op,
            op1,
            op2,
            alu
        );
    }

    if id.ctrl.halt {
        cpu.halt_pending = true;
        tracing::debug!("EX: halt at pc={:#010x}, squashing younger instructions", id.pc);
    } else if id.ctrl.is_store() {
        let (data, byte_enable) = store_lanes(alu, rs2, id.ctrl.mem_width);
        cpu.system.dmem.write(alu, data, byte_enable);
        tracing::trace!(
            "EX: store [{:#010x}] <- {:#010x} (be={:04b})",
            alu,
            data,
            byte_enable
        );
    } else if id.ctrl.is_load() {
        let _ = cpu.system.dmem.read(alu);
    }

    ExMemEntry {
        valid: id.valid,
        pc: id.pc,
        inst: id.inst,
        rd: id.rd,
        alu,
        ctrl: id.ctrl,
    }
}

/// Recomputes the next PC, trains the branch unit and raises a redirect on a miss.
fn resolve_next_pc(cpu: &mut Cpu, id: &IdExEntry, rs1: u32, alu: u32, next: &mut Broadcast) {
    let kind = id.ctrl.branch;
    let fallthrough = id.pc.wrapping_add(4);

    let actual = if kind == BranchKind::None {
        fallthrough
    } else {
        let target = if kind == BranchKind::Jalr {
            rs1.wrapping_add(id.imm) & JALR_ALIGNMENT_MASK
        } else {
            id.pc.wrapping_add(id.imm)
        };
        let taken = branch_taken(kind, alu);
        cpu.branch_unit.resolve(id.pc, taken, target);
        cpu.stats.branches += 1;
        if taken { target } else { fallthrough }
    };

    if actual != id.predicted_next_pc {
        next.redirect = Some(actual);
        cpu.stats.mispredictions += 1;
        tracing::debug!(
            "EX: mispredict pc={:#010x} predicted={:#010x} actual={:#010x}",
            id.pc,
            id.predicted_next_pc,
            actual
        );
    }
}
