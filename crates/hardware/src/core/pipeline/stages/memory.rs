//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline.
//! The data SRAM was already addressed by EX, so MEM only shapes the word that
//! came back: it picks the addressed byte or half and extends it. Non-load
//! results pass through unchanged.
//!
//! Misaligned halves and words are not trapped. The low address bits select a
//! lane inside the aligned word exactly as for aligned accesses.

use crate::core::Cpu;
use crate::core::pipeline::broadcast::Broadcast;
use crate::core::pipeline::latches::MemWbEntry;
use crate::core::pipeline::signals::MemWidth;

/// Extracts and extends a loaded value from the aligned memory word.
///
/// # Arguments
///
/// * `word` - The aligned 32-bit word read from data memory.
/// * `addr` - Byte address of the access; bit 1 picks the half, bit 0 the byte within it.
/// * `width` - Access width.
/// * `unsigned` - Zero-extend instead of sign-extend.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::signals::MemWidth;
/// use rvpipe_core::core::pipeline::stages::memory::align_load;
///
/// assert_eq!(align_load(0x1234_80FF, 1, MemWidth::Byte, false), 0xFFFF_FF80);
/// assert_eq!(align_load(0x1234_80FF, 2, MemWidth::Half, true), 0x0000_1234);
/// ```
pub fn align_load(word: u32, addr: u32, width: MemWidth, unsigned: bool) -> u32 {
    let half = (if addr & 2 != 0 { word >> 16 } else { word }) & 0xFFFF;
    match width {
        MemWidth::Word => word,
        MemWidth::Half if unsigned => half,
        MemWidth::Half => half as u16 as i16 as i32 as u32,
        MemWidth::Byte => {
            let byte = (if addr & 1 != 0 { half >> 8 } else { half }) & 0xFF;
            if unsigned {
                byte
            } else {
                byte as u8 as i8 as i32 as u32
            }
        }
    }
}

/// Positions store data in its byte lanes.
///
/// # Returns
///
/// `(data, byte_enable)`: `value` shifted to the lanes addressed by the low
/// bits of `addr`, and the 4-bit write mask for those lanes.
pub fn store_lanes(addr: u32, value: u32, width: MemWidth) -> (u32, u8) {
    match width {
        MemWidth::Word => (value, 0b1111),
        MemWidth::Half => {
            let lane = addr & 2;
            (value << (lane * 8), 0b0011 << lane)
        }
        MemWidth::Byte => {
            let lane = addr & 3;
            (value << (lane * 8), 0b0001 << lane)
        }
    }
}

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `next` - Broadcast being built for the next cycle
///
/// # Returns
///
/// The destination register handled this cycle, for the hazard unit.
pub fn mem_stage(cpu: &mut Cpu, next: &mut Broadcast) -> usize {
    let ex = std::mem::take(&mut cpu.ex_mem);

    let data = if ex.ctrl.is_load() {
        let loaded = align_load(
            cpu.system.dmem.dout(),
            ex.alu,
            ex.ctrl.mem_width,
            ex.ctrl.mem_unsigned,
        );
        tracing::trace!(
            "MEM: pc={:#010x} load [{:#010x}] {:?} -> {:#010x}",
            ex.pc,
            ex.alu,
            ex.ctrl.mem_width,
            loaded
        );
        loaded
    } else {
        ex.alu
    };

    next.mem_bypass = data;
    cpu.mem_wb = MemWbEntry {
        valid: ex.valid,
        pc: ex.pc,
        inst: ex.inst,
        rd: ex.rd,
        data,
        halt: ex.ctrl.halt,
    };

    ex.rd
}
