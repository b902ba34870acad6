//! Main Execution Loop.
//!
//! This module implements the core execution cycle of the CPU. One call to
//! [`Cpu::tick`] is one clock edge:
//! 1. **Reverse Stage Order:** WB, MEM, EX, ID, IF. Each stage consumes the latch
//!    written in the previous cycle before the stage behind it overwrites it.
//! 2. **Registered Feedback:** stages read the previous cycle's [`Broadcast`] and
//!    write a fresh one that becomes visible on the next tick.
//! 3. **Hazard Tags:** WB, MEM and EX report their destinations so decode can
//!    pick forwarding sources and decide whether to stall.

use super::Cpu;
use crate::core::pipeline::broadcast::{Broadcast, StageTags};
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};

impl Cpu {
    /// Advances the whole pipeline by one cycle.
    ///
    /// Does nothing once a halt has committed.
    pub fn tick(&mut self) {
        if self.is_halted() {
            return;
        }

        let prev: Broadcast = self.bcast;
        let mut next = prev.carry();

        let wb_rd = wb_stage(self, &mut next);
        if self.is_halted() {
            self.bcast = next;
            self.stats.cycles += 1;
            return;
        }

        let mem_rd = mem_stage(self, &mut next);
        let ex = execute_stage(self, &prev, &mut next);

        let tags = StageTags {
            ex_rd: ex.rd,
            ex_is_load: ex.is_load,
            ex_unit_busy: ex.unit_busy,
            mem_rd,
            wb_rd,
        };
        let stall = decode_stage(self, &prev, tags);
        fetch_stage(self, &prev, stall);

        if stall {
            tracing::trace!(
                "CPU: cycle {} fetch held at {:#010x}",
                self.stats.cycles,
                self.last_pc
            );
        }

        self.bcast = next;
        self.stats.cycles += 1;
    }
}
