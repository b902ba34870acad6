//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains registers and the fetch program counter.
//! 2. **Pipeline Control:** Holds the four inter-stage latches and the registered
//!    redirect / bypass broadcast.
//! 3. **Functional Units:** Owns the branch unit, the multiplier and the configured divider.
//! 4. **System Integration:** Owns the instruction and data memories.

/// Instruction execution orchestration and pipeline coordination.
pub mod execution;

use crate::common::{RegisterDump, RegisterFile};
use crate::config::Config;
use crate::core::pipeline::broadcast::Broadcast;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::units::bru::BranchUnit;
use crate::core::units::div::DividerUnit;
use crate::core::units::mul::Multiplier;
use crate::isa::abi;
use crate::soc::System;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state and components.
///
/// The CPU moves instructions through the five-stage pipeline one cycle per
/// [`Cpu::tick`] and tracks performance statistics along the way.
#[derive(Debug)]
pub struct Cpu {
    /// Integer register file.
    pub regs: RegisterFile,
    /// Next fetch address.
    pub pc: u32,
    /// Address fetched in the previous cycle; refetched while decode stalls.
    pub last_pc: u32,
    /// Word decoded in the previous cycle; reused while decode stalls.
    pub last_inst: u32,

    /// Instruction and data memories.
    pub system: System,

    /// IF/ID Latch.
    pub if_id: IfIdEntry,
    /// ID/EX Latch.
    pub id_ex: IdExEntry,
    /// EX/MEM Latch.
    pub ex_mem: ExMemEntry,
    /// MEM/WB Latch.
    pub mem_wb: MemWbEntry,
    /// Redirect and bypass values registered at the end of the last cycle.
    pub bcast: Broadcast,

    /// BTB plus direction predictor.
    pub branch_unit: BranchUnit,
    /// Three-stage multiplier.
    pub multiplier: Multiplier,
    /// Configured divider.
    pub divider: DividerUnit,
    /// Packet parked in EX while the multiplier or divider works on it.
    pub held: Option<ExMemEntry>,

    /// A halt has left EX; younger instructions are squashed.
    pub halt_pending: bool,
    /// Register dump captured when a halt committed.
    pub halted: Option<RegisterDump>,

    /// Print the halt register dump to stderr.
    pub trace: bool,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a new CPU instance with the given system and configuration.
    ///
    /// # Arguments
    ///
    /// * `system` - Preloaded instruction and data memories.
    /// * `config` - Simulator configuration.
    ///
    /// # Returns
    ///
    /// A `Cpu` with an empty pipeline and the PC at address zero. When
    /// `memory.init_sp` is set, `sp` holds the address of the last data word.
    pub fn new(system: System, config: &Config) -> Self {
        let mut regs = RegisterFile::new();
        if config.memory.init_sp {
            regs.write(abi::REG_SP, config.memory.top_of_stack());
        }

        Self {
            regs,
            pc: 0,
            last_pc: 0,
            last_inst: 0,
            system,
            if_id: IfIdEntry::default(),
            id_ex: IdExEntry::default(),
            ex_mem: ExMemEntry::default(),
            mem_wb: MemWbEntry::default(),
            bcast: Broadcast::default(),
            branch_unit: BranchUnit::new(&config.pipeline),
            multiplier: Multiplier::new(),
            divider: DividerUnit::new(config.pipeline.divider),
            held: None,
            halt_pending: false,
            halted: None,
            trace: config.general.trace,
            stats: SimStats::default(),
        }
    }

    /// Whether a halt instruction has committed.
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Register dump captured at halt, if the program has halted.
    pub fn halt_dump(&self) -> Option<&RegisterDump> {
        self.halted.as_ref()
    }
}
