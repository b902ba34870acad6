//! Simulator: owns the CPU and enforces the run bounds.
//!
//! The run loop clocks the CPU until one of three things happens: a halt
//! commits, the cycle budget runs out, or no instruction retires for
//! `idle_threshold` consecutive cycles.

use std::path::Path;

use crate::common::RegisterDump;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::sim::loader;
use crate::soc::System;

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// A halt instruction committed.
    Halted {
        /// Cycles elapsed, the halting cycle included.
        cycles: u64,
        /// Register file at the halt.
        dump: RegisterDump,
    },
    /// `max_cycles` elapsed without a halt.
    CycleLimit {
        /// Cycles elapsed.
        cycles: u64,
    },
    /// Nothing retired for `idle_threshold` cycles.
    Idle {
        /// Cycles elapsed.
        cycles: u64,
    },
}

impl RunOutcome {
    /// The register dump when the run halted.
    pub fn dump(&self) -> Option<&RegisterDump> {
        match self {
            Self::Halted { dump, .. } => Some(dump),
            _ => None,
        }
    }
}

/// Top-level simulator: CPU plus run bounds.
#[derive(Debug)]
pub struct Simulator {
    /// CPU state (registers, pipeline, memories, stats).
    pub cpu: Cpu,
    max_cycles: u64,
    idle_threshold: u64,
    idle_cycles: u64,
}

impl Simulator {
    /// Creates a new simulator with the given system and configuration.
    pub fn new(system: System, config: &Config) -> Self {
        Self {
            cpu: Cpu::new(system, config),
            max_cycles: config.general.max_cycles,
            idle_threshold: config.general.idle_threshold,
            idle_cycles: 0,
        }
    }

    /// Validates the configuration and loads `<case>.exe` / `<case>.data`.
    pub fn from_case(config: &Config, case: &Path) -> Result<Self, SimError> {
        config.validate()?;
        let system = loader::load_case(config, case)?;
        Ok(Self::new(system, config))
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) {
        let retired = self.cpu.stats.instructions_retired;
        self.cpu.tick();
        if self.cpu.stats.instructions_retired == retired {
            self.idle_cycles += 1;
        } else {
            self.idle_cycles = 0;
        }
    }

    /// Runs until halt or a run bound.
    pub fn run(&mut self) -> RunOutcome {
        loop {
            if let Some(dump) = self.cpu.halt_dump() {
                let outcome = RunOutcome::Halted {
                    cycles: self.cpu.stats.cycles,
                    dump: *dump,
                };
                if self.cpu.trace {
                    self.print_dump();
                }
                return outcome;
            }

            let cycles = self.cpu.stats.cycles;
            if cycles >= self.max_cycles {
                tracing::warn!(
                    "SIM: cycle limit {} reached at pc={:#010x}",
                    self.max_cycles,
                    self.cpu.pc
                );
                return RunOutcome::CycleLimit { cycles };
            }
            if self.idle_cycles >= self.idle_threshold {
                tracing::warn!(
                    "SIM: no instruction retired for {} cycles at pc={:#010x}",
                    self.idle_cycles,
                    self.cpu.pc
                );
                return RunOutcome::Idle { cycles };
            }

            self.tick();
        }
    }

    /// Writes the halt register dump to stderr, one register per line.
    pub fn print_dump(&self) {
        if let Some(dump) = self.cpu.halt_dump() {
            eprint!("{}", dump);
        }
    }
}
