use rvpipe_core::Simulator;
use rvpipe_core::config::Config;
use rvpipe_core::core::Cpu;
use rvpipe_core::sim::RunOutcome;
use rvpipe_core::soc::System;
use rvpipe_core::stats::SimStats;
use tracing_subscriber::EnvFilter;

/// Memory depth used by tests (1024 words per SRAM).
pub const TEST_DEPTH_LOG: u32 = 10;

/// Installs a test-friendly subscriber once; `RUST_LOG` selects verbosity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Configuration used by `TestContext::new`.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.memory.depth_log = TEST_DEPTH_LOG;
    config.general.max_cycles = 10_000;
    config.general.idle_threshold = 1_000;
    config
}

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&test_config())
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let system = System::new(config);
        Self {
            sim: Simulator::new(system, config),
        }
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    /// Mutable convenience accessor for the CPU.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.sim.cpu
    }

    /// Load instruction words at address 0.
    pub fn load_program(mut self, instructions: &[u32]) -> Self {
        self.sim
            .cpu
            .system
            .load_program(instructions)
            .expect("program fits in instruction memory");
        self
    }

    /// Load data words at address 0.
    pub fn load_data(mut self, words: &[u32]) -> Self {
        self.sim
            .cpu
            .system
            .load_data(words)
            .expect("data fits in data memory");
        self
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: u32) {
        self.sim.cpu.regs.write(reg, val);
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> u32 {
        self.sim.cpu.regs.read(reg)
    }

    pub fn stats(&self) -> &SimStats {
        &self.sim.cpu.stats
    }

    /// Run the CPU for at most `cycles` cycles, stopping early on halt.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            if self.sim.cpu.is_halted() {
                break;
            }
            self.sim.tick();
        }
    }

    /// Run until halt or a run bound.
    pub fn run_to_end(&mut self) -> RunOutcome {
        self.sim.run()
    }

    /// Run until halt, failing the test on any other outcome.
    pub fn run_to_halt(&mut self) -> u64 {
        match self.sim.run() {
            RunOutcome::Halted { cycles, .. } => cycles,
            other => panic!("program did not halt: {:?}", other),
        }
    }
}
