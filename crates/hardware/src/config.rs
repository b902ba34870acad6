//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline constants (memory depth, BTB size, predictor tables, run bounds).
//! 2. **Structures:** Hierarchical config for general, memory, and pipeline settings.
//! 3. **Enums:** Direction predictor and divider implementation selection.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built with `Config::default()`.

use serde::Deserialize;

use crate::common::error::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Cycle budget before the run is stopped.
    pub const MAX_CYCLES: u64 = 600_000;

    /// Consecutive cycles without a retired instruction before the run is abandoned.
    pub const IDLE_THRESHOLD: u64 = 600_000;

    /// Log2 of the word depth of each SRAM (65 536 words, 256 KiB).
    pub const DEPTH_LOG: u32 = 16;

    /// Largest supported memory depth (log2, in words).
    pub const MAX_DEPTH_LOG: u32 = 28;

    /// Branch Target Buffer entries.
    pub const BTB_SIZE: usize = 64;

    /// Log2 of the direction predictor table size.
    pub const PREDICTOR_INDEX_BITS: u32 = 6;

    /// Global history register width in bits.
    pub const PREDICTOR_HISTORY_BITS: u32 = 6;

    /// Largest supported predictor table (log2).
    pub const MAX_PREDICTOR_BITS: u32 = 20;
}

/// Direction predictor strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Always predict not-taken; the BTB target is never used.
    Static,
    /// One 2-bit saturating counter per PC index.
    Counter,
    /// Local-by-PC, global-by-history and chooser-by-PC tables.
    Tournament,
    /// Bimodal-by-PC, gshare (PC xor history) and selector-by-PC tables.
    #[default]
    #[serde(alias = "GShare")]
    GShareTournament,
}

/// Divider implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum DividerKind {
    /// One quotient bit per cycle.
    Restoring,
    /// Four quotient bits per cycle via digit selection against 15 multiples.
    #[default]
    #[serde(alias = "SRT")]
    Radix16,
}

/// Root configuration structure for the simulator.
///
/// Every section and field is optional in JSON; missing values take defaults.
///
/// # Examples
///
/// ```
/// use rvpipe_core::config::{BranchPredictor, Config, DividerKind};
///
/// let json = r#"{
///     "memory": { "depth_log": 12 },
///     "pipeline": { "branch_predictor": "Counter", "divider": "Restoring" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.memory.depth_log, 12);
/// assert_eq!(config.pipeline.branch_predictor, BranchPredictor::Counter);
/// assert_eq!(config.pipeline.divider, DividerKind::Restoring);
/// assert_eq!(config.pipeline.btb_size, 64);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Instruction and data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Pipeline, branch predictor and functional unit configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Arguments
    ///
    /// * `json` - Configuration text.
    ///
    /// # Returns
    ///
    /// The validated configuration, or `SimError::ConfigParse` / `SimError::Config`.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges the hardware models depend on.
    pub fn validate(&self) -> Result<(), SimError> {
        let mem = &self.memory;
        if mem.depth_log == 0 || mem.depth_log > defaults::MAX_DEPTH_LOG {
            return Err(SimError::Config(format!(
                "memory.depth_log must be in 1..={}, got {}",
                defaults::MAX_DEPTH_LOG,
                mem.depth_log
            )));
        }

        let pipe = &self.pipeline;
        if !pipe.btb_size.is_power_of_two() {
            return Err(SimError::Config(format!(
                "pipeline.btb_size must be a power of two, got {}",
                pipe.btb_size
            )));
        }

        let pred = &pipe.predictor;
        if pred.index_bits == 0 || pred.index_bits > defaults::MAX_PREDICTOR_BITS {
            return Err(SimError::Config(format!(
                "pipeline.predictor.index_bits must be in 1..={}, got {}",
                defaults::MAX_PREDICTOR_BITS,
                pred.index_bits
            )));
        }
        if pred.history_bits > defaults::MAX_PREDICTOR_BITS {
            return Err(SimError::Config(format!(
                "pipeline.predictor.history_bits must be at most {}, got {}",
                defaults::MAX_PREDICTOR_BITS,
                pred.history_bits
            )));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Print the halt register dump to stderr in addition to the log
    #[serde(default)]
    pub trace: bool,

    /// Stop after this many cycles
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Stop after this many consecutive cycles without a retirement
    #[serde(default = "GeneralConfig::default_idle_threshold")]
    pub idle_threshold: u64,
}

impl GeneralConfig {
    /// Returns the default cycle budget.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    /// Returns the default idle threshold.
    fn default_idle_threshold() -> u64 {
        defaults::IDLE_THRESHOLD
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_cycles: defaults::MAX_CYCLES,
            idle_threshold: defaults::IDLE_THRESHOLD,
        }
    }
}

/// Instruction and data SRAM configuration.
///
/// Both memories share the same depth.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Log2 of the number of 32-bit words in each memory
    #[serde(default = "MemoryConfig::default_depth_log")]
    pub depth_log: u32,

    /// Seed the stack pointer with the top word address of data memory
    #[serde(default = "MemoryConfig::default_init_sp")]
    pub init_sp: bool,
}

impl MemoryConfig {
    /// Returns the default memory depth (log2).
    fn default_depth_log() -> u32 {
        defaults::DEPTH_LOG
    }

    /// Stack pointer seeding is on by default.
    fn default_init_sp() -> bool {
        true
    }

    /// Number of words in each memory.
    pub fn depth(&self) -> usize {
        1usize << self.depth_log
    }

    /// Byte address of the last word in data memory.
    pub fn top_of_stack(&self) -> u32 {
        ((self.depth() - 1) as u32).wrapping_mul(4)
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            depth_log: defaults::DEPTH_LOG,
            init_sp: true,
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Direction predictor type
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// Branch Target Buffer size
    #[serde(default = "PipelineConfig::default_btb_size")]
    pub btb_size: usize,

    /// Divider implementation
    #[serde(default)]
    pub divider: DividerKind,

    /// Direction predictor table sizes
    #[serde(default)]
    pub predictor: PredictorConfig,
}

impl PipelineConfig {
    /// Returns the default Branch Target Buffer size.
    fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }
}

impl Default for PipelineConfig {
    /// Creates a default pipeline configuration.
    ///
    /// Uses the gshare tournament predictor, a 64-entry BTB and the radix-16 divider.
    fn default() -> Self {
        Self {
            branch_predictor: BranchPredictor::default(),
            btb_size: defaults::BTB_SIZE,
            divider: DividerKind::default(),
            predictor: PredictorConfig::default(),
        }
    }
}

/// Direction predictor table configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Log2 of the number of entries in each PC-indexed table
    #[serde(default = "PredictorConfig::default_index_bits")]
    pub index_bits: u32,

    /// Global history register width
    #[serde(default = "PredictorConfig::default_history_bits")]
    pub history_bits: u32,
}

impl PredictorConfig {
    /// Returns the default predictor table size (log2).
    fn default_index_bits() -> u32 {
        defaults::PREDICTOR_INDEX_BITS
    }

    /// Returns the default global history length.
    fn default_history_bits() -> u32 {
        defaults::PREDICTOR_HISTORY_BITS
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            index_bits: defaults::PREDICTOR_INDEX_BITS,
            history_bits: defaults::PREDICTOR_HISTORY_BITS,
        }
    }
}
