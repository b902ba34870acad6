//! Branch prediction unit (BRU).
//!
//! This module combines a Branch Target Buffer with one of several direction
//! predictors. Fetch asks the unit for a next PC; the execute stage reports
//! the resolved outcome back. It provides:
//! 1. **Strategies:** static, 2-bit counter, tournament and gshare tournament,
//!    all behind the [`DirectionPredictor`] trait.
//! 2. **Dispatch:** [`BranchPredictorWrapper`], built from configuration.
//! 3. **Next-PC Prediction:** [`BranchUnit::predict`], which uses the BTB target
//!    only when the direction predictor also says "taken".

pub use self::branch_predictor::DirectionPredictor;

/// Direction predictor trait.
pub mod branch_predictor;

/// Branch Target Buffer for storing predicted branch targets.
pub mod btb;

/// Per-PC 2-bit saturating counter predictor.
pub mod counter;

/// Bimodal / gshare tournament predictor.
pub mod gshare_tournament;

/// Static branch predictor (always not-taken).
pub mod static_bp;

/// Local / global tournament predictor.
pub mod tournament;

use self::{
    btb::Btb, counter::CounterPredictor, gshare_tournament::GShareTournamentPredictor,
    static_bp::StaticPredictor, tournament::TournamentPredictor,
};
use crate::config::{BranchPredictor as BpType, PipelineConfig};

/// Enum wrapper for static dispatch of direction predictors.
#[derive(Clone, Debug)]
pub enum BranchPredictorWrapper {
    /// Always not-taken.
    Static(StaticPredictor),
    /// Per-PC 2-bit counters.
    Counter(CounterPredictor),
    /// Local / global / chooser.
    Tournament(TournamentPredictor),
    /// Bimodal / gshare / selector.
    GShareTournament(GShareTournamentPredictor),
}

impl BranchPredictorWrapper {
    /// Creates the direction predictor selected by the pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        let bits = config.predictor.index_bits;
        let history = config.predictor.history_bits;

        match config.branch_predictor {
            BpType::Static => Self::Static(StaticPredictor::new()),
            BpType::Counter => Self::Counter(CounterPredictor::new(bits)),
            BpType::Tournament => Self::Tournament(TournamentPredictor::new(bits, history)),
            BpType::GShareTournament => {
                Self::GShareTournament(GShareTournamentPredictor::new(bits, history))
            }
        }
    }
}

impl DirectionPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict(&self, pc: u32) -> bool {
        match self {
            Self::Static(bp) => bp.predict(pc),
            Self::Counter(bp) => bp.predict(pc),
            Self::Tournament(bp) => bp.predict(pc),
            Self::GShareTournament(bp) => bp.predict(pc),
        }
    }

    #[inline(always)]
    fn update(&mut self, pc: u32, taken: bool) {
        match self {
            Self::Static(bp) => bp.update(pc, taken),
            Self::Counter(bp) => bp.update(pc, taken),
            Self::Tournament(bp) => bp.update(pc, taken),
            Self::GShareTournament(bp) => bp.update(pc, taken),
        }
    }
}

/// Fetch-time prediction for one PC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// PC fetch moves to next.
    pub next_pc: u32,
    /// The BTB held an entry for this PC.
    pub btb_hit: bool,
    /// The direction predictor said "taken".
    pub taken: bool,
}

/// BTB plus direction predictor.
#[derive(Clone, Debug)]
pub struct BranchUnit {
    btb: Btb,
    predictor: BranchPredictorWrapper,
}

impl BranchUnit {
    /// Creates the unit from the pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            btb: Btb::new(config.btb_size),
            predictor: BranchPredictorWrapper::new(config),
        }
    }

    /// Predicts the PC that follows `pc`.
    ///
    /// The BTB target is used only on a hit that the direction predictor
    /// also calls taken; every other case falls through to `pc + 4`.
    pub fn predict(&self, pc: u32) -> Prediction {
        let target = self.btb.lookup(pc);
        let taken = self.predictor.predict(pc);
        let next_pc = match target {
            Some(t) if taken => t,
            _ => pc.wrapping_add(4),
        };
        Prediction {
            next_pc,
            btb_hit: target.is_some(),
            taken,
        }
    }

    /// Trains the unit with a resolved branch or jump.
    ///
    /// The direction predictor sees every outcome; the BTB is written only
    /// when control flow left the fall-through path.
    pub fn resolve(&mut self, pc: u32, taken: bool, target: u32) {
        self.predictor.update(pc, taken);
        if taken {
            self.btb.update(pc, target);
        }
    }

    /// The Branch Target Buffer.
    pub fn btb(&self) -> &Btb {
        &self.btb
    }

    /// The configured direction predictor.
    pub fn predictor(&self) -> &BranchPredictorWrapper {
        &self.predictor
    }
}
