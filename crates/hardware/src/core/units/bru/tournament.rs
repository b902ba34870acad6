//! Tournament Branch Predictor.
//!
//! A hybrid predictor that employs a chooser table to select between a Local
//! predictor (2-bit counters indexed by PC) and a Global predictor (2-bit
//! counters indexed by the global history register). The chooser is indexed
//! by PC and prefers the global component at values 2 and 3.

use super::DirectionPredictor;
use super::branch_predictor::pc_index;
use super::counter::SaturatingCounter;

/// Initial value of the local and global counters (weakly not taken).
const INITIAL_COUNTER: u8 = 1;

/// Initial chooser value (weakly prefer local).
const INITIAL_CHOOSER: u8 = 1;

/// Tournament Predictor structure.
#[derive(Clone, Debug)]
pub struct TournamentPredictor {
    /// Global History Register.
    ghr: usize,
    /// Mask applied to the global history.
    history_mask: usize,

    /// Local counters indexed by PC.
    local: Vec<SaturatingCounter>,
    /// Global counters indexed by history.
    global: Vec<SaturatingCounter>,
    /// Chooser counters indexed by PC.
    chooser: Vec<SaturatingCounter>,
    /// Mask for the PC-indexed tables.
    pc_mask: usize,
}

impl TournamentPredictor {
    /// Creates a new Tournament Predictor.
    ///
    /// # Arguments
    ///
    /// * `index_bits` - Log2 of the local and chooser table size.
    /// * `history_bits` - Global history length; the global table has `1 << history_bits` entries.
    pub fn new(index_bits: u32, history_bits: u32) -> Self {
        let pc_size = 1usize << index_bits;
        let global_size = 1usize << history_bits;
        Self {
            ghr: 0,
            history_mask: global_size - 1,
            local: vec![SaturatingCounter::new(INITIAL_COUNTER); pc_size],
            global: vec![SaturatingCounter::new(INITIAL_COUNTER); global_size],
            chooser: vec![SaturatingCounter::new(INITIAL_CHOOSER); pc_size],
            pc_mask: pc_size - 1,
        }
    }

    /// Current global history.
    pub fn history(&self) -> usize {
        self.ghr
    }

    /// Predictions of (local, global, chooser prefers global) for `pc`.
    fn components(&self, pc: u32) -> (bool, bool, bool) {
        let idx = pc_index(pc, self.pc_mask);
        (
            self.local[idx].is_set(),
            self.global[self.ghr].is_set(),
            self.chooser[idx].is_set(),
        )
    }
}

impl DirectionPredictor for TournamentPredictor {
    fn predict(&self, pc: u32) -> bool {
        let (local, global, use_global) = self.components(pc);
        if use_global { global } else { local }
    }

    /// Updates the chooser toward whichever component was uniquely correct,
    /// trains both components and shifts the outcome into the history.
    fn update(&mut self, pc: u32, taken: bool) {
        let (local, global, _) = self.components(pc);
        let idx = pc_index(pc, self.pc_mask);

        let local_correct = local == taken;
        let global_correct = global == taken;
        if local_correct != global_correct {
            self.chooser[idx].train(global_correct);
        }

        self.local[idx].train(taken);
        self.global[self.ghr].train(taken);
        self.ghr = ((self.ghr << 1) | usize::from(taken)) & self.history_mask;
    }
}
