//! GShare Tournament Branch Predictor.
//!
//! Combines a bimodal table (2-bit counters indexed by PC) with a gshare table
//! (2-bit counters indexed by PC xor global history). A per-PC selector picks
//! the gshare component at values 2 and 3.
//!
//! Both component tables start weakly taken so loops predict well from the
//! first iteration; the selector starts weakly bimodal.

use super::DirectionPredictor;
use super::branch_predictor::pc_index;
use super::counter::SaturatingCounter;

/// Initial bimodal and gshare counter value.
const INITIAL_COUNTER: u8 = 2;

/// Initial selector value.
const INITIAL_SELECTOR: u8 = 1;

/// Bimodal/gshare tournament predictor.
#[derive(Clone, Debug)]
pub struct GShareTournamentPredictor {
    bimodal: Vec<SaturatingCounter>,
    gshare: Vec<SaturatingCounter>,
    selector: Vec<SaturatingCounter>,
    /// Mask for every table (all have `1 << index_bits` entries).
    index_mask: usize,
    ghr: usize,
    history_mask: usize,
}

impl GShareTournamentPredictor {
    /// Creates a predictor with `1 << index_bits` entries per table.
    ///
    /// History longer than the index is truncated to the index width when
    /// hashing; shorter history is zero-extended.
    pub fn new(index_bits: u32, history_bits: u32) -> Self {
        let size = 1usize << index_bits;
        Self {
            bimodal: vec![SaturatingCounter::new(INITIAL_COUNTER); size],
            gshare: vec![SaturatingCounter::new(INITIAL_COUNTER); size],
            selector: vec![SaturatingCounter::new(INITIAL_SELECTOR); size],
            index_mask: size - 1,
            ghr: 0,
            history_mask: (1usize << history_bits) - 1,
        }
    }

    /// Current global history.
    pub fn history(&self) -> usize {
        self.ghr
    }

    /// Selector value guarding `pc`.
    pub fn selector(&self, pc: u32) -> SaturatingCounter {
        self.selector[pc_index(pc, self.index_mask)]
    }

    fn indices(&self, pc: u32) -> (usize, usize) {
        let pc_idx = pc_index(pc, self.index_mask);
        (pc_idx, (pc_idx ^ self.ghr) & self.index_mask)
    }
}

impl DirectionPredictor for GShareTournamentPredictor {
    fn predict(&self, pc: u32) -> bool {
        let (pc_idx, gs_idx) = self.indices(pc);
        let bimodal = self.bimodal[pc_idx].is_set();
        let gshare = self.gshare[gs_idx].is_set();
        let use_gshare = self.selector[pc_idx].is_set();
        let taken = if use_gshare { gshare } else { bimodal };
        tracing::trace!(
            "TP: predict pc={:#x} bimodal={} gshare={} use_gshare={} -> {}",
            pc,
            bimodal,
            gshare,
            use_gshare,
            taken
        );
        taken
    }

    fn update(&mut self, pc: u32, taken: bool) {
        let (pc_idx, gs_idx) = self.indices(pc);
        let bimodal_correct = self.bimodal[pc_idx].is_set() == taken;
        let gshare_correct = self.gshare[gs_idx].is_set() == taken;

        self.bimodal[pc_idx].train(taken);
        self.gshare[gs_idx].train(taken);
        if gshare_correct != bimodal_correct {
            self.selector[pc_idx].train(gshare_correct);
        }

        self.ghr = ((self.ghr << 1) | usize::from(taken)) & self.history_mask;
        tracing::trace!("TP: update pc={:#x} taken={} ghr={:#x}", pc, taken, self.ghr);
    }
}
