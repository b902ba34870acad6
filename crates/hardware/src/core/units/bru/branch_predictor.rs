//! Direction Predictor Interface.
//!
//! This module defines the `DirectionPredictor` trait that every direction
//! prediction strategy implements. Target prediction is not part of the
//! trait; it is the job of the shared [`super::btb::Btb`].

/// Trait for branch direction prediction algorithms.
pub trait DirectionPredictor {
    /// Predicts whether the control-flow instruction at `pc` is taken.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter being fetched
    ///
    /// # Returns
    ///
    /// `true` when the predictor expects the branch to be taken.
    fn predict(&self, pc: u32) -> bool;

    /// Trains the predictor with a resolved outcome.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the resolved branch or jump
    /// * `taken` - Whether control flow actually left the fall-through path
    fn update(&mut self, pc: u32, taken: bool);
}

/// Table index derived from a word-aligned PC.
#[inline(always)]
pub(crate) fn pc_index(pc: u32, mask: usize) -> usize {
    ((pc >> 2) as usize) & mask
}
