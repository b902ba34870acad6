//! Static Branch Predictor.
//!
//! Implements a simple "Always Not Taken" prediction policy. Fetch always
//! falls through to PC+4, so every taken branch and every jump costs a flush.

use super::DirectionPredictor;

/// Static Branch Predictor structure.
#[derive(Clone, Debug, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub fn new() -> Self {
        Self
    }
}

impl DirectionPredictor for StaticPredictor {
    /// Always predicts not taken.
    fn predict(&self, _pc: u32) -> bool {
        false
    }

    /// Keeps no state.
    fn update(&mut self, _pc: u32, _taken: bool) {}
}
