//! Two-bit Counter Predictor.
//!
//! A table of 2-bit saturating counters indexed by PC. Values 2 and 3 predict
//! taken. The counter type is shared by the tournament predictors.

use super::DirectionPredictor;
use super::branch_predictor::pc_index;

/// Largest value of a 2-bit counter.
const COUNTER_MAX: u8 = 3;

/// Counter value at and above which "taken" (or "prefer global") is chosen.
const COUNTER_THRESHOLD: u8 = 2;

/// A 2-bit saturating counter in `0..=3`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaturatingCounter(u8);

impl SaturatingCounter {
    /// Creates a counter, clamping `value` into range.
    pub const fn new(value: u8) -> Self {
        Self(if value > COUNTER_MAX { COUNTER_MAX } else { value })
    }

    /// Current value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether the counter is in one of its two upper states.
    pub const fn is_set(self) -> bool {
        self.0 >= COUNTER_THRESHOLD
    }

    /// Moves one step toward 3.
    pub fn increment(&mut self) {
        if self.0 < COUNTER_MAX {
            self.0 += 1;
        }
    }

    /// Moves one step toward 0.
    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    /// Increments on `up`, decrements otherwise.
    pub fn train(&mut self, up: bool) {
        if up {
            self.increment();
        } else {
            self.decrement();
        }
    }
}

/// Per-PC 2-bit counter predictor.
#[derive(Clone, Debug)]
pub struct CounterPredictor {
    table: Vec<SaturatingCounter>,
    mask: usize,
}

impl CounterPredictor {
    /// Initial counter value (weakly taken).
    pub const INITIAL: u8 = 2;

    /// Creates a predictor with `1 << index_bits` counters.
    pub fn new(index_bits: u32) -> Self {
        let size = 1usize << index_bits;
        Self {
            table: vec![SaturatingCounter::new(Self::INITIAL); size],
            mask: size - 1,
        }
    }

    /// Counter currently guarding `pc`.
    pub fn counter(&self, pc: u32) -> SaturatingCounter {
        self.table[pc_index(pc, self.mask)]
    }
}

impl DirectionPredictor for CounterPredictor {
    fn predict(&self, pc: u32) -> bool {
        self.counter(pc).is_set()
    }

    fn update(&mut self, pc: u32, taken: bool) {
        self.table[pc_index(pc, self.mask)].train(taken);
    }
}
