//! Radix-16 Divider.
//!
//! Produces four quotient bits per cycle. The PRE cycle precomputes the
//! multiples 1x..15x of the divisor; each WORKING cycle shifts the next four
//! dividend bits into the partial remainder and picks the largest digit `q`
//! with `q * d <= remainder`.
//!
//! Digit selection is a four-level comparison tree: bit 3 compares against 8d,
//! bit 2 against 4d or 12d, bit 1 against one of 2d/6d/10d/14d and bit 0
//! against the odd multiple that remains. All 15 comparisons are exact.
//!
//! Timing for a normal division: one PRE cycle, 8 WORKING cycles and one END
//! cycle. Divisors of zero and one finish one cycle after `start`.

use super::{DivOutcome, DivRequest, DivState, Divider};

/// Quotient digits produced per operation.
const ITERATIONS: u32 = 8;

/// Bits retired per iteration.
const DIGIT_BITS: u32 = 4;

/// Number of precomputed divisor multiples (1x..15x).
const MULTIPLES: usize = 15;

/// Radix-16 divider.
#[derive(Clone, Debug, Default)]
pub struct Radix16Divider {
    state: DivState,
    req: DivRequest,
    /// Unconsumed dividend bits, MSB first.
    dividend: u32,
    /// `multiples[k - 1] == k * divisor`.
    multiples: [u64; MULTIPLES],
    /// Partial remainder; always below the divisor between iterations.
    remainder: u64,
    quotient: u32,
    remaining: u32,
    out: DivOutcome,
}

impl Radix16Divider {
    /// Creates an idle divider.
    pub fn new() -> Self {
        Self::default()
    }

    /// `k * d` for digit `k` (zero for `k == 0`).
    fn multiple(&self, k: u32) -> u64 {
        match k {
            0 => 0,
            k => self.multiples[k as usize - 1],
        }
    }

    /// Selects the quotient digit for `shifted` through the comparison tree.
    fn select_digit(&self, shifted: u64) -> u32 {
        let mut q = 0;
        for bit in (0..DIGIT_BITS).rev() {
            let candidate = q | (1 << bit);
            if shifted >= self.multiple(candidate) {
                q = candidate;
            }
        }
        q
    }

    fn iterate(&mut self) {
        let next_bits = u64::from(self.dividend >> (32 - DIGIT_BITS));
        self.dividend <<= DIGIT_BITS;

        let shifted = (self.remainder << DIGIT_BITS) | next_bits;
        let q = self.select_digit(shifted);
        self.remainder = shifted - self.multiple(q);
        self.quotient = (self.quotient << DIGIT_BITS) | q;
        self.remaining -= 1;

        tracing::trace!(
            "DIV: iter shifted={:#x} q={} rem={:#x} quot={:#010x}",
            shifted,
            q,
            self.remainder,
            self.quotient
        );
        if self.remaining == 0 {
            self.state = DivState::End;
        }
    }
}

impl Divider for Radix16Divider {
    fn start(
        &mut self,
        dividend: u32,
        divisor: u32,
        is_signed: bool,
        want_remainder: bool,
    ) -> bool {
        if self.is_busy() {
            return false;
        }
        self.req = DivRequest {
            dividend,
            divisor,
            is_signed,
            want_remainder,
        };
        self.state = self.req.entry_state();
        tracing::debug!(
            "DIV: radix-16 start dividend={:#010x} divisor={:#010x} signed={} -> {:?}",
            dividend,
            divisor,
            is_signed,
            self.state
        );
        true
    }

    fn tick(&mut self) {
        match self.state {
            DivState::Idle => {}
            DivState::Error | DivState::DivOne => {
                self.out = self.req.fast_path();
                self.state = DivState::Idle;
            }
            DivState::Pre => {
                let (dividend, divisor) = self.req.magnitudes();
                let d = u64::from(divisor);
                for (k, m) in self.multiples.iter_mut().enumerate() {
                    *m = d * (k as u64 + 1);
                }
                self.dividend = dividend;
                self.remainder = 0;
                self.quotient = 0;
                self.remaining = ITERATIONS;
                self.state = DivState::Working;
                tracing::trace!(
                    "DIV: pre d1={:#x} d15={:#x}",
                    self.multiples[0],
                    self.multiples[MULTIPLES - 1]
                );
            }
            DivState::Working => self.iterate(),
            DivState::End => {
                self.out = self.req.finish(self.quotient, self.remainder as u32);
                self.state = DivState::Idle;
                tracing::debug!("DIV: radix-16 done result={:#010x}", self.out.result);
            }
        }
    }

    fn poll(&self) -> DivOutcome {
        self.out
    }

    fn clear_result(&mut self) {
        self.out = DivOutcome::default();
    }

    fn is_busy(&self) -> bool {
        self.state != DivState::Idle || self.out.ready
    }

    fn state(&self) -> DivState {
        self.state
    }
}
