//! Restoring Divider.
//!
//! Produces one quotient bit per cycle. The partial remainder is a signed
//! accumulator one bit wider than the operands; a trial subtraction that goes
//! negative is undone (restored) and yields a zero quotient bit.
//!
//! Timing for a normal division: one PRE cycle, 32 WORKING cycles and one END
//! cycle. Divisors of zero and one finish one cycle after `start`.

use super::{DivOutcome, DivRequest, DivState, Divider};

/// Quotient bits produced per operation.
const ITERATIONS: u32 = 32;

/// One-bit-per-cycle restoring divider.
#[derive(Clone, Debug, Default)]
pub struct RestoringDivider {
    state: DivState,
    req: DivRequest,
    /// Unconsumed dividend bits, MSB first.
    dividend: u32,
    divisor: u32,
    /// 33-bit signed partial remainder.
    remainder: i64,
    quotient: u32,
    remaining: u32,
    out: DivOutcome,
}

impl RestoringDivider {
    /// Creates an idle divider.
    pub fn new() -> Self {
        Self::default()
    }

    fn iterate(&mut self) {
        let next_bit = i64::from(self.dividend >> 31);
        self.dividend <<= 1;

        let shifted = (self.remainder << 1) | next_bit;
        let trial = shifted - i64::from(self.divisor);
        let bit = if trial < 0 {
            self.remainder = shifted;
            0
        } else {
            self.remainder = trial;
            1
        };
        self.quotient = (self.quotient << 1) | bit;
        self.remaining -= 1;

        tracing::trace!(
            "DIV: iter rem={:#x} quot={:#010x} left={}",
            self.remainder,
            self.quotient,
            self.remaining
        );
        if self.remaining == 0 {
            self.state = DivState::End;
        }
    }
}

impl Divider for RestoringDivider {
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
            "DIV: restoring start dividend={:#010x} divisor={:#010x} signed={} -> {:?}",
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
                self.dividend = dividend;
                self.divisor = divisor;
                self.remainder = 0;
                self.quotient = 0;
                self.remaining = ITERATIONS;
                self.state = DivState::Working;
            }
            DivState::Working => self.iterate(),
            DivState::End => {
                self.out = self.req.finish(self.quotient, self.remainder as u32);
                self.state = DivState::Idle;
                tracing::debug!("DIV: restoring done result={:#010x}", self.out.result);
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
