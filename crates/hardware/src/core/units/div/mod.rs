//! Multi-cycle Integer Dividers.
//!
//! Two interchangeable implementations share one functional-unit contract
//! ([`Divider`]): `start` occupies the unit, `tick` advances its state machine
//! one cycle and `poll` reports whether a result is ready. The shared pieces
//! live here:
//! 1. **Entry Classification:** divide-by-zero and divide-by-one fast paths,
//!    sign-magnitude conversion of the remaining cases.
//! 2. **Completion:** sign correction and the INT_MIN / -1 overflow policy.
//!
//! Faults never stop the pipeline. Divide-by-zero and signed overflow return
//! their ISA-defined values with `DivOutcome::error` set.

/// Radix-16 divider with quotient-digit selection.
pub mod radix16;

/// One-bit-per-cycle restoring divider.
pub mod restoring;

pub use self::radix16::Radix16Divider;
pub use self::restoring::RestoringDivider;

use crate::config::DividerKind;

/// Quotient returned for a zero divisor (all ones).
pub const DIV_BY_ZERO_QUOTIENT: u32 = u32::MAX;

/// Most negative 32-bit integer.
const INT_MIN: u32 = 0x8000_0000;

/// Divider state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DivState {
    /// No operation in flight.
    #[default]
    Idle,
    /// Operands captured; next tick prepares the iteration.
    Pre,
    /// Producing quotient bits.
    Working,
    /// Next tick applies sign correction and publishes the result.
    End,
    /// Divisor was one; next tick publishes the result.
    DivOne,
    /// Divisor was zero; next tick publishes the result with the error flag.
    Error,
}

/// Result channel of a divider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DivOutcome {
    /// A result is waiting to be consumed.
    pub ready: bool,
    /// Quotient or remainder, as requested.
    pub result: u32,
    /// Divide-by-zero or signed overflow occurred.
    pub error: bool,
}

/// Functional-unit contract shared by every divider.
pub trait Divider {
    /// Occupies the unit with a new operation.
    ///
    /// # Arguments
    ///
    /// * `dividend` - rs1
    /// * `divisor` - rs2
    /// * `is_signed` - DIV/REM rather than DIVU/REMU
    /// * `want_remainder` - REM/REMU rather than DIV/DIVU
    ///
    /// # Returns
    ///
    /// `false` (and nothing changes) while the unit is busy.
    fn start(&mut self, dividend: u32, divisor: u32, is_signed: bool, want_remainder: bool)
    -> bool;

    /// Advances the state machine by one cycle.
    fn tick(&mut self);

    /// Reports the result channel.
    fn poll(&self) -> DivOutcome;

    /// Marks the result consumed.
    fn clear_result(&mut self);

    /// Whether an operation is in flight or a result is unconsumed.
    fn is_busy(&self) -> bool;

    /// Current state machine state.
    fn state(&self) -> DivState;
}

/// Operation captured by `start`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DivRequest {
    /// Original dividend.
    pub dividend: u32,
    /// Original divisor.
    pub divisor: u32,
    /// Two's complement interpretation.
    pub is_signed: bool,
    /// Return the remainder instead of the quotient.
    pub want_remainder: bool,
}

impl DivRequest {
    /// Dividend is negative (signed operations only).
    fn dividend_negative(&self) -> bool {
        self.is_signed && (self.dividend as i32) < 0
    }

    /// Divisor is negative (signed operations only).
    fn divisor_negative(&self) -> bool {
        self.is_signed && (self.divisor as i32) < 0
    }

    /// State entered directly from `start`.
    pub fn entry_state(&self) -> DivState {
        match self.divisor {
            0 => DivState::Error,
            1 => DivState::DivOne,
            _ => DivState::Pre,
        }
    }

    /// Magnitudes of (dividend, divisor) used by the iteration.
    pub fn magnitudes(&self) -> (u32, u32) {
        let abs = |v: u32, neg: bool| if neg { v.wrapping_neg() } else { v };
        (
            abs(self.dividend, self.dividend_negative()),
            abs(self.divisor, self.divisor_negative()),
        )
    }

    /// Result of the single-cycle fast paths.
    ///
    /// Divisor zero yields all ones (or the dividend as remainder) with the
    /// error flag; divisor one yields the dividend (or zero as remainder).
    pub fn fast_path(&self) -> DivOutcome {
        if self.divisor == 0 {
            DivOutcome {
                ready: true,
                result: if self.want_remainder {
                    self.dividend
                } else {
                    DIV_BY_ZERO_QUOTIENT
                },
                error: true,
            }
        } else {
            DivOutcome {
                ready: true,
                result: if self.want_remainder { 0 } else { self.dividend },
                error: false,
            }
        }
    }

    /// Applies sign correction to an unsigned quotient and remainder.
    ///
    /// The quotient is negated when exactly one operand was negative and the
    /// remainder takes the sign of the dividend. Signed INT_MIN / -1 is
    /// forced to quotient INT_MIN, remainder 0, with the error flag.
    pub fn finish(&self, quotient: u32, remainder: u32) -> DivOutcome {
        if self.is_signed && self.dividend == INT_MIN && self.divisor == u32::MAX {
            return DivOutcome {
                ready: true,
                result: if self.want_remainder { 0 } else { INT_MIN },
                error: true,
            };
        }

        let q_neg = self.dividend_negative() != self.divisor_negative();
        let q = if q_neg { quotient.wrapping_neg() } else { quotient };
        let r = if self.dividend_negative() {
            remainder.wrapping_neg()
        } else {
            remainder
        };
        DivOutcome {
            ready: true,
            result: if self.want_remainder { r } else { q },
            error: false,
        }
    }
}

/// Enum wrapper for static dispatch of the configured divider.
#[derive(Clone, Debug)]
pub enum DividerUnit {
    /// Restoring divider.
    Restoring(RestoringDivider),
    /// Radix-16 divider.
    Radix16(Radix16Divider),
}

impl DividerUnit {
    /// Creates the divider selected by configuration.
    pub fn new(kind: DividerKind) -> Self {
        match kind {
            DividerKind::Restoring => Self::Restoring(RestoringDivider::new()),
            DividerKind::Radix16 => Self::Radix16(Radix16Divider::new()),
        }
    }
}

impl Divider for DividerUnit {
    fn start(
        &mut self,
        dividend: u32,
        divisor: u32,
        is_signed: bool,
        want_remainder: bool,
    ) -> bool {
        match self {
            Self::Restoring(d) => d.start(dividend, divisor, is_signed, want_remainder),
            Self::Radix16(d) => d.start(dividend, divisor, is_signed, want_remainder),
        }
    }

    fn tick(&mut self) {
        match self {
            Self::Restoring(d) => d.tick(),
            Self::Radix16(d) => d.tick(),
        }
    }

    fn poll(&self) -> DivOutcome {
        match self {
            Self::Restoring(d) => d.poll(),
            Self::Radix16(d) => d.poll(),
        }
    }

    fn clear_result(&mut self) {
        match self {
            Self::Restoring(d) => d.clear_result(),
            Self::Radix16(d) => d.clear_result(),
        }
    }

    fn is_busy(&self) -> bool {
        match self {
            Self::Restoring(d) => d.is_busy(),
            Self::Radix16(d) => d.is_busy(),
        }
    }

    fn state(&self) -> DivState {
        match self {
            Self::Restoring(d) => d.state(),
            Self::Radix16(d) => d.state(),
        }
    }
}
