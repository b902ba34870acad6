//! Pipelined Integer Multiplier.
//!
//! A 32x32 → 64-bit multiplier split across three pipeline stages, one
//! operation in flight:
//! 1. **M1:** Sign- or zero-extends both operands to 64 bits and forms four
//!    partial products, one per 16-bit chunk of the extended multiplier.
//! 2. **M2:** Reduces the four partial products to two.
//! 3. **M3:** Adds the last two rows and selects the high or low word.
//!
//! The result is ready exactly three `tick`s after `start` and stays in the
//! output register until the consumer calls `clear_result`.

use crate::core::pipeline::signals::MulOp;

/// Width of one multiplier chunk in M1.
const CHUNK_BITS: u32 = 16;

/// Number of partial products formed in M1.
const PARTIAL_PRODUCTS: usize = 4;

/// Operands latched by `start`.
#[derive(Clone, Copy, Debug, Default)]
struct M1 {
    op1: u32,
    op2: u32,
    op1_signed: bool,
    op2_signed: bool,
    high: bool,
}

/// Partial products waiting for reduction.
#[derive(Clone, Copy, Debug, Default)]
struct M2 {
    partials: [u64; PARTIAL_PRODUCTS],
    high: bool,
}

/// Two rows waiting for the carry-propagate add.
#[derive(Clone, Copy, Debug, Default)]
struct M3 {
    rows: [u64; 2],
    high: bool,
}

/// Three-stage pipelined multiplier.
#[derive(Clone, Debug, Default)]
pub struct Multiplier {
    m1: Option<M1>,
    m2: Option<M2>,
    m3: Option<M3>,
    result: Option<u32>,
}

/// Sign- or zero-extends a word to 64 bits.
fn extend(op: u32, signed: bool) -> u64 {
    if signed {
        op as i32 as i64 as u64
    } else {
        u64::from(op)
    }
}

impl Multiplier {
    /// Latency in cycles from `start` to a ready result.
    pub const LATENCY: u32 = 3;

    /// Creates an idle multiplier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a new operation into M1.
    ///
    /// # Arguments
    ///
    /// * `op1` - Multiplicand (rs1).
    /// * `op2` - Multiplier (rs2).
    /// * `op` - Which signedness and result half to produce.
    ///
    /// # Returns
    ///
    /// `false` (and nothing changes) when an operation is already in flight
    /// or its result has not been consumed.
    pub fn start(&mut self, op1: u32, op2: u32, op: MulOp) -> bool {
        if self.is_busy() {
            return false;
        }
        let (op1_signed, op2_signed) = op.signedness();
        self.m1 = Some(M1 {
            op1,
            op2,
            op1_signed,
            op2_signed,
            high: op.high_half(),
        });
        tracing::debug!(
            "MUL: start {:?} op1={:#010x} op2={:#010x}",
            op,
            op1,
            op2
        );
        true
    }

    /// Advances every stage by one cycle, oldest first.
    pub fn tick(&mut self) {
        if let Some(m3) = self.m3.take() {
            let product = m3.rows[0].wrapping_add(m3.rows[1]);
            let word = if m3.high {
                (product >> 32) as u32
            } else {
                product as u32
            };
            tracing::trace!("MUL: M3 product={:#018x} -> {:#010x}", product, word);
            self.result = Some(word);
        }

        if let Some(m2) = self.m2.take() {
            let [p0, p1, p2, p3] = m2.partials;
            self.m3 = Some(M3 {
                rows: [p0.wrapping_add(p1), p2.wrapping_add(p3)],
                high: m2.high,
            });
            tracing::trace!("MUL: M2 reduced to two rows");
        }

        if let Some(m1) = self.m1.take() {
            let a = extend(m1.op1, m1.op1_signed);
            let b = extend(m1.op2, m1.op2_signed);
            let mut partials = [0u64; PARTIAL_PRODUCTS];
            for (k, p) in partials.iter_mut().enumerate() {
                let shift = CHUNK_BITS * k as u32;
                let chunk = (b >> shift) & 0xFFFF;
                *p = a.wrapping_mul(chunk).wrapping_shl(shift);
            }
            self.m2 = Some(M2 {
                partials,
                high: m1.high,
            });
            tracing::trace!("MUL: M1 partial products formed");
        }
    }

    /// The finished result, if one is waiting.
    pub fn result(&self) -> Option<u32> {
        self.result
    }

    /// Marks the result consumed so it cannot be read twice.
    pub fn clear_result(&mut self) {
        self.result = None;
    }

    /// Whether any stage holds an operation or a result is unconsumed.
    pub fn is_busy(&self) -> bool {
        self.m1.is_some() || self.m2.is_some() || self.m3.is_some() || self.result.is_some()
    }
}
