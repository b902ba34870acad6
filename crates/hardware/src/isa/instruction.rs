//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions for the fixed RV32 instruction fields and
//! the five immediate encodings (I/S/B/U/J). All immediates are produced as
//! sign-extended 32-bit words, the width of the datapath.

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a register index field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Immediate encoding selected by the matched instruction format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImmType {
    /// No immediate (R-type). Selects zero.
    #[default]
    R,
    /// 12-bit signed immediate in bits 31:20.
    I,
    /// 12-bit signed immediate split across bits 31:25 and 11:7.
    S,
    /// 13-bit signed branch offset, bit 0 implied zero.
    B,
    /// Upper 20 bits, low 12 bits zero.
    U,
    /// 21-bit signed jump offset, bit 0 implied zero.
    J,
}

/// Trait for extracting instruction fields from encoded instructions.
///
/// Provides methods to extract all standard RISC-V instruction fields
/// from a 32-bit instruction encoding.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// Bit 30: selects SUB/SRA/SRAI over ADD/SRL/SRLI.
    fn bit30(&self) -> bool;

    /// Bit 25: the low bit of funct7, set for the M extension.
    fn bit25(&self) -> bool;

    /// I-type immediate, sign-extended.
    fn imm_i(&self) -> u32;

    /// S-type immediate, sign-extended.
    fn imm_s(&self) -> u32;

    /// B-type immediate, sign-extended.
    fn imm_b(&self) -> u32;

    /// U-type immediate (upper 20 bits).
    fn imm_u(&self) -> u32;

    /// J-type immediate, sign-extended.
    fn imm_j(&self) -> u32;

    /// Selects one of the five immediates by format.
    ///
    /// All five are computed from the same word; the format tag of the matched
    /// control row picks which one travels down the pipeline.
    fn imm(&self, kind: ImmType) -> u32 {
        match kind {
            ImmType::R => 0,
            ImmType::I => self.imm_i(),
            ImmType::S => self.imm_s(),
            ImmType::B => self.imm_b(),
            ImmType::U => self.imm_u(),
            ImmType::J => self.imm_j(),
        }
    }
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn bit30(&self) -> bool {
        (self >> 30) & 1 == 1
    }

    #[inline(always)]
    fn bit25(&self) -> bool {
        (self >> 25) & 1 == 1
    }

    /// Arithmetic shift of the signed word moves bit 31 into the upper bits.
    #[inline(always)]
    fn imm_i(&self) -> u32 {
        ((*self as i32) >> 20) as u32
    }

    #[inline(always)]
    fn imm_s(&self) -> u32 {
        let high = ((*self as i32) >> 25) << 5;
        let low = ((self >> 7) & 0x1F) as i32;
        (high | low) as u32
    }

    /// Reassembles `imm[12|10:5]` (bits 31:25) and `imm[4:1|11]` (bits 11:7).
    #[inline(always)]
    fn imm_b(&self) -> u32 {
        let sign = ((*self as i32) >> 31) << 12;
        let bit_11 = ((self >> 7) & 0x1) << 11;
        let bits_10_5 = ((self >> 25) & 0x3F) << 5;
        let bits_4_1 = ((self >> 8) & 0xF) << 1;
        (sign as u32) | bit_11 | bits_10_5 | bits_4_1
    }

    #[inline(always)]
    fn imm_u(&self) -> u32 {
        self & 0xFFFF_F000
    }

    /// Reassembles `imm[20|10:1|11|19:12]` from bits 31:12.
    #[inline(always)]
    fn imm_j(&self) -> u32 {
        let sign = ((*self as i32) >> 31) << 20;
        let bits_19_12 = self & 0x000F_F000;
        let bit_11 = ((self >> 20) & 0x1) << 11;
        let bits_10_1 = ((self >> 21) & 0x3FF) << 1;
        (sign as u32) | bits_19_12 | bit_11 | bits_10_1
    }
}
