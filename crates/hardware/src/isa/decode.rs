//! RISC-V Instruction Decoder.
//!
//! This module turns a 32-bit RV32IM encoding into a structured `Decoded`
//! record. It performs:
//! 1. **Classification:** One match on (opcode, funct3, bit30, bit25) yields an `InstrClass`.
//! 2. **Control Generation:** Each class maps to a fixed set of `ControlSignals`.
//! 3. **Operand Usage:** Per-operand "used" flags keep the hazard unit from
//!    reacting to register fields an instruction never reads.
//!
//! Decoding never fails. Encodings outside RV32IM decode to the inert control
//! point and behave as NOP.

use crate::core::pipeline::signals::{
    AluOp, BranchKind, ControlSignals, DivOp, MemOp, MemWidth, MulOp, Op1Sel, Op2Sel, UnitOp,
};
use crate::isa::instruction::{ImmType, InstructionBits};
use crate::isa::rv32i::{funct3, opcodes};
use crate::isa::rv32m::funct3 as m_funct3;

/// Instruction class, resolved once per fetched word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstrClass {
    /// Load upper immediate.
    Lui,
    /// Add upper immediate to PC.
    Auipc,
    /// Jump and link.
    Jal,
    /// Jump and link register.
    Jalr,
    /// Conditional branch.
    Branch(BranchKind),
    /// Load of the given width.
    Load {
        /// Access width.
        width: MemWidth,
        /// Zero-extend instead of sign-extend.
        unsigned: bool,
    },
    /// Store of the given width.
    Store(MemWidth),
    /// Register-immediate ALU operation.
    OpImm(AluOp),
    /// Register-register ALU operation.
    Op(AluOp),
    /// Multiply or divide dispatched to a multi-cycle unit.
    MulDiv(UnitOp),
    /// One of the three halt encodings.
    Halt,
    /// Unknown encoding or explicit NOP.
    #[default]
    Nop,
}

impl InstrClass {
    /// Immediate format carried by this class.
    pub const fn imm_type(self) -> ImmType {
        match self {
            Self::Lui | Self::Auipc => ImmType::U,
            Self::Jal => ImmType::J,
            Self::Jalr | Self::Load { .. } | Self::OpImm(_) => ImmType::I,
            Self::Branch(_) => ImmType::B,
            Self::Store(_) => ImmType::S,
            Self::Op(_) | Self::MulDiv(_) | Self::Halt | Self::Nop => ImmType::R,
        }
    }

    /// Whether the class writes a destination register.
    pub const fn writes_rd(self) -> bool {
        matches!(
            self,
            Self::Lui
                | Self::Auipc
                | Self::Jal
                | Self::Jalr
                | Self::Load { .. }
                | Self::OpImm(_)
                | Self::Op(_)
                | Self::MulDiv(_)
        )
    }

    /// Whether the class reads (rs1, rs2).
    pub const fn reads(self) -> (bool, bool) {
        match self {
            Self::Jalr | Self::Load { .. } | Self::OpImm(_) => (true, false),
            Self::Branch(_) | Self::Store(_) | Self::Op(_) | Self::MulDiv(_) => (true, true),
            Self::Lui | Self::Auipc | Self::Jal | Self::Halt | Self::Nop => (false, false),
        }
    }

    /// Control signals for this class.
    pub fn control(self) -> ControlSignals {
        let base = ControlSignals::default();
        match self {
            Self::Lui => ControlSignals {
                alu_op: AluOp::Add,
                op1_sel: Op1Sel::Zero,
                op2_sel: Op2Sel::Imm,
                ..base
            },
            Self::Auipc => ControlSignals {
                alu_op: AluOp::Add,
                op1_sel: Op1Sel::Pc,
                op2_sel: Op2Sel::Imm,
                ..base
            },
            Self::Jal | Self::Jalr => ControlSignals {
                alu_op: AluOp::Add,
                op1_sel: Op1Sel::Pc,
                op2_sel: Op2Sel::Const4,
                branch: if matches!(self, Self::Jal) {
                    BranchKind::Jal
                } else {
                    BranchKind::Jalr
                },
                ..base
            },
            Self::Branch(kind) => ControlSignals {
                alu_op: kind.compare_op(),
                branch: kind,
                ..base
            },
            Self::Load { width, unsigned } => ControlSignals {
                alu_op: AluOp::Add,
                op2_sel: Op2Sel::Imm,
                mem_op: MemOp::Load,
                mem_width: width,
                mem_unsigned: unsigned,
                ..base
            },
            Self::Store(width) => ControlSignals {
                alu_op: AluOp::Add,
                op2_sel: Op2Sel::Imm,
                mem_op: MemOp::Store,
                mem_width: width,
                ..base
            },
            Self::OpImm(op) => ControlSignals {
                alu_op: op,
                op2_sel: Op2Sel::Imm,
                ..base
            },
            Self::Op(op) => ControlSignals { alu_op: op, ..base },
            Self::MulDiv(unit) => ControlSignals { unit, ..base },
            Self::Halt => ControlSignals { halt: true, ..base },
            Self::Nop => base,
        }
    }
}

/// Decoded instruction fields and control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Resolved instruction class.
    pub class: InstrClass,
    /// Destination register; zero when the instruction writes nothing.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Selected immediate, sign-extended.
    pub imm: u32,
    /// Control signals for the later stages.
    pub ctrl: ControlSignals,
    /// Whether rs1 is actually read.
    pub rs1_used: bool,
    /// Whether rs2 is actually read.
    pub rs2_used: bool,
}

/// Classifies an instruction word.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding.
///
/// # Returns
///
/// The `InstrClass` of the encoding, `InstrClass::Nop` when nothing matches.
pub fn classify(inst: u32) -> InstrClass {
    if matches!(inst, opcodes::ECALL | opcodes::EBREAK | opcodes::HALT_STORE) {
        return InstrClass::Halt;
    }

    match inst.opcode() {
        opcodes::OP_LUI => InstrClass::Lui,
        opcodes::OP_AUIPC => InstrClass::Auipc,
        opcodes::OP_JAL => InstrClass::Jal,
        opcodes::OP_JALR => InstrClass::Jalr,
        opcodes::OP_BRANCH => {
            branch_kind(inst.funct3()).map_or(InstrClass::Nop, InstrClass::Branch)
        }
        opcodes::OP_LOAD => match inst.funct3() {
            funct3::LB => load(MemWidth::Byte, false),
            funct3::LH => load(MemWidth::Half, false),
            funct3::LW => load(MemWidth::Word, false),
            funct3::LBU => load(MemWidth::Byte, true),
            funct3::LHU => load(MemWidth::Half, true),
            _ => InstrClass::Nop,
        },
        opcodes::OP_STORE => match inst.funct3() {
            funct3::SB => InstrClass::Store(MemWidth::Byte),
            funct3::SH => InstrClass::Store(MemWidth::Half),
            funct3::SW => InstrClass::Store(MemWidth::Word),
            _ => InstrClass::Nop,
        },
        opcodes::OP_IMM => {
            // Only the right shifts use bit 30; for every other funct3 it is immediate payload.
            let op = match inst.funct3() {
                funct3::SRL_SRA if inst.bit30() => AluOp::Sra,
                f3 => alu_op(f3, false),
            };
            InstrClass::OpImm(op)
        }
        opcodes::OP_REG if inst.bit25() => InstrClass::MulDiv(muldiv_op(inst.funct3())),
        opcodes::OP_REG => InstrClass::Op(alu_op(inst.funct3(), inst.bit30())),
        _ => InstrClass::Nop,
    }
}

/// Decodes a RISC-V instruction into its component fields and control.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding to decode.
///
/// # Returns
///
/// A `Decoded` structure. The destination register is forced to zero for
/// instructions that perform no writeback.
pub fn decode(inst: u32) -> Decoded {
    let class = classify(inst);
    let (rs1_used, rs2_used) = class.reads();

    Decoded {
        raw: inst,
        class,
        rd: if class.writes_rd() { inst.rd() } else { 0 },
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        imm: inst.imm(class.imm_type()),
        ctrl: class.control(),
        rs1_used,
        rs2_used,
    }
}

const fn load(width: MemWidth, unsigned: bool) -> InstrClass {
    InstrClass::Load { width, unsigned }
}

const fn branch_kind(f3: u32) -> Option<BranchKind> {
    match f3 {
        funct3::BEQ => Some(BranchKind::Beq),
        funct3::BNE => Some(BranchKind::Bne),
        funct3::BLT => Some(BranchKind::Blt),
        funct3::BGE => Some(BranchKind::Bge),
        funct3::BLTU => Some(BranchKind::Bltu),
        funct3::BGEU => Some(BranchKind::Bgeu),
        _ => None,
    }
}

/// Maps funct3 (and bit 30 for ADD/SUB and SRL/SRA) to an ALU function.
const fn alu_op(f3: u32, alt: bool) -> AluOp {
    match f3 {
        funct3::ADD_SUB if alt => AluOp::Sub,
        funct3::ADD_SUB => AluOp::Add,
        funct3::SLL => AluOp::Sll,
        funct3::SLT => AluOp::Slt,
        funct3::SLTU => AluOp::Sltu,
        funct3::XOR => AluOp::Xor,
        funct3::SRL_SRA if alt => AluOp::Sra,
        funct3::SRL_SRA => AluOp::Srl,
        funct3::OR => AluOp::Or,
        _ => AluOp::And,
    }
}

const fn muldiv_op(f3: u32) -> UnitOp {
    match f3 {
        m_funct3::MUL => UnitOp::Mul(MulOp::Mul),
        m_funct3::MULH => UnitOp::Mul(MulOp::Mulh),
        m_funct3::MULHSU => UnitOp::Mul(MulOp::Mulhsu),
        m_funct3::MULHU => UnitOp::Mul(MulOp::Mulhu),
        m_funct3::DIV => UnitOp::Div(DivOp::Div),
        m_funct3::DIVU => UnitOp::Div(DivOp::Divu),
        m_funct3::REM => UnitOp::Div(DivOp::Rem),
        _ => UnitOp::Div(DivOp::Remu),
    }
}
