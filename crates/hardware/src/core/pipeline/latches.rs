//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between the five pipeline stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! Each boundary holds exactly one entry. Every stage writes its latch every
//! cycle; a bubble is the `Default` value, which has `valid == false`, the
//! inert control point and destination register zero.

use crate::core::pipeline::signals::{ControlSignals, FwdSel};

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Default, Debug)]
pub struct IfIdEntry {
    /// Whether the entry carries a fetched instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Next PC predicted at fetch time.
    pub predicted_next_pc: u32,
    /// 32-bit instruction word read from instruction memory.
    pub inst: u32,
    /// Fetch was held by a stall; decode must reuse the previous word.
    pub stalled: bool,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
///
/// Carries the decoded control packet, operand values read from the register
/// file and the forwarding selectors computed by the hazard unit.
#[derive(Clone, Default, Debug)]
pub struct IdExEntry {
    /// Whether the entry carries an instruction (false for bubbles).
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Next PC predicted at fetch time.
    pub predicted_next_pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Control signals for EX, MEM and WB.
    pub ctrl: ControlSignals,
    /// Destination register; zero when nothing is written back.
    pub rd: usize,
    /// Sign-extended immediate.
    pub imm: u32,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Register-file value of rs1.
    pub rv1: u32,
    /// Register-file value of rs2.
    pub rv2: u32,
    /// Forwarding source for rs1.
    pub rs1_sel: FwdSel,
    /// Forwarding source for rs2.
    pub rs2_sel: FwdSel,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Default, Debug)]
pub struct ExMemEntry {
    /// Whether the entry carries an instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register.
    pub rd: usize,
    /// ALU, multiplier or divider result; the byte address for loads and stores.
    pub alu: u32,
    /// Control signals for MEM and WB.
    pub ctrl: ControlSignals,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Default, Debug)]
pub struct MemWbEntry {
    /// Whether the entry carries an instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register.
    pub rd: usize,
    /// Value to commit.
    pub data: u32,
    /// Stop the simulation once committed.
    pub halt: bool,
}
