//! Pipeline control signals and operation types.
//!
//! This module defines the signals that steer an instruction through EX, MEM
//! and WB. It provides:
//! 1. **Operation Classification:** ALU functions and the multi-cycle unit operations.
//! 2. **Operand Selection:** Sources for the two ALU inputs (registers, PC, immediate, constant 4).
//! 3. **Control Flow:** Branch and jump kinds resolved in EX.
//! 4. **Memory Control:** Access direction, width and sign-extension.
//! 5. **Forwarding:** The four-way operand source chosen by the hazard unit.

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition.
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,

    /// Passes the second operand through. Used by LUI and by bubbles.
    #[default]
    Nop,
}

/// Source selection for the first ALU operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Op1Sel {
    /// Use the forwarded value of rs1.
    #[default]
    Rs1,
    /// Use the instruction's PC (AUIPC, JAL, JALR link value).
    Pc,
    /// Use the constant zero.
    Zero,
}

/// Source selection for the second ALU operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Op2Sel {
    /// Use the forwarded value of rs2.
    #[default]
    Rs2,
    /// Use the decoded immediate.
    Imm,
    /// Use the constant 4 (link address for jumps).
    Const4,
}

/// Control-flow kind resolved in the execute stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchKind {
    /// Not a control-flow instruction.
    #[default]
    None,
    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Branch if less than (signed).
    Blt,
    /// Branch if greater or equal (signed).
    Bge,
    /// Branch if less than (unsigned).
    Bltu,
    /// Branch if greater or equal (unsigned).
    Bgeu,
    /// Unconditional PC-relative jump.
    Jal,
    /// Unconditional register-indirect jump.
    Jalr,
}

impl BranchKind {
    /// Returns true for the six conditional branches.
    pub const fn is_conditional(self) -> bool {
        matches!(
            self,
            Self::Beq | Self::Bne | Self::Blt | Self::Bge | Self::Bltu | Self::Bgeu
        )
    }

    /// Returns true for JAL and JALR.
    pub const fn is_jump(self) -> bool {
        matches!(self, Self::Jal | Self::Jalr)
    }

    /// ALU function whose result decides the branch condition.
    ///
    /// Equality branches compare through subtraction, ordered branches through
    /// set-less-than. Jumps reuse the ALU for the link address instead.
    pub const fn compare_op(self) -> AluOp {
        match self {
            Self::Beq | Self::Bne => AluOp::Sub,
            Self::Blt | Self::Bge => AluOp::Slt,
            Self::Bltu | Self::Bgeu => AluOp::Sltu,
            Self::None | Self::Jal | Self::Jalr => AluOp::Add,
        }
    }
}

/// Memory operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemOp {
    /// No memory access.
    #[default]
    None,
    /// Read from data memory.
    Load,
    /// Write to data memory.
    Store,
}

/// Memory access width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// 8-bit access.
    Byte,
    /// 16-bit access.
    Half,
    /// 32-bit access.
    #[default]
    Word,
}

/// Multiply operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulOp {
    /// Low 32 bits of signed x signed.
    Mul,
    /// High 32 bits of signed x signed.
    Mulh,
    /// High 32 bits of signed x unsigned.
    Mulhsu,
    /// High 32 bits of unsigned x unsigned.
    Mulhu,
}

impl MulOp {
    /// Signedness of the (first, second) operand.
    pub const fn signedness(self) -> (bool, bool) {
        match self {
            Self::Mul | Self::Mulh => (true, true),
            Self::Mulhsu => (true, false),
            Self::Mulhu => (false, false),
        }
    }

    /// Whether the consumer takes the upper half of the product.
    pub const fn high_half(self) -> bool {
        !matches!(self, Self::Mul)
    }
}

/// Divide operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DivOp {
    /// Signed quotient.
    Div,
    /// Unsigned quotient.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
}

impl DivOp {
    /// Whether the operands are interpreted as two's complement.
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Div | Self::Rem)
    }

    /// Whether the remainder (rather than the quotient) is the result.
    pub const fn wants_remainder(self) -> bool {
        matches!(self, Self::Rem | Self::Remu)
    }
}

/// Multi-cycle functional unit an instruction is dispatched to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnitOp {
    /// Computed by the single-cycle ALU.
    #[default]
    None,
    /// Dispatched to the pipelined multiplier.
    Mul(MulOp),
    /// Dispatched to the configured divider.
    Div(DivOp),
}

/// Operand source chosen by the data hazard unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FwdSel {
    /// Value read from the register file in decode.
    #[default]
    RegFile,
    /// Result produced by EX in the previous cycle.
    Ex,
    /// Result handled by MEM in the previous cycle.
    Mem,
    /// Result committed by WB in the previous cycle.
    Wb,
}

impl FwdSel {
    /// One-hot encoding `{wb, mem, ex, regfile}` from high bit to low bit.
    pub const fn one_hot(self) -> u8 {
        match self {
            Self::RegFile => 0b0001,
            Self::Ex => 0b0010,
            Self::Mem => 0b0100,
            Self::Wb => 0b1000,
        }
    }
}

/// Control signals generated by the decode stage.
///
/// The all-default value is the inert control point: it writes nothing,
/// accesses no memory and never redirects. Bubbles and unknown encodings both
/// carry it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// ALU function.
    pub alu_op: AluOp,
    /// First ALU operand source.
    pub op1_sel: Op1Sel,
    /// Second ALU operand source.
    pub op2_sel: Op2Sel,
    /// Branch or jump kind.
    pub branch: BranchKind,
    /// Memory direction.
    pub mem_op: MemOp,
    /// Memory access width.
    pub mem_width: MemWidth,
    /// Zero-extend (rather than sign-extend) loaded bytes and halves.
    pub mem_unsigned: bool,
    /// Multi-cycle unit dispatch.
    pub unit: UnitOp,
    /// Stops the simulation when the instruction is committed.
    pub halt: bool,
}

impl ControlSignals {
    /// Whether the instruction reads data memory.
    pub fn is_load(&self) -> bool {
        self.mem_op == MemOp::Load
    }

    /// Whether the instruction writes data memory.
    pub fn is_store(&self) -> bool {
        self.mem_op == MemOp::Store
    }
}
