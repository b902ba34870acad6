//! Control Flow Tests.
//!
//! Branches and jumps resolve in EX. A wrong prediction squashes the two
//! younger instructions in ID and EX and refetches from the resolved target.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::config::BranchPredictor;

use crate::common::builder::instruction::{addi, ecall, nop};
use crate::common::harness::{TestContext, test_config};
use crate::common::InstructionBuilder;

fn with_predictor(bp: BranchPredictor) -> TestContext {
    let mut config = test_config();
    config.pipeline.branch_predictor = bp;
    TestContext::with_config(&config)
}

#[test]
fn mispredicted_branch_flushes_two() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 1),
        InstructionBuilder::new().beq(0, 0, 12).build(),
        addi(5, 0, 99),
        addi(6, 0, 99),
        addi(7, 0, 7),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(5), 0);
    assert_eq!(ctx.get_reg(6), 0);
    assert_eq!(ctx.get_reg(7), 7);
    assert_eq!(ctx.stats().flushed, 2);
    assert_eq!(ctx.stats().branches, 1);
    assert_eq!(ctx.stats().mispredictions, 1);
}

#[test]
fn not_taken_branch_falls_through() {
    let mut ctx = with_predictor(BranchPredictor::Static).load_program(&[
        addi(1, 0, 1),
        InstructionBuilder::new().beq(1, 0, 8).build(),
        addi(5, 0, 3),
        ecall(),
    ]);

    let cycles = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(5), 3);
    assert_eq!(ctx.stats().mispredictions, 0);
    assert_eq!(cycles, 8);
}

#[test]
fn flushed_halt_does_not_stop_the_pipeline() {
    let mut ctx = TestContext::new().load_program(&[
        InstructionBuilder::new().beq(0, 0, 8).build(),
        ecall(),
        addi(1, 0, 5),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(1), 5);
}

#[test]
fn loop_trains_btb_and_counter() {
    let mut ctx = with_predictor(BranchPredictor::Counter).load_program(&[
        addi(1, 0, 3),
        addi(5, 5, 1),
        addi(1, 1, -1),
        InstructionBuilder::new().bne(1, 0, -8).build(),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(5), 3);
    assert_eq!(ctx.stats().branches, 3);
    // Cold BTB on the first pass, strongly taken counter on the exit.
    assert_eq!(ctx.stats().mispredictions, 2);
    assert_eq!(ctx.stats().flushed, 4);
    assert_eq!(ctx.stats().btb_hits, 2);
    assert_eq!(ctx.cpu().branch_unit.btb().lookup(12), Some(4));
}

#[rstest]
#[case(BranchPredictor::Static)]
#[case(BranchPredictor::Counter)]
#[case(BranchPredictor::Tournament)]
#[case(BranchPredictor::GShareTournament)]
fn predictors_agree_on_architectural_state(#[case] bp: BranchPredictor) {
    // Counts down from 10, summing into x6.
    let mut ctx = with_predictor(bp).load_program(&[
        addi(1, 0, 10),
        InstructionBuilder::new().add(6, 6, 1).build(),
        addi(1, 1, -1),
        InstructionBuilder::new().blt(0, 1, -8).build(),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(6), 55);
    assert_eq!(ctx.stats().branches, 10);
    assert_eq!(ctx.stats().flushed, 2 * ctx.stats().mispredictions);
}

#[test]
fn jal_and_jalr_link_return_addresses() {
    let mut ctx = TestContext::new().load_program(&[
        InstructionBuilder::new().jal(1, 12).build(),
        addi(6, 0, 2),
        ecall(),
        addi(5, 0, 1),
        InstructionBuilder::new().jalr(7, 1, 0).build(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(1), 4);
    assert_eq!(ctx.get_reg(5), 1);
    assert_eq!(ctx.get_reg(6), 2);
    assert_eq!(ctx.get_reg(7), 20);
    assert_eq!(ctx.stats().branches, 2);
}

#[test]
fn jalr_clears_target_low_bit() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 17),
        InstructionBuilder::new().jalr(0, 1, 0).build(),
        addi(5, 0, 1),
        ecall(),
        addi(6, 0, 1),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(5), 0);
    assert_eq!(ctx.get_reg(6), 1);
}

#[test]
fn signed_and_unsigned_branches() {
    let b = InstructionBuilder::new;
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, -1),
        addi(2, 0, 1),
        // -1 < 1 signed: taken over the poison write.
        b().blt(1, 2, 8).build(),
        addi(10, 0, 1),
        // 0xFFFFFFFF >= 1 unsigned: taken.
        b().bgeu(1, 2, 8).build(),
        addi(11, 0, 1),
        // 0xFFFFFFFF < 1 unsigned is false: falls through.
        b().bltu(1, 2, 8).build(),
        addi(12, 0, 1),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.get_reg(11), 0);
    assert_eq!(ctx.get_reg(12), 1);
}

#[test]
fn lui_and_auipc() {
    let b = InstructionBuilder::new;
    let mut ctx = TestContext::new().load_program(&[
        b().lui(5, 0xDEADC).build(),
        b().auipc(6, 1).build(),
        nop(),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(5), 0xDEAD_C000);
    assert_eq!(ctx.get_reg(6), 0x1004);
}
