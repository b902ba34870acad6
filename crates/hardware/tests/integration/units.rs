//! Functional Unit Tests.
//!
//! MUL* occupy the three-stage multiplier and DIV*/REM* the configured
//! divider. Decode stalls while either unit is busy, so every operation
//! costs its latency in `stalls_unit` cycles.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::config::DividerKind;

use crate::common::builder::instruction::{add, addi, ecall};
use crate::common::harness::{TestContext, test_config};
use crate::common::InstructionBuilder;

fn with_divider(kind: DividerKind) -> TestContext {
    let mut config = test_config();
    config.pipeline.divider = kind;
    TestContext::with_config(&config)
}

#[test]
fn multiply_variants() {
    let b = InstructionBuilder::new;
    let mut ctx = TestContext::new().load_program(&[
        addi(10, 0, -3),
        addi(11, 0, 7),
        b().mul(12, 10, 11).build(),
        b().mulh(13, 10, 11).build(),
        b().mulhu(14, 10, 11).build(),
        b().mulhsu(15, 10, 11).build(),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(12), -21_i32 as u32);
    assert_eq!(ctx.get_reg(13), 0xFFFF_FFFF);
    assert_eq!(ctx.get_reg(14), 6);
    assert_eq!(ctx.get_reg(15), 0xFFFF_FFFF);
    assert_eq!(ctx.stats().mul_ops, 4);
    assert_eq!(ctx.stats().stalls_unit, 12);
}

#[test]
fn multiply_costs_three_cycles() {
    let b = InstructionBuilder::new;
    let mut ctx = TestContext::new().load_program(&[
        addi(10, 0, 6),
        addi(11, 0, 7),
        b().mul(12, 10, 11).build(),
        ecall(),
    ]);

    let cycles = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(12), 42);
    assert_eq!(ctx.stats().stalls_unit, 3);
    assert_eq!(cycles, 11);
}

#[test]
fn multiply_result_is_forwarded() {
    let b = InstructionBuilder::new;
    let mut ctx = TestContext::new().load_program(&[
        addi(10, 0, 6),
        b().mul(12, 10, 10).build(),
        add(13, 12, 12),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(13), 72);
}

#[rstest]
#[case(DividerKind::Restoring, 34)]
#[case(DividerKind::Radix16, 10)]
fn divide_costs_unit_latency(#[case] kind: DividerKind, #[case] latency: u64) {
    let b = InstructionBuilder::new;
    let mut ctx = with_divider(kind).load_program(&[
        addi(10, 0, 100),
        addi(11, 0, 7),
        b().div(12, 10, 11).build(),
        ecall(),
    ]);

    let cycles = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(12), 14);
    assert_eq!(ctx.stats().stalls_unit, latency);
    assert_eq!(cycles, 8 + latency);
}

#[rstest]
#[case(DividerKind::Restoring)]
#[case(DividerKind::Radix16)]
fn divide_variants(#[case] kind: DividerKind) {
    let b = InstructionBuilder::new;
    let mut ctx = with_divider(kind).load_program(&[
        addi(10, 0, -100),
        addi(11, 0, 7),
        b().div(12, 10, 11).build(),
        b().rem(13, 10, 11).build(),
        b().divu(14, 10, 11).build(),
        b().remu(15, 10, 11).build(),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(12), -14_i32 as u32);
    assert_eq!(ctx.get_reg(13), -2_i32 as u32);
    assert_eq!(ctx.get_reg(14), 613_566_742);
    assert_eq!(ctx.get_reg(15), 2);
    assert_eq!(ctx.stats().div_ops, 4);
    assert_eq!(ctx.stats().div_faults, 0);
}

#[rstest]
#[case(DividerKind::Restoring)]
#[case(DividerKind::Radix16)]
fn divide_faults_return_defined_values(#[case] kind: DividerKind) {
    let b = InstructionBuilder::new;
    let mut ctx = with_divider(kind).load_program(&[
        addi(10, 0, 17),
        b().div(11, 10, 0).build(),
        b().rem(12, 10, 0).build(),
        b().lui(20, 0x80000).build(),
        addi(21, 0, -1),
        b().div(22, 20, 21).build(),
        b().rem(23, 20, 21).build(),
        b().divu(24, 20, 21).build(),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(11), 0xFFFF_FFFF);
    assert_eq!(ctx.get_reg(12), 17);
    assert_eq!(ctx.get_reg(22), 0x8000_0000);
    assert_eq!(ctx.get_reg(23), 0);
    assert_eq!(ctx.get_reg(24), 0);
    assert_eq!(ctx.stats().div_faults, 4);
}

#[test]
fn divide_by_one_takes_fast_path() {
    let b = InstructionBuilder::new;
    let mut ctx = with_divider(DividerKind::Restoring).load_program(&[
        addi(10, 0, -9),
        addi(11, 0, 1),
        b().div(12, 10, 11).build(),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(12), -9_i32 as u32);
    assert_eq!(ctx.stats().stalls_unit, 1);
}

#[test]
fn multiply_then_divide_back_to_back() {
    let b = InstructionBuilder::new;
    let mut ctx = TestContext::new().load_program(&[
        addi(10, 0, 12),
        addi(11, 0, 5),
        b().mul(12, 10, 11).build(),
        b().div(13, 12, 10).build(),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(12), 60);
    assert_eq!(ctx.get_reg(13), 5);
    assert_eq!(ctx.stats().stalls_unit, 3 + 10);
}
