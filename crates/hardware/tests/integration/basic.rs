//! Basic Pipeline Tests.
//!
//! A straight-line program of `N` instructions ending in a halt takes
//! `N + 4` cycles: the halt needs four more cycles to reach writeback.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::isa::rv32i::opcodes::{EBREAK, ECALL, HALT_STORE};
use rvpipe_core::sim::RunOutcome;

use crate::common::builder::instruction::{add, addi, ecall, nop, sw};
use crate::common::harness::{TestContext, test_config};

#[test]
fn straight_line_add() {
    let mut ctx = TestContext::new().load_program(&[
        addi(1, 0, 5),
        addi(4, 0, 7),
        add(3, 1, 4),
        ecall(),
    ]);

    let cycles = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(3), 12);
    assert_eq!(cycles, 8);
    assert_eq!(ctx.stats().instructions_retired, 4);
    assert_eq!(ctx.stats().stalls_load_use, 0);
    assert_eq!(ctx.stats().flushed, 0);
}

#[rstest]
#[case(ECALL)]
#[case(EBREAK)]
#[case(HALT_STORE)]
fn every_halt_encoding_stops_the_pipeline(#[case] halt: u32) {
    let mut ctx = TestContext::new().load_program(&[addi(1, 0, 9), halt]);

    let cycles = ctx.run_to_halt();

    assert_eq!(cycles, 6);
    assert_eq!(ctx.get_reg(1), 9);
    assert!(ctx.cpu().is_halted());
}

#[test]
fn halt_store_does_not_write_memory() {
    let mut ctx = TestContext::new().load_program(&[HALT_STORE]);
    ctx.cpu_mut()
        .system
        .dmem
        .write(0xFFFF_FFFC, 0x1234_5678, 0b1111);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.cpu().system.dmem.peek(0xFFFF_FFFC), 0x1234_5678);
}

#[test]
fn instructions_after_halt_never_execute() {
    let mut ctx = TestContext::new().load_program(&[
        addi(5, 0, 7),
        ecall(),
        sw(0, 5, 0),
        addi(5, 0, 1),
        addi(6, 0, 1),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(5), 7);
    assert_eq!(ctx.get_reg(6), 0);
    assert_eq!(ctx.cpu().system.dmem.peek(0), 0);
    assert_eq!(ctx.stats().instructions_retired, 2);
}

#[test]
fn halt_dump_matches_register_file() {
    let mut ctx = TestContext::new().load_program(&[addi(7, 0, -1), nop(), ecall()]);

    match ctx.run_to_end() {
        RunOutcome::Halted { dump, .. } => {
            assert_eq!(dump.get(7), 0xFFFF_FFFF);
            assert_eq!(dump.get(0), 0);
            let line = dump.lines().nth(7).expect("32 lines");
            assert_eq!(line, "x7 = 0xffffffff");
        }
        other => panic!("expected halt, got {:?}", other),
    }
}

#[test]
fn writes_to_x0_are_discarded() {
    let mut ctx = TestContext::new().load_program(&[
        addi(0, 0, 5),
        add(1, 0, 0),
        nop(),
        nop(),
        add(2, 0, 0),
        ecall(),
    ]);

    let _ = ctx.run_to_halt();

    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.get_reg(1), 0, "x0 is never forwarded");
    assert_eq!(ctx.get_reg(2), 0);
}

#[test]
fn stack_pointer_starts_at_last_data_word() {
    let ctx = TestContext::new();
    assert_eq!(ctx.get_reg(2), 4092);

    let mut config = test_config();
    config.memory.init_sp = false;
    let ctx = TestContext::with_config(&config);
    assert_eq!(ctx.get_reg(2), 0);
}

#[test]
fn cycle_counter_matches_stats() {
    let mut ctx = TestContext::new().load_program(&[nop(), nop(), nop(), ecall()]);

    let cycles = ctx.run_to_halt();

    assert_eq!(cycles, ctx.stats().cycles);
    assert!((ctx.stats().cpi() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn ticking_after_halt_is_a_no_op() {
    let mut ctx = TestContext::new().load_program(&[ecall()]);
    let cycles = ctx.run_to_halt();

    ctx.sim.tick();
    ctx.sim.tick();

    assert_eq!(ctx.stats().cycles, cycles);
}
