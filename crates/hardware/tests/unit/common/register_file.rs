//! Register File Tests.
//!
//! x0 is hardwired to zero; the halt dump prints one line per register in the
//! fixed `x{i} = 0x{value:08x}` format.

use pretty_assertions::assert_eq;
use rvpipe_core::common::RegisterFile;

#[test]
fn x0_ignores_writes() {
    let mut regs = RegisterFile::new();
    regs.write(0, 0xDEAD_BEEF);
    assert_eq!(regs.read(0), 0);
}

#[test]
fn writes_are_visible_to_reads() {
    let mut regs = RegisterFile::new();
    for i in 1..32 {
        regs.write(i, (i as u32) * 3);
    }
    for i in 1..32 {
        assert_eq!(regs.read(i), (i as u32) * 3);
    }
}

#[test]
fn dump_lines_use_fixed_format() {
    let mut regs = RegisterFile::new();
    regs.write(1, 5);
    regs.write(31, 0xFFFF_FFFF);
    let dump = regs.dump();
    let lines: Vec<String> = dump.lines().collect();

    assert_eq!(lines.len(), 32);
    assert_eq!(lines[0], "x0 = 0x00000000");
    assert_eq!(lines[1], "x1 = 0x00000005");
    assert_eq!(lines[31], "x31 = 0xffffffff");
}

#[test]
fn dump_display_is_one_line_per_register() {
    let mut regs = RegisterFile::new();
    regs.write(2, 0x1234);
    let text = regs.dump().to_string();

    assert_eq!(text.lines().count(), 32);
    assert!(text.ends_with('\n'));
    assert_eq!(text.lines().nth(2), Some("x2 = 0x00001234"));
}

#[test]
fn dump_is_a_snapshot() {
    let mut regs = RegisterFile::new();
    regs.write(7, 1);
    let dump = regs.dump();
    regs.write(7, 2);
    assert_eq!(dump.get(7), 1);
    assert_eq!(dump.values()[7], 1);
}
