//! Loader Tests.
//!
//! A case is a path prefix; `.exe` is required, `.data` optional. The
//! simulator validates configuration before touching the filesystem.

use std::fs;
use std::path::Path;

use rvpipe_core::common::SimError;
use rvpipe_core::config::Config;
use rvpipe_core::sim::loader::load_case;
use rvpipe_core::sim::RunOutcome;
use rvpipe_core::Simulator;

use crate::common::harness::test_config;

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).expect("write image");
}

#[test]
fn loads_program_and_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "case.exe", "00100093\n00000073\n");
    write(dir.path(), "case.data", "0000002a\n");

    let system = load_case(&test_config(), &dir.path().join("case")).expect("loads");
    assert_eq!(system.imem.peek(0), 0x0010_0093);
    assert_eq!(system.dmem.peek(0), 42);
}

#[test]
fn data_image_is_optional() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "case.exe", "00000073\n");

    let system = load_case(&test_config(), &dir.path().join("case")).expect("loads");
    assert!(system.dmem.words().iter().all(|&w| w == 0));
}

#[test]
fn dotted_prefix_keeps_its_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "v1.2.exe", "00000073\n");

    let system = load_case(&test_config(), &dir.path().join("v1.2")).expect("loads");
    assert_eq!(system.imem.peek(0), 0x73);
}

#[test]
fn missing_program_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_case(&test_config(), &dir.path().join("absent")).expect_err("no .exe");
    assert!(matches!(err, SimError::ImageRead { .. }));
}

#[test]
fn malformed_data_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "case.exe", "00000073\n");
    write(dir.path(), "case.data", "2a\n");

    let err = load_case(&test_config(), &dir.path().join("case")).expect_err("bad .data");
    assert!(matches!(err, SimError::ImageFormat { line: 1, .. }));
}

#[test]
fn from_case_runs_to_halt() {
    let dir = tempfile::tempdir().expect("tempdir");
    // addi x1, x0, 1 ; ecall
    write(dir.path(), "case.exe", "00100093\n00000073\n");

    let mut sim = Simulator::from_case(&test_config(), &dir.path().join("case")).expect("loads");
    match sim.run() {
        RunOutcome::Halted { dump, .. } => assert_eq!(dump.get(1), 1),
        other => panic!("expected halt, got {:?}", other),
    }
}

#[test]
fn from_case_validates_config_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = Config::default();
    config.pipeline.btb_size = 3;

    let err = Simulator::from_case(&config, &dir.path().join("absent")).expect_err("bad config");
    assert!(matches!(err, SimError::Config(_)));
}
