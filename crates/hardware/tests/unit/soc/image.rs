//! Hex Image Tests.
//!
//! Exact eight-digit lines, trailing whitespace, line-numbered errors and
//! depth checks when reading from disk.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::common::SimError;
use rvpipe_core::soc::memory::image;

#[test]
fn parses_words_in_order() {
    let words = image::parse(Path::new("t.exe"), "00000013\ndeadBEEF\n00a00093\n")
        .expect("valid image");
    assert_eq!(words, vec![0x0000_0013, 0xDEAD_BEEF, 0x00A0_0093]);
}

#[test]
fn tolerates_trailing_whitespace_and_crlf() {
    let words =
        image::parse(Path::new("t.exe"), "00000013  \r\n00000073\t\n").expect("valid image");
    assert_eq!(words, vec![0x13, 0x73]);
}

#[test]
fn empty_text_is_empty_image() {
    assert_eq!(image::parse(Path::new("t.exe"), "").expect("empty"), Vec::<u32>::new());
}

#[rstest]
#[case("0000013", 1)]
#[case("000000013", 1)]
#[case("0x000013", 1)]
#[case("00000013\nzzzzzzzz", 2)]
#[case("00000013\n\n00000013", 2)]
#[case("00000013\n 0000013", 2)]
fn reports_first_bad_line(#[case] text: &str, #[case] expected_line: usize) {
    match image::parse(Path::new("bad.exe"), text) {
        Err(SimError::ImageFormat { line, path, .. }) => {
            assert_eq!(line, expected_line);
            assert_eq!(path, Path::new("bad.exe"));
        }
        other => panic!("expected ImageFormat, got {:?}", other),
    }
}

#[test]
fn reads_file_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prog.exe");
    fs::write(&path, "00100093\n00000073\n").expect("write image");

    let words = image::read(&path, 16).expect("readable image");
    assert_eq!(words, vec![0x0010_0093, 0x0000_0073]);
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = image::read(&dir.path().join("nope.exe"), 16).expect_err("missing file");
    assert!(matches!(err, SimError::ImageRead { .. }));
}

#[test]
fn image_deeper_than_memory_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("big.exe");
    fs::write(&path, "00000013\n".repeat(5)).expect("write image");

    match image::read(&path, 4) {
        Err(SimError::ImageTooLarge { words, depth, .. }) => {
            assert_eq!(words, 5);
            assert_eq!(depth, 4);
        }
        other => panic!("expected ImageTooLarge, got {:?}", other),
    }
}
