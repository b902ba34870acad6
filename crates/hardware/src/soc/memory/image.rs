//! Hex memory images.
//!
//! One 32-bit word per line, exactly eight hex digits, no prefix. Line `n`
//! holds word `n`. Trailing whitespace and a final newline are tolerated;
//! anything else is reported with its line number.

use std::fs;
use std::path::Path;

use crate::common::error::SimError;

/// Hex digits per line.
const DIGITS: usize = 8;

/// Parses image text.
///
/// # Arguments
///
/// * `path` - Source path, used only for error reporting.
/// * `text` - File contents.
///
/// # Returns
///
/// The words in address order, or `SimError::ImageFormat` for the first bad line.
pub fn parse(path: &Path, text: &str) -> Result<Vec<u32>, SimError> {
    let mut words = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let digits = line.trim_end();
        let bad = || SimError::ImageFormat {
            path: path.to_path_buf(),
            line: n + 1,
            text: line.to_string(),
        };
        if digits.len() != DIGITS || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        words.push(u32::from_str_radix(digits, 16).map_err(|_| bad())?);
    }
    Ok(words)
}

/// Reads and parses an image file, rejecting images deeper than `depth` words.
pub fn read(path: &Path, depth: usize) -> Result<Vec<u32>, SimError> {
    let text = fs::read_to_string(path).map_err(|source| SimError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    let words = parse(path, &text)?;
    if words.len() > depth {
        return Err(SimError::ImageTooLarge {
            path: path.to_path_buf(),
            words: words.len(),
            depth,
        });
    }
    tracing::debug!("IMAGE: {} words from {}", words.len(), path.display());
    Ok(words)
}
