//! Simulator error definitions.
//!
//! Only the edges of the simulator can fail: reading memory images and
//! accepting a configuration. The pipeline itself never returns an error;
//! unknown encodings run as NOP and division faults travel as flagged results.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the simulator.
#[derive(Error, Debug)]
pub enum SimError {
    /// A memory image could not be read from disk.
    #[error("failed to read memory image '{path}': {source}")]
    ImageRead {
        /// Path of the image file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of a memory image is not exactly eight hex digits.
    #[error("malformed memory image '{path}' at line {line}: {text:?}")]
    ImageFormat {
        /// Path (or label) of the image.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Offending line content.
        text: String,
    },

    /// A memory image holds more words than the memory can store.
    #[error("memory image '{path}' has {words} words but memory depth is {depth}")]
    ImageTooLarge {
        /// Path (or label) of the image.
        path: PathBuf,
        /// Words in the image.
        words: usize,
        /// Words in the memory.
        depth: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A JSON configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
