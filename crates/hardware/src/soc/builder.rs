//! System construction and the top-level `System` type.
//!
//! This module builds the two memories from configuration and preloads them:
//! 1. **Sizing:** both SRAMs get `1 << memory.depth_log` words.
//! 2. **Image loading:** instruction and data words, from slices or hex files.

use std::path::Path;

use crate::common::error::SimError;
use crate::config::Config;
use crate::soc::memory::{Sram, image};

/// Instruction memory plus data memory.
#[derive(Clone, Debug)]
pub struct System {
    /// Instruction SRAM, read by fetch.
    pub imem: Sram,
    /// Data SRAM, read and written by execute.
    pub dmem: Sram,
}

impl System {
    /// Builds zeroed memories sized by the configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration; only `memory.depth_log` is used.
    ///
    /// # Returns
    ///
    /// A `System` whose memories read as zero everywhere.
    pub fn new(config: &Config) -> Self {
        Self {
            imem: Sram::new(config.memory.depth_log),
            dmem: Sram::new(config.memory.depth_log),
        }
    }

    /// Preloads instruction memory from word 0.
    pub fn load_program(&mut self, words: &[u32]) -> Result<(), SimError> {
        check_fits("<program>", words.len(), self.imem.depth())?;
        self.imem.load(words);
        Ok(())
    }

    /// Preloads data memory from word 0.
    pub fn load_data(&mut self, words: &[u32]) -> Result<(), SimError> {
        check_fits("<data>", words.len(), self.dmem.depth())?;
        self.dmem.load(words);
        Ok(())
    }

    /// Reads a hex image into instruction memory.
    pub fn load_program_file(&mut self, path: &Path) -> Result<(), SimError> {
        let words = image::read(path, self.imem.depth())?;
        self.imem.load(&words);
        Ok(())
    }

    /// Reads a hex image into data memory.
    pub fn load_data_file(&mut self, path: &Path) -> Result<(), SimError> {
        let words = image::read(path, self.dmem.depth())?;
        self.dmem.load(&words);
        Ok(())
    }
}

fn check_fits(label: &str, words: usize, depth: usize) -> Result<(), SimError> {
    if words > depth {
        return Err(SimError::ImageTooLarge {
            path: label.into(),
            words,
            depth,
        });
    }
    Ok(())
}
