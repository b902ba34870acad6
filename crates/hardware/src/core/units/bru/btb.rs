//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped cache that stores target addresses for control flow
//! instructions. It allows the fetch stage to predict the target of a branch or
//! jump before the instruction is decoded. Entries are tagged with the full PC,
//! so aliasing PCs never return each other's targets.

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default)]
struct BtbEntry {
    /// The full PC this entry was written for.
    tag: u32,
    /// The predicted target address.
    target: u32,
    /// Indicates if this entry contains valid data.
    valid: bool,
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug)]
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<BtbEntry>,
    /// Index mask (`size - 1`).
    mask: usize,
}

impl Btb {
    /// Creates a new Branch Target Buffer with the specified size.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries in the BTB. Must be a power of 2.
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size],
            mask: size.saturating_sub(1),
        }
    }

    /// Calculates the index into the BTB table for a given program counter.
    ///
    /// Shifts the PC right by 2 bits (ignoring instruction alignment) and masks
    /// it against the table size.
    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & self.mask
    }

    /// Looks up a target address for the given program counter.
    ///
    /// # Returns
    ///
    /// The stored target if a valid entry exists and its tag equals `pc`,
    /// otherwise `None`.
    pub fn lookup(&self, pc: u32) -> Option<u32> {
        let e = self.table[self.index(pc)];
        if e.valid && e.tag == pc {
            Some(e.target)
        } else {
            None
        }
    }

    /// Records the resolved target of a taken branch or jump.
    ///
    /// Writes a new entry or overwrites whatever occupied the index.
    pub fn update(&mut self, pc: u32, target: u32) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            tag: pc,
            target,
            valid: true,
        };
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
