//! Word-addressed synchronous SRAM.
//!
//! Reads are registered: `read` latches the addressed word into `dout`, and the
//! consumer samples `dout` on the following cycle. Writes take a 4-bit byte
//! enable so stores of bytes and halves only touch their lanes. Addresses wrap
//! at the configured depth.

/// Synchronous SRAM with a registered read port.
#[derive(Clone, Debug)]
pub struct Sram {
    words: Vec<u32>,
    mask: usize,
    dout: u32,
}

impl Sram {
    /// Creates a zeroed memory of `1 << depth_log` words.
    pub fn new(depth_log: u32) -> Self {
        let depth = 1usize << depth_log;
        Self {
            words: vec![0; depth],
            mask: depth - 1,
            dout: 0,
        }
    }

    /// Number of 32-bit words.
    pub fn depth(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    fn index(&self, byte_addr: u32) -> usize {
        (byte_addr >> 2) as usize & self.mask
    }

    /// Returns the word holding `byte_addr` without touching the output register.
    pub fn peek(&self, byte_addr: u32) -> u32 {
        self.words[self.index(byte_addr)]
    }

    /// Reads the word holding `byte_addr` into the output register and returns it.
    pub fn read(&mut self, byte_addr: u32) -> u32 {
        self.dout = self.peek(byte_addr);
        self.dout
    }

    /// Value latched by the last `read`.
    pub fn dout(&self) -> u32 {
        self.dout
    }

    /// Writes the lanes of `data` selected by `byte_enable` (bit `i` = byte `i`).
    ///
    /// # Arguments
    ///
    /// * `byte_addr` - Any byte address inside the target word.
    /// * `data` - Value already shifted into its byte lanes.
    /// * `byte_enable` - Lane mask; only the low four bits are used.
    pub fn write(&mut self, byte_addr: u32, data: u32, byte_enable: u8) {
        let mut mask = 0u32;
        for lane in 0..4 {
            if byte_enable & (1 << lane) != 0 {
                mask |= 0xFF << (lane * 8);
            }
        }
        let idx = self.index(byte_addr);
        self.words[idx] = (self.words[idx] & !mask) | (data & mask);
    }

    /// Copies `image` into the memory starting at word 0.
    ///
    /// Words past the end of the memory are ignored; callers check the size first.
    pub fn load(&mut self, image: &[u32]) {
        for (dst, &src) in self.words.iter_mut().zip(image) {
            *dst = src;
        }
    }

    /// The whole backing store.
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}
