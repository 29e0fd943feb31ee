//! The Gifford keystream engine.
//!
//! The state is eight signed bytes seeded from the key. Every processed byte
//! drives one step of two feedback functions: the first produces the
//! observation byte and is written back into the state, the second derives
//! the actual keystream byte from two 16-bit packs of state bytes.
//!
//! All intermediate arithmetic is done on sign-extended 32-bit values. The
//! 16-bit packs deliberately skip masking the low byte, so a negative state
//! byte smears sign bits into the high half of the packed word. That quirk
//! changes every subsequent output byte and is reproduced exactly.

use log::debug;

/// The reference 8-byte key used by the original program.
pub const REFERENCE_KEY: [u8; 8] = [0xC1, 0xD8, 0x79, 0x33, 0xDA, 0x59, 0x8C, 0x36];

/// Synchronous keystream engine over an 8-byte nonlinear feedback state.
///
/// One engine instance owns its state exclusively. Re-seeding means
/// constructing a fresh engine; the transform is its own inverse across
/// equal-keyed instances.
pub struct KeystreamEngine {
    /// Eight signed state bytes, seeded verbatim from the key.
    state: [i8; 8],
    /// Step cursor into the state, kept in 0..8; decrements (wraps) per step.
    index: usize,
    /// First-feedback output per step, independent of the transformed data.
    sequence: Vec<u8>,
}

impl KeystreamEngine {
    /// Build an engine from an 8-byte key. Any key value is accepted.
    pub fn new(key: [u8; 8]) -> Self {
        debug!("seeding keystream engine");
        Self {
            state: key.map(|b| b as i8),
            index: 0,
            sequence: Vec::new(),
        }
    }

    /// One step: evolve the state, record the observation byte, and return
    /// the input byte XORed with the keystream byte.
    fn step(&mut self, byte: u8) -> u8 {
        let a = self.state[self.index & 7] as i32;
        let b = self.state[(self.index + 1) & 7] as i32;
        let c = self.state[(self.index + 7) & 7] as i32;
        // Arithmetic shift on b keeps its sign bits; only the c branch masks.
        let fb1 = (a ^ (b >> 1) ^ ((c << 1) & 255)) as i8;
        self.sequence.push(fb1 as u8);

        // Decrement mod 8, then clobber the slot at the new index.
        self.index = (self.index + 7) & 7;
        self.state[self.index] = fb1;

        // Unmasked packs: negative low bytes corrupt the high half.
        let pack_a = (((self.state[self.index] as i32) << 8)
            | (self.state[(self.index + 2) & 7] as i32)) as i16;
        let pack_b = (((self.state[(self.index + 4) & 7] as i32) << 8)
            | (self.state[(self.index + 7) & 7] as i32)) as i16;
        let fb2 = (((pack_a as i32) * (pack_b as i32)) >> 8) as i8;
        byte ^ fb2 as u8
    }

    /// Transform a buffer in place, one step per byte in order.
    ///
    /// Zero-length buffers are legal: no state mutation, no observation
    /// bytes. Applying the transform again with a freshly keyed engine
    /// recovers the original buffer.
    pub fn transform(&mut self, data: &mut [u8]) {
        for b in data.iter_mut() {
            *b = self.step(*b);
        }
    }

    /// The accumulated observation sequence, one byte per processed input
    /// byte, in processing order. Never mutated after appending.
    pub fn observation_sequence(&self) -> &[u8] {
        &self.sequence
    }
}
