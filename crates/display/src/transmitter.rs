//! Bit-serial transmitter.
//!
//! The bus has no framing and no acknowledgement: a receiver tracks its dot
//! position purely by counting bits, so every refresh must send an exact,
//! fixed number of them.

use crate::types::BitSink;

/// Send one byte, most significant bit first.
#[inline]
pub fn transmit_byte<B: BitSink + ?Sized>(bus: &mut B, byte: u8) {
    for bit in (0..8).rev() {
        bus.transmit_bit(byte & (1 << bit) != 0);
    }
}

/// Send a run of bytes in order.
pub fn transmit_bytes<B: BitSink + ?Sized>(bus: &mut B, bytes: &[u8]) {
    for &byte in bytes {
        transmit_byte(bus, byte);
    }
}

/// A bus that records every bit, for tests and benchmarks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitRecorder {
    bits: Vec<bool>,
}

impl BitRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Regroup the recorded bits into MSB-first bytes; a trailing partial
    /// byte is dropped.
    pub fn bytes(&self) -> Vec<u8> {
        self.bits
            .chunks_exact(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
            .collect()
    }
}

impl BitSink for BitRecorder {
    fn transmit_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }
}
