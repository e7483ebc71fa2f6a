//! Least-significant-bit-first packing of variable width codes.
//!
//! Both halves keep a pure bit cursor: `8 * whole bytes + residual bits`.
//! The writer patches the trailing partially filled byte in place before
//! appending whole bytes, so calls may start and end anywhere inside a
//! byte. The reader mirrors that and signals end of stream by refusing a
//! read that cannot be served in full.

/// Packs codes into a growable byte buffer.
pub(crate) struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub(crate) fn new() -> Self {
        BitWriter {
            bytes: Vec::new(),
            bit_len: 0,
        }
    }

    /// Append the low `width` bits of `value`, LSB first.
    ///
    /// `width` must be at most 16; a width of zero writes nothing.
    pub(crate) fn write_bits(&mut self, value: u16, width: u8) {
        debug_assert!(width <= 16, "code width out of range: {}", width);
        let mut value = u32::from(value) & ((1u32 << width) - 1);
        let mut remaining = u32::from(width);

        let used = (self.bit_len % 8) as u32;
        if used != 0 && remaining > 0 {
            // Patch the partial byte at the end of the buffer.
            let free = 8 - used;
            let take = remaining.min(free);
            let idx = self.bit_len / 8;
            self.bytes[idx] |= ((value & ((1 << take) - 1)) as u8) << used;
            value >>= take;
            remaining -= take;
            self.bit_len += take as usize;
        }

        while remaining >= 8 {
            self.bytes.push((value & 0xff) as u8);
            value >>= 8;
            remaining -= 8;
            self.bit_len += 8;
        }

        if remaining > 0 {
            self.bytes.push((value & ((1 << remaining) - 1)) as u8);
            self.bit_len += remaining as usize;
        }
    }

    /// Finish writing, padding the last byte with zero bits.
    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[cfg(test)]
    pub(crate) fn bit_len(&self) -> usize {
        self.bit_len
    }
}

/// Unpacks codes from a byte slice.
pub(crate) struct BitReader<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        BitReader { bytes, cursor: 0 }
    }

    /// Read `width` bits, LSB first.
    ///
    /// Returns `None` when fewer than `width` bits remain. The cursor is
    /// left untouched in that case, so the caller sees the same answer on
    /// retry instead of zero-padded garbage.
    pub(crate) fn read_bits(&mut self, width: u8) -> Option<u16> {
        debug_assert!(width <= 16, "code width out of range: {}", width);
        let width = usize::from(width);
        if self.bytes.len() * 8 - self.cursor < width {
            return None;
        }

        let mut value = 0u32;
        let mut got = 0;
        while got < width {
            let byte = self.bytes[self.cursor / 8];
            let off = self.cursor % 8;
            let take = (width - got).min(8 - off);
            let chunk = (u32::from(byte) >> off) & ((1 << take) - 1);
            value |= chunk << got;
            got += take;
            self.cursor += take;
        }
        Some(value as u16)
    }
}
