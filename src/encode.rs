//! A module for all encoding needs.
use crate::bits::BitWriter;
use crate::decode::LzwError;
use crate::dict::{Dictionary, Pattern};
use crate::{Code, CLEAR_CODE, MIN_CODESIZE, STOP_CODE};

/// A one-shot LZW encoder.
///
/// Owns the dictionary and bit cursor for a single compress call; create
/// a fresh one per buffer.
pub struct Encoder {
    dict: Dictionary,
    out: BitWriter,
    code_size: u8,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            dict: Dictionary::new(),
            out: BitWriter::new(),
            code_size: MIN_CODESIZE,
        }
    }

    /// Compress `data` into a GIF-dialect LZW code stream.
    ///
    /// The stream ends with a stop code; the last byte is padded with
    /// zero bits. Empty input is a contract violation and answers
    /// [`LzwError::EmptyInput`].
    pub fn encode(mut self, data: &[u8]) -> Result<Vec<u8>, LzwError> {
        if data.is_empty() {
            return Err(LzwError::EmptyInput);
        }

        let mut pos = 0;
        loop {
            // Greedily extend the pattern anchored at `pos`, tracking the
            // code of the longest known prefix.
            let mut end = pos;
            let mut last = Code::from(data[pos]);
            loop {
                if end + 1 == data.len() {
                    // Input exhausted on a full match. The decoder still
                    // derives one more table entry from this code before
                    // it reads the stop code, so it may grow its code
                    // size first; mirror that here.
                    self.out.write_bits(last, self.code_size);
                    if self.dict.next_code() == 1 << self.code_size {
                        self.code_size += 1;
                    }
                    self.out.write_bits(STOP_CODE, self.code_size);
                    return Ok(self.out.into_bytes());
                }
                match self
                    .dict
                    .lookup_code(data, Pattern::Run { start: pos, end: end + 1 })
                {
                    Some(code) => {
                        last = code;
                        end += 1;
                    }
                    None => break,
                }
            }

            self.out.write_bits(last, self.code_size);
            let new_code = self
                .dict
                .add_pattern(data, Pattern::Run { start: pos, end: end + 1 });

            // Order matters: a full table clears before any width check.
            if self.dict.is_full() {
                self.out.write_bits(CLEAR_CODE, self.code_size);
                self.dict.clear();
                self.code_size = MIN_CODESIZE;
            } else if new_code == 1 << self.code_size {
                // The next code would overflow the current width.
                self.code_size += 1;
            }

            // The unmatched byte starts the next pattern.
            pos = end + 1;
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder::new()
    }
}

/// Compress a non-empty byte buffer. See [`Encoder::encode`].
pub fn compress(data: &[u8]) -> Result<Vec<u8>, LzwError> {
    Encoder::new().encode(data)
}
