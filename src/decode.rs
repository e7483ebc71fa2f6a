//! A module for all decoding needs.
//!
//! The decoder never sees the encoder's input. It rebuilds the dictionary
//! in lockstep by re-running the encoder's greedy scan over its own
//! output buffer: every pattern the encoder registered becomes visible in
//! the decoded bytes exactly one code later, so scanning forward from a
//! pending anchor reproduces the construction order entry for entry.

use core::fmt;

use crate::bits::BitReader;
use crate::dict::{Dictionary, Pattern};
use crate::{CLEAR_CODE, MAX_CODESIZE, MIN_CODESIZE, STOP_CODE};

/// Errors surfaced by [`compress`] and [`decompress`].
///
/// There is no partial-result contract: a call either returns a complete
/// byte sequence or one of these.
///
/// [`compress`]: ../encode/fn.compress.html
/// [`decompress`]: fn.decompress.html
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzwError {
    /// A zero-length buffer was handed to the compressor.
    EmptyInput,
    /// The stream ended before a stop code; a code read could not be
    /// served with the full width. Truncated downloads land here and are
    /// recoverable by the caller, not a reason to abort.
    TruncatedStream,
    /// A code that neither the dictionary nor the KwKwK rule can explain.
    InvalidCode,
}

impl fmt::Display for LzwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LzwError::EmptyInput => f.write_str("input buffer is empty"),
            LzwError::TruncatedStream => f.write_str("stream ended before a stop code"),
            LzwError::InvalidCode => f.write_str("invalid code in stream"),
        }
    }
}

impl std::error::Error for LzwError {}

/// A one-shot LZW decoder.
///
/// Owns the dictionary, the output buffer and the pending-pattern anchor
/// for a single decompress call.
pub struct Decoder {
    dict: Dictionary,
    out: Vec<u8>,
    /// Start of the pattern the dictionary scan has not consumed yet.
    anchor: usize,
    /// Start of the expansion of the previously read code.
    prev_start: Option<usize>,
    code_size: u8,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            dict: Dictionary::new(),
            out: Vec::new(),
            anchor: 0,
            prev_start: None,
            code_size: MIN_CODESIZE,
        }
    }

    /// Decompress a GIF-dialect LZW code stream.
    pub fn decode(mut self, stream: &[u8]) -> Result<Vec<u8>, LzwError> {
        let mut reader = BitReader::new(stream);
        loop {
            let code = reader
                .read_bits(self.code_size)
                .ok_or(LzwError::TruncatedStream)?;

            if code == STOP_CODE {
                return Ok(self.out);
            }
            if code == CLEAR_CODE {
                self.dict.clear();
                self.code_size = MIN_CODESIZE;
                self.anchor = self.out.len();
                self.prev_start = None;
                continue;
            }

            let start = self.out.len();
            match self.dict.lookup_pattern(code) {
                Some(Pattern::Byte(byte)) => self.out.push(byte),
                Some(Pattern::Run { start: from, end: to }) => {
                    // A back-reference into our own output.
                    self.out.extend_from_within(from..=to);
                }
                None => {
                    // KwKwK: the encoder just added this pattern, always
                    // exactly one code ahead of our next assignment. It
                    // must be the previous pattern plus its first byte.
                    if code != self.dict.next_code() {
                        return Err(LzwError::InvalidCode);
                    }
                    let prev = self.prev_start.ok_or(LzwError::InvalidCode)?;
                    self.out.extend_from_within(prev..start);
                    let first = self.out[prev];
                    self.out.push(first);
                }
            }
            self.prev_start = Some(start);

            self.rebuild_entries();
        }
    }

    /// Re-run the encoder's greedy scan over the decoded bytes and add
    /// every pattern that is now fully determined. A pattern touching the
    /// end of the buffer stays pending; its final byte arrives with the
    /// next code.
    fn rebuild_entries(&mut self) {
        while self.anchor < self.out.len() {
            let mut end = self.anchor;
            loop {
                if end + 1 >= self.out.len() {
                    return;
                }
                let probe = Pattern::Run {
                    start: self.anchor,
                    end: end + 1,
                };
                match self.dict.lookup_code(&self.out, probe) {
                    Some(_) => end += 1,
                    None => break,
                }
            }

            if !self.dict.is_full() {
                let new_code = self.dict.add_pattern(
                    &self.out,
                    Pattern::Run {
                        start: self.anchor,
                        end: end + 1,
                    },
                );
                // One code earlier than the encoder's own rule: our entry
                // for a pattern lags the encoder's assignment by one, so
                // the last code representable at this width is the cue.
                if new_code == (1 << self.code_size) - 1 && self.code_size < MAX_CODESIZE {
                    self.code_size += 1;
                }
            }
            // The unmatched byte anchors the next pattern.
            self.anchor = end + 1;
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}

/// Decompress a GIF-dialect LZW code stream. See [`Decoder::decode`].
pub fn decompress(stream: &[u8]) -> Result<Vec<u8>, LzwError> {
    Decoder::new().decode(stream)
}

#[cfg(test)]
mod tests {
    use super::{decompress, LzwError};
    use crate::bits::BitWriter;
    use crate::encode::compress;
    use crate::{CLEAR_CODE, STOP_CODE};

    fn stream_of(codes: &[(u16, u8)]) -> Vec<u8> {
        let mut writer = BitWriter::new();
        for &(code, width) in codes {
            writer.write_bits(code, width);
        }
        writer.into_bytes()
    }

    #[test]
    fn decodes_known_codes() {
        // 'a' 'b' then the run "ab" via its assigned code 258.
        let stream = stream_of(&[(97, 9), (98, 9), (258, 9), (STOP_CODE, 9)]);
        assert_eq!(decompress(&stream).unwrap(), b"abab");
    }

    #[test]
    fn kwkwk_reconstruction() {
        // 258 is read before the decoder has synthesized it: previous
        // pattern 'A' plus its first byte again.
        let stream = stream_of(&[(0x41, 9), (258, 9), (0x41, 9), (STOP_CODE, 9)]);
        assert_eq!(decompress(&stream).unwrap(), b"AAAA");
    }

    #[test]
    fn clear_resets_mid_stream() {
        let stream = stream_of(&[
            (97, 9),
            (98, 9),
            (258, 9),
            (CLEAR_CODE, 9),
            (99, 9),
            (99, 9),
            (258, 9),
            (STOP_CODE, 9),
        ]);
        assert_eq!(decompress(&stream).unwrap(), b"ababcccc");
    }

    #[test]
    fn truncation_is_an_error() {
        assert_eq!(decompress(&[]), Err(LzwError::TruncatedStream));

        let full = compress(b"the quick brown fox jumps over the lazy dog").unwrap();
        for cut in 1..full.len().min(6) {
            let short = &full[..full.len() - cut];
            assert_eq!(
                decompress(short),
                Err(LzwError::TruncatedStream),
                "cut {}",
                cut
            );
        }
    }

    #[test]
    fn code_from_the_future_rejected() {
        // 300 is far ahead of the next assignable code.
        let stream = stream_of(&[(97, 9), (300, 9), (STOP_CODE, 9)]);
        assert_eq!(decompress(&stream), Err(LzwError::InvalidCode));
    }

    #[test]
    fn kwkwk_without_history_rejected() {
        let stream = stream_of(&[(258, 9), (STOP_CODE, 9)]);
        assert_eq!(decompress(&stream), Err(LzwError::InvalidCode));
    }
}
