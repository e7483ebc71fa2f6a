//! The pattern dictionary shared by the encoder and the decoder.
//!
//! Patterns are never copied. A multi-byte pattern is an inclusive index
//! range into the byte sequence being coded, so the same lookup machinery
//! serves both ends: the encoder resolves ranges against its static input
//! while the decoder resolves them against its own growing output buffer.
//! Every operation that touches pattern bytes therefore takes the
//! reference sequence as an argument.

use crate::{Code, CLEAR_CODE, FIRST_FREE_CODE, MAX_CODE};

const BUCKETS: usize = 8192;
const NIL: u16 = u16::max_value();

/// A byte run, by reference.
///
/// Either a bare alphabet symbol or an inclusive `[start, end]` range
/// into a reference sequence. Ranges stay valid because both reference
/// sequences only ever grow by appending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pattern {
    Byte(u8),
    Run { start: usize, end: usize },
}

struct Entry {
    start: usize,
    end: usize,
    /// Index of the next entry in the same bucket chain.
    next: u16,
}

/// Hash-chained code table for one compress or decompress call.
///
/// Codes for single bytes are implicit (the byte value itself); only
/// multi-byte runs occupy entries, with codes counted up from 258.
pub(crate) struct Dictionary {
    entries: Vec<Entry>,
    buckets: Box<[u16]>,
}

impl Dictionary {
    pub(crate) fn new() -> Self {
        Dictionary {
            entries: Vec::with_capacity(usize::from(MAX_CODE - FIRST_FREE_CODE) + 1),
            buckets: vec![NIL; BUCKETS].into_boxed_slice(),
        }
    }

    /// Multiplicative rolling hash over the run's bytes.
    fn bucket(data: &[u8], start: usize, end: usize) -> usize {
        let mut h = 0usize;
        for &byte in &data[start..=end] {
            h = h.wrapping_mul(37).wrapping_add(usize::from(byte));
        }
        h & (BUCKETS - 1)
    }

    /// The code the next added run will receive.
    pub(crate) fn next_code(&self) -> Code {
        FIRST_FREE_CODE + self.entries.len() as Code
    }

    /// True once every code up to 4095 has been assigned.
    pub(crate) fn is_full(&self) -> bool {
        self.next_code() > MAX_CODE
    }

    /// Register `pattern` and return its code.
    ///
    /// Single bytes are idempotent and never touch the table. The caller
    /// must clear before adding to a full table.
    pub(crate) fn add_pattern(&mut self, data: &[u8], pattern: Pattern) -> Code {
        match pattern {
            Pattern::Byte(byte) => Code::from(byte),
            Pattern::Run { start, end } => {
                debug_assert!(start < end, "single byte runs have implicit codes");
                debug_assert!(!self.is_full(), "add_pattern on a full table");
                let code = self.next_code();
                let bucket = Self::bucket(data, start, end);
                self.entries.push(Entry {
                    start,
                    end,
                    next: self.buckets[bucket],
                });
                self.buckets[bucket] = (self.entries.len() - 1) as u16;
                code
            }
        }
    }

    /// Find the code of `pattern`, comparing full byte equality against
    /// the chain of entries in its bucket. Collisions are expected; the
    /// hash only narrows the search.
    pub(crate) fn lookup_code(&self, data: &[u8], pattern: Pattern) -> Option<Code> {
        let (start, end) = match pattern {
            Pattern::Byte(byte) => return Some(Code::from(byte)),
            Pattern::Run { start, end } if start == end => {
                return Some(Code::from(data[start]));
            }
            Pattern::Run { start, end } => (start, end),
        };

        let len = end - start + 1;
        let mut at = self.buckets[Self::bucket(data, start, end)];
        while at != NIL {
            let entry = &self.entries[usize::from(at)];
            if entry.end - entry.start + 1 == len
                && data[entry.start..=entry.end] == data[start..=end]
            {
                return Some(FIRST_FREE_CODE + Code::from(at));
            }
            at = entry.next;
        }
        None
    }

    /// Resolve a code back to its pattern.
    ///
    /// Returns `None` for codes the table has not assigned yet; for a
    /// well-formed stream that is exactly the KwKwK situation, one code
    /// ahead of the next assignment. The clear and stop codes are the
    /// caller's business and also answer `None`.
    pub(crate) fn lookup_pattern(&self, code: Code) -> Option<Pattern> {
        if code < CLEAR_CODE {
            Some(Pattern::Byte(code as u8))
        } else if code >= FIRST_FREE_CODE {
            self.entries
                .get(usize::from(code - FIRST_FREE_CODE))
                .map(|entry| Pattern::Run {
                    start: entry.start,
                    end: entry.end,
                })
        } else {
            None
        }
    }

    /// Reset all buckets and drop every entry. Called at stream start and
    /// on every clear code.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        for head in self.buckets.iter_mut() {
            *head = NIL;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dictionary, Pattern};
    use crate::FIRST_FREE_CODE;

    #[test]
    fn single_bytes_are_implicit() {
        let mut dict = Dictionary::new();
        let data = b"abc";
        assert_eq!(dict.add_pattern(data, Pattern::Byte(b'a')), u16::from(b'a'));
        assert_eq!(dict.lookup_code(data, Pattern::Byte(0)), Some(0));
        assert_eq!(
            dict.lookup_code(data, Pattern::Run { start: 2, end: 2 }),
            Some(u16::from(b'c'))
        );
        assert_eq!(dict.next_code(), FIRST_FREE_CODE);
    }

    #[test]
    fn codes_count_up_from_258() {
        let mut dict = Dictionary::new();
        let data = b"abcbcd";
        assert_eq!(dict.add_pattern(data, Pattern::Run { start: 0, end: 1 }), 258);
        assert_eq!(dict.add_pattern(data, Pattern::Run { start: 1, end: 2 }), 259);
        assert_eq!(dict.add_pattern(data, Pattern::Run { start: 2, end: 4 }), 260);
        assert_eq!(dict.next_code(), 261);

        // Equal bytes at a different position resolve to the same code.
        assert_eq!(
            dict.lookup_code(data, Pattern::Run { start: 3, end: 4 }),
            Some(259)
        );
        assert_eq!(
            dict.lookup_code(data, Pattern::Run { start: 0, end: 2 }),
            None
        );
    }

    #[test]
    fn lookup_pattern_mirrors_assignment() {
        let mut dict = Dictionary::new();
        let data = b"xyxy";
        dict.add_pattern(data, Pattern::Run { start: 0, end: 1 });
        assert_eq!(
            dict.lookup_pattern(258),
            Some(Pattern::Run { start: 0, end: 1 })
        );
        assert_eq!(dict.lookup_pattern(7), Some(Pattern::Byte(7)));
        // One ahead of the next assignment: the KwKwK signal.
        assert_eq!(dict.lookup_pattern(259), None);
        assert_eq!(dict.lookup_pattern(256), None);
        assert_eq!(dict.lookup_pattern(257), None);
    }

    #[test]
    fn clear_resets_codes_and_chains() {
        let mut dict = Dictionary::new();
        let data = b"aaab";
        dict.add_pattern(data, Pattern::Run { start: 0, end: 1 });
        dict.add_pattern(data, Pattern::Run { start: 1, end: 3 });
        dict.clear();
        assert_eq!(dict.next_code(), FIRST_FREE_CODE);
        assert_eq!(
            dict.lookup_code(data, Pattern::Run { start: 0, end: 1 }),
            None
        );
        assert_eq!(dict.lookup_pattern(258), None);
        assert_eq!(dict.add_pattern(data, Pattern::Run { start: 2, end: 3 }), 258);
    }

    #[test]
    fn collisions_resolve_by_full_comparison() {
        let mut dict = Dictionary::new();
        // Enough two-byte runs to guarantee shared buckets among 8192.
        let data: Vec<u8> = (0..=255u8)
            .flat_map(|a| (0..=127u8).map(move |b| [a, b]))
            .flatten()
            .collect();
        let mut expected = Vec::new();
        let mut at = 0;
        while !dict.is_full() && at + 1 < data.len() {
            let code = dict.add_pattern(&data, Pattern::Run { start: at, end: at + 1 });
            expected.push((at, code));
            at += 2;
        }
        for &(start, code) in &expected {
            assert_eq!(
                dict.lookup_code(&data, Pattern::Run { start, end: start + 1 }),
                Some(code)
            );
        }
    }
}
