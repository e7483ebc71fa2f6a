//! # GIF-flavored LZW encoder and decoder
//!
//! This crate implements exactly the LZW dialect used inside GIF image
//! data: an 8-bit alphabet, code widths growing from 9 to 12 bits packed
//! least significant bit first, a clear code of 256, a stop code of 257
//! and dictionary codes assigned sequentially from 258 up to 4095.
//!
//! Compression and decompression operate on whole buffers. Every call
//! builds its own dictionary and bit cursor, so independent calls may run
//! on separate threads without any synchronization.
//!
//! ```
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//! let compressed = giflzw::compress(data).unwrap();
//! let restored = giflzw::decompress(&compressed).unwrap();
//! assert_eq!(restored.as_slice(), &data[..]);
//! ```
//!
//! The [`gif`] module wraps compressed frames into a complete animated
//! GIF89a file, see [`gif::Gif`].

/// Alias for a LZW code point.
pub(crate) type Code = u16;

/// Width of the first code written after a dictionary reset.
pub(crate) const MIN_CODESIZE: u8 = 9;
/// Largest allowed code width.
pub(crate) const MAX_CODESIZE: u8 = 12;

/// Resets the dictionary on both ends.
pub(crate) const CLEAR_CODE: Code = 256;
/// Terminates the code stream.
pub(crate) const STOP_CODE: Code = 257;
/// First code handed out for a multi-byte pattern.
pub(crate) const FIRST_FREE_CODE: Code = 258;
/// Largest code value; reaching it forces a clear.
pub(crate) const MAX_CODE: Code = (1 << MAX_CODESIZE) - 1;

mod bits;
mod dict;

pub mod decode;
pub mod encode;
pub mod gif;

pub use self::decode::{decompress, LzwError};
pub use self::encode::compress;
