//! GIF89a container framing.
//!
//! Writes the header, the logical screen descriptor with a 256-entry
//! global color table, a NETSCAPE2.0 looping extension, one graphic
//! control extension plus image descriptor per frame, the image data as
//! length-prefixed sub-blocks, and the trailer. All of it is plain binary
//! layout; the compression itself lives in [`encode`].
//!
//! ```
//! use giflzw::gif::{Frame, Gif, GifDesc};
//!
//! let desc = GifDesc {
//!     width: 2,
//!     height: 2,
//!     delay: 10,
//!     palette: [[0; 3]; 256],
//! };
//! let mut gif = Gif::begin(Vec::new(), &desc).unwrap();
//! gif.add_frame(&Frame { palette: None, indices: &[0, 1, 1, 0] }).unwrap();
//! let bytes = gif.end().unwrap();
//! assert_eq!(&bytes[..6], b"GIF89a");
//! ```
//!
//! [`encode`]: ../encode/index.html

use core::fmt;
use std::io::{self, Write};

use crate::encode;
use crate::LzwError;

/// 256 RGB triples.
pub type Palette = [[u8; 3]; 256];

/// Frames always use the full 8-bit index alphabet, so the stored
/// minimum code size is fixed.
const MIN_CODE_SIZE: u8 = 8;

/// Sub-blocks carry at most 255 payload bytes.
const BLOCK_SIZE: usize = 255;

/// Global parameters of one GIF file.
pub struct GifDesc {
    pub width: u16,
    pub height: u16,
    /// Delay between frames, in hundredths of a second.
    pub delay: u16,
    /// Global color table; index 0 doubles as the background color.
    pub palette: Palette,
}

/// One frame of color-table indices covering the whole logical screen.
pub struct Frame<'a> {
    /// Local color table overriding the global one for this frame.
    pub palette: Option<&'a Palette>,
    /// `width * height` palette indices, row major.
    pub indices: &'a [u8],
}

/// Errors surfaced by the frame writer.
#[derive(Debug)]
pub enum GifError {
    Io(io::Error),
    Lzw(LzwError),
    /// The frame's index buffer does not cover the logical screen.
    FrameSize { expected: usize, actual: usize },
}

impl fmt::Display for GifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GifError::Io(err) => write!(f, "write to sink failed: {}", err),
            GifError::Lzw(err) => write!(f, "frame compression failed: {}", err),
            GifError::FrameSize { expected, actual } => write!(
                f,
                "frame has {} indices, logical screen needs {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for GifError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GifError::Io(err) => Some(err),
            GifError::Lzw(err) => Some(err),
            GifError::FrameSize { .. } => None,
        }
    }
}

impl From<io::Error> for GifError {
    fn from(err: io::Error) -> Self {
        GifError::Io(err)
    }
}

impl From<LzwError> for GifError {
    fn from(err: LzwError) -> Self {
        GifError::Lzw(err)
    }
}

/// An animated GIF file in the process of being written.
///
/// Created with [`begin`], fed with [`add_frame`], finished with
/// [`end`]. Dropping it without `end` leaves the sink without a trailer.
///
/// [`begin`]: #method.begin
/// [`add_frame`]: #method.add_frame
/// [`end`]: #method.end
pub struct Gif<W: Write> {
    writer: W,
    width: u16,
    height: u16,
    delay: u16,
}

impl<W: Write> Gif<W> {
    /// Write the header, logical screen descriptor, global color table
    /// and looping extension.
    pub fn begin(mut writer: W, desc: &GifDesc) -> Result<Self, GifError> {
        writer.write_all(b"GIF89a")?;
        writer.write_all(&desc.width.to_le_bytes())?;
        writer.write_all(&desc.height.to_le_bytes())?;
        // Global color table present, 8 bits per channel, unsorted,
        // 256 entries; background is palette index 0; no aspect ratio.
        writer.write_all(&[0xf7, 0x00, 0x00])?;
        for rgb in desc.palette.iter() {
            writer.write_all(rgb)?;
        }
        // NETSCAPE2.0 application extension: loop forever.
        writer.write_all(&[0x21, 0xff, 0x0b])?;
        writer.write_all(b"NETSCAPE2.0")?;
        writer.write_all(&[0x03, 0x01, 0x00, 0x00, 0x00])?;

        Ok(Gif {
            writer,
            width: desc.width,
            height: desc.height,
            delay: desc.delay,
        })
    }

    /// Compress and append one frame.
    pub fn add_frame(&mut self, frame: &Frame<'_>) -> Result<(), GifError> {
        let expected = usize::from(self.width) * usize::from(self.height);
        if frame.indices.len() != expected {
            return Err(GifError::FrameSize {
                expected,
                actual: frame.indices.len(),
            });
        }

        // Graphic control extension: no disposal, no transparency.
        self.writer.write_all(&[0x21, 0xf9, 0x04, 0x00])?;
        self.writer.write_all(&self.delay.to_le_bytes())?;
        self.writer.write_all(&[0x00, 0x00])?;

        // Image descriptor at the origin, covering the logical screen.
        self.writer.write_all(&[0x2c])?;
        self.writer.write_all(&[0x00, 0x00, 0x00, 0x00])?;
        self.writer.write_all(&self.width.to_le_bytes())?;
        self.writer.write_all(&self.height.to_le_bytes())?;
        match frame.palette {
            Some(palette) => {
                // Local color table present, 256 entries.
                self.writer.write_all(&[0x87])?;
                for rgb in palette.iter() {
                    self.writer.write_all(rgb)?;
                }
            }
            None => self.writer.write_all(&[0x00])?,
        }

        let compressed = encode::compress(frame.indices)?;
        self.writer.write_all(&[MIN_CODE_SIZE])?;
        for block in compressed.chunks(BLOCK_SIZE) {
            self.writer.write_all(&[block.len() as u8])?;
            self.writer.write_all(block)?;
        }
        self.writer.write_all(&[0x00])?;
        Ok(())
    }

    /// Write the trailer and hand the sink back.
    pub fn end(mut self) -> Result<W, GifError> {
        self.writer.write_all(&[0x3b])?;
        Ok(self.writer)
    }
}
