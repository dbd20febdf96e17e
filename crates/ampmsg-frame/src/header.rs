//! The single leading header byte.
//!
//! High nibble is the format version, low nibble the frame count. The count
//! nibble caps a message at 15 frames; this is a hard limit of the format.

use crate::error::{FrameError, Result};

/// Current format version.
pub const VERSION: u8 = 1;

/// Largest frame count the low nibble can hold.
pub const MAX_FRAMES: usize = 0x0F;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 1;

/// Decoded header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format version (high nibble).
    pub version: u8,
    /// Number of frames that follow (low nibble).
    pub count: u8,
}

impl Header {
    /// Header for `count` frames at the current version.
    pub fn new(count: usize) -> Result<Self> {
        if count > MAX_FRAMES {
            return Err(FrameError::TooManyFrames {
                count,
                max: MAX_FRAMES,
            });
        }
        Ok(Self {
            version: VERSION,
            count: count as u8,
        })
    }

    /// Pack into the wire byte.
    pub fn to_byte(self) -> u8 {
        (self.version << 4) | (self.count & 0x0F)
    }

    /// Split a wire byte into its nibbles. Does not validate the version.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            version: byte >> 4,
            count: byte & 0x0F,
        }
    }

    /// Returns true if this header's version is the one this crate speaks.
    pub fn is_supported(&self) -> bool {
        self.version == VERSION
    }
}
