use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::error::{FrameError, Result};
use crate::header::{Header, HEADER_SIZE};

/// Size of the per-frame length field.
pub const LENGTH_SIZE: usize = 4;

/// Largest frame length the 32-bit length field can declare.
pub const MAX_FRAME_SIZE: usize = u32::MAX as usize;

/// Configuration for the frame codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Maximum declared frame length in bytes. Default: the wire maximum.
    pub max_frame_size: usize,
}

impl FrameConfig {
    fn limit(&self) -> usize {
        self.max_frame_size.min(MAX_FRAME_SIZE)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

/// Exact wire size of a message whose frames have the given lengths.
pub fn encoded_len<I>(frame_sizes: I) -> usize
where
    I: IntoIterator<Item = usize>,
{
    frame_sizes
        .into_iter()
        .fold(HEADER_SIZE, |acc, size| acc + LENGTH_SIZE + size)
}

/// Write the header byte for `count` frames.
pub fn put_header(count: usize, dst: &mut BytesMut) -> Result<()> {
    let header = Header::new(count)?;
    dst.put_u8(header.to_byte());
    Ok(())
}

/// Write one frame made of `parts` laid end to end.
///
/// The declared length is the sum of the part lengths. Splitting a frame into
/// parts lets callers prepend a prefix without first concatenating it.
///
/// Wire format:
/// ```text
/// ┌────────────────┬──────────────────────────┐
/// │ Length (4B BE) │ parts[0] parts[1] ...    │
/// └────────────────┴──────────────────────────┘
/// ```
pub fn put_frame(parts: &[&[u8]], dst: &mut BytesMut, config: &FrameConfig) -> Result<()> {
    let size: usize = parts.iter().map(|part| part.len()).sum();
    if size > config.limit() {
        return Err(FrameError::FrameTooLarge {
            size,
            max: config.limit(),
        });
    }
    dst.reserve(LENGTH_SIZE + size);
    dst.put_u32(size as u32);
    for part in parts {
        dst.put_slice(part);
    }
    Ok(())
}

/// Encode a complete message from opaque frames.
///
/// The output is allocated once at its exact final size.
pub fn encode_frames(frames: &[&[u8]], config: &FrameConfig) -> Result<Bytes> {
    let total = encoded_len(frames.iter().map(|frame| frame.len()));
    let mut dst = BytesMut::with_capacity(total);
    put_header(frames.len(), &mut dst)?;
    for &frame in frames {
        put_frame(&[frame], &mut dst, config)?;
    }
    trace!(frames = frames.len(), size = dst.len(), "encoded frames");
    Ok(dst.freeze())
}

/// Decode a complete message into its frames.
///
/// Each returned frame is a zero-copy slice of `src`. Either every declared
/// frame is returned or an error is; there is no partial result. Bytes after
/// the last declared frame are ignored.
pub fn decode_frames(src: &Bytes, config: &FrameConfig) -> Result<Vec<Bytes>> {
    let Some(&byte) = src.first() else {
        return Err(FrameError::Truncated {
            needed: HEADER_SIZE,
            available: 0,
        });
    };

    let header = Header::from_byte(byte);
    if !header.is_supported() {
        return Err(FrameError::UnsupportedVersion(header.version));
    }

    let mut frames = Vec::with_capacity(header.count as usize);
    let mut offset = HEADER_SIZE;

    for _ in 0..header.count {
        let body_start = offset + LENGTH_SIZE;
        if src.len() < body_start {
            return Err(FrameError::Truncated {
                needed: body_start,
                available: src.len(),
            });
        }

        let mut field = &src[offset..body_start];
        let size = field.get_u32() as usize;
        if size > config.limit() {
            return Err(FrameError::FrameTooLarge {
                size,
                max: config.limit(),
            });
        }

        if size > src.len() - body_start {
            return Err(FrameError::Truncated {
                needed: body_start + size,
                available: src.len(),
            });
        }

        let body_end = body_start + size;
        frames.push(src.slice(body_start..body_end));
        offset = body_end;
    }

    if offset < src.len() {
        debug!(
            trailing = src.len() - offset,
            "ignoring bytes after last declared frame"
        );
    }
    trace!(frames = frames.len(), size = offset, "decoded frames");

    Ok(frames)
}
