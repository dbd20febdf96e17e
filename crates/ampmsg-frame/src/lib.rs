//! Versioned, length-prefixed frame lists for AMP messages.
//!
//! This is the outer layer of the AMP wire format. A message is:
//! - A 1-byte header: format version in the high nibble, frame count in the low nibble
//! - `count` frames, each a 4-byte big-endian length followed by that many opaque bytes
//!
//! Frames are opaque here. Typing them is the job of `ampmsg-message`.

pub mod codec;
pub mod error;
pub mod header;

pub use codec::{
    decode_frames, encode_frames, encoded_len, put_frame, put_header, FrameConfig, LENGTH_SIZE,
    MAX_FRAME_SIZE,
};
pub use error::{FrameError, Result};
pub use header::{Header, HEADER_SIZE, MAX_FRAMES, VERSION};
