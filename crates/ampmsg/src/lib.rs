//! Compact binary messages of blob, text and JSON arguments.
//!
//! ampmsg encodes an ordered list of up to 15 heterogeneous arguments into a
//! single self-describing buffer and decodes it back losslessly.
//!
//! # Crate Structure
//!
//! - [`frame`] — Header byte and length-prefixed opaque frames
//! - [`message`] — Argument classification, type tags and the `Message` type
//!
//! The common types are re-exported at the crate root.

/// Re-export frame types.
pub mod frame {
    pub use ampmsg_frame::*;
}

/// Re-export message types.
pub mod message {
    pub use ampmsg_message::*;
}

pub use ampmsg_message::{
    decode, decode_bytes, encode, Argument, CodecConfig, Kind, MalformedReason, Message,
    MessageError, Result, MAX_ARGS, VERSION,
};
