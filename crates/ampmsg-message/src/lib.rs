//! Type-tagged argument lists over AMP framing.
//!
//! A message is an ordered list of up to 15 arguments. Each argument is one of:
//! - A blob (`b:`), raw bytes passed through unchanged
//! - Text (`s:`), a UTF-8 string stored verbatim
//! - Structured data (`j:`), any JSON value including `null`
//!
//! Each argument travels as one `ampmsg-frame` frame whose first two bytes are
//! its type tag. Decoding is permissive about tags: anything it does not
//! recognize comes back as a blob.
//!
//! ```
//! use ampmsg_message::{Argument, Message};
//! use serde_json::json;
//!
//! let mut msg = Message::new();
//! msg.push_back("foo");
//! msg.push_back(json!({ "foo": "bar" }));
//! msg.push_back(b"bar".to_vec());
//!
//! let wire = msg.to_bytes().unwrap();
//! let decoded = Message::decode(&wire).unwrap();
//! assert_eq!(decoded[0], Argument::from("foo"));
//! assert_eq!(decoded.summary(), "<Message args=3 size=38>");
//! ```

pub mod argument;
pub mod codec;
pub mod error;
pub mod message;

pub use ampmsg_frame::{MAX_FRAMES as MAX_ARGS, VERSION};
pub use argument::{Argument, Classified, Kind, BLOB_TAG, JSON_TAG, TAG_SIZE, TEXT_TAG};
pub use codec::{
    decode, decode_bytes, decode_with_config, encode, encode_into, encode_with_config,
    encoded_len, CodecConfig, MAX_PAYLOAD_SIZE,
};
pub use error::{MalformedReason, MessageError, Result};
pub use message::Message;
