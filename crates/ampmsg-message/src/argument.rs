//! Argument values and the blob / text / structured classifier.
//!
//! Every argument is exactly one of three kinds, tested in a fixed order:
//! raw bytes are a blob, a string is text, anything else is structured data
//! carried as JSON text. A string is therefore stored verbatim and never
//! JSON-quoted.

use std::borrow::Cow;
use std::fmt;
use std::io;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{MalformedReason, MessageError, Result};

/// Size of the type tag that opens every argument frame.
pub const TAG_SIZE: usize = 2;

/// Tag for raw binary payloads.
pub const BLOB_TAG: [u8; TAG_SIZE] = *b"b:";

/// Tag for UTF-8 text payloads.
pub const TEXT_TAG: [u8; TAG_SIZE] = *b"s:";

/// Tag for JSON text payloads.
pub const JSON_TAG: [u8; TAG_SIZE] = *b"j:";

/// Wire kind of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Blob,
    Text,
    Structured,
}

impl Kind {
    /// The 2-byte ASCII tag written before the payload.
    pub const fn tag(self) -> [u8; TAG_SIZE] {
        match self {
            Kind::Blob => BLOB_TAG,
            Kind::Text => TEXT_TAG,
            Kind::Structured => JSON_TAG,
        }
    }

    /// Kind for a tag read off the wire.
    ///
    /// Anything other than `s:` or `j:` is a blob, including tags this
    /// version does not know. Decoding stays permissive so newer peers can
    /// add kinds without breaking older readers.
    pub fn from_tag(tag: &[u8]) -> Kind {
        if *tag == JSON_TAG {
            Kind::Structured
        } else if *tag == TEXT_TAG {
            Kind::Text
        } else {
            Kind::Blob
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Text => "text",
            Kind::Structured => "json",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// Raw bytes, passed through unchanged.
    Blob(Bytes),
    /// UTF-8 text, stored verbatim.
    Text(String),
    /// Any JSON value, including `null`.
    Structured(Value),
}

/// An argument's wire kind and payload bytes.
///
/// Blob and text payloads borrow from the argument; structured payloads own
/// their serialized JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified<'a> {
    pub kind: Kind,
    pub payload: Cow<'a, [u8]>,
}

impl Argument {
    /// The absent value, normalized to JSON `null`.
    pub fn null() -> Self {
        Argument::Structured(Value::Null)
    }

    /// Classify any serializable value.
    ///
    /// Values that serialize to a JSON string become [`Argument::Text`];
    /// everything else becomes [`Argument::Structured`]. Binary data has no
    /// JSON representation, so blobs must be built from `Bytes` or `Vec<u8>`
    /// directly.
    pub fn from_serialize<T>(value: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(value)
            .map(Argument::from)
            .map_err(MessageError::UnsupportedValue)
    }

    /// Wire kind this argument encodes as.
    pub fn kind(&self) -> Kind {
        match self {
            Argument::Blob(_) => Kind::Blob,
            Argument::Text(_) => Kind::Text,
            Argument::Structured(_) => Kind::Structured,
        }
    }

    /// Returns the bytes if this is a blob.
    pub fn as_blob(&self) -> Option<&Bytes> {
        match self {
            Argument::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the string if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Argument::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the JSON value if this is structured.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Argument::Structured(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true for the structured `null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Argument::Structured(Value::Null))
    }

    /// Wire kind and payload bytes for this argument.
    ///
    /// Only structured values allocate; the argument itself is never touched.
    pub fn classify(&self) -> Result<Classified<'_>> {
        let classified = match self {
            Argument::Blob(bytes) => Classified {
                kind: Kind::Blob,
                payload: Cow::Borrowed(bytes.as_ref()),
            },
            Argument::Text(text) => Classified {
                kind: Kind::Text,
                payload: Cow::Borrowed(text.as_bytes()),
            },
            Argument::Structured(value) => Classified {
                kind: Kind::Structured,
                payload: Cow::Owned(
                    serde_json::to_vec(value).map_err(MessageError::UnsupportedValue)?,
                ),
            },
        };
        Ok(classified)
    }

    /// Payload length in bytes, excluding the tag. Does not allocate.
    pub fn payload_len(&self) -> Result<usize> {
        match self {
            Argument::Blob(bytes) => Ok(bytes.len()),
            Argument::Text(text) => Ok(text.len()),
            Argument::Structured(value) => {
                let mut counter = ByteCounter(0);
                serde_json::to_writer(&mut counter, value)
                    .map_err(MessageError::UnsupportedValue)?;
                Ok(counter.0)
            }
        }
    }

    /// Rebuild an argument from a tagged frame.
    ///
    /// `index` is the argument's position, used only for error reporting.
    /// Blob payloads are slices of `frame` and share its allocation.
    pub fn unpack(index: usize, frame: Bytes) -> Result<Self> {
        if frame.len() < TAG_SIZE {
            return Err(MalformedReason::MissingTag {
                index,
                len: frame.len(),
            }
            .into());
        }

        let tag = &frame[..TAG_SIZE];
        let payload = frame.slice(TAG_SIZE..);

        match Kind::from_tag(tag) {
            Kind::Structured => serde_json::from_slice(&payload)
                .map(Argument::Structured)
                .map_err(|source| MalformedReason::InvalidJson { index, source }.into()),
            Kind::Text => Ok(Argument::Text(
                String::from_utf8_lossy(&payload).into_owned(),
            )),
            Kind::Blob => {
                if *tag != BLOB_TAG {
                    debug!(index, ?tag, "unrecognized argument tag, decoding as blob");
                }
                Ok(Argument::Blob(payload))
            }
        }
    }
}

struct ByteCounter(usize);

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl From<Bytes> for Argument {
    fn from(bytes: Bytes) -> Self {
        Argument::Blob(bytes)
    }
}

impl From<Vec<u8>> for Argument {
    fn from(bytes: Vec<u8>) -> Self {
        Argument::Blob(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Argument {
    fn from(bytes: &[u8]) -> Self {
        Argument::Blob(Bytes::copy_from_slice(bytes))
    }
}

impl From<String> for Argument {
    fn from(text: String) -> Self {
        Argument::Text(text)
    }
}

impl From<&str> for Argument {
    fn from(text: &str) -> Self {
        Argument::Text(text.to_owned())
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Argument::Text(text),
            other => Argument::Structured(other),
        }
    }
}

impl From<serde_json::Map<String, Value>> for Argument {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Argument::Structured(Value::Object(map))
    }
}

macro_rules! structured_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Argument {
                fn from(value: $ty) -> Self {
                    Argument::Structured(Value::from(value))
                }
            }
        )*
    };
}

structured_from!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl<T> From<Option<T>> for Argument
where
    T: Into<Argument>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Argument::null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn tags_are_ascii() {
        assert_eq!(Kind::Blob.tag(), [0x62, 0x3A]);
        assert_eq!(Kind::Text.tag(), [0x73, 0x3A]);
        assert_eq!(Kind::Structured.tag(), [0x6A, 0x3A]);
    }

    #[test]
    fn unknown_tags_are_blobs() {
        assert_eq!(Kind::from_tag(b"j:"), Kind::Structured);
        assert_eq!(Kind::from_tag(b"s:"), Kind::Text);
        assert_eq!(Kind::from_tag(b"b:"), Kind::Blob);
        assert_eq!(Kind::from_tag(b"n:"), Kind::Blob);
        assert_eq!(Kind::from_tag(b"s;"), Kind::Blob);
    }

    #[test]
    fn strings_are_text_not_json() {
        let arg = Argument::from(json!("foo"));
        assert_eq!(arg, Argument::Text("foo".into()));

        let classified = arg.classify().unwrap();
        assert_eq!(classified.kind, Kind::Text);
        assert_eq!(classified.payload.as_ref(), b"foo");
    }

    #[test]
    fn blob_and_text_payloads_are_borrowed() {
        let blob = Argument::from(vec![1u8, 2, 3]);
        assert!(matches!(blob.classify().unwrap().payload, Cow::Borrowed(_)));

        let text = Argument::from("hi");
        assert!(matches!(text.classify().unwrap().payload, Cow::Borrowed(_)));
    }

    #[test]
    fn structured_payload_is_json_text() {
        let arg = Argument::from(json!({ "foo": "bar" }));
        let classified = arg.classify().unwrap();
        assert_eq!(classified.kind, Kind::Structured);
        assert_eq!(classified.payload.as_ref(), br#"{"foo":"bar"}"#);
        assert_eq!(arg.payload_len().unwrap(), classified.payload.len());
    }

    #[test]
    fn absent_becomes_null() {
        let arg = Argument::from(None::<String>);
        assert!(arg.is_null());
        assert_eq!(arg.classify().unwrap().payload.as_ref(), b"null");
    }

    #[test]
    fn present_option_keeps_its_kind() {
        assert_eq!(Argument::from(Some("x")), Argument::Text("x".into()));
        assert_eq!(Argument::from(Some(5u8)), Argument::Structured(json!(5)));
    }

    #[test]
    fn from_serialize_classifies() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        assert_eq!(
            Argument::from_serialize("text").unwrap(),
            Argument::Text("text".into())
        );
        assert_eq!(
            Argument::from_serialize(&Point { x: 1, y: 2 }).unwrap(),
            Argument::Structured(json!({ "x": 1, "y": 2 }))
        );
        assert!(Argument::from_serialize(&()).unwrap().is_null());
    }

    #[test]
    fn from_serialize_rejects_non_string_keys() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), "pair");
        let err = Argument::from_serialize(&map).unwrap_err();
        assert!(matches!(err, MessageError::UnsupportedValue(_)));
    }

    #[test]
    fn unpack_dispatches_on_tag() {
        let text = Argument::unpack(0, Bytes::from_static(b"s:foo")).unwrap();
        assert_eq!(text, Argument::Text("foo".into()));

        let json = Argument::unpack(1, Bytes::from_static(br#"j:{"foo":"bar"}"#)).unwrap();
        assert_eq!(json, Argument::Structured(json!({ "foo": "bar" })));

        let blob = Argument::unpack(2, Bytes::from_static(b"b:bar")).unwrap();
        assert_eq!(blob, Argument::Blob(Bytes::from_static(b"bar")));
    }

    #[test]
    fn unpack_unknown_tag_keeps_raw_payload() {
        let frame = Bytes::from_static(b"x:\xff\xfe\x00");
        let arg = Argument::unpack(0, frame).unwrap();
        assert_eq!(arg, Argument::Blob(Bytes::from_static(b"\xff\xfe\x00")));
    }

    #[test]
    fn unpack_blob_shares_frame_allocation() {
        let frame = Bytes::from_static(b"b:shared");
        let arg = Argument::unpack(0, frame.clone()).unwrap();
        assert_eq!(arg.as_blob().unwrap().as_ptr(), frame[TAG_SIZE..].as_ptr());
    }

    #[test]
    fn unpack_rejects_short_frame() {
        let err = Argument::unpack(3, Bytes::from_static(b"s")).unwrap_err();
        assert!(matches!(
            err,
            MessageError::Malformed(MalformedReason::MissingTag { index: 3, len: 1 })
        ));
    }

    #[test]
    fn unpack_rejects_invalid_json() {
        let err = Argument::unpack(0, Bytes::from_static(b"j:{nope")).unwrap_err();
        assert!(matches!(
            err,
            MessageError::Malformed(MalformedReason::InvalidJson { index: 0, .. })
        ));
    }

    #[test]
    fn unpack_replaces_invalid_text() {
        let arg = Argument::unpack(0, Bytes::from_static(b"s:\xff\xc3\x28")).unwrap();
        assert_eq!(arg.as_text(), Some("\u{fffd}\u{fffd}("));
    }

    #[test]
    fn empty_payloads_unpack() {
        assert_eq!(
            Argument::unpack(0, Bytes::from_static(b"s:")).unwrap(),
            Argument::Text(String::new())
        );
        assert_eq!(
            Argument::unpack(0, Bytes::from_static(b"b:")).unwrap(),
            Argument::Blob(Bytes::new())
        );
    }
}
