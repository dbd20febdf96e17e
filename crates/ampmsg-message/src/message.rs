use std::fmt;
use std::ops::Index;

use bytes::Bytes;
use serde::Serialize;

use crate::argument::Argument;
use crate::codec;
use crate::error::Result;

/// An ordered list of arguments.
///
/// Arguments are not validated when added; the 15-argument limit is checked
/// when the message is encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    args: Vec<Argument>,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a message from an ordered list of values.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Argument>,
    {
        args.into_iter().collect()
    }

    /// Decode a wire buffer, copying it once.
    pub fn decode(src: &[u8]) -> Result<Self> {
        codec::decode(src).map(|args| Self { args })
    }

    /// Decode a wire buffer without copying; blobs alias `src`.
    pub fn decode_bytes(src: Bytes) -> Result<Self> {
        codec::decode_bytes(src).map(|args| Self { args })
    }

    /// Append to the end.
    pub fn push_back(&mut self, arg: impl Into<Argument>) {
        self.args.push(arg.into());
    }

    /// Insert at the start.
    pub fn push_front(&mut self, arg: impl Into<Argument>) {
        self.args.insert(0, arg.into());
    }

    /// Remove from the end.
    pub fn pop_back(&mut self) -> Option<Argument> {
        self.args.pop()
    }

    /// Remove from the start.
    pub fn pop_front(&mut self) -> Option<Argument> {
        if self.args.is_empty() {
            None
        } else {
            Some(self.args.remove(0))
        }
    }

    /// Classify a serializable value and append it.
    pub fn push_serialize<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.args.push(Argument::from_serialize(value)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.args.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.args.iter()
    }

    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    pub fn args_mut(&mut self) -> &mut Vec<Argument> {
        &mut self.args
    }

    pub fn into_args(self) -> Vec<Argument> {
        self.args
    }

    /// Encode to the wire format.
    pub fn to_bytes(&self) -> Result<Bytes> {
        codec::encode(&self.args)
    }

    /// Exact wire size, computed without encoding.
    pub fn encoded_len(&self) -> Result<usize> {
        codec::encoded_len(&self.args)
    }

    /// One-line diagnostic summary, e.g. `<Message args=3 size=28>`.
    ///
    /// The size is reported even when the message has too many arguments to
    /// encode.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encoded_len() {
            Ok(size) => write!(f, "<Message args={} size={}>", self.args.len(), size),
            Err(_) => write!(f, "<Message args={} size=?>", self.args.len()),
        }
    }
}

impl<A> FromIterator<A> for Message
where
    A: Into<Argument>,
{
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<A> Extend<A> for Message
where
    A: Into<Argument>,
{
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        self.args.extend(iter.into_iter().map(Into::into));
    }
}

impl From<Vec<Argument>> for Message {
    fn from(args: Vec<Argument>) -> Self {
        Self { args }
    }
}

impl TryFrom<&[u8]> for Message {
    type Error = crate::error::MessageError;

    fn try_from(src: &[u8]) -> Result<Self> {
        Self::decode(src)
    }
}

impl TryFrom<Bytes> for Message {
    type Error = crate::error::MessageError;

    fn try_from(src: Bytes) -> Result<Self> {
        Self::decode_bytes(src)
    }
}

impl Index<usize> for Message {
    type Output = Argument;

    fn index(&self, index: usize) -> &Argument {
        &self.args[index]
    }
}

impl IntoIterator for Message {
    type Item = Argument;
    type IntoIter = std::vec::IntoIter<Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.into_iter()
    }
}

impl<'a> IntoIterator for &'a Message {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}
