use ampmsg_frame::{put_frame, put_header, FrameConfig, MAX_FRAME_SIZE};
use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::argument::{Argument, Classified, TAG_SIZE};
use crate::error::{MessageError, Result};

/// Largest payload a single argument can carry on the wire.
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - TAG_SIZE;

/// Configuration for the message codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum payload size per argument, excluding the tag. Default: the wire maximum.
    pub max_payload_size: usize,
}

impl CodecConfig {
    fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            max_frame_size: self.max_payload_size.saturating_add(TAG_SIZE),
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD_SIZE,
        }
    }
}

/// Encode `args` with the default configuration.
pub fn encode(args: &[Argument]) -> Result<Bytes> {
    encode_with_config(args, &CodecConfig::default())
}

/// Encode `args` into a freshly allocated buffer of exactly the wire size.
pub fn encode_with_config(args: &[Argument], config: &CodecConfig) -> Result<Bytes> {
    let mut dst = BytesMut::new();
    encode_into(args, &mut dst, config)?;
    Ok(dst.freeze())
}

/// Append the encoding of `args` to `dst`.
///
/// Every argument is classified before anything is written, so on error `dst`
/// is left as it was.
///
/// Wire format:
/// ```text
/// ┌──────────────────────┬─────────────────────────────────────────────┐
/// │ Header (1B)          │ Argument frame × argc                       │
/// │ version<<4 | argc    │ Length (4B BE) = len+2 │ Tag (2B) │ Payload  │
/// └──────────────────────┴─────────────────────────────────────────────┘
/// ```
pub fn encode_into(args: &[Argument], dst: &mut BytesMut, config: &CodecConfig) -> Result<()> {
    let mut out = BytesMut::new();
    put_header(args.len(), &mut out)?;

    let max = config.max_payload_size.min(MAX_PAYLOAD_SIZE);
    let classified = args
        .iter()
        .enumerate()
        .map(|(index, arg)| {
            let classified = arg.classify()?;
            let size = classified.payload.len();
            if size > max {
                return Err(MessageError::PayloadTooLarge { index, size, max });
            }
            Ok(classified)
        })
        .collect::<Result<Vec<Classified<'_>>>>()?;

    let total = ampmsg_frame::encoded_len(
        classified
            .iter()
            .map(|classified| TAG_SIZE + classified.payload.len()),
    );

    out.reserve(total - out.len());

    let frame_config = config.frame_config();
    for Classified { kind, payload } in &classified {
        put_frame(&[&kind.tag()[..], payload.as_ref()], &mut out, &frame_config)?;
    }

    trace!(args = args.len(), size = out.len(), "encoded message");
    dst.unsplit(out);
    Ok(())
}

/// Exact wire size of `args` without encoding them.
pub fn encoded_len(args: &[Argument]) -> Result<usize> {
    let sizes = args
        .iter()
        .map(|arg| arg.payload_len().map(|len| TAG_SIZE + len))
        .collect::<Result<Vec<_>>>()?;
    Ok(ampmsg_frame::encoded_len(sizes))
}

/// Decode a message, copying `src` once.
///
/// Decoded blobs share that single copy, so they stay valid after the caller
/// reuses or drops `src`.
pub fn decode(src: &[u8]) -> Result<Vec<Argument>> {
    decode_bytes(Bytes::copy_from_slice(src))
}

/// Decode a message without copying.
///
/// Decoded blobs are reference-counted slices of `src`.
pub fn decode_bytes(src: Bytes) -> Result<Vec<Argument>> {
    decode_with_config(src, &CodecConfig::default())
}

/// Decode a message with an explicit configuration.
pub fn decode_with_config(src: Bytes, config: &CodecConfig) -> Result<Vec<Argument>> {
    let frames = ampmsg_frame::decode_frames(&src, &config.frame_config())?;
    let args = frames
        .into_iter()
        .enumerate()
        .map(|(index, frame)| Argument::unpack(index, frame))
        .collect::<Result<Vec<_>>>()?;

    trace!(args = args.len(), size = src.len(), "decoded message");
    Ok(args)
}
