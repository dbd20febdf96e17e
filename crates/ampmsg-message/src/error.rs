use ampmsg_frame::FrameError;

/// Why a buffer could not be decoded as a message.
#[derive(Debug, thiserror::Error)]
pub enum MalformedReason {
    /// The outer framing is broken (short buffer, overrun, bad version).
    #[error(transparent)]
    Frame(FrameError),

    /// A frame is too short to carry its 2-byte type tag.
    #[error("argument {index} is {len} bytes, too short for a type tag")]
    MissingTag { index: usize, len: usize },

    /// A `j:` argument is not valid JSON text.
    #[error("argument {index} is not valid JSON: {source}")]
    InvalidJson {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while encoding or decoding messages.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// More arguments than the header's count nibble can describe.
    #[error("too many arguments ({count}, max {max})")]
    TooManyArguments { count: usize, max: usize },

    /// The buffer is not a well-formed message.
    #[error("malformed message: {0}")]
    Malformed(#[from] MalformedReason),

    /// A value could not be serialized as JSON.
    #[error("unsupported value: {0}")]
    UnsupportedValue(#[source] serde_json::Error),

    /// An argument payload exceeds the configured maximum size.
    #[error("argument {index} payload too large ({size} bytes, max {max})")]
    PayloadTooLarge {
        index: usize,
        size: usize,
        max: usize,
    },
}

impl MessageError {
    /// Returns true for errors raised while decoding malformed input.
    pub fn is_malformed(&self) -> bool {
        matches!(self, MessageError::Malformed(_))
    }
}

impl From<FrameError> for MessageError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::TooManyFrames { count, max } => {
                MessageError::TooManyArguments { count, max }
            }
            other => MessageError::Malformed(MalformedReason::Frame(other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, MessageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_frames_maps_to_too_many_arguments() {
        let err = MessageError::from(FrameError::TooManyFrames { count: 16, max: 15 });
        assert!(matches!(
            err,
            MessageError::TooManyArguments { count: 16, max: 15 }
        ));
        assert!(!err.is_malformed());
    }

    #[test]
    fn truncation_is_malformed() {
        let err = MessageError::from(FrameError::Truncated {
            needed: 1,
            available: 0,
        });
        assert!(err.is_malformed());
        assert_eq!(
            err.to_string(),
            "malformed message: truncated message (needed 1 bytes, 0 available)"
        );
    }
}
