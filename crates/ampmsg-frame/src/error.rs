/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// More frames than the 4-bit count field can describe.
    #[error("too many frames ({count}, max {max})")]
    TooManyFrames { count: usize, max: usize },

    /// A frame exceeds the configured maximum size.
    #[error("frame too large ({size} bytes, max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// The buffer ended before the header or a declared frame was complete.
    #[error("truncated message (needed {needed} bytes, {available} available)")]
    Truncated { needed: usize, available: usize },

    /// The header carries a format version this crate does not speak.
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),
}

pub type Result<T> = std::result::Result<T, FrameError>;
