use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the conversion core and the frame streamer
#[derive(Debug, Error)]
pub enum Error {
    /// Source image or video frame could not be decoded
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Video source could not be opened
    #[error("failed to open stream at {}: {reason}", path.display())]
    StreamOpen { path: PathBuf, reason: String },

    /// A zero-dimension buffer reached the quantizer
    ///
    /// Unreachable through [`preprocess`](crate::processor::preprocess),
    /// which clamps target dimensions to at least 1.
    #[error("cannot quantize an empty {width}x{height} buffer")]
    EmptyBuffer { width: u32, height: u32 },

    /// A processing parameter or ramp failed validation
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Reading or writing a stream source or output file failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
