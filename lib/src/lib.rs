//! ASCII Forge - image and video-frame to ASCII art conversion core
//!
//! The pipeline runs a deterministic sequence of photometric transforms
//! (luminance, contrast, brightness, sharpness, optional edge detection
//! and dithering, aspect-compensated Lanczos resize) and then maps every
//! pixel through an ordered character ramp. A looping frame streamer
//! applies the same pipeline to a decoded video stream on a background
//! worker.
//!
//! # Example
//! ```no_run
//! use ascii_forge::{CharRamp, ProcessingParams, convert_image_file};
//!
//! let params = ProcessingParams {
//!     target_width: 120,
//!     target_height: 120,
//!     ..Default::default()
//! };
//! let grid = convert_image_file("photo.jpg", &params, &CharRamp::default())?;
//! println!("{grid}");
//! # Ok::<(), ascii_forge::Error>(())
//! ```

pub mod config;
pub mod dither;
pub mod edges;
pub mod error;
pub mod filters;
pub mod processor;
pub mod quantize;
pub mod ramp;
pub mod sources;
pub mod stream;

// Re-export main types for convenience
pub use config::{DEFAULT_ASPECT_RATIO, DitherMode, ProcessingParams};
pub use error::{Error, Result};
pub use processor::{convert_image, convert_image_file, preprocess};
pub use quantize::{AsciiGrid, quantize};
pub use ramp::{CharRamp, DEFAULT_RAMP};
pub use sources::ImageFolderSource;
pub use stream::{FrameSink, FrameSource, FrameStreamer};
