use crate::config::{DitherMode, ProcessingParams};
use crate::dither::{floyd_steinberg, threshold_binarize};
use crate::edges::sobel_magnitude;
use crate::error::Result;
use crate::filters::{adjust_brightness, adjust_contrast, adjust_sharpness, calculate_luminance};
use crate::quantize::{AsciiGrid, quantize};
use crate::ramp::CharRamp;
use image::{GrayImage, RgbaImage, imageops};
use std::path::Path;

/// Runs the photometric pipeline on a still image or decoded frame
///
/// Steps, in fixed order:
/// 1. Luminance conversion
/// 2. Contrast about the midpoint
/// 3. Brightness scaling
/// 4. Sharpness blend (skipped at exactly 1.0)
/// 5. Sobel edge map, if enabled
/// 6. Two-level dithering, if enabled
/// 7. Lanczos3 resize to the aspect-compensated target dimensions
///
/// Resizing runs last so every enhancement operates at source resolution;
/// the input buffer is never mutated.
///
/// # Arguments
/// * `input` - The source RGBA buffer
/// * `params` - Conversion parameters, validated before any work is done
///
/// # Returns
/// A grayscale buffer with dimensions `params.output_dimensions()`
pub fn preprocess(input: &RgbaImage, params: &ProcessingParams) -> Result<GrayImage> {
    params.validate()?;

    // Step 1: Extract luminance
    let mut gray = calculate_luminance(input);

    // Steps 2-4: Photometric enhancement at source resolution.
    // Identity factors are skipped so a 1.0 setting is a true no-op.
    if params.contrast != 1.0 {
        gray = adjust_contrast(&gray, params.contrast);
    }
    if params.brightness != 1.0 {
        gray = adjust_brightness(&gray, params.brightness);
    }
    if params.sharpness != 1.0 {
        gray = adjust_sharpness(&gray, params.sharpness);
    }

    // Step 5: Edge map replaces the buffer
    if params.edge_detection {
        gray = sobel_magnitude(&gray);
    }

    // Step 6: Binarize
    if params.dithering {
        gray = match params.dither_mode {
            DitherMode::Threshold => threshold_binarize(&gray),
            DitherMode::FloydSteinberg => floyd_steinberg(&gray),
        };
    }

    // Step 7: Resize last, Lanczos3 for quality
    let (out_width, out_height) = params.output_dimensions();
    Ok(imageops::resize(
        &gray,
        out_width,
        out_height,
        imageops::FilterType::Lanczos3,
    ))
}

/// Converts an RGBA buffer to an ASCII grid
///
/// Composes [`preprocess`] and [`quantize`]: the buffer is reduced to the
/// target dimensions and every pixel is mapped through the ramp.
///
/// # Arguments
/// * `input` - The source RGBA buffer
/// * `params` - Conversion parameters
/// * `ramp` - Character ramp, darkest glyph first
///
/// # Returns
/// The ASCII grid, sized `params.output_dimensions()`
pub fn convert_image(
    input: &RgbaImage,
    params: &ProcessingParams,
    ramp: &CharRamp,
) -> Result<AsciiGrid> {
    let gray = preprocess(input, params)?;
    quantize(&gray, ramp)
}

/// Decodes an image file and converts it to an ASCII grid
///
/// # Errors
/// Unsupported or corrupt input fails with the decode error; conversion
/// errors propagate from [`convert_image`].
pub fn convert_image_file<P: AsRef<Path>>(
    path: P,
    params: &ProcessingParams,
    ramp: &CharRamp,
) -> Result<AsciiGrid> {
    let input = image::open(path)?.to_rgba8();
    convert_image(&input, params, ramp)
}
