use image::{GrayImage, Luma, RgbaImage};
use imageproc::filter::gaussian_blur_f32;

/// Blur radius used as the soft baseline for the sharpness blend
const SHARPNESS_SIGMA: f32 = 1.0;

/// Calculate luminance from an RGBA image using the standard formula
///
/// Formula: L = 0.2127*R + 0.7152*G + 0.0722*B
///
/// # Arguments
/// * `img` - Input RGBA image
///
/// # Returns
/// Grayscale image with luminance values
pub fn calculate_luminance(img: &RgbaImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let pixel = img.get_pixel(x, y);
            let r = pixel[0] as f32 / 255.0;
            let g = pixel[1] as f32 / 255.0;
            let b = pixel[2] as f32 / 255.0;

            // Standard luminance coefficients
            let luminance = 0.2127 * r + 0.7152 * g + 0.0722 * b;

            let lum_u8 = (luminance.clamp(0.0, 1.0) * 255.0) as u8;
            output.put_pixel(x, y, Luma([lum_u8]));
        }
    }

    output
}

/// Scale contrast about the midpoint
///
/// Each pixel becomes `128 + (v - 128) * factor`, clamped to [0, 255].
/// A factor of 1.0 leaves the buffer untouched.
///
/// # Arguments
/// * `img` - Input grayscale image
/// * `factor` - Contrast multiplier, > 0
///
/// # Returns
/// Contrast-adjusted image
pub fn adjust_contrast(img: &GrayImage, factor: f32) -> GrayImage {
    map_pixels(img, |v| 128.0 + (v - 128.0) * factor)
}

/// Scale brightness
///
/// Each pixel becomes `v * factor`, clamped to [0, 255]. A factor of 1.0
/// leaves the buffer untouched.
///
/// # Arguments
/// * `img` - Input grayscale image
/// * `factor` - Brightness multiplier, > 0
///
/// # Returns
/// Brightness-adjusted image
pub fn adjust_brightness(img: &GrayImage, factor: f32) -> GrayImage {
    map_pixels(img, |v| v * factor)
}

/// Blend between a blurred copy and the original, weighted by `factor`
///
/// `out = blur + (orig - blur) * factor`: 1.0 reproduces the original,
/// values above 1.0 sharpen, values below soften down to a plain blur at
/// 0. Callers skip this pass entirely at exactly 1.0 so the identity
/// holds bit-for-bit.
///
/// # Arguments
/// * `img` - Input grayscale image
/// * `factor` - Sharpness weight, > 0
///
/// # Returns
/// Sharpness-adjusted image
pub fn adjust_sharpness(img: &GrayImage, factor: f32) -> GrayImage {
    let (width, height) = img.dimensions();
    let blurred = gaussian_blur_f32(img, SHARPNESS_SIGMA);
    let mut output = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let orig = img.get_pixel(x, y)[0] as f32;
            let blur = blurred.get_pixel(x, y)[0] as f32;
            let v = blur + (orig - blur) * factor;
            output.put_pixel(x, y, Luma([v.clamp(0.0, 255.0) as u8]));
        }
    }

    output
}

/// Apply a scalar function to every pixel, clamped back to [0, 255]
fn map_pixels<F: Fn(f32) -> f32>(img: &GrayImage, f: F) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let v = img.get_pixel(x, y)[0] as f32;
            output.put_pixel(x, y, Luma([f(v).clamp(0.0, 255.0) as u8]));
        }
    }

    output
}
