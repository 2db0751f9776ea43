//! Two-level binarization strategies
//!
//! Both strategies reduce a grayscale buffer to pure black (0) and pure
//! white (255) pixels; the choice is made via
//! [`DitherMode`](crate::config::DitherMode).

use image::{GrayImage, Luma};

/// Cutoff between "dark" and "light" for the simple strategy
const THRESHOLD: u8 = 128;

/// Binarize with a hard midpoint cut
///
/// Pixels below 128 become 0, the rest 255.
pub fn threshold_binarize(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let v = img.get_pixel(x, y)[0];
            let out = if v < THRESHOLD { 0 } else { 255 };
            output.put_pixel(x, y, Luma([out]));
        }
    }

    output
}

/// Binarize with Floyd-Steinberg error diffusion
///
/// Each pixel snaps to 0 or 255 and the quantization error is pushed onto
/// the unvisited neighbors with the classic 7/16, 3/16, 5/16, 1/16
/// weights, scanning left-to-right, top-to-bottom.
///
/// # Arguments
/// * `img` - Input grayscale image
///
/// # Returns
/// Binary image with the same dimensions
pub fn floyd_steinberg(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let w = width as usize;
    let h = height as usize;

    // Work in f32 so diffused error is not lost to rounding
    let mut work: Vec<f32> = img.as_raw().iter().map(|&v| v as f32).collect();
    let mut output = GrayImage::new(width, height);

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let old = work[idx];
            let new = if old < THRESHOLD as f32 { 0.0 } else { 255.0 };
            let error = old - new;
            output.put_pixel(x as u32, y as u32, Luma([new as u8]));

            if x + 1 < w {
                work[idx + 1] += error * 7.0 / 16.0;
            }
            if y + 1 < h {
                if x > 0 {
                    work[idx + w - 1] += error * 3.0 / 16.0;
                }
                work[idx + w] += error * 5.0 / 16.0;
                if x + 1 < w {
                    work[idx + w + 1] += error * 1.0 / 16.0;
                }
            }
        }
    }

    output
}
