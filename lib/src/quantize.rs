use crate::error::{Error, Result};
use crate::ramp::CharRamp;
use image::GrayImage;
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::Path;

/// An immutable grid of characters, one per pixel of the quantized buffer
///
/// Rows are ordered top-to-bottom and characters within a row
/// left-to-right, matching the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiGrid {
    width: u32,
    height: u32,
    rows: Vec<String>,
}

impl AsciiGrid {
    /// Grid width in characters
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in rows
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Writes the grid to a plain-text file
    ///
    /// The file holds exactly the `Display` rendering: rows joined by
    /// `'\n'`, UTF-8, no header and no trailing newline, so reading the
    /// file back yields byte-identical text.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows.join("\n"))
    }
}

/// Map a grayscale buffer to a character grid through a ramp
///
/// Pure per-pixel lookup with no cross-pixel dependency: intensity `v`
/// selects ramp index `floor(v / 255 * (len - 1))`. The same buffer and
/// ramp always produce the same grid. Rows are converted in parallel.
///
/// # Arguments
/// * `gray` - Input grayscale buffer
/// * `ramp` - Character ramp, darkest glyph first
///
/// # Returns
/// The character grid, or `EmptyBuffer` if either dimension is 0
pub fn quantize(gray: &GrayImage, ramp: &CharRamp) -> Result<AsciiGrid> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyBuffer { width, height });
    }

    let rows: Vec<String> = (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .map(|x| ramp.char_for(gray.get_pixel(x, y)[0]))
                .collect()
        })
        .collect();

    Ok(AsciiGrid {
        width,
        height,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_quantize_dimensions_match_buffer() {
        let gray = GrayImage::new(7, 3);
        let grid = quantize(&gray, &CharRamp::default()).unwrap();
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.rows().len(), 3);
        assert!(grid.rows().iter().all(|r| r.chars().count() == 7));
    }

    #[test]
    fn test_quantize_is_deterministic() {
        let mut gray = GrayImage::new(9, 9);
        for (i, pixel) in gray.pixels_mut().enumerate() {
            *pixel = Luma([(i * 31 % 256) as u8]);
        }
        let ramp = CharRamp::default();
        let first = quantize(&gray, &ramp).unwrap();
        let second = quantize(&gray, &ramp).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_mid_gray_with_two_char_ramp() {
        // floor(128 / 255 * 1) = 0, so the whole grid is the dark glyph
        let gray = GrayImage::from_pixel(4, 4, Luma([128]));
        let ramp = CharRamp::new("@ ").unwrap();
        let grid = quantize(&gray, &ramp).unwrap();
        assert_eq!(grid.to_string(), "@@@@\n@@@@\n@@@@\n@@@@");
    }

    #[test]
    fn test_full_intensity_maps_to_last_ramp_char() {
        let gray = GrayImage::from_pixel(2, 1, Luma([255]));
        let ramp = CharRamp::new("@ ").unwrap();
        let grid = quantize(&gray, &ramp).unwrap();
        assert_eq!(grid.to_string(), "  ");
    }

    #[test]
    fn test_single_char_ramp_is_flat() {
        let mut gray = GrayImage::new(6, 4);
        for (i, pixel) in gray.pixels_mut().enumerate() {
            *pixel = Luma([(i * 11 % 256) as u8]);
        }
        let ramp = CharRamp::new("#").unwrap();
        let grid = quantize(&gray, &ramp).unwrap();

        let distinct: std::collections::HashSet<char> =
            grid.rows().iter().flat_map(|r| r.chars()).collect();
        assert_eq!(distinct.len(), 1);
    }

    #[test]
    fn test_row_and_column_order_preserved() {
        // Dark top-left pixel, bright bottom-right pixel
        let mut gray = GrayImage::from_pixel(2, 2, Luma([0]));
        gray.put_pixel(1, 1, Luma([255]));
        let ramp = CharRamp::new("@ ").unwrap();
        let grid = quantize(&gray, &ramp).unwrap();
        assert_eq!(grid.rows()[0], "@@");
        assert_eq!(grid.rows()[1], "@ ");
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        let gray = GrayImage::new(0, 5);
        let err = quantize(&gray, &CharRamp::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyBuffer { .. }));
    }

    #[test]
    fn test_save_round_trip_is_byte_identical() {
        let mut gray = GrayImage::new(5, 3);
        for (i, pixel) in gray.pixels_mut().enumerate() {
            *pixel = Luma([(i * 53 % 256) as u8]);
        }
        let grid = quantize(&gray, &CharRamp::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.txt");
        grid.save(&path).unwrap();

        let read_back = std::fs::read_to_string(&path).unwrap();
        assert_eq!(read_back, grid.to_string());
    }
}
