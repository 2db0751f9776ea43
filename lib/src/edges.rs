use image::{GrayImage, Luma};

/// Replace a grayscale buffer with its Sobel gradient-magnitude map
///
/// Sobel kernels:
/// Gx (horizontal):     Gy (vertical):
/// [-1  0  1]           [-1 -2 -1]
/// [-2  0  2]           [ 0  0  0]
/// [-1  0  1]           [ 1  2  1]
///
/// Gradients are computed on samples normalized to [0, 1]; the magnitude
/// `sqrt(Gx^2 + Gy^2)` is clamped to [0, 1] and rescaled to [0, 255].
/// Border pixels have no full 3x3 neighborhood and stay 0.
///
/// # Arguments
/// * `img` - Input grayscale image
///
/// # Returns
/// Edge map with the same dimensions as the input
pub fn sobel_magnitude(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    if width < 3 || height < 3 {
        return output;
    }

    for y in 1..(height - 1) {
        for x in 1..(width - 1) {
            // Get 3x3 neighborhood
            let nw = img.get_pixel(x - 1, y - 1)[0] as f32;
            let n  = img.get_pixel(x,     y - 1)[0] as f32;
            let ne = img.get_pixel(x + 1, y - 1)[0] as f32;
            let w  = img.get_pixel(x - 1, y    )[0] as f32;
            let e  = img.get_pixel(x + 1, y    )[0] as f32;
            let sw = img.get_pixel(x - 1, y + 1)[0] as f32;
            let s  = img.get_pixel(x,     y + 1)[0] as f32;
            let se = img.get_pixel(x + 1, y + 1)[0] as f32;

            let gx = (-nw + ne - 2.0 * w + 2.0 * e - sw + se) / 255.0;
            let gy = (-nw - 2.0 * n - ne + sw + 2.0 * s + se) / 255.0;

            let magnitude = (gx * gx + gy * gy).sqrt().clamp(0.0, 1.0);
            output.put_pixel(x, y, Luma([(magnitude * 255.0) as u8]));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_has_no_edges() {
        let img = GrayImage::from_pixel(16, 16, Luma([128]));
        let edges = sobel_magnitude(&img);
        for pixel in edges.pixels() {
            assert_eq!(pixel[0], 0);
        }
    }

    #[test]
    fn test_vertical_step_produces_edge() {
        // Left half black, right half white
        let mut img = GrayImage::new(16, 16);
        for y in 0..16 {
            for x in 8..16 {
                img.put_pixel(x, y, Luma([255]));
            }
        }

        let edges = sobel_magnitude(&img);
        // The step column saturates the gradient
        assert_eq!(edges.get_pixel(8, 8)[0], 255);
        // Far from the step there is nothing
        assert_eq!(edges.get_pixel(2, 8)[0], 0);
        assert_eq!(edges.get_pixel(13, 8)[0], 0);
    }

    #[test]
    fn test_borders_stay_zero() {
        let mut img = GrayImage::from_pixel(8, 8, Luma([0]));
        img.put_pixel(4, 4, Luma([255]));
        let edges = sobel_magnitude(&img);
        for x in 0..8 {
            assert_eq!(edges.get_pixel(x, 0)[0], 0);
            assert_eq!(edges.get_pixel(x, 7)[0], 0);
        }
        for y in 0..8 {
            assert_eq!(edges.get_pixel(0, y)[0], 0);
            assert_eq!(edges.get_pixel(7, y)[0], 0);
        }
    }

    #[test]
    fn test_degenerate_sizes_do_not_panic() {
        for (w, h) in [(1, 1), (2, 5), (5, 2)] {
            let img = GrayImage::new(w, h);
            let edges = sobel_magnitude(&img);
            assert_eq!(edges.dimensions(), (w, h));
        }
    }
}
