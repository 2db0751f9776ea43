/// Basic example: convert a synthetic test image to an ASCII grid
///
/// Builds a radial gradient with a bright circle and prints the grid to
/// stdout with a couple of parameter variations.
use ascii_forge::{CharRamp, ProcessingParams, convert_image};
use image::{Rgba, RgbaImage};

fn main() {
    println!("ASCII Forge - Convert Example");
    println!("=============================\n");

    // Create a 160x160 test image: dark background, bright circle
    let width = 160;
    let height = 160;
    let mut img = RgbaImage::new(width, height);

    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 50.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            let color = if dist < radius {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([40, 40, 40, 255])
            };
            img.put_pixel(x, y, color);
        }
    }

    let params = ProcessingParams {
        target_width: 60,
        target_height: 60,
        ..Default::default()
    };
    let ramp = CharRamp::default();

    println!("Plain conversion ({}x{} chars):\n", params.output_dimensions().0, params.output_dimensions().1);
    let grid = convert_image(&img, &params, &ramp).expect("conversion failed");
    println!("{grid}\n");

    // Same image again with edges only
    let edge_params = ProcessingParams {
        edge_detection: true,
        ..params
    };
    println!("Edge detection:\n");
    let grid = convert_image(&img, &edge_params, &ramp).expect("conversion failed");
    println!("{grid}");
}
