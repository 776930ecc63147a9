//! Test fixtures: PNG images built in memory.

/// Encode an RGBA8 buffer as PNG
pub fn png_rgba(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(rgba).unwrap();
    }
    buf
}

/// Uniform opaque image
pub fn solid_png(width: u32, height: u32, rgb: (u8, u8, u8)) -> Vec<u8> {
    let pixel = [rgb.0, rgb.1, rgb.2, 255];
    png_rgba(width, height, &pixel.repeat((width * height) as usize))
}

/// Left half red, right half blue
pub fn split_png(width: u32, height: u32) -> Vec<u8> {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..height {
        for x in 0..width {
            if x < width / 2 {
                rgba.extend_from_slice(&[255, 0, 0, 255]);
            } else {
                rgba.extend_from_slice(&[0, 0, 255, 255]);
            }
        }
    }
    png_rgba(width, height, &rgba)
}

/// Query string for a 100 px wide image printed 100 mm wide on 60 mm
/// borderless sheets with 10 mm overlap: a 2x2 grid of 60 px tiles.
pub const TWO_BY_TWO: &str = "target_width=100&media_width=60&media_height=60&printable_width=60&printable_height=60&overlap=10";
