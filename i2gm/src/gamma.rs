//! Power-law gamma correction via a 256-entry lookup table.
use image::DynamicImage;

/// Build the per-channel lookup table `round(255 * (i / 255) ^ (1 / gamma))`.
pub fn build_lut(gamma: f32) -> [u8; 256] {
    let inv = 1.0 / f64::from(gamma);
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (255.0 * (i as f64 / 255.0).powf(inv)).round() as u8;
    }
    lut
}

/// Apply gamma correction to every channel of the image. `gamma == 1.0` is a
/// no-op and returns the input unchanged.
pub fn apply(img: &DynamicImage, gamma: f32) -> DynamicImage {
    if gamma == 1.0 {
        return img.clone();
    }
    let lut = build_lut(gamma);
    match img {
        DynamicImage::ImageLuma8(gray) => {
            let mut out = gray.clone();
            for pixel in out.pixels_mut() {
                pixel.0[0] = lut[pixel.0[0] as usize];
            }
            DynamicImage::ImageLuma8(out)
        }
        other => {
            let mut out = other.to_rgb8();
            for pixel in out.pixels_mut() {
                for channel in &mut pixel.0 {
                    *channel = lut[*channel as usize];
                }
            }
            DynamicImage::ImageRgb8(out)
        }
    }
}
