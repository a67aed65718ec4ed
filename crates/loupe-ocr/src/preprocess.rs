use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};

/// Grayscale, stretch contrast to the full range, then upscale by `factor`.
///
/// Pure and allocation-only, safe to run on any number of workers at once.
pub fn prepare_for_ocr(image: &RgbImage, factor: u32) -> GrayImage {
    let gray = imageops::grayscale(image);
    let stretched = stretch_contrast(gray);
    upscale(&stretched, factor)
}

/// Map the darkest pixel to 0 and the brightest to 255, linearly.
/// Flat images come back unchanged.
pub fn stretch_contrast(mut image: GrayImage) -> GrayImage {
    let (lo, hi) = image
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
    if hi <= lo {
        return image;
    }

    let range = u32::from(hi - lo);
    for pixel in image.pixels_mut() {
        pixel[0] = (u32::from(pixel[0] - lo) * 255 / range) as u8;
    }
    image
}

/// Bicubic (Catmull-Rom) resize by an integer factor
pub fn upscale(image: &GrayImage, factor: u32) -> GrayImage {
    if factor <= 1 {
        return image.clone();
    }
    let (width, height) = image.dimensions();
    imageops::resize(
        image,
        width * factor,
        height * factor,
        FilterType::CatmullRom,
    )
}
