// Converts decoded images into surfaces the window side can paint.
// What you get: a `Surface` with 0xAARRGGBB pixels, ready to blit.

use crate::types::{PixelLayout, Surface, pack_argb};
use image::{DynamicImage, RgbImage, RgbaImage};

/// Convert an image into a display surface.
/// RGB stays 3-channel, RGBA stays 4-channel; anything else (gray, 16-bit,
/// float, gray+alpha) is first normalized to RGB, dropping its alpha.
pub fn to_display(img: &DynamicImage) -> Surface {
    match img {
        DynamicImage::ImageRgb8(rgb) => from_rgb(rgb),
        DynamicImage::ImageRgba8(rgba) => from_rgba(rgba),
        other => from_rgb(&other.to_rgb8()),
    }
}

fn from_rgb(img: &RgbImage) -> Surface {
    let (w, h) = img.dimensions();
    Surface {
        width: w as usize,
        height: h as usize,
        layout: PixelLayout::Rgb,
        pixels: img.pixels().map(|p| pack_argb(p[0], p[1], p[2], 0xFF)).collect(),
    }
}

fn from_rgba(img: &RgbaImage) -> Surface {
    let (w, h) = img.dimensions();
    Surface {
        width: w as usize,
        height: h as usize,
        layout: PixelLayout::Rgba,
        pixels: img.pixels().map(|p| pack_argb(p[0], p[1], p[2], p[3])).collect(),
    }
}

/// Stretch a surface to `width` x `height` by nearest-neighbour sampling.
/// Visual: a 1920x1080 mosaic fills a 1280x720 window exactly.
pub fn scale_to(src: &Surface, width: usize, height: usize) -> Surface {
    if src.width == width && src.height == height {
        return src.clone();
    }
    let mut pixels = Vec::with_capacity(width * height);
    if src.width > 0 && src.height > 0 {
        for y in 0..height {
            let sy = y * src.height / height;
            let row = src.row(sy);
            for x in 0..width {
                pixels.push(row[x * src.width / width]);
            }
        }
    } else {
        pixels.resize(width * height, 0);
    }
    Surface { width, height, layout: src.layout, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, LumaA, Rgb, Rgba};

    #[test]
    fn rgb_passes_through_opaque() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])));
        let s = to_display(&img);
        assert_eq!(s.layout, PixelLayout::Rgb);
        assert_eq!(s.pixels, vec![0xFF01_0203; 4]);
    }

    #[test]
    fn rgba_keeps_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 4])));
        let s = to_display(&img);
        assert_eq!(s.layout, PixelLayout::Rgba);
        assert_eq!(s.pixels, vec![0x0401_0203]);
    }

    #[test]
    fn gray_alpha_is_normalized_to_rgb() {
        let img = DynamicImage::ImageLumaA8(image::ImageBuffer::from_pixel(1, 1, LumaA([50u8, 0])));
        let s = to_display(&img);
        assert_eq!(s.layout, PixelLayout::Rgb);
        assert_eq!(s.pixels, vec![0xFF32_3232]);

        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 1, Luma([7])));
        assert_eq!(to_display(&gray).layout, PixelLayout::Rgb);
    }

    #[test]
    fn downscale_picks_nearest_source_pixels() {
        let img = RgbImage::from_fn(4, 2, |x, _| Rgb([x as u8, 0, 0]));
        let s = scale_to(&from_rgb(&img), 2, 1);
        assert_eq!(s.pixels, vec![0xFF00_0000, 0xFF02_0000]);
    }
}
