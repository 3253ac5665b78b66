// Turns a mask image into the alpha channel of a canvas.
// Visual: where the mask is white/opaque the mosaic shows through, where it is
// black/transparent the mosaic is cut away, so the layer beneath becomes visible.

use crate::error::{Error, Result};
use image::{ColorType, DynamicImage, RgbImage, RgbaImage, imageops::FilterType};
use tracing::debug;

/// Resize `mask` to `base` and use it as `base`'s opacity.
///
/// Masks with an alpha channel contribute that channel; all others contribute
/// their luminance. RGB of `base` is kept untouched.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] if the mask's pixel format has neither an alpha
/// nor a luminance representation.
pub fn apply_mask(base: &RgbImage, mask: &DynamicImage) -> Result<RgbaImage> {
    let color = mask.color();
    let use_alpha = match color {
        ColorType::La8 | ColorType::Rgba8 | ColorType::La16 | ColorType::Rgba16 | ColorType::Rgba32F => true,
        ColorType::L8 | ColorType::Rgb8 | ColorType::L16 | ColorType::Rgb16 | ColorType::Rgb32F => false,
        other => return Err(Error::UnsupportedFormat(format!("{other:?}"))),
    };

    let (w, h) = base.dimensions();
    // Lanczos keeps the mask edges smooth when it is stretched to the canvas.
    let resized = mask.resize_exact(w, h, FilterType::Lanczos3);
    debug!(?color, use_alpha, from = ?(mask.width(), mask.height()), to = ?(w, h), "mask resized");

    let opacity: Vec<u8> = if use_alpha {
        resized.to_rgba8().pixels().map(|p| p[3]).collect()
    } else {
        resized.to_luma8().into_raw()
    };

    let mut out = RgbaImage::new(w, h);
    for ((dst, src), a) in out.pixels_mut().zip(base.pixels()).zip(opacity) {
        *dst = image::Rgba([src[0], src[1], src[2], a]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, Rgba};

    fn base() -> RgbImage {
        RgbImage::from_fn(16, 9, |x, y| Rgb([x as u8 * 10, y as u8 * 20, 99]))
    }

    #[test]
    fn opaque_luma_mask_keeps_rgb_and_sets_full_alpha() {
        let mask = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([255])));
        let out = apply_mask(&base(), &mask).unwrap();
        assert_eq!(out.dimensions(), (16, 9));
        for (o, b) in out.pixels().zip(base().pixels()) {
            assert_eq!([o[0], o[1], o[2]], b.0);
            assert_eq!(o[3], 255);
        }
    }

    #[test]
    fn transparent_rgba_mask_zeroes_alpha() {
        // White RGB but zero alpha: alpha wins over luminance.
        let mask = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 5, Rgba([255, 255, 255, 0])));
        let out = apply_mask(&base(), &mask).unwrap();
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn rgb_mask_uses_luminance() {
        let mask = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));
        let out = apply_mask(&base(), &mask).unwrap();
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn half_and_half_mask_splits_the_canvas() {
        let mask = GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 0 } else { 255 }]));
        let base = RgbImage::new(200, 10);
        let out = apply_mask(&base, &DynamicImage::ImageLuma8(mask)).unwrap();
        assert_eq!(out.get_pixel(0, 5)[3], 0);
        assert_eq!(out.get_pixel(199, 5)[3], 255);
    }
}
