// Builds a fixed-size canvas by repeating one tile across it.
// Visual: the texture appears as a wallpaper grid. Forward order starts flush with
// the top-left corner; reverse order starts flush with the bottom-right corner, so
// the partially visible tiles end up on the opposite edges.

use image::{DynamicImage, RgbImage, imageops};

/// Traversal order for tile placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileOrder {
    /// Left-to-right, top-to-bottom from (0, 0).
    Forward,
    /// Right-to-left, bottom-to-top from (W - tw, H - th).
    Reverse,
}

/// Top-left offsets of every tile placement, in placement order.
///
/// Offsets may lie partly (or, for the last reverse step, wholly) outside the
/// canvas. Cropping is left to the placement itself.
pub fn placements(tile: (u32, u32), canvas: (u32, u32), order: TileOrder) -> Vec<(i64, i64)> {
    let (tw, th) = (i64::from(tile.0.max(1)), i64::from(tile.1.max(1)));
    let (w, h) = (i64::from(canvas.0), i64::from(canvas.1));

    let (xs, ys): (Vec<i64>, Vec<i64>) = match order {
        TileOrder::Forward => (
            (0..w).step_by(tw as usize).collect(),
            (0..h).step_by(th as usize).collect(),
        ),
        // Walk down from the flush position while the step stays above -tile.
        TileOrder::Reverse => (
            std::iter::successors(Some(w - tw), |x| Some(x - tw)).take_while(|x| *x > -tw).collect(),
            std::iter::successors(Some(h - th), |y| Some(y - th)).take_while(|y| *y > -th).collect(),
        ),
    };

    let mut out = Vec::with_capacity(xs.len() * ys.len());
    for &y in &ys {
        for &x in &xs {
            out.push((x, y));
        }
    }
    out
}

/// Tile `source` over a `size` canvas in the given order.
/// The source's RGB channels are copied; its alpha (if any) is ignored.
/// `source` is not modified; a new canvas is returned.
pub fn tile(source: &DynamicImage, size: (u32, u32), order: TileOrder) -> RgbImage {
    let texture = source.to_rgb8();
    let mut canvas = RgbImage::new(size.0, size.1);

    for (x, y) in placements(texture.dimensions(), size, order) {
        // `replace` clips against the canvas on every side, including negative offsets.
        imageops::replace(&mut canvas, &texture, x, y);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// A tile whose every pixel encodes its own (x, y) so we can tell
    /// which part of the tile landed where.
    fn coord_tile(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| Rgb([x as u8, y as u8, 7])))
    }

    #[test]
    fn forward_100px_tile_on_1080p_grid() {
        let p = placements((100, 100), (1920, 1080), TileOrder::Forward);
        assert_eq!(p.len(), 20 * 11);
        assert_eq!(p[0], (0, 0));
        assert_eq!(p[19], (1900, 0));
        assert_eq!(*p.last().unwrap(), (1900, 1000));
    }

    #[test]
    fn reverse_starts_flush_bottom_right_and_overshoots_once() {
        let p = placements((100, 100), (1920, 1080), TileOrder::Reverse);
        assert_eq!(p[0], (1820, 980));
        // 1820, 1720, ..., 20, -80 => 20 columns; 980, ..., -20 => 11 rows
        assert_eq!(p.len(), 20 * 11);
        assert_eq!(*p.last().unwrap(), (-80, -20));
    }

    #[test]
    fn oversized_tile_is_placed_once() {
        assert_eq!(placements((50, 50), (10, 10), TileOrder::Forward), vec![(0, 0)]);
        assert_eq!(placements((50, 50), (10, 10), TileOrder::Reverse), vec![(-40, -40)]);
    }

    #[test]
    fn forward_clips_the_far_edges() {
        let canvas = tile(&coord_tile(4, 3), (10, 7), TileOrder::Forward);
        assert_eq!(canvas.dimensions(), (10, 7));
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([0, 0, 7]));
        // Column 9 is x=1 inside the third tile; row 6 is y=0 inside the third row.
        assert_eq!(canvas.get_pixel(9, 6), &Rgb([1, 0, 7]));
    }

    #[test]
    fn reverse_clips_the_near_edges() {
        let canvas = tile(&coord_tile(4, 3), (10, 7), TileOrder::Reverse);
        // Bottom-right pixel is the tile's own bottom-right pixel (unclipped).
        assert_eq!(canvas.get_pixel(9, 6), &Rgb([3, 2, 7]));
        // x starts at 6, 2, -2 => column 0 is x=2 inside the tile; y starts at 4, 1, -2.
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([2, 2, 7]));
    }

    #[test]
    fn alpha_in_source_is_dropped() {
        let rgba = image::RgbaImage::from_pixel(2, 2, image::Rgba([9, 8, 7, 0]));
        let canvas = tile(&DynamicImage::ImageRgba8(rgba), (3, 3), TileOrder::Forward);
        assert!(canvas.pixels().all(|p| *p == Rgb([9, 8, 7])));
    }
}
