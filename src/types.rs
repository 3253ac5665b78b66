// Pixel containers shared by the bridge, the painter and the viewer.

/// What the window shows each frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Paint every pixel black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }
}

/// Channel count a surface was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb,  // 3 channels; alpha byte is always 0xFF
    Rgba, // 4 channels; alpha byte carries per-pixel opacity
}

/// A decoded image in the format the display side consumes.
/// Pixels are packed 0xAARRGGBB so opaque and translucent layers share one type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    pub width: usize,
    pub height: usize,
    pub layout: PixelLayout,
    pub pixels: Vec<u32>, // length = width * height
}

impl Surface {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Row `y` as a slice.
    #[inline]
    pub fn row(&self, y: usize) -> &[u32] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }
}

/// Pack 8-bit channels as 0xAARRGGBB.
#[inline]
pub fn pack_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split 0xAARRGGBB into (r, g, b, a).
#[inline]
pub fn unpack_argb(px: u32) -> (u8, u8, u8, u8) {
    (
        ((px >> 16) & 0xFF) as u8,
        ((px >> 8) & 0xFF) as u8,
        (px & 0xFF) as u8,
        (px >> 24) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack_agree() {
        let px = pack_argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(px, 0x7812_3456);
        assert_eq!(unpack_argb(px), (0x12, 0x34, 0x56, 0x78));
    }

    #[test]
    fn clear_blackens_frame() {
        let mut fb = FrameBuffer { width: 2, height: 1, pixels: vec![0x00FF_FFFF; 2] };
        fb.clear();
        assert_eq!(fb.pixels, vec![0, 0]);
    }
}
