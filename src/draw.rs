// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the composited mosaic layers.
// 2) Layer painting: opaque backgrounds and alpha-blended overlays.
// 3) A tiny 5x7 bitmap font to render the optional HUD line on top.

use crate::error::Error;
use crate::types::{FrameBuffer, PixelLayout, Surface};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::debug;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create the viewer window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        debug!(width, height, "display opened");
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Space toggles pause.
    pub fn space_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Space, KeyRepeat::No)
    }

    /// `+`, `=` (same key without shift) or keypad plus.
    pub fn plus_pressed_once(&self) -> bool {
        [Key::Equal, Key::NumPadPlus]
            .into_iter()
            .any(|k| self.window.is_key_pressed(k, KeyRepeat::No))
    }

    pub fn minus_pressed_once(&self) -> bool {
        [Key::Minus, Key::NumPadMinus]
            .into_iter()
            .any(|k| self.window.is_key_pressed(k, KeyRepeat::No))
    }
}

impl Drop for Drawer {
    fn drop(&mut self) {
        debug!("display closed");
    }
}

/* ---------- Layer painting ---------- */

/// Paint `src` onto `fb` with its row `src_y` at the top of the screen.
/// Rgb surfaces overwrite; Rgba surfaces blend by their alpha ("over").
/// Anything outside either buffer is skipped.
/// Visual: `src_y = 0` paints a full-screen layer; larger values show a lower window of a tall strip.
pub fn blit(fb: &mut FrameBuffer, src: &Surface, src_y: usize) {
    let w = fb.width.min(src.width);
    let rows = fb.height.min(src.height.saturating_sub(src_y));

    for y in 0..rows {
        let src_row = &src.row(src_y + y)[..w];
        let dst_row = &mut fb.pixels[y * fb.width..y * fb.width + w];
        match src.layout {
            PixelLayout::Rgb => {
                for (d, s) in dst_row.iter_mut().zip(src_row) {
                    *d = s & 0x00FF_FFFF;
                }
            }
            PixelLayout::Rgba => {
                for (d, s) in dst_row.iter_mut().zip(src_row) {
                    *d = blend_over(*d, *s);
                }
            }
        }
    }
}

/// Straight-alpha "over": `src` (0xAARRGGBB) on top of `dst` (0x00RRGGBB).
#[inline]
pub fn blend_over(dst: u32, src: u32) -> u32 {
    let a = src >> 24;
    if a == 0xFF {
        return src & 0x00FF_FFFF; // fully opaque: overlay wins
    }
    if a == 0 {
        return dst;               // fully transparent: keep what's below
    }
    let inv = 255 - a;
    let mix = |shift: u32| {
        let s = (src >> shift) & 0xFF;
        let d = (dst >> shift) & 0xFF;
        ((s * a + d * inv + 127) / 255) << shift
    };
    mix(16) | mix(8) | mix(0)
}

/* ---------- Software drawing: pixels, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/* ---------- 5x7 bitmap font (ASCII subset the HUD needs) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters for mode / state / speed words
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),

        // Punctuation: space, vertical bar, colon, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph appears with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass first, then the glyph itself on top.
        for (dx, dy, c) in [(1, 1, 0x0000_0000), (0, 0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + dx, y + ry as i32 + dy, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Each glyph is 5x7 with 1-pixel spacing; unknown characters leave a gap.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
