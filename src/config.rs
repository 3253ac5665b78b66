// Fixed sizes, file names and viewer defaults.
use std::time::Duration;

/// Every persisted image is exactly this size.
pub const OUTPUT_WIDTH: u32 = 1920;
pub const OUTPUT_HEIGHT: u32 = 1080;

pub const OUTPUT_DIR: &str = "mosaic_textures";
pub const NORMAL_FILE: &str = "mosaic_normal_1920x1080.png";
pub const MASKED_FILE: &str = "mosaic_with_mask_1920x1080.png";
pub const REVERSE_FILE: &str = "mosaic_reverse_1920x1080.png";

pub const VIEWPORT_WIDTH: usize = 1280;
pub const VIEWPORT_HEIGHT: usize = 720;
pub const WINDOW_TITLE: &str = "Mosaic Textures Demo";

pub const FRAME_RATE: u32 = 60;
pub const CYCLE_INTERVAL: Duration = Duration::from_millis(100);

// Scroll speed is in pixels per rendered frame.
pub const INITIAL_SCROLL_SPEED: f32 = 2.0;
pub const SCROLL_SPEED_STEP: f32 = 0.5;
pub const MIN_SCROLL_SPEED: f32 = 0.1;
pub const MAX_SCROLL_SPEED: f32 = 20.0;

/// How the background layer moves under the masked overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ViewerMode {
    /// Flip between the normal and reverse mosaics every interval.
    #[default]
    Cycle,
    /// Scroll a normal/reverse/normal strip vertically, wrapping seamlessly.
    Scroll,
}

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub width: usize,
    pub height: usize,
    pub title: String,
    pub mode: ViewerMode,
    pub frame_rate: u32,
    pub cycle_interval: Duration,
    pub initial_speed: f32,
    pub speed_step: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub show_hud: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            mode: ViewerMode::default(),
            frame_rate: FRAME_RATE,
            cycle_interval: CYCLE_INTERVAL,
            initial_speed: INITIAL_SCROLL_SPEED,
            speed_step: SCROLL_SPEED_STEP,
            min_speed: MIN_SCROLL_SPEED,
            max_speed: MAX_SCROLL_SPEED,
            show_hud: false,
        }
    }
}

impl ViewerConfig {
    /// Time budget of one rendered frame.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_fps_budget() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.frame_budget(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn zero_fps_does_not_divide_by_zero() {
        let cfg = ViewerConfig { frame_rate: 0, ..ViewerConfig::default() };
        assert_eq!(cfg.frame_budget(), Duration::from_secs(1));
    }
}
