// Live playback of the generated mosaics.
// What you SEE: a background layer (normal/reverse mosaic) under the masked
// mosaic, which never moves. The background either flips between the two
// variants (cycle) or scrolls through them continuously (scroll).
//
// Everything that changes over time lives in `ViewerState`; `Viewer::tick`
// is the only place it is mutated, so the state machine can be driven in
// tests without opening a window.

use crate::bridge::{scale_to, to_display};
use crate::config::{ViewerConfig, ViewerMode};
use crate::draw::{Drawer, blit, draw_text_5x7};
use crate::error::Error;
use crate::types::{FrameBuffer, PixelLayout, Surface};
use image::DynamicImage;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Terminated,
}

/// Inputs the loop understands, already decoded from keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    TogglePause,
    SpeedUp,
    SlowDown,
}

/// Mutable playback state, owned by the render loop.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    pub phase: Phase,
    /// Which background frame is shown (cycle mode).
    pub frame_index: usize,
    /// Top row of the visible window inside the strip (scroll mode).
    pub scroll_offset: f32,
    /// Pixels per frame, always within the configured bounds.
    pub scroll_speed: f32,
    /// Running time accumulated since the last background switch.
    pub since_switch: Duration,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            phase: Phase::Running,
            frame_index: 0,
            scroll_offset: 0.0,
            scroll_speed: config.initial_speed.clamp(config.min_speed, config.max_speed),
            since_switch: Duration::ZERO,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// Apply one command. Terminated is final; everything after it is ignored.
    pub fn handle(&mut self, command: Command, config: &ViewerConfig) {
        if self.is_terminated() {
            return;
        }
        match command {
            Command::Quit => {
                self.phase = Phase::Terminated;
                debug!("quit requested");
            }
            Command::TogglePause => {
                self.phase = match self.phase {
                    Phase::Running => Phase::Paused,
                    _ => Phase::Running,
                };
                info!(paused = (self.phase == Phase::Paused), "animation toggled");
            }
            Command::SpeedUp => {
                self.scroll_speed = (self.scroll_speed + config.speed_step).clamp(config.min_speed, config.max_speed);
                info!("scroll speed increased: {:.1} px/frame", self.scroll_speed);
            }
            Command::SlowDown => {
                self.scroll_speed = (self.scroll_speed - config.speed_step).clamp(config.min_speed, config.max_speed);
                info!("scroll speed decreased: {:.1} px/frame", self.scroll_speed);
            }
        }
    }
}

/// How the background layer evolves and gets painted.
pub trait Background {
    /// Move time forward by one frame that lasted `dt`. No-op unless running.
    fn advance(&self, state: &mut ViewerState, dt: Duration);

    /// Paint the visible background for `state` onto `screen`.
    fn paint(&self, state: &ViewerState, screen: &mut FrameBuffer);

    /// Whether the speed keys mean anything for this background.
    fn uses_speed(&self) -> bool {
        false
    }

    fn label(&self) -> &'static str;
}

/// Flips through a fixed list of full-screen frames every `interval`.
pub struct CycleBackground {
    frames: Vec<Surface>,
    interval: Duration,
}

impl CycleBackground {
    pub fn new(frames: Vec<Surface>, interval: Duration) -> Self {
        Self { frames, interval }
    }
}

impl Background for CycleBackground {
    fn advance(&self, state: &mut ViewerState, dt: Duration) {
        if state.phase != Phase::Running || self.frames.is_empty() {
            return;
        }
        state.since_switch += dt;
        if state.since_switch >= self.interval {
            state.frame_index = (state.frame_index + 1) % self.frames.len();
            state.since_switch = Duration::ZERO;
        }
    }

    fn paint(&self, state: &ViewerState, screen: &mut FrameBuffer) {
        if let Some(frame) = self.frames.get(state.frame_index) {
            blit(screen, frame, 0);
        }
    }

    fn label(&self) -> &'static str {
        "CYCLE"
    }
}

/// Scrolls a viewport-sized window down a `first, second, first` strip.
/// The third segment repeats the first so wrapping at 2x height is seamless.
pub struct ScrollBackground {
    strip: Surface,
    viewport_height: usize,
}

impl ScrollBackground {
    /// Both frames must already be viewport-sized.
    pub fn new(first: &Surface, second: &Surface) -> Self {
        let strip = build_strip(&[first, second, first]);
        Self { strip, viewport_height: first.height }
    }

    pub fn strip(&self) -> &Surface {
        &self.strip
    }
}

/// Stack equally sized surfaces top to bottom.
fn build_strip(parts: &[&Surface]) -> Surface {
    let width = parts.first().map_or(0, |s| s.width);
    let mut pixels = Vec::new();
    let mut height = 0;
    for part in parts {
        pixels.extend_from_slice(&part.pixels);
        height += part.height;
    }
    Surface { width, height, layout: PixelLayout::Rgb, pixels }
}

impl Background for ScrollBackground {
    fn advance(&self, state: &mut ViewerState, _dt: Duration) {
        if state.phase != Phase::Running {
            return;
        }
        state.scroll_offset += state.scroll_speed;
        // Overshoot past the wrap point is dropped, not carried.
        if state.scroll_offset >= (self.viewport_height * 2) as f32 {
            state.scroll_offset = 0.0;
        }
    }

    fn paint(&self, state: &ViewerState, screen: &mut FrameBuffer) {
        blit(screen, &self.strip, state.scroll_offset as usize);
    }

    fn uses_speed(&self) -> bool {
        true
    }

    fn label(&self) -> &'static str {
        "SCROLL"
    }
}

/// Sleeps out the remainder of each frame budget.
pub struct FrameLimiter {
    budget: Duration,
    last: Instant,
}

impl FrameLimiter {
    pub fn new(budget: Duration) -> Self {
        Self { budget, last: Instant::now() }
    }

    /// Block until one budget has passed since the previous call.
    /// Returns the real time the whole frame took.
    pub fn wait(&mut self) -> Duration {
        let spent = self.last.elapsed();
        if spent < self.budget {
            thread::sleep(self.budget - spent);
        }
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt
    }
}

pub struct Viewer {
    config: ViewerConfig,
    background: Box<dyn Background>,
    overlay: Surface,
    screen: FrameBuffer,
}

impl Viewer {
    /// Scale the three variants to the viewport and pick the background mode.
    /// `normal` and `reverse` form the background; `masked` is the overlay.
    pub fn new(config: ViewerConfig, normal: &DynamicImage, reverse: &DynamicImage, masked: &DynamicImage) -> Self {
        let (w, h) = (config.width, config.height);
        let fit = |img: &DynamicImage| scale_to(&to_display(img), w, h);
        let (normal, reverse, overlay) = (fit(normal), fit(reverse), fit(masked));

        let background: Box<dyn Background> = match config.mode {
            ViewerMode::Cycle => Box::new(CycleBackground::new(vec![normal, reverse], config.cycle_interval)),
            ViewerMode::Scroll => Box::new(ScrollBackground::new(&normal, &reverse)),
        };

        Self { screen: FrameBuffer::new(w, h), config, background, overlay }
    }

    /// One step of the state machine: advance time, then apply this frame's input.
    pub fn tick(&self, state: &mut ViewerState, commands: &[Command], dt: Duration) {
        self.background.advance(state, dt);
        for &command in commands {
            let speed_key = matches!(command, Command::SpeedUp | Command::SlowDown);
            if speed_key && !self.background.uses_speed() {
                continue;
            }
            state.handle(command, &self.config);
        }
    }

    /// Compose the frame for `state`: black, background, overlay, then HUD.
    pub fn render(&mut self, state: &ViewerState) -> &FrameBuffer {
        self.screen.clear();
        self.background.paint(state, &mut self.screen);
        blit(&mut self.screen, &self.overlay, 0);

        if self.config.show_hud {
            let hud = self.hud_text(state);
            draw_text_5x7(&mut self.screen, 8, 8, &hud, 0x00_FF_FF_FF);
        }
        &self.screen
    }

    fn hud_text(&self, state: &ViewerState) -> String {
        let status = if state.phase == Phase::Paused { "PAUSED" } else { "RUNNING" };
        if self.background.uses_speed() {
            format!("{} | {} | SPEED: {:.1}", self.background.label(), status, state.scroll_speed)
        } else {
            format!("{} | {}", self.background.label(), status)
        }
    }

    /// Open the window, play until quit, then close it again.
    ///
    /// # Errors
    ///
    /// Window creation or presentation failures; both end the session.
    pub fn run(&mut self) -> Result<ViewerState, Error> {
        let mut drawer = Drawer::new(&self.config.title, self.config.width, self.config.height)?;
        let mut state = ViewerState::new(&self.config);
        let mut limiter = FrameLimiter::new(self.config.frame_budget());
        let mut dt = Duration::ZERO;

        info!(mode = self.background.label(), "viewer started");
        if self.background.uses_speed() {
            println!("Controls: SPACE pause/resume, +/- speed, ESC quit");
        } else {
            println!("Controls: SPACE pause/resume, ESC quit");
        }

        while !state.is_terminated() {
            let commands = poll_commands(&drawer);
            self.tick(&mut state, &commands, dt);
            if state.is_terminated() {
                break;
            }
            drawer.present(self.render(&state))?;
            dt = limiter.wait();
        }

        drop(drawer);
        info!("viewer finished");
        Ok(state)
    }
}

/// Read this frame's keys into commands.
fn poll_commands(drawer: &Drawer) -> Vec<Command> {
    let mut commands = Vec::new();
    if !drawer.is_open() || drawer.esc_pressed() {
        commands.push(Command::Quit);
    }
    if drawer.space_pressed_once() {
        commands.push(Command::TogglePause);
    }
    if drawer.plus_pressed_once() {
        commands.push(Command::SpeedUp);
    }
    if drawer.minus_pressed_once() {
        commands.push(Command::SlowDown);
    }
    commands
}
