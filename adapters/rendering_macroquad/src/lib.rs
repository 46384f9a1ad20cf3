#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Tile Arena.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Enable this crate's `audio` feature to play sound
//! cues; without it every cue is reported as unavailable.

mod audio;

use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton};
use tile_arena_core::ActorKind;
use tile_arena_rendering::{
    ActorPresentation, ButtonPresentation, FrameControl, FrameInput, Presentation,
    RenderingBackend, Scene, Screen, TextPresentation, TileGridPresentation,
};

use self::audio::SoundBank;

/// Directory searched for sound clips unless configured otherwise.
pub const DEFAULT_SOUND_DIRECTORY: &str = "assets/sounds";

const GRID_LINE_THICKNESS: f32 = 1.0;
const ACTOR_OUTLINE_THICKNESS: f32 = 2.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    muted: bool,
    sound_directory: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            muted: false,
            sound_directory: PathBuf::from(DEFAULT_SOUND_DIRECTORY),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether sound cues are silenced.
    #[must_use]
    pub fn with_mute(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Configures the directory sound clips are loaded from.
    #[must_use]
    pub fn with_sound_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.sound_directory = directory.into();
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

#[cfg(feature = "audio")]
type Clip = macroquad::audio::Sound;
#[cfg(not(feature = "audio"))]
type Clip = ();

#[cfg(feature = "audio")]
fn read_clip(path: &Path) -> Result<Vec<u8>> {
    use anyhow::Context;

    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(not(feature = "audio"))]
fn read_clip(path: &Path) -> Result<Clip> {
    anyhow::bail!(
        "audio support is not compiled in; cannot play {}",
        path.display()
    )
}

#[cfg(feature = "audio")]
fn play_clip(clip: &Clip) {
    macroquad::audio::play_sound_once(*clip);
}

#[cfg(not(feature = "audio"))]
fn play_clip(_clip: &Clip) {}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            muted,
            sound_directory,
        } = self;

        let Presentation {
            window_title,
            width,
            height,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(width)?,
            window_height: i32::try_from(height)?,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let clips = SoundBank::load(&sound_directory, muted, read_clip);

        macroquad::Window::from_config(config, async move {
            #[cfg(feature = "audio")]
            let clips = audio::decode(clips).await;

            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();

            loop {
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input();

                let control = update_scene(frame_dt, frame_input, &mut scene);

                for cue in scene.sound_cues.drain(..) {
                    let _ = clips.trigger(cue, play_clip);
                }

                draw_scene(&scene);

                let fps_metrics = fps_counter.record_frame(frame_dt);
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                    }) = fps_metrics
                    {
                        log::info!("FPS: {per_second:.2} (10s avg: {trailing_ten_seconds:.2})");
                    }
                }

                if control == FrameControl::Exit {
                    log::debug!("closing window on request");
                    break;
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn gather_frame_input() -> FrameInput {
    let (cursor_x, cursor_y) = mouse_position();
    gather_frame_input_from_observations(
        Vec2::new(cursor_x, cursor_y),
        is_mouse_button_pressed(MouseButton::Left),
        is_key_pressed(KeyCode::Escape),
    )
}

/// Builds the frame input from raw observations of the window.
///
/// The window is never scaled, so screen coordinates are world pixels.
#[doc(hidden)]
#[must_use]
pub fn gather_frame_input_from_observations(
    cursor_position: Vec2,
    left_click: bool,
    escape_pressed: bool,
) -> FrameInput {
    FrameInput {
        click: left_click.then_some(cursor_position),
        escape_pressed,
    }
}

fn draw_scene(scene: &Scene) {
    macroquad::window::clear_background(to_macroquad_color(scene.background));

    match &scene.screen {
        Screen::Menu { title, buttons } => {
            draw_centered_text(title);
            for button in buttons {
                draw_button(button);
            }
        }
        Screen::Playing { grid, actors } => {
            draw_tile_grid(grid);
            draw_actors(actors);
        }
        Screen::GameOver { headline, hint } => {
            draw_centered_text(headline);
            draw_centered_text(hint);
        }
    }
}

fn draw_tile_grid(grid: &TileGridPresentation) {
    let color = to_macroquad_color(grid.line_color);

    for x in grid.vertical_lines() {
        macroquad::shapes::draw_line(x, 0.0, x, grid.height, GRID_LINE_THICKNESS, color);
    }

    for y in grid.horizontal_lines() {
        macroquad::shapes::draw_line(0.0, y, grid.width, y, GRID_LINE_THICKNESS, color);
    }
}

fn draw_actors(actors: &[ActorPresentation]) {
    for actor in actors {
        let min = actor.bounds.min();
        let size = actor.bounds.size();
        macroquad::shapes::draw_rectangle(
            min.x,
            min.y,
            size.x,
            size.y,
            to_macroquad_color(actor.frame_color()),
        );

        let outline = match actor.kind {
            ActorKind::Player => macroquad::color::WHITE,
            ActorKind::Enemy => macroquad::color::BLACK,
        };
        macroquad::shapes::draw_rectangle_lines(
            min.x,
            min.y,
            size.x,
            size.y,
            ACTOR_OUTLINE_THICKNESS,
            outline,
        );
    }
}

fn draw_button(button: &ButtonPresentation) {
    let min = button.bounds.min();
    let size = button.bounds.size();
    macroquad::shapes::draw_rectangle(
        min.x,
        min.y,
        size.x,
        size.y,
        to_macroquad_color(button.fill),
    );
    draw_centered_text(&button.label);
}

fn draw_centered_text(text: &TextPresentation) {
    let font_size = text.font_size.max(1.0) as u16;
    let dimensions = macroquad::text::measure_text(&text.text, None, font_size, 1.0);
    let origin = centered_text_origin(
        text.center,
        Vec2::new(dimensions.width, dimensions.height),
        dimensions.offset_y,
    );
    let _ = macroquad::text::draw_text(
        &text.text,
        origin.x,
        origin.y,
        text.font_size,
        to_macroquad_color(text.color),
    );
}

/// Baseline origin that centers a text box of `size` on `center`.
///
/// `baseline_offset` is the distance from the top of the box to the baseline.
fn centered_text_origin(center: Vec2, size: Vec2, baseline_offset: f32) -> Vec2 {
    Vec2::new(
        center.x - size.x / 2.0,
        center.y - size.y / 2.0 + baseline_offset,
    )
}

fn to_macroquad_color(color: tile_arena_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        let frame = Duration::from_millis(250);

        assert!(counter.record_frame(frame).is_none());
        assert!(counter.record_frame(frame).is_none());
        assert!(counter.record_frame(frame).is_none());
        let metrics = counter.record_frame(frame).expect("one second elapsed");

        assert!((metrics.per_second - 4.0).abs() < 1e-4);
        assert!((metrics.trailing_ten_seconds - 4.0).abs() < 1e-4);
        assert!(counter.record_frame(frame).is_none());
    }

    #[test]
    fn fps_counter_trims_trailing_window_to_ten_seconds() {
        let mut counter = FpsCounter::default();
        for _ in 0..11 {
            let _ = counter.record_frame(Duration::from_secs(1));
        }

        assert_eq!(counter.frame_times.len(), 10);
        assert_eq!(counter.window_duration, Duration::from_secs(10));
    }

    #[test]
    fn text_origin_centers_box_and_offsets_to_baseline() {
        let origin = centered_text_origin(Vec2::new(400.0, 300.0), Vec2::new(120.0, 20.0), 16.0);
        assert_eq!(origin, Vec2::new(340.0, 306.0));
    }

    #[test]
    fn default_backend_reads_sounds_from_assets() {
        let backend = MacroquadBackend::new();
        assert_eq!(backend.sound_directory, Path::new(DEFAULT_SOUND_DIRECTORY));
        assert!(!backend.muted);

        let backend = backend
            .with_mute(true)
            .with_sound_directory("custom")
            .with_vsync(false);
        assert!(backend.muted);
        assert_eq!(backend.sound_directory, PathBuf::from("custom"));
        assert_eq!(backend.swap_interval, Some(0));
    }

    #[test]
    fn clip_paths_join_directory_and_file_name() {
        assert_eq!(
            audio::clip_path(Path::new("sounds"), tile_arena_rendering::SoundCue::GameOver),
            PathBuf::from("sounds/game_over.wav")
        );
    }
}
