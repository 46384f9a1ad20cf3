#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tile Arena adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;
use tile_arena_core::{ActorKind, AnimationPhase, PixelRect};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Screen position of a left click registered on this frame.
    pub click: Option<Vec2>,
    /// Whether Escape was pressed on this frame.
    pub escape_pressed: bool,
}

/// Centered text drawn by the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPresentation {
    /// Text content.
    pub text: String,
    /// Screen position the text is centered on.
    pub center: Vec2,
    /// Font size in pixels.
    pub font_size: f32,
    /// Fill color of the glyphs.
    pub color: Color,
}

impl TextPresentation {
    /// Creates a new text descriptor.
    #[must_use]
    pub fn new<T>(text: T, center: Vec2, font_size: f32, color: Color) -> Self
    where
        T: Into<String>,
    {
        Self {
            text: text.into(),
            center,
            font_size,
            color,
        }
    }
}

/// Filled rectangle with a centered label.
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonPresentation {
    /// Screen-space area covered by the button.
    pub bounds: PixelRect,
    /// Fill color of the button body.
    pub fill: Color,
    /// Label centered on the button.
    pub label: TextPresentation,
}

impl ButtonPresentation {
    /// Default font size of button labels.
    pub const LABEL_FONT_SIZE: f32 = 30.0;

    /// Creates a button whose label is centered within `bounds`.
    #[must_use]
    pub fn new<T>(bounds: PixelRect, fill: Color, label: T, label_color: Color) -> Self
    where
        T: Into<String>,
    {
        Self {
            bounds,
            fill,
            label: TextPresentation::new(
                label,
                bounds.center(),
                Self::LABEL_FONT_SIZE,
                label_color,
            ),
        }
    }
}

/// Grid lines overlaid on the playing field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Width of the surface the lines span, in pixels.
    pub width: f32,
    /// Height of the surface the lines span, in pixels.
    pub height: f32,
    /// Spacing between consecutive lines, in pixels.
    pub tile_length: f32,
    /// Color of the lines.
    pub line_color: Color,
}

impl TileGridPresentation {
    /// Creates a new grid descriptor, rejecting non-positive spacing.
    pub fn new(
        width: f32,
        height: f32,
        tile_length: f32,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if tile_length.is_nan() || tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        Ok(Self {
            width,
            height,
            tile_length,
            line_color,
        })
    }

    /// X coordinates of the vertical lines, starting at the left edge.
    pub fn vertical_lines(&self) -> impl Iterator<Item = f32> {
        line_offsets(self.width, self.tile_length)
    }

    /// Y coordinates of the horizontal lines, starting at the top edge.
    pub fn horizontal_lines(&self) -> impl Iterator<Item = f32> {
        line_offsets(self.height, self.tile_length)
    }
}

fn line_offsets(extent: f32, step: f32) -> impl Iterator<Item = f32> {
    (0..)
        .map(move |index| index as f32 * step)
        .take_while(move |offset| *offset < extent)
}

/// Immutable snapshot of an actor to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorPresentation {
    /// Whether the actor is the player or an enemy.
    pub kind: ActorKind,
    /// Screen-space area covered by the actor's frame.
    pub bounds: PixelRect,
    /// Animation sequence being played.
    pub phase: AnimationPhase,
    /// Frame of the sequence to show.
    pub frame_index: usize,
    /// Base fill color of the actor.
    pub color: Color,
}

impl ActorPresentation {
    /// Color of the current frame. Later frames of a sequence are drawn lighter.
    #[must_use]
    pub fn frame_color(&self) -> Color {
        let frames = self.phase.frame_count().max(1);
        let position = (self.frame_index % frames) as f32 / frames as f32;
        self.color.lighten(position * 0.4)
    }
}

/// Content of the screen for the active game state.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    /// Main menu with its title and buttons.
    Menu {
        /// Title drawn above the buttons.
        title: TextPresentation,
        /// Buttons in layout order.
        buttons: Vec<ButtonPresentation>,
    },
    /// Playing field with its grid and actors.
    Playing {
        /// Grid lines drawn beneath the actors.
        grid: TileGridPresentation,
        /// Actors drawn in order; later ones cover earlier ones.
        actors: Vec<ActorPresentation>,
    },
    /// Round lost screen.
    GameOver {
        /// Headline announcing the loss.
        headline: TextPresentation,
        /// Hint explaining how to continue.
        hint: TextPresentation,
    },
}

/// Sound effects the simulation may request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Played once when an enemy catches the player.
    GameOver,
}

impl SoundCue {
    /// Every cue known to the adapters.
    pub const ALL: [Self; 1] = [Self::GameOver];

    /// File name of the clip backing the cue, relative to the sound directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::GameOver => "game_over.wav",
        }
    }
}

/// Scene description populated by the simulation every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Solid color used to clear the frame.
    pub background: Color,
    /// Content drawn over the background.
    pub screen: Screen,
    /// Cues to play once on this frame. Backends drain the queue.
    pub sound_cues: Vec<SoundCue>,
}

impl Scene {
    /// Creates a new scene without pending sound cues.
    #[must_use]
    pub fn new(background: Color, screen: Screen) -> Self {
        Self {
            background,
            screen,
            sound_cues: Vec::new(),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Width of the window in pixels.
    pub width: u32,
    /// Height of the window in pixels.
    pub height: u32,
    /// Scene content shown before the first update.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, width: u32, height: u32, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            width,
            height,
            scene,
        }
    }
}

/// Decision returned by the scene update for each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Close the window after this frame.
    Exit,
}

/// Rendering backend capable of presenting Tile Arena scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure requests an exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and mutates the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Grid spacing must be positive to avoid an endless line loop.
    #[error("tile_length must be positive (received {tile_length})")]
    InvalidTileLength {
        /// Provided spacing that failed validation.
        tile_length: f32,
    },
}
