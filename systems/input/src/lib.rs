#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system that routes clicks and key presses according to the game state.

use glam::Vec2;
use tile_arena_core::{
    Command, GameState, MenuAction, PixelRect, TileGrid, SCREEN_HEIGHT, SCREEN_WIDTH,
};

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 60.0;

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInput {
    /// Screen position of a left click observed on this frame, if any.
    pub click: Option<Vec2>,
    /// Whether Escape was pressed on this frame.
    pub escape_pressed: bool,
}

impl ControlInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(click: Option<Vec2>, escape_pressed: bool) -> Self {
        Self {
            click,
            escape_pressed,
        }
    }
}

/// Clickable rectangle shown on the menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuButton {
    /// Screen-space area that reacts to clicks.
    pub bounds: PixelRect,
    /// Text drawn centered on the button.
    pub label: &'static str,
    /// Action triggered by clicking the button.
    pub action: MenuAction,
}

/// Lays out the menu buttons, stacked around the screen center.
#[must_use]
pub fn menu_buttons() -> Vec<MenuButton> {
    let left = SCREEN_WIDTH as f32 / 2.0 - BUTTON_WIDTH / 2.0;
    let middle = SCREEN_HEIGHT as f32 / 2.0;
    let size = Vec2::new(BUTTON_WIDTH, BUTTON_HEIGHT);

    vec![
        MenuButton {
            bounds: PixelRect::from_origin_and_size(Vec2::new(left, middle - 30.0), size),
            label: "Start Game",
            action: MenuAction::StartRound,
        },
        MenuButton {
            bounds: PixelRect::from_origin_and_size(Vec2::new(left, middle + 50.0), size),
            label: "Exit",
            action: MenuAction::Quit,
        },
    ]
}

/// Pure system that turns frame input into world commands.
#[derive(Debug)]
pub struct InputRouting {
    tile_grid: TileGrid,
}

impl InputRouting {
    /// Creates a router that resolves gameplay clicks against the provided grid.
    #[must_use]
    pub fn new(tile_grid: TileGrid) -> Self {
        Self { tile_grid }
    }

    /// Emits the commands implied by `input` in the given game state.
    ///
    /// Menu clicks trigger the first button under the cursor, gameplay clicks
    /// request a move to the clicked tile (clicks outside the grid are
    /// dropped), and Escape leaves the game-over screen.
    pub fn handle(&self, game_state: GameState, input: ControlInput, out: &mut Vec<Command>) {
        match game_state {
            GameState::Menu => {
                let Some(click) = input.click else {
                    return;
                };
                let Some(button) = menu_buttons()
                    .into_iter()
                    .find(|button| button.bounds.contains(click))
                else {
                    return;
                };

                out.push(match button.action {
                    MenuAction::StartRound => Command::StartRound,
                    MenuAction::Quit => Command::Quit,
                });
            }
            GameState::Playing => {
                if let Some(tile) = input.click.and_then(|click| self.tile_grid.tile_at(click)) {
                    out.push(Command::MovePlayer { tile });
                }
            }
            GameState::GameOver => {
                if input.escape_pressed {
                    out.push(Command::ReturnToMenu);
                }
            }
        }
    }
}

impl Default for InputRouting {
    fn default() -> Self {
        Self::new(TileGrid::arena())
    }
}
