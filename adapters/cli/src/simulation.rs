//! Per-frame glue between the backend, the world and the pure systems.

use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use tile_arena_core::{
    ActorKind, ActorView, Command, Event, GameState, GAME_TITLE, SCREEN_HEIGHT, SCREEN_WIDTH,
    TILE_SIZE,
};
use tile_arena_rendering::{
    ActorPresentation, ButtonPresentation, Color, FrameControl, FrameInput, Presentation, Scene,
    Screen, SoundCue, TextPresentation, TileGridPresentation,
};
use tile_arena_system_collision::Collision;
use tile_arena_system_input::{menu_buttons, ControlInput, InputRouting};
use tile_arena_world::{self as world, query, World};

const GAME_OVER_HEADLINE: &str = "Game Over!";
const GAME_OVER_HINT: &str = "Press ESC to return to the menu";

const TITLE_FONT_SIZE: f32 = 60.0;
const HEADLINE_FONT_SIZE: f32 = 80.0;
const HINT_FONT_SIZE: f32 = 30.0;

const MENU_BACKGROUND: Color = Color::BLACK;
const FIELD_BACKGROUND: Color = Color::from_rgb_u8(50, 50, 50);
const GRID_LINE: Color = Color::from_rgb_u8(70, 70, 70);
const BUTTON_FILL: Color = Color::from_rgb_u8(50, 100, 200);
const PLAYER_FILL: Color = Color::from_rgb_u8(80, 200, 120);
const ENEMY_FILL: Color = Color::from_rgb_u8(200, 60, 60);

/// Owns the world and the systems and advances them once per rendered frame.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    input: InputRouting,
    collision: Collision,
    grid: TileGridPresentation,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    pub(crate) fn new(seed: u64) -> Result<Self> {
        let world = World::with_seed(seed);
        let tile_grid = *query::tile_grid(&world);
        let grid = TileGridPresentation::new(
            SCREEN_WIDTH as f32,
            SCREEN_HEIGHT as f32,
            TILE_SIZE as f32,
            GRID_LINE,
        )?;

        Ok(Self {
            world,
            input: InputRouting::new(tile_grid),
            collision: Collision,
            grid,
            commands: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Window descriptor showing the current state of the world.
    pub(crate) fn presentation(&self) -> Presentation {
        let mut scene = Scene::new(
            MENU_BACKGROUND,
            Screen::Menu {
                title: menu_title(),
                buttons: Vec::new(),
            },
        );
        self.populate_scene(&mut scene);
        Presentation::new(GAME_TITLE, SCREEN_WIDTH, SCREEN_HEIGHT, scene)
    }

    /// Routes input, advances the round, resolves collisions and redraws.
    pub(crate) fn frame(
        &mut self,
        dt: Duration,
        input: FrameInput,
        scene: &mut Scene,
    ) -> FrameControl {
        self.events.clear();

        let control_input = ControlInput::new(input.click, input.escape_pressed);
        self.input.handle(
            query::game_state(&self.world),
            control_input,
            &mut self.commands,
        );
        self.commands.push(Command::Tick { dt });
        self.apply_pending();

        let actor_view = query::actor_view(&self.world);
        self.collision.handle(
            &self.events,
            query::game_state(&self.world),
            &actor_view,
            &mut self.commands,
        );
        self.apply_pending();

        let mut control = FrameControl::Continue;
        for event in &self.events {
            match event {
                Event::RoundLost { .. } => scene.sound_cues.push(SoundCue::GameOver),
                Event::ExitRequested => control = FrameControl::Exit,
                _ => {}
            }
        }

        self.populate_scene(scene);
        control
    }

    fn apply_pending(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn populate_scene(&self, scene: &mut Scene) {
        match query::game_state(&self.world) {
            GameState::Menu => {
                scene.background = MENU_BACKGROUND;
                scene.screen = Screen::Menu {
                    title: menu_title(),
                    buttons: menu_buttons()
                        .into_iter()
                        .map(|button| {
                            ButtonPresentation::new(
                                button.bounds,
                                BUTTON_FILL,
                                button.label,
                                Color::WHITE,
                            )
                        })
                        .collect(),
                };
            }
            GameState::Playing => {
                scene.background = FIELD_BACKGROUND;
                scene.screen = Screen::Playing {
                    grid: self.grid,
                    actors: actor_presentations(&query::actor_view(&self.world)),
                };
            }
            GameState::GameOver => {
                let middle = screen_center();
                scene.background = MENU_BACKGROUND;
                scene.screen = Screen::GameOver {
                    headline: TextPresentation::new(
                        GAME_OVER_HEADLINE,
                        middle - Vec2::new(0.0, 50.0),
                        HEADLINE_FONT_SIZE,
                        Color::RED,
                    ),
                    hint: TextPresentation::new(
                        GAME_OVER_HINT,
                        middle + Vec2::new(0.0, 50.0),
                        HINT_FONT_SIZE,
                        Color::WHITE,
                    ),
                };
            }
        }
    }
}

fn screen_center() -> Vec2 {
    Vec2::new(SCREEN_WIDTH as f32 / 2.0, SCREEN_HEIGHT as f32 / 2.0)
}

fn menu_title() -> TextPresentation {
    TextPresentation::new(
        GAME_TITLE,
        Vec2::new(SCREEN_WIDTH as f32 / 2.0, SCREEN_HEIGHT as f32 / 4.0),
        TITLE_FONT_SIZE,
        Color::WHITE,
    )
}

fn actor_presentations(actor_view: &ActorView) -> Vec<ActorPresentation> {
    actor_view
        .iter()
        .map(|actor| ActorPresentation {
            kind: actor.kind,
            bounds: actor.bounds(),
            phase: actor.phase,
            frame_index: actor.frame_index,
            color: match actor.kind {
                ActorKind::Player => PLAYER_FILL,
                ActorKind::Enemy => ENEMY_FILL,
            },
        })
        .collect()
}
