#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Tile Arena.

mod actor;
mod round;
mod wander;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tile_arena_core::{Command, Event, GameState, TileGrid};

use self::round::Round;

const DEFAULT_WANDER_SEED: u64 = 0x7a11_e5ab_d00d_f00d;

/// Represents the authoritative Tile Arena world state.
#[derive(Debug)]
pub struct World {
    state: GameState,
    tile_grid: TileGrid,
    round: Option<Round>,
    rng: ChaCha8Rng,
    tick_index: u64,
}

impl World {
    /// Creates a new world showing the menu, using the default wander seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_WANDER_SEED)
    }

    /// Creates a new world whose enemy wandering is driven by the provided seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: GameState::Menu,
            tile_grid: TileGrid::arena(),
            round: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick_index: 0,
        }
    }

    fn transition(&mut self, to: GameState, out_events: &mut Vec<Event>) {
        let from = self.state;
        if from == to {
            return;
        }

        log::debug!("game state {from:?} -> {to:?}");
        self.state = to;
        out_events.push(Event::GameStateChanged { from, to });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that are not meaningful in the current [`GameState`] are ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            if world.state != GameState::Playing {
                return;
            }
            let Some(round) = world.round.as_mut() else {
                return;
            };

            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            round.update(dt, &mut world.rng, out_events);
        }
        Command::StartRound => {
            if world.state != GameState::Menu {
                return;
            }

            world.transition(GameState::Playing, out_events);
            let round = Round::spawn(&world.tile_grid, &mut world.rng, out_events);
            let enemies = round.enemy_count();
            world.round = Some(round);
            world.tick_index = 0;
            log::info!("round started with {enemies} enemies");
            out_events.push(Event::RoundStarted { enemies });
        }
        Command::MovePlayer { tile } => {
            if world.state != GameState::Playing || !world.tile_grid.contains(tile) {
                return;
            }
            let Some(round) = world.round.as_mut() else {
                return;
            };

            if round.player_mut().move_to_tile(tile) {
                out_events.push(Event::PlayerMoveStarted { tile });
            } else {
                log::trace!("dropped move to {tile:?}; player still travelling");
            }
        }
        Command::EndRound { enemy } => {
            if world.state != GameState::Playing {
                return;
            }
            if !world
                .round
                .as_ref()
                .is_some_and(|round| round.contains_enemy(enemy))
            {
                return;
            }

            world.transition(GameState::GameOver, out_events);
            log::info!(
                "round lost to enemy {} after {} ticks",
                enemy.get(),
                world.tick_index
            );
            out_events.push(Event::RoundLost { enemy });
        }
        Command::ReturnToMenu => {
            if world.state == GameState::GameOver {
                world.transition(GameState::Menu, out_events);
            }
        }
        Command::Quit => {
            if world.state == GameState::Menu {
                log::info!("exit requested from the menu");
                out_events.push(Event::ExitRequested);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tile_arena_core::{ActorView, GameState, TileGrid};

    use super::World;

    /// Current top-level game state.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.state
    }

    /// Provides read-only access to the world's tile grid definition.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.tile_grid
    }

    /// Captures a read-only view of the actors of the most recent round.
    ///
    /// The view is empty until the first round starts.
    #[must_use]
    pub fn actor_view(world: &World) -> ActorView {
        world
            .round
            .as_ref()
            .map(|round| ActorView::from_snapshots(round.snapshots()))
            .unwrap_or_default()
    }

    /// Number of ticks simulated since the current round started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
