#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tile Arena engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches.

pub mod grid;

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use grid::{
    pixel_to_tile, tile_to_pixel_center, PixelRect, TileCoord, TileGrid, TileRect, SCREEN_HEIGHT,
    SCREEN_WIDTH, TILE_SIZE,
};

/// Title shown on the menu screen and used for the window.
pub const GAME_TITLE: &str = "Simple Roguelike";

/// Travel speed of the player measured in pixels per second.
pub const PLAYER_SPEED: f32 = 250.0;

/// Travel speed of every enemy measured in pixels per second.
pub const ENEMY_SPEED: f32 = 120.0;

/// Time an animation frame stays on screen before the next one is shown.
pub const ANIMATION_INTERVAL: Duration = Duration::from_millis(150);

/// Time an enemy idles on its destination before choosing a new one.
pub const ENEMY_WAIT_INTERVAL: Duration = Duration::from_secs(2);

/// Side length of the square sprite frame occupied by every actor, in pixels.
pub const ACTOR_EXTENT: f32 = 48.0;

/// Top-level state of the game, gating updates, drawing and input handling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen showing the start and quit buttons.
    #[default]
    Menu,
    /// A round is in progress and actors move every tick.
    Playing,
    /// The player was caught; the round is frozen until Escape is pressed.
    GameOver,
}

/// Actions bound to the clickable menu buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Starts a fresh round.
    StartRound,
    /// Terminates the experience.
    Quit,
}

/// Animation sequence currently played by an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationPhase {
    /// Standing still; two frames blinking back and forth.
    #[default]
    Idle,
    /// Travelling towards a target; eight frames.
    Move,
}

impl AnimationPhase {
    /// Number of frames composing the phase's sequence.
    #[must_use]
    pub const fn frame_count(self) -> usize {
        match self {
            Self::Idle => 2,
            Self::Move => 8,
        }
    }
}

/// Distinguishes the player from the wandering enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// Actor steered by mouse clicks.
    Player,
    /// Actor wandering autonomously inside its region.
    Enemy,
}

/// Unique identifier assigned to an actor within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Identifier always assigned to the player.
    pub const PLAYER: Self = Self(0);

    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests a fresh round; honoured only from the menu.
    StartRound,
    /// Requests that the player travel to the provided tile.
    MovePlayer {
        /// Destination tile of the requested move.
        tile: TileCoord,
    },
    /// Ends the running round because an enemy caught the player.
    EndRound {
        /// Enemy whose bounds overlapped the player.
        enemy: ActorId,
    },
    /// Leaves the game-over screen and returns to the menu.
    ReturnToMenu,
    /// Requests that the experience terminates; honoured only from the menu.
    Quit,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced while a round was running.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces a transition of the top-level game state.
    GameStateChanged {
        /// State that was active before the transition.
        from: GameState,
        /// State that became active.
        to: GameState,
    },
    /// Confirms that a fresh round replaced any previous one.
    RoundStarted {
        /// Number of enemies spawned into the round.
        enemies: usize,
    },
    /// Confirms that the player accepted a new destination.
    PlayerMoveStarted {
        /// Destination tile of the accepted move.
        tile: TileCoord,
    },
    /// Reports that an actor reached its target during a tick.
    ActorArrived {
        /// Identifier of the actor that arrived.
        actor: ActorId,
    },
    /// Reports that an enemy picked a new destination inside its region.
    EnemyRetargeted {
        /// Identifier of the enemy.
        enemy: ActorId,
        /// Destination tile chosen for the enemy.
        tile: TileCoord,
    },
    /// Reports that the round was lost to the provided enemy.
    RoundLost {
        /// Enemy that caught the player.
        enemy: ActorId,
    },
    /// Reports that the experience should terminate.
    ExitRequested,
}

/// Immutable representation of a single actor's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorSnapshot {
    /// Unique identifier assigned to the actor.
    pub id: ActorId,
    /// Whether the actor is the player or an enemy.
    pub kind: ActorKind,
    /// Current pixel position of the actor's center.
    pub position: Vec2,
    /// Pixel position the actor travels towards.
    pub target: Vec2,
    /// Indicates whether the actor is travelling.
    pub moving: bool,
    /// Animation sequence currently played.
    pub phase: AnimationPhase,
    /// Frame of the active sequence currently shown.
    pub frame_index: usize,
}

impl ActorSnapshot {
    /// Visual bounds of the actor: its sprite frame centered on its position.
    #[must_use]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::centered(self.position, Vec2::splat(ACTOR_EXTENT))
    }
}

/// Read-only snapshot describing all actors of the running round.
#[derive(Clone, Debug, Default)]
pub struct ActorView {
    snapshots: Vec<ActorSnapshot>,
}

impl ActorView {
    /// Creates a new actor view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ActorSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &ActorSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the player, if a round exists.
    #[must_use]
    pub fn player(&self) -> Option<&ActorSnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.kind == ActorKind::Player)
    }

    /// Iterator over the enemy snapshots in insertion order.
    pub fn enemies(&self) -> impl Iterator<Item = &ActorSnapshot> {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.kind == ActorKind::Enemy)
    }

    /// Reports whether the view holds no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ActorSnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: u32, kind: ActorKind, position: Vec2) -> ActorSnapshot {
        ActorSnapshot {
            id: ActorId::new(id),
            kind,
            position,
            target: position,
            moving: false,
            phase: AnimationPhase::Idle,
            frame_index: 0,
        }
    }

    #[test]
    fn frame_counts_match_sequences() {
        assert_eq!(AnimationPhase::Idle.frame_count(), 2);
        assert_eq!(AnimationPhase::Move.frame_count(), 8);
    }

    #[test]
    fn actor_view_orders_snapshots_and_splits_roles() {
        let view = ActorView::from_snapshots(vec![
            snapshot(2, ActorKind::Enemy, Vec2::new(640.0, 440.0)),
            snapshot(0, ActorKind::Player, Vec2::new(400.0, 300.0)),
            snapshot(1, ActorKind::Enemy, Vec2::new(160.0, 160.0)),
        ]);

        let ids: Vec<_> = view.iter().map(|actor| actor.id.get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(view.player().map(|actor| actor.id), Some(ActorId::PLAYER));
        assert_eq!(view.enemies().count(), 2);
    }

    #[test]
    fn actor_bounds_are_centered_on_position() {
        let actor = snapshot(0, ActorKind::Player, Vec2::new(100.0, 50.0));
        let bounds = actor.bounds();
        assert_eq!(bounds.min(), Vec2::new(76.0, 26.0));
        assert_eq!(bounds.max(), Vec2::new(124.0, 74.0));
    }

    #[test]
    fn tile_rect_round_trips_through_bincode() {
        let region = TileRect::new(8, 10, 5, 7);
        let bytes = bincode::serialize(&region).expect("serialize");
        let restored: TileRect = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, region);
    }
}
