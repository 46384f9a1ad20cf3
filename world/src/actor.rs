//! Animated actors shared by the player and the wandering enemies.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use tile_arena_core::{
    tile_to_pixel_center, ActorId, ActorKind, ActorSnapshot, AnimationPhase, Event, TileCoord,
    TileRect, ANIMATION_INTERVAL, ENEMY_SPEED, PLAYER_SPEED,
};

use crate::wander::{Wander, WanderMode};

/// Kind-specific state carried next to the shared motion fields.
#[derive(Clone, Debug)]
pub(crate) enum Role {
    Player,
    Enemy(Wander),
}

/// Moving, animated entity of a round.
#[derive(Clone, Debug)]
pub(crate) struct Actor {
    id: ActorId,
    position: Vec2,
    target: Vec2,
    moving: bool,
    speed: f32,
    phase: AnimationPhase,
    frame_index: usize,
    frame_timer: Duration,
    role: Role,
}

impl Actor {
    /// Creates the player standing still at `position`.
    pub(crate) fn player(position: Vec2) -> Self {
        Self::standing(ActorId::PLAYER, position, PLAYER_SPEED, Role::Player)
    }

    /// Creates an enemy confined to `region` that immediately heads to a random tile.
    pub(crate) fn enemy<R: Rng>(
        id: ActorId,
        position: Vec2,
        region: TileRect,
        rng: &mut R,
    ) -> (Self, TileCoord) {
        let wander = Wander::new(region);
        let first = wander.choose_tile(rng);
        let mut enemy = Self::standing(id, position, ENEMY_SPEED, Role::Enemy(wander));
        enemy.head_to(first);
        (enemy, first)
    }

    fn standing(id: ActorId, position: Vec2, speed: f32, role: Role) -> Self {
        Self {
            id,
            position,
            target: position,
            moving: false,
            speed,
            phase: AnimationPhase::Idle,
            frame_index: 0,
            frame_timer: Duration::ZERO,
            role,
        }
    }

    pub(crate) fn id(&self) -> ActorId {
        self.id
    }

    /// Advances the frame cursor of the active phase; runs whether or not the actor moves.
    pub(crate) fn advance_animation(&mut self, dt: Duration) {
        self.frame_timer = self.frame_timer.saturating_add(dt);
        if self.frame_timer >= ANIMATION_INTERVAL {
            self.frame_timer = Duration::ZERO;
            self.frame_index = (self.frame_index + 1) % self.phase.frame_count();
        }
    }

    /// Switches the active sequence, restarting it when the phase actually changes.
    pub(crate) fn set_phase(&mut self, phase: AnimationPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.frame_index = 0;
            self.frame_timer = Duration::ZERO;
        }
    }

    /// Moves towards the target by one tick of travel, snapping onto it on arrival.
    ///
    /// Returns `true` when the actor arrived during this step.
    pub(crate) fn seek_target(&mut self, dt: Duration) -> bool {
        let delta = self.target - self.position;
        let distance = delta.length();
        let step = self.speed * dt.as_secs_f32();

        if distance > step {
            self.position += delta / distance * step;
            self.set_phase(AnimationPhase::Move);
            false
        } else {
            self.position = self.target;
            self.moving = false;
            self.set_phase(AnimationPhase::Idle);
            true
        }
    }

    /// Sets a new destination tile unless a move is already in flight.
    ///
    /// Returns `false` when the request was dropped.
    pub(crate) fn move_to_tile(&mut self, tile: TileCoord) -> bool {
        if self.moving {
            return false;
        }

        self.target = tile_to_pixel_center(tile);
        self.moving = true;
        true
    }

    fn head_to(&mut self, tile: TileCoord) {
        self.target = tile_to_pixel_center(tile);
        self.moving = true;
        self.set_phase(AnimationPhase::Move);
    }

    /// Runs one frame of animation and role-specific behaviour.
    pub(crate) fn update<R: Rng>(&mut self, dt: Duration, rng: &mut R, out_events: &mut Vec<Event>) {
        self.advance_animation(dt);
        if matches!(self.role, Role::Player) {
            self.update_player(dt, out_events);
        } else {
            self.update_enemy(dt, rng, out_events);
        }
    }

    fn update_player(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if !self.moving {
            self.set_phase(AnimationPhase::Idle);
            return;
        }

        if self.seek_target(dt) {
            out_events.push(Event::ActorArrived { actor: self.id });
        }
    }

    fn update_enemy<R: Rng>(&mut self, dt: Duration, rng: &mut R, out_events: &mut Vec<Event>) {
        let mode = match &self.role {
            Role::Enemy(wander) => wander.mode(),
            Role::Player => return,
        };

        match mode {
            WanderMode::Seeking => {
                if self.seek_target(dt) {
                    if let Role::Enemy(wander) = &mut self.role {
                        wander.begin_wait();
                    }
                    out_events.push(Event::ActorArrived { actor: self.id });
                }
            }
            WanderMode::Waiting => {
                let next = match &mut self.role {
                    Role::Enemy(wander) => wander.wait(dt, rng),
                    Role::Player => None,
                };
                match next {
                    Some(tile) => {
                        self.head_to(tile);
                        out_events.push(Event::EnemyRetargeted {
                            enemy: self.id,
                            tile,
                        });
                    }
                    None => self.set_phase(AnimationPhase::Idle),
                }
            }
        }
    }

    pub(crate) fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            id: self.id,
            kind: match self.role {
                Role::Player => ActorKind::Player,
                Role::Enemy(_) => ActorKind::Enemy,
            },
            position: self.position,
            target: self.target,
            moving: self.moving,
            phase: self.phase,
            frame_index: self.frame_index,
        }
    }

    #[cfg(test)]
    pub(crate) fn region(&self) -> Option<TileRect> {
        match &self.role {
            Role::Enemy(wander) => Some(wander.region()),
            Role::Player => None,
        }
    }
}
