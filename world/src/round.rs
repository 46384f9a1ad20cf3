//! Lifecycle of a single playthrough: spawning and advancing its actors.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use tile_arena_core::{
    tile_to_pixel_center, ActorId, ActorSnapshot, Event, TileCoord, TileGrid, TileRect,
    SCREEN_HEIGHT, SCREEN_WIDTH,
};

use crate::actor::Actor;

/// Player and enemies of the running round.
#[derive(Clone, Debug)]
pub(crate) struct Round {
    player: Actor,
    enemies: Vec<Actor>,
}

impl Round {
    /// Spawns a fresh player at the screen center and the enemies at their fixed posts.
    pub(crate) fn spawn<R: Rng>(grid: &TileGrid, rng: &mut R, out_events: &mut Vec<Event>) -> Self {
        let player = Actor::player(Vec2::new(
            SCREEN_WIDTH as f32 / 2.0,
            SCREEN_HEIGHT as f32 / 2.0,
        ));

        let mut enemies = Vec::new();
        for (index, (position, region)) in enemy_posts(grid).into_iter().enumerate() {
            let id = ActorId::new(index as u32 + 1);
            let (enemy, tile) = Actor::enemy(id, position, region, rng);
            out_events.push(Event::EnemyRetargeted { enemy: id, tile });
            enemies.push(enemy);
        }

        Self { player, enemies }
    }

    pub(crate) fn player_mut(&mut self) -> &mut Actor {
        &mut self.player
    }

    pub(crate) fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub(crate) fn contains_enemy(&self, enemy: ActorId) -> bool {
        self.enemies.iter().any(|actor| actor.id() == enemy)
    }

    /// Advances the player first, then every enemy in insertion order.
    pub(crate) fn update<R: Rng>(&mut self, dt: Duration, rng: &mut R, out_events: &mut Vec<Event>) {
        self.player.update(dt, rng, out_events);
        for enemy in &mut self.enemies {
            enemy.update(dt, rng, out_events);
        }
    }

    pub(crate) fn snapshots(&self) -> Vec<ActorSnapshot> {
        std::iter::once(&self.player)
            .chain(self.enemies.iter())
            .map(Actor::snapshot)
            .collect()
    }
}

/// Spawn position and wander region of each enemy.
///
/// The first enemy guards the top-left 3x3 block, the second the block two
/// tiles in from the bottom-right corner.
fn enemy_posts(grid: &TileGrid) -> [(Vec2, TileRect); 2] {
    let tile = grid.tile_length();
    let last_column = grid.columns().saturating_sub(1);
    let last_row = grid.rows().saturating_sub(1);

    [
        (
            tile_to_pixel_center(TileCoord::new(2, 2)),
            TileRect::new(1, 3, 1, 3),
        ),
        (
            Vec2::new(
                SCREEN_WIDTH as f32 - tile * 2.5,
                SCREEN_HEIGHT as f32 - tile * 2.5,
            ),
            TileRect::new(
                last_column.saturating_sub(3),
                last_column.saturating_sub(1),
                last_row.saturating_sub(3),
                last_row.saturating_sub(1),
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tile_arena_core::ActorKind;

    #[test]
    fn spawn_places_actors_at_fixed_posts() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events = Vec::new();
        let round = Round::spawn(&TileGrid::arena(), &mut rng, &mut events);

        let snapshots = round.snapshots();
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[0].kind, ActorKind::Player);
        assert_eq!(snapshots[0].position, Vec2::new(400.0, 300.0));
        assert!(!snapshots[0].moving);
        assert_eq!(snapshots[1].position, Vec2::new(160.0, 160.0));
        assert_eq!(snapshots[2].position, Vec2::new(640.0, 440.0));
        assert_eq!(round.enemy_count(), 2);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn enemy_regions_cover_opposite_corners() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut events = Vec::new();
        let round = Round::spawn(&TileGrid::arena(), &mut rng, &mut events);

        let regions: Vec<_> = round.enemies.iter().filter_map(Actor::region).collect();
        assert_eq!(
            regions,
            vec![TileRect::new(1, 3, 1, 3), TileRect::new(8, 10, 5, 7)]
        );
    }

    #[test]
    fn enemies_never_leave_their_regions() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut events = Vec::new();
        let mut round = Round::spawn(&TileGrid::arena(), &mut rng, &mut events);

        for _ in 0..2_000 {
            round.update(Duration::from_millis(50), &mut rng, &mut events);
        }

        for event in &events {
            if let Event::EnemyRetargeted { enemy, tile } = event {
                let region = round
                    .enemies
                    .iter()
                    .find(|actor| actor.id() == *enemy)
                    .and_then(Actor::region)
                    .expect("known enemy");
                assert!(region.contains(*tile));
            }
        }
        for snapshot in round.snapshots() {
            if !snapshot.moving {
                assert_eq!(snapshot.position, snapshot.target);
            }
        }
    }
}
