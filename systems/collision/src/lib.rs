#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision system that ends the round when an enemy catches the player.

use tile_arena_core::{ActorView, Command, Event, GameState};

/// Pure system that inspects post-tick actor snapshots for player/enemy overlap.
#[derive(Debug, Default)]
pub struct Collision;

impl Collision {
    /// Consumes world events and the actor view to emit an end-of-round command.
    ///
    /// The test only runs for ticks that advanced a running round. Enemies are
    /// checked in insertion order and the first overlapping one is reported.
    pub fn handle(
        &mut self,
        events: &[Event],
        game_state: GameState,
        actor_view: &ActorView,
        out: &mut Vec<Command>,
    ) {
        if game_state != GameState::Playing {
            return;
        }

        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let Some(player) = actor_view.player() else {
            return;
        };
        let player_bounds = player.bounds();

        if let Some(enemy) = actor_view
            .enemies()
            .find(|enemy| enemy.bounds().overlaps(&player_bounds))
        {
            log::debug!(
                "enemy {} at {:?} overlaps player at {:?}",
                enemy.id.get(),
                enemy.position,
                player.position
            );
            out.push(Command::EndRound { enemy: enemy.id });
        }
    }
}
