//! Autonomous wandering of enemies inside their assigned region.

use std::time::Duration;

use rand::Rng;
use tile_arena_core::{TileCoord, TileRect, ENEMY_WAIT_INTERVAL};

/// Phase of the wander cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WanderMode {
    /// Travelling to the most recently chosen tile.
    Seeking,
    /// Idling on the destination until the wait interval elapses.
    Waiting,
}

/// Enemy-specific state: the fixed region and the idle countdown.
#[derive(Clone, Debug)]
pub(crate) struct Wander {
    region: TileRect,
    wait_timer: Duration,
    wait_interval: Duration,
    mode: WanderMode,
}

impl Wander {
    pub(crate) fn new(region: TileRect) -> Self {
        Self {
            region,
            wait_timer: Duration::ZERO,
            wait_interval: ENEMY_WAIT_INTERVAL,
            mode: WanderMode::Seeking,
        }
    }

    pub(crate) fn mode(&self) -> WanderMode {
        self.mode
    }

    #[cfg(test)]
    pub(crate) fn region(&self) -> TileRect {
        self.region
    }

    /// Draws each axis independently and uniformly from the inclusive region bounds.
    ///
    /// The tile the enemy currently stands on may be drawn again.
    pub(crate) fn choose_tile<R: Rng>(&self, rng: &mut R) -> TileCoord {
        let min = self.region.min();
        let max = self.region.max();
        TileCoord::new(
            rng.gen_range(min.column()..=max.column()),
            rng.gen_range(min.row()..=max.row()),
        )
    }

    pub(crate) fn begin_wait(&mut self) {
        self.mode = WanderMode::Waiting;
        self.wait_timer = Duration::ZERO;
    }

    /// Accumulates idle time, returning the next destination once the interval elapsed.
    pub(crate) fn wait<R: Rng>(&mut self, dt: Duration, rng: &mut R) -> Option<TileCoord> {
        self.wait_timer = self.wait_timer.saturating_add(dt);
        if self.wait_timer < self.wait_interval {
            return None;
        }

        self.wait_timer = Duration::ZERO;
        self.mode = WanderMode::Seeking;
        Some(self.choose_tile(rng))
    }
}
