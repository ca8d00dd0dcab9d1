//! Enemy behaviour per phase.
//!
//! Phase 1 enemies walk back and forth between two fixed world-space x bounds. Phase 2 enemies
//! are dropped from above the screen at a fixed interval and fall until they leave the bottom.

use bevy::log::debug;
use rand::Rng;

use crate::collision::Hitbox;
use crate::config::{GameSettings, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::entities::{Enemy, EnemyPool};
use crate::level::PhaseId;

/// Spawn height for rain enemies, above the top edge of the screen.
const RAIN_SPAWN_Y: i32 = -50;

/// Tracks when the last rain enemy was dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RainSpawner {
    last_spawn_ms: u64,
}

impl RainSpawner {
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_spawn_ms: now_ms,
        }
    }

    /// Drops one enemy into the first free slot once the interval has elapsed. The interval
    /// restarts even if the pool was full. Returns the slot used, if any.
    pub fn tick(
        &mut self,
        now_ms: u64,
        pool: &mut EnemyPool,
        rng: &mut impl Rng,
        settings: &GameSettings,
    ) -> Option<usize> {
        if now_ms.saturating_sub(self.last_spawn_ms) <= settings.rain_interval_ms {
            return None;
        }
        self.last_spawn_ms = now_ms;

        let size = settings.rain_enemy_size;
        let Some((index, slot)) = pool.first_free_mut() else {
            debug!("Enemy pool full; skipping rain spawn.");
            return None;
        };

        *slot = Enemy {
            hitbox: Hitbox::new(
                rng.gen_range(0..WINDOW_WIDTH - size),
                RAIN_SPAWN_Y,
                size,
                size,
            ),
            dir: 0,
            speed: 0,
            vel_y: rng.gen_range(settings.rain_speed_min..=settings.rain_speed_max),
            active: true,
        };
        debug!("Rain enemy dropped into slot {} at x={}.", index, slot.hitbox.x);
        Some(index)
    }
}

/// Per-step enemy update: patrols in phase 1; timed spawns plus falling in phase 2.
pub fn update_enemies(
    phase: PhaseId,
    pool: &mut EnemyPool,
    spawner: &mut RainSpawner,
    now_ms: u64,
    rng: &mut impl Rng,
    settings: &GameSettings,
) {
    match phase {
        PhaseId::Surface => patrol(pool, settings),
        PhaseId::Rainfall => {
            spawner.tick(now_ms, pool, rng, settings);
            fall(pool);
        }
    }
}

/// Bounds are world constants, not derived from the level width.
fn patrol(pool: &mut EnemyPool, settings: &GameSettings) {
    for enemy in pool.active_mut() {
        enemy.hitbox.x += enemy.dir * enemy.speed;
        if enemy.hitbox.x < settings.patrol_min_x || enemy.hitbox.x > settings.patrol_max_x {
            enemy.dir = -enemy.dir;
        }
    }
}

fn fall(pool: &mut EnemyPool) {
    for enemy in pool.active_mut() {
        enemy.hitbox.y += enemy.vel_y;
        if enemy.hitbox.y > WINDOW_HEIGHT {
            enemy.active = false;
        }
    }
}
