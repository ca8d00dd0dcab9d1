//! Nets thrown by the character: spawning, flight, off-screen culling and enemy hits.

use bevy::log::{debug, info};

use crate::collision::{intersects, Hitbox};
use crate::config::{
    GameSettings, MAX_LIVES, PROJECTILE_HEIGHT, PROJECTILE_WIDTH, WINDOW_HEIGHT,
};
use crate::entities::{Character, EnemyPool, ProjectilePool};
use crate::level::PhaseId;

/// Launches a net from the first free slot, centred on the character. Phase 1 nets fly the way
/// the character faces; phase 2 nets always fly straight up. A full pool drops the command.
pub fn fire(
    pool: &mut ProjectilePool,
    character: &Character,
    phase: PhaseId,
    settings: &GameSettings,
) -> Option<usize> {
    let Some((index, net)) = pool.first_free_mut() else {
        debug!("All {} nets in flight; fire command dropped.", pool.capacity());
        return None;
    };

    net.hitbox = Hitbox::new(
        character.hitbox.center_x() - PROJECTILE_WIDTH / 2,
        character.hitbox.center_y() - PROJECTILE_HEIGHT / 2,
        PROJECTILE_WIDTH,
        PROJECTILE_HEIGHT,
    );
    net.velocity = match phase {
        PhaseId::Surface => settings.projectile_speed * character.facing.sign(),
        PhaseId::Rainfall => -settings.projectile_speed,
    };
    net.active = true;
    Some(index)
}

/// Moves every live net along its phase axis and releases the ones that left the play area.
pub fn advance(pool: &mut ProjectilePool, phase: PhaseId, level_width: i32) {
    for net in pool.active_mut() {
        match phase {
            PhaseId::Surface => {
                net.hitbox.x += net.velocity;
                if net.hitbox.x > level_width || net.hitbox.right() < 0 {
                    net.active = false;
                }
            }
            PhaseId::Rainfall => {
                net.hitbox.y += net.velocity;
                // Nets thrown sideways in phase 1 fall through phase 2 instead of rising.
                if net.hitbox.bottom() < 0 || net.hitbox.y > WINDOW_HEIGHT {
                    net.active = false;
                }
            }
        }
    }
}

/// Running total of enemies caught. Every tenth catch grants a life while below the cap. Kept
/// across deaths; a finished transition starts it again from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KillTally {
    pub count: u32,
}

impl KillTally {
    /// Records one kill and grants a life on every `kills_per_life`-th, up to `MAX_LIVES`.
    pub fn record(&mut self, character: &mut Character, settings: &GameSettings) {
        self.count += 1;
        if self.count % settings.kills_per_life != 0 {
            return;
        }
        if character.lives < MAX_LIVES {
            character.lives += 1;
            info!("{} enemies caught; extra life ({} left).", self.count, character.lives);
        }
    }
}

/// Each net catches at most one enemy per step; both are released on contact.
/// Returns the number of enemies caught this step.
pub fn resolve_hits(
    nets: &mut ProjectilePool,
    enemies: &mut EnemyPool,
    tally: &mut KillTally,
    character: &mut Character,
    settings: &GameSettings,
) -> u32 {
    let mut caught = 0;

    for net in nets.active_mut() {
        let Some(enemy) = enemies
            .active_mut()
            .find(|enemy| intersects(&net.hitbox, &enemy.hitbox))
        else {
            continue;
        };

        enemy.active = false;
        net.active = false;
        caught += 1;
        tally.record(character, settings);
        debug!("Net caught an enemy; tally is {}.", tally.count);
    }

    caught
}
