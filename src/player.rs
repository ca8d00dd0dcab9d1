//! Contact damage and the heart/life economy.
//!
//! A hit costs one heart and opens an invincibility window. Losing the last heart costs a life,
//! refills the hearts and sends the character back to the phase start. Losing the last life ends
//! the run for good.

use bevy::log::info;

use crate::collision::intersects;
use crate::config::{GameSettings, MAX_HEARTS};
use crate::entities::{Character, EnemyPool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Unharmed,
    Hurt,
    LifeLost,
    GameOver,
}

/// Ticks the invincibility window, then applies at most one hit from any touching enemy.
pub fn resolve_contact_damage(
    character: &mut Character,
    enemies: &EnemyPool,
    respawn: (i32, i32),
    settings: &GameSettings,
) -> DamageOutcome {
    character.invincibility = character.invincibility.saturating_sub(1);
    if character.invincibility > 0 {
        return DamageOutcome::Unharmed;
    }

    let touched = enemies
        .active()
        .any(|enemy| intersects(&character.hitbox, &enemy.hitbox));
    if !touched {
        return DamageOutcome::Unharmed;
    }

    character.hearts = character.hearts.saturating_sub(1);
    character.invincibility = settings.invincibility_frames;
    if character.hearts > 0 {
        return DamageOutcome::Hurt;
    }

    character.lives = character.lives.saturating_sub(1);
    character.hearts = MAX_HEARTS;
    character.teleport(respawn.0, respawn.1);

    if character.lives == 0 {
        info!("Game Over!");
        return DamageOutcome::GameOver;
    }

    info!("Life lost; {} remaining.", character.lives);
    DamageOutcome::LifeLost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Hitbox;
    use crate::entities::Enemy;
    use crate::level::{START_X, START_Y};

    fn settings() -> GameSettings {
        GameSettings::default()
    }

    fn pool_touching(character: &Character) -> EnemyPool {
        let mut pool = EnemyPool::new();
        pool.slots_mut()[0] = Enemy {
            hitbox: Hitbox::new(character.hitbox.x + 10, character.hitbox.y + 10, 50, 50),
            dir: 1,
            speed: 0,
            vel_y: 0,
            active: true,
        };
        pool
    }

    #[test]
    fn hit_costs_a_heart_and_starts_invincibility() {
        let mut c = Character::new(700, START_Y, &settings());
        let enemies = pool_touching(&c);

        let outcome = resolve_contact_damage(&mut c, &enemies, (START_X, START_Y), &settings());
        assert_eq!(outcome, DamageOutcome::Hurt);
        assert_eq!(c.hearts, MAX_HEARTS - 1);
        assert_eq!(c.invincibility, 60);
    }

    #[test]
    fn invincibility_ignores_further_contact_until_it_runs_out() {
        let mut c = Character::new(700, START_Y, &settings());
        let enemies = pool_touching(&c);
        resolve_contact_damage(&mut c, &enemies, (START_X, START_Y), &settings());

        for _ in 0..59 {
            let outcome =
                resolve_contact_damage(&mut c, &enemies, (START_X, START_Y), &settings());
            assert_eq!(outcome, DamageOutcome::Unharmed);
        }
        assert_eq!(c.hearts, MAX_HEARTS - 1);

        let outcome = resolve_contact_damage(&mut c, &enemies, (START_X, START_Y), &settings());
        assert_eq!(outcome, DamageOutcome::Hurt);
        assert_eq!(c.hearts, MAX_HEARTS - 2);
    }

    #[test]
    fn inactive_enemies_do_no_damage() {
        let mut c = Character::new(700, START_Y, &settings());
        let mut enemies = pool_touching(&c);
        enemies.deactivate_all();
        let outcome = resolve_contact_damage(&mut c, &enemies, (START_X, START_Y), &settings());
        assert_eq!(outcome, DamageOutcome::Unharmed);
        assert_eq!(c.hearts, MAX_HEARTS);
    }

    #[test]
    fn last_heart_costs_a_life_and_respawns_keeping_velocity() {
        let mut c = Character::new(700, START_Y, &settings());
        c.hearts = 1;
        c.vel_y = 4;
        let enemies = pool_touching(&c);

        let outcome = resolve_contact_damage(&mut c, &enemies, (START_X, START_Y), &settings());
        assert_eq!(outcome, DamageOutcome::LifeLost);
        assert_eq!(c.lives, 4);
        assert_eq!(c.hearts, MAX_HEARTS);
        assert_eq!((c.hitbox.x, c.hitbox.y), (START_X, START_Y));
        assert_eq!(c.vel_y, 4);
    }

    #[test]
    fn last_life_ends_the_run() {
        let mut c = Character::new(700, START_Y, &settings());
        c.hearts = 1;
        c.lives = 1;
        let enemies = pool_touching(&c);

        let outcome = resolve_contact_damage(&mut c, &enemies, (START_X, START_Y), &settings());
        assert_eq!(outcome, DamageOutcome::GameOver);
        assert_eq!(c.lives, 0);
    }
}
