//! Plain data for everything the simulation moves around, plus the fixed-capacity `Pool` used for
//! enemies and projectiles.
//!
//! Pools never grow or shrink. A slot is live while its `active` flag is set; spawning reuses the
//! first inactive slot and a full pool silently refuses new entries.

use crate::collision::Hitbox;
use crate::config::{
    GameSettings, MAX_ENEMIES, MAX_HEARTS, MAX_LIVES, MAX_PROJECTILES, PROJECTILE_HEIGHT,
    PROJECTILE_WIDTH,
};

/// Standing size of the character. Crouching halves the height and keeps the feet in place.
pub const CHARACTER_WIDTH: i32 = 50;
pub const CHARACTER_HEIGHT: i32 = 100;

/// Last horizontal direction the character moved in. Phase 1 nets are thrown this way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// −1 for left, +1 for right.
    pub fn sign(self) -> i32 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }
}

/// Vertical state. `Airborne` blocks jumping and crouching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Motion {
    #[default]
    Grounded,
    Airborne,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Posture {
    #[default]
    Standing,
    Crouching,
}

/// The player-controlled character. Its hitbox is in world pixels; the HUD converts it to the
/// screen through the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub hitbox: Hitbox,
    pub speed: i32,
    pub jump_impulse: i32,
    pub vel_y: i32,
    pub motion: Motion,
    pub posture: Posture,
    pub hearts: u32,
    pub lives: u32,
    /// Frames left in the post-hit invincibility window.
    pub invincibility: u32,
    pub facing: Facing,
}

impl Character {
    /// A standing, grounded character with full hearts and lives, facing right.
    pub fn new(x: i32, y: i32, settings: &GameSettings) -> Self {
        Self {
            hitbox: Hitbox::new(x, y, CHARACTER_WIDTH, CHARACTER_HEIGHT),
            speed: settings.run_speed,
            jump_impulse: settings.jump_impulse,
            vel_y: 0,
            motion: Motion::Grounded,
            posture: Posture::Standing,
            hearts: MAX_HEARTS,
            lives: MAX_LIVES,
            invincibility: 0,
            facing: Facing::Right,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.motion == Motion::Airborne
    }

    pub fn is_crouching(&self) -> bool {
        self.posture == Posture::Crouching
    }

    /// Moves the top-left corner. Velocity, size and posture are untouched.
    pub fn teleport(&mut self, x: i32, y: i32) {
        self.hitbox.x = x;
        self.hitbox.y = y;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub hitbox: Hitbox,
    /// Blocks movement.
    pub solid: bool,
    /// Marks something you can stand on; informational only.
    pub platform: bool,
}

impl Obstacle {
    pub const fn new(hitbox: Hitbox, solid: bool, platform: bool) -> Self {
        Self {
            hitbox,
            solid,
            platform,
        }
    }
}

/// A patrol in phase 1 or a falling rain enemy in phase 2. Patrols use `dir`/`speed`; rain
/// enemies only use `vel_y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enemy {
    pub hitbox: Hitbox,
    /// Patrol direction, ±1.
    pub dir: i32,
    pub speed: i32,
    pub vel_y: i32,
    pub active: bool,
}

/// A thrown net. `velocity` is horizontal in phase 1 and vertical in phase 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projectile {
    pub hitbox: Hitbox,
    pub velocity: i32,
    pub active: bool,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            hitbox: Hitbox::new(0, 0, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            velocity: 0,
            active: false,
        }
    }
}

/// Anything that can live in a `Pool`: a value with an on/off flag.
pub trait Slot {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

impl Slot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Slot for Projectile {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Fixed array of `N` slots. Entries are never removed, only deactivated, so indices stay stable
/// for the whole run and no allocation happens after startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool<T, const N: usize> {
    slots: [T; N],
}

pub type EnemyPool = Pool<Enemy, MAX_ENEMIES>;
pub type ProjectilePool = Pool<Projectile, MAX_PROJECTILES>;

impl<T: Slot + Copy + Default, const N: usize> Default for Pool<T, N> {
    fn default() -> Self {
        Self {
            slots: [T::default(); N],
        }
    }
}

impl<T: Slot + Copy + Default, const N: usize> Pool<T, N> {
    /// All slots inactive.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Every slot, live or not, in index order.
    pub fn slots(&self) -> &[T] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }

    /// First inactive slot and its index, or `None` when every slot is live.
    pub fn first_free_mut(&mut self) -> Option<(usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| !slot.is_active())
    }

    /// Live slots in index order. Hit resolution relies on this order.
    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.slots().iter().filter(|slot| slot.is_active())
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|slot| slot.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Switches every slot off without touching the rest of its data.
    pub fn deactivate_all(&mut self) {
        for slot in &mut self.slots {
            slot.set_active(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_character_starts_full_and_standing() {
        let c = Character::new(100, 450, &GameSettings::default());
        assert_eq!(c.hitbox, Hitbox::new(100, 450, 50, 100));
        assert_eq!(c.hearts, MAX_HEARTS);
        assert_eq!(c.lives, MAX_LIVES);
        assert_eq!(c.facing, Facing::Right);
        assert!(!c.is_airborne());
        assert!(!c.is_crouching());
    }

    #[test]
    fn pool_reuses_first_inactive_slot() {
        let mut pool: Pool<Enemy, 3> = Pool::new();
        for _ in 0..3 {
            let (_, slot) = pool.first_free_mut().unwrap();
            slot.active = true;
        }
        assert!(pool.first_free_mut().is_none());

        pool.slots_mut()[1].active = false;
        let (index, _) = pool.first_free_mut().unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn deactivate_all_empties_the_pool() {
        let mut pool: ProjectilePool = Pool::new();
        pool.slots_mut()[0].active = true;
        pool.slots_mut()[7].active = true;
        assert_eq!(pool.active_count(), 2);

        pool.deactivate_all();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.capacity(), MAX_PROJECTILES);
    }
}
