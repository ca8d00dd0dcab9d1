//! Character kinematics: run, jump, gravity, crouch, and resolution against solid obstacles.
//!
//! Integration is semi-implicit Euler on integer pixels: position moves by the current velocity,
//! then gravity is added. Horizontal and vertical axes are resolved separately so that a wall hit
//! never cancels a landing and vice versa.

use crate::collision::{intersects, overlaps_any_solid, Hitbox};
use crate::config::GameSettings;
use crate::entities::{Character, Facing, Motion, Obstacle, Posture};
use crate::input::FrameInput;
use crate::level::Level;

/// Runs one fixed step of character movement against `level`.
pub fn apply_kinematics(
    character: &mut Character,
    input: &FrameInput,
    level: &Level,
    settings: &GameSettings,
) {
    let dx = input.axis() * character.speed;
    character.hitbox.x += dx;
    if dx > 0 {
        character.facing = Facing::Right;
    } else if dx < 0 {
        character.facing = Facing::Left;
    }

    resolve_horizontal(character, dx, &level.obstacles);

    if input.jump && !character.is_airborne() && !character.is_crouching() {
        character.motion = Motion::Airborne;
        character.vel_y = character.jump_impulse;
    }

    character.hitbox.y += character.vel_y;
    character.vel_y += settings.gravity;

    let grounded = match level.floor_y {
        Some(floor_y) => rest_on_floor(character, floor_y),
        None => resolve_vertical(character, &level.obstacles),
    };

    // Zero velocity without support is the apex of a jump, not standing.
    if !grounded && character.vel_y == 0 {
        character.motion = Motion::Airborne;
    }

    update_posture(character, input.down, &level.obstacles, settings);

    let max_x = level.width - character.hitbox.w;
    character.hitbox.x = character.hitbox.x.clamp(0, max_x.max(0));
}

/// Pushes the character flush against any solid it walked into, on the side it came from.
fn resolve_horizontal(character: &mut Character, dx: i32, obstacles: &[Obstacle]) {
    if dx == 0 {
        return;
    }

    for obstacle in obstacles.iter().filter(|o| o.solid) {
        if !intersects(&character.hitbox, &obstacle.hitbox) {
            continue;
        }
        if dx > 0 {
            character.hitbox.x = obstacle.hitbox.x - character.hitbox.w;
        } else {
            character.hitbox.x = obstacle.hitbox.right();
        }
    }
}

/// Lands on or bumps into solids. Returns true when the character ended the step supported.
fn resolve_vertical(character: &mut Character, obstacles: &[Obstacle]) -> bool {
    let mut grounded = false;

    for obstacle in obstacles.iter().filter(|o| o.solid) {
        let surface = obstacle.hitbox;
        if !intersects(&character.hitbox, &surface) {
            continue;
        }

        if character.vel_y > 0 && character.hitbox.bottom() > surface.y {
            character.hitbox.y = surface.y - character.hitbox.h;
            character.vel_y = 0;
            character.motion = Motion::Grounded;
            grounded = true;
        } else if character.vel_y < 0 && character.hitbox.y < surface.bottom() {
            character.hitbox.y = surface.bottom();
            character.vel_y = 0;
            character.motion = Motion::Airborne;
            grounded = false;
        }
    }

    grounded
}

fn rest_on_floor(character: &mut Character, floor_y: i32) -> bool {
    if character.hitbox.bottom() < floor_y {
        return false;
    }

    character.hitbox.y = floor_y - character.hitbox.h;
    character.vel_y = 0;
    character.motion = Motion::Grounded;
    true
}

fn update_posture(
    character: &mut Character,
    crouch_held: bool,
    obstacles: &[Obstacle],
    settings: &GameSettings,
) {
    if crouch_held && !character.is_airborne() {
        if !character.is_crouching() {
            character.posture = Posture::Crouching;
            character.hitbox.h -= settings.crouch_delta;
            character.hitbox.y += settings.crouch_delta;
        }
    } else if character.is_crouching() && can_stand(character, obstacles, settings) {
        character.posture = Posture::Standing;
        character.hitbox.y -= settings.crouch_delta;
        character.hitbox.h += settings.crouch_delta;
    }
}

/// Whether a crouching character has headroom to stand back up. Standing characters always can.
pub fn can_stand(character: &Character, obstacles: &[Obstacle], settings: &GameSettings) -> bool {
    if !character.is_crouching() {
        return true;
    }

    let standing = Hitbox {
        y: character.hitbox.y - settings.crouch_delta,
        h: character.hitbox.h + settings.crouch_delta,
        ..character.hitbox
    };
    !overlaps_any_solid(&standing, obstacles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{PhaseId, FLOOR_Y, START_X, START_Y};

    fn settings() -> GameSettings {
        GameSettings::default()
    }

    fn surface() -> Level {
        Level::for_phase(PhaseId::Surface)
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    /// Standing on the phase 1 ground with zero velocity.
    fn grounded_character() -> Character {
        Character::new(START_X, START_Y, &settings())
    }

    #[test]
    fn free_fall_gains_gravity_each_frame() {
        let mut c = Character::new(START_X, 100, &settings());
        c.vel_y = 3;
        apply_kinematics(&mut c, &idle(), &surface(), &settings());
        assert_eq!(c.hitbox.y, 103);
        assert_eq!(c.vel_y, 4);
    }

    #[test]
    fn resting_character_never_sinks_into_the_ground() {
        let level = surface();
        let mut c = grounded_character();
        for _ in 0..30 {
            apply_kinematics(&mut c, &idle(), &level, &settings());
            assert!(c.hitbox.bottom() <= FLOOR_Y);
            assert!(!c.is_airborne());
        }
    }

    #[test]
    fn jump_sets_impulse_and_lifts_off() {
        let mut c = grounded_character();
        let input = FrameInput {
            jump: true,
            ..idle()
        };
        apply_kinematics(&mut c, &input, &surface(), &settings());
        assert!(c.is_airborne());
        assert_eq!(c.hitbox.y, START_Y - 15);
        assert_eq!(c.vel_y, -14);
    }

    #[test]
    fn jump_is_ignored_while_crouching() {
        let mut c = grounded_character();
        let crouch = FrameInput {
            down: true,
            ..idle()
        };
        apply_kinematics(&mut c, &crouch, &surface(), &settings());
        assert!(c.is_crouching());

        let crouch_jump = FrameInput {
            down: true,
            jump: true,
            ..idle()
        };
        apply_kinematics(&mut c, &crouch_jump, &surface(), &settings());
        assert!(!c.is_airborne());
        assert!(c.vel_y >= 0);
    }

    #[test]
    fn full_jump_lands_back_on_the_ground() {
        let level = surface();
        let mut c = grounded_character();
        let jump = FrameInput {
            jump: true,
            ..idle()
        };
        apply_kinematics(&mut c, &jump, &level, &settings());
        for _ in 0..60 {
            apply_kinematics(&mut c, &idle(), &level, &settings());
        }
        assert_eq!(c.hitbox.y, START_Y);
        assert!(!c.is_airborne());
    }

    #[test]
    fn apex_with_zero_velocity_counts_as_airborne() {
        let mut c = Character::new(START_X, 200, &settings());
        c.vel_y = -1;
        c.motion = Motion::Grounded;
        apply_kinematics(&mut c, &idle(), &surface(), &settings());
        assert_eq!(c.vel_y, 0);
        assert!(c.is_airborne());
    }

    #[test]
    fn walking_into_a_wall_snaps_flush() {
        let wall = Obstacle::new(Hitbox::new(300, 0, 40, 600), true, false);
        let level = Level {
            obstacles: vec![wall],
            ..surface()
        };
        let mut c = Character::new(245, 200, &settings());
        let right = FrameInput {
            right: true,
            ..idle()
        };
        apply_kinematics(&mut c, &right, &level, &settings());
        assert_eq!(c.hitbox.right(), 300);
        assert_eq!(c.facing, Facing::Right);

        let mut c = Character::new(345, 200, &settings());
        let left = FrameInput {
            left: true,
            ..idle()
        };
        apply_kinematics(&mut c, &left, &level, &settings());
        assert_eq!(c.hitbox.x, 340);
        assert_eq!(c.facing, Facing::Left);
    }

    #[test]
    fn facing_persists_when_standing_still() {
        let mut c = grounded_character();
        c.facing = Facing::Left;
        apply_kinematics(&mut c, &idle(), &surface(), &settings());
        assert_eq!(c.facing, Facing::Left);
    }

    #[test]
    fn rising_into_a_ceiling_stops_the_jump() {
        let ceiling = Obstacle::new(Hitbox::new(0, 420, 400, 20), true, true);
        let level = Level {
            obstacles: vec![ceiling],
            ..surface()
        };
        let mut c = Character::new(START_X, 445, &settings());
        c.vel_y = -10;
        c.motion = Motion::Airborne;
        apply_kinematics(&mut c, &idle(), &level, &settings());
        assert_eq!(c.hitbox.y, 440);
        assert_eq!(c.vel_y, 0);
        assert!(c.is_airborne());
    }

    #[test]
    fn crouch_shrinks_from_the_top_and_stand_restores() {
        let level = surface();
        let mut c = grounded_character();
        let crouch = FrameInput {
            down: true,
            ..idle()
        };
        apply_kinematics(&mut c, &crouch, &level, &settings());
        assert!(c.is_crouching());
        assert_eq!(c.hitbox.h, 50);
        assert_eq!(c.hitbox.bottom(), FLOOR_Y);

        apply_kinematics(&mut c, &idle(), &level, &settings());
        assert!(!c.is_crouching());
        assert_eq!(c.hitbox.h, 100);
        assert!(c.hitbox.bottom() <= FLOOR_Y);
    }

    #[test]
    fn cannot_stand_under_a_low_ceiling() {
        let mut level = surface();
        level
            .obstacles
            .push(Obstacle::new(Hitbox::new(0, 470, 400, 20), true, false));

        let mut c = grounded_character();
        c.posture = Posture::Crouching;
        c.hitbox.h = 50;
        c.hitbox.y = FLOOR_Y - 50;
        assert!(!can_stand(&c, &level.obstacles, &settings()));

        for _ in 0..5 {
            apply_kinematics(&mut c, &idle(), &level, &settings());
            assert!(c.is_crouching());
            assert_eq!(c.hitbox.h, 50);
        }
    }

    #[test]
    fn rainfall_floor_grounds_the_character() {
        let level = Level::for_phase(PhaseId::Rainfall);
        let mut c = Character::new(START_X, 300, &settings());
        c.motion = Motion::Airborne;
        for _ in 0..60 {
            apply_kinematics(&mut c, &idle(), &level, &settings());
        }
        assert_eq!(c.hitbox.y, START_Y);
        assert_eq!(c.vel_y, 0);
        assert!(!c.is_airborne());
    }

    #[test]
    fn position_is_clamped_to_the_phase() {
        let level = surface();
        let mut c = grounded_character();
        c.hitbox.x = 5;
        let left = FrameInput {
            left: true,
            ..idle()
        };
        apply_kinematics(&mut c, &left, &level, &settings());
        assert_eq!(c.hitbox.x, 0);

        c.hitbox.x = level.width - 52;
        let right = FrameInput {
            right: true,
            ..idle()
        };
        apply_kinematics(&mut c, &right, &level, &settings());
        assert_eq!(c.hitbox.right(), level.width);
    }
}
