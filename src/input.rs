//! Keyboard sampling. The simulation never touches `ButtonInput` directly; it receives one
//! `FrameInput` per fixed step from the `InputLatch` resource.
//!
//! Held keys are refreshed every render frame. The fire key is edge-triggered: a press is latched
//! until the next fixed step consumes it, so a tap between two steps is never lost and holding the
//! key fires only once.

use bevy::input::keyboard::KeyCode;
use bevy::input::InputSystem;
use bevy::prelude::*;

use crate::state::GameSet;

/// Samples the keyboard into `InputLatch` before the fixed steps of each frame run.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputLatch>().add_systems(
            PreUpdate,
            sample_keyboard.after(InputSystem).in_set(GameSet::Input),
        );
    }
}

/// Controls as seen by one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub jump: bool,
    /// True only on the step that consumes a fresh press.
    pub fire: bool,
}

impl FrameInput {
    /// −1, 0 or +1; opposite keys cancel out.
    pub fn axis(&self) -> i32 {
        i32::from(self.right) - i32::from(self.left)
    }
}

#[derive(Resource, Debug, Default)]
pub struct InputLatch {
    held: FrameInput,
    fire_pending: bool,
}

impl InputLatch {
    pub fn set_held(&mut self, left: bool, right: bool, down: bool, jump: bool) {
        self.held = FrameInput {
            left,
            right,
            down,
            jump,
            fire: false,
        };
    }

    pub fn press_fire(&mut self) {
        self.fire_pending = true;
    }

    /// Snapshot for one step. Clears the fire latch.
    pub fn take_frame(&mut self) -> FrameInput {
        FrameInput {
            fire: std::mem::take(&mut self.fire_pending),
            ..self.held
        }
    }
}

fn sample_keyboard(keyboard: Res<ButtonInput<KeyCode>>, mut latch: ResMut<InputLatch>) {
    latch.set_held(
        keyboard.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]),
        keyboard.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]),
        keyboard.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]),
        keyboard.pressed(KeyCode::Space),
    );

    if keyboard.just_pressed(KeyCode::KeyX) {
        latch.press_fire();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions_cancel() {
        let both = FrameInput {
            left: true,
            right: true,
            ..default()
        };
        assert_eq!(both.axis(), 0);
        assert_eq!(FrameInput { left: true, ..default() }.axis(), -1);
        assert_eq!(FrameInput { right: true, ..default() }.axis(), 1);
    }

    #[test]
    fn fire_is_delivered_exactly_once() {
        let mut latch = InputLatch::default();
        latch.set_held(false, true, false, false);
        latch.press_fire();

        let first = latch.take_frame();
        assert!(first.fire);
        assert!(first.right);

        let second = latch.take_frame();
        assert!(!second.fire);
        assert!(second.right);
    }
}
