//! Run state and system-set ordering.
//!
//! `GameState` gates the fixed-step simulation: it only advances in `Playing`. Pausing also stops
//! `Time<Virtual>`, which is what `Time<Fixed>` is fed from, so the step clock and every timer
//! derived from it freeze with it.

use bevy::input::keyboard::KeyCode;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum GameState {
    #[default]
    Playing,
    Paused,
    /// Terminal. Nothing leaves this state; the only way out is quitting.
    GameOver,
}

/// Named system sets. `Input` runs in `PreUpdate`, `Simulation` in `FixedUpdate` and `Present`
/// in `Update`, so each only orders systems within its own schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Simulation,
    Present,
}

/// ESC flips between Playing and Paused. The transition itself is applied by Bevy at the next
/// state-transition point; the virtual clock is toggled here so the fixed step stops at once.
pub fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut time: ResMut<Time<Virtual>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    match state.get() {
        GameState::Playing => {
            time.pause();
            next_state.set(GameState::Paused);
            info!("Paused.");
        }
        GameState::Paused => {
            time.unpause();
            next_state.set(GameState::Playing);
            info!("Resumed.");
        }
        GameState::GameOver => {}
    }
}
