//! High-level plugin composition.
//!
//! `LukesAdventurePlugin` registers every game plugin and pins the schedule layout: keyboard
//! sampling in `PreUpdate`, the simulation step in `FixedUpdate` at a 16 ms period, and
//! presentation (sprites, audio) in `Update`.

use std::time::Duration;

use bevy::prelude::*;

use crate::audio::GameAudioPlugin;
use crate::config::FRAME_MS;
use crate::input::InputPlugin;
use crate::render::RenderPlugin;
use crate::simulation::SimulationPlugin;
use crate::state::{toggle_pause, GameSet, GameState};
use crate::ui::UiPlugin;

/// Top-level plugin. Registers the game state, the fixed 16 ms step and every feature plugin.
pub struct LukesAdventurePlugin;

impl Plugin for LukesAdventurePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .insert_resource(Time::<Fixed>::from_duration(Duration::from_millis(FRAME_MS)))
            .add_plugins((
                InputPlugin,      // Keyboard → FrameInput latch.
                SimulationPlugin, // Settings, world state, fixed-step pipeline.
                GameAudioPlugin,  // Transition cue playback.
                RenderPlugin,     // RenderFrame → sprites.
                UiPlugin,         // Pause and game-over overlays.
            ))
            .configure_sets(
                FixedUpdate,
                GameSet::Simulation.run_if(in_state(GameState::Playing)),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(Update, toggle_pause);
    }
}

/// The default 2D camera is centred on the origin, which `render::to_world` relies on.
fn setup_camera(mut commands: Commands) {
    commands.spawn((Name::new("MainCamera"), Camera2dBundle::default()));
}
