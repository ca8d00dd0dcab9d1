//! Application entry point: window configuration, default plugins, and the game plugin from
//! `app.rs`.
//!
//! The simulation itself (collision, movement, enemies, nets, damage, camera, transition) is
//! plain Rust with no Bevy types in its signatures beyond the `Resource` derive; the Bevy side
//! only samples input, steps it on a fixed clock and draws what it reports.

mod app;
mod audio;
mod camera;
mod collision;
mod config;
mod enemies;
mod entities;
mod hud;
mod input;
mod level;
mod movement;
mod player;
mod projectiles;
mod render;
mod simulation;
mod state;
mod transition;
mod ui;

use app::LukesAdventurePlugin;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::window::{Window, WindowResolution};

use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::render::SKY;

fn main() {
    // Panics in wasm otherwise abort without a message in the browser console.
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    console_error_panic_hook::set_once();

    // The logical resolution matches the simulation's pixel space 1:1, so the window is fixed.
    let primary_window = Window {
        title: "Luke's Adventure".to_string(),
        resolution: WindowResolution::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
        resizable: false,
        canvas: cfg!(all(target_arch = "wasm32", feature = "web"))
            .then(|| "#bevy-canvas".to_owned()),
        ..default()
    };

    let default_plugins = DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(primary_window),
            ..default()
        })
        .set(ImagePlugin::default_nearest())
        .set(AssetPlugin {
            file_path: "assets".to_owned(),
            watch_for_changes_override: Some(cfg!(not(target_arch = "wasm32"))),
            ..default()
        });

    App::new()
        .insert_resource(ClearColor(SKY))
        .add_plugins(default_plugins)
        .add_plugins(LukesAdventurePlugin)
        .run();
}
