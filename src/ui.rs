//! Pause overlay and game-over banner, both plain Bevy UI nodes layered over the sprite scene.

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::state::GameState;

/// Pause menu and game-over banner, both driven by `GameState` transitions.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Paused), spawn_pause_menu)
            .add_systems(OnExit(GameState::Paused), despawn_with::<PauseMenu>)
            .add_systems(OnEnter(GameState::GameOver), spawn_game_over_banner)
            .add_systems(
                Update,
                quit_on_confirm.run_if(in_state(GameState::GameOver)),
            );
    }
}

#[derive(Component)]
struct PauseMenu;

#[derive(Component)]
struct GameOverBanner;

/// Full-window node with one centred line of text over a translucent backdrop.
fn centred_message(text: &str, dim: f32, font_size: f32) -> (NodeBundle, TextBundle) {
    let node = NodeBundle {
        background_color: BackgroundColor(Color::srgba(0.0, 0.0, 0.0, dim)),
        style: Style {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            ..default()
        },
        z_index: ZIndex::Global(10),
        ..default()
    };
    let text = TextBundle::from_section(
        text,
        TextStyle {
            font_size,
            color: Color::srgba(0.9, 0.9, 0.9, 1.0),
            ..default()
        },
    )
    .with_text_justify(JustifyText::Center);

    (node, text)
}

fn spawn_pause_menu(mut commands: Commands) {
    let (node, text) = centred_message("Paused\nPress ESC to resume", 0.6, 36.0);
    commands
        .spawn((PauseMenu, Name::new("PauseMenu"), node))
        .with_children(|parent| {
            parent.spawn(text);
        });
}

fn spawn_game_over_banner(mut commands: Commands) {
    let (node, text) = centred_message("Game Over\nPress Enter or ESC to quit", 0.75, 48.0);
    commands
        .spawn((GameOverBanner, Name::new("GameOverBanner"), node))
        .with_children(|parent| {
            parent.spawn(text);
        });
}

fn despawn_with<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

fn quit_on_confirm(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::Escape]) {
        info!("Quitting after game over.");
        exit.send(AppExit::Success);
    }
}
