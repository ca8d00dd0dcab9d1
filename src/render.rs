//! Draws the `RenderFrame` projection with plain Bevy sprites.
//!
//! The frame is rebuilt from scratch every `Update`: last frame's sprites are despawned and the
//! current projection is spawned in their place. The static backdrop is spawned once.
//!
//! All rectangles arrive in window pixels (top-left origin, y down). `to_world` maps them onto the
//! default 2D camera, which is centred on the window with y up.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::collision::Hitbox;
use crate::config::{GameSettings, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::hud::{Overlay, RenderFrame, SceneryKind, SCREEN};
use crate::simulation::{clock_ms, Simulation};
use crate::state::GameSet;

/// Draws the `RenderFrame` of the current step with plain sprites.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (load_textures, spawn_backdrop))
            .add_systems(Update, draw_frame.in_set(GameSet::Present));
    }
}

/// Window clear colour and backdrop fill.
pub const SKY: Color = Color::srgb(80.0 / 255.0, 120.0 / 255.0, 200.0 / 255.0);
const MOUNTAIN: Color = Color::srgb(100.0 / 255.0, 100.0 / 255.0, 120.0 / 255.0);
const SUN: Color = Color::srgb(255.0 / 255.0, 255.0 / 255.0, 100.0 / 255.0);
const OBSTACLE: Color = Color::srgb(100.0 / 255.0, 60.0 / 255.0, 20.0 / 255.0);
const DOOR: Color = Color::srgb(0.0 / 255.0, 200.0 / 255.0, 0.0 / 255.0);
const FLOOR: Color = Color::srgb(70.0 / 255.0, 70.0 / 255.0, 100.0 / 255.0);
const ENEMY: Color = Color::srgb(200.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0);
const NET: Color = Color::srgb(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0);
const HURT: Color = Color::srgb(255.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0);
const HEART_FULL: Color = Color::srgb(255.0 / 255.0, 0.0 / 255.0, 0.0 / 255.0);
const HEART_EMPTY: Color = Color::srgb(60.0 / 255.0, 0.0 / 255.0, 0.0 / 255.0);
const GOLD: Color = Color::srgb(255.0 / 255.0, 215.0 / 255.0, 0.0 / 255.0);

const CAPTION_FONT_SIZE: f32 = 36.0;
const OVERLAY_BOX: Hitbox = Hitbox::new(
    WINDOW_WIDTH / 2 - 280,
    WINDOW_HEIGHT / 2 - 60,
    560,
    120,
);

/// Draw order, back to front.
mod z {
    pub const BACKDROP: f32 = 0.0;
    pub const SCENERY: f32 = 1.0;
    pub const ENEMY: f32 = 2.0;
    pub const NET: f32 = 3.0;
    pub const CHARACTER: f32 = 4.0;
    pub const HUD: f32 = 5.0;
    pub const SHADE: f32 = 6.0;
    pub const BORDER: f32 = 7.0;
    pub const BOX: f32 = 8.0;
    pub const CAPTION: f32 = 9.0;
}

#[derive(Resource)]
pub struct SpriteTextures {
    pub character: Handle<Image>,
    pub enemy: Handle<Image>,
    pub net: Handle<Image>,
}

/// Everything spawned for the current frame; despawned before the next one is drawn.
#[derive(Component)]
struct FrameSprite;

fn load_textures(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SpriteTextures {
        character: asset_server.load("textures/luke.png"),
        enemy: asset_server.load("textures/spider.png"),
        net: asset_server.load("textures/net.png"),
    });
}

/// Centre of a window-space rectangle in camera space.
pub fn to_world(rect: &Hitbox, z: f32) -> Vec3 {
    Vec3::new(
        (rect.x + rect.w / 2 - WINDOW_WIDTH / 2) as f32 + (rect.w % 2) as f32 * 0.5,
        (WINDOW_HEIGHT / 2 - rect.y - rect.h / 2) as f32 - (rect.h % 2) as f32 * 0.5,
        z,
    )
}

fn rect_sprite(rect: &Hitbox, color: Color, z: f32) -> SpriteBundle {
    SpriteBundle {
        sprite: Sprite {
            color,
            custom_size: Some(Vec2::new(rect.w as f32, rect.h as f32)),
            ..default()
        },
        transform: Transform::from_translation(to_world(rect, z)),
        ..default()
    }
}

/// Textured when the image is ready, otherwise a flat rectangle in `fallback`.
fn textured_sprite(
    rect: &Hitbox,
    texture: Option<&Handle<Image>>,
    tint: Color,
    fallback: Color,
    z: f32,
) -> SpriteBundle {
    match texture {
        Some(texture) => SpriteBundle {
            texture: texture.clone(),
            ..rect_sprite(rect, tint, z)
        },
        None => rect_sprite(rect, fallback, z),
    }
}

fn spawn_backdrop(mut commands: Commands) {
    let pieces = [
        (Hitbox::new(100, 400, 300, 200), MOUNTAIN),
        (Hitbox::new(700, 350, 400, 250), MOUNTAIN),
        (Hitbox::new(850, 100, 80, 80), SUN),
    ];

    commands.spawn((Name::new("Sky"), rect_sprite(&SCREEN, SKY, z::BACKDROP)));
    for (rect, color) in pieces {
        commands.spawn((Name::new("Backdrop"), rect_sprite(&rect, color, z::BACKDROP + 0.1)));
    }
}

fn ready<'a>(
    asset_server: &AssetServer,
    handle: &'a Handle<Image>,
    warned: &mut bool,
) -> Option<&'a Handle<Image>> {
    match asset_server.get_load_state(handle.id()) {
        Some(LoadState::Loaded) => Some(handle),
        Some(LoadState::Failed(_)) => {
            if !*warned {
                warn!(
                    "Texture {:?} failed to load; drawing a flat rectangle instead.",
                    handle.path()
                );
                *warned = true;
            }
            None
        }
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_frame(
    mut commands: Commands,
    simulation: Option<Res<Simulation>>,
    settings: Res<GameSettings>,
    time: Res<Time<Fixed>>,
    asset_server: Res<AssetServer>,
    textures: Option<Res<SpriteTextures>>,
    previous: Query<Entity, With<FrameSprite>>,
    mut warned: Local<[bool; 3]>,
) {
    for entity in &previous {
        commands.entity(entity).despawn_recursive();
    }

    let Some(simulation) = simulation else {
        return;
    };
    let frame = simulation.project(clock_ms(&time), &settings);

    let (character_tex, enemy_tex, net_tex) = match textures.as_deref() {
        Some(t) => (
            ready(&asset_server, &t.character, &mut warned[0]),
            ready(&asset_server, &t.enemy, &mut warned[1]),
            ready(&asset_server, &t.net, &mut warned[2]),
        ),
        None => (None, None, None),
    };

    spawn_world(&mut commands, &frame, character_tex, enemy_tex, net_tex);
    spawn_hud(&mut commands, &frame);
    if let Some(overlay) = frame.overlay {
        spawn_overlay(&mut commands, overlay);
    }
}

fn spawn_world(
    commands: &mut Commands,
    frame: &RenderFrame,
    character_tex: Option<&Handle<Image>>,
    enemy_tex: Option<&Handle<Image>>,
    net_tex: Option<&Handle<Image>>,
) {
    for piece in &frame.scenery {
        let color = match piece.kind {
            SceneryKind::Obstacle => OBSTACLE,
            SceneryKind::Door => DOOR,
            SceneryKind::Floor => FLOOR,
        };
        commands.spawn((FrameSprite, rect_sprite(&piece.rect, color, z::SCENERY)));
    }

    for rect in &frame.enemies {
        commands.spawn((
            FrameSprite,
            textured_sprite(rect, enemy_tex, Color::WHITE, ENEMY, z::ENEMY),
        ));
    }

    for rect in &frame.nets {
        commands.spawn((
            FrameSprite,
            textured_sprite(rect, net_tex, Color::WHITE, NET, z::NET),
        ));
    }

    let tint = if frame.hurt_flash { HURT } else { Color::WHITE };
    commands.spawn((
        FrameSprite,
        textured_sprite(&frame.character, character_tex, tint, tint, z::CHARACTER),
    ));
}

fn spawn_hud(commands: &mut Commands, frame: &RenderFrame) {
    for pip in &frame.hearts {
        let color = if pip.filled { HEART_FULL } else { HEART_EMPTY };
        commands.spawn((FrameSprite, rect_sprite(&pip.rect, color, z::HUD)));
    }

    if !frame.life_bar.is_empty() {
        commands.spawn((
            FrameSprite,
            rect_sprite(&frame.life_bar, Color::WHITE, z::HUD),
        ));
    }
}

fn spawn_overlay(commands: &mut Commands, overlay: Overlay) {
    let alpha = overlay.alpha as f32 / 255.0;
    let inner = Hitbox::new(
        OVERLAY_BOX.x + 1,
        OVERLAY_BOX.y + 1,
        OVERLAY_BOX.w - 2,
        OVERLAY_BOX.h - 2,
    );

    commands.spawn((
        FrameSprite,
        rect_sprite(&SCREEN, Color::BLACK.with_alpha(alpha / 2.0), z::SHADE),
    ));
    commands.spawn((
        FrameSprite,
        rect_sprite(&OVERLAY_BOX, Color::BLACK.with_alpha(alpha), z::BORDER),
    ));
    commands.spawn((
        FrameSprite,
        rect_sprite(&inner, GOLD.with_alpha(alpha), z::BOX),
    ));
    commands.spawn((
        FrameSprite,
        Text2dBundle {
            text: Text::from_section(
                overlay.caption,
                TextStyle {
                    font_size: CAPTION_FONT_SIZE,
                    color: Color::WHITE.with_alpha(alpha),
                    ..default()
                },
            ),
            transform: Transform::from_translation(to_world(&OVERLAY_BOX, z::CAPTION)),
            ..default()
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_screen_rect_maps_to_the_origin() {
        assert_eq!(to_world(&SCREEN, 0.0), Vec3::ZERO);
    }

    #[test]
    fn top_left_maps_up_and_left() {
        let heart = Hitbox::new(20, 20, 25, 25);
        assert_eq!(to_world(&heart, 5.0), Vec3::new(-467.5, 267.5, 5.0));

        let floor = Hitbox::new(0, 550, 1000, 50);
        assert_eq!(to_world(&floor, 1.0), Vec3::new(0.0, -275.0, 1.0));
    }
}
