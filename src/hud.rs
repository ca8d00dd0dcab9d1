//! Read-only projection of the simulation into screen-space drawables.
//!
//! Everything here is in window pixels with a top-left origin and y pointing down. The render
//! plugin is the only consumer and does no game logic of its own.

use crate::camera::to_screen;
use crate::collision::{intersects, Hitbox};
use crate::config::{GameSettings, MAX_HEARTS, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::level::PhaseId;
use crate::simulation::Simulation;
use crate::transition::TRANSITION_CAPTION;

const HUD_MARGIN: i32 = 20;
const HEART_SIZE: i32 = 25;
const HEART_GAP: i32 = 5;
const LIFE_BAR_UNIT: i32 = 20;
const LIFE_BAR_HEIGHT: i32 = 10;

/// The window in screen pixels; anything not overlapping it is left out of the frame.
pub const SCREEN: Hitbox = Hitbox::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneryKind {
    Obstacle,
    Door,
    Floor,
}

/// A static rectangle of the level, already in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenery {
    pub rect: Hitbox,
    pub kind: SceneryKind,
}

/// One heart slot in the top-left HUD row. Empty slots are still drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartPip {
    pub rect: Hitbox,
    pub filled: bool,
}

/// Full-window fade drawn over everything while a transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub alpha: u8,
    pub caption: &'static str,
}

/// One frame's worth of drawables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    pub phase: PhaseId,
    pub scenery: Vec<Scenery>,
    pub enemies: Vec<Hitbox>,
    pub nets: Vec<Hitbox>,
    pub character: Hitbox,
    /// Set on the off half of the invincibility blink (`invincibility % 10 >= 5`).
    pub hurt_flash: bool,
    pub hearts: Vec<HeartPip>,
    /// Width grows with the remaining lives.
    pub life_bar: Hitbox,
    pub overlay: Option<Overlay>,
}

impl Simulation {
    /// Screen-space view of the current step. Only phase 1 is drawn through the camera; phase 2
    /// always shows its first screen.
    pub fn project(&self, now_ms: u64, settings: &GameSettings) -> RenderFrame {
        let camera_x = match self.level.phase {
            PhaseId::Surface => self.camera_x,
            PhaseId::Rainfall => 0,
        };
        let visible = |world: &Hitbox| {
            let rect = to_screen(world, camera_x);
            intersects(&rect, &SCREEN).then_some(rect)
        };

        let mut scenery: Vec<Scenery> = match self.level.phase {
            PhaseId::Surface => self
                .level
                .obstacles
                .iter()
                .filter_map(|o| visible(&o.hitbox))
                .map(|rect| Scenery {
                    rect,
                    kind: SceneryKind::Obstacle,
                })
                .collect(),
            PhaseId::Rainfall => Vec::new(),
        };
        if let Some(rect) = self.level.door.as_ref().and_then(visible) {
            scenery.push(Scenery {
                rect,
                kind: SceneryKind::Door,
            });
        }
        if let Some(floor_y) = self.level.floor_y {
            scenery.push(Scenery {
                rect: Hitbox::new(0, floor_y, WINDOW_WIDTH, WINDOW_HEIGHT - floor_y),
                kind: SceneryKind::Floor,
            });
        }

        let character = &self.character;
        RenderFrame {
            phase: self.level.phase,
            scenery,
            enemies: self.enemies.active().filter_map(|e| visible(&e.hitbox)).collect(),
            nets: self.nets.active().filter_map(|n| visible(&n.hitbox)).collect(),
            character: to_screen(&character.hitbox, camera_x),
            hurt_flash: character.invincibility % 10 >= 5,
            hearts: heart_pips(character.hearts),
            life_bar: life_bar(character.lives),
            overlay: self
                .sequencer
                .overlay_alpha(now_ms, settings)
                .map(|alpha| Overlay {
                    alpha,
                    caption: TRANSITION_CAPTION,
                }),
        }
    }
}

fn heart_pips(hearts: u32) -> Vec<HeartPip> {
    (0..MAX_HEARTS as i32)
        .map(|i| HeartPip {
            rect: Hitbox::new(
                HUD_MARGIN + i * (HEART_SIZE + HEART_GAP),
                HUD_MARGIN,
                HEART_SIZE,
                HEART_SIZE,
            ),
            filled: (i as u32) < hearts,
        })
        .collect()
}

fn life_bar(lives: u32) -> Hitbox {
    Hitbox::new(
        HUD_MARGIN,
        HUD_MARGIN + 40,
        LIFE_BAR_UNIT * lives as i32,
        LIFE_BAR_HEIGHT,
    )
}
