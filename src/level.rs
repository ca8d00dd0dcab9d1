//! Phase layouts. Each phase owns its static geometry, width, goal door and start position.
//!
//! Layouts are built in code; nothing here changes once a `Level` has been constructed.

use crate::collision::Hitbox;
use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::entities::{Enemy, EnemyPool, Obstacle};

/// Where every phase begins and where the character respawns after losing a life.
pub const START_X: i32 = 100;
pub const START_Y: i32 = WINDOW_HEIGHT - 150;

/// Top edge of the ground in both phases.
pub const FLOOR_Y: i32 = WINDOW_HEIGHT - 50;

/// World width of every phase. Phase 2 is drawn without scrolling, so only its first screen is
/// visible.
pub const PHASE_WIDTH: i32 = 3000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PhaseId {
    /// Phase 1: wide scrolling level with platforms, patrolling enemies and a door.
    #[default]
    Surface,
    /// Phase 2: flat arena where enemies rain from above the first screen.
    Rainfall,
}

impl PhaseId {
    /// Phase number as shown to the player.
    pub fn number(self) -> u8 {
        match self {
            PhaseId::Surface => 1,
            PhaseId::Rainfall => 2,
        }
    }

    /// Where the door of this phase leads, if it has one.
    pub fn next(self) -> Option<PhaseId> {
        match self {
            PhaseId::Surface => Some(PhaseId::Rainfall),
            PhaseId::Rainfall => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub phase: PhaseId,
    pub width: i32,
    /// Empty for phases that ground the character on `floor_y` instead.
    pub obstacles: Vec<Obstacle>,
    pub door: Option<Hitbox>,
    pub floor_y: Option<i32>,
}

impl Level {
    /// Builds the fixed layout of `phase`.
    pub fn for_phase(phase: PhaseId) -> Self {
        match phase {
            PhaseId::Surface => Self::surface(),
            PhaseId::Rainfall => Self::rainfall(),
        }
    }

    fn surface() -> Self {
        let ground = Obstacle::new(Hitbox::new(0, FLOOR_Y, PHASE_WIDTH, 50), true, false);
        let platform = |x, y, w| Obstacle::new(Hitbox::new(x, y, w, 20), true, true);

        Self {
            phase: PhaseId::Surface,
            width: PHASE_WIDTH,
            obstacles: vec![
                ground,
                platform(600, WINDOW_HEIGHT - 120, 100),
                platform(1000, WINDOW_HEIGHT - 200, 150),
                platform(1300, WINDOW_HEIGHT - 250, 150),
                platform(2000, WINDOW_HEIGHT - 120, 100),
            ],
            door: Some(Hitbox::new(2800, WINDOW_HEIGHT - 150, 50, 100)),
            floor_y: None,
        }
    }

    fn rainfall() -> Self {
        Self {
            phase: PhaseId::Rainfall,
            width: PHASE_WIDTH,
            obstacles: Vec::new(),
            door: None,
            floor_y: Some(FLOOR_Y),
        }
    }

    /// Whether the camera follows the character. Only phase 1 scrolls, and only when it is wider
    /// than the window.
    pub fn scrolls(&self) -> bool {
        self.phase == PhaseId::Surface && self.width > WINDOW_WIDTH
    }

    /// Top-left corner the character starts from, and respawns at after losing a life.
    pub fn start_position(&self) -> (i32, i32) {
        (START_X, START_Y)
    }
}

/// Fills the pool with the enemies a phase starts with. Phase 2 starts empty.
pub fn populate_enemies(phase: PhaseId, pool: &mut EnemyPool) {
    pool.deactivate_all();
    if phase != PhaseId::Surface {
        return;
    }

    let patrols = [(800, -1, 2), (1600, 1, 3), (2300, -1, 2)];
    for (slot, (x, dir, speed)) in pool.slots_mut().iter_mut().zip(patrols) {
        *slot = Enemy {
            hitbox: Hitbox::new(x, WINDOW_HEIGHT - 150, 50, 50),
            dir,
            speed,
            vel_y: 0,
            active: true,
        };
    }
}
