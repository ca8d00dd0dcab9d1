//! Game-wide constants and the tunable `GameSettings` resource.
//!
//! Pool capacities and the window size are fixed at compile time because the rest of the
//! simulation sizes arrays and layouts from them. Everything that only changes how the game
//! *feels* lives in `GameSettings`, whose `Default` carries the shipped values. Native builds may
//! override individual fields from a `settings.ron` file in the working directory.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Window size in pixels. The simulation's screen space uses the same units.
pub const WINDOW_WIDTH: i32 = 1000;
pub const WINDOW_HEIGHT: i32 = 600;

pub const MAX_HEARTS: u32 = 5;
pub const MAX_LIVES: u32 = 5;
/// Pool capacities. Spawns beyond these are dropped.
pub const MAX_ENEMIES: usize = 20;
pub const MAX_PROJECTILES: usize = 50;

pub const PROJECTILE_WIDTH: i32 = 24;
pub const PROJECTILE_HEIGHT: i32 = 12;

/// Length of one simulation step.
pub const FRAME_MS: u64 = 16;

/// Optional override file, read relative to the working directory on native builds.
pub const SETTINGS_PATH: &str = "settings.ron";

/// Tunables consumed by the simulation core. Cloned into tests freely; it only holds integers.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub gravity: i32,
    pub run_speed: i32,
    /// Vertical velocity applied on jump. Negative is up.
    pub jump_impulse: i32,
    /// Height lost while crouching; the hitbox shrinks from the top.
    pub crouch_delta: i32,
    pub invincibility_frames: u32,
    pub kills_per_life: u32,
    pub projectile_speed: i32,
    pub patrol_min_x: i32,
    pub patrol_max_x: i32,
    pub rain_interval_ms: u64,
    pub rain_speed_min: i32,
    pub rain_speed_max: i32,
    pub rain_enemy_size: i32,
    pub fade_in_ms: u64,
    pub hold_ms: u64,
    pub fade_out_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            gravity: 1,
            run_speed: 10,
            jump_impulse: -15,
            crouch_delta: 50,
            invincibility_frames: 60,
            kills_per_life: 10,
            projectile_speed: 12,
            patrol_min_x: 500,
            patrol_max_x: 2500,
            rain_interval_ms: 1500,
            rain_speed_min: 3,
            rain_speed_max: 6,
            rain_enemy_size: 40,
            fade_in_ms: 1000,
            hold_ms: 3000,
            fade_out_ms: 1000,
        }
    }
}

impl GameSettings {
    pub fn transition_ms(&self) -> u64 {
        self.fade_in_ms + self.hold_ms + self.fade_out_ms
    }

    pub fn from_ron_str(source: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings = ron::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.gravity <= 0 {
            return Err(SettingsError::Invalid("gravity must be positive".to_owned()));
        }
        if self.run_speed <= 0 || self.projectile_speed <= 0 {
            return Err(SettingsError::Invalid(
                "run_speed and projectile_speed must be positive".to_owned(),
            ));
        }
        if self.jump_impulse >= 0 {
            return Err(SettingsError::Invalid(
                "jump_impulse must be negative (up)".to_owned(),
            ));
        }
        if self.crouch_delta <= 0 {
            return Err(SettingsError::Invalid("crouch_delta must be positive".to_owned()));
        }
        if self.kills_per_life == 0 {
            return Err(SettingsError::Invalid("kills_per_life must be at least 1".to_owned()));
        }
        if self.patrol_min_x >= self.patrol_max_x {
            return Err(SettingsError::Invalid(format!(
                "patrol bounds are inverted ({} >= {})",
                self.patrol_min_x, self.patrol_max_x
            )));
        }
        if self.rain_speed_min <= 0 || self.rain_speed_min > self.rain_speed_max {
            return Err(SettingsError::Invalid(format!(
                "rain speed range {}..={} is empty or not downward",
                self.rain_speed_min, self.rain_speed_max
            )));
        }
        if self.rain_enemy_size <= 0 || self.rain_enemy_size >= WINDOW_WIDTH {
            return Err(SettingsError::Invalid(format!(
                "rain_enemy_size {} does not fit the window",
                self.rain_enemy_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Invalid(String),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::Parse(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
            SettingsError::Invalid(e) => write!(f, "Invalid settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Startup system: resolves the settings resource before the simulation is created.
pub fn load_settings(mut commands: Commands) {
    commands.insert_resource(resolve_settings());
}

#[cfg(not(target_arch = "wasm32"))]
fn resolve_settings() -> GameSettings {
    let path = Path::new(SETTINGS_PATH);
    match GameSettings::load(path) {
        Ok(settings) => {
            info!("Loaded game settings from '{}'.", path.display());
            settings
        }
        Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No '{}' found; using built-in settings.", path.display());
            GameSettings::default()
        }
        Err(e) => {
            warn!(
                "Ignoring '{}' ({}); continuing with built-in settings.",
                path.display(),
                e
            );
            GameSettings::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn resolve_settings() -> GameSettings {
    GameSettings::default()
}
