//! The per-step game pipeline and the Bevy plumbing that drives it.
//!
//! `Simulation` is the whole mutable game world in one struct. `Simulation::step` advances it by
//! exactly one fixed step in a fixed order: fire, movement, enemies, nets, damage, door, camera.
//! While a transition runs only the sequencer is polled; nothing else moves until the new phase
//! is applied, exactly once, when the sequence ends.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::{Cue, SoundCommand};
use crate::camera;
use crate::config::{load_settings, GameSettings};
use crate::enemies::{update_enemies, RainSpawner};
use crate::entities::{Character, EnemyPool, ProjectilePool};
use crate::input::{FrameInput, InputLatch};
use crate::level::{populate_enemies, Level, PhaseId};
use crate::movement::apply_kinematics;
use crate::player::{resolve_contact_damage, DamageOutcome};
use crate::projectiles::{self, KillTally};
use crate::state::{GameSet, GameState};
use crate::transition::{door_reached, Sequencer};

/// Owns the `Simulation` resource and steps it once per `FixedUpdate` tick.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SoundCommand>()
            .insert_resource(SimRng(StdRng::from_entropy()))
            .add_systems(Startup, (load_settings, start_simulation).chain())
            .add_systems(FixedUpdate, advance_simulation.in_set(GameSet::Simulation));
    }
}

/// Randomness for rain spawns. Tests pass their own seeded `StdRng` to `step` instead.
#[derive(Resource)]
pub struct SimRng(pub StdRng);

/// `GameOver` is terminal: once set, `step` returns immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunStatus {
    #[default]
    Running,
    GameOver,
}

/// What one step produced for the outside world.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub sounds: Vec<SoundCommand>,
    pub status: RunStatus,
}

/// The whole game world. Fields are public so the HUD projection and tests can read and arrange
/// it directly; only `step` advances it.
#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    pub character: Character,
    pub level: Level,
    pub enemies: EnemyPool,
    pub nets: ProjectilePool,
    pub camera_x: i32,
    pub kills: KillTally,
    pub sequencer: Sequencer,
    pub rain: RainSpawner,
    status: RunStatus,
}

impl Simulation {
    /// Fresh run in phase 1 with the three patrols placed. `now_ms` seeds the rain timer.
    pub fn new(settings: &GameSettings, now_ms: u64) -> Self {
        let level = Level::for_phase(PhaseId::Surface);
        let (x, y) = level.start_position();
        let mut enemies = EnemyPool::new();
        populate_enemies(level.phase, &mut enemies);

        Self {
            character: Character::new(x, y, settings),
            level,
            enemies,
            nets: ProjectilePool::new(),
            camera_x: 0,
            kills: KillTally::default(),
            sequencer: Sequencer::Playing,
            rain: RainSpawner::new(now_ms),
            status: RunStatus::Running,
        }
    }

    pub fn phase(&self) -> PhaseId {
        self.level.phase
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Advances the world by one fixed step. `now_ms` is the step's clock reading and is the only
    /// time source used for the whole step.
    pub fn step(
        &mut self,
        input: &FrameInput,
        now_ms: u64,
        rng: &mut impl Rng,
        settings: &GameSettings,
    ) -> StepReport {
        let mut report = StepReport {
            status: self.status,
            ..default()
        };
        if self.status == RunStatus::GameOver {
            return report;
        }

        if self.sequencer.is_transitioning() {
            if let Some(destination) = self.sequencer.poll(now_ms, settings) {
                self.enter_phase(destination);
                report.sounds.push(SoundCommand::Stop(Cue::Transition));
            }
            return report;
        }

        let phase = self.phase();

        if input.fire {
            projectiles::fire(&mut self.nets, &self.character, phase, settings);
        }

        apply_kinematics(&mut self.character, input, &self.level, settings);

        update_enemies(
            phase,
            &mut self.enemies,
            &mut self.rain,
            now_ms,
            rng,
            settings,
        );

        projectiles::advance(&mut self.nets, phase, self.level.width);
        projectiles::resolve_hits(
            &mut self.nets,
            &mut self.enemies,
            &mut self.kills,
            &mut self.character,
            settings,
        );

        let respawn = self.level.start_position();
        if resolve_contact_damage(&mut self.character, &self.enemies, respawn, settings)
            == DamageOutcome::GameOver
        {
            self.status = RunStatus::GameOver;
            report.status = RunStatus::GameOver;
            return report;
        }

        if let (Some(door), Some(destination)) = (self.level.door, phase.next()) {
            if door_reached(&self.character.hitbox, &door, self.camera_x)
                && self.sequencer.begin(now_ms, destination)
            {
                report.sounds.push(SoundCommand::Play(Cue::Transition));
            }
        }

        self.camera_x = camera::follow(&self.character.hitbox, &self.level);
        report
    }

    /// Applies a finished transition. Nets in flight and the rain timer carry over.
    fn enter_phase(&mut self, phase: PhaseId) {
        self.level = Level::for_phase(phase);
        let (x, y) = self.level.start_position();
        self.character.teleport(x, y);
        self.character.vel_y = 0;
        self.camera_x = 0;
        populate_enemies(phase, &mut self.enemies);
        self.kills = KillTally::default();
    }
}

fn start_simulation(mut commands: Commands, settings: Res<GameSettings>) {
    commands.insert_resource(Simulation::new(&settings, 0));
    info!("Simulation ready in phase {}.", PhaseId::Surface.number());
}

/// Step clock in whole milliseconds, read once per fixed step.
pub fn clock_ms(time: &Time<Fixed>) -> u64 {
    time.elapsed().as_millis() as u64
}

fn advance_simulation(
    time: Res<Time<Fixed>>,
    settings: Res<GameSettings>,
    mut latch: ResMut<InputLatch>,
    mut rng: ResMut<SimRng>,
    mut simulation: ResMut<Simulation>,
    mut sounds: EventWriter<SoundCommand>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let input = latch.take_frame();
    let report = simulation.step(&input, clock_ms(&time), &mut rng.0, &settings);

    sounds.send_batch(report.sounds);
    if report.status == RunStatus::GameOver {
        next_state.set(GameState::GameOver);
    }
}
