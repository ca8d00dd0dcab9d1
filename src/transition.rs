//! Timed phase-change sequence. Touching the door starts a fade to black, a hold, and a fade
//! back; gameplay is frozen throughout and the new phase is applied once the sequence ends.
//!
//! All timing is derived from the step clock passed in by the caller, never sampled here.

use bevy::log::info;

use crate::camera::to_screen;
use crate::collision::{intersects, Hitbox};
use crate::config::GameSettings;
use crate::level::PhaseId;

/// Caption shown on the overlay while a transition is running.
pub const TRANSITION_CAPTION: &str = "Você está mudando de fase";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sequencer {
    #[default]
    Playing,
    Transitioning {
        started_ms: u64,
        destination: PhaseId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStage {
    FadeIn,
    Hold,
    FadeOut,
}

impl Sequencer {
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Sequencer::Transitioning { .. })
    }

    /// Starts a transition. Returns false, and changes nothing, if one is already running.
    pub fn begin(&mut self, now_ms: u64, destination: PhaseId) -> bool {
        if self.is_transitioning() {
            return false;
        }
        *self = Sequencer::Transitioning {
            started_ms: now_ms,
            destination,
        };
        info!("Transition to phase {} started.", destination.number());
        true
    }

    /// Ends the transition once its full duration has elapsed and hands back the destination.
    pub fn poll(&mut self, now_ms: u64, settings: &GameSettings) -> Option<PhaseId> {
        let Sequencer::Transitioning {
            started_ms,
            destination,
        } = *self
        else {
            return None;
        };

        if now_ms.saturating_sub(started_ms) < settings.transition_ms() {
            return None;
        }

        *self = Sequencer::Playing;
        info!("Transition finished; entering phase {}.", destination.number());
        Some(destination)
    }

    /// Milliseconds since the transition began, or `None` while playing.
    pub fn elapsed_ms(&self, now_ms: u64) -> Option<u64> {
        match *self {
            Sequencer::Playing => None,
            Sequencer::Transitioning { started_ms, .. } => Some(now_ms.saturating_sub(started_ms)),
        }
    }

    pub fn stage(&self, now_ms: u64, settings: &GameSettings) -> Option<TransitionStage> {
        self.elapsed_ms(now_ms)
            .map(|elapsed| stage_at(elapsed, settings))
    }

    /// Overlay opacity: 0→255 over the fade-in, 255 for the hold, 255→0 over the fade-out.
    pub fn overlay_alpha(&self, now_ms: u64, settings: &GameSettings) -> Option<u8> {
        let elapsed = self.elapsed_ms(now_ms)?;
        let stage = self.stage(now_ms, settings)?;
        Some(alpha_in_stage(stage, elapsed, settings))
    }
}

fn stage_at(elapsed_ms: u64, settings: &GameSettings) -> TransitionStage {
    if elapsed_ms < settings.fade_in_ms {
        TransitionStage::FadeIn
    } else if elapsed_ms < settings.fade_in_ms + settings.hold_ms {
        TransitionStage::Hold
    } else {
        TransitionStage::FadeOut
    }
}

fn alpha_in_stage(stage: TransitionStage, elapsed_ms: u64, settings: &GameSettings) -> u8 {
    let ramp = |part: u64, whole: u64| (part.min(whole) * 255 / whole) as u8;

    match stage {
        TransitionStage::FadeIn => ramp(elapsed_ms, settings.fade_in_ms),
        TransitionStage::Hold => 255,
        TransitionStage::FadeOut => {
            let into = elapsed_ms - settings.fade_in_ms - settings.hold_ms;
            if into >= settings.fade_out_ms {
                0
            } else {
                ramp(settings.fade_out_ms - into, settings.fade_out_ms)
            }
        }
    }
}

/// Door trigger, tested in screen space like everything the player can see.
pub fn door_reached(character: &Hitbox, door: &Hitbox, camera_x: i32) -> bool {
    intersects(&to_screen(character, camera_x), &to_screen(door, camera_x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GameSettings {
        GameSettings::default()
    }

    fn alpha_at(elapsed_ms: u64, s: &GameSettings) -> u8 {
        let seq = Sequencer::Transitioning {
            started_ms: 0,
            destination: PhaseId::Rainfall,
        };
        seq.overlay_alpha(elapsed_ms, s).unwrap()
    }

    #[test]
    fn alpha_ramps_holds_and_fades() {
        let s = settings();
        assert_eq!(alpha_at(0, &s), 0);
        assert_eq!(alpha_at(500, &s), 127);
        assert_eq!(alpha_at(999, &s), 254);
        assert_eq!(alpha_at(1000, &s), 255);
        assert_eq!(alpha_at(2500, &s), 255);
        assert_eq!(alpha_at(3999, &s), 255);
        assert_eq!(alpha_at(4000, &s), 255);
        assert_eq!(alpha_at(4500, &s), 127);
        assert_eq!(alpha_at(4999, &s), 0);
        assert_eq!(alpha_at(5000, &s), 0);
        assert_eq!(alpha_at(9000, &s), 0);
    }

    #[test]
    fn stages_follow_the_timeline() {
        let s = settings();
        assert_eq!(stage_at(0, &s), TransitionStage::FadeIn);
        assert_eq!(stage_at(1000, &s), TransitionStage::Hold);
        assert_eq!(stage_at(3999, &s), TransitionStage::Hold);
        assert_eq!(stage_at(4000, &s), TransitionStage::FadeOut);
    }

    #[test]
    fn sequencer_finishes_after_the_full_duration() {
        let s = settings();
        let mut seq = Sequencer::default();
        assert!(seq.begin(10_000, PhaseId::Rainfall));
        assert!(!seq.begin(10_001, PhaseId::Rainfall));

        assert_eq!(seq.stage(10_500, &s), Some(TransitionStage::FadeIn));
        assert_eq!(seq.stage(14_500, &s), Some(TransitionStage::FadeOut));
        assert_eq!(seq.poll(14_999, &s), None);
        assert!(seq.is_transitioning());
        assert_eq!(seq.overlay_alpha(12_000, &s), Some(255));

        assert_eq!(seq.poll(15_000, &s), Some(PhaseId::Rainfall));
        assert_eq!(seq, Sequencer::Playing);
        assert_eq!(seq.poll(20_000, &s), None);
        assert_eq!(seq.overlay_alpha(20_000, &s), None);
        assert_eq!(seq.stage(20_000, &s), None);
    }

    #[test]
    fn door_check_is_independent_of_camera() {
        let door = Hitbox::new(2800, 450, 50, 100);
        let touching = Hitbox::new(2760, 450, 50, 100);
        let short = Hitbox::new(2750, 450, 50, 100);
        assert!(door_reached(&touching, &door, 2000));
        assert!(door_reached(&touching, &door, 0));
        assert!(!door_reached(&short, &door, 2000));
    }
}
