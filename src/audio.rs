//! Sound cues. The simulation only emits `SoundCommand` events; this plugin turns them into audio
//! entities.
//!
//! Each cue keeps a list of candidate handles in preference order. Whichever one finished loading
//! first in that order is played; if none did, the cue stays silent and the game carries on.

use bevy::asset::LoadState;
use bevy::audio::AudioSinkPlayback;
use bevy::prelude::*;

use crate::state::GameSet;

/// Loads the cue files at startup and turns `SoundCommand` events from the simulation into
/// playing or stopped audio entities.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CueHandles>()
            .add_systems(Startup, load_cue_handles)
            .add_systems(Update, play_sound_commands.in_set(GameSet::Present));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Played when the door is reached, stopped when the next phase begins.
    Transition,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCommand {
    Play(Cue),
    Stop(Cue),
}

/// Candidate sources per cue, most preferred first.
#[derive(Resource, Default)]
pub struct CueHandles {
    pub transition: Vec<Handle<AudioSource>>,
}

impl CueHandles {
    fn candidates(&self, cue: Cue) -> &[Handle<AudioSource>] {
        match cue {
            Cue::Transition => &self.transition,
        }
    }
}

/// Marks a playing audio entity with the cue it belongs to so it can be stopped early.
#[derive(Component)]
pub struct CuePlayback(pub Cue);

fn load_cue_handles(asset_server: Res<AssetServer>, mut handles: ResMut<CueHandles>) {
    handles.transition = vec![
        asset_server.load("audio/transition.mp3"),
        asset_server.load("audio/transition.wav"),
    ];
    info!("Queued transition cue (mp3, wav fallback).");
}

fn loaded_source(
    asset_server: &AssetServer,
    handles: &CueHandles,
    cue: Cue,
) -> Option<Handle<AudioSource>> {
    handles
        .candidates(cue)
        .iter()
        .find(|handle| {
            matches!(
                asset_server.get_load_state(handle.id()),
                Some(LoadState::Loaded)
            )
        })
        .cloned()
}

fn play_sound_commands(
    mut commands: Commands,
    mut events: EventReader<SoundCommand>,
    asset_server: Res<AssetServer>,
    handles: Res<CueHandles>,
    playing: Query<(Entity, &CuePlayback, Option<&AudioSink>)>,
) {
    for event in events.read() {
        match *event {
            SoundCommand::Play(cue) => {
                let Some(source) = loaded_source(&asset_server, &handles, cue) else {
                    warn!("No audio loaded for {:?}; playing silently.", cue);
                    continue;
                };
                commands.spawn((
                    Name::new("CuePlayback"),
                    CuePlayback(cue),
                    AudioBundle {
                        source,
                        settings: PlaybackSettings::DESPAWN,
                    },
                ));
            }
            SoundCommand::Stop(cue) => {
                for (entity, tag, sink) in &playing {
                    if tag.0 != cue {
                        continue;
                    }
                    if let Some(sink) = sink {
                        sink.stop();
                    }
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}
