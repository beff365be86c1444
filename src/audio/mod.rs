//! Procedural impact audio: collisions of the ball retune a decaying sine
//! oscillator rendered in real time on the audio thread.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`synth`] | Oscillator state, speed→tone mapping, per-sample render loop |
//! | [`trigger`] | Lock-free atomics shared between simulation and render threads |
//! | [`output`] | cpal device/stream setup on a dedicated worker thread |
//! | [`flash`] | Transient alert-color flash with deferred restore |
//!
//! ## Data flow
//!
//! One-directional: a Rapier contact event → [`impact_collision_system`]
//! computes the relative contact speed and publishes a
//! [`Tone`](trigger::Tone) into the shared single-slot trigger → the next
//! render tick consumes it and synthesizes until the amplitude decays to
//! zero.  The render thread never blocks, allocates, or waits.

pub mod flash;
pub mod output;
pub mod synth;
pub mod trigger;

use crate::arena::Pickup;
use crate::config::GameConfig;
use crate::constants::{AMPLITUDE_DECAY_PER_SAMPLE, IMPACT_SPEED_FULL_SCALE, IMPACT_SPEED_THRESHOLD};
use crate::error::{validate_decay_rate, validate_full_scale, validate_impact_threshold};
use crate::menu::GameState;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::sync::Arc;
use synth::impact_tone;
use trigger::ImpactShared;

/// Marker for the entity whose collisions produce impact sounds (the ball).
#[derive(Component)]
pub struct ImpactSound;

/// Game-side handle to the synthesizer state shared with the render thread.
///
/// `output` is `None` when no audio device is available — the game runs
/// silent, publishing triggers nobody consumes.
#[derive(Resource)]
pub struct ImpactAudio {
    pub shared: Arc<ImpactShared>,
    _output: Option<output::OutputHandle>,
}

impl ImpactAudio {
    /// Handle with no output stream: triggers are still published and the
    /// liveness flag still works, nothing consumes them.  Used when the
    /// audio device is unavailable and in headless tests.
    pub fn detached(shared: Arc<ImpactShared>) -> Self {
        Self {
            shared,
            _output: None,
        }
    }
}

pub struct ImpactAudioPlugin;

impl Plugin for ImpactAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            setup_impact_audio.after(crate::config::load_game_config),
        )
        .add_systems(
            PostUpdate,
            impact_collision_system.run_if(in_state(GameState::Playing)),
        )
        .add_systems(Update, flash::flash_restore_system);
    }
}

/// Startup system: sanitize the audio tunables, then bring up the output
/// stream.  A missing or failing audio device degrades to a silent game
/// with a logged warning; it is never fatal.
pub fn setup_impact_audio(mut commands: Commands, mut config: ResMut<GameConfig>) {
    if let Err(e) = validate_decay_rate(config.amplitude_decay_per_sample) {
        warn!("{e}; using the compiled default");
        config.amplitude_decay_per_sample = AMPLITUDE_DECAY_PER_SAMPLE;
    }
    if let Err(e) = validate_impact_threshold(config.impact_speed_threshold) {
        warn!("{e}; using the compiled default");
        config.impact_speed_threshold = IMPACT_SPEED_THRESHOLD;
    }
    if let Err(e) = validate_full_scale(config.impact_speed_full_scale) {
        warn!("{e}; using the compiled default");
        config.impact_speed_full_scale = IMPACT_SPEED_FULL_SCALE;
    }

    let shared = Arc::new(ImpactShared::new(config.audio_volume));
    let audio = match output::start(
        shared.clone(),
        config.synth_params(),
        config.audio_auto_play,
    ) {
        Ok(handle) => ImpactAudio {
            shared,
            _output: Some(handle),
        },
        Err(e) => {
            warn!("audio output unavailable: {e}; continuing without sound");
            ImpactAudio::detached(shared)
        }
    };
    commands.insert_resource(audio);
}

/// Turn new contacts involving the ball into synthesizer triggers (and,
/// when enabled, a color flash).
///
/// The relative contact speed is approximated from the two bodies' linear
/// velocities; fixed colliders (ground, walls) count as stationary.  Speeds
/// at or below the activation threshold are silently ignored — the rolling
/// ball grazes the ground constantly and none of that should click.
#[allow(clippy::too_many_arguments)]
pub fn impact_collision_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    q_ball: Query<(Entity, &Velocity, &MeshMaterial3d<StandardMaterial>), With<ImpactSound>>,
    q_vel: Query<&Velocity>,
    q_pickups: Query<(), With<Pickup>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    audio: Res<ImpactAudio>,
    config: Res<GameConfig>,
) {
    let Ok((ball, ball_vel, material)) = q_ball.single() else {
        return;
    };
    let map = config.impact_map();

    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };

        let other = if e1 == ball {
            e2
        } else if e2 == ball {
            e1
        } else {
            continue;
        };

        // Pickups are sensors; scooping one up is not an impact.
        if q_pickups.contains(other) {
            continue;
        }

        let other_linvel = q_vel.get(other).map(|v| v.linvel).unwrap_or(Vec3::ZERO);
        let speed = (ball_vel.linvel - other_linvel).length();
        let Some(tone) = impact_tone(speed, &map) else {
            continue;
        };

        audio.shared.publish(tone);
        if config.impact_flash {
            flash::start_flash(
                &mut commands,
                &mut materials,
                ball,
                material,
                config.flash_secs,
            );
        }
    }
}
