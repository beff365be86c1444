//! Audio output stream: connects the impact synthesizer to the default
//! output device.
//!
//! The cpal stream and the [`ImpactSynth`] it drives live on a dedicated
//! worker thread (`cpal::Stream` is not `Send`, and Bevy resources must be).
//! The worker builds the stream, reports the outcome back once, then blocks
//! until the shutdown sender held by the Bevy side is dropped — at which
//! point the stream is dropped and the device released.
//!
//! Everything inside the render callback goes through
//! [`render_block`](super::synth::render_block): trigger consumption, the
//! liveness check, and the per-sample recurrence.  No locks, no allocation.

use super::synth::{render_block, ImpactSynth, SynthParams};
use super::trigger::ImpactShared;
use crate::error::GameError;
use bevy::prelude::warn;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

/// Keeps the audio worker alive; dropping it shuts the stream down.
pub struct OutputHandle {
    _shutdown: Sender<()>,
}

/// Spawn the audio worker thread and wait for it to report stream status.
///
/// On success the returned handle must be kept for as long as audio should
/// play.  On failure the caller is expected to log and continue — a silent
/// game is the designed degradation, never a crash.
pub fn start(
    shared: Arc<ImpactShared>,
    params: SynthParams,
    auto_play: bool,
) -> Result<OutputHandle, GameError> {
    let (status_tx, status_rx) = mpsc::channel();
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    thread::Builder::new()
        .name("impact-audio".into())
        .spawn(move || match build_stream(shared, params, auto_play) {
            Ok(stream) => {
                let _ = status_tx.send(Ok(()));
                // Hold the stream until the game side drops its sender.
                let _ = shutdown_rx.recv();
                drop(stream);
            }
            Err(e) => {
                let _ = status_tx.send(Err(e));
            }
        })
        .map_err(|_| GameError::AudioWorkerDied)?;

    status_rx.recv().map_err(|_| GameError::AudioWorkerDied)??;
    Ok(OutputHandle {
        _shutdown: shutdown_tx,
    })
}

/// Open the default output device and build the render stream.
///
/// The device's own sample rate and channel count override the compiled
/// defaults in `params` so the phase math matches what the hardware plays.
fn build_stream(
    shared: Arc<ImpactShared>,
    params: SynthParams,
    auto_play: bool,
) -> Result<cpal::Stream, GameError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(GameError::NoOutputDevice)?;
    let supported = device
        .default_output_config()
        .map_err(|e| GameError::AudioBackend {
            context: "default output config",
            reason: e.to_string(),
        })?;

    let channels = supported.channels().max(1) as usize;
    let config = cpal::StreamConfig {
        channels: supported.channels(),
        sample_rate: supported.sample_rate(),
        buffer_size: cpal::BufferSize::Default,
    };

    let mut synth = ImpactSynth::new(SynthParams {
        sample_rate: supported.sample_rate().0 as f32,
        ..params
    });

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                render_block(&mut synth, &shared, data, channels);
            },
            |err| warn!("audio stream error: {err}"),
            None,
        )
        .map_err(|e| GameError::AudioBackend {
            context: "build output stream",
            reason: e.to_string(),
        })?;

    if auto_play {
        stream.play().map_err(|e| GameError::AudioBackend {
            context: "start playback",
            reason: e.to_string(),
        })?;
    }

    Ok(stream)
}
