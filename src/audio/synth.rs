//! Impact-tone oscillator: the per-sample recurrence that turns a collision
//! trigger into a decaying sine burst.
//!
//! [`ImpactSynth`] is owned exclusively by the audio render thread.  The only
//! data that crosses threads is the [`Tone`] trigger published through
//! [`ImpactShared`](super::trigger::ImpactShared); [`render_block`] consumes
//! it at the start of each render tick before touching the oscillator.
//!
//! Parameter changes are applied abruptly — a collision landing mid-ring
//! retunes pitch and loudness in one sample.  The resulting click is the
//! intended percussive character, not an artifact to smooth away.

use super::trigger::{ImpactShared, Tone};
use std::f32::consts::TAU;

/// Oscillator parameters, fixed for the lifetime of a synth instance.
///
/// Explicit rather than global so tests can pin the sample rate and the
/// output module can substitute the actual device rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthParams {
    /// Oscillator frequency (Hz) before the first trigger retunes it.
    pub default_frequency: f32,
    /// Linear amplitude decrement applied once per rendered frame.
    pub decay_rate: f32,
    /// Output sample rate (Hz); converts frequency to phase increment.
    pub sample_rate: f32,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            default_frequency: crate::constants::DEFAULT_FREQUENCY,
            decay_rate: crate::constants::AMPLITUDE_DECAY_PER_SAMPLE,
            sample_rate: crate::constants::DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Collision-speed → tone mapping parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactMap {
    /// Contact speeds at or below this produce no tone at all.
    pub threshold: f32,
    /// Contact speed at which pitch and loudness saturate.
    pub full_scale: f32,
    /// Pitch (Hz) at the weakest audible impact.
    pub freq_min: f32,
    /// Pitch (Hz) at a full-scale impact.
    pub freq_max: f32,
}

impl Default for ImpactMap {
    fn default() -> Self {
        Self {
            threshold: crate::constants::IMPACT_SPEED_THRESHOLD,
            full_scale: crate::constants::IMPACT_SPEED_FULL_SCALE,
            freq_min: crate::constants::IMPACT_FREQ_MIN,
            freq_max: crate::constants::IMPACT_FREQ_MAX,
        }
    }
}

/// Map a relative contact speed to the tone it should trigger.
///
/// Returns `None` at or below the activation threshold (weak collisions are
/// silent) and for non-finite speeds.  Above it, pitch interpolates linearly
/// from `freq_min` to `freq_max` over `[0, full_scale]` and loudness is the
/// speed fraction clamped to [0, 1].
pub fn impact_tone(speed: f32, map: &ImpactMap) -> Option<Tone> {
    if !(speed > map.threshold) {
        return None;
    }
    let t = (speed / map.full_scale).min(1.0);
    Some(Tone {
        frequency: map.freq_min + (map.freq_max - map.freq_min) * t,
        amplitude: (speed / map.full_scale).clamp(0.0, 1.0),
    })
}

/// Decaying-sine oscillator state.  Render-thread exclusive.
#[derive(Debug, Clone)]
pub struct ImpactSynth {
    params: SynthParams,
    frequency: f32,
    /// Output gain in [0, 1]; decays linearly to exactly 0 and stays there
    /// until the next trigger.
    amplitude: f32,
    /// Phase accumulator, kept in [0, 2π).
    phase: f32,
}

impl ImpactSynth {
    pub fn new(params: SynthParams) -> Self {
        Self {
            params,
            frequency: params.default_frequency,
            amplitude: 0.0,
            phase: 0.0,
        }
    }

    /// Retune from a consumed trigger.  Amplitude is clamped to [0, 1];
    /// phase is deliberately left running so back-to-back impacts don't
    /// restart the waveform at a discontinuity larger than necessary.
    pub fn set_tone(&mut self, tone: Tone) {
        self.frequency = tone.frequency;
        self.amplitude = tone.amplitude.clamp(0.0, 1.0);
    }

    /// Fill one interleaved output buffer.
    ///
    /// Silent fast path: with zero amplitude the buffer is zeroed and the
    /// phase is left untouched.  Otherwise each frame advances the phase by
    /// `2π·f/sr` (wrapped by a single subtraction — the increment is ≪ 2π
    /// for audio-rate frequencies), emits `sin(phase) · amplitude · gain`
    /// into every channel, then decrements the amplitude, flooring at 0.
    ///
    /// Runs on the real-time audio thread: no locks, no allocation.
    pub fn render(&mut self, data: &mut [f32], channels: usize, gain: f32) {
        if self.amplitude <= 0.0 || channels == 0 {
            data.fill(0.0);
            return;
        }
        let step = TAU * self.frequency / self.params.sample_rate;
        let frames = data.len() / channels;
        for frame in 0..frames {
            self.phase += step;
            if self.phase >= TAU {
                self.phase -= TAU;
            }
            let sample = self.phase.sin() * self.amplitude * gain;
            self.amplitude = (self.amplitude - self.params.decay_rate).max(0.0);
            for ch in 0..channels {
                data[frame * channels + ch] = sample;
            }
        }
        // A trailing partial frame can only appear if the backend hands us a
        // buffer that is not a multiple of the channel count; leave it silent.
        data[frames * channels..].fill(0.0);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

/// One render tick: consume the pending trigger (if any), then fill the
/// buffer — silence when the emitting entity is gone, synthesis otherwise.
///
/// This is the whole body of the audio callback; it is kept out of the
/// stream closure so it can be driven directly in tests.
pub fn render_block(synth: &mut ImpactSynth, shared: &ImpactShared, data: &mut [f32], channels: usize) {
    if let Some(tone) = shared.take_trigger() {
        synth.set_tone(tone);
    }
    if !shared.is_alive() {
        data.fill(0.0);
        return;
    }
    synth.render(data, channels, shared.volume());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_params() -> SynthParams {
        SynthParams {
            default_frequency: 440.0,
            decay_rate: 0.005,
            sample_rate: 48_000.0,
        }
    }

    // ── impact_tone ──────────────────────────────────────────────────────────

    #[test]
    fn weak_collisions_are_silent() {
        let map = ImpactMap::default();
        assert!(impact_tone(0.0, &map).is_none());
        assert!(impact_tone(0.3, &map).is_none());
        assert!(impact_tone(0.5, &map).is_none()); // threshold itself is silent
        assert!(impact_tone(f32::NAN, &map).is_none());
    }

    #[test]
    fn tone_mapping_matches_formulas() {
        let map = ImpactMap::default();
        let tone = impact_tone(5.0, &map).expect("above threshold");
        assert!((tone.frequency - 600.0).abs() < 1e-3);
        assert!((tone.amplitude - 0.5).abs() < 1e-6);
    }

    #[test]
    fn tone_mapping_saturates_at_full_scale() {
        let map = ImpactMap::default();
        let tone = impact_tone(25.0, &map).expect("above threshold");
        assert_eq!(tone.frequency, 1000.0);
        assert_eq!(tone.amplitude, 1.0);
    }

    // ── ImpactSynth ──────────────────────────────────────────────────────────

    #[test]
    fn silent_synth_emits_silence_and_keeps_phase() {
        let mut synth = ImpactSynth::new(test_params());
        let mut buf = [1.0_f32; 64];
        synth.render(&mut buf, 2, 1.0);
        assert!(buf.iter().all(|&s| s == 0.0));
        assert_eq!(synth.phase(), 0.0);
    }

    #[test]
    fn first_sample_matches_worked_example() {
        // OnCollision(5.0) → 600 Hz at amplitude 0.5; first frame at 48 kHz:
        // phase ≈ 0.0785, sample ≈ sin(0.0785)·0.5 ≈ 0.0392, amplitude → 0.495.
        let mut synth = ImpactSynth::new(test_params());
        synth.set_tone(impact_tone(5.0, &ImpactMap::default()).unwrap());
        let mut buf = [0.0_f32; 2];
        synth.render(&mut buf, 2, 1.0);
        let expected_phase = TAU * 600.0 / 48_000.0;
        assert!((synth.phase() - expected_phase).abs() < 1e-6);
        assert!((buf[0] - expected_phase.sin() * 0.5).abs() < 1e-6);
        assert!((synth.amplitude() - 0.495).abs() < 1e-6);
    }

    #[test]
    fn all_channels_carry_the_same_sample() {
        let mut synth = ImpactSynth::new(test_params());
        synth.set_tone(Tone {
            frequency: 600.0,
            amplitude: 0.8,
        });
        let mut buf = [0.0_f32; 12];
        synth.render(&mut buf, 4, 1.0);
        for frame in buf.chunks(4) {
            assert!(frame.iter().all(|&s| s == frame[0]));
        }
    }

    #[test]
    fn amplitude_decays_monotonically_to_exactly_zero() {
        let mut synth = ImpactSynth::new(test_params());
        synth.set_tone(Tone {
            frequency: 600.0,
            amplitude: 0.5,
        });
        // ceil(0.5 / 0.005) = 100 frames to silence.
        let mut previous = synth.amplitude();
        let mut buf = [0.0_f32; 2];
        for _ in 0..100 {
            synth.render(&mut buf, 2, 1.0);
            assert!(synth.amplitude() <= previous);
            previous = synth.amplitude();
        }
        assert_eq!(synth.amplitude(), 0.0);
    }

    #[test]
    fn phase_stays_wrapped_over_long_renders() {
        let mut synth = ImpactSynth::new(test_params());
        // Full-scale tone so the decay leaves headroom for many buffers.
        synth.set_tone(Tone {
            frequency: 997.0,
            amplitude: 1.0,
        });
        let mut buf = [0.0_f32; 128];
        for _ in 0..10 {
            synth.render(&mut buf, 2, 1.0);
            let phase = synth.phase();
            assert!((0.0..TAU).contains(&phase), "phase out of range: {phase}");
        }
    }

    #[test]
    fn amplitude_clamps_on_retune() {
        let mut synth = ImpactSynth::new(test_params());
        synth.set_tone(Tone {
            frequency: 500.0,
            amplitude: 3.0,
        });
        assert_eq!(synth.amplitude(), 1.0);
    }

    #[test]
    fn gain_scales_output() {
        let mut synth = ImpactSynth::new(test_params());
        synth.set_tone(Tone {
            frequency: 600.0,
            amplitude: 0.5,
        });
        let mut loud = [0.0_f32; 2];
        synth.render(&mut loud, 2, 1.0);

        let mut synth = ImpactSynth::new(test_params());
        synth.set_tone(Tone {
            frequency: 600.0,
            amplitude: 0.5,
        });
        let mut quiet = [0.0_f32; 2];
        synth.render(&mut quiet, 2, 0.25);

        assert!((quiet[0] - loud[0] * 0.25).abs() < 1e-7);
    }

    // ── render_block ─────────────────────────────────────────────────────────

    #[test]
    fn render_block_consumes_pending_trigger() {
        let shared = ImpactShared::new(1.0);
        let mut synth = ImpactSynth::new(test_params());
        shared.publish(Tone {
            frequency: 600.0,
            amplitude: 0.5,
        });

        let mut buf = [0.0_f32; 4];
        render_block(&mut synth, &shared, &mut buf, 2);
        assert!((synth.frequency() - 600.0).abs() < 1e-6);
        assert!(buf[0] != 0.0);
        // Slot is consumed: a second tick sees no new trigger and keeps decaying.
        let amp_after_first = synth.amplitude();
        render_block(&mut synth, &shared, &mut buf, 2);
        assert!(synth.amplitude() < amp_after_first);
    }

    #[test]
    fn render_block_goes_silent_once_retired() {
        let shared = ImpactShared::new(1.0);
        let mut synth = ImpactSynth::new(test_params());
        shared.publish(Tone {
            frequency: 600.0,
            amplitude: 0.5,
        });
        shared.retire();

        let mut buf = [1.0_f32; 8];
        render_block(&mut synth, &shared, &mut buf, 2);
        assert!(buf.iter().all(|&s| s == 0.0));
    }
}
