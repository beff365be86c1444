//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the tuneable constants
//! in [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the constants you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.ball_force`, `config.pickup_total`, etc.

use crate::audio::synth::{ImpactMap, SynthParams};
use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay and audio configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/game.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Ball ─────────────────────────────────────────────────────────────────
    pub ball_force: f32,

    // ── Pickups ──────────────────────────────────────────────────────────────
    pub pickup_total: u32,
    pub pickup_spin_rate: f32,

    // ── Enemy ────────────────────────────────────────────────────────────────
    pub enemy_seek_force: f32,
    pub enemy_max_speed: f32,

    // ── Impact sound ─────────────────────────────────────────────────────────
    pub impact_speed_threshold: f32,
    pub impact_speed_full_scale: f32,
    pub impact_freq_min: f32,
    pub impact_freq_max: f32,
    pub default_frequency: f32,
    pub amplitude_decay_per_sample: f32,

    // ── Impact flash ─────────────────────────────────────────────────────────
    /// Toggle for the transient color flash accompanying an audible impact.
    pub impact_flash: bool,
    pub flash_secs: f32,

    // ── Audio output ─────────────────────────────────────────────────────────
    /// Master output gain in [0, 1].
    pub audio_volume: f32,
    /// Start the output stream immediately at setup.
    pub audio_auto_play: bool,
    /// Accepted for compatibility; the output stream is continuous either way.
    pub audio_looped: bool,
    /// Accepted for compatibility; no spatialization math is performed.
    pub audio_spatial_blend: f32,

    // ── HUD ──────────────────────────────────────────────────────────────────
    pub hud_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Ball
            ball_force: BALL_FORCE,
            // Pickups
            pickup_total: PICKUP_TOTAL,
            pickup_spin_rate: PICKUP_SPIN_RATE,
            // Enemy
            enemy_seek_force: ENEMY_SEEK_FORCE,
            enemy_max_speed: ENEMY_MAX_SPEED,
            // Impact sound
            impact_speed_threshold: IMPACT_SPEED_THRESHOLD,
            impact_speed_full_scale: IMPACT_SPEED_FULL_SCALE,
            impact_freq_min: IMPACT_FREQ_MIN,
            impact_freq_max: IMPACT_FREQ_MAX,
            default_frequency: DEFAULT_FREQUENCY,
            amplitude_decay_per_sample: AMPLITUDE_DECAY_PER_SAMPLE,
            // Impact flash
            impact_flash: true,
            flash_secs: FLASH_SECS,
            // Audio output
            audio_volume: AUDIO_VOLUME,
            audio_auto_play: true,
            audio_looped: true,
            audio_spatial_blend: 1.0,
            // HUD
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl GameConfig {
    /// Collision-speed → tone mapping parameters for the synthesizer.
    pub fn impact_map(&self) -> ImpactMap {
        ImpactMap {
            threshold: self.impact_speed_threshold,
            full_scale: self.impact_speed_full_scale,
            freq_min: self.impact_freq_min,
            freq_max: self.impact_freq_max,
        }
    }

    /// Oscillator parameters for the synthesizer.  The sample rate here is
    /// the compiled default; the output module overwrites it with the actual
    /// device rate once the stream config is known.
    pub fn synth_params(&self) -> SynthParams {
        SynthParams {
            default_frequency: self.default_frequency,
            decay_rate: self.amplitude_decay_per_sample,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are logged
/// but do not abort the game.  A missing file is silently ignored (defaults
/// are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("loaded game config from {path}");
            }
            Err(e) => {
                warn!("failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            info!("no {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = GameConfig::default();
        assert_eq!(config.ball_force, BALL_FORCE);
        assert_eq!(config.pickup_total, PICKUP_TOTAL);
        assert_eq!(config.impact_speed_threshold, IMPACT_SPEED_THRESHOLD);
        assert_eq!(config.amplitude_decay_per_sample, AMPLITUDE_DECAY_PER_SAMPLE);
        assert!(config.impact_flash);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: GameConfig =
            toml::from_str("ball_force = 14.0\nimpact_flash = false").expect("valid toml");
        assert_eq!(config.ball_force, 14.0);
        assert!(!config.impact_flash);
        // Unnamed keys keep their compiled defaults.
        assert_eq!(config.pickup_total, PICKUP_TOTAL);
        assert_eq!(config.default_frequency, DEFAULT_FREQUENCY);
    }

    #[test]
    fn impact_map_reflects_config() {
        let mut config = GameConfig::default();
        config.impact_freq_min = 100.0;
        config.impact_freq_max = 900.0;
        let map = config.impact_map();
        assert_eq!(map.freq_min, 100.0);
        assert_eq!(map.freq_max, 900.0);
        assert_eq!(map.threshold, IMPACT_SPEED_THRESHOLD);
    }
}
