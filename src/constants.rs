//! Centralised gameplay and audio constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! Runtime overrides come from `assets/game.toml` via
//! [`crate::config::GameConfig`]; this file remains the authoritative default
//! source.

use bevy::prelude::{Color, Vec3};

// ── Ball: Movement ────────────────────────────────────────────────────────────

/// Horizontal force (N) applied per unit of input-axis deflection, once per
/// fixed simulation step.
///
/// The ball collider (radius 0.5, density 1) has mass ≈ 0.52 kg, so full
/// deflection accelerates it at ≈ 19 m/s² before friction.  Values below ~4.0
/// feel sluggish on the default arena; above ~25.0 the ball outruns the
/// camera comfort zone.
pub const BALL_FORCE: f32 = 10.0;

/// Radius (m) of the ball's sphere collider and render mesh.
pub const BALL_RADIUS: f32 = 0.5;

/// Linear damping applied by Rapier every physics step.
/// Keeps the ball from coasting forever once input stops.
pub const BALL_LINEAR_DAMPING: f32 = 0.4;

/// Angular damping applied to the ball's spin.
pub const BALL_ANGULAR_DAMPING: f32 = 0.6;

/// Restitution coefficient for the ball.  0.0 = dead drop; 1.0 = superball.
pub const BALL_RESTITUTION: f32 = 0.3;

/// Friction coefficient for ball-ground contacts; drives the rolling feel.
pub const BALL_FRICTION: f32 = 0.8;

/// Spawn height of the ball centre above the ground plane (m).
pub const BALL_SPAWN_HEIGHT: f32 = 1.0;

// ── Pickups ───────────────────────────────────────────────────────────────────

/// Number of pickups spawned, and the collection total that wins the game.
pub const PICKUP_TOTAL: u32 = 8;

/// Radius (m) of the ring the pickups are placed on.
pub const PICKUP_RING_RADIUS: f32 = 6.0;

/// Half-extent (m) of the pickup cube mesh and sensor collider.
pub const PICKUP_HALF_EXTENT: f32 = 0.3;

/// Height (m) of the pickup centre above the ground.
pub const PICKUP_HOVER_HEIGHT: f32 = 0.5;

/// Idle spin rate (rad/s) around the vertical axis.
pub const PICKUP_SPIN_RATE: f32 = 1.2;

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// Steering force (N) pulling the enemy toward the ball.
pub const ENEMY_SEEK_FORCE: f32 = 4.0;

/// Speed clamp (m/s) so the enemy stays outrunnable.
/// Must remain below the ball's terminal speed (~6 m/s at default damping)
/// or the lose condition becomes unavoidable.
pub const ENEMY_MAX_SPEED: f32 = 2.5;

/// Radius (m) of the enemy's sphere collider and render mesh.
pub const ENEMY_RADIUS: f32 = 0.5;

/// Enemy spawn position; opposite corner from the ball so the opening seconds
/// are pressure-free.
pub const ENEMY_SPAWN: Vec3 = Vec3::new(-7.0, 0.5, 7.0);

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Half-extent (m) of the square ground plane.
pub const GROUND_HALF_EXTENT: f32 = 10.0;

/// Thickness (m) of the ground's collider slab (top face sits at y = 0).
pub const GROUND_THICKNESS: f32 = 0.2;

/// Height (m) of the perimeter walls.
pub const WALL_HEIGHT: f32 = 1.0;

/// Thickness (m) of the perimeter walls.
pub const WALL_THICKNESS: f32 = 0.5;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Fixed offset from the ball to the follow camera.  The camera translates
/// with the ball but never rotates, so the control axes stay screen-stable.
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 10.0, -11.0);

// ── Impact sound ──────────────────────────────────────────────────────────────

/// Minimum relative contact speed (m/s) below which a collision produces no
/// sound (and no flash).  Filters out the continuous grazing contacts of a
/// ball rolling on the ground.
pub const IMPACT_SPEED_THRESHOLD: f32 = 0.5;

/// Contact speed (m/s) at which pitch and loudness saturate.
pub const IMPACT_SPEED_FULL_SCALE: f32 = 10.0;

/// Oscillator pitch (Hz) mapped to the weakest audible impact.
pub const IMPACT_FREQ_MIN: f32 = 200.0;

/// Oscillator pitch (Hz) mapped to a full-scale impact.
pub const IMPACT_FREQ_MAX: f32 = 1000.0;

/// Oscillator frequency (Hz) before the first collision retunes it.
pub const DEFAULT_FREQUENCY: f32 = 440.0;

/// Linear amplitude decrement applied once per rendered frame.
/// At 48 kHz a full-scale impact fades to silence in 200 samples ≈ 4.2 ms —
/// a short percussive "tick" rather than a sustained tone.
pub const AMPLITUDE_DECAY_PER_SAMPLE: f32 = 0.005;

/// Sample rate (Hz) assumed when no audio device reports one; tests pin this
/// value for deterministic phase math.
pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;

// ── Impact flash ──────────────────────────────────────────────────────────────

/// Seconds the alert color stays on the ball before the base color returns.
pub const FLASH_SECS: f32 = 0.02;

/// Alert color shown for [`FLASH_SECS`] after an audible impact.
pub const FLASH_COLOR: Color = Color::srgb(1.0, 0.08, 0.08);

// ── Audio output ──────────────────────────────────────────────────────────────

/// Master output gain, applied per sample in the render callback.
pub const AUDIO_VOLUME: f32 = 1.0;

// ── Colors ────────────────────────────────────────────────────────────────────

pub const BALL_COLOR: Color = Color::srgb(0.25, 0.45, 0.95);
pub const PICKUP_COLOR: Color = Color::srgb(0.95, 0.80, 0.20);
pub const ENEMY_COLOR: Color = Color::srgb(0.80, 0.15, 0.15);
pub const GROUND_COLOR: Color = Color::srgb(0.35, 0.38, 0.42);
pub const WALL_COLOR: Color = Color::srgb(0.25, 0.27, 0.30);

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Font size for the pickup-count HUD label.
pub const HUD_FONT_SIZE: f32 = 28.0;
