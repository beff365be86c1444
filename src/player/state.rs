//! Player components and resources.
//!
//! All ECS components and Bevy resources that describe player state live
//! here.  Systems that mutate this state are in the sibling modules:
//! - [`super::control`] — input + movement force
//! - [`super::collect`] — pickup collection + enemy contact

use bevy::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Marker component for the player ball entity.
#[derive(Component)]
pub struct Player;

// ── Resources ─────────────────────────────────────────────────────────────────

/// Latest 2D movement axis, derived from all input sources.
///
/// Input systems (keyboard, gamepad) write to this resource each frame after
/// it is cleared.  [`super::control::apply_movement_force_system`] reads it
/// once per fixed step and applies the corresponding horizontal force.
/// Tests can populate this directly to drive the ball without a real input
/// device.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    /// Sideways axis; +1.0 is full right deflection.
    pub x: f32,
    /// Forward axis; +1.0 is full forward deflection.
    pub y: f32,
}

/// Number of pickups the player has collected this run.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PickupCount {
    pub count: u32,
}

/// Tracks the most recently connected gamepad so that accidental HID devices
/// (e.g. RGB LED controllers exposed as joysticks on Linux) don't hijack
/// input.
///
/// Updated by [`super::control::gamepad_connection_system`].  Always prefers
/// the *last* connected gamepad; cleared when that gamepad disconnects.
#[derive(Resource, Default)]
pub struct PreferredGamepad(pub Option<Entity>);
