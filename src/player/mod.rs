//! Player module: the ball entity, input handling, and collision outcomes.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | ECS components (`Player`) and Bevy resources (`MovementIntent`, `PickupCount`, `PreferredGamepad`) |
//! | [`control`] | Input systems: WASD/arrow axes, gamepad left stick, fixed-step force application |
//! | [`collect`] | Pickup collection (+ win), enemy contact (+ lose) |
//!
//! All public items are re-exported at this level so that the rest of the
//! crate can use flat `crate::player::*` imports without knowing the
//! sub-module layout.

pub mod collect;
pub mod control;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use collect::{enemy_contact_system, pickup_collection_system};
pub use control::{
    apply_movement_force_system, gamepad_connection_system, gamepad_to_intent_system,
    halt_ball_system, keyboard_to_intent_system, movement_intent_clear_system,
};
pub use state::{MovementIntent, PickupCount, Player, PreferredGamepad};

use crate::audio::flash::BaseColor;
use crate::audio::ImpactSound;
use crate::constants::{
    BALL_ANGULAR_DAMPING, BALL_COLOR, BALL_FRICTION, BALL_LINEAR_DAMPING, BALL_RADIUS,
    BALL_RESTITUTION, BALL_SPAWN_HEIGHT,
};
use crate::menu::GameState;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(MovementIntent::default())
            .insert_resource(PickupCount::default())
            .insert_resource(PreferredGamepad::default())
            .add_systems(Startup, spawn_player.after(crate::config::load_game_config))
            .add_systems(
                Update,
                (
                    movement_intent_clear_system,
                    keyboard_to_intent_system,
                    gamepad_connection_system,
                    gamepad_to_intent_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                FixedUpdate,
                apply_movement_force_system.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                PostUpdate,
                (pickup_collection_system, enemy_contact_system)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::Won), halt_ball_system)
            .add_systems(OnEnter(GameState::Lost), halt_ball_system);
    }
}

// ── Ball spawn ────────────────────────────────────────────────────────────────

/// Spawn the player ball above the arena centre.
///
/// The ball is the sole sound-emitting entity: it carries [`ImpactSound`] so
/// its contacts feed the synthesizer, and [`BaseColor`] captures the color
/// the impact flash restores to.  The material handle is not shared with any
/// other entity — flashing the ball must never tint the walls.
pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Player,
        ImpactSound,
        BaseColor(BALL_COLOR),
        Mesh3d(meshes.add(Sphere::new(BALL_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: BALL_COLOR,
            ..default()
        })),
        Transform::from_xyz(0.0, BALL_SPAWN_HEIGHT, 0.0),
        RigidBody::Dynamic,
        Collider::ball(BALL_RADIUS),
        Velocity::zero(),
        ExternalForce::default(),
        Damping {
            linear_damping: BALL_LINEAR_DAMPING,
            angular_damping: BALL_ANGULAR_DAMPING,
        },
        Restitution::coefficient(BALL_RESTITUTION),
        Friction::coefficient(BALL_FRICTION),
        ActiveEvents::COLLISION_EVENTS,
    ));
}
