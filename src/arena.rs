//! Arena: ground plane, perimeter walls, and the pickup ring.
//!
//! Everything here is deterministic — pickups sit on a fixed ring so every
//! run plays the same field.  Pickups are non-physical sensor volumes: the
//! ball rolls through them and collection is detected from the overlap
//! event, with no contact response and no impact sound.

use crate::config::GameConfig;
use crate::constants::{
    GROUND_COLOR, GROUND_HALF_EXTENT, GROUND_THICKNESS, PICKUP_COLOR, PICKUP_HALF_EXTENT,
    PICKUP_HOVER_HEIGHT, PICKUP_RING_RADIUS, WALL_COLOR, WALL_HEIGHT, WALL_THICKNESS,
};
use crate::menu::GameState;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::f32::consts::TAU;

/// Marker component for pickup entities.
#[derive(Component, Debug, Clone, Copy)]
pub struct Pickup;

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_arena.after(crate::config::load_game_config))
            .add_systems(
                Update,
                pickup_spin_system.run_if(in_state(GameState::Playing)),
            );
    }
}

/// Spawn the ground, the four perimeter walls, and the pickup ring.
pub fn spawn_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<GameConfig>,
) {
    let extent = GROUND_HALF_EXTENT;

    // ── Ground ────────────────────────────────────────────────────────────────
    // Render plane at y = 0; the collider slab hangs below it so its top
    // face coincides with the visible surface.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(extent * 2.0, extent * 2.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND_COLOR,
            ..default()
        })),
        Transform::IDENTITY,
    ));
    commands.spawn((
        Transform::from_xyz(0.0, -GROUND_THICKNESS / 2.0, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(extent, GROUND_THICKNESS / 2.0, extent),
    ));

    // ── Walls ─────────────────────────────────────────────────────────────────
    let wall_mesh = meshes.add(Cuboid::new(
        extent * 2.0 + WALL_THICKNESS * 2.0,
        WALL_HEIGHT,
        WALL_THICKNESS,
    ));
    let wall_material = materials.add(StandardMaterial {
        base_color: WALL_COLOR,
        ..default()
    });
    let wall_offset = extent + WALL_THICKNESS / 2.0;
    let walls = [
        // (position, Y rotation)
        (Vec3::new(0.0, WALL_HEIGHT / 2.0, wall_offset), 0.0),
        (Vec3::new(0.0, WALL_HEIGHT / 2.0, -wall_offset), 0.0),
        (
            Vec3::new(wall_offset, WALL_HEIGHT / 2.0, 0.0),
            std::f32::consts::FRAC_PI_2,
        ),
        (
            Vec3::new(-wall_offset, WALL_HEIGHT / 2.0, 0.0),
            std::f32::consts::FRAC_PI_2,
        ),
    ];
    for (position, yaw) in walls {
        commands.spawn((
            Mesh3d(wall_mesh.clone()),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(position).with_rotation(Quat::from_rotation_y(yaw)),
            RigidBody::Fixed,
            Collider::cuboid(
                extent + WALL_THICKNESS,
                WALL_HEIGHT / 2.0,
                WALL_THICKNESS / 2.0,
            ),
        ));
    }

    // ── Pickup ring ───────────────────────────────────────────────────────────
    let pickup_mesh = meshes.add(Cuboid::new(
        PICKUP_HALF_EXTENT * 2.0,
        PICKUP_HALF_EXTENT * 2.0,
        PICKUP_HALF_EXTENT * 2.0,
    ));
    let pickup_material = materials.add(StandardMaterial {
        base_color: PICKUP_COLOR,
        ..default()
    });
    for i in 0..config.pickup_total {
        let angle = i as f32 * TAU / config.pickup_total.max(1) as f32;
        let position = Vec3::new(
            angle.cos() * PICKUP_RING_RADIUS,
            PICKUP_HOVER_HEIGHT,
            angle.sin() * PICKUP_RING_RADIUS,
        );
        commands.spawn((
            Pickup,
            Mesh3d(pickup_mesh.clone()),
            MeshMaterial3d(pickup_material.clone()),
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::cuboid(PICKUP_HALF_EXTENT, PICKUP_HALF_EXTENT, PICKUP_HALF_EXTENT),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ));
    }
}

/// Idle animation: spin every pickup around the vertical axis.
pub fn pickup_spin_system(
    mut q_pickups: Query<&mut Transform, With<Pickup>>,
    time: Res<Time>,
    config: Res<GameConfig>,
) {
    let angle = config.pickup_spin_rate * time.delta_secs();
    for mut transform in q_pickups.iter_mut() {
        transform.rotate_y(angle);
    }
}
