//! Camera and lighting: scene setup plus the fixed-offset follow camera.

use crate::constants::CAMERA_OFFSET;
use crate::player::Player;
use bevy::prelude::*;

pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene)
            .add_systems(Update, camera_follow_system);
    }
}

/// Spawn the follow camera and a key light.
pub fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_OFFSET).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
    ));
}

/// Keep the camera at a fixed offset from the ball.
///
/// Translation only — the camera never rotates, so the input axes stay
/// screen-stable.  Runs unconditionally: when the ball is gone (lose path)
/// the camera simply stays where it last was.
pub fn camera_follow_system(
    q_player: Query<&Transform, With<Player>>,
    mut q_camera: Query<&mut Transform, (With<Camera>, Without<Player>)>,
) {
    let Ok(player_transform) = q_player.single() else {
        return;
    };
    let Ok(mut camera_transform) = q_camera.single_mut() else {
        return;
    };
    camera_transform.translation = player_transform.translation + CAMERA_OFFSET;
}
