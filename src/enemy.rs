//! Enemy ball: deterministic spawn and basic seek movement.
//!
//! The enemy is a second dynamic ball that steers toward the player across
//! the ground plane.  Contact with the player is handled by
//! [`crate::player::collect::enemy_contact_system`]; winning the game
//! despawns the enemy from the field.

use crate::config::GameConfig;
use crate::constants::{ENEMY_COLOR, ENEMY_RADIUS, ENEMY_SPAWN};
use crate::menu::GameState;
use crate::player::Player;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Marker component for the enemy entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_enemy.after(crate::config::load_game_config))
            .add_systems(
                Update,
                enemy_seek_player_system.run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::Lost), halt_enemy_system);
    }
}

/// Spawn the enemy at its fixed corner post.
pub fn spawn_enemy(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Enemy,
        Mesh3d(meshes.add(Sphere::new(ENEMY_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: ENEMY_COLOR,
            ..default()
        })),
        Transform::from_translation(ENEMY_SPAWN),
        RigidBody::Dynamic,
        Collider::ball(ENEMY_RADIUS),
        Velocity::zero(),
        ExternalForce::default(),
        Damping {
            linear_damping: 0.5,
            angular_damping: 0.8,
        },
    ));
}

/// Steer the enemy toward the ball with a horizontal force, clamping its
/// speed so it stays outrunnable.
///
/// Steering is confined to the ground plane — gravity keeps the enemy down,
/// and a vertical force component would let it climb the walls.
pub fn enemy_seek_player_system(
    q_player: Query<&Transform, With<Player>>,
    mut q_enemy: Query<(&Transform, &mut ExternalForce, &mut Velocity), With<Enemy>>,
    config: Res<GameConfig>,
) {
    let Ok(player_transform) = q_player.single() else {
        return;
    };

    for (transform, mut force, mut velocity) in q_enemy.iter_mut() {
        let mut to_player = player_transform.translation - transform.translation;
        to_player.y = 0.0;
        let dist = to_player.length();
        if dist <= 1e-3 {
            force.force = Vec3::ZERO;
            continue;
        }

        force.force = (to_player / dist) * config.enemy_seek_force;

        let mut planar = velocity.linvel;
        planar.y = 0.0;
        let speed = planar.length();
        if speed > config.enemy_max_speed {
            let scale = config.enemy_max_speed / speed;
            velocity.linvel.x *= scale;
            velocity.linvel.z *= scale;
        }
    }
}

/// Stop chasing once the game is lost: the seek system no longer runs, and
/// `ExternalForce` is persistent, so the last applied force must be cleared
/// or the enemy would keep accelerating across the lose screen.
pub fn halt_enemy_system(mut q_enemy: Query<&mut ExternalForce, With<Enemy>>) {
    for mut force in q_enemy.iter_mut() {
        force.force = Vec3::ZERO;
    }
}
