//! Player input and movement systems.
//!
//! ## Pipeline
//!
//! Every `Update` frame, in order:
//! 1. [`movement_intent_clear_system`] — resets `MovementIntent` to zero.
//! 2. [`keyboard_to_intent_system`] — translates WASD / arrow keys into axes.
//! 3. [`gamepad_to_intent_system`] — translates the gamepad left stick.
//!
//! Then, once per fixed simulation step:
//! 4. [`apply_movement_force_system`] (`FixedUpdate`) — converts the latest
//!    intent into a horizontal `ExternalForce` on the ball.
//!
//! The **input abstraction layer** (`MovementIntent`) makes the movement
//! logic fully testable: tests populate the resource directly and run only
//! `apply_movement_force_system`.

use super::state::{MovementIntent, Player, PreferredGamepad};
use crate::config::GameConfig;
use bevy::input::gamepad::{GamepadAxis, GamepadConnection, GamepadConnectionEvent};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Left-stick dead zone: inputs smaller than this fraction are ignored.
const GAMEPAD_DEADZONE: f32 = 0.15;

// ── Step 1: Clear ─────────────────────────────────────────────────────────────

/// Reset `MovementIntent` to zero at the start of every frame.
///
/// Must run before any system that writes to `MovementIntent`, so released
/// keys read as a zero axis without per-source bookkeeping.
pub fn movement_intent_clear_system(mut intent: ResMut<MovementIntent>) {
    *intent = MovementIntent::default();
}

// ── Step 2a: Keyboard → Intent ────────────────────────────────────────────────

/// Translate WASD / arrow keys into [`MovementIntent`].
///
/// Opposing keys cancel; diagonals are left unnormalized, matching the raw
/// axis pair an analog stick would deliver at the corners.
pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<MovementIntent>,
) {
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        intent.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        intent.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        intent.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        intent.y -= 1.0;
    }
}

// ── Step 2b: Gamepad connection ───────────────────────────────────────────────

/// Track gamepad connect / disconnect events and update [`PreferredGamepad`].
///
/// The most-recently-connected gamepad is always preferred, ensuring that
/// non-gamepad HID devices that connect first are superseded by the real
/// gamepad.
pub fn gamepad_connection_system(
    mut events: MessageReader<GamepadConnectionEvent>,
    mut preferred: ResMut<PreferredGamepad>,
) {
    for event in events.read() {
        match &event.connection {
            GamepadConnection::Connected { .. } => {
                preferred.0 = Some(event.gamepad);
                info!(
                    "[gamepad] Gamepad {:?} connected (now preferred)",
                    event.gamepad
                );
            }
            GamepadConnection::Disconnected => {
                info!("[gamepad] Gamepad {:?} disconnected", event.gamepad);
                if preferred.0 == Some(event.gamepad) {
                    preferred.0 = None;
                }
            }
        }
    }
}

// ── Step 2c: Gamepad → Intent ─────────────────────────────────────────────────

/// Translate the gamepad left stick into [`MovementIntent`].
///
/// Overwrites the keyboard axes when the stick is outside the dead zone;
/// does nothing when no gamepad is connected.
pub fn gamepad_to_intent_system(
    preferred: Res<PreferredGamepad>,
    gamepads: Query<&Gamepad>,
    mut intent: ResMut<MovementIntent>,
) {
    let Some(gamepad_entity) = preferred.0 else {
        return;
    };
    let Ok(gamepad) = gamepads.get(gamepad_entity) else {
        return;
    };

    let lx = gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0);
    let ly = gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0);
    if Vec2::new(lx, ly).length() < GAMEPAD_DEADZONE {
        return;
    }

    intent.x = lx;
    intent.y = ly;
}

// ── Step 3: Apply intent → physics ────────────────────────────────────────────

/// Convert [`MovementIntent`] into a horizontal `ExternalForce` on the ball,
/// once per fixed simulation step.
///
/// The force is `(x, 0, y) · ball_force` — the input plane maps onto the
/// ground plane, gravity handles the rest.  Overwrites rather than
/// accumulates, so the force drops to zero the step after input stops.
/// No-op when the ball entity no longer exists (it may have been despawned
/// by the lose path in the same frame).
pub fn apply_movement_force_system(
    mut q: Query<&mut ExternalForce, With<Player>>,
    intent: Res<MovementIntent>,
    config: Res<GameConfig>,
) {
    let Ok(mut force) = q.single_mut() else {
        return;
    };
    force.force = Vec3::new(intent.x, 0.0, intent.y) * config.ball_force;
}

// ── Terminal-state halt ───────────────────────────────────────────────────────

/// Zero the stored intent and the ball's applied force when gameplay ends.
///
/// `ExternalForce` is persistent: without this, the force written on the
/// last `Playing` step would keep pushing the ball across the win screen.
/// No-op on the lose path, where the ball is already despawned.
pub fn halt_ball_system(
    mut q: Query<&mut ExternalForce, With<Player>>,
    mut intent: ResMut<MovementIntent>,
) {
    *intent = MovementIntent::default();
    if let Ok(mut force) = q.single_mut() {
        force.force = Vec3::ZERO;
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BALL_FORCE;

    // ── helpers ───────────────────────────────────────────────────────────────

    /// Build a minimal Bevy `App` with just the resources and systems needed
    /// to test the MovementIntent → force pipeline, without Rapier stepping
    /// or rendering.
    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(MovementIntent::default());
        app.insert_resource(GameConfig::default());
        app.add_systems(Update, apply_movement_force_system);
        app
    }

    /// Spawn a player entity carrying the components queried by
    /// `apply_movement_force_system`.
    fn spawn_test_player(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((Player, ExternalForce::default()))
            .id()
    }

    fn force_of(app: &App, entity: Entity) -> Vec3 {
        app.world()
            .entity(entity)
            .get::<ExternalForce>()
            .expect("player has ExternalForce")
            .force
    }

    // ── apply_movement_force_system ───────────────────────────────────────────

    #[test]
    fn intent_maps_to_horizontal_force() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        app.insert_resource(MovementIntent { x: 1.0, y: -0.5 });
        app.update();

        let force = force_of(&app, player);
        assert!((force.x - BALL_FORCE).abs() < 1e-4);
        assert_eq!(force.y, 0.0, "movement never pushes vertically");
        assert!((force.z - -0.5 * BALL_FORCE).abs() < 1e-4);
    }

    #[test]
    fn zero_intent_clears_the_force() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        app.insert_resource(MovementIntent { x: 1.0, y: 1.0 });
        app.update();
        assert!(force_of(&app, player).length() > 0.0);

        app.insert_resource(MovementIntent::default());
        app.update();
        assert_eq!(force_of(&app, player), Vec3::ZERO);
    }

    #[test]
    fn missing_player_is_a_no_op() {
        let mut app = build_test_app();
        app.insert_resource(MovementIntent { x: 1.0, y: 1.0 });
        // No player spawned — the system must tolerate running after the
        // ball has been despawned.
        app.update();
    }

    #[test]
    fn force_scales_with_configured_ball_force() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        let mut config = GameConfig::default();
        config.ball_force = 2.5;
        app.insert_resource(config);
        app.insert_resource(MovementIntent { x: 0.0, y: 1.0 });
        app.update();

        let force = force_of(&app, player);
        assert!((force.z - 2.5).abs() < 1e-4);
    }

    // ── intent pipeline ───────────────────────────────────────────────────────

    #[test]
    fn clear_system_resets_intent() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(MovementIntent { x: 0.7, y: -0.2 });
        app.add_systems(Update, movement_intent_clear_system);
        app.update();
        assert_eq!(
            *app.world().resource::<MovementIntent>(),
            MovementIntent::default()
        );
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(MovementIntent::default());
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyA);
        keys.press(KeyCode::KeyD);
        keys.press(KeyCode::KeyW);
        app.insert_resource(keys);
        app.add_systems(Update, keyboard_to_intent_system);
        app.update();

        let intent = *app.world().resource::<MovementIntent>();
        assert_eq!(intent.x, 0.0);
        assert_eq!(intent.y, 1.0);
    }
}
