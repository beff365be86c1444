//! Transient impact flash: paints the emitting entity in an alert color for
//! a few milliseconds, then restores the base color captured at spawn.
//!
//! The "deferred, cancellable restore task" is a countdown component ticked
//! by an ordinary system: re-arming it (another audible impact while a flash
//! is pending) simply replaces the component, so the last-scheduled
//! restoration wins, and despawning the entity removes the countdown with it
//! — the restore cancels itself by construction, with nothing dangling.

use crate::constants::FLASH_COLOR;
use bevy::prelude::*;

/// The entity's base color, captured once at spawn.  Restoration always
/// returns to this value, never to whatever color a half-finished flash
/// left behind.
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseColor(pub Color);

/// Countdown until the base color is restored.
#[derive(Component, Debug, Clone, Copy)]
pub struct ImpactFlash {
    /// Seconds remaining; decremented every frame.
    pub remaining: f32,
}

/// Paint `entity` in the alert color and (re-)arm its restore countdown.
pub fn start_flash(
    commands: &mut Commands,
    materials: &mut Assets<StandardMaterial>,
    entity: Entity,
    material: &MeshMaterial3d<StandardMaterial>,
    secs: f32,
) {
    if let Some(mat) = materials.get_mut(&material.0) {
        mat.base_color = FLASH_COLOR;
    }
    commands.entity(entity).insert(ImpactFlash { remaining: secs });
}

/// Tick flash countdowns; on expiry restore the base color and drop the
/// countdown component.
pub fn flash_restore_system(
    mut commands: Commands,
    mut q_flashing: Query<(
        Entity,
        &mut ImpactFlash,
        &BaseColor,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (entity, mut flash, base, material) in q_flashing.iter_mut() {
        flash.remaining -= dt;
        if flash.remaining > 0.0 {
            continue;
        }
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color = base.0;
        }
        commands.entity(entity).remove::<ImpactFlash>();
    }
}
