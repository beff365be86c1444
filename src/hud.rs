//! Pickup-count HUD: the permanent "Count: N" label in the top-left corner.

use crate::config::GameConfig;
use crate::player::PickupCount;
use bevy::prelude::*;

/// Marker for the HUD node holding the count label.
#[derive(Component)]
pub struct CountDisplay;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            setup_hud_count.after(crate::config::load_game_config),
        )
        .add_systems(Update, hud_count_display_system);
    }
}

/// Format the HUD label for a given pickup count.
pub fn count_label(count: u32) -> String {
    format!("Count: {}", count)
}

/// Spawn the permanent top-left count HUD.
pub fn setup_hud_count(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            CountDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(count_label(0)),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.98)),
            ));
        });
}

/// Refresh the count label whenever the pickup count changes.
pub fn hud_count_display_system(
    count: Res<PickupCount>,
    parent_query: Query<&Children, With<CountDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    if !count.is_changed() {
        return;
    }
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(count_label(count.count));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_formats_exactly() {
        assert_eq!(count_label(0), "Count: 0");
        assert_eq!(count_label(8), "Count: 8");
    }

    #[test]
    fn hud_text_follows_the_count() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(PickupCount::default());
        app.add_systems(Update, hud_count_display_system);

        let label = app.world_mut().spawn(Text::new(count_label(0))).id();
        let root = app.world_mut().spawn(CountDisplay).id();
        app.world_mut().entity_mut(root).add_child(label);

        app.world_mut().resource_mut::<PickupCount>().count = 8;
        app.update();

        let text = app.world().entity(label).get::<Text>().expect("label text");
        assert_eq!(text.0, "Count: 8");
    }
}
