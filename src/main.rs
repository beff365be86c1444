use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier3d::prelude::*;

use rollaball::arena::ArenaPlugin;
use rollaball::audio::ImpactAudioPlugin;
use rollaball::config::{self, GameConfig};
use rollaball::enemy::EnemyPlugin;
use rollaball::graphics::GraphicsPlugin;
use rollaball::hud::HudPlugin;
use rollaball::menu::OutcomePlugin;
use rollaball::player::PlayerPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Roll-a-Ball".into(),
                resolution: WindowResolution::new(1200, 680),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.05, 0.06, 0.09)))
        // Insert GameConfig with compiled defaults; load_game_config will
        // overwrite it from assets/game.toml (if present) in the Startup
        // schedule, before every other startup system reads it.
        .insert_resource(GameConfig::default())
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // OutcomePlugin first: it registers GameState, which every gameplay
        // plugin's run conditions depend on.
        .add_plugins((
            OutcomePlugin,
            GraphicsPlugin,
            ArenaPlugin,
            PlayerPlugin,
            EnemyPlugin,
            HudPlugin,
            ImpactAudioPlugin,
        ))
        .add_systems(Startup, config::load_game_config)
        .run();
}
