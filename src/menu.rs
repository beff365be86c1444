//! Game outcome flow — `GameState` definition and the win/lose overlays.
//!
//! ## States
//!
//! | State     | Description                                        |
//! |-----------|----------------------------------------------------|
//! | `Playing` | Initial state; all gameplay systems active         |
//! | `Won`     | Terminal: pickup total reached, win overlay shown  |
//! | `Lost`    | Terminal: enemy reached the ball, lose overlay shown |
//!
//! ## Systems (registered by `OutcomePlugin`)
//!
//! | System               | Schedule          | Purpose                   |
//! |----------------------|-------------------|---------------------------|
//! | `setup_win_overlay`  | `OnEnter(Won)`    | Spawn the "You Win!" card |
//! | `setup_lose_overlay` | `OnEnter(Lost)`   | Spawn the "You Lose!" card |

use bevy::prelude::*;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level game state machine.
///
/// Gameplay systems run under `.run_if(in_state(GameState::Playing))`, so
/// they go fully inactive once an outcome is reached.  Both outcomes are
/// terminal: nothing transitions back to `Playing`.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Active gameplay; the game starts here.
    #[default]
    Playing,
    /// The pickup total was reached.
    Won,
    /// The enemy caught the ball.
    Lost,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the win overlay.
#[derive(Component)]
pub struct WinOverlayRoot;

/// Root node of the lose overlay.
#[derive(Component)]
pub struct LoseOverlayRoot;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState` and the outcome overlays.
///
/// This plugin must be added to the app **before** any plugin that calls
/// `.run_if(in_state(GameState::Playing))`, so the state is always
/// registered first.
pub struct OutcomePlugin;

impl Plugin for OutcomePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::Won), setup_win_overlay)
            .add_systems(OnEnter(GameState::Lost), setup_lose_overlay);
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn win_text_color() -> Color {
    Color::srgb(0.55, 0.95, 0.55)
}
fn lose_text_color() -> Color {
    Color::srgb(1.0, 0.30, 0.30)
}
fn overlay_scrim() -> Color {
    Color::srgba(0.0, 0.0, 0.0, 0.55)
}

// ── OnEnter(Won): win overlay ─────────────────────────────────────────────────

/// Spawn the full-screen win overlay.
pub fn setup_win_overlay(mut commands: Commands) {
    spawn_overlay(&mut commands, "You Win!", win_text_color(), WinOverlayRoot);
}

// ── OnEnter(Lost): lose overlay ───────────────────────────────────────────────

/// Spawn the full-screen lose overlay.
pub fn setup_lose_overlay(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        "You Lose!",
        lose_text_color(),
        LoseOverlayRoot,
    );
}

/// Shared overlay layout: a dimmed scrim with one centred headline.
fn spawn_overlay(commands: &mut Commands, headline: &str, color: Color, marker: impl Component) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(overlay_scrim()),
            ZIndex(100),
            marker,
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new(headline),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(color),
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lose_overlay_shows_the_exact_text() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, setup_lose_overlay);
        app.update();

        let mut texts = app.world_mut().query::<&Text>();
        let found: Vec<&str> = texts.iter(app.world()).map(|t| t.0.as_str()).collect();
        assert_eq!(found, vec!["You Lose!"]);
    }

    #[test]
    fn win_overlay_is_spawned_with_marker() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, setup_win_overlay);
        app.update();

        let mut roots = app.world_mut().query::<&WinOverlayRoot>();
        assert_eq!(roots.iter(app.world()).count(), 1);
    }
}
