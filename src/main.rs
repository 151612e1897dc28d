#![warn(missing_docs)]
//! Interactive hex-grid pathfinding sandbox.
//!
//! Renders a pointy-top hex board where walls and rivers can be painted
//! with the mouse, then floods breadth-first or weighted best-first search
//! from the player tile to the target one step at a time, with bloom-lit
//! tiles and an egui control panel.

mod board;
pub mod hex;
mod search;
mod viewer;

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use board::{BoardConfig, BoardPlugin};
use search::{SearchConfig, SearchPlugin};
use viewer::{ViewerConfig, ViewerPlugin};

/// Application-wide game state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Normal interaction: painting, searching, camera control.
    #[default]
    Running,
    /// Debug overlay active (Tab to toggle).
    Debugging,
}

fn main() {
    let (board_config, search_config) = configs();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Pathfinder".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(BoardPlugin(board_config))
    .add_plugins(SearchPlugin(search_config))
    .add_plugins(ViewerPlugin(ViewerConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins((RemotePlugin::default(), RemoteHttpPlugin::default()));

    app.run();
}

/// Builds the board and search configuration from the command line.
#[cfg(feature = "native")]
fn configs() -> (BoardConfig, SearchConfig) {
    use clap::Parser;

    use board::{BoardBounds, RiverSettings};
    use search::SearchMode;

    /// Interactive hex-grid pathfinding sandbox.
    #[derive(Parser)]
    #[command(version, about)]
    struct Args {
        /// Offset rows in the board region.
        #[arg(long, default_value_t = 5)]
        rows: u32,
        /// Offset columns in the board region.
        #[arg(long, default_value_t = 7)]
        cols: u32,
        /// Hex circumradius in world units.
        #[arg(long, default_value_t = 25.0)]
        hex_size: f32,
        /// River noise seed.
        #[arg(long, default_value_t = 7)]
        seed: u32,
        /// Seconds between automatic search steps.
        #[arg(long, default_value_t = 0.05)]
        interval: f32,
        /// Preselect weighted search instead of breadth-first.
        #[arg(long)]
        weighted: bool,
    }

    let args = Args::parse();
    let bounds = BoardBounds {
        top: 0,
        bottom: args.rows.saturating_sub(1) as i32,
        left: 0,
        right: args.cols.saturating_sub(1) as i32,
    };
    let board_config = BoardConfig {
        bounds,
        hex_size: args.hex_size,
        player_spawn: (bounds.top, bounds.left),
        target_spawn: (bounds.bottom, bounds.right),
        river: RiverSettings {
            seed: args.seed,
            ..RiverSettings::default()
        },
        ..BoardConfig::default()
    };
    let search_config = SearchConfig {
        step_interval: args.interval.max(0.001),
        default_mode: if args.weighted {
            SearchMode::AStar
        } else {
            SearchMode::Bfs
        },
    };
    (board_config, search_config)
}

/// Web builds run with the defaults.
#[cfg(not(feature = "native"))]
fn configs() -> (BoardConfig, SearchConfig) {
    (BoardConfig::default(), SearchConfig::default())
}

/// Swaps between the running board and the debug overlay on Tab.
fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        });
    }
}

/// Quits outright on Escape.
fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
