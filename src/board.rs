//! Hex board: tile grid, terrain carving, painting, and display sync.
//!
//! The grid itself lives in [`hex_board`] and knows nothing about rendering;
//! this module owns the tile entities, the brush, and the material palette
//! that turns tile state into color.

mod entities;
mod hex_board;
mod systems;

pub use entities::{Board, Brush, BrushKind, HoveredTile};
pub use hex_board::{BoardBounds, HexBoard};

use bevy::prelude::*;

use crate::GameState;

/// Nested configuration for the board subsystem.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct BoardConfig {
    /// Offset-rectangle region the board covers.
    pub bounds: BoardBounds,
    /// Hex circumradius in world units.
    pub hex_size: f32,
    /// Offset (row, col) of the initial player tile.
    pub player_spawn: (i32, i32),
    /// Offset (row, col) of the initial target tile.
    pub target_spawn: (i32, i32),
    /// River carving parameters.
    pub river: RiverSettings,
    /// Background clear color.
    pub clear_color: Color,
}

/// Noise parameters for river carving.
#[derive(Clone, Debug, Reflect)]
pub struct RiverSettings {
    /// Seed for the river noise generator.
    pub seed: u32,
    /// Number of octaves for river noise.
    pub octaves: usize,
    /// Spatial scale divisor for noise sampling.
    pub scale: f64,
    /// Half-width of the noise band that becomes river.
    pub band_width: f64,
    /// Movement cost of a river tile.
    pub cost: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            bounds: BoardBounds::default(),
            hex_size: 25.0,
            player_spawn: (0, 0),
            target_spawn: (4, 6),
            river: RiverSettings::default(),
            clear_color: Color::srgb(0.013, 0.015, 0.03),
        }
    }
}

impl Default for RiverSettings {
    fn default() -> Self {
        Self {
            seed: 7,
            octaves: 3,
            scale: 140.0,
            band_width: 0.12,
            cost: 5,
        }
    }
}

/// Layout pixel space grows downward like the screen; world space grows up.
pub(crate) fn flip_y(v: Vec2) -> Vec2 {
    Vec2::new(v.x, -v.y)
}

/// Board plugin: grid and tile entities at startup, painting and material
/// sync at runtime.
pub struct BoardPlugin(pub BoardConfig);

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BoardConfig>()
            .register_type::<entities::TileDisc>()
            .register_type::<Brush>()
            .register_type::<HoveredTile>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .init_resource::<Brush>()
            .init_resource::<HoveredTile>()
            .add_systems(Startup, systems::spawn_board)
            .add_systems(
                Update,
                (
                    systems::hover_track,
                    systems::paint_tiles.after(systems::hover_track),
                    systems::outline_hovered.after(systems::hover_track),
                )
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(Update, systems::sync_tile_materials);
    }
}
