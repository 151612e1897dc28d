use bevy::prelude::*;

use super::hex_board::HexBoard;
use crate::hex::CubeCoord;

/// The single board entity. Owns the grid that searches run against.
#[derive(Component)]
pub struct Board {
    /// Tile storage and marker placement.
    pub grid: HexBoard,
}

/// One flat disc per tile, keyed back to its grid coordinate.
#[derive(Component, Reflect)]
pub struct TileDisc {
    /// Grid coordinate this disc displays.
    pub coord: CubeCoord,
}

/// Shared fill materials, one per tile display role.
#[derive(Resource)]
pub struct TilePalette {
    /// Untouched ground.
    pub plain: Handle<ColorMaterial>,
    /// Elevated-cost river ground.
    pub river: Handle<ColorMaterial>,
    /// Discovered by the current run.
    pub visited: Handle<ColorMaterial>,
    /// Queued for expansion.
    pub frontier: Handle<ColorMaterial>,
    /// On the reconstructed route.
    pub path: Handle<ColorMaterial>,
    /// Search origin marker.
    pub player: Handle<ColorMaterial>,
    /// Search goal marker.
    pub target: Handle<ColorMaterial>,
    /// Impassable tile.
    pub wall: Handle<ColorMaterial>,
}

/// What the left mouse button paints.
#[derive(Resource, Default, Reflect)]
pub struct Brush {
    /// Active brush choice.
    pub kind: BrushKind,
}

/// Paintable tile edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum BrushKind {
    /// Make the tile impassable.
    #[default]
    Wall,
    /// Raise the tile to the river movement cost.
    River,
    /// Restore the tile to plain ground.
    Erase,
}

/// Board coordinate under the cursor, if any.
#[derive(Resource, Default, Reflect)]
pub struct HoveredTile(pub Option<CubeCoord>);
