use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::board::{BoardConfig, RiverSettings};
use crate::hex::{CubeCoord, DIRECTIONS, HexLayout, offset_to_cube};

/// Per-cell state. Identified solely by its coordinate key in [`HexBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct Tile {
    /// Impassable for the search.
    pub is_wall: bool,
    /// Search origin marker. At most one tile carries it.
    pub is_player: bool,
    /// Search goal marker. At most one tile carries it.
    pub is_target: bool,
    /// Member of the last reconstructed path.
    pub is_path: bool,
    /// Discovered by the current search run.
    pub visited: bool,
    /// Terrain weight for weighted search, always >= 1.
    pub cost: u32,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            is_wall: false,
            is_player: false,
            is_target: false,
            is_path: false,
            visited: false,
            cost: 1,
        }
    }
}

/// Offset-coordinate region bounds: rows `top..=bottom`, columns
/// `left..=right`, converted to cube space when the board is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct BoardBounds {
    /// First offset row (inclusive).
    pub top: i32,
    /// Last offset row (inclusive).
    pub bottom: i32,
    /// First offset column (inclusive).
    pub left: i32,
    /// Last offset column (inclusive).
    pub right: i32,
}

impl Default for BoardBounds {
    fn default() -> Self {
        Self {
            top: 0,
            bottom: 4,
            left: 0,
            right: 6,
        }
    }
}

/// Owns every [`Tile`], keyed by cube coordinate.
///
/// Lookups outside the built region return `None`; that is absence, not an
/// error. The board hands out references only, never tile ownership.
pub struct HexBoard {
    layout: HexLayout,
    tiles: HashMap<CubeCoord, Tile>,
    player: Option<CubeCoord>,
    target: Option<CubeCoord>,
}

impl HexBoard {
    /// Builds a board covering `bounds` with default tiles.
    pub fn new(layout: HexLayout, bounds: BoardBounds) -> Self {
        let mut board = Self {
            layout,
            tiles: HashMap::new(),
            player: None,
            target: None,
        };
        board.build(bounds);
        board
    }

    /// Builds, carves, and populates a board from the app configuration.
    pub fn from_config(config: &BoardConfig) -> Self {
        let mut board = Self::new(HexLayout::new(config.hex_size, Vec2::ZERO), config.bounds);
        board.apply_river_noise(&config.river);
        board.place_player(offset_to_cube(config.player_spawn.0, config.player_spawn.1));
        board.place_target(offset_to_cube(config.target_spawn.0, config.target_spawn.1));
        board
    }

    /// Rebuilds the board to cover `bounds`, replacing all prior tiles and
    /// clearing the player/target placement.
    ///
    /// For each offset row the column range is shifted by `floor(row / 2)`
    /// so the cube-space region stays rectangular in offset coordinates.
    pub fn build(&mut self, bounds: BoardBounds) {
        self.tiles = HashMap::new();
        self.player = None;
        self.target = None;

        for row in bounds.top..=bounds.bottom {
            for col in bounds.left..=bounds.right {
                self.tiles.insert(offset_to_cube(row, col), Tile::default());
            }
        }
    }

    /// The pixel-space layout this board was built with.
    pub fn layout(&self) -> HexLayout {
        self.layout
    }

    // ── Lookup ─────────────────────────────────────────────────────

    /// The tile at `coord`, or `None` when the coordinate is off-grid.
    pub fn get(&self, coord: CubeCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    /// All tiles with their coordinates, in no particular order.
    pub fn all_tiles(&self) -> impl Iterator<Item = (CubeCoord, &Tile)> + '_ {
        self.tiles.iter().map(|(coord, tile)| (*coord, tile))
    }

    /// Coordinates adjacent to `coord` that exist on the board, in the fixed
    /// direction order of [`DIRECTIONS`].
    ///
    /// Walls are included; passability is the search engine's concern.
    pub fn neighbors(&self, coord: CubeCoord) -> impl Iterator<Item = CubeCoord> + '_ {
        DIRECTIONS
            .iter()
            .map(move |dir| coord + *dir)
            .filter(|n| self.tiles.contains_key(n))
    }

    // ── User edits ─────────────────────────────────────────────────

    /// Sets or clears the wall flag. Returns false (and does nothing) when
    /// `coord` is off-grid.
    pub fn set_wall(&mut self, coord: CubeCoord, walled: bool) -> bool {
        match self.tiles.get_mut(&coord) {
            Some(tile) => {
                tile.is_wall = walled;
                true
            }
            None => false,
        }
    }

    /// Sets the terrain cost, clamped to a minimum of 1. Returns false when
    /// `coord` is off-grid.
    pub fn set_terrain_cost(&mut self, coord: CubeCoord, cost: u32) -> bool {
        match self.tiles.get_mut(&coord) {
            Some(tile) => {
                tile.cost = cost.max(1);
                true
            }
            None => false,
        }
    }

    /// Moves the player marker to `coord`, clearing any previous placement.
    /// Returns false when `coord` is off-grid.
    pub fn place_player(&mut self, coord: CubeCoord) -> bool {
        if !self.tiles.contains_key(&coord) {
            return false;
        }
        if let Some(prev) = self.player.take()
            && let Some(tile) = self.tiles.get_mut(&prev)
        {
            tile.is_player = false;
        }
        if let Some(tile) = self.tiles.get_mut(&coord) {
            tile.is_player = true;
        }
        self.player = Some(coord);
        true
    }

    /// Moves the target marker to `coord`, clearing any previous placement.
    /// Returns false when `coord` is off-grid.
    pub fn place_target(&mut self, coord: CubeCoord) -> bool {
        if !self.tiles.contains_key(&coord) {
            return false;
        }
        if let Some(prev) = self.target.take()
            && let Some(tile) = self.tiles.get_mut(&prev)
        {
            tile.is_target = false;
        }
        if let Some(tile) = self.tiles.get_mut(&coord) {
            tile.is_target = true;
        }
        self.target = Some(coord);
        true
    }

    /// Current player tile, if placed.
    pub fn player(&self) -> Option<CubeCoord> {
        self.player
    }

    /// Current target tile, if placed.
    pub fn target(&self) -> Option<CubeCoord> {
        self.target
    }

    // ── Search bookkeeping ─────────────────────────────────────────

    /// Marks `coord` as discovered by the running search.
    pub fn mark_visited(&mut self, coord: CubeCoord) {
        if let Some(tile) = self.tiles.get_mut(&coord) {
            tile.visited = true;
        }
    }

    /// Marks `coord` as part of the reconstructed path.
    pub fn mark_path(&mut self, coord: CubeCoord) {
        if let Some(tile) = self.tiles.get_mut(&coord) {
            tile.is_path = true;
        }
    }

    /// Clears the per-run search bookkeeping (visited and path flags) on
    /// every tile. Walls, terrain costs, and role markers are untouched.
    pub fn clear_search_marks(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.visited = false;
            tile.is_path = false;
        }
    }

    // ── Terrain generation ─────────────────────────────────────────

    /// Carves river tiles (elevated movement cost) where fractal noise
    /// sampled at the tile's pixel center falls inside a narrow band around
    /// zero, producing winding contour-shaped rivers.
    pub fn apply_river_noise(&mut self, settings: &RiverSettings) {
        let fbm: Fbm<Perlin> = Fbm::new(settings.seed).set_octaves(settings.octaves);
        let layout = self.layout;

        let coords: Vec<CubeCoord> = self.tiles.keys().copied().collect();
        for coord in coords {
            let pos = layout.hex_to_pixel(coord);
            let value = fbm.get([
                pos.x as f64 / settings.scale,
                pos.y as f64 / settings.scale,
            ]);
            if value.abs() < settings.band_width {
                self.set_terrain_cost(coord, settings.cost);
            }
        }
    }
}
