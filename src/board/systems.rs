use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContext;

use super::entities::{Board, Brush, BrushKind, HoveredTile, TileDisc, TilePalette};
use super::hex_board::HexBoard;
use super::{BoardConfig, flip_y};
use crate::hex::{CubeCoord, HexLayout};
use crate::search::SearchEngine;
use crate::viewer::BoardCamera;

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the [`Board`] entity, the tile material palette, and one disc
/// child per grid cell.
pub fn spawn_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    cfg: Res<BoardConfig>,
) {
    // Fill materials per display role. Role colors above 1.0 bloom.
    let palette = TilePalette {
        plain: materials.add(Color::srgb(0.15, 0.16, 0.20)),
        river: materials.add(Color::srgb(0.08, 0.28, 0.45)),
        visited: materials.add(Color::srgb(0.55, 0.30, 0.10)),
        frontier: materials.add(Color::linear_rgb(0.4, 1.2, 3.2)),
        path: materials.add(Color::linear_rgb(1.0, 3.6, 0.5)),
        player: materials.add(Color::linear_rgb(0.2, 3.0, 0.7)),
        target: materials.add(Color::linear_rgb(2.6, 0.5, 3.2)),
        wall: materials.add(Color::srgb(0.70, 0.15, 0.13)),
    };

    let grid = HexBoard::from_config(&cfg);
    if grid.player().is_none() || grid.target().is_none() {
        warn!("player or target spawn lies outside the board");
    }

    // One disc mesh shared by every tile, inset to leave a seam.
    let disc_handle = meshes.add(tile_mesh(&grid.layout(), 0.92));

    let board_entity = commands
        .spawn((
            Name::new("Board"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let layout = grid.layout();
    for (coord, _) in grid.all_tiles() {
        let center = flip_y(layout.hex_to_pixel(coord));
        let entity = commands
            .spawn((
                TileDisc { coord },
                Name::new(format!("Tile({},{})", coord.q(), coord.r())),
                Mesh2d(disc_handle.clone()),
                MeshMaterial2d(palette.plain.clone()),
                Transform::from_xyz(center.x, center.y, 0.0),
            ))
            .id();
        commands.entity(board_entity).add_child(entity);
    }

    commands.entity(board_entity).insert(Board { grid });
    commands.insert_resource(palette);
}

/// Flat hexagon fan in the layout's corner orientation.
fn tile_mesh(layout: &HexLayout, inset: f32) -> Mesh {
    let corners = layout.corner_offsets();
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(7);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(7);
    positions.push([0.0, 0.0, 0.0]);
    uvs.push([0.5, 0.5]);
    for corner in &corners {
        positions.push([corner.x * inset, corner.y * inset, 0.0]);
        uvs.push([
            0.5 + corner.x / (2.0 * layout.size),
            0.5 - corner.y / (2.0 * layout.size),
        ]);
    }
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];

    let mut indices: Vec<u16> = Vec::with_capacity(18);
    for i in 0..6u16 {
        indices.extend_from_slice(&[0, i + 1, (i + 1) % 6 + 1]);
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U16(indices))
}

// ── Update ──────────────────────────────────────────────────────────

/// Resolves the cursor to a board coordinate and stores it in
/// [`HoveredTile`]. The cursor belongs to egui while a panel claims it.
pub fn hover_track(
    window: Query<&Window, With<PrimaryWindow>>,
    mut egui_ctx: Query<&mut EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<BoardCamera>>,
    boards: Query<&Board>,
    mut hovered: ResMut<HoveredTile>,
    mut prev: Local<Option<CubeCoord>>,
) {
    let Ok(window) = window.single() else {
        return;
    };
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(board) = boards.single() else {
        return;
    };

    let over_ui = egui_ctx
        .single_mut()
        .is_ok_and(|mut ctx| ctx.get_mut().wants_pointer_input());

    let coord = if over_ui {
        None
    } else {
        window
            .cursor_position()
            .and_then(|screen| camera.viewport_to_world_2d(cam_gt, screen).ok())
            .map(|world| board.grid.layout().pixel_to_hex(flip_y(world)))
            .filter(|c| board.grid.get(*c).is_some())
    };

    hovered.0 = coord;
    if *prev != coord {
        if let Some(c) = coord {
            debug!("hover {c}");
        }
        *prev = coord;
    }
}

/// Applies the active brush to the hovered tile while the left button is
/// held. Edits are legal mid-run; the search honors them when it next
/// touches the tile.
pub fn paint_tiles(
    buttons: Res<ButtonInput<MouseButton>>,
    hovered: Res<HoveredTile>,
    brush: Res<Brush>,
    cfg: Res<BoardConfig>,
    mut boards: Query<&mut Board>,
) {
    if !buttons.pressed(MouseButton::Left) {
        return;
    }
    let Some(coord) = hovered.0 else {
        return;
    };
    let Ok(mut board) = boards.single_mut() else {
        return;
    };

    match brush.kind {
        BrushKind::Wall => {
            board.grid.set_wall(coord, true);
        }
        BrushKind::River => {
            board.grid.set_terrain_cost(coord, cfg.river.cost);
        }
        BrushKind::Erase => {
            board.grid.set_wall(coord, false);
            board.grid.set_terrain_cost(coord, 1);
        }
    }
}

/// Reassigns each disc's material from its tile state. Marker roles beat
/// search roles beat terrain.
pub fn sync_tile_materials(
    boards: Query<&Board>,
    engine: Res<SearchEngine>,
    palette: Res<TilePalette>,
    mut discs: Query<(&TileDisc, &mut MeshMaterial2d<ColorMaterial>)>,
) {
    let Ok(board) = boards.single() else {
        return;
    };
    let frontier: HashSet<CubeCoord> = engine.frontier_coords().into_iter().collect();

    for (disc, mut material) in &mut discs {
        let Some(tile) = board.grid.get(disc.coord) else {
            continue;
        };
        let handle = if tile.is_wall {
            &palette.wall
        } else if tile.is_player {
            &palette.player
        } else if tile.is_target {
            &palette.target
        } else if tile.is_path {
            &palette.path
        } else if frontier.contains(&disc.coord) {
            &palette.frontier
        } else if tile.visited {
            &palette.visited
        } else if tile.cost > 1 {
            &palette.river
        } else {
            &palette.plain
        };
        if material.0 != *handle {
            material.0 = handle.clone();
        }
    }
}

/// Rings the hovered tile with a gizmo outline.
pub fn outline_hovered(hovered: Res<HoveredTile>, boards: Query<&Board>, mut gizmos: Gizmos) {
    let Some(coord) = hovered.0 else {
        return;
    };
    let Ok(board) = boards.single() else {
        return;
    };

    let layout = board.grid.layout();
    let center = flip_y(layout.hex_to_pixel(coord));
    let mut ring: Vec<Vec2> = layout
        .corner_offsets()
        .iter()
        .map(|corner| center + *corner)
        .collect();
    ring.push(ring[0]);
    gizmos.linestrip_2d(ring, Color::srgb(0.95, 0.88, 0.36));
}
