use std::time::Duration;

use bevy::prelude::*;
use bevy_egui::{EguiContext, egui};

use super::engine::{SearchEngine, SearchMode, SearchPhase};
use super::entities::{MarkerDraft, PanelState, SearchControl, StepTimer};
use crate::board::{Board, BoardConfig, BrushKind, HexBoard, HoveredTile, flip_y};
use crate::hex::CubeCoord;
use crate::viewer::BoardCamera;

// ── Run control ─────────────────────────────────────────────────────

/// Starts a run between the placed markers. Invalid endpoints leave the
/// engine as it was and drop back to manual stepping.
fn begin_run(
    engine: &mut SearchEngine,
    control: &mut SearchControl,
    grid: &mut HexBoard,
    auto: bool,
) {
    let (Some(origin), Some(goal)) = (grid.player(), grid.target()) else {
        warn!("place the player and the target before searching");
        return;
    };
    match engine.start(grid, origin, goal, control.mode) {
        Ok(()) => {
            control.auto = auto;
            info!("searching {origin} -> {goal}");
        }
        Err(err) => {
            control.auto = false;
            warn!("{err}");
        }
    }
}

/// Advances one step and applies the terminal-phase effects: a found route
/// gets marked on the board, and either outcome pauses auto-running.
fn advance_search(engine: &mut SearchEngine, control: &mut SearchControl, grid: &mut HexBoard) {
    if engine.phase() != SearchPhase::Running {
        return;
    }
    match engine.step(grid) {
        SearchPhase::Found => {
            control.auto = false;
            match engine.reconstruct_path() {
                Ok(path) => {
                    let cost = path.last().and_then(|c| engine.cost_at(*c)).unwrap_or(0);
                    for coord in &path {
                        grid.mark_path(*coord);
                    }
                    info!("route found: {} tiles, cost {cost}", path.len());
                }
                Err(err) => warn!("{err}"),
            }
        }
        SearchPhase::Exhausted => {
            control.auto = false;
            info!("frontier exhausted with no route");
        }
        _ => {}
    }
}

/// Rebuilds the grid from configuration and clears the engine. Tile
/// entities key by coordinate, so they survive the swap untouched.
fn reset_run(
    engine: &mut SearchEngine,
    control: &mut SearchControl,
    grid: &mut HexBoard,
    cfg: &BoardConfig,
) {
    engine.stop();
    control.auto = false;
    *grid = HexBoard::from_config(cfg);
    info!("board reset");
}

// ── Update ──────────────────────────────────────────────────────────

/// Enter runs or pauses, Space single-steps, R resets the board.
pub fn keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    cfg: Res<BoardConfig>,
    mut engine: ResMut<SearchEngine>,
    mut control: ResMut<SearchControl>,
    mut boards: Query<&mut Board>,
) {
    let Ok(mut board) = boards.single_mut() else {
        return;
    };

    if keys.just_pressed(KeyCode::Enter) {
        if engine.phase() == SearchPhase::Running {
            control.auto = !control.auto;
        } else {
            begin_run(&mut engine, &mut control, &mut board.grid, true);
        }
    }
    if keys.just_pressed(KeyCode::Space) {
        if engine.phase() == SearchPhase::Running {
            control.auto = false;
            advance_search(&mut engine, &mut control, &mut board.grid);
        } else {
            begin_run(&mut engine, &mut control, &mut board.grid, false);
        }
    }
    if keys.just_pressed(KeyCode::KeyR) {
        reset_run(&mut engine, &mut control, &mut board.grid, &cfg);
    }
}

/// Ticks the pacing timer and advances the run while auto is on.
pub fn drive_search(
    time: Res<Time>,
    mut timer: ResMut<StepTimer>,
    mut engine: ResMut<SearchEngine>,
    mut control: ResMut<SearchControl>,
    mut boards: Query<&mut Board>,
) {
    if !control.auto {
        return;
    }
    let Ok(mut board) = boards.single_mut() else {
        return;
    };

    timer.0.tick(time.delta());
    for _ in 0..timer.0.times_finished_this_tick() {
        advance_search(&mut engine, &mut control, &mut board.grid);
    }
}

// ── Panel ───────────────────────────────────────────────────────────

/// Left side panel with mode, pacing, brush, run controls, and status.
pub fn control_panel(
    mut egui_ctx: Query<&mut EguiContext>,
    mut boards: Query<&mut Board>,
    mut ui_state: PanelState,
    cfg: Res<BoardConfig>,
    mut draft: Local<MarkerDraft>,
) {
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let Ok(mut board) = boards.single_mut() else {
        return;
    };

    egui::SidePanel::left("controls")
        .default_width(190.0)
        .show(ctx.get_mut(), |ui| {
            ui.heading("Pathfinding");
            ui.separator();

            ui.label("Mode");
            ui.radio_value(&mut ui_state.control.mode, SearchMode::Bfs, "Breadth-first");
            ui.radio_value(&mut ui_state.control.mode, SearchMode::AStar, "Weighted A*");

            let mut interval = ui_state.timer.0.duration().as_secs_f32();
            if ui
                .add(egui::Slider::new(&mut interval, 0.01..=0.5).text("step interval"))
                .changed()
            {
                ui_state.timer.0.set_duration(Duration::from_secs_f32(interval));
            }
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Run").clicked() {
                    if ui_state.engine.phase() == SearchPhase::Running {
                        ui_state.control.auto = true;
                    } else {
                        begin_run(
                            &mut ui_state.engine,
                            &mut ui_state.control,
                            &mut board.grid,
                            true,
                        );
                    }
                }
                if ui.button("Pause").clicked() {
                    ui_state.control.auto = false;
                }
                if ui.button("Step").clicked() {
                    if ui_state.engine.phase() == SearchPhase::Running {
                        ui_state.control.auto = false;
                        advance_search(
                            &mut ui_state.engine,
                            &mut ui_state.control,
                            &mut board.grid,
                        );
                    } else {
                        begin_run(
                            &mut ui_state.engine,
                            &mut ui_state.control,
                            &mut board.grid,
                            false,
                        );
                    }
                }
                if ui.button("Reset").clicked() {
                    reset_run(&mut ui_state.engine, &mut ui_state.control, &mut board.grid, &cfg);
                }
            });
            ui.separator();

            ui.label("Brush");
            ui.radio_value(&mut ui_state.brush.kind, BrushKind::Wall, "Wall");
            ui.radio_value(&mut ui_state.brush.kind, BrushKind::River, "River");
            ui.radio_value(&mut ui_state.brush.kind, BrushKind::Erase, "Erase");
            ui.separator();

            status_lines(ui, &ui_state, &board);
            ui.separator();
            marker_editor(ui, &mut draft, &ui_state.hovered, &mut board.grid);

            ui.separator();
            ui.small("Enter run/pause · Space step · R reset · Tab debug");
        });
}

fn status_lines(ui: &mut egui::Ui, state: &PanelState, board: &Board) {
    let status = match state.engine.phase() {
        SearchPhase::Idle => "idle".to_string(),
        SearchPhase::Running => {
            let pace = if state.control.auto { "running" } else { "paused" };
            format!("{pace}, {} discovered", state.engine.discovered_count())
        }
        SearchPhase::Found => match state.engine.reconstruct_path() {
            Ok(path) => {
                let cost = path.last().and_then(|c| state.engine.cost_at(*c)).unwrap_or(0);
                format!("found a {}-tile route, cost {cost}", path.len())
            }
            Err(_) => "found".to_string(),
        },
        SearchPhase::Exhausted => "exhausted, no route".to_string(),
    };
    ui.label(format!("Status: {status}"));
    ui.label(format!("Frontier: {}", state.engine.frontier_coords().len()));

    match state.hovered.0 {
        Some(coord) => {
            let cost = board.grid.get(coord).map_or(1, |t| t.cost);
            ui.label(format!("Hover: {coord} cost {cost}"));
        }
        None => {
            ui.label("Hover: -");
        }
    }
}

/// Cube-coordinate editor for moving the player and target markers.
fn marker_editor(
    ui: &mut egui::Ui,
    draft: &mut MarkerDraft,
    hovered: &HoveredTile,
    grid: &mut HexBoard,
) {
    ui.label("Markers");
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut draft.q).prefix("q "));
        ui.add(egui::DragValue::new(&mut draft.r).prefix("r "));
        ui.add(egui::DragValue::new(&mut draft.s).prefix("s "));
    });
    if ui.button("Copy hovered").clicked()
        && let Some(coord) = hovered.0
    {
        draft.q = coord.q();
        draft.r = coord.r();
        draft.s = coord.s();
    }
    ui.horizontal(|ui| {
        if ui.button("Place player").clicked() {
            place_from_draft(grid, draft, true);
        }
        if ui.button("Place target").clicked() {
            place_from_draft(grid, draft, false);
        }
    });
}

fn place_from_draft(grid: &mut HexBoard, draft: &MarkerDraft, player: bool) {
    match CubeCoord::new(draft.q, draft.r, draft.s) {
        Ok(coord) => {
            let placed = if player {
                grid.place_player(coord)
            } else {
                grid.place_target(coord)
            };
            if !placed {
                warn!("{coord} is outside the board");
            }
        }
        Err(err) => warn!("{err}"),
    }
}

// ── Debug overlay ───────────────────────────────────────────────────

/// Screen-projects each tile's axial coordinate, discovered cost, and
/// terrain cost as an egui label.
pub fn draw_tile_labels(
    mut egui_ctx: Query<&mut EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<BoardCamera>>,
    boards: Query<&Board>,
    engine: Res<SearchEngine>,
    mut ready: Local<bool>,
) {
    // Egui fonts aren't available until the context has run once.
    if !*ready {
        *ready = true;
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(board) = boards.single() else {
        return;
    };

    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());
    let layout = board.grid.layout();

    for (coord, tile) in board.grid.all_tiles() {
        let world = flip_y(layout.hex_to_pixel(coord)).extend(0.0);
        let Ok(viewport) = camera.world_to_viewport(cam_gt, world) else {
            continue;
        };

        let mut text = format!("{},{}", coord.q(), coord.r());
        if let Some(g) = engine.cost_at(coord) {
            text.push_str(&format!(" g{g}"));
        }
        if tile.cost > 1 {
            text.push_str(&format!(" c{}", tile.cost));
        }
        painter.text(
            egui::pos2(viewport.x, viewport.y),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(10.0),
            egui::Color32::WHITE,
        );
    }
}
