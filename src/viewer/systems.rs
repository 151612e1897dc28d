use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;

use super::ViewerConfig;
use super::entities::BoardCamera;
use crate::board::{BoardConfig, flip_y};
use crate::hex::{HexLayout, offset_to_cube};

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the HDR camera centered over the configured board region.
pub fn spawn_viewer(mut commands: Commands, viewer: Res<ViewerConfig>, board: Res<BoardConfig>) {
    let layout = HexLayout::new(board.hex_size, Vec2::ZERO);
    let near = flip_y(layout.hex_to_pixel(offset_to_cube(board.bounds.top, board.bounds.left)));
    let far = flip_y(layout.hex_to_pixel(offset_to_cube(board.bounds.bottom, board.bounds.right)));
    let center = (near + far) / 2.0;

    commands.spawn((
        BoardCamera,
        Camera2d,
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: viewer.bloom_intensity,
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        },
        Projection::from(OrthographicProjection {
            scale: viewer.initial_scale,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_translation(center.extend(0.0)),
        Name::new("Viewer"),
    ));
}

// ── Update ──────────────────────────────────────────────────────────

/// WASD or arrow panning plus scroll-wheel zoom, clamped to the configured
/// scale range. Pan speed tracks the zoom so travel feels constant.
pub fn pan_zoom(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut wheel: MessageReader<MouseWheel>,
    viewer: Res<ViewerConfig>,
    mut camera_q: Query<(&mut Transform, &mut Projection), With<BoardCamera>>,
) {
    let Ok((mut transform, mut projection)) = camera_q.single_mut() else {
        return;
    };
    let Projection::Orthographic(ortho) = &mut *projection else {
        return;
    };

    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }
    if dir != Vec2::ZERO {
        let step = dir.normalize() * viewer.pan_speed * ortho.scale * time.delta_secs();
        transform.translation += step.extend(0.0);
    }

    let mut scroll = 0.0;
    for ev in wheel.read() {
        scroll += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 40.0,
        };
    }
    if scroll != 0.0 {
        let zoomed = ortho.scale * (1.0 - scroll * viewer.zoom_step);
        ortho.scale = zoomed.clamp(viewer.min_scale, viewer.max_scale);
    }
}
