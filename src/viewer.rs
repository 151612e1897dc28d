//! Camera rig: an HDR orthographic viewer with pan, zoom, and bloom.

mod entities;
mod systems;

pub use entities::BoardCamera;

use bevy::prelude::*;

use crate::GameState;

/// Nested configuration for the viewer camera.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ViewerConfig {
    /// Pan speed in world units per second at orthographic scale 1.
    pub pan_speed: f32,
    /// Zoom factor applied per scroll line.
    pub zoom_step: f32,
    /// Closest allowed zoom.
    pub min_scale: f32,
    /// Farthest allowed zoom.
    pub max_scale: f32,
    /// Starting orthographic scale.
    pub initial_scale: f32,
    /// Bloom strength behind the glowing tile roles.
    pub bloom_intensity: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            pan_speed: 420.0,
            zoom_step: 0.08,
            min_scale: 0.2,
            max_scale: 3.0,
            initial_scale: 0.5,
            bloom_intensity: 0.3,
        }
    }
}

/// Viewer plugin: camera spawn at startup, pan and zoom at runtime.
pub struct ViewerPlugin(pub ViewerConfig);

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ViewerConfig>()
            .register_type::<BoardCamera>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, systems::spawn_viewer)
            .add_systems(
                Update,
                systems::pan_zoom.run_if(in_state(GameState::Running)),
            );
    }
}
