//! Search control: the step engine, pacing timer, keyboard driving, and the
//! egui control panel.

mod engine;
mod entities;
mod systems;

pub use engine::{SearchEngine, SearchMode};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::GameState;

/// Nested configuration for search pacing.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct SearchConfig {
    /// Seconds between automatic search steps.
    pub step_interval: f32,
    /// Frontier discipline preselected in the panel.
    pub default_mode: SearchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step_interval: 0.05,
            default_mode: SearchMode::Bfs,
        }
    }
}

/// Search plugin: engine resource, pacing timer, controls, and panel.
pub struct SearchPlugin(pub SearchConfig);

impl Plugin for SearchPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SearchConfig>()
            .register_type::<entities::SearchControl>()
            .insert_resource(self.0.clone())
            .init_resource::<SearchEngine>()
            .insert_resource(entities::SearchControl {
                auto: false,
                mode: self.0.default_mode,
            })
            .insert_resource(entities::StepTimer(Timer::from_seconds(
                self.0.step_interval,
                TimerMode::Repeating,
            )))
            .add_systems(
                Update,
                (
                    systems::keyboard_controls,
                    systems::drive_search.after(systems::keyboard_controls),
                )
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(EguiPrimaryContextPass, systems::control_panel)
            .add_systems(
                EguiPrimaryContextPass,
                systems::draw_tile_labels
                    .after(systems::control_panel)
                    .run_if(in_state(GameState::Debugging)),
            );
    }
}
