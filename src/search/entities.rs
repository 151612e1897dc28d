use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::engine::{SearchEngine, SearchMode};
use crate::board::{Brush, HoveredTile};

/// Pacing and mode selection shared by the keyboard and panel controls.
#[derive(Resource, Reflect)]
pub struct SearchControl {
    /// Advance the run from the step timer.
    pub auto: bool,
    /// Frontier discipline for the next run.
    pub mode: SearchMode,
}

/// Repeating timer that paces automatic stepping.
#[derive(Resource)]
pub struct StepTimer(pub Timer);

/// Scratch coordinate state for the panel's marker editor.
#[derive(Default)]
pub struct MarkerDraft {
    /// Cube q component.
    pub q: i32,
    /// Cube r component.
    pub r: i32,
    /// Cube s component.
    pub s: i32,
}

/// The control panel's resource bundle.
#[derive(SystemParam)]
pub struct PanelState<'w> {
    /// Step engine.
    pub engine: ResMut<'w, SearchEngine>,
    /// Auto-run flag and mode selection.
    pub control: ResMut<'w, SearchControl>,
    /// Step pacing timer.
    pub timer: ResMut<'w, StepTimer>,
    /// Active paint brush.
    pub brush: ResMut<'w, Brush>,
    /// Tile under the cursor.
    pub hovered: Res<'w, HoveredTile>,
}
