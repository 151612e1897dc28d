use bevy::prelude::*;

/// Marker for the single board-viewing camera.
#[derive(Component, Reflect)]
pub struct BoardCamera;
