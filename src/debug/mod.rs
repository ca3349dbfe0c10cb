//! Debug tooling for tuning the chain and locomotion.
//!
//! Features:
//! - F1 toggles sensor and segment gizmos
//! - F2 logs a JSON snapshot of the chain and player state

mod state;
mod systems;

use bevy::prelude::*;

use crate::core::FrameSet;
use crate::debug::state::DebugState;
use crate::debug::systems::{draw_segment_gizmos, draw_sensor_gizmos, log_snapshot, toggle_gizmos};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (toggle_gizmos, log_snapshot)
                    .chain()
                    .in_set(FrameSet::Presentation),
            )
            .add_systems(
                Update,
                (draw_sensor_gizmos, draw_segment_gizmos)
                    .in_set(FrameSet::Presentation)
                    .run_if(|state: Res<DebugState>| state.show_gizmos),
            );
    }
}
