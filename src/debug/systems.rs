//! Debug domain: hotkeys and gizmo drawing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::debug::state::{ChainSnapshot, DebugSnapshot, DebugState, PlayerSnapshot};
use crate::hair::{DeploymentSequencer, HairChain, WrapConstraint};
use crate::movement::{AnimatorParams, HairGrip, MovementState, MovementTuning, Player};

const GROUND_SENSOR_COLOR: Color = Color::srgb(0.2, 0.9, 0.3);
const GRAB_SENSOR_COLOR: Color = Color::srgb(0.9, 0.8, 0.2);
const EDGE_SENSOR_COLOR: Color = Color::srgb(0.9, 0.3, 0.2);

/// Toggle sensor gizmos with F1
pub(crate) fn toggle_gizmos(keyboard: Res<ButtonInput<KeyCode>>, mut debug_state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_gizmos = !debug_state.show_gizmos;
        info!(
            "[DEBUG] Gizmos {}",
            if debug_state.show_gizmos { "ON" } else { "OFF" }
        );
    }
}

/// Log the chain and player state as JSON with F2
pub(crate) fn log_snapshot(
    keyboard: Res<ButtonInput<KeyCode>>,
    chain: Res<HairChain>,
    sequencer: Res<DeploymentSequencer>,
    player: Query<
        (
            &Position,
            &LinearVelocity,
            &MovementState,
            &HairGrip,
            &AnimatorParams,
        ),
        With<Player>,
    >,
) {
    if !keyboard.just_pressed(KeyCode::F2) {
        return;
    }

    let snapshot = DebugSnapshot {
        player: player
            .single()
            .ok()
            .map(|(position, velocity, state, grip, animator)| {
                PlayerSnapshot::capture(position.0, velocity.0, state, grip, animator)
            }),
        chain: ChainSnapshot::capture(&chain, sequencer.phase()),
    };

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => info!("[DEBUG] Snapshot:\n{}", json),
        Err(e) => warn!("[DEBUG] Snapshot failed: {}", e),
    }
}

pub(crate) fn draw_sensor_gizmos(
    mut gizmos: Gizmos,
    tuning: Res<MovementTuning>,
    player: Query<(&Position, &MovementState), With<Player>>,
) {
    for (position, state) in &player {
        gizmos.rect_2d(
            Isometry2d::from_translation(tuning.ground_sensor_center(position.0)),
            Vec2::from(tuning.ground_sensor_size),
            GROUND_SENSOR_COLOR,
        );
        gizmos.rect_2d(
            Isometry2d::from_translation(tuning.grab_sensor_center(position.0)),
            Vec2::from(tuning.grab_sensor_size),
            GRAB_SENSOR_COLOR,
        );
        gizmos.rect_2d(
            Isometry2d::from_translation(tuning.safe_edge_sensor_center(position.0, state.facing)),
            Vec2::from(tuning.safe_edge_sensor_size),
            EDGE_SENSOR_COLOR,
        );
    }
}

pub(crate) fn draw_segment_gizmos(mut gizmos: Gizmos, chain: Res<HairChain>) {
    let radius = chain.tuning().segment_radius;

    for segment in chain.segments().iter().filter(|s| s.is_active()) {
        let color = match segment.constraint {
            WrapConstraint::Free => Color::srgb(0.6, 0.6, 0.9),
            WrapConstraint::RotationLocked => Color::srgb(0.9, 0.6, 0.2),
            WrapConstraint::FullyFrozen => Color::srgb(0.9, 0.1, 0.1),
        };
        gizmos.circle_2d(
            Isometry2d::from_translation(segment.position),
            radius * segment.scale,
            color,
        );
    }

    if let Some(point) = chain.wrap_point() {
        gizmos.cross_2d(Isometry2d::from_translation(point), 0.15, Color::WHITE);
    }
}
