//! Movement domain: ground, grab and safe-edge sensors.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, MovementState, MovementTuning, Player, TileGrid};

/// Box overlap test against the given layers.
pub(crate) fn box_overlaps(
    spatial_query: &SpatialQuery,
    center: Vec2,
    size: [f32; 2],
    filter: &SpatialQueryFilter,
) -> bool {
    let shape = Collider::rectangle(size[0], size[1]);
    !spatial_query
        .shape_intersections(&shape, center, 0.0, filter)
        .is_empty()
}

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Position, &mut MovementState), With<Player>>,
) {
    // Only ground counts; walls and grab surfaces do not.
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let now = time.elapsed_secs();

    for (position, mut state) in &mut query {
        let was_grounded = state.grounded;
        let sensor = tuning.ground_sensor_center(position.0);
        let touching = box_overlaps(
            &spatial_query,
            sensor,
            tuning.ground_sensor_size,
            &ground_filter,
        );

        let grounded = state.update_grounding(touching, now, &tuning);
        if grounded != was_grounded {
            debug!("Grounding: {:?} -> {:?}", was_grounded, grounded);
        }
    }
}

/// Snaps the player onto a ledge it is about to clip.
pub(crate) fn apply_safe_edge(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    grid: Res<TileGrid>,
    mut query: Query<(&mut Position, &mut MovementState), With<Player>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (mut position, mut state) in &mut query {
        let sensor = tuning.safe_edge_sensor_center(position.0, state.facing);
        let hit = box_overlaps(
            &spatial_query,
            sensor,
            tuning.safe_edge_sensor_size,
            &ground_filter,
        );

        if let Some(y) = state.safe_edge_snap(position.0, hit, &grid, &tuning) {
            position.y = y;
        }
    }
}

/// Whether the grab sensor above the player's shoulders overlaps a segment.
pub(crate) fn grab_sensor_over_hair(
    spatial_query: &SpatialQuery,
    player_position: Vec2,
    tuning: &MovementTuning,
) -> bool {
    let hair_filter = SpatialQueryFilter::from_mask(GameLayer::Hair);
    let sensor = tuning.grab_sensor_center(player_position);
    box_overlaps(spatial_query, sensor, tuning.grab_sensor_size, &hair_filter)
}
