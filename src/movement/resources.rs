//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::Facing;

/// Gravity and mass behaviour while the chain is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum WrappedGravity {
    /// Same shaping as on foot.
    Locomotion,
    /// Fixed gravity scale while `OnHair` or `HairWrapped`.
    Fixed(f32),
    /// Bleed player mass toward `floor` at `rate` per second while falling
    /// wrapped, so the player slides down the chain.
    MassBleed { rate: f32, floor: f32 },
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub move_speed: f32,
    /// Lerp rate toward the target horizontal speed, per second.
    pub move_accel: f32,
    /// Upward speed held during the jump boost window.
    pub jump_velocity: f32,
    pub max_jump_time: f32,
    /// Extra upward speed for a jump fired from the buffer.
    pub buffered_jump_bonus: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    /// Downward speed (m/s) at which a jump counts as over.
    pub descent_threshold: f32,
    pub gravity: f32,
    pub base_gravity_scale: f32,
    pub coyote_gravity_boost: f32,
    pub fall_gravity_floor_boost: f32,
    pub fall_gravity_ceiling: f32,
    /// Smoothing rate toward the ceiling while fast-falling.
    pub fall_accel: f32,
    pub fast_fall_threshold: f32,
    pub wrapped_gravity: WrappedGravity,
    pub base_mass: f32,
    pub swing_mass: f32,
    pub swing_speed: f32,
    pub swing_accel: f32,
    /// Segments traversed per second while climbing.
    pub climb_speed: f32,
    /// Gain from distance-to-target to climb velocity.
    pub climb_stiffness: f32,
    pub climb_deadzone: f32,
    pub auto_grab_when_falling: bool,
    /// Player collider size.
    pub body_size: [f32; 2],
    pub ground_sensor_size: [f32; 2],
    /// Below the body centre.
    pub ground_sensor_offset: f32,
    pub grab_sensor_size: [f32; 2],
    /// Above the body centre.
    pub grab_sensor_offset: f32,
    pub safe_edge_sensor_size: [f32; 2],
    /// Sensor lift above the body's bottom edge.
    pub safe_edge_sensor_lift: f32,
    /// Contact point offset past the leading corner (x) and above the bottom (y).
    pub safe_edge_contact: [f32; 2],
    /// Lift applied before the tile lookup so the cell above the contact is hit.
    pub safe_edge_lookup_lift: f32,
    /// Thickness of the band below the tile top that triggers a snap.
    pub safe_edge_band: f32,
    pub safe_edge_clearance: f32,
    /// Scales the drag-back while stretched and pushing away from the hair.
    pub stretch_pull_factor: f32,
    pub throw_anim_time: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            move_accel: 8.0,
            jump_velocity: 8.0,
            max_jump_time: 0.25,
            buffered_jump_bonus: 16.0,
            coyote_time: 0.1,
            jump_buffer_time: 0.2,
            descent_threshold: 0.01,
            gravity: 9.81,
            base_gravity_scale: 3.0,
            coyote_gravity_boost: 3.0,
            fall_gravity_floor_boost: 5.0,
            fall_gravity_ceiling: 12.0,
            fall_accel: 2.0,
            fast_fall_threshold: 0.1,
            wrapped_gravity: WrappedGravity::Locomotion,
            base_mass: 5.0,
            swing_mass: 1.0,
            swing_speed: 5.0,
            swing_accel: 4.0,
            climb_speed: 6.0,
            climb_stiffness: 12.0,
            climb_deadzone: 0.1,
            auto_grab_when_falling: false,
            body_size: [0.5, 1.0],
            ground_sensor_size: [0.45, 0.05],
            ground_sensor_offset: 0.5,
            grab_sensor_size: [0.5, 0.3],
            grab_sensor_offset: 0.4,
            safe_edge_sensor_size: [0.04, 0.02],
            safe_edge_sensor_lift: 0.04,
            safe_edge_contact: [0.1, 0.03],
            safe_edge_lookup_lift: 0.36,
            safe_edge_band: 0.05,
            safe_edge_clearance: 0.1,
            stretch_pull_factor: 0.02,
            throw_anim_time: 0.1,
        }
    }
}

impl MovementTuning {
    pub fn body_half_extents(&self) -> Vec2 {
        Vec2::from(self.body_size) * 0.5
    }

    pub fn ground_sensor_center(&self, body: Vec2) -> Vec2 {
        body - Vec2::Y * self.ground_sensor_offset
    }

    pub fn grab_sensor_center(&self, body: Vec2) -> Vec2 {
        body + Vec2::Y * self.grab_sensor_offset
    }

    /// Sensor at the leading lower corner of the body.
    pub fn safe_edge_sensor_center(&self, body: Vec2, facing: Facing) -> Vec2 {
        let half = self.body_half_extents();
        Vec2::new(
            body.x + facing.sign() * half.x,
            body.y - half.y + self.safe_edge_sensor_lift,
        )
    }

    /// Peak height of a full boost jump from rest, ignoring drag.
    pub fn boost_jump_height(&self) -> f32 {
        let g = self.gravity * self.base_gravity_scale;
        let boost = self.jump_velocity * self.max_jump_time;
        boost + self.jump_velocity * self.jump_velocity / (2.0 * g)
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub shoot_just_pressed: bool,
    pub grab_just_pressed: bool,
    /// Cursor position in world space, if the cursor is over the window.
    pub aim: Option<Vec2>,
}

/// Tile grid used by the safe-edge correction.
#[derive(Resource, Debug, Clone, Copy)]
pub struct TileGrid {
    /// World position of cell (0, 0)'s bottom-left corner.
    pub origin: Vec2,
    pub cell_size: Vec2,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            cell_size: Vec2::ONE,
        }
    }
}

impl TileGrid {
    pub fn world_to_cell(&self, point: Vec2) -> IVec2 {
        ((point - self.origin) / self.cell_size).floor().as_ivec2()
    }

    /// Bottom-left corner of `cell`.
    pub fn cell_to_world(&self, cell: IVec2) -> Vec2 {
        self.origin + cell.as_vec2() * self.cell_size
    }
}
