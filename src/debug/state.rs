//! Debug domain: toggles and the JSON snapshot shapes.

use bevy::prelude::*;
use serde::Serialize;

use crate::hair::{DeploymentPhase, HairChain, HairSegment};
use crate::movement::{AnimatorParams, Coupling, Facing, HairGrip, MovementState};

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether sensor and segment gizmos are drawn
    pub show_gizmos: bool,
}

#[derive(Debug, Serialize)]
pub struct SegmentSnapshot {
    pub id: usize,
    pub position: [f32; 2],
    pub rotation: f32,
    pub scale: f32,
    pub mass: f32,
    pub constraint: String,
    pub surface: String,
    pub holding: bool,
    pub touching: bool,
    pub activated_by_neighbor: bool,
}

impl From<&HairSegment> for SegmentSnapshot {
    fn from(segment: &HairSegment) -> Self {
        Self {
            id: segment.id,
            position: segment.position.to_array(),
            rotation: segment.rotation,
            scale: segment.scale,
            mass: segment.mass,
            constraint: format!("{:?}", segment.constraint),
            surface: format!("{:?}", segment.surface),
            holding: segment.is_holding(),
            touching: segment.is_touching(),
            activated_by_neighbor: segment.activated_by_neighbor,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChainSnapshot {
    pub phase: String,
    pub deployed: bool,
    pub pulling: bool,
    pub should_wrap: bool,
    pub wrapped: bool,
    pub stretched: bool,
    pub stretch_distance: f32,
    pub hair_point: [f32; 2],
    pub wrap_point: Option<[f32; 2]>,
    pub segments: Vec<SegmentSnapshot>,
}

impl ChainSnapshot {
    pub fn capture(chain: &HairChain, phase: DeploymentPhase) -> Self {
        Self {
            phase: format!("{:?}", phase),
            deployed: chain.is_deployed(),
            pulling: chain.is_pulling(),
            should_wrap: chain.should_wrap(),
            wrapped: chain.is_wrapped(),
            stretched: chain.is_stretched(),
            stretch_distance: chain.stretch_distance(),
            hair_point: chain.hair_point().to_array(),
            wrap_point: chain.wrap_point().map(|p| p.to_array()),
            segments: chain.segments().iter().map(SegmentSnapshot::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerSnapshot {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub mode: String,
    pub grounded: String,
    pub facing: Facing,
    pub jumped: bool,
    pub on_hair: bool,
    pub gravity_scale: f32,
    pub mass: f32,
    pub coupling: Coupling,
    pub held_segment: Option<usize>,
    pub animator: AnimatorParams,
}

impl PlayerSnapshot {
    pub fn capture(
        position: Vec2,
        velocity: Vec2,
        state: &MovementState,
        grip: &HairGrip,
        animator: &AnimatorParams,
    ) -> Self {
        Self {
            position: position.to_array(),
            velocity: velocity.to_array(),
            mode: format!("{:?}", state.mode),
            grounded: format!("{:?}", state.grounded),
            facing: state.facing,
            jumped: state.jumped,
            on_hair: state.on_hair,
            gravity_scale: state.gravity_scale,
            mass: state.mass,
            coupling: grip.coupling,
            held_segment: grip.held,
            animator: *animator,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DebugSnapshot {
    pub player: Option<PlayerSnapshot>,
    pub chain: ChainSnapshot,
}
