//! Hair domain: the segmented hair chain, its wrap state and deployment.

mod chain;
mod components;
mod deploy;
mod error;
mod events;
mod resources;
mod segment;
mod spawn;
mod systems;
#[cfg(test)]
mod tests;

pub use chain::HairChain;
pub use components::{GrabSurface, HairAnchorJoint, HairSegmentBody, IdleHair};
pub use deploy::{DeploymentPhase, DeploymentSequencer};
pub use error::HairError;
pub use events::{ChainNotification, HairStretchChanged, HairWrapChanged};
pub use resources::{HairTuning, MassProfile};
pub use segment::{HairSegment, SurfaceProfile, WrapConstraint};

use bevy::prelude::*;

use crate::core::{FrameSet, PhysicsSet, SpawnSet};
use crate::hair::spawn::spawn_hair_chain;
use crate::hair::systems::{
    advance_deployment, capture_segment_positions, evaluate_wrap_and_stretch,
    solve_segment_links, sync_anchor_joint, sync_idle_hair, sync_segment_bodies, tick_segments,
    tick_wrap_intent, track_segment_contacts,
};

pub struct HairPlugin;

impl Plugin for HairPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HairTuning>()
            .init_resource::<DeploymentSequencer>()
            .add_message::<HairWrapChanged>()
            .add_message::<HairStretchChanged>()
            .add_systems(Startup, spawn_hair_chain.in_set(SpawnSet::Hair))
            .add_systems(
                Update,
                (
                    tick_wrap_intent,
                    advance_deployment,
                    track_segment_contacts,
                    evaluate_wrap_and_stretch,
                )
                    .chain()
                    .in_set(FrameSet::Chain),
            )
            .add_systems(Update, sync_idle_hair.in_set(FrameSet::Presentation))
            .add_systems(
                FixedUpdate,
                (
                    capture_segment_positions,
                    tick_segments,
                    solve_segment_links,
                    sync_segment_bodies,
                    sync_anchor_joint,
                )
                    .chain()
                    .in_set(PhysicsSet::Segments),
            );
    }
}
