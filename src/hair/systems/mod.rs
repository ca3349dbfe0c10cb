//! Hair domain: system modules for the chain.

pub(crate) mod bodies;
pub(crate) mod contacts;
pub(crate) mod deployment;
pub(crate) mod wrap;

pub(crate) use bodies::{
    capture_segment_positions, solve_segment_links, sync_anchor_joint, sync_idle_hair,
    sync_segment_bodies, tick_segments,
};
pub(crate) use contacts::track_segment_contacts;
pub(crate) use deployment::advance_deployment;
pub(crate) use wrap::{evaluate_wrap_and_stretch, tick_wrap_intent};
