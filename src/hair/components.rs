//! Hair domain: ECS markers for the chain's bodies.

use bevy::prelude::*;

/// A chain segment body. `id` indexes `HairChain::segments`.
#[derive(Component, Debug, Clone, Copy)]
pub struct HairSegmentBody {
    pub id: usize,
}

/// Short hair drawn on the player while the chain is stowed.
#[derive(Component, Debug)]
pub struct IdleHair;

/// Joint entity pinning the chain root to the player while deployed.
#[derive(Component, Debug)]
pub struct HairAnchorJoint;

/// Collider the hair may latch onto.
#[derive(Component, Debug)]
pub struct GrabSurface;
