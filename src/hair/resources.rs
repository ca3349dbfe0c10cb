//! Hair domain: tuning values for the chain and its deployment.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// How segment masses are assigned when the chain is built.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum MassProfile {
    /// `base + step * id`, heavier toward the tip.
    Linear { base: f32, step: f32 },
    /// Every segment gets the same mass.
    Fixed(f32),
}

impl MassProfile {
    pub fn mass_for(&self, id: usize) -> f32 {
        match *self {
            MassProfile::Linear { base, step } => (base + step * id as f32).max(0.0),
            MassProfile::Fixed(mass) => mass.max(0.0),
        }
    }
}

/// Scan rules for `HairChain::closest_usable_segment`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClosestSegmentScan {
    /// Stop scanning once a segment lies this far below the query point.
    pub below_margin: Option<f32>,
    /// A segment closer than this ends the scan immediately.
    pub epsilon: f32,
}

impl Default for ClosestSegmentScan {
    fn default() -> Self {
        Self {
            below_margin: Some(0.2),
            epsilon: 1e-3,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HairTuning {
    pub segment_count: usize,
    /// Rest distance between neighbouring segment centres.
    pub segment_length: f32,
    pub segment_radius: f32,
    pub mass_profile: MassProfile,
    /// Added per hop tipward of a held segment.
    pub hop_mass_increment: f32,
    /// Mass given to segments rootward of a held segment.
    pub slack_mass: f32,
    /// How many root-ward neighbours a latching segment stiffens.
    pub neighbor_span: usize,
    pub hold_grace: f32,
    pub latch_time: f32,
    pub wrap_intent_delay: f32,
    pub wrap_check_interval: f32,
    pub stretch_threshold: f32,
    pub closest_scan: ClosestSegmentScan,
    pub link_iterations: usize,
    pub sticky_friction: f32,
    pub slippery_friction: f32,
    // Deployment
    pub shoot_delay: f32,
    pub settle_delay: f32,
    pub active_scale: f32,
    pub stowed_scale: f32,
    pub idle_scale: f32,
    pub launch_force: f32,
    /// Tip-most segments that receive no launch velocity.
    pub launch_skip: usize,
    pub seed_mass_on_launch: bool,
    pub pull_force: f32,
    pub pull_segment_delay: f32,
}

impl Default for HairTuning {
    fn default() -> Self {
        Self {
            segment_count: 24,
            segment_length: 0.18,
            segment_radius: 0.06,
            mass_profile: MassProfile::Linear {
                base: 2.0,
                step: 0.5,
            },
            hop_mass_increment: 20.0,
            slack_mass: 10.0,
            neighbor_span: 3,
            hold_grace: 0.2,
            latch_time: 1.5,
            wrap_intent_delay: 0.3,
            wrap_check_interval: 0.05,
            stretch_threshold: 0.25,
            closest_scan: ClosestSegmentScan::default(),
            link_iterations: 4,
            sticky_friction: 1.0,
            slippery_friction: 0.0,
            shoot_delay: 0.1,
            settle_delay: 0.05,
            active_scale: 1.0,
            stowed_scale: 0.0,
            idle_scale: 1.0,
            launch_force: 12.0,
            launch_skip: 6,
            seed_mass_on_launch: false,
            pull_force: 30.0,
            pull_segment_delay: 0.1,
        }
    }
}

impl HairTuning {
    /// Full length of the deployed chain.
    pub fn reach(&self) -> f32 {
        self.segment_length * self.segment_count.saturating_sub(1) as f32
    }
}
