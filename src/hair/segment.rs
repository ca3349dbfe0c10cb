//! Hair domain: per-segment wrap and contact state.

use bevy::prelude::*;

use crate::hair::resources::HairTuning;

/// Rigid-body constraint a segment is held under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapConstraint {
    #[default]
    Free,
    /// Rotational actuator engaged (holding or stiffened by a neighbour).
    RotationLocked,
    /// Latched onto a grab surface. Only cleared by stowing the chain.
    FullyFrozen,
}

/// Friction profile applied to the segment collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceProfile {
    #[default]
    Slippery,
    Sticky,
}

/// Request from a segment to stiffen or relax its root-ward neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborRequest {
    Activate(usize),
    Deactivate(usize),
}

#[derive(Debug, Clone)]
pub struct HairSegment {
    pub id: usize,
    pub entity: Entity,
    /// Mass from the chain's mass profile, restored by `reset_masses`.
    pub profile_mass: f32,
    pub mass: f32,
    pub constraint: WrapConstraint,
    pub surface: SurfaceProfile,
    pub facing_right: bool,
    pub activated_by_neighbor: bool,
    pub contact_start: Option<f32>,
    pub contact_stop: Option<f32>,
    pub hold_grace_active: bool,
    holding: bool,
    contacts: u32,
    // Geometry mirrored from the physics body.
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
    /// One-shot teleport (position, angle) for the sync system.
    pub pending_pose: Option<(Vec2, f32)>,
    /// One-shot velocity override for the sync system.
    pub pending_velocity: Option<Vec2>,
}

impl HairSegment {
    pub fn new(id: usize, entity: Entity, mass: f32) -> Self {
        Self {
            id,
            entity,
            profile_mass: mass,
            mass,
            constraint: WrapConstraint::Free,
            surface: SurfaceProfile::Slippery,
            facing_right: true,
            activated_by_neighbor: false,
            contact_start: None,
            contact_stop: None,
            hold_grace_active: false,
            holding: false,
            contacts: 0,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 0.0,
            pending_pose: None,
            pending_velocity: None,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.constraint == WrapConstraint::FullyFrozen
    }

    pub fn is_holding(&self) -> bool {
        self.holding
    }

    pub fn is_touching(&self) -> bool {
        self.contacts > 0
    }

    /// Whether the segment is scaled in and taking part in the simulation.
    pub fn is_active(&self) -> bool {
        self.scale > 0.0
    }

    pub fn actuator_engaged(&self) -> bool {
        self.holding || self.hold_grace_active || self.activated_by_neighbor
    }

    /// Reset applied every tick while the chain is not deployed. Contacts
    /// survive while the segment is scaled in (the shoot settle window).
    pub(crate) fn stow(&mut self) {
        self.constraint = WrapConstraint::Free;
        self.surface = SurfaceProfile::Slippery;
        self.activated_by_neighbor = false;
        self.contact_start = None;
        self.contact_stop = None;
        self.hold_grace_active = false;
        self.holding = false;
        if !self.is_active() {
            self.contacts = 0;
        }
    }

    fn begin_hold(&mut self, now: f32) -> NeighborRequest {
        self.surface = SurfaceProfile::Sticky;
        self.contact_start = Some(now);
        self.holding = true;
        self.hold_grace_active = false;
        if self.constraint == WrapConstraint::Free {
            self.constraint = WrapConstraint::RotationLocked;
        }
        NeighborRequest::Activate(self.id)
    }

    /// A grab-enabled surface started touching this segment.
    pub(crate) fn contact_started(&mut self, now: f32, should_wrap: bool) -> Option<NeighborRequest> {
        self.contacts += 1;
        if self.contacts > 1 || self.is_frozen() || !should_wrap {
            return None;
        }
        Some(self.begin_hold(now))
    }

    /// A grab-enabled surface stopped touching this segment.
    pub(crate) fn contact_ended(&mut self, now: f32) {
        self.contacts = self.contacts.saturating_sub(1);
        if self.contacts > 0 {
            return;
        }
        self.contact_stop = Some(now);
        if self.holding {
            self.holding = false;
            self.hold_grace_active = true;
        }
    }

    /// Per-step update while the chain is deployed.
    pub(crate) fn tick(
        &mut self,
        now: f32,
        should_wrap: bool,
        tuning: &HairTuning,
    ) -> Option<NeighborRequest> {
        if self.is_frozen() {
            return None;
        }

        let mut request = None;

        if self.contacts > 0 {
            if !self.holding && should_wrap {
                request = Some(self.begin_hold(now));
            }

            let latched = self.holding
                && should_wrap
                && self
                    .contact_start
                    .is_some_and(|start| now - start >= tuning.latch_time);
            if latched {
                self.constraint = WrapConstraint::FullyFrozen;
                self.hold_grace_active = false;
                debug!("Hair segment {} latched", self.id);
                return request;
            }
        } else if self.hold_grace_active {
            let expired = self
                .contact_stop
                .is_none_or(|stop| now - stop >= tuning.hold_grace);
            if expired {
                self.hold_grace_active = false;
                self.surface = SurfaceProfile::Slippery;
                request = Some(NeighborRequest::Deactivate(self.id));
            }
        }

        self.constraint = if self.actuator_engaged() {
            WrapConstraint::RotationLocked
        } else {
            WrapConstraint::Free
        };

        request
    }
}
