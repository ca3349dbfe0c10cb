//! Hair domain: the chain controller owning every segment's wrap and mass state.

use bevy::prelude::*;

use crate::hair::error::HairError;
use crate::hair::events::ChainNotification;
use crate::hair::resources::HairTuning;
use crate::hair::segment::{HairSegment, NeighborRequest, WrapConstraint};

/// Ordered hair segments, root (id 0, next to the player) to tip.
///
/// Player systems read this resource and go through its methods for mass
/// changes; only the chain and the deployment sequencer mutate segments.
#[derive(Resource, Debug)]
pub struct HairChain {
    segments: Vec<HairSegment>,
    tuning: HairTuning,
    should_wrap: bool,
    /// Seconds left before a pending wrap intent takes effect.
    pending_wrap: Option<f32>,
    has_shot_hair: bool,
    is_pulling: bool,
    wrapped: bool,
    stretched: bool,
    stretch_distance: f32,
    since_wrap_check: f32,
    hair_point: Vec2,
    idle_scale: f32,
}

impl HairChain {
    /// Binds the ordered segment bodies and assigns ids and the mass profile.
    pub fn new(entities: Vec<Entity>, tuning: HairTuning) -> Result<Self, HairError> {
        if entities.len() < 2 {
            return Err(HairError::ChainTooShort(entities.len()));
        }

        let segments = entities
            .into_iter()
            .enumerate()
            .map(|(id, entity)| {
                let mut segment = HairSegment::new(id, entity, tuning.mass_profile.mass_for(id));
                segment.scale = tuning.stowed_scale;
                segment
            })
            .collect();

        Ok(Self {
            segments,
            idle_scale: tuning.idle_scale,
            tuning,
            should_wrap: false,
            pending_wrap: None,
            has_shot_hair: false,
            is_pulling: false,
            wrapped: false,
            stretched: false,
            stretch_distance: 0.0,
            since_wrap_check: 0.0,
            hair_point: Vec2::ZERO,
        })
    }

    pub fn tuning(&self) -> &HairTuning {
        &self.tuning
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[HairSegment] {
        &self.segments
    }

    pub fn segment(&self, id: usize) -> &HairSegment {
        debug_assert!(id < self.segments.len(), "segment id {id} out of range");
        &self.segments[id]
    }

    pub(crate) fn segment_mut(&mut self, id: usize) -> &mut HairSegment {
        debug_assert!(id < self.segments.len(), "segment id {id} out of range");
        &mut self.segments[id]
    }

    pub fn segment_by_entity(&self, entity: Entity) -> Option<usize> {
        self.segments.iter().position(|s| s.entity == entity)
    }

    pub fn tip(&self) -> usize {
        self.segments.len() - 1
    }

    pub fn is_deployed(&self) -> bool {
        self.has_shot_hair
    }

    pub fn is_pulling(&self) -> bool {
        self.is_pulling
    }

    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    pub fn is_stretched(&self) -> bool {
        self.stretched
    }

    pub fn stretch_distance(&self) -> f32 {
        self.stretch_distance
    }

    pub fn should_wrap(&self) -> bool {
        self.should_wrap
    }

    /// Last segment position recorded while pulling the hair in.
    pub fn hair_point(&self) -> Vec2 {
        self.hair_point
    }

    pub fn idle_scale(&self) -> f32 {
        self.idle_scale
    }

    /// Position of the tip-most latched segment.
    pub fn wrap_point(&self) -> Option<Vec2> {
        self.segments
            .iter()
            .rfind(|segment| segment.is_frozen())
            .map(|segment| segment.position)
    }

    // ------------------------------------------------------------------
    // Neighbour queries
    // ------------------------------------------------------------------

    /// Neighbour toward the root. Returns `id` itself at the root.
    pub fn next_rootward(&self, id: usize) -> usize {
        debug_assert!(id < self.segments.len());
        id.saturating_sub(1)
    }

    /// Neighbour toward the tip. Returns `id` itself at the tip.
    pub fn next_tipward(&self, id: usize) -> usize {
        debug_assert!(id < self.segments.len());
        (id + 1).min(self.tip())
    }

    /// Nearest segment to `point` that has not latched.
    pub fn closest_usable_segment(&self, point: Vec2) -> Option<usize> {
        let scan = self.tuning.closest_scan;
        let mut closest = None;
        let mut closest_distance = f32::INFINITY;

        for segment in &self.segments {
            if segment.is_frozen() {
                continue;
            }

            if let Some(margin) = scan.below_margin {
                if segment.position.y < point.y - margin {
                    break;
                }
            }

            let distance = segment.position.distance(point);
            if distance < closest_distance {
                closest_distance = distance;
                closest = Some(segment.id);
                if distance <= scan.epsilon {
                    break;
                }
            }
        }

        closest
    }

    // ------------------------------------------------------------------
    // Mass
    // ------------------------------------------------------------------

    /// Loads every segment tipward of `from` with `base_mass` plus one
    /// increment per hop.
    pub fn propagate_mass_after(&mut self, from: usize, base_mass: f32) {
        let mut mass = base_mass;
        let mut current = from;
        loop {
            let next = self.next_tipward(current);
            if next == current {
                break;
            }
            mass += self.tuning.hop_mass_increment;
            self.segments[next].mass = mass.max(0.0);
            current = next;
        }
    }

    /// Puts every segment rootward of `from` on the slack mass.
    pub fn propagate_mass_before(&mut self, from: usize) {
        let slack = self.tuning.slack_mass.max(0.0);
        let mut current = from;
        loop {
            let next = self.next_rootward(current);
            if next == current {
                break;
            }
            self.segments[next].mass = slack;
            current = next;
        }
    }

    /// Sags the chain around the segment the player is holding.
    pub fn player_holding_part(&mut self, id: usize, player_mass: f32) {
        self.propagate_mass_after(id, player_mass);
        self.propagate_mass_before(id);
    }

    pub fn reset_masses(&mut self) {
        for segment in &mut self.segments {
            segment.mass = segment.profile_mass;
        }
    }

    // ------------------------------------------------------------------
    // Wrap intent and contacts
    // ------------------------------------------------------------------

    /// Enabling waits `wrap_intent_delay`; disabling is immediate.
    pub fn request_wrap(&mut self, value: bool) {
        if value {
            if !self.should_wrap && self.pending_wrap.is_none() {
                self.pending_wrap = Some(self.tuning.wrap_intent_delay);
            }
        } else {
            self.pending_wrap = None;
            self.should_wrap = false;
        }
    }

    pub fn tick_wrap_intent(&mut self, dt: f32) {
        let Some(remaining) = self.pending_wrap.as_mut() else {
            return;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.pending_wrap = None;
            self.should_wrap = true;
            debug!("Hair wrap intent enabled");
        }
    }

    /// Stiffens up to `neighbor_span` segments root-ward of `id`.
    pub fn activate_neighbors(&mut self, id: usize) {
        self.set_neighbors_activated(id, true);
    }

    pub fn deactivate_neighbors(&mut self, id: usize) {
        self.set_neighbors_activated(id, false);
    }

    fn set_neighbors_activated(&mut self, id: usize, value: bool) {
        for neighbor in (0..id).rev().take(self.tuning.neighbor_span) {
            self.segments[neighbor].activated_by_neighbor = value;
        }
    }

    fn apply_neighbor_request(&mut self, request: NeighborRequest) {
        match request {
            NeighborRequest::Activate(id) => self.activate_neighbors(id),
            NeighborRequest::Deactivate(id) => self.deactivate_neighbors(id),
        }
    }

    /// Contacts are counted in every phase so a segment touching a surface
    /// before the chain settles still holds once wrapping is allowed.
    pub fn segment_contact_started(&mut self, id: usize, now: f32) {
        let should_wrap = self.has_shot_hair && self.should_wrap;
        if let Some(request) = self.segments[id].contact_started(now, should_wrap) {
            self.apply_neighbor_request(request);
        }
    }

    pub fn segment_contact_ended(&mut self, id: usize, now: f32) {
        self.segments[id].contact_ended(now);
    }

    /// Per physics step segment update.
    pub fn tick_segments(&mut self, now: f32) {
        if !self.has_shot_hair {
            for segment in &mut self.segments {
                segment.stow();
            }
            return;
        }

        for id in 0..self.segments.len() {
            let request = self.segments[id].tick(now, self.should_wrap, &self.tuning);
            if let Some(request) = request {
                self.apply_neighbor_request(request);
            }
        }
    }

    // ------------------------------------------------------------------
    // Wrap and stretch evaluation
    // ------------------------------------------------------------------

    /// Freezes every segment root-ward of `id`.
    pub fn freeze_rootward_of(&mut self, id: usize) {
        let mut current = id;
        loop {
            let next = self.next_rootward(current);
            if next == current {
                break;
            }
            self.segments[next].constraint = WrapConstraint::FullyFrozen;
            current = next;
        }
    }

    /// Throttled wrap and stretch detection. Returns only the changes; a
    /// stretched chain reports again whenever its stretch distance moves.
    pub fn evaluate_wrap_and_stretch(&mut self, dt: f32) -> Vec<ChainNotification> {
        let mut notifications = Vec::new();

        // Pulling the hair in lets go of whatever it wrapped.
        if !self.has_shot_hair || self.is_pulling {
            self.since_wrap_check = 0.0;
            self.set_wrapped(false, &mut notifications);
            self.set_stretch(false, 0.0, &mut notifications);
            return notifications;
        }

        self.since_wrap_check += dt;
        if self.since_wrap_check < self.tuning.wrap_check_interval {
            return notifications;
        }
        self.since_wrap_check = 0.0;

        let tip_most_frozen = self.segments.iter().rposition(HairSegment::is_frozen);
        if let Some(id) = tip_most_frozen {
            self.freeze_rootward_of(id);
        }
        self.set_wrapped(tip_most_frozen.is_some(), &mut notifications);

        let (stretched, distance) = match tip_most_frozen {
            Some(id) if self.should_wrap => {
                let distance = self.max_link_distance_after(id);
                if distance > self.tuning.stretch_threshold {
                    (true, distance)
                } else {
                    (false, 0.0)
                }
            }
            _ => (false, 0.0),
        };
        self.set_stretch(stretched, distance, &mut notifications);

        notifications
    }

    fn max_link_distance_after(&self, wrapped_id: usize) -> f32 {
        self.segments[wrapped_id + 1..]
            .windows(2)
            .filter(|pair| !pair[0].is_frozen() && !pair[1].is_frozen())
            .map(|pair| pair[0].position.distance(pair[1].position))
            .fold(0.0, f32::max)
    }

    fn set_wrapped(&mut self, wrapped: bool, out: &mut Vec<ChainNotification>) {
        if self.wrapped != wrapped {
            self.wrapped = wrapped;
            info!("Hair wrapped: {}", wrapped);
            out.push(ChainNotification::WrapChanged { wrapped });
        }
    }

    /// Reports flag flips, and distance changes while stretched.
    fn set_stretch(&mut self, stretched: bool, distance: f32, out: &mut Vec<ChainNotification>) {
        let changed = self.stretched != stretched
            || (stretched && (self.stretch_distance - distance).abs() > f32::EPSILON);
        if changed {
            self.stretched = stretched;
            self.stretch_distance = distance;
            out.push(ChainNotification::StretchChanged {
                stretched,
                distance,
            });
        }
    }

    // ------------------------------------------------------------------
    // Link solving
    // ------------------------------------------------------------------

    /// Position corrections keeping active neighbours `segment_length`
    /// apart. Heavier segments move less; frozen segments do not move.
    pub fn link_corrections(&self) -> Vec<Vec2> {
        let rest = self.tuning.segment_length;
        let mut positions: Vec<Vec2> = self.segments.iter().map(|s| s.position).collect();
        let inverse_mass: Vec<f32> = self
            .segments
            .iter()
            .map(|s| {
                if s.is_frozen() || !s.is_active() || s.mass <= 0.0 {
                    0.0
                } else {
                    1.0 / s.mass
                }
            })
            .collect();

        for _ in 0..self.tuning.link_iterations {
            for i in 0..positions.len() - 1 {
                if !self.segments[i].is_active() || !self.segments[i + 1].is_active() {
                    continue;
                }
                let w = inverse_mass[i] + inverse_mass[i + 1];
                if w <= 0.0 {
                    continue;
                }
                let delta = positions[i + 1] - positions[i];
                let length = delta.length();
                if length <= 1e-4 {
                    continue;
                }
                let correction = delta * ((length - rest) / length);
                positions[i] += correction * (inverse_mass[i] / w);
                positions[i + 1] -= correction * (inverse_mass[i + 1] / w);
            }
        }

        positions
            .iter()
            .zip(&self.segments)
            .map(|(solved, segment)| *solved - segment.position)
            .collect()
    }

    // ------------------------------------------------------------------
    // Geometry mirrors and deployment hooks
    // ------------------------------------------------------------------

    pub fn set_segment_position(&mut self, id: usize, position: Vec2) {
        self.segments[id].position = position;
    }

    pub(crate) fn set_deployed(&mut self, deployed: bool) {
        self.has_shot_hair = deployed;
    }

    pub(crate) fn set_pulling(&mut self, pulling: bool) {
        self.is_pulling = pulling;
    }

    pub(crate) fn set_hair_point(&mut self, point: Vec2) {
        self.hair_point = point;
    }

    pub(crate) fn collapse_idle(&mut self) {
        self.idle_scale = 0.0;
    }

    pub(crate) fn restore_idle(&mut self) {
        self.idle_scale = self.tuning.idle_scale;
    }
}
