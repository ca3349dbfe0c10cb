//! Hair domain: grab-surface contact tracking.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::hair::{GrabSurface, HairChain, HairSegmentBody};

/// Segment id of a collision pair where one side is a hair segment and the
/// other a grab surface.
fn segment_on_surface(
    a: Entity,
    b: Entity,
    segments: &Query<&HairSegmentBody>,
    surfaces: &Query<(), With<GrabSurface>>,
) -> Option<usize> {
    match (segments.get(a), segments.get(b)) {
        (Ok(segment), _) if surfaces.contains(b) => Some(segment.id),
        (_, Ok(segment)) if surfaces.contains(a) => Some(segment.id),
        _ => None,
    }
}

/// Forwards collision start/end between segments and grab surfaces to the
/// chain, stamped with the physics clock the segment tick runs on.
pub(crate) fn track_segment_contacts(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    fixed_time: Res<Time<Fixed>>,
    mut chain: ResMut<HairChain>,
    segments: Query<&HairSegmentBody>,
    surfaces: Query<(), With<GrabSurface>>,
) {
    let now = fixed_time.elapsed_secs();

    for event in started.read() {
        if let Some(id) = segment_on_surface(event.collider1, event.collider2, &segments, &surfaces)
        {
            trace!("Hair segment {} touched a grab surface", id);
            chain.segment_contact_started(id, now);
        }
    }

    for event in ended.read() {
        if let Some(id) = segment_on_surface(event.collider1, event.collider2, &segments, &surfaces)
        {
            trace!("Hair segment {} left a grab surface", id);
            chain.segment_contact_ended(id, now);
        }
    }
}
