//! Hair domain: keeping the chain model and the segment bodies in step.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::hair::{
    HairAnchorJoint, HairChain, HairSegmentBody, IdleHair, SurfaceProfile, WrapConstraint,
};
use crate::movement::Player;

/// Mirrors body poses into the chain before it is ticked.
pub(crate) fn capture_segment_positions(
    mut chain: ResMut<HairChain>,
    bodies: Query<(&HairSegmentBody, &Position, &Rotation)>,
) {
    for (body, position, rotation) in &bodies {
        chain.set_segment_position(body.id, position.0);
        chain.segment_mut(body.id).rotation = rotation.as_radians();
    }
}

pub(crate) fn tick_segments(time: Res<Time>, mut chain: ResMut<HairChain>) {
    chain.tick_segments(time.elapsed_secs());
}

/// Pulls neighbouring deployed segments back to their rest spacing.
pub(crate) fn solve_segment_links(
    mut chain: ResMut<HairChain>,
    mut bodies: Query<(&HairSegmentBody, &mut Position)>,
) {
    if !chain.is_deployed() {
        return;
    }

    let corrections = chain.link_corrections();
    for (body, mut position) in &mut bodies {
        let correction = corrections[body.id];
        if correction != Vec2::ZERO {
            position.0 += correction;
            chain.set_segment_position(body.id, position.0);
        }
    }
}

/// Applies segment state to the rigid bodies: one-shot poses and
/// velocities, mass, constraint, friction, scale and enablement.
pub(crate) fn sync_segment_bodies(
    mut commands: Commands,
    mut chain: ResMut<HairChain>,
    mut bodies: Query<(
        Entity,
        &HairSegmentBody,
        &mut Transform,
        &mut Sprite,
        (&mut Position, &mut Rotation, &mut LinearVelocity),
        (&mut Mass, &mut LockedAxes, &mut Friction),
        Has<RigidBodyDisabled>,
    )>,
) {
    let sticky = chain.tuning().sticky_friction;
    let slippery = chain.tuning().slippery_friction;

    for (
        entity,
        body,
        mut transform,
        mut sprite,
        (mut position, mut rotation, mut velocity),
        (mut mass, mut locked_axes, mut friction),
        disabled,
    ) in &mut bodies
    {
        let segment = chain.segment_mut(body.id);

        if let Some((point, angle)) = segment.pending_pose.take() {
            position.0 = point;
            *rotation = Rotation::radians(angle);
            transform.translation = point.extend(transform.translation.z);
            transform.rotation = Quat::from_rotation_z(angle);
        }
        if let Some(pending) = segment.pending_velocity.take() {
            velocity.0 = pending;
        }

        if mass.0 != segment.mass {
            mass.0 = segment.mass;
        }

        *locked_axes = match segment.constraint {
            WrapConstraint::Free => LockedAxes::new(),
            WrapConstraint::RotationLocked => LockedAxes::ROTATION_LOCKED,
            WrapConstraint::FullyFrozen => {
                velocity.0 = Vec2::ZERO;
                LockedAxes::ALL_LOCKED
            }
        };

        let coefficient = match segment.surface {
            SurfaceProfile::Sticky => sticky,
            SurfaceProfile::Slippery => slippery,
        };
        if friction.dynamic_coefficient != coefficient {
            *friction = Friction::new(coefficient);
        }

        sprite.flip_x = !segment.facing_right;

        let scale = Vec3::splat(segment.scale);
        if transform.scale != scale {
            transform.scale = scale;
            // A changed transform is copied back into the body; keep it current.
            transform.translation = position.0.extend(transform.translation.z);
        }

        match (segment.is_active(), disabled) {
            (true, true) => {
                commands
                    .entity(entity)
                    .remove::<(RigidBodyDisabled, ColliderDisabled)>();
            }
            (false, false) => {
                velocity.0 = Vec2::ZERO;
                commands
                    .entity(entity)
                    .insert((RigidBodyDisabled, ColliderDisabled));
            }
            _ => {}
        }
    }
}

/// Pins the chain root to the player while the hair is out and not wrapped.
pub(crate) fn sync_anchor_joint(
    mut commands: Commands,
    chain: Res<HairChain>,
    player: Query<Entity, With<Player>>,
    anchors: Query<Entity, With<HairAnchorJoint>>,
) {
    let wanted = chain.is_deployed() && !chain.is_wrapped();

    if !wanted {
        for anchor in &anchors {
            commands.entity(anchor).despawn();
        }
        return;
    }

    if !anchors.is_empty() {
        return;
    }
    let Ok(player) = player.single() else {
        return;
    };
    let root = chain.segment(0).entity;
    commands.spawn((HairAnchorJoint, FixedJoint::new(player, root)));
    debug!("Hair anchored to player");
}

pub(crate) fn sync_idle_hair(
    chain: Res<HairChain>,
    mut idle: Query<&mut Transform, With<IdleHair>>,
) {
    let scale = Vec3::splat(chain.idle_scale());
    for mut transform in &mut idle {
        if transform.scale != scale {
            transform.scale = scale;
        }
    }
}
