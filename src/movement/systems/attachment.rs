//! Movement domain: applying the hair grip to the player body.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::hair::HairChain;
use crate::movement::{
    GripContext, GroundedState, HairGrip, HairGripJoint, MovementInput, MovementState,
    MovementTuning, Player,
};

pub(crate) fn apply_attachment(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut chain: ResMut<HairChain>,
    mut query: Query<
        (
            &Position,
            &mut LinearVelocity,
            &mut Mass,
            &mut MovementState,
            &mut HairGrip,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (position, mut velocity, mut mass, mut state, mut grip) in &mut query {
        let ctx = GripContext {
            mode: state.mode,
            axis: input.axis,
            player_position: position.0,
            player_mass: state.mass,
            falling: state.grounded == GroundedState::Falling && velocity.y < 0.0,
            dt,
        };
        let step = grip.update(&ctx, &mut chain, &tuning);

        if let Some(player_mass) = step.player_mass {
            state.mass = player_mass;
            if mass.0 != player_mass {
                mass.0 = player_mass;
            }
        }
        if let Some(climb) = step.climb_velocity {
            velocity.0 = climb;
        }
        if let Some(target) = step.lateral_target {
            let blend = (tuning.swing_accel * dt).clamp(0.0, 1.0);
            velocity.x += (target - velocity.x) * blend;
        }
        if step.drop_grab {
            state.on_hair = false;
        }
        if step.promote_to_hair && !state.on_hair {
            info!("Falling while wrapped: grabbing the hair");
            state.on_hair = true;
        }
    }
}

/// Keeps one fixed joint between the player and the segment the grip
/// couples to.
pub(crate) fn sync_grip_joint(
    mut commands: Commands,
    chain: Res<HairChain>,
    mut query: Query<(Entity, &mut HairGrip), With<Player>>,
) {
    for (player, mut grip) in &mut query {
        let wanted = grip.coupling.joint_target();
        let current = grip.joint.map(|(_, id)| id);
        if wanted == current {
            continue;
        }

        if let Some((joint, _)) = grip.joint.take() {
            commands.entity(joint).despawn();
        }
        if let Some(id) = wanted {
            let segment = chain.segment(id).entity;
            let joint = commands
                .spawn((HairGripJoint, FixedJoint::new(player, segment)))
                .id();
            grip.joint = Some((joint, id));
            debug!("Player coupled to hair segment {}", id);
        }
    }
}
