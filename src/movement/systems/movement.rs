//! Movement domain: locomotion systems for input intents and physics.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::hair::{
    DeploymentPhase, DeploymentSequencer, HairChain, HairStretchChanged, HairWrapChanged,
};
use crate::movement::systems::collisions::grab_sensor_over_hair;
use crate::movement::{
    AnimatorParams, JumpPress, MovementInput, MovementMode, MovementState, MovementTuning, Player,
    ThrowTimer,
};

// ============================================================================
// Frame tick
// ============================================================================

pub(crate) fn handle_jump_input(
    input: Res<MovementInput>,
    fixed_time: Res<Time<Fixed>>,
    chain: Res<HairChain>,
    mut query: Query<&mut MovementState, With<Player>>,
) {
    let now = fixed_time.elapsed_secs();

    for mut state in &mut query {
        if input.jump_just_pressed {
            let press = state.press_jump(now, chain.is_pulling());
            if press == JumpPress::Ignored {
                trace!("Jump ignored while pulling hair");
            }
        }
        if input.jump_just_released {
            state.release_jump();
        }
    }
}

/// Shoot press: throws the hair if stowed, otherwise pulls it back.
pub(crate) fn handle_hair_input(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    chain: Res<HairChain>,
    mut sequencer: ResMut<DeploymentSequencer>,
    mut query: Query<
        (&Transform, &mut MovementState, &mut AnimatorParams, &mut ThrowTimer),
        With<Player>,
    >,
) {
    if !input.shoot_just_pressed {
        return;
    }

    for (transform, mut state, mut animator, mut throw_timer) in &mut query {
        let position = transform.translation.truncate();

        if sequencer.phase() == DeploymentPhase::Stowed {
            let aim = input
                .aim
                .unwrap_or(position + Vec2::X * state.facing.sign());
            state.face_toward(aim.x - position.x);

            match sequencer.request_shoot(&chain, aim, state.facing.is_right()) {
                Ok(()) => {
                    animator.throwing = true;
                    throw_timer.0 = tuning.throw_anim_time;
                }
                Err(e) => debug!("Hair shoot ignored: {}", e),
            }
        } else if let Err(e) = sequencer.request_retract() {
            debug!("Hair retract ignored: {}", e);
        }
    }
}

pub(crate) fn grab_hair(
    input: Res<MovementInput>,
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &mut MovementState), With<Player>>,
) {
    if !input.grab_just_pressed {
        return;
    }

    for (transform, mut state) in &mut query {
        let over_hair =
            grab_sensor_over_hair(&spatial_query, transform.translation.truncate(), &tuning);
        if state.try_grab_hair(over_hair) {
            info!("Grabbed the hair");
        }
    }
}

/// Caches the chain's wrap and stretch notifications on the player.
pub(crate) fn apply_hair_notifications(
    mut wrap_events: MessageReader<HairWrapChanged>,
    mut stretch_events: MessageReader<HairStretchChanged>,
    mut query: Query<&mut MovementState, With<Player>>,
) {
    for mut state in &mut query {
        for event in wrap_events.read() {
            state.hair_wrapped = event.wrapped;
        }
        for event in stretch_events.read() {
            state.hair_stretching = event.stretched;
            state.hair_stretch_distance = event.distance;
        }
    }
}

pub(crate) fn update_locomotion_mode(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    chain: Res<HairChain>,
    mut query: Query<(&Transform, &LinearVelocity, &mut MovementState), With<Player>>,
) {
    for (transform, velocity, mut state) in &mut query {
        state.clear_jump_on_descent(velocity.y, &tuning);

        let previous = state.mode;
        let mode = state.resolve_mode();
        if mode != previous {
            info!("Movement mode: {:?} -> {:?}", previous, mode);
        }

        let toward_hair = chain
            .is_pulling()
            .then(|| chain.hair_point() - transform.translation.truncate());
        state.update_facing(input.axis.x, toward_hair);
    }
}

pub(crate) fn update_animator(
    time: Res<Time>,
    input: Res<MovementInput>,
    chain: Res<HairChain>,
    mut query: Query<
        (&MovementState, &mut AnimatorParams, &mut ThrowTimer, &mut Sprite),
        With<Player>,
    >,
) {
    for (state, mut animator, mut throw_timer, mut sprite) in &mut query {
        if throw_timer.0 > 0.0 {
            throw_timer.0 -= time.delta_secs();
        }

        let params = AnimatorParams {
            moving: input.axis.x != 0.0 && !chain.is_pulling(),
            jump: state.jumped,
            grounded: state.grounded.can_jump(),
            throwing: throw_timer.0 > 0.0,
            pulling: chain.is_pulling(),
            hair_out: chain.is_deployed(),
        };
        if *animator != params {
            *animator = params;
        }

        sprite.flip_x = !state.facing.is_right();
    }
}

// ============================================================================
// Physics tick
// ============================================================================

pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut MovementState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut state, mut velocity) in &mut query {
        let scale = state.shape_gravity(velocity.y, dt, &tuning);
        velocity.y -= tuning.gravity * scale * dt;
    }
}

pub(crate) fn apply_horizontal_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    chain: Res<HairChain>,
    mut query: Query<(&Position, &MovementState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (position, state, mut velocity) in &mut query {
        // Swinging is driven by the attachment.
        if state.mode == MovementMode::OnHair {
            continue;
        }

        let hair = chain.wrap_point().unwrap_or(chain.hair_point());
        velocity.x = state.horizontal_velocity(
            velocity.x,
            input.axis.x,
            hair - position.0,
            chain.is_pulling(),
            dt,
            &tuning,
        );
    }
}

pub(crate) fn apply_jump(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut MovementState, &mut LinearVelocity), With<Player>>,
) {
    let now = time.elapsed_secs();

    for (mut state, mut velocity) in &mut query {
        if let Some(vertical) = state.jump_velocity(now, &tuning) {
            velocity.y = vertical;
        }
    }
}
