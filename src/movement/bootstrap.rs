//! Movement domain: player spawn from the loaded tuning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    AnimatorParams, GameLayer, HairGrip, MovementState, MovementTuning, Player, ThrowTimer,
};

const PLAYER_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);

pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<MovementTuning>) {
    let size = Vec2::from(tuning.body_size);

    info!(
        "Spawning player: size={:?}, mass={}, boost jump height={:.2}",
        size,
        tuning.base_mass,
        tuning.boost_jump_height()
    );

    commands.spawn((
        Name::new("Player"),
        // Identity & Movement
        (
            Player,
            MovementState {
                gravity_scale: tuning.base_gravity_scale,
                mass: tuning.base_mass,
                ..default()
            },
            AnimatorParams::default(),
            ThrowTimer::default(),
            HairGrip::default(),
        ),
        // Rendering
        Sprite {
            color: PLAYER_COLOR,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(0.0, 1.0, 1.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            Mass(tuning.base_mass),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // We handle gravity manually for more control
            Friction::new(0.0),
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::GrabSurface,
                    GameLayer::Sensor,
                ],
            ),
        ),
    ));
}
