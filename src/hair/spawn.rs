//! Hair domain: spawning the chain bodies and the idle hair.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::hair::{HairChain, HairSegmentBody, HairTuning, IdleHair};
use crate::movement::{GameLayer, Player};

const HAIR_COLOR: Color = Color::srgb(0.55, 0.3, 0.75);

/// Spawns one stowed body per segment and binds them into the `HairChain`
/// resource. A chain that cannot be built is fatal.
pub(crate) fn spawn_hair_chain(
    mut commands: Commands,
    tuning: Res<HairTuning>,
    player: Query<(Entity, &Transform), With<Player>>,
) {
    let (player, player_transform) = match player.single() {
        Ok(found) => found,
        Err(e) => {
            error!("Hair chain needs exactly one player: {}", e);
            panic!("hair chain spawned without a player: {e}");
        }
    };

    let layers = CollisionLayers::new(
        GameLayer::Hair,
        [GameLayer::Ground, GameLayer::Wall, GameLayer::GrabSurface],
    );
    let origin = player_transform.translation.truncate();
    let diameter = tuning.segment_radius * 2.0;

    let entities: Vec<Entity> = (0..tuning.segment_count)
        .map(|id| {
            commands
                .spawn((
                    Name::new(format!("Hair Segment {id}")),
                    HairSegmentBody { id },
                    Sprite {
                        color: HAIR_COLOR,
                        custom_size: Some(Vec2::new(tuning.segment_length, diameter)),
                        ..default()
                    },
                    Transform::from_translation(origin.extend(0.5))
                        .with_scale(Vec3::splat(tuning.stowed_scale)),
                    (
                        RigidBody::Dynamic,
                        Collider::circle(tuning.segment_radius),
                        Mass(tuning.mass_profile.mass_for(id)),
                        LockedAxes::new(),
                        Friction::new(tuning.slippery_friction),
                        CollisionEventsEnabled,
                        layers,
                        RigidBodyDisabled,
                        ColliderDisabled,
                    ),
                ))
                .id()
        })
        .collect();

    let chain = match HairChain::new(entities, tuning.clone()) {
        Ok(chain) => chain,
        Err(e) => {
            error!("Failed to build hair chain: {}", e);
            panic!("invalid hair chain: {e}");
        }
    };

    commands.spawn((
        Name::new("Idle Hair"),
        IdleHair,
        Sprite {
            color: HAIR_COLOR,
            custom_size: Some(Vec2::new(diameter * 2.0, tuning.segment_length * 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.35, 0.1).with_scale(Vec3::splat(chain.idle_scale())),
        ChildOf(player),
    ));

    info!(
        "Spawned hair chain: {} segments, reach {:.2}",
        chain.len(),
        tuning.reach()
    );
    commands.insert_resource(chain);
}
