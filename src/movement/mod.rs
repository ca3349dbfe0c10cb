//! Movement domain: player locomotion and coupling to the hair chain.

mod attachment;
mod bootstrap;
mod components;
mod dev;
mod locomotion;
mod resources;
mod systems;

pub use attachment::{Coupling, GripContext, GripStep, HairGrip, HairGripJoint};
pub use components::{
    AnimatorParams, Facing, GameLayer, Ground, GroundedState, MovementMode, MovementState, Player,
    ThrowTimer, Wall,
};
pub use locomotion::JumpPress;
pub use resources::{MovementInput, MovementTuning, TileGrid, WrappedGravity};

use bevy::prelude::*;

use crate::core::{FrameSet, PhysicsSet, SpawnSet};
use crate::movement::bootstrap::spawn_player;
use crate::movement::dev::spawn_test_room;
use crate::movement::systems::{
    apply_attachment, apply_gravity, apply_hair_notifications, apply_horizontal_movement,
    apply_jump, apply_safe_edge, detect_ground, grab_hair, handle_hair_input, handle_jump_input,
    read_input, sync_grip_joint, update_animator, update_locomotion_mode,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<TileGrid>()
            .add_systems(
                Startup,
                (
                    spawn_test_room.in_set(SpawnSet::Level),
                    spawn_player.in_set(SpawnSet::Player),
                ),
            )
            .add_systems(Update, read_input.in_set(FrameSet::Input))
            .add_systems(
                Update,
                (handle_jump_input, handle_hair_input, grab_hair)
                    .chain()
                    .in_set(FrameSet::Intent),
            )
            .add_systems(
                Update,
                (apply_hair_notifications, update_locomotion_mode)
                    .chain()
                    .in_set(FrameSet::Locomotion),
            )
            .add_systems(Update, update_animator.in_set(FrameSet::Presentation))
            .add_systems(
                FixedUpdate,
                (detect_ground, apply_safe_edge)
                    .chain()
                    .in_set(PhysicsSet::Sensors),
            )
            .add_systems(
                FixedUpdate,
                (apply_gravity, apply_horizontal_movement)
                    .chain()
                    .in_set(PhysicsSet::Forces),
            )
            .add_systems(FixedUpdate, apply_jump.in_set(PhysicsSet::Jump))
            .add_systems(
                FixedUpdate,
                (apply_attachment, sync_grip_joint)
                    .chain()
                    .in_set(PhysicsSet::Attachment),
            );
    }
}
