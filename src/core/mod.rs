//! Core domain: camera setup and the system sets that order every tick.

mod systems;

use bevy::prelude::*;

use crate::core::systems::setup_camera;

/// Startup spawning order: level geometry, then the player, then the hair
/// chain bound to the player.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpawnSet {
    Level,
    Player,
    Hair,
}

/// Per-frame (`Update`) ordering.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Sample keyboard and mouse into `MovementInput`.
    Input,
    /// Turn input into shoot/retract/grab/jump requests.
    Intent,
    /// Advance the deployment sequence and evaluate wrap/stretch.
    Chain,
    /// Consume chain notifications and resolve the movement mode.
    Locomotion,
    /// Animation flags and debug output.
    Presentation,
}

/// Physics-step (`FixedUpdate`) ordering. Runs before avian's step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    /// Segment ticks, link solving and body sync.
    Segments,
    /// Ground, grab and safe-edge sensors.
    Sensors,
    /// Gravity and horizontal movement.
    Forces,
    Jump,
    /// Player-to-hair coupling.
    Attachment,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Startup,
            (SpawnSet::Level, SpawnSet::Player, SpawnSet::Hair).chain(),
        )
        .configure_sets(
            Update,
            (
                FrameSet::Input,
                FrameSet::Intent,
                FrameSet::Chain,
                FrameSet::Locomotion,
                FrameSet::Presentation,
            )
                .chain(),
        )
        .configure_sets(
            FixedUpdate,
            (
                PhysicsSet::Segments,
                PhysicsSet::Sensors,
                PhysicsSet::Forces,
                PhysicsSet::Jump,
                PhysicsSet::Attachment,
            )
                .chain(),
        )
        .add_systems(Startup, setup_camera);
    }
}
