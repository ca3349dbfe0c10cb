//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::Serialize;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Hair chain segments
    Hair,
    /// Surfaces the hair can latch onto
    GrabSurface,
    /// Sensors (triggers) - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn is_right(self) -> bool {
        self == Facing::Right
    }
}

/// How the player relates to the hair chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MovementMode {
    #[default]
    Normal,
    /// Holding onto a wrapped chain: climbing or swinging.
    OnHair,
    /// Reserved. Representable but never entered automatically.
    OnWall,
    /// The chain is wrapped and the player dangles from its tip.
    HairWrapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GroundedState {
    Grounded,
    /// Off the ground but still inside the coyote window.
    Coyote,
    #[default]
    Falling,
}

impl GroundedState {
    /// Grounded or coyote.
    pub fn can_jump(self) -> bool {
        matches!(self, GroundedState::Grounded | GroundedState::Coyote)
    }
}

#[derive(Component, Debug, Clone)]
pub struct MovementState {
    pub facing: Facing,
    pub mode: MovementMode,
    pub grounded: GroundedState,
    /// Physics time of the last tick the ground sensor overlapped ground.
    /// Cleared by a jump so the coyote window cannot be reused.
    pub last_grounded_at: Option<f32>,
    /// A jump force was applied and the player has not started descending.
    pub jumped: bool,
    /// Start of the current jump boost window.
    pub jump_started_at: Option<f32>,
    pub jump_released: bool,
    /// Time of a jump press that could not be honoured yet.
    pub jump_buffered_at: Option<f32>,
    /// Grab flag: the player chose to hold the wrapped chain.
    pub on_hair: bool,
    /// One safe-edge snap per fall.
    pub safe_edge_armed: bool,
    // Cached chain notifications.
    pub hair_wrapped: bool,
    pub hair_stretching: bool,
    pub hair_stretch_distance: f32,
    pub gravity_scale: f32,
    pub mass: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            facing: Facing::Right,
            mode: MovementMode::Normal,
            grounded: GroundedState::Falling,
            last_grounded_at: None,
            jumped: false,
            jump_started_at: None,
            jump_released: false,
            jump_buffered_at: None,
            on_hair: false,
            safe_edge_armed: true,
            hair_wrapped: false,
            hair_stretching: false,
            hair_stretch_distance: 0.0,
            gravity_scale: 1.0,
            mass: 1.0,
        }
    }
}

/// Boolean triggers consumed by the animation layer.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnimatorParams {
    pub moving: bool,
    pub jump: bool,
    pub grounded: bool,
    pub throwing: bool,
    pub pulling: bool,
    pub hair_out: bool,
}

/// Seconds left on the throw animation flag after a shoot press.
#[derive(Component, Debug, Default)]
pub struct ThrowTimer(pub f32);

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;
