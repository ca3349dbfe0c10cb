//! Movement domain: the locomotion state machine.
//!
//! Pure state transitions on `MovementState`. The systems in `systems/` feed
//! these with sensor results, input edges and body velocities, then write
//! the results back to the physics body.

use bevy::prelude::*;

use crate::movement::{
    Facing, GroundedState, MovementMode, MovementState, MovementTuning, TileGrid, WrappedGravity,
};

/// What a jump press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPress {
    /// Boost window armed.
    Armed,
    /// Not jumpable right now; queued for landing.
    Buffered,
    /// Ignored while the hair is being pulled in.
    Ignored,
}

impl MovementState {
    /// Classifies grounding from the ground sensor. Called every physics tick.
    pub fn update_grounding(
        &mut self,
        touching_ground: bool,
        now: f32,
        tuning: &MovementTuning,
    ) -> GroundedState {
        self.grounded = if touching_ground {
            self.last_grounded_at = Some(now);
            self.safe_edge_armed = true;
            GroundedState::Grounded
        } else if self
            .last_grounded_at
            .is_some_and(|at| now - at < tuning.coyote_time)
        {
            GroundedState::Coyote
        } else {
            GroundedState::Falling
        };
        self.grounded
    }

    fn can_jump(&self) -> bool {
        if self.jumped {
            return false;
        }
        self.grounded.can_jump() || matches!(self.mode, MovementMode::OnHair | MovementMode::OnWall)
    }

    pub fn press_jump(&mut self, now: f32, is_pulling: bool) -> JumpPress {
        if is_pulling {
            self.jump_started_at = None;
            return JumpPress::Ignored;
        }

        if !self.can_jump() {
            self.jump_buffered_at = Some(now);
            debug!("Jump buffered at {:.3}", now);
            return JumpPress::Buffered;
        }

        let released_hair = self.mode == MovementMode::OnHair || self.on_hair;
        self.jump_started_at = Some(now);
        self.jump_released = false;
        self.jump_buffered_at = None;
        self.mode = MovementMode::Normal;
        self.on_hair = false;
        if released_hair {
            debug!("Jumped off the hair");
        }
        JumpPress::Armed
    }

    /// Jump button released. Ends the boost window early; upward speed is
    /// left alone.
    pub fn release_jump(&mut self) {
        if self.jump_started_at.is_some() {
            self.jump_released = true;
        }
    }

    /// Once the body starts descending the jump is over.
    pub fn clear_jump_on_descent(&mut self, vertical_speed: f32, tuning: &MovementTuning) {
        if self.jumped
            && self.grounded != GroundedState::Grounded
            && vertical_speed <= -tuning.descent_threshold
        {
            self.jumped = false;
            self.jump_started_at = None;
        }
    }

    /// Per-frame mode transition.
    pub fn resolve_mode(&mut self) -> MovementMode {
        let in_flight = self.jumped || self.jump_started_at.is_some();
        if self.mode == MovementMode::OnWall && !in_flight {
            return self.mode;
        }

        self.mode = if in_flight {
            self.on_hair = false;
            MovementMode::Normal
        } else if self.hair_wrapped {
            if self.on_hair {
                MovementMode::OnHair
            } else {
                MovementMode::HairWrapped
            }
        } else {
            self.on_hair = false;
            MovementMode::Normal
        };
        self.mode
    }

    /// Facing follows horizontal input, or the last hair point while the
    /// hair is being pulled in.
    pub fn update_facing(&mut self, axis_x: f32, toward_hair: Option<Vec2>) {
        let x = match toward_hair {
            Some(direction) => direction.x,
            None => axis_x,
        };
        self.face_toward(x);
    }

    pub fn face_toward(&mut self, x: f32) {
        if x > 0.0 {
            self.facing = Facing::Right;
        } else if x < 0.0 {
            self.facing = Facing::Left;
        }
    }

    /// Returns the gravity scale for this physics tick.
    pub fn shape_gravity(&mut self, vertical_speed: f32, dt: f32, tuning: &MovementTuning) -> f32 {
        let base = tuning.base_gravity_scale;
        let locomotion = match self.grounded {
            GroundedState::Grounded => base,
            GroundedState::Coyote if !self.jumped => base + tuning.coyote_gravity_boost,
            GroundedState::Coyote => self.gravity_scale,
            GroundedState::Falling if vertical_speed < -tuning.fast_fall_threshold => {
                let floor = base + tuning.fall_gravity_floor_boost;
                let ceiling = tuning.fall_gravity_ceiling.max(floor);
                let current = self.gravity_scale.max(floor);
                let blend = 1.0 - (-tuning.fall_accel * dt).exp();
                (current + (ceiling - current) * blend).clamp(floor, ceiling)
            }
            GroundedState::Falling => base,
        };

        self.gravity_scale = match (self.mode, tuning.wrapped_gravity) {
            (MovementMode::OnWall, _) => 0.0,
            (MovementMode::OnHair | MovementMode::HairWrapped, WrappedGravity::Fixed(scale)) => {
                scale
            }
            _ => locomotion,
        };
        self.gravity_scale
    }

    /// Vertical speed to force this physics tick, if any.
    pub fn jump_velocity(&mut self, now: f32, tuning: &MovementTuning) -> Option<f32> {
        if let Some(at) = self.jump_buffered_at {
            if now - at >= tuning.jump_buffer_time {
                self.jump_buffered_at = None;
            } else if !self.jumped && self.grounded.can_jump() {
                self.jump_buffered_at = None;
                self.jump_started_at = None;
                self.start_jump();
                debug!("Buffered jump fired");
                return Some(tuning.jump_velocity + tuning.buffered_jump_bonus);
            }
        }

        let started = self.jump_started_at?;
        if self.jump_released || now - started >= tuning.max_jump_time {
            self.jump_started_at = None;
            return None;
        }
        self.start_jump();
        Some(tuning.jump_velocity)
    }

    fn start_jump(&mut self) {
        self.jumped = true;
        self.last_grounded_at = None;
        self.mode = MovementMode::Normal;
        self.on_hair = false;
    }

    /// Horizontal speed after one physics tick of input.
    pub fn horizontal_velocity(
        &self,
        current: f32,
        axis_x: f32,
        toward_hair: Vec2,
        is_pulling: bool,
        dt: f32,
        tuning: &MovementTuning,
    ) -> f32 {
        if is_pulling {
            return current;
        }

        let pushing_away = axis_x * toward_hair.x < 0.0;
        let target = if axis_x == 0.0 {
            0.0
        } else if self.hair_stretching && pushing_away && self.hair_stretch_distance > 0.0 {
            -axis_x * tuning.move_speed * (tuning.stretch_pull_factor / self.hair_stretch_distance)
        } else {
            axis_x * tuning.move_speed
        };

        let blend = (dt * tuning.move_accel).clamp(0.0, 1.0);
        current + (target - current) * blend
    }

    /// Grab-on-hair input. Honoured only while dangling from a wrapped chain
    /// with the grab sensor over a segment.
    pub fn try_grab_hair(&mut self, sensor_over_hair: bool) -> bool {
        if self.mode != MovementMode::HairWrapped || !sensor_over_hair {
            return false;
        }
        self.jumped = false;
        self.jump_started_at = None;
        self.on_hair = true;
        true
    }

    /// Ledge correction. `edge_hit` is the overlap of the small sensor at the
    /// leading lower corner with ground. Returns the new body centre height.
    pub fn safe_edge_snap(
        &mut self,
        center: Vec2,
        edge_hit: bool,
        grid: &TileGrid,
        tuning: &MovementTuning,
    ) -> Option<f32> {
        if self.grounded == GroundedState::Grounded && !self.jumped {
            return None;
        }
        if !edge_hit || !self.safe_edge_armed {
            return None;
        }

        let half = tuning.body_half_extents();
        let contact = Vec2::new(
            center.x + self.facing.sign() * (half.x + tuning.safe_edge_contact[0]),
            center.y - half.y + tuning.safe_edge_contact[1],
        );
        let cell = grid.world_to_cell(contact + Vec2::Y * tuning.safe_edge_lookup_lift);
        let tile_top = grid.cell_to_world(cell).y;

        if contact.y <= tile_top && contact.y >= tile_top - tuning.safe_edge_band {
            self.safe_edge_armed = false;
            debug!("Safe edge snap onto tile top {:.2}", tile_top);
            return Some(tile_top + half.y + tuning.safe_edge_clearance);
        }
        None
    }
}
