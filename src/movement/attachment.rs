//! Movement domain: coupling between the player body and the hair chain.

use bevy::prelude::*;
use serde::Serialize;

use crate::hair::HairChain;
use crate::movement::{MovementMode, MovementTuning, WrappedGravity};

/// How the player body is held by the chain this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum Coupling {
    #[default]
    None,
    /// Rigid joint to a segment.
    Fixed(usize),
    /// Moving target between two neighbouring segments. `progress` runs
    /// from 0 at `from` to 1 at `to`.
    Climbing { from: usize, to: usize, progress: f32 },
    /// Rigid joint to the tip.
    Terminal(usize),
}

impl Coupling {
    /// Segment a rigid joint should attach to.
    pub fn joint_target(&self) -> Option<usize> {
        match *self {
            Coupling::Fixed(id) | Coupling::Terminal(id) => Some(id),
            Coupling::None | Coupling::Climbing { .. } => None,
        }
    }
}

#[derive(Component, Debug, Default)]
pub struct HairGrip {
    pub coupling: Coupling,
    /// Segment the chain masses were propagated around.
    pub held: Option<usize>,
    /// Live joint entity and the segment it attaches to.
    pub joint: Option<(Entity, usize)>,
}

/// Marker on the joint entity linking the player to a segment.
#[derive(Component, Debug)]
pub struct HairGripJoint;

/// Inputs for one attachment tick.
#[derive(Debug, Clone, Copy)]
pub struct GripContext {
    pub mode: MovementMode,
    pub axis: Vec2,
    pub player_position: Vec2,
    pub player_mass: f32,
    /// Airborne and moving down.
    pub falling: bool,
    pub dt: f32,
}

/// Body commands produced by one attachment tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GripStep {
    pub player_mass: Option<f32>,
    /// Velocity driving the body toward the climb target.
    pub climb_velocity: Option<Vec2>,
    /// Horizontal speed to blend toward while swinging.
    pub lateral_target: Option<f32>,
    /// Left the usable chain or the hair is pulled in; clear the grab flag.
    pub drop_grab: bool,
    /// Falling while wrapped with auto-grab on; set the grab flag.
    pub promote_to_hair: bool,
}

impl HairGrip {
    pub fn update(
        &mut self,
        ctx: &GripContext,
        chain: &mut HairChain,
        tuning: &MovementTuning,
    ) -> GripStep {
        if chain.is_pulling() {
            return self.release_for_pull(ctx, chain, tuning);
        }

        match ctx.mode {
            MovementMode::Normal => {
                self.coupling = Coupling::None;
                self.held = None;
                if chain.is_deployed() {
                    chain.reset_masses();
                }
                GripStep {
                    player_mass: Some(tuning.base_mass),
                    ..default()
                }
            }
            MovementMode::OnWall => {
                self.coupling = Coupling::None;
                GripStep::default()
            }
            MovementMode::HairWrapped => self.dangle(ctx, chain, tuning),
            MovementMode::OnHair => self.swing_and_climb(ctx, chain, tuning),
        }
    }

    /// The chain is being reeled in, so there is nothing left to hang from.
    fn release_for_pull(
        &mut self,
        ctx: &GripContext,
        chain: &mut HairChain,
        tuning: &MovementTuning,
    ) -> GripStep {
        if self.coupling != Coupling::None {
            debug!("Released the hair while it is pulled in");
        }
        self.coupling = Coupling::None;
        if self.held.take().is_some() {
            chain.reset_masses();
        }
        GripStep {
            player_mass: Some(tuning.base_mass),
            drop_grab: ctx.mode == MovementMode::OnHair,
            ..default()
        }
    }

    fn dangle(&mut self, ctx: &GripContext, chain: &mut HairChain, tuning: &MovementTuning) -> GripStep {
        if self.held.take().is_some() {
            chain.reset_masses();
        }
        self.coupling = Coupling::Terminal(chain.tip());

        let player_mass = match tuning.wrapped_gravity {
            WrappedGravity::MassBleed { rate, floor } if ctx.falling => {
                (ctx.player_mass - rate * ctx.dt).max(floor)
            }
            _ => tuning.base_mass,
        };

        GripStep {
            player_mass: Some(player_mass),
            promote_to_hair: tuning.auto_grab_when_falling && ctx.falling,
            ..default()
        }
    }

    fn swing_and_climb(
        &mut self,
        ctx: &GripContext,
        chain: &mut HairChain,
        tuning: &MovementTuning,
    ) -> GripStep {
        let mut step = GripStep {
            player_mass: Some(tuning.swing_mass),
            ..default()
        };

        if self.held.is_none() {
            let Some(id) = chain.closest_usable_segment(ctx.player_position) else {
                return step;
            };
            self.hold(id, chain, tuning);
            self.coupling = Coupling::Fixed(id);
            debug!("Grabbed hair segment {}", id);
        }

        if ctx.axis.x != 0.0 {
            step.lateral_target = Some(ctx.axis.x * tuning.swing_speed);
        }

        if ctx.axis.y.abs() <= tuning.climb_deadzone {
            self.coupling = match self.coupling {
                Coupling::Climbing { from, to, progress } => {
                    Coupling::Fixed(if progress >= 0.5 { to } else { from })
                }
                Coupling::Terminal(id) | Coupling::Fixed(id) => Coupling::Fixed(id),
                Coupling::None => self.held.map_or(Coupling::None, Coupling::Fixed),
            };
            return step;
        }

        let up = ctx.axis.y > 0.0;
        let advance = tuning.climb_speed * ctx.dt;

        match self.coupling {
            Coupling::Climbing { from, to, progress } => {
                let heading_up = to < from;
                let (from, to, progress) = if heading_up == up {
                    (from, to, progress + advance)
                } else {
                    (to, from, 1.0 - progress + advance)
                };
                if progress >= 1.0 {
                    self.hold(to, chain, tuning);
                    self.start_climb(to, up, progress - 1.0, chain, &mut step, tuning);
                } else {
                    self.coupling = Coupling::Climbing { from, to, progress };
                }
            }
            Coupling::Fixed(id) | Coupling::Terminal(id) => {
                self.start_climb(id, up, advance, chain, &mut step, tuning);
            }
            Coupling::None => {}
        }

        if let Coupling::Climbing { from, to, progress } = self.coupling {
            let target = chain
                .segment(from)
                .position
                .lerp(chain.segment(to).position, progress.clamp(0.0, 1.0));
            step.climb_velocity = Some((target - ctx.player_position) * tuning.climb_stiffness);
        }

        step
    }

    fn start_climb(
        &mut self,
        id: usize,
        up: bool,
        progress: f32,
        chain: &mut HairChain,
        step: &mut GripStep,
        tuning: &MovementTuning,
    ) {
        let next = if up {
            chain.next_rootward(id)
        } else {
            chain.next_tipward(id)
        };

        // A latched rootward neighbour marks the root end of the usable chain.
        let at_root = up && (next == id || chain.segment(next).is_frozen());

        if at_root {
            self.coupling = Coupling::None;
            self.held = None;
            chain.reset_masses();
            step.drop_grab = true;
            step.player_mass = Some(tuning.base_mass);
            debug!("Climbed off the hair root");
        } else if next == id {
            self.coupling = Coupling::Terminal(id);
        } else if chain.segment(next).is_frozen() {
            self.coupling = Coupling::Fixed(id);
        } else {
            self.coupling = Coupling::Climbing {
                from: id,
                to: next,
                progress,
            };
        }
    }

    fn hold(&mut self, id: usize, chain: &mut HairChain, tuning: &MovementTuning) {
        self.held = Some(id);
        chain.player_holding_part(id, tuning.swing_mass);
    }
}
