//! Hair domain: timed shoot and retract sequences.
//!
//! Each sequence is a session of steps separated by waits. `advance` is
//! called once per frame with the frame delta and runs every step whose wait
//! has elapsed, so nothing ever blocks a tick.

use bevy::prelude::*;

use crate::hair::chain::HairChain;
use crate::hair::error::HairError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentPhase {
    #[default]
    Stowed,
    Shooting,
    Deployed,
    Retracting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SessionStep {
    // Shoot
    Launch,
    Settle,
    // Retract
    BeginPull,
    Pull(usize),
    Collapse(usize),
    RestoreIdle,
}

#[derive(Debug, Clone)]
struct DeploymentSession {
    step: SessionStep,
    /// Seconds until `step` runs.
    wait: f32,
    aim: Vec2,
    facing_right: bool,
}

enum StepOutcome {
    Next(SessionStep, f32),
    Finished,
}

/// Drives the chain between stowed and deployed. One session at a time.
#[derive(Resource, Debug, Default)]
pub struct DeploymentSequencer {
    phase: DeploymentPhase,
    session: Option<DeploymentSession>,
}

impl DeploymentSequencer {
    pub fn phase(&self) -> DeploymentPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a shoot toward `aim`. Runs after the wind-up delay.
    pub fn request_shoot(
        &mut self,
        chain: &HairChain,
        aim: Vec2,
        facing_right: bool,
    ) -> Result<(), HairError> {
        if self.is_busy() {
            return Err(HairError::DeploymentBusy);
        }
        if self.phase != DeploymentPhase::Stowed {
            return Err(HairError::InvalidPhase {
                request: "shoot",
                phase: self.phase,
            });
        }

        self.phase = DeploymentPhase::Shooting;
        self.session = Some(DeploymentSession {
            step: SessionStep::Launch,
            wait: chain.tuning().shoot_delay,
            aim,
            facing_right,
        });
        debug!("Hair shoot requested toward {:?}", aim);
        Ok(())
    }

    pub fn request_retract(&mut self) -> Result<(), HairError> {
        if self.is_busy() {
            return Err(HairError::DeploymentBusy);
        }
        if self.phase != DeploymentPhase::Deployed {
            return Err(HairError::InvalidPhase {
                request: "retract",
                phase: self.phase,
            });
        }

        self.phase = DeploymentPhase::Retracting;
        self.session = Some(DeploymentSession {
            step: SessionStep::BeginPull,
            wait: 0.0,
            aim: Vec2::ZERO,
            facing_right: true,
        });
        debug!("Hair retract requested");
        Ok(())
    }

    /// Drops the running session without touching segment state.
    pub fn cancel(&mut self, chain: &HairChain) {
        if self.session.take().is_some() {
            warn!("Hair deployment cancelled during {:?}", self.phase);
        }
        self.phase = if chain.is_deployed() {
            DeploymentPhase::Deployed
        } else {
            DeploymentPhase::Stowed
        };
    }

    /// Runs every step whose wait elapsed. `owner` is the player position,
    /// or `None` once the player is gone, which cancels the session.
    pub fn advance(&mut self, dt: f32, chain: &mut HairChain, owner: Option<Vec2>) {
        if self.session.is_none() {
            return;
        }
        let Some(player_pos) = owner else {
            self.cancel(chain);
            return;
        };
        let Some(mut session) = self.session.take() else {
            return;
        };

        session.wait -= dt;
        while session.wait <= 0.0 {
            match run_step(&session, chain, player_pos) {
                StepOutcome::Next(step, wait) => {
                    session.step = step;
                    session.wait += wait;
                }
                StepOutcome::Finished => {
                    self.phase = if chain.is_deployed() {
                        DeploymentPhase::Deployed
                    } else {
                        DeploymentPhase::Stowed
                    };
                    info!("Hair sequence finished: {:?}", self.phase);
                    return;
                }
            }
        }

        self.session = Some(session);
    }
}

fn run_step(session: &DeploymentSession, chain: &mut HairChain, player_pos: Vec2) -> StepOutcome {
    let tuning = chain.tuning().clone();

    match session.step {
        SessionStep::Launch => {
            chain.collapse_idle();

            let direction = (session.aim - player_pos).normalize_or(Vec2::X);
            let angle = direction.to_angle();
            let count = chain.len();

            for id in (0..count).rev() {
                let segment = chain.segment_mut(id);
                segment.scale = tuning.active_scale;
                segment.pending_pose = Some((player_pos, angle));
                segment.position = player_pos;
                segment.facing_right = session.facing_right;
                if tuning.seed_mass_on_launch {
                    segment.mass = segment.profile_mass;
                }
                if id + tuning.launch_skip < count {
                    segment.pending_velocity = Some(direction * tuning.launch_force);
                }
            }

            chain.request_wrap(true);
            StepOutcome::Next(SessionStep::Settle, tuning.settle_delay)
        }
        SessionStep::Settle => {
            chain.set_deployed(true);
            StepOutcome::Finished
        }
        SessionStep::BeginPull => {
            chain.set_pulling(true);
            chain.request_wrap(false);
            StepOutcome::Next(SessionStep::Pull(chain.tip()), 0.0)
        }
        SessionStep::Pull(id) => {
            let position = chain.segment(id).position;
            chain.set_hair_point(position);
            chain.segment_mut(id).pending_velocity =
                Some((player_pos - position) * tuning.pull_force);
            StepOutcome::Next(SessionStep::Collapse(id), tuning.pull_segment_delay)
        }
        SessionStep::Collapse(id) => {
            chain.segment_mut(id).scale = tuning.stowed_scale;
            if id == 0 {
                StepOutcome::Next(SessionStep::RestoreIdle, 0.0)
            } else {
                StepOutcome::Next(SessionStep::Pull(id - 1), 0.0)
            }
        }
        SessionStep::RestoreIdle => {
            chain.restore_idle();
            chain.set_deployed(false);
            chain.set_pulling(false);
            StepOutcome::Finished
        }
    }
}
