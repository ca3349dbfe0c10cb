//! Hair domain: recoverable errors surfaced by the chain and sequencer.

use thiserror::Error;

use crate::hair::deploy::DeploymentPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HairError {
    #[error("hair chain needs at least 2 segments, got {0}")]
    ChainTooShort(usize),
    /// A shoot or retract is already running.
    #[error("a hair deployment sequence is already in flight")]
    DeploymentBusy,
    #[error("cannot {request} while hair is {phase:?}")]
    InvalidPhase {
        request: &'static str,
        phase: DeploymentPhase,
    },
}
