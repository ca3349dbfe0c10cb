//! Hair domain: driving the deployment sequencer each frame.

use bevy::prelude::*;

use crate::hair::{DeploymentSequencer, HairChain};
use crate::movement::Player;

/// Advances the running shoot/retract session. A missing player cancels it.
pub(crate) fn advance_deployment(
    time: Res<Time>,
    mut sequencer: ResMut<DeploymentSequencer>,
    mut chain: ResMut<HairChain>,
    player: Query<&Transform, With<Player>>,
) {
    if !sequencer.is_busy() {
        return;
    }
    let owner = player
        .single()
        .ok()
        .map(|transform| transform.translation.truncate());
    sequencer.advance(time.delta_secs(), &mut chain, owner);
}
