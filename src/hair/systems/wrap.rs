//! Hair domain: wrap intent and wrap/stretch evaluation.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::hair::{ChainNotification, HairChain, HairStretchChanged, HairWrapChanged};

pub(crate) fn tick_wrap_intent(time: Res<Time>, mut chain: ResMut<HairChain>) {
    chain.tick_wrap_intent(time.delta_secs());
}

/// Runs the throttled wrap/stretch check and forwards the changes as
/// messages, read later this frame by locomotion.
pub(crate) fn evaluate_wrap_and_stretch(
    time: Res<Time>,
    mut chain: ResMut<HairChain>,
    mut wrap_writer: MessageWriter<HairWrapChanged>,
    mut stretch_writer: MessageWriter<HairStretchChanged>,
) {
    for notification in chain.evaluate_wrap_and_stretch(time.delta_secs()) {
        match notification {
            ChainNotification::WrapChanged { wrapped } => {
                wrap_writer.write(HairWrapChanged { wrapped });
            }
            ChainNotification::StretchChanged {
                stretched,
                distance,
            } => {
                stretch_writer.write(HairStretchChanged {
                    stretched,
                    distance,
                });
            }
        }
    }
}
