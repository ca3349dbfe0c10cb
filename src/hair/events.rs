//! Hair domain: notifications raised by the chain controller.

use bevy::ecs::message::Message;

/// Chain-level change produced by `HairChain::evaluate_wrap_and_stretch`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChainNotification {
    WrapChanged { wrapped: bool },
    StretchChanged { stretched: bool, distance: f32 },
}

/// Fired when the chain latches onto, or lets go of, a grab surface.
#[derive(Debug)]
pub struct HairWrapChanged {
    pub wrapped: bool,
}

impl Message for HairWrapChanged {}

/// Fired when the wrapped chain starts, stops, or keeps stretching.
#[derive(Debug)]
pub struct HairStretchChanged {
    pub stretched: bool,
    pub distance: f32,
}

impl Message for HairStretchChanged {}
