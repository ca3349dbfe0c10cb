//! Movement domain: system modules for locomotion updates.

pub(crate) mod attachment;
pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use attachment::{apply_attachment, sync_grip_joint};
pub(crate) use collisions::{apply_safe_edge, detect_ground};
pub(crate) use input::read_input;
pub(crate) use movement::{
    apply_gravity, apply_hair_notifications, apply_horizontal_movement, apply_jump, grab_hair,
    handle_hair_input, handle_jump_input, update_animator, update_locomotion_mode,
};
