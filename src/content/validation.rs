//! Range checks on loaded tuning values.

use crate::hair::{HairTuning, MassProfile};
use crate::movement::{MovementTuning, WrappedGravity};

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.message)
    }
}

/// Helper macro for checking a value condition
macro_rules! check {
    ($errors:expr, $section:expr, $field:expr, $ok:expr, $($msg:tt)+) => {
        if !$ok {
            $errors.push(ValidationError {
                section: $section,
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

pub fn validate_hair(tuning: &HairTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let s = "hair";

    check!(
        errors,
        s,
        "segment_count",
        tuning.segment_count >= 2,
        "needs at least 2 segments, got {}",
        tuning.segment_count
    );
    check!(
        errors,
        s,
        "segment_length",
        tuning.segment_length > 0.0,
        "must be positive, got {}",
        tuning.segment_length
    );
    check!(
        errors,
        s,
        "segment_radius",
        tuning.segment_radius > 0.0,
        "must be positive, got {}",
        tuning.segment_radius
    );
    check!(
        errors,
        s,
        "wrap_check_interval",
        (0.05..=0.2).contains(&tuning.wrap_check_interval),
        "must lie in 0.05..=0.2 s, got {}",
        tuning.wrap_check_interval
    );
    check!(
        errors,
        s,
        "latch_time",
        tuning.latch_time > 0.0,
        "must be positive, got {}",
        tuning.latch_time
    );
    check!(
        errors,
        s,
        "stretch_threshold",
        tuning.stretch_threshold >= 0.0,
        "must not be negative, got {}",
        tuning.stretch_threshold
    );
    check!(
        errors,
        s,
        "slack_mass",
        tuning.slack_mass >= 0.0,
        "must not be negative, got {}",
        tuning.slack_mass
    );
    check!(
        errors,
        s,
        "link_iterations",
        tuning.link_iterations >= 1,
        "needs at least one pass"
    );

    let profile_ok = match tuning.mass_profile {
        MassProfile::Linear { base, step } => base > 0.0 && step >= 0.0,
        MassProfile::Fixed(mass) => mass > 0.0,
    };
    check!(
        errors,
        s,
        "mass_profile",
        profile_ok,
        "masses must be positive, got {:?}",
        tuning.mass_profile
    );

    for (field, delay) in [
        ("shoot_delay", tuning.shoot_delay),
        ("settle_delay", tuning.settle_delay),
        ("pull_segment_delay", tuning.pull_segment_delay),
        ("wrap_intent_delay", tuning.wrap_intent_delay),
        ("hold_grace", tuning.hold_grace),
    ] {
        check!(
            errors,
            s,
            field,
            delay >= 0.0,
            "must not be negative, got {}",
            delay
        );
    }

    errors
}

pub fn validate_movement(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let s = "movement";

    for (field, value) in [
        ("move_speed", tuning.move_speed),
        ("jump_velocity", tuning.jump_velocity),
        ("max_jump_time", tuning.max_jump_time),
        ("gravity", tuning.gravity),
        ("base_gravity_scale", tuning.base_gravity_scale),
        ("base_mass", tuning.base_mass),
        ("swing_mass", tuning.swing_mass),
        ("climb_speed", tuning.climb_speed),
    ] {
        check!(
            errors,
            s,
            field,
            value > 0.0,
            "must be positive, got {}",
            value
        );
    }

    for (field, value) in [
        ("coyote_time", tuning.coyote_time),
        ("jump_buffer_time", tuning.jump_buffer_time),
        ("descent_threshold", tuning.descent_threshold),
        ("fast_fall_threshold", tuning.fast_fall_threshold),
        ("climb_deadzone", tuning.climb_deadzone),
    ] {
        check!(
            errors,
            s,
            field,
            value >= 0.0,
            "must not be negative, got {}",
            value
        );
    }

    let floor = tuning.base_gravity_scale + tuning.fall_gravity_floor_boost;
    check!(
        errors,
        s,
        "fall_gravity_ceiling",
        tuning.fall_gravity_ceiling >= floor,
        "{} is below the fall floor {}",
        tuning.fall_gravity_ceiling,
        floor
    );

    if let WrappedGravity::MassBleed { rate, floor } = tuning.wrapped_gravity {
        check!(
            errors,
            s,
            "wrapped_gravity",
            rate >= 0.0 && floor > 0.0,
            "mass bleed needs a non-negative rate and positive floor"
        );
    }

    for (field, size) in [
        ("body_size", tuning.body_size),
        ("ground_sensor_size", tuning.ground_sensor_size),
        ("grab_sensor_size", tuning.grab_sensor_size),
        ("safe_edge_sensor_size", tuning.safe_edge_sensor_size),
    ] {
        check!(
            errors,
            s,
            field,
            size[0] > 0.0 && size[1] > 0.0,
            "extents must be positive, got {:?}",
            size
        );
    }

    errors
}
