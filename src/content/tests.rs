//! Content domain: tuning file parsing and validation.

use super::{parse_tuning, validate_hair, validate_movement};
use crate::hair::{HairTuning, MassProfile};
use crate::movement::{MovementTuning, WrappedGravity};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_empty_file_keeps_defaults() {
    let file = parse_tuning("()", "inline").expect("parses");
    assert_eq!(file.hair.segment_count, HairTuning::default().segment_count);
    assert_eq!(file.movement.move_speed, MovementTuning::default().move_speed);
}

#[test]
fn test_partial_sections_override_named_fields() {
    let source = r#"(
        hair: (
            segment_count: 12,
            mass_profile: Fixed(3.0),
            closest_scan: (below_margin: None),
        ),
        movement: (
            coyote_time: 0.15,
            wrapped_gravity: MassBleed(rate: 4.0, floor: 1.5),
        ),
    )"#;
    let file = parse_tuning(source, "inline").expect("parses");

    assert_eq!(file.hair.segment_count, 12);
    assert_eq!(file.hair.mass_profile, MassProfile::Fixed(3.0));
    assert_eq!(file.hair.closest_scan.below_margin, None);
    assert_eq!(file.hair.latch_time, HairTuning::default().latch_time);
    assert_eq!(file.movement.coyote_time, 0.15);
    assert_eq!(
        file.movement.wrapped_gravity,
        WrappedGravity::MassBleed {
            rate: 4.0,
            floor: 1.5
        }
    );
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_tuning("(hair: (segment_count: \"many\"))", "tuning.ron")
        .expect_err("type mismatch");
    assert_eq!(err.file, "tuning.ron");
    assert!(err.to_string().starts_with("Failed to load tuning.ron"));
}

#[test]
fn test_shipped_tuning_file_is_valid() {
    let file = super::load_tuning(std::path::Path::new("assets/data")).expect("loads");
    assert!(validate_hair(&file.hair).is_empty());
    assert!(validate_movement(&file.movement).is_empty());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_defaults_validate() {
    assert!(validate_hair(&HairTuning::default()).is_empty());
    assert!(validate_movement(&MovementTuning::default()).is_empty());
}

#[test]
fn test_wrap_check_interval_range() {
    let mut tuning = HairTuning::default();
    tuning.wrap_check_interval = 0.3;
    let errors = validate_hair(&tuning);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "wrap_check_interval");

    tuning.wrap_check_interval = 0.2;
    assert!(validate_hair(&tuning).is_empty());
}

#[test]
fn test_short_chain_rejected() {
    let tuning = HairTuning {
        segment_count: 1,
        ..HairTuning::default()
    };
    let errors = validate_hair(&tuning);
    assert!(errors.iter().any(|e| e.field == "segment_count"));
}

#[test]
fn test_fall_ceiling_below_floor_rejected() {
    let tuning = MovementTuning {
        fall_gravity_ceiling: 4.0,
        ..MovementTuning::default()
    };
    let errors = validate_movement(&tuning);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "movement.fall_gravity_ceiling: 4 is below the fall floor 8"
    );
}

#[test]
fn test_negative_timers_rejected() {
    let tuning = MovementTuning {
        coyote_time: -0.1,
        jump_buffer_time: -1.0,
        ..MovementTuning::default()
    };
    assert_eq!(validate_movement(&tuning).len(), 2);
}
