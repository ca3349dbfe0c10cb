//! Hair domain: unit tests for the chain, segments and deployment.

use bevy::prelude::*;

use super::{
    ChainNotification, DeploymentPhase, DeploymentSequencer, HairChain, HairError, HairTuning,
    MassProfile, SurfaceProfile, WrapConstraint,
};

const STEP: f32 = 1.0 / 64.0;

fn build_chain(count: usize) -> HairChain {
    let mut world = World::new();
    let entities = (0..count).map(|_| world.spawn_empty().id()).collect();
    HairChain::new(entities, HairTuning::default()).expect("chain builds")
}

/// Deployed chain laid out along +x at rest spacing, wrap intent on.
fn deployed_chain(count: usize) -> HairChain {
    let mut chain = build_chain(count);
    let spacing = chain.tuning().segment_length;
    for id in 0..count {
        chain.segment_mut(id).scale = 1.0;
        chain.set_segment_position(id, Vec2::new(id as f32 * spacing, 0.0));
    }
    chain.set_deployed(true);
    chain.request_wrap(true);
    chain.tick_wrap_intent(1.0);
    chain
}

fn run_until_idle(sequencer: &mut DeploymentSequencer, chain: &mut HairChain, owner: Vec2) {
    for _ in 0..10_000 {
        if !sequencer.is_busy() {
            return;
        }
        sequencer.advance(STEP, chain, Some(owner));
    }
    panic!("deployment sequence never finished");
}

// ============================================================================
// Construction and neighbours
// ============================================================================

#[test]
fn test_chain_rejects_single_segment() {
    let mut world = World::new();
    let entities = vec![world.spawn_empty().id()];
    let result = HairChain::new(entities, HairTuning::default());
    assert_eq!(result.err(), Some(HairError::ChainTooShort(1)));
}

#[test]
fn test_chain_assigns_ids_and_mass_profile() {
    let chain = build_chain(5);
    for (index, segment) in chain.segments().iter().enumerate() {
        assert_eq!(segment.id, index);
        assert!((segment.mass - (2.0 + 0.5 * index as f32)).abs() < 1e-6);
    }
}

#[test]
fn test_fixed_mass_profile_gives_uniform_masses() {
    let mut world = World::new();
    let entities = (0..5).map(|_| world.spawn_empty().id()).collect();
    let tuning = HairTuning {
        mass_profile: MassProfile::Fixed(3.0),
        ..default()
    };
    let mut chain = HairChain::new(entities, tuning).expect("chain builds");

    for segment in chain.segments() {
        assert_eq!(segment.mass, 3.0);
        assert_eq!(segment.profile_mass, 3.0);
    }

    chain.player_holding_part(1, 1.0);
    chain.reset_masses();
    for segment in chain.segments() {
        assert_eq!(segment.mass, 3.0);
    }
}

#[test]
fn test_neighbors_stay_in_bounds() {
    for count in 2..=8 {
        let chain = build_chain(count);
        assert_eq!(chain.next_rootward(0), 0);
        assert_eq!(chain.next_tipward(count - 1), count - 1);
        for id in 0..count {
            assert!(chain.next_rootward(id) < count);
            assert!(chain.next_tipward(id) < count);
        }
        assert_eq!(chain.next_tipward(0), 1);
        assert_eq!(chain.next_rootward(count - 1), count - 2);
    }
}

// ============================================================================
// Closest usable segment
// ============================================================================

#[test]
fn test_closest_segment_skips_frozen() {
    let mut chain = deployed_chain(6);
    let target = chain.segment(2).position;
    chain.segment_mut(2).constraint = WrapConstraint::FullyFrozen;

    let closest = chain.closest_usable_segment(target);
    assert!(matches!(closest, Some(1) | Some(3)));
}

#[test]
fn test_closest_segment_tie_keeps_rootmost() {
    let mut chain = deployed_chain(4);
    chain.set_segment_position(0, Vec2::new(-1.0, 0.0));
    chain.set_segment_position(1, Vec2::new(1.0, 0.0));
    chain.set_segment_position(2, Vec2::new(0.0, 1.0));
    chain.set_segment_position(3, Vec2::new(5.0, 0.0));

    assert_eq!(chain.closest_usable_segment(Vec2::ZERO), Some(0));
}

#[test]
fn test_closest_segment_accepts_near_match_early() {
    let mut chain = deployed_chain(4);
    chain.set_segment_position(0, Vec2::new(0.0005, 0.0));
    chain.set_segment_position(1, Vec2::ZERO);
    chain.set_segment_position(2, Vec2::new(5.0, 0.0));
    chain.set_segment_position(3, Vec2::new(6.0, 0.0));

    // Segment 0 is within epsilon, so the exact match at 1 is never scanned.
    assert_eq!(chain.closest_usable_segment(Vec2::ZERO), Some(0));
}

#[test]
fn test_closest_segment_stops_below_margin() {
    let mut chain = deployed_chain(4);
    chain.set_segment_position(0, Vec2::new(2.0, 0.0));
    chain.set_segment_position(1, Vec2::new(0.0, -1.0));
    chain.set_segment_position(2, Vec2::new(0.0, 0.0));
    chain.set_segment_position(3, Vec2::new(0.1, 0.0));

    // Segment 1 is far below the query point, so 2 and 3 are never reached.
    assert_eq!(chain.closest_usable_segment(Vec2::ZERO), Some(0));
}

// ============================================================================
// Mass propagation
// ============================================================================

#[test]
fn test_player_holding_part_sags_chain() {
    let mut chain = build_chain(6);
    let increment = chain.tuning().hop_mass_increment;
    let slack = chain.tuning().slack_mass;

    chain.player_holding_part(2, 1.0);

    assert_eq!(chain.segment(0).mass, slack);
    assert_eq!(chain.segment(1).mass, slack);
    assert_eq!(chain.segment(3).mass, 1.0 + increment);
    assert_eq!(chain.segment(5).mass, 1.0 + 3.0 * increment);
}

#[test]
fn test_mass_before_restores_slack_after_any_propagation() {
    let mut chain = build_chain(8);
    let slack = chain.tuning().slack_mass;

    chain.propagate_mass_after(4, 3.0);
    chain.propagate_mass_after(0, 7.0);
    chain.propagate_mass_before(4);

    for id in 0..4 {
        assert_eq!(chain.segment(id).mass, slack);
    }
}

#[test]
fn test_reset_masses_restores_profile() {
    let mut chain = build_chain(5);
    chain.player_holding_part(2, 1.0);
    chain.reset_masses();
    for segment in chain.segments() {
        assert_eq!(segment.mass, segment.profile_mass);
    }
}

// ============================================================================
// Wrap intent
// ============================================================================

#[test]
fn test_wrap_intent_is_delayed() {
    let mut chain = build_chain(4);
    chain.request_wrap(true);
    chain.tick_wrap_intent(0.2);
    assert!(!chain.should_wrap());
    chain.tick_wrap_intent(0.11);
    assert!(chain.should_wrap());
}

#[test]
fn test_disabling_wrap_cancels_pending_enable() {
    let mut chain = build_chain(4);
    chain.request_wrap(true);
    chain.tick_wrap_intent(0.1);
    chain.request_wrap(false);
    chain.tick_wrap_intent(1.0);
    assert!(!chain.should_wrap());
}

// ============================================================================
// Segment contact, hold grace and latching
// ============================================================================

#[test]
fn test_contact_ignored_while_stowed() {
    let mut chain = build_chain(6);
    chain.request_wrap(true);
    chain.tick_wrap_intent(1.0);

    chain.segment_contact_started(4, 0.0);
    chain.tick_segments(0.0);

    assert!(!chain.segment(4).is_holding());
    assert_eq!(chain.segment(4).constraint, WrapConstraint::Free);
}

#[test]
fn test_hold_grace_then_neighbor_deactivation() {
    let mut chain = deployed_chain(10);

    chain.segment_contact_started(8, 0.0);
    assert!(chain.segment(8).is_holding());
    assert_eq!(chain.segment(8).surface, SurfaceProfile::Sticky);
    for id in 5..8 {
        assert!(chain.segment(id).activated_by_neighbor);
    }
    assert!(!chain.segment(4).activated_by_neighbor);

    chain.tick_segments(0.1);
    assert_eq!(chain.segment(6).constraint, WrapConstraint::RotationLocked);

    chain.segment_contact_ended(8, 0.5);
    chain.tick_segments(0.6);
    assert!(chain.segment(8).hold_grace_active);
    assert_eq!(chain.segment(8).constraint, WrapConstraint::RotationLocked);

    chain.tick_segments(0.71);
    assert!(!chain.segment(8).hold_grace_active);
    assert_eq!(chain.segment(8).constraint, WrapConstraint::Free);
    assert_eq!(chain.segment(8).surface, SurfaceProfile::Slippery);
    for id in 5..8 {
        assert!(!chain.segment(id).activated_by_neighbor);
    }
}

#[test]
fn test_neighbor_activation_clamps_at_root() {
    let mut chain = deployed_chain(6);

    chain.segment_contact_started(1, 0.0);

    assert!(chain.segment(1).is_holding());
    assert!(chain.segment(0).activated_by_neighbor);
    assert!(!chain.segment(1).activated_by_neighbor);
    for id in 2..6 {
        assert!(!chain.segment(id).activated_by_neighbor);
    }

    chain.tick_segments(0.1);
    assert_eq!(chain.segment(0).constraint, WrapConstraint::RotationLocked);
}

#[test]
fn test_contact_during_shoot_settle_still_latches() {
    let mut chain = build_chain(8);
    let mut sequencer = DeploymentSequencer::default();
    let player = Vec2::ZERO;

    sequencer
        .request_shoot(&chain, Vec2::new(4.0, 0.0), true)
        .expect("shoot accepted");
    sequencer.advance(0.11, &mut chain, Some(player));
    assert_eq!(sequencer.phase(), DeploymentPhase::Shooting);
    assert!(chain.segment(5).is_active());
    assert!(!chain.is_deployed());

    // Touches a surface after launch but before the chain settles.
    let mut now = 0.12;
    chain.segment_contact_started(5, now);
    chain.tick_segments(now);

    while now < 2.5 {
        now += STEP;
        sequencer.advance(STEP, &mut chain, Some(player));
        chain.tick_wrap_intent(STEP);
        chain.tick_segments(now);
    }

    assert_eq!(sequencer.phase(), DeploymentPhase::Deployed);
    assert!(chain.should_wrap());
    assert!(chain.segment(5).is_holding());
    assert!(chain.segment(5).is_frozen());
}

#[test]
fn test_overlapping_surfaces_keep_hold() {
    let mut chain = deployed_chain(6);
    chain.segment_contact_started(3, 0.0);
    chain.segment_contact_started(3, 0.1);
    chain.segment_contact_ended(3, 0.2);

    assert!(chain.segment(3).is_holding());
    assert!(!chain.segment(3).hold_grace_active);
}

#[test]
fn test_touching_segment_holds_once_wrap_enabled() {
    let mut chain = deployed_chain(6);
    chain.request_wrap(false);

    chain.segment_contact_started(3, 0.0);
    assert!(!chain.segment(3).is_holding());

    chain.request_wrap(true);
    chain.tick_wrap_intent(1.0);
    chain.tick_segments(0.5);
    assert!(chain.segment(3).is_holding());
    assert_eq!(chain.segment(3).contact_start, Some(0.5));
}

#[test]
fn test_latch_end_to_end_notifies_once() {
    let mut chain = deployed_chain(16);
    let contact = 10;
    chain.segment_contact_started(contact, 0.0);

    let mut wrapped_notifications = 0;
    let mut now = 0.0;
    while now < 2.0 {
        now += STEP;
        chain.tick_segments(now);
        for notification in chain.evaluate_wrap_and_stretch(STEP) {
            if notification == (ChainNotification::WrapChanged { wrapped: true }) {
                wrapped_notifications += 1;
            }
        }
    }

    assert_eq!(wrapped_notifications, 1);
    assert!(chain.is_wrapped());
    assert!(chain.segment(contact).is_frozen());
    for id in 0..contact {
        assert!(chain.segment(id).is_frozen(), "segment {id} should be frozen");
    }
    for id in contact + 1..16 {
        assert!(!chain.segment(id).is_frozen(), "segment {id} should be free");
    }
}

#[test]
fn test_no_latch_before_latch_time() {
    let mut chain = deployed_chain(8);
    chain.segment_contact_started(5, 0.0);
    chain.tick_segments(1.4);
    assert!(!chain.segment(5).is_frozen());
    chain.tick_segments(1.5);
    assert!(chain.segment(5).is_frozen());
}

#[test]
fn test_stowing_clears_segment_state() {
    let mut chain = deployed_chain(6);
    chain.segment_contact_started(4, 0.0);
    chain.tick_segments(2.0);
    assert!(chain.segment(4).is_frozen());

    chain.set_deployed(false);
    chain.tick_segments(2.1);
    for segment in chain.segments() {
        assert_eq!(segment.constraint, WrapConstraint::Free);
        assert!(!segment.activated_by_neighbor);
        assert!(segment.contact_start.is_none());
    }
}

// ============================================================================
// Wrap and stretch evaluation
// ============================================================================

#[test]
fn test_wrap_freezes_rootward_only() {
    let mut chain = deployed_chain(12);
    chain.segment_mut(7).constraint = WrapConstraint::FullyFrozen;

    let notifications = chain.evaluate_wrap_and_stretch(0.1);

    assert!(notifications.contains(&ChainNotification::WrapChanged { wrapped: true }));
    for id in 0..=7 {
        assert!(chain.segment(id).is_frozen());
    }
    for id in 8..12 {
        assert!(!chain.segment(id).is_frozen());
    }
}

#[test]
fn test_wrap_check_is_throttled() {
    let mut chain = deployed_chain(6);
    chain.segment_mut(3).constraint = WrapConstraint::FullyFrozen;

    assert!(chain.evaluate_wrap_and_stretch(0.01).is_empty());
    assert!(!chain.is_wrapped());
    assert!(!chain.evaluate_wrap_and_stretch(0.05).is_empty());
    assert!(chain.is_wrapped());
}

#[test]
fn test_stretch_on_and_off() {
    let mut chain = deployed_chain(16);
    chain.segment_mut(5).constraint = WrapConstraint::FullyFrozen;
    chain.evaluate_wrap_and_stretch(0.1);
    assert!(chain.is_wrapped());
    assert!(!chain.is_stretched());

    let rest = chain.segment(13).position;
    chain.set_segment_position(13, rest + Vec2::new(0.3, 0.0));
    let notifications = chain.evaluate_wrap_and_stretch(0.1);

    let stretched = notifications.iter().find_map(|n| match *n {
        ChainNotification::StretchChanged {
            stretched,
            distance,
        } => Some((stretched, distance)),
        _ => None,
    });
    let (flag, distance) = stretched.expect("stretch notification");
    assert!(flag);
    assert!(distance > 0.25);
    assert!(chain.is_stretched());

    chain.set_segment_position(13, rest);
    let notifications = chain.evaluate_wrap_and_stretch(0.1);
    assert!(notifications.contains(&ChainNotification::StretchChanged {
        stretched: false,
        distance: 0.0,
    }));
    assert_eq!(chain.stretch_distance(), 0.0);
}

#[test]
fn test_stretch_reports_distance_changes() {
    let mut chain = deployed_chain(16);
    chain.segment_mut(5).constraint = WrapConstraint::FullyFrozen;
    chain.evaluate_wrap_and_stretch(0.1);

    let rest = chain.segment(13).position;
    chain.set_segment_position(13, rest + Vec2::new(0.3, 0.0));
    chain.evaluate_wrap_and_stretch(0.1);
    let first = chain.stretch_distance();

    chain.set_segment_position(13, rest + Vec2::new(0.6, 0.0));
    let notifications = chain.evaluate_wrap_and_stretch(0.1);
    let further = notifications.iter().find_map(|n| match *n {
        ChainNotification::StretchChanged {
            stretched: true,
            distance,
        } => Some(distance),
        _ => None,
    });
    let further = further.expect("distance change is reported");
    assert!(further > first);

    // Unchanged distance stays quiet.
    assert!(chain.evaluate_wrap_and_stretch(0.1).is_empty());
}

#[test]
fn test_no_stretch_without_wrap_intent() {
    let mut chain = deployed_chain(10);
    chain.segment_mut(2).constraint = WrapConstraint::FullyFrozen;
    chain.request_wrap(false);
    chain.set_segment_position(8, Vec2::new(10.0, 0.0));

    chain.evaluate_wrap_and_stretch(0.1);
    assert!(chain.is_wrapped());
    assert!(!chain.is_stretched());
}

#[test]
fn test_pulling_in_unwraps() {
    let mut chain = deployed_chain(6);
    chain.segment_mut(2).constraint = WrapConstraint::FullyFrozen;
    chain.evaluate_wrap_and_stretch(0.1);
    assert!(chain.is_wrapped());

    chain.set_pulling(true);
    let notifications = chain.evaluate_wrap_and_stretch(0.0);
    assert!(notifications.contains(&ChainNotification::WrapChanged { wrapped: false }));
    assert!(!chain.is_wrapped());
}

#[test]
fn test_unwrap_notifies_when_stowed() {
    let mut chain = deployed_chain(6);
    chain.segment_mut(2).constraint = WrapConstraint::FullyFrozen;
    chain.evaluate_wrap_and_stretch(0.1);

    chain.set_deployed(false);
    let notifications = chain.evaluate_wrap_and_stretch(0.0);
    assert!(notifications.contains(&ChainNotification::WrapChanged { wrapped: false }));
    assert!(chain.evaluate_wrap_and_stretch(0.0).is_empty());
}

// ============================================================================
// Link solving
// ============================================================================

#[test]
fn test_links_pull_stretched_pair_together() {
    let mut chain = deployed_chain(2);
    chain.set_segment_position(0, Vec2::ZERO);
    chain.set_segment_position(1, Vec2::new(0.5, 0.0));

    let corrections = chain.link_corrections();
    assert!(corrections[0].x > 0.0);
    assert!(corrections[1].x < 0.0);
}

#[test]
fn test_links_never_move_frozen_segment() {
    let mut chain = deployed_chain(3);
    chain.segment_mut(0).constraint = WrapConstraint::FullyFrozen;
    chain.set_segment_position(1, Vec2::new(0.6, 0.0));

    let corrections = chain.link_corrections();
    assert_eq!(corrections[0], Vec2::ZERO);
    assert!(corrections[1].x < 0.0);
}

// ============================================================================
// Deployment sequencer
// ============================================================================

#[test]
fn test_deployment_round_trip() {
    let mut chain = build_chain(8);
    let mut sequencer = DeploymentSequencer::default();
    let player = Vec2::new(1.0, 2.0);

    sequencer
        .request_shoot(&chain, Vec2::new(5.0, 2.0), true)
        .expect("shoot accepted");
    assert_eq!(sequencer.phase(), DeploymentPhase::Shooting);
    run_until_idle(&mut sequencer, &mut chain, player);

    assert_eq!(sequencer.phase(), DeploymentPhase::Deployed);
    assert!(chain.is_deployed());
    assert_eq!(chain.idle_scale(), 0.0);
    for segment in chain.segments() {
        assert_eq!(segment.scale, chain.tuning().active_scale);
    }

    sequencer.request_retract().expect("retract accepted");
    sequencer.advance(STEP, &mut chain, Some(player));
    assert!(chain.is_pulling());
    assert!(!chain.should_wrap());
    run_until_idle(&mut sequencer, &mut chain, player);

    assert_eq!(sequencer.phase(), DeploymentPhase::Stowed);
    assert!(!chain.is_deployed());
    assert!(!chain.is_pulling());
    assert_eq!(chain.idle_scale(), chain.tuning().idle_scale);
    for segment in chain.segments() {
        assert_eq!(segment.scale, chain.tuning().stowed_scale);
    }
}

#[test]
fn test_launch_velocity_skips_tip_segments() {
    let mut chain = build_chain(10);
    let mut sequencer = DeploymentSequencer::default();
    let skip = chain.tuning().launch_skip;

    sequencer
        .request_shoot(&chain, Vec2::new(0.0, 3.0), false)
        .expect("shoot accepted");
    sequencer.advance(0.2, &mut chain, Some(Vec2::ZERO));

    for segment in chain.segments() {
        assert!(segment.pending_pose.is_some());
        assert!(!segment.facing_right);
        let launched = segment.pending_velocity.is_some();
        assert_eq!(launched, segment.id + skip < 10, "segment {}", segment.id);
    }
    let velocity = chain.segment(0).pending_velocity.expect("root launched");
    assert!(velocity.y > 0.0 && velocity.x.abs() < 1e-5);
}

#[test]
fn test_retract_records_hair_point_tip_first() {
    let mut chain = build_chain(4);
    let mut sequencer = DeploymentSequencer::default();
    sequencer
        .request_shoot(&chain, Vec2::X, true)
        .expect("shoot accepted");
    run_until_idle(&mut sequencer, &mut chain, Vec2::ZERO);

    let tip = chain.tip();
    chain.set_segment_position(tip, Vec2::new(3.0, 1.0));
    sequencer.request_retract().expect("retract accepted");
    sequencer.advance(STEP, &mut chain, Some(Vec2::ZERO));

    assert_eq!(chain.hair_point(), Vec2::new(3.0, 1.0));
    let pull = chain.segment(tip).pending_velocity.expect("tip pulled");
    assert!(pull.x < 0.0 && pull.y < 0.0);
}

#[test]
fn test_busy_sequencer_rejects_requests() {
    let chain = build_chain(4);
    let mut sequencer = DeploymentSequencer::default();

    sequencer
        .request_shoot(&chain, Vec2::X, true)
        .expect("shoot accepted");
    assert_eq!(
        sequencer.request_shoot(&chain, Vec2::X, true),
        Err(HairError::DeploymentBusy)
    );
    assert_eq!(sequencer.request_retract(), Err(HairError::DeploymentBusy));
}

#[test]
fn test_requests_check_phase() {
    let mut chain = build_chain(4);
    let mut sequencer = DeploymentSequencer::default();

    assert!(matches!(
        sequencer.request_retract(),
        Err(HairError::InvalidPhase {
            phase: DeploymentPhase::Stowed,
            ..
        })
    ));

    sequencer
        .request_shoot(&chain, Vec2::X, true)
        .expect("shoot accepted");
    run_until_idle(&mut sequencer, &mut chain, Vec2::ZERO);
    assert!(matches!(
        sequencer.request_shoot(&chain, Vec2::X, true),
        Err(HairError::InvalidPhase {
            phase: DeploymentPhase::Deployed,
            ..
        })
    ));
}

#[test]
fn test_missing_owner_cancels_without_touching_segments() {
    let mut chain = build_chain(4);
    let mut sequencer = DeploymentSequencer::default();

    sequencer
        .request_shoot(&chain, Vec2::X, true)
        .expect("shoot accepted");
    sequencer.advance(1.0, &mut chain, None);

    assert!(!sequencer.is_busy());
    assert_eq!(sequencer.phase(), DeploymentPhase::Stowed);
    assert!(!chain.is_deployed());
    for segment in chain.segments() {
        assert_eq!(segment.scale, chain.tuning().stowed_scale);
        assert!(segment.pending_pose.is_none());
    }
}
