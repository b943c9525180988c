//! Integration tests for the assembly sequence, part visibility and entrance
//! animations, driven through the headless harness.

use shared::{AssemblyRevision, AssemblyStep, PartId, PhoneModel};
use solarframe_gui_lib::animation::Pose;
use solarframe_gui_lib::harness::TestHarness;
use solarframe_gui_lib::parts::{self, EdgeKind};

#[test]
fn test_classic_sequence_end_to_end() {
    let mut h = TestHarness::new();
    let expected = [
        (AssemblyStep::Chassis, vec![PartId::PhoneBody]),
        (AssemblyStep::SolarModule, vec![PartId::PhoneBody, PartId::SolarModule]),
        (AssemblyStep::Pcb, vec![PartId::PhoneBody, PartId::SolarModule, PartId::Pcb]),
        (
            AssemblyStep::Slider,
            vec![PartId::PhoneBody, PartId::SolarModule, PartId::Pcb, PartId::SlidingCover],
        ),
        (
            AssemblyStep::ThermalInsert,
            vec![
                PartId::PhoneBody,
                PartId::SolarModule,
                PartId::Pcb,
                PartId::SlidingCover,
                PartId::ThermalInsert,
            ],
        ),
    ];

    for (i, (step, visible)) in expected.iter().enumerate() {
        if i > 0 {
            let t = h.advance();
            assert!(!t.is_noop());
        }
        assert_eq!(h.step(), *step);
        assert_eq!(&h.visible_parts(), visible);
    }

    assert!(h.assembly.is_complete());
    // Advancing past the end changes nothing
    assert!(h.advance().is_noop());
    assert_eq!(h.step(), AssemblyStep::ThermalInsert);
    assert!(h.last_edges().is_empty());
}

#[test]
fn test_reset_restores_initial_visibility() {
    let mut h = TestHarness::new();
    let initial = h.visible_parts();

    h.advance_by(3);
    let t = h.reset();
    assert_eq!(t.from, AssemblyStep::Slider);
    assert_eq!(t.to, AssemblyStep::Chassis);
    assert_eq!(h.visible_parts(), initial);
    assert_eq!(h.last_edges().len(), 3);
    assert!(h.last_edges().iter().all(|e| e.kind == EdgeKind::Disappeared));

    // Reset on the first step is a no-op
    assert!(h.reset().is_noop());
}

#[test]
fn test_visibility_follows_thresholds_at_every_step() {
    for revision in AssemblyRevision::all() {
        let mut h = TestHarness::with_revision(*revision);
        for ordinal in 0..revision.len() {
            assert_eq!(h.assembly.ordinal(), ordinal);
            for (part, threshold) in parts::thresholds(*revision) {
                let threshold_ordinal = revision.ordinal(*threshold).unwrap();
                assert_eq!(h.part_visible(*part), ordinal >= threshold_ordinal, "{revision:?} {part:?} at {ordinal}");
            }
            h.advance();
        }
    }
}

#[test]
fn test_variant_switch_keeps_step_and_visibility() {
    let mut h = TestHarness::new();
    h.advance_by(2);
    let step = h.step();
    let visible = h.visible_parts();

    let model = h.toggle_variant();
    assert_eq!(model, PhoneModel::default().toggled());
    assert_eq!(h.step(), step);
    assert_eq!(h.visible_parts(), visible);
    assert!(h.last_edges().is_empty());

    h.select_variant(PhoneModel::default());
    assert_eq!(h.assembly.model(), PhoneModel::default());
    assert_eq!(h.step(), step);
}

#[test]
fn test_entrance_replays_identically_after_reset() {
    let mut h = TestHarness::new();
    h.advance();
    h.tick(0.4);
    let first = h.pose(PartId::SolarModule).unwrap();

    h.tick(3.0);
    h.reset();
    h.tick(1.0);
    h.advance();
    h.tick(0.4);
    let second = h.pose(PartId::SolarModule).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_entrance_settles_at_rest_pose() {
    let mut h = TestHarness::new();
    h.advance_by(2);
    assert!(h.is_animating());

    h.tick(10.0);
    assert!(!h.is_animating());
    let pcb = h.catalog().into_iter().find(|p| p.id == PartId::Pcb).unwrap();
    let pose = h.pose(PartId::Pcb).unwrap();
    assert!((pose.position - pcb.entrance.rest.position).length() < 1e-4);
    assert!(pose.rotation_x.abs() < 1e-4);
}

#[test]
fn test_part_visible_but_not_yet_moved_starts_hidden() {
    let mut h = TestHarness::new();
    h.advance();
    let module = h.catalog().into_iter().find(|p| p.id == PartId::SolarModule).unwrap();
    let pose = h.pose(PartId::SolarModule).unwrap();
    // No time has passed since the step
    assert!((pose.position - module.hidden.position).length() < 1e-4);
    assert!(pose.opacity.abs() < 1e-4);
}

#[test]
fn test_hybrid_sequence_edges() {
    let mut h = TestHarness::with_revision(AssemblyRevision::Hybrid);
    assert_eq!(h.step(), AssemblyStep::Case);
    assert_eq!(h.visible_parts(), vec![PartId::PhoneCase]);

    let appeared: Vec<PartId> = (0..5)
        .flat_map(|_| {
            h.advance();
            h.last_edges().to_vec()
        })
        .inspect(|e| assert_eq!(e.kind, EdgeKind::Appeared))
        .map(|e| e.part)
        .collect();
    assert_eq!(
        appeared,
        vec![
            PartId::SolarModule,
            PartId::Battery,
            PartId::Pcb,
            PartId::ThermalInsert,
            PartId::Phone,
        ]
    );
    assert_eq!(h.step(), AssemblyStep::Phone);
    assert!(h.assembly.is_complete());
}

#[test]
fn test_switching_revision_restarts_without_animation() {
    let mut h = TestHarness::new();
    h.advance_by(2);

    assert!(h.set_revision(AssemblyRevision::Hybrid));
    assert_eq!(h.step(), AssemblyStep::Case);
    assert!(h.last_edges().is_empty());
    assert!(!h.is_animating());
    assert_eq!(h.pose(PartId::PhoneCase), Some(Pose::default()));

    // Same revision again: nothing happens
    assert!(!h.set_revision(AssemblyRevision::Hybrid));
}
