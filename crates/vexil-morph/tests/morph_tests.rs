//! Integration tests for vexil-morph.

use vexil_cloth::{ConstraintNetwork, FlagDimensions};
use vexil_math::{Pose, Quat, Vec2, Vec3};
use vexil_morph::blend::{cloth_pose, element_pose, rigid_pose, staggered_progress};
use vexil_morph::config::{MorphConfig, PivotConfig};
use vexil_morph::element::{spawn_elements, stagger_order};
use vexil_morph::layout::{cloth_layout, face_up, icosahedron_vertices, polyhedron_radius, rigid_layout};
use vexil_morph::pivot::RigidPivot;
use vexil_morph::scene_graph::{NodeStore, SceneGraph};
use vexil_morph::transition::{TransitionController, TransitionState};
use vexil_types::NodeHandle;

fn flat_flag() -> ConstraintNetwork {
    ConstraintNetwork::new(FlagDimensions::default(), 0.13).unwrap()
}

fn settle(controller: &mut TransitionController, dt: f32) -> usize {
    for tick in 1..10_000 {
        if controller.advance(dt).is_some() {
            return tick;
        }
    }
    panic!("transition never settled");
}

// ─── Layout Tests ─────────────────────────────────────────────

#[test]
fn icosahedron_has_five_equidistant_neighbours() {
    let r = 2.0;
    let verts = icosahedron_vertices(r);
    let edge = 1.0515 * r;
    for (i, v) in verts.iter().enumerate() {
        assert!((v.length() - r).abs() < 1e-5);
        let neighbours = verts
            .iter()
            .enumerate()
            .filter(|&(j, w)| j != i && (v.distance(*w) - edge).abs() < 1e-3)
            .count();
        assert_eq!(neighbours, 5, "vertex {i}");
    }
}

#[test]
fn icosahedron_poles_on_x() {
    let verts = icosahedron_vertices(1.0);
    assert!(verts[0].abs_diff_eq(Vec3::X, 1e-6));
    assert!(verts[6].abs_diff_eq(Vec3::NEG_X, 1e-6));
}

#[test]
fn up_hints_by_hemisphere() {
    assert_eq!(face_up(Vec3::X), Vec3::NEG_Y);
    assert_eq!(face_up(Vec3::NEG_X), Vec3::Y);
    assert_eq!(face_up(Vec3::new(0.4, 0.9, 0.0)), Vec3::NEG_X);
    assert_eq!(face_up(Vec3::new(-0.4, 0.0, 0.9)), Vec3::X);
}

#[test]
fn rigid_layout_faces_outward() {
    let dims = FlagDimensions::default();
    let layout = rigid_layout(&dims);
    assert_eq!(layout.len(), 12);
    assert!((polyhedron_radius(&dims) - 2.15).abs() < 1e-5);
    for pose in &layout {
        assert!((pose.position.length() - 2.15).abs() < 1e-4);
        let facing = pose.orientation * Vec3::Z;
        assert!(facing.abs_diff_eq(pose.position.normalize(), 1e-4));
    }
}

#[test]
fn cloth_ring_is_centred_on_flag() {
    let dims = FlagDimensions::default();
    let uvs = cloth_layout(&dims, 12);
    assert_eq!(uvs.len(), 12);
    for &(u, v) in &uvs {
        assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v));
        let p = dims.surface_point(u, v);
        assert!((p.length() - 10.0).abs() < 1e-3);
    }
    // First element sits straight below the centre.
    assert!((uvs[0].0 - 0.5).abs() < 1e-5);
    assert!((uvs[0].1 - (0.5 + 10.0 / 54.0)).abs() < 1e-5);
}

// ─── Element Tests ────────────────────────────────────────────

#[test]
fn stagger_order_is_a_seeded_permutation() {
    let order = stagger_order(12, 42);
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..12).collect::<Vec<_>>());
    assert_eq!(order, stagger_order(12, 42));
    assert_ne!(stagger_order(12, 1), stagger_order(12, 2));
}

#[test]
fn spawned_elements_own_distinct_nodes() {
    let mut graph = NodeStore::new();
    let elements = spawn_elements(&FlagDimensions::default(), 0, &mut graph);
    assert_eq!(elements.len(), 12);
    assert_eq!(graph.len(), 12);
    for (i, e) in elements.iter().enumerate() {
        assert_eq!(e.id.index(), i);
        assert_eq!(e.node, NodeHandle(i as u32));
        assert_eq!(graph.transform(e.node), Some(e.rigid));
    }
}

#[test]
fn node_store_ignores_unknown_handles() {
    let mut graph = NodeStore::new();
    graph.set_transform(NodeHandle(3), Pose::IDENTITY);
    assert!(graph.is_empty());
    assert_eq!(graph.transform(NodeHandle(0)), None);
}

// ─── Stagger & Blend Tests ────────────────────────────────────

#[test]
fn stagger_bounds() {
    assert_eq!(staggered_progress(0.0, 0, 12, 0.6), 0.0);
    assert_eq!(staggered_progress(0.4, 0, 12, 0.6), 1.0);
    assert_eq!(staggered_progress(1.0, 11, 12, 0.6), 1.0);
    assert_eq!(staggered_progress(0.5, 11, 12, 0.6), 0.0);
}

#[test]
fn lower_rank_is_never_behind() {
    for step in 0..=100 {
        let p = step as f32 / 100.0;
        for rank in 0..11 {
            let early = staggered_progress(p, rank, 12, 0.6);
            let late = staggered_progress(p, rank + 1, 12, 0.6);
            assert!(early >= late, "p={p} rank={rank}");
        }
    }
}

#[test]
fn cloth_pose_rides_above_flat_flag() {
    let net = flat_flag();
    let pose = cloth_pose(&net, (0.5, 0.5), 0.1);
    assert!(pose.position.abs_diff_eq(Vec3::new(0.0, 0.0, 0.1), 1e-5));
    assert!(pose.abs_diff_eq(&Pose::new(pose.position, Quat::IDENTITY), 1e-5));
}

#[test]
fn element_pose_follows_active_configuration() {
    let net = flat_flag();
    let mut graph = NodeStore::new();
    let elements = spawn_elements(net.dimensions(), 0, &mut graph);
    let config = MorphConfig::default();
    let pivot = Pose::new(Vec3::new(0.0, 0.0, 25.0), Quat::from_rotation_y(0.7));
    let mut controller = TransitionController::new(config.duration);

    for e in &elements {
        let pose = element_pose(e, elements.len(), &net, &pivot, &controller, &config);
        assert!(pose.abs_diff_eq(&cloth_pose(&net, e.uv, 0.1), 1e-6));
    }

    // Progress 0 while animating is still the cloth pose.
    controller.toggle_to_rigid();
    for e in &elements {
        let pose = element_pose(e, elements.len(), &net, &pivot, &controller, &config);
        assert!(pose.abs_diff_eq(&cloth_pose(&net, e.uv, 0.1), 1e-5));
    }

    settle(&mut controller, 0.016);
    for e in &elements {
        let pose = element_pose(e, elements.len(), &net, &pivot, &controller, &config);
        assert!(pose.abs_diff_eq(&rigid_pose(&e.rigid, &pivot), 1e-6));
    }
}

#[test]
fn rigid_pose_composes_with_pivot() {
    let local = Pose::new(Vec3::X, Quat::IDENTITY);
    let pivot = Pose::new(Vec3::new(0.0, 0.0, 25.0), Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    let world = rigid_pose(&local, &pivot);
    assert!(world.position.abs_diff_eq(Vec3::new(0.0, 0.0, 24.0), 1e-5));
}

// ─── Transition Tests ─────────────────────────────────────────

#[test]
fn starts_deformable() {
    let c = TransitionController::default();
    assert_eq!(c.state(), TransitionState::Deformable);
    assert_eq!(c.progress(), 0.0);
    assert_eq!(c.duration(), 2.0);
}

#[test]
fn progress_rises_monotonically_then_settles() {
    let mut c = TransitionController::new(2.0);
    assert!(c.toggle_to_rigid());
    assert_eq!(c.state(), TransitionState::TransitioningToRigid);

    let mut last = c.progress();
    while c.is_animating() {
        c.advance(0.016);
        assert!(c.progress() >= last);
        last = c.progress();
    }
    assert_eq!(c.progress(), 1.0);
    assert_eq!(c.state(), TransitionState::Rigid);

    for _ in 0..10 {
        assert_eq!(c.advance(0.016), None);
        assert!(!c.is_animating());
    }
}

#[test]
fn settles_after_duration() {
    let mut c = TransitionController::new(2.0);
    c.toggle_to_rigid();
    assert_eq!(settle(&mut c, 0.5), 4);
}

#[test]
fn redundant_toggles_are_noops() {
    let mut c = TransitionController::new(2.0);
    assert!(!c.toggle_to_deformable());
    assert_eq!(c.state(), TransitionState::Deformable);

    c.toggle_to_rigid();
    assert!(!c.toggle_to_rigid());
    settle(&mut c, 0.5);
    assert!(!c.toggle_to_rigid());
    assert_eq!(c.state(), TransitionState::Rigid);
}

#[test]
fn reversal_keeps_progress() {
    let mut c = TransitionController::new(2.0);
    c.toggle_to_rigid();
    c.advance(0.5);
    let mid = c.progress();
    assert!((mid - 0.25).abs() < 1e-6);

    assert!(c.toggle_to_deformable());
    assert_eq!(c.state(), TransitionState::TransitioningToDeformable);
    assert_eq!(c.progress(), mid);

    c.advance(0.2);
    assert!((c.progress() - 0.15).abs() < 1e-6);

    assert!(c.toggle_to_rigid());
    assert_eq!(c.state(), TransitionState::TransitioningToRigid);

    c.toggle_to_deformable();
    assert_eq!(settle(&mut c, 0.2), 2);
    assert_eq!(c.state(), TransitionState::Deformable);
    assert_eq!(c.progress(), 0.0);
}

#[test]
fn bad_dt_does_not_move_progress() {
    let mut c = TransitionController::new(2.0);
    c.toggle_to_rigid();
    c.advance(-1.0);
    c.advance(f32::NAN);
    assert_eq!(c.progress(), 0.0);
    assert!(c.is_animating());
}

// ─── Pivot Tests ──────────────────────────────────────────────

#[test]
fn pivot_at_rest_stays_put() {
    let mut pivot = RigidPivot::default();
    for _ in 0..10 {
        pivot.update();
    }
    assert_eq!(pivot.position, Vec3::new(0.0, 0.0, 25.0));
    assert_eq!(pivot.velocity, Vec3::ZERO);
}

#[test]
fn kick_recoils_then_springs_back() {
    let mut pivot = RigidPivot::default();
    pivot.kick(Vec3::ZERO);
    assert!(pivot.velocity.abs_diff_eq(Vec3::new(0.0, 0.0, 0.375), 1e-6));

    pivot.update();
    assert!(pivot.position.z > 25.0);

    for _ in 0..1000 {
        pivot.update();
    }
    assert!(pivot.position.abs_diff_eq(Vec3::new(0.0, 0.0, 25.0), 1e-3));
}

#[test]
fn orientation_eases_toward_target() {
    let mut pivot = RigidPivot::default();
    pivot.target = Quat::from_rotation_y(1.0);
    pivot.update();
    assert!(pivot.orientation.abs_diff_eq(Quat::from_rotation_y(0.13), 1e-5));

    for _ in 0..200 {
        pivot.update();
    }
    assert!(pivot.orientation.abs_diff_eq(pivot.target, 1e-5));
}

#[test]
fn auto_rotate_requires_activity_and_enable() {
    let mut pivot = RigidPivot::default();
    pivot.auto_rotate(0.016, false);
    assert_eq!(pivot.target, Quat::IDENTITY);

    pivot.auto_rotate(0.016, true);
    assert!(pivot.target.abs_diff_eq(Quat::from_rotation_y(0.004), 1e-6));

    let before = pivot.target;
    pivot.set_auto_rotate(false);
    pivot.auto_rotate(0.016, true);
    assert_eq!(pivot.target, before);
}

#[test]
fn auto_rotate_scales_with_frame_time() {
    let mut pivot = RigidPivot::default();
    pivot.auto_rotate(0.032, true);
    assert!(pivot.target.abs_diff_eq(Quat::from_rotation_y(0.008), 1e-6));
}

#[test]
fn drag_rotates_target() {
    let mut pivot = RigidPivot::default();
    let viewport = Vec2::new(800.0, 600.0);
    pivot.drag(Vec2::ZERO, viewport);
    assert!(pivot.target.abs_diff_eq(Quat::IDENTITY, 1e-6));

    pivot.drag(Vec2::new(80.0, 0.0), viewport);
    assert!(pivot.target.abs_diff_eq(Quat::from_rotation_y(0.5), 1e-5));
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_configs_validate() {
    assert!(MorphConfig::default().validate().is_ok());
    assert!(MorphConfig::unstaggered().validate().is_ok());
    assert!(PivotConfig::default().validate().is_ok());
}

#[test]
fn invalid_configs_rejected() {
    let full_stagger = MorphConfig {
        stagger_fraction: 1.0,
        ..Default::default()
    };
    assert!(full_stagger.validate().is_err());

    let frozen = MorphConfig {
        duration: 0.0,
        ..Default::default()
    };
    assert!(frozen.validate().is_err());

    let springy = PivotConfig {
        spring_damping: 1.5,
        ..Default::default()
    };
    assert!(springy.validate().is_err());
}

#[test]
fn configs_from_partial_toml() {
    let morph: MorphConfig = toml::from_str("seed = 7\nduration = 1.5").unwrap();
    assert_eq!(morph.seed, 7);
    assert_eq!(morph.duration, 1.5);
    assert_eq!(morph.stagger_fraction, 0.6);

    let pivot: PivotConfig = toml::from_str("rest_position = [0.0, 0.0, 10.0]").unwrap();
    assert_eq!(pivot.rest_position, Vec3::new(0.0, 0.0, 10.0));
    assert_eq!(pivot.spring_strength, 0.01);
}
