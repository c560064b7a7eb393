//! Integration tests for vexil-scene.

use vexil_math::{Quat, Vec2, Vec3};
use vexil_morph::{cloth_pose, TransitionState};
use vexil_scene::config::SceneConfig;
use vexil_scene::context::SimulationContext;
use vexil_scene::input::{DragState, InputEvent};
use vexil_telemetry::{EventLog, VecSink};
use vexil_types::VexilError;

fn scene() -> SimulationContext {
    SimulationContext::new(SceneConfig::default()).unwrap()
}

fn scene_with_log() -> (SimulationContext, EventLog) {
    let mut ctx = scene();
    let sink = VecSink::new();
    let log = sink.log();
    ctx.bus_mut().add_sink(Box::new(sink));
    (ctx, log)
}

fn click_flag(at: Vec3) -> InputEvent {
    InputEvent::Click {
        flag_hit: Some(at),
        element_hit: None,
        time_ms: 0.0,
    }
}

/// Ticks at 60 Hz until the morph settles, returning the next clock value.
fn run_until_settled(ctx: &mut SimulationContext, mut now: f64) -> f64 {
    for _ in 0..1000 {
        ctx.tick(now);
        now += 16.0;
        if !ctx.controller().is_animating() {
            return now;
        }
    }
    panic!("morph never settled");
}

// ─── Construction ─────────────────────────────────────────────

#[test]
fn new_scene_is_flat_and_deformable() {
    let ctx = scene();
    assert_eq!(ctx.network().len(), 16 * 21);
    assert_eq!(ctx.elements().len(), 12);
    assert_eq!(ctx.graph().len(), 12);
    assert_eq!(ctx.controller().state(), TransitionState::Deformable);

    // Elements start on the cloth, just in front of it.
    for i in 0..12 {
        let pose = ctx.element_pose(i).unwrap();
        assert!((pose.position.z - 0.1).abs() < 1e-5);
    }
}

#[test]
fn invalid_config_rejected() {
    let mut config = SceneConfig::default();
    config.flag.cols = 0;
    assert!(SimulationContext::new(config).is_err());
}

// ─── Tick & Throttle ──────────────────────────────────────────

#[test]
fn physics_is_throttled() {
    let mut ctx = scene();
    for now in [0.0, 10.0, 20.0] {
        ctx.tick(now);
    }
    assert_eq!(ctx.physics_steps(), 0);

    ctx.tick(30.0);
    assert_eq!(ctx.physics_steps(), 1);
    ctx.tick(45.0);
    assert_eq!(ctx.physics_steps(), 1);
    ctx.tick(60.0);
    assert_eq!(ctx.physics_steps(), 2);
    assert_eq!(ctx.tick_count(), 6);
}

#[test]
fn physics_step_marks_mesh_dirty() {
    let mut ctx = scene();
    ctx.mesh_mut().needs_update = false;
    ctx.tick(100.0);
    assert!(ctx.mesh_mut().take_needs_update());
}

#[test]
fn morph_to_rigid_lands_on_pivot_frame() {
    let mut ctx = scene();
    assert!(ctx.toggle_to_rigid());
    run_until_settled(&mut ctx, 1000.0);

    assert_eq!(ctx.controller().progress(), 1.0);
    assert_eq!(ctx.controller().state(), TransitionState::Rigid);
    let pivot = ctx.pivot().pose();
    for (i, element) in ctx.elements().iter().enumerate() {
        let expected = element.rigid.transformed_by(&pivot);
        assert!(ctx.element_pose(i).unwrap().abs_diff_eq(&expected, 1e-5));
    }
}

#[test]
fn morph_back_returns_to_cloth() {
    let mut ctx = scene();
    ctx.toggle_to_rigid();
    let now = run_until_settled(&mut ctx, 1000.0);
    ctx.toggle_to_deformable();
    run_until_settled(&mut ctx, now);

    assert_eq!(ctx.controller().state(), TransitionState::Deformable);
    let offset = ctx.config().morph.surface_offset;
    for (i, element) in ctx.elements().iter().enumerate() {
        let expected = cloth_pose(ctx.network(), element.uv, offset);
        assert!(ctx.element_pose(i).unwrap().abs_diff_eq(&expected, 1e-6));
    }
}

#[test]
fn auto_rotation_only_while_rigid() {
    let mut ctx = scene();
    for k in 0..10 {
        ctx.tick(k as f64 * 16.0);
    }
    assert_eq!(ctx.pivot().target, Quat::IDENTITY);

    ctx.toggle_to_rigid();
    ctx.tick(160.0);
    assert_ne!(ctx.pivot().target, Quat::IDENTITY);
}

// ─── Input ────────────────────────────────────────────────────

#[test]
fn click_on_flag_adds_impulse_and_morphs() {
    let (mut ctx, log) = scene_with_log();
    ctx.tick(0.0);
    ctx.handle_input(click_flag(Vec3::new(1.0, 2.0, 0.0)));

    assert_eq!(ctx.impulses().len(), 1);
    assert_eq!(ctx.controller().state(), TransitionState::TransitioningToRigid);

    ctx.tick(16.0);
    assert_eq!(log.count("impulse_added"), 1);
    assert_eq!(log.count("transition_started"), 1);
}

#[test]
fn click_impulse_decays_from_host_click_time() {
    let mut ctx = scene();
    // Host clock is far past zero before the first frame arrives.
    ctx.handle_input(InputEvent::Click {
        flag_hit: Some(Vec3::ZERO),
        element_hit: None,
        time_ms: 100_000.0,
    });
    ctx.tick(100_016.0);

    assert_eq!(ctx.physics_steps(), 1);
    assert_eq!(ctx.impulses().len(), 1, "impulse survives its first step");
    let impulse = ctx.impulses().iter().next().unwrap();
    assert_eq!(impulse.created_at_ms, 100_000.0);
}

#[test]
fn click_missing_flag_does_nothing() {
    let mut ctx = scene();
    ctx.handle_input(InputEvent::Click {
        flag_hit: None,
        element_hit: None,
        time_ms: 0.0,
    });
    assert!(ctx.impulses().is_empty());
    assert_eq!(ctx.controller().state(), TransitionState::Deformable);
}

#[test]
fn click_while_rigid_kicks_and_reverts() {
    let (mut ctx, log) = scene_with_log();
    ctx.toggle_to_rigid();
    run_until_settled(&mut ctx, 1000.0);

    ctx.handle_input(InputEvent::Click {
        flag_hit: Some(Vec3::ZERO),
        element_hit: Some(Vec3::new(0.0, 0.0, 23.0)),
        time_ms: 0.0,
    });
    assert_eq!(
        ctx.controller().state(),
        TransitionState::TransitioningToDeformable
    );
    assert!(ctx.pivot().velocity.z > 0.0, "pivot recoils away from the hit");
    assert!(ctx.impulses().is_empty(), "no wind impulse while rigid");

    ctx.tick(5000.0);
    assert_eq!(log.count("pivot_kicked"), 1);
}

#[test]
fn click_mid_flight_reverts() {
    let mut ctx = scene();
    ctx.handle_input(click_flag(Vec3::ZERO));
    ctx.tick(0.0);
    ctx.tick(500.0);
    let progress = ctx.controller().progress();
    assert!(progress > 0.0 && progress < 1.0);

    ctx.handle_input(click_flag(Vec3::ZERO));
    assert_eq!(
        ctx.controller().state(),
        TransitionState::TransitioningToDeformable
    );
    assert_eq!(ctx.controller().progress(), progress);
}

#[test]
fn click_after_drag_is_swallowed() {
    let mut ctx = scene();
    ctx.handle_input(InputEvent::PointerDown { x: 100.0, y: 100.0 });
    ctx.handle_input(InputEvent::PointerMove { x: 140.0, y: 100.0 });
    ctx.handle_input(InputEvent::PointerUp);

    ctx.handle_input(click_flag(Vec3::ZERO));
    assert_eq!(ctx.controller().state(), TransitionState::Deformable);
    assert!(ctx.impulses().is_empty());

    // The next click goes through.
    ctx.handle_input(click_flag(Vec3::ZERO));
    assert_eq!(ctx.controller().state(), TransitionState::TransitioningToRigid);
}

#[test]
fn drag_rotates_and_disables_auto_rotation() {
    let mut ctx = scene();
    ctx.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
    ctx.handle_input(InputEvent::PointerMove { x: 128.0, y: 0.0 });
    assert!(!ctx.pivot().auto_rotate_enabled());
    assert!(ctx.pivot().target.abs_diff_eq(Quat::from_rotation_y(0.5), 1e-5));

    // Clicks re-enable it.
    ctx.handle_input(InputEvent::PointerUp);
    ctx.handle_input(click_flag(Vec3::ZERO));
    ctx.handle_input(click_flag(Vec3::ZERO));
    assert!(ctx.pivot().auto_rotate_enabled());
}

#[test]
fn tiny_moves_are_not_drags() {
    let mut drag = DragState::default();
    assert!(drag.motion(Vec2::new(5.0, 5.0)).is_none());

    drag.press(Vec2::ZERO);
    let motion = drag.motion(Vec2::new(1.0, -0.5)).unwrap();
    assert!(!motion.significant);
    assert!(!drag.take_dragged());

    let motion = drag.motion(Vec2::new(3.0, -0.5)).unwrap();
    assert!(motion.significant);
    assert_eq!(motion.delta, Vec2::new(2.0, 0.0));
    assert!(drag.take_dragged());
    assert!(!drag.take_dragged());
}

// ─── Parameters ───────────────────────────────────────────────

#[test]
fn set_mass_updates_particles() {
    let (mut ctx, log) = scene_with_log();
    ctx.set_param("mass", 0.5).unwrap();
    assert_eq!(ctx.config().cloth.mass, 0.5);
    for p in ctx.network().particles() {
        assert!((p.mass() * p.inv_mass() - 1.0).abs() < 1e-6);
        assert_eq!(p.mass(), 0.5);
    }
    ctx.tick(0.0);
    assert_eq!(log.count("param_changed"), 1);
}

#[test]
fn unknown_param_rejected() {
    let mut ctx = scene();
    let err = ctx.set_param("stiffness", 1.0).unwrap_err();
    assert!(matches!(err, VexilError::UnknownParameter(_)));
    assert!(ctx.set_param("damping", 2.0).is_err());
    assert_eq!(ctx.config().cloth.damping, 0.09);
}

// ─── Snapshot & Config ────────────────────────────────────────

#[test]
fn snapshot_captures_scene() {
    let mut ctx = scene();
    ctx.handle_input(click_flag(Vec3::ZERO));
    ctx.tick(40.0);

    let snap = ctx.snapshot();
    assert_eq!(snap.tick, 1);
    assert_eq!(snap.state, "transitioning_to_rigid");
    assert_eq!(snap.particle_count(), ctx.network().len());
    assert_eq!(snap.elements.len(), 12);
    assert_eq!(snap.active_impulses, 1);

    let decoded = vexil_debug::SceneSnapshot::from_bytes(&snap.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, snap);
}

#[test]
fn config_from_toml() {
    let config = SceneConfig::from_toml_str(
        r#"
physics_interval_ms = 20.0

[flag]
cols = 6
rows = 8

[cloth]
wind_strength = 0.5

[morph]
seed = 9
"#,
    )
    .unwrap();
    assert_eq!(config.physics_interval_ms, 20.0);
    assert_eq!(config.flag.cols, 6);
    assert_eq!(config.flag.width, 30.0);
    assert_eq!(config.cloth.wind_strength, 0.5);
    assert_eq!(config.morph.seed, 9);

    let ctx = SimulationContext::new(config).unwrap();
    assert_eq!(ctx.network().len(), 7 * 9);
}

#[test]
fn config_round_trips_through_toml() {
    let config = SceneConfig::default();
    let text = config.to_toml_string().unwrap();
    assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn bad_toml_is_config_error() {
    let err = SceneConfig::from_toml_str("[morph]\nstagger_fraction = 1.5").unwrap_err();
    assert!(matches!(err, VexilError::InvalidConfig(_)));
    assert!(SceneConfig::from_toml_str("flag = 3").is_err());
}
