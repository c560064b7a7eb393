//! The simulation context: one owned object per scene, no globals.
//!
//! Each [`SimulationContext::tick`] runs, in order:
//! 1. **Frame delta**: 0.016 s on the first tick, elapsed time after
//! 2. **Cloth**: at most one step per `physics_interval_ms`, then
//!    impulse decay and pruning
//! 3. **Pivot**: auto-rotation, spring and orientation easing
//! 4. **Morph**: advance global progress
//! 5. **Poses**: blend and write every element's render transform
//! 6. **Telemetry**: flush queued events to the sinks

use vexil_cloth::{
    ClothParam, ClothSimulator, ConstraintNetwork, ImpulseField, WindImpulse,
};
use vexil_debug::SceneSnapshot;
use vexil_math::{Pose, Vec2, Vec3};
use vexil_mesh::TriangleMesh;
use vexil_morph::{
    element_pose, spawn_elements, AnimatedElement, NodeStore, RigidPivot, SceneGraph,
    TransitionController,
};
use vexil_telemetry::{EventBus, EventKind};
use vexil_types::constants::DEFAULT_FRAME_DT;
use vexil_types::VexilResult;

use crate::config::SceneConfig;
use crate::input::{DragState, InputEvent};

/// Everything the frame loop needs, owned in one place.
pub struct SimulationContext<G: SceneGraph = NodeStore> {
    config: SceneConfig,
    network: ConstraintNetwork,
    mesh: TriangleMesh,
    impulses: ImpulseField,
    simulator: ClothSimulator,
    controller: TransitionController,
    pivot: RigidPivot,
    elements: Vec<AnimatedElement>,
    graph: G,
    drag: DragState,
    bus: EventBus,
    tick: u64,
    clock_ms: f64,
    last_frame_ms: Option<f64>,
    last_physics_ms: f64,
}

impl SimulationContext<NodeStore> {
    /// A headless context backed by an in-memory [`NodeStore`].
    pub fn new(config: SceneConfig) -> VexilResult<Self> {
        Self::with_graph(config, NodeStore::new())
    }
}

impl<G: SceneGraph> SimulationContext<G> {
    /// Builds the scene, spawning one node per element in `graph`.
    pub fn with_graph(config: SceneConfig, mut graph: G) -> VexilResult<Self> {
        config.validate()?;

        let network = ConstraintNetwork::new(config.flag, config.cloth.mass)?;
        let mesh = network.render_mesh();
        let elements = spawn_elements(&config.flag, config.morph.seed, &mut graph);

        tracing::info!(
            particles = network.len(),
            constraints = network.constraints().len(),
            elements = elements.len(),
            seed = config.morph.seed,
            "scene initialized"
        );

        let mut ctx = Self {
            controller: TransitionController::new(config.morph.duration),
            pivot: RigidPivot::new(config.pivot),
            network,
            mesh,
            impulses: ImpulseField::new(),
            simulator: ClothSimulator::new(),
            elements,
            graph,
            drag: DragState::default(),
            bus: EventBus::new(),
            tick: 0,
            clock_ms: 0.0,
            last_frame_ms: None,
            last_physics_ms: 0.0,
            config,
        };
        ctx.write_poses();
        Ok(ctx)
    }

    /// Advances the scene to host time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        let dt = match self.last_frame_ms {
            None => DEFAULT_FRAME_DT,
            Some(last) => (((now_ms - last) / 1000.0) as f32).max(0.0),
        };
        self.last_frame_ms = Some(now_ms);
        self.clock_ms = now_ms;

        if now_ms - self.last_physics_ms >= self.config.physics_interval_ms {
            self.step_cloth(now_ms);
        }

        let active = self.controller.is_rigid() || self.controller.is_animating();
        self.pivot.auto_rotate(dt, active);
        self.pivot.update();

        if let Some(settled) = self.controller.advance(dt) {
            self.bus.record(
                self.tick,
                EventKind::TransitionFinished {
                    state: settled.name().to_string(),
                },
            );
        }

        self.write_poses();

        self.tick += 1;
        self.bus.flush();
    }

    fn step_cloth(&mut self, now_ms: f64) {
        let delta = ((now_ms - self.last_physics_ms) / 1000.0) as f32;
        self.last_physics_ms = now_ms;

        let report = self.simulator.step(
            &mut self.network,
            &mut self.mesh,
            &self.impulses,
            &self.config.cloth,
            now_ms,
            delta,
        );
        self.bus.record(
            self.tick,
            EventKind::PhysicsStep {
                dt: report.dt,
                active_impulses: report.active_impulses as u32,
                wall_time: report.wall_time,
            },
        );

        let pruned = self.impulses.update(now_ms);
        if pruned > 0 {
            self.bus.record(
                self.tick,
                EventKind::ImpulsesPruned {
                    count: pruned as u32,
                    remaining: self.impulses.len() as u32,
                },
            );
        }
    }

    fn write_poses(&mut self) {
        let pivot = self.pivot.pose();
        let count = self.elements.len();
        for element in &self.elements {
            let pose = element_pose(
                element,
                count,
                &self.network,
                &pivot,
                &self.controller,
                &self.config.morph,
            );
            self.graph.set_transform(element.node, pose);
        }
    }

    /// Applies one host input event. Effects show on the next tick.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.drag.press(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => {
                if let Some(motion) = self.drag.motion(Vec2::new(x, y)) {
                    if motion.significant {
                        self.pivot.set_auto_rotate(false);
                    }
                    self.pivot.drag(motion.delta, self.config.viewport);
                }
            }
            InputEvent::PointerUp => self.drag.release(),
            InputEvent::Click {
                flag_hit,
                element_hit,
                time_ms,
            } => self.click(flag_hit, element_hit, time_ms),
        }
    }

    fn click(&mut self, flag_hit: Option<Vec3>, element_hit: Option<Vec3>, time_ms: f64) {
        if self.drag.take_dragged() {
            tracing::trace!("click after drag ignored");
            return;
        }

        if self.controller.is_rigid() || self.controller.is_animating() {
            if let Some(point) = element_hit {
                self.pivot.kick(point);
                self.bus.record(
                    self.tick,
                    EventKind::PivotKicked {
                        point: point.to_array(),
                    },
                );
            }
            self.toggle_to_deformable();
            self.pivot.set_auto_rotate(true);
            return;
        }

        let Some(point) = flag_hit else {
            return;
        };
        let impulse = WindImpulse::click(point, time_ms);
        self.bus.record(
            self.tick,
            EventKind::ImpulseAdded {
                origin: point.to_array(),
                strength: impulse.strength,
                radius: impulse.radius,
            },
        );
        self.impulses.add(impulse);
        self.toggle_to_rigid();
        self.pivot.set_auto_rotate(true);
    }

    /// Starts morphing toward the polyhedron. Returns `false` if already
    /// headed there.
    pub fn toggle_to_rigid(&mut self) -> bool {
        self.retarget(true)
    }

    /// Starts morphing toward the flag. Returns `false` if already headed
    /// there.
    pub fn toggle_to_deformable(&mut self) -> bool {
        self.retarget(false)
    }

    fn retarget(&mut self, rigid: bool) -> bool {
        let from = self.controller.state();
        let changed = if rigid {
            self.controller.toggle_to_rigid()
        } else {
            self.controller.toggle_to_deformable()
        };
        if changed {
            self.bus.record(
                self.tick,
                EventKind::TransitionStarted {
                    from: from.name().to_string(),
                    to: self.controller.state().name().to_string(),
                    progress: self.controller.progress(),
                },
            );
        }
        changed
    }

    /// Sets a cloth parameter by name; takes effect on the next physics
    /// step. A mass change re-derives every particle's inverse mass.
    pub fn set_param(&mut self, name: &str, value: f32) -> VexilResult<()> {
        let param: ClothParam = name.parse()?;
        self.config.cloth.set(param, value)?;
        if param == ClothParam::Mass {
            self.network.set_mass(self.config.cloth.mass)?;
        }
        let value = self.config.cloth.get(param);
        tracing::debug!(param = %param, value, "cloth parameter changed");
        self.bus.record(
            self.tick,
            EventKind::ParamChanged {
                name: param.name().to_string(),
                value,
            },
        );
        Ok(())
    }

    /// Captures the observable scene state.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            tick: self.tick,
            clock_ms: self.clock_ms,
            progress: self.controller.progress(),
            state: self.controller.state().name().to_string(),
            positions: self.network.positions_flat(),
            active_impulses: self.impulses.len(),
            pivot: self.pivot.pose(),
            elements: self
                .elements
                .iter()
                .map(|e| self.graph.transform(e.node).unwrap_or_default())
                .collect(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn network(&self) -> &ConstraintNetwork {
        &self.network
    }

    /// Render buffer; the host uploads it when `needs_update` is set.
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut TriangleMesh {
        &mut self.mesh
    }

    pub fn impulses(&self) -> &ImpulseField {
        &self.impulses
    }

    pub fn controller(&self) -> &TransitionController {
        &self.controller
    }

    pub fn pivot(&self) -> &RigidPivot {
        &self.pivot
    }

    pub fn elements(&self) -> &[AnimatedElement] {
        &self.elements
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Current render pose of element `index`.
    pub fn element_pose(&self, index: usize) -> Option<Pose> {
        self.elements
            .get(index)
            .and_then(|e| self.graph.transform(e.node))
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Frames ticked so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Cloth steps taken so far.
    pub fn physics_steps(&self) -> u64 {
        self.simulator.steps()
    }

    /// Flushes telemetry and finalizes the sinks.
    pub fn finish(&mut self) {
        self.bus.finish();
    }
}
