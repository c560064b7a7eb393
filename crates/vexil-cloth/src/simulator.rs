//! Cloth simulator: one physics step of the flag.
//!
//! Each step runs, in order:
//! 1. **Clamp**: bound the timestep (frame hitches must not explode the cloth)
//! 2. **Forces**: turbulent wind projected on last step's normals,
//!    click impulses, gravity
//! 3. **Integrate**: Verlet, velocity implied by position history
//! 4. **Relax**: `constraint_iterations` Gauss-Seidel passes
//! 5. **Restore**: pull boundary particles toward their rest shape
//! 6. **Commit**: copy positions into the render mesh, recompute normals
//!
//! There are no error paths: degenerate geometry is absorbed by the guards
//! in each phase.

use std::time::Instant;

use vexil_math::Vec3;
use vexil_mesh::normals::compute_vertex_normals;
use vexil_mesh::TriangleMesh;
use vexil_types::constants::{DEFAULT_FRAME_DT, MAX_CLOTH_DT};

use crate::impulse::ImpulseField;
use crate::network::ConstraintNetwork;
use crate::params::ClothParams;
use crate::wind::{project_on_normal, turbulent_wind};

/// Outcome of one physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Integration timestep actually used (seconds).
    pub dt: f32,
    /// Impulses that were live during the step.
    pub active_impulses: usize,
    /// Wall-clock time for the step (seconds).
    pub wall_time: f64,
}

/// Advances a [`ConstraintNetwork`] and mirrors it into a render mesh.
#[derive(Debug, Default)]
pub struct ClothSimulator {
    steps: u64,
}

impl ClothSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Caps the timestep at [`MAX_CLOTH_DT`]; a zero, negative or
    /// non-finite delta falls back to [`DEFAULT_FRAME_DT`].
    pub fn clamp_dt(delta: f32) -> f32 {
        if delta.is_finite() && delta > 0.0 {
            delta.min(MAX_CLOTH_DT)
        } else {
            DEFAULT_FRAME_DT
        }
    }

    /// Advances the network by exactly one step.
    ///
    /// `mesh` must map one-to-one onto the network's particles (see
    /// [`ConstraintNetwork::render_mesh`]); its positions and normals from
    /// the previous step drive the wind phase. `time_ms` is the
    /// monotonically increasing clock the wind pattern evolves with;
    /// `delta` is the elapsed time since the previous step in seconds.
    pub fn step(
        &mut self,
        network: &mut ConstraintNetwork,
        mesh: &mut TriangleMesh,
        impulses: &ImpulseField,
        params: &ClothParams,
        time_ms: f64,
        delta: f32,
    ) -> StepReport {
        debug_assert_eq!(network.len(), mesh.vertex_count());
        let start = Instant::now();

        // 1. Clamp
        let dt = Self::clamp_dt(delta);
        let dt_sq = dt * dt;

        // 2. Forces. Particles do not interact in this phase.
        let gravity = Vec3::new(0.0, -params.gravity, 0.0);
        for (i, particle) in network.particles_mut().iter_mut().enumerate() {
            let wind = turbulent_wind(
                mesh.pos_x[i],
                mesh.pos_y[i],
                time_ms,
                params.wind_strength,
                params.wind_speed,
            );
            particle.add_force(project_on_normal(wind, mesh.normal_vec3(i)));

            if !impulses.is_empty() {
                particle.add_force(impulses.force_at(particle.position));
            }

            particle.add_force(gravity * particle.mass());

            // 3. Integrate
            particle.integrate(dt_sq, params.damping);
        }

        // 4. Relax
        for _ in 0..params.constraint_iterations {
            network.relax();
        }

        // 5. Restore
        network.restore_edges(params.edge_pull());

        // 6. Commit
        for (i, particle) in network.particles().iter().enumerate() {
            mesh.set_position(i, particle.position);
        }
        compute_vertex_normals(mesh);
        mesh.needs_update = true;

        self.steps += 1;
        let report = StepReport {
            dt,
            active_impulses: impulses.len(),
            wall_time: start.elapsed().as_secs_f64(),
        };
        tracing::trace!(
            step = self.steps,
            dt = report.dt,
            impulses = report.active_impulses,
            "cloth step"
        );
        report
    }
}
