//! Constraint network: the cloth's fixed topology.
//!
//! A `(W+1) × (H+1)` particle grid joined by horizontal and vertical
//! distance constraints, plus four boundary index sets used by the
//! edge-restoration pull. Topology never changes after construction;
//! only particle state mutates.
//!
//! ## Indexing
//!
//! ```text
//! (0,0) ── (1,0) ── … ── (W,0)      top
//!   │        │              │
//! (0,1) ── (1,1) ── … ── (W,1)
//!   │        │              │
//! (0,H) ── (1,H) ── … ── (W,H)      bottom
//! ```
//! Particle `(i, j)` lives at index `i + j·(W+1)`.

use vexil_math::Vec3;
use vexil_mesh::generators::flag_grid;
use vexil_mesh::normals::compute_vertex_normals;
use vexil_mesh::TriangleMesh;
use vexil_types::{ParticleId, VexilError, VexilResult};

use crate::params::FlagDimensions;
use crate::particle::Particle;

/// A pairwise rest-length constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConstraint {
    pub a: ParticleId,
    pub b: ParticleId,
    pub rest_length: f32,
}

impl DistanceConstraint {
    /// Moves both endpoints toward `rest_length` along their axis.
    ///
    /// The correction `(1 - rest/d)` is split by inverse-mass share, which
    /// is an even 50/50 for homogeneous mass. Coincident endpoints are
    /// left untouched.
    pub fn satisfy(&self, particles: &mut [Particle]) {
        let (p1, p2) = pair_mut(particles, self.a.index(), self.b.index());

        let diff = p2.position - p1.position;
        let current = diff.length();
        if current == 0.0 {
            return;
        }

        let w_sum = p1.inv_mass() + p2.inv_mass();
        if w_sum == 0.0 {
            return;
        }

        let correction = diff * (1.0 - self.rest_length / current);
        p1.position += correction * (p1.inv_mass() / w_sum);
        p2.position -= correction * (p2.inv_mass() / w_sum);
    }
}

/// Borrows two distinct particles mutably.
fn pair_mut(particles: &mut [Particle], a: usize, b: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(a, b, "constraint endpoints must differ");
    if a < b {
        let (lo, hi) = particles.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = particles.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

/// Boundary particle sets. Corners belong to `top`/`bottom` only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeSets {
    pub top: Vec<ParticleId>,
    pub bottom: Vec<ParticleId>,
    pub left: Vec<ParticleId>,
    pub right: Vec<ParticleId>,
}

impl EdgeSets {
    /// All four sets in application order.
    pub fn all(&self) -> [&[ParticleId]; 4] {
        [
            self.top.as_slice(),
            self.bottom.as_slice(),
            self.left.as_slice(),
            self.right.as_slice(),
        ]
    }

    /// Total number of boundary particles.
    pub fn len(&self) -> usize {
        self.all().iter().map(|set| set.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The cloth's particle grid and constraint topology.
#[derive(Debug, Clone)]
pub struct ConstraintNetwork {
    dims: FlagDimensions,
    particles: Vec<Particle>,
    constraints: Vec<DistanceConstraint>,
    edges: EdgeSets,
}

impl ConstraintNetwork {
    /// Builds the grid at its rest shape.
    ///
    /// Constraint insertion order is fixed: for every cell, its vertical
    /// then horizontal edge from the cell's top-left particle; then the
    /// right column's vertical edges; then the bottom row's horizontal
    /// edges. Relaxation visits them in this order.
    pub fn new(dims: FlagDimensions, mass: f32) -> VexilResult<Self> {
        dims.validate()?;
        if !(mass.is_finite() && mass > 0.0) {
            return Err(VexilError::InvalidConfig(format!(
                "particle mass must be positive, got {mass}"
            )));
        }

        let (w, h) = (dims.cols, dims.rows);
        let mut particles = Vec::with_capacity((w + 1) * (h + 1));
        for j in 0..=h {
            for i in 0..=w {
                let u = i as f32 / w as f32;
                let v = j as f32 / h as f32;
                particles.push(Particle::new(dims.surface_point(u, v), mass));
            }
        }

        let idx = |i: usize, j: usize| ParticleId::from(i + j * (w + 1));
        let rest_h = dims.horizontal_rest_length();
        let rest_v = dims.vertical_rest_length();
        let link = |a, b, rest_length| DistanceConstraint { a, b, rest_length };

        let mut constraints = Vec::with_capacity(2 * w * h + w + h);
        for j in 0..h {
            for i in 0..w {
                constraints.push(link(idx(i, j), idx(i, j + 1), rest_v));
                constraints.push(link(idx(i, j), idx(i + 1, j), rest_h));
            }
        }
        for j in 0..h {
            constraints.push(link(idx(w, j), idx(w, j + 1), rest_v));
        }
        for i in 0..w {
            constraints.push(link(idx(i, h), idx(i + 1, h), rest_h));
        }

        let edges = EdgeSets {
            top: (0..=w).map(|i| idx(i, 0)).collect(),
            bottom: (0..=w).map(|i| idx(i, h)).collect(),
            left: (1..h).map(|j| idx(0, j)).collect(),
            right: (1..h).map(|j| idx(w, j)).collect(),
        };

        Ok(Self {
            dims,
            particles,
            constraints,
            edges,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> &FlagDimensions {
        &self.dims
    }

    /// Horizontal segment count (W).
    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Vertical segment count (H).
    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    /// Flat index of grid particle `(i, j)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i + j * (self.dims.cols + 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn particle(&self, id: ParticleId) -> &Particle {
        &self.particles[id.index()]
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn constraints(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    #[inline]
    pub fn edges(&self) -> &EdgeSets {
        &self.edges
    }

    /// Position of grid particle `(i, j)`.
    #[inline]
    pub fn grid_position(&self, i: usize, j: usize) -> Vec3 {
        self.particles[self.index(i, j)].position
    }

    /// Sets every particle's mass and inverse mass.
    pub fn set_mass(&mut self, mass: f32) -> VexilResult<()> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(VexilError::InvalidConfig(format!(
                "particle mass must be positive, got {mass}"
            )));
        }
        for p in &mut self.particles {
            p.set_mass(mass);
        }
        Ok(())
    }

    /// One Gauss-Seidel pass over every constraint in insertion order.
    pub fn relax(&mut self) {
        for c in &self.constraints {
            c.satisfy(&mut self.particles);
        }
    }

    /// Pulls every boundary particle a `fraction` of the way back to its
    /// rest position. All four sets get the same treatment.
    pub fn restore_edges(&mut self, fraction: f32) {
        for set in self.edges.all() {
            for id in set {
                let p = &mut self.particles[id.index()];
                p.position += (p.rest - p.position) * fraction;
            }
        }
    }

    /// Largest particle offset from its rest position.
    pub fn max_displacement(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| p.displacement().length())
            .fold(0.0, f32::max)
    }

    /// Positions flattened as `[x0, y0, z0, x1, ...]`.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.particles
            .iter()
            .flat_map(|p| p.position.to_array())
            .collect()
    }

    /// Builds a render mesh whose vertices map one-to-one onto the particles.
    pub fn render_mesh(&self) -> TriangleMesh {
        let mut mesh = flag_grid(
            self.dims.cols,
            self.dims.rows,
            self.dims.width,
            self.dims.height,
        );
        for (i, p) in self.particles.iter().enumerate() {
            mesh.set_position(i, p.position);
        }
        compute_vertex_normals(&mut mesh);
        mesh.needs_update = true;
        mesh
    }
}
