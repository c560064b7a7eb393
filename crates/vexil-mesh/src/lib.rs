//! # vexil-mesh
//!
//! Render-facing triangle mesh with Structure-of-Arrays (SoA) layout.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: Positions, normals, UVs and topology in contiguous
//!   SoA buffers, plus the "needs update" signal the host renderer polls.
//! - [`generators::flag_grid`]: The rectangular grid the cloth is laid on.
//! - [`normals::compute_vertex_normals`]: Area-weighted smooth normals.

pub mod generators;
pub mod mesh;
pub mod normals;

pub use mesh::TriangleMesh;
