//! Mesh processing algorithms.
//!
//! These run on a fully built [`TriangulatedMesh`](crate::mesh::TriangulatedMesh),
//! in this order:
//!
//! - **Orientation**: unify triangle winding across each connected shell
//! - **Normals**: average corner normals within smoothing groups, keeping
//!   creases sharp
//!
//! [`pipeline`] chains the two and can process independent meshes in
//! parallel.

pub mod normals;
pub mod orient;
pub mod pipeline;

pub use normals::{balance_normals, NormalOptions, SmoothingReport};
pub use orient::{unify_face_orientation, OrientationReport};
pub use pipeline::{finalize, finalize_all, BatchOptions, FinalizeReport};
