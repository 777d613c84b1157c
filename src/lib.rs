//! # Shellmesh
//!
//! Half-edge triangle meshes for tessellated boundary representations.
//!
//! Shellmesh collects the triangles a tessellator emits, one at a time, into
//! a connected half-edge structure, then prepares the result for rendering:
//! reconciling triangle windings across each shell and computing
//! crease-aware shading normals.
//!
//! ## Features
//!
//! - **Streaming construction**: triangles are linked to their neighbours as
//!   they arrive; non-manifold and degenerate input is set aside, not fatal
//! - **Vertex welding**: exact or tolerance-based deduplication of positions
//! - **Winding unification**: outward-facing, consistent orientation for
//!   every connected shell
//! - **Normal smoothing**: corner normals averaged within smoothing groups,
//!   with creases above a configurable angle kept sharp
//! - **Compact normals**: two-byte octahedral encoding for upload
//!
//! ## Quick Start
//!
//! ```
//! use shellmesh::prelude::*;
//! use nalgebra::Point3;
//!
//! let corners = [
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(1.0, -1.0, -1.0),
//!     Point3::new(-1.0, 1.0, -1.0),
//!     Point3::new(-1.0, -1.0, 1.0),
//! ];
//!
//! let mut mesh = TriangulatedMesh::new();
//! for (face, [a, b, c]) in [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]].into_iter().enumerate() {
//!     mesh.add_triangle_from_positions([corners[a], corners[b], corners[c]], face as i32)
//!         .unwrap();
//! }
//!
//! let report = finalize(&mut mesh, &NormalOptions::default()).unwrap();
//! assert_eq!(report.orientation.shells, 1);
//!
//! for (face_id, triangles) in mesh.faces() {
//!     for &t in triangles {
//!         let tri = mesh.triangle(t);
//!         println!("face {}: {:?} {:?}", face_id, tri.vertex_ids(), tri.packed_corner_normals());
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

#[cfg(test)]
pub(crate) mod test_shapes;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use shellmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        balance_normals, finalize, finalize_all, unify_face_orientation, BatchOptions,
        NormalOptions,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        EdgeId, EdgeKey, ExactVertices, HalfEdgeId, PackedNormal, Triangle, TriangleId,
        TriangulatedMesh, VertexId, VertexStore, WeldedVertices,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
