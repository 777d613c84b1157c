//! Core mesh data structures.
//!
//! This module provides the half-edge triangle mesh that tessellated geometry
//! is streamed into, plus its collaborators.
//!
//! # Overview
//!
//! The primary type is [`TriangulatedMesh`]. Triangles are added one at a
//! time; each one becomes three [`HalfEdge`]s linked into a cycle, and
//! half-edges sharing an undirected vertex pair are linked as adjacent.
//! Triangles that would make an edge non-manifold are kept aside as faulty.
//!
//! # Identities
//!
//! - [`VertexId`], [`HalfEdgeId`], [`TriangleId`] - arena indices
//! - [`EdgeId`] - directed edge, `(start << 32) | end`
//! - [`EdgeKey`] - undirected edge, `(max << 32) | min`
//!
//! # Construction
//!
//! ```
//! use shellmesh::mesh::TriangulatedMesh;
//! use nalgebra::Point3;
//!
//! let mut mesh = TriangulatedMesh::new();
//! let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
//! mesh.add_triangle(a, b, c, 0).unwrap();
//!
//! assert_eq!(mesh.triangle_count(), 1);
//! ```

mod bounds;
mod halfedge;
mod index;
mod packed;
mod triangle;
mod triangulated;
mod vertices;

pub use bounds::{Aabb, BoundsAccumulator};
pub use halfedge::{EdgePair, HalfEdge};
pub use index::{EdgeId, EdgeKey, HalfEdgeId, TriangleId, VertexId};
pub use packed::PackedNormal;
pub use triangle::Triangle;
pub use triangulated::{newell_normal, FaultReason, FaultyTriangle, TriangulatedMesh};
pub use vertices::{ExactVertices, VertexStore, WeldedVertices};
