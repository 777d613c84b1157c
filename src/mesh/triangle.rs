//! Borrowed triangle views.

use nalgebra::{Point3, Vector3};

use super::index::{HalfEdgeId, TriangleId, VertexId};
use super::packed::PackedNormal;
use super::triangulated::TriangulatedMesh;
use super::vertices::{ExactVertices, VertexStore};

/// A lightweight view of one triangle: its three half-edges plus the mesh
/// they belong to.
pub struct Triangle<'a, S: VertexStore = ExactVertices> {
    mesh: &'a TriangulatedMesh<S>,
    id: TriangleId,
}

impl<S: VertexStore> Clone for Triangle<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: VertexStore> Copy for Triangle<'_, S> {}

impl<S: VertexStore> std::fmt::Debug for Triangle<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Triangle")
            .field("id", &self.id)
            .field("vertices", &self.vertex_ids())
            .finish()
    }
}

impl<'a, S: VertexStore> Triangle<'a, S> {
    pub(crate) fn new(mesh: &'a TriangulatedMesh<S>, id: TriangleId) -> Self {
        Self { mesh, id }
    }

    /// The triangle's id.
    #[inline]
    pub fn id(&self) -> TriangleId {
        self.id
    }

    /// The face id it was submitted under.
    pub fn face_id(&self) -> i32 {
        self.mesh.face_id_of(self.id)
    }

    /// Whether the triangle was rejected from the adjacency graph.
    pub fn is_faulty(&self) -> bool {
        self.mesh.is_faulty(self.id)
    }

    /// The three half-edges in winding order.
    pub fn halfedges(&self) -> [HalfEdgeId; 3] {
        self.mesh.triangle_cycle(self.id.first_halfedge())
    }

    /// The three corner vertices in winding order.
    pub fn vertex_ids(&self) -> [VertexId; 3] {
        self.halfedges().map(|he| self.mesh.start(he))
    }

    /// The three raw `(start, end)` edges in winding order.
    pub fn edges(&self) -> [(VertexId, VertexId); 3] {
        self.halfedges()
            .map(|he| (self.mesh.start(he), self.mesh.end(he)))
    }

    /// The three corner positions in winding order.
    pub fn positions(&self) -> [Point3<f64>; 3] {
        self.vertex_ids().map(|v| *self.mesh.position(v))
    }

    /// Flat normal of the current winding.
    pub fn normal(&self) -> Vector3<f64> {
        self.mesh.flat_normal(self.id.first_halfedge())
    }

    /// Packed flat normal.
    pub fn packed_normal(&self) -> PackedNormal {
        PackedNormal::pack(&self.normal())
    }

    /// Shading normals stored at each corner, in winding order.
    pub fn corner_normals(&self) -> [Vector3<f64>; 3] {
        self.halfedges().map(|he| *self.mesh.normal(he))
    }

    /// Packed shading normals, in winding order.
    pub fn packed_corner_normals(&self) -> [PackedNormal; 3] {
        self.corner_normals().map(|n| PackedNormal::pack(&n))
    }
}
