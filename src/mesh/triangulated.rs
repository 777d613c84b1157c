//! The triangle mesh builder.
//!
//! [`TriangulatedMesh`] accepts triangles one at a time, in any order, and
//! links them into a half-edge graph as they arrive. Every undirected edge may
//! be claimed by at most two triangles. A triangle that would be the third is
//! rolled back and kept aside as faulty rather than failing the build.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;
use nalgebra::{Point3, Vector3};

use super::bounds::{Aabb, BoundsAccumulator};
use super::halfedge::{EdgePair, HalfEdge};
use super::index::{EdgeId, EdgeKey, HalfEdgeId, TriangleId, VertexId};
use super::triangle::Triangle;
use super::vertices::{ExactVertices, VertexStore};
use crate::error::{MeshError, Result};

/// Why a triangle was kept out of the adjacency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultReason {
    /// The undirected edge already had two triangles.
    NonManifoldEdge {
        /// The overfull edge.
        key: EdgeKey,
    },
    /// Two corners share a vertex index.
    Degenerate,
}

/// Diagnostic record for a rejected triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultyTriangle {
    /// The rejected triangle.
    pub triangle: TriangleId,
    /// The face id it was submitted under.
    pub face_id: i32,
    /// Why it was rejected.
    pub reason: FaultReason,
}

#[derive(Debug, Clone, Copy)]
struct TriangleRecord {
    face_id: i32,
    faulty: bool,
}

/// Compute a unit normal with Newell's method.
///
/// Degenerate (zero-area) input yields the zero vector.
pub fn newell_normal(points: &[Point3<f64>; 3]) -> Vector3<f64> {
    let mut n = Vector3::zeros();
    for i in 0..3 {
        let p = &points[i];
        let q = &points[(i + 1) % 3];
        n.x += (p.y - q.y) * (p.z + q.z);
        n.y += (p.x + q.x) * (p.z - q.z);
        n.z += (p.x - q.x) * (p.y + q.y);
    }
    n.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}

/// A triangle soup being linked into a half-edge mesh.
///
/// Half-edges live in one arena; triangle `t` owns slots `3t..3t + 3` for its
/// whole life, including after its winding is reversed.
#[derive(Debug, Clone)]
pub struct TriangulatedMesh<S: VertexStore = ExactVertices> {
    vertices: S,
    bounds: BoundsAccumulator,

    halfedges: Vec<HalfEdge>,
    triangles: Vec<TriangleRecord>,

    /// Undirected edge -> claiming half-edges.
    pairs: HashMap<EdgeKey, EdgePair>,

    /// Face id -> accepted triangles, in first-seen face order.
    faces: Vec<(i32, Vec<TriangleId>)>,
    face_slots: HashMap<i32, usize>,

    faults: Vec<FaultyTriangle>,

    /// Accepted half-edge whose start vertex is highest in Z.
    extreme: HalfEdgeId,
}

impl Default for TriangulatedMesh<ExactVertices> {
    fn default() -> Self {
        Self::new()
    }
}

impl TriangulatedMesh<ExactVertices> {
    /// Create an empty mesh with an exact-match vertex store.
    pub fn new() -> Self {
        Self::with_store(ExactVertices::new(), 0)
    }

    /// Create an empty mesh sized for roughly `face_count` triangles.
    pub fn with_capacity(face_count: usize) -> Self {
        Self::with_store(ExactVertices::with_capacity(face_count / 2), face_count)
    }
}

impl<S: VertexStore> TriangulatedMesh<S> {
    /// Create an empty mesh over the given vertex store.
    ///
    /// `face_count` only pre-sizes internal tables.
    pub fn with_store(vertices: S, face_count: usize) -> Self {
        // A closed triangle mesh has 3F/2 edges
        let edge_count = face_count * 3 / 2;
        let mut bounds = BoundsAccumulator::new();
        for p in vertices.positions() {
            bounds.include(p);
        }

        Self {
            vertices,
            bounds,
            halfedges: Vec::with_capacity(face_count * 3),
            triangles: Vec::with_capacity(face_count),
            pairs: HashMap::with_capacity(edge_count),
            faces: Vec::new(),
            face_slots: HashMap::with_capacity(face_count),
            faults: Vec::new(),
            extreme: HalfEdgeId::invalid(),
        }
    }

    // ==================== Construction ====================

    /// Add a vertex, or return the id of an equal one already present.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId {
        if let Some(id) = self.vertices.find(&position) {
            return id;
        }
        self.bounds.include(&position);
        self.vertices.insert(position)
    }

    /// Add a triangle over three existing vertices.
    ///
    /// The triangle always receives an id. If one of its edges is already
    /// shared by two triangles, or two corners coincide, it is recorded in
    /// [`faults`](Self::faults) and left out of the adjacency graph and the
    /// face map.
    ///
    /// # Errors
    /// [`MeshError::InvalidVertexIndex`] if a vertex id was never assigned.
    pub fn add_triangle(
        &mut self,
        v0: VertexId,
        v1: VertexId,
        v2: VertexId,
        face_id: i32,
    ) -> Result<TriangleId> {
        let tri = TriangleId::new(self.triangles.len());
        for v in [v0, v1, v2] {
            if !v.is_valid() || v.index() >= self.vertices.len() {
                return Err(MeshError::InvalidVertexIndex {
                    triangle: tri.index(),
                    vertex: v.index(),
                });
            }
        }

        let base = tri.first_halfedge().index();
        for (i, start) in [v0, v1, v2].into_iter().enumerate() {
            let mut he = HalfEdge::new(start);
            he.next = HalfEdgeId::new(base + (i + 1) % 3);
            self.halfedges.push(he);
        }

        let normal = newell_normal(&self.cycle_positions(tri.first_halfedge()));
        for he in &mut self.halfedges[base..base + 3] {
            he.normal = normal;
        }

        let fault = if v0 == v1 || v1 == v2 || v2 == v0 {
            Some(FaultReason::Degenerate)
        } else {
            self.register_triangle(tri).err()
        };

        self.triangles.push(TriangleRecord {
            face_id,
            faulty: fault.is_some(),
        });

        match fault {
            Some(reason) => {
                debug!(
                    "rejecting triangle {:?} ({:?}, {:?}, {:?}) of face {}: {:?}",
                    tri, v0, v1, v2, face_id, reason
                );
                self.faults.push(FaultyTriangle {
                    triangle: tri,
                    face_id,
                    reason,
                });
            }
            None => {
                let slot = *self.face_slots.entry(face_id).or_insert_with(|| {
                    self.faces.push((face_id, Vec::new()));
                    self.faces.len() - 1
                });
                self.faces[slot].1.push(tri);
                self.track_extreme(tri);
            }
        }

        Ok(tri)
    }

    /// Add a triangle from raw positions, welding its corners first.
    pub fn add_triangle_from_positions(
        &mut self,
        positions: [Point3<f64>; 3],
        face_id: i32,
    ) -> Result<TriangleId> {
        let [p0, p1, p2] = positions;
        let v0 = self.add_vertex(p0);
        let v1 = self.add_vertex(p1);
        let v2 = self.add_vertex(p2);
        self.add_triangle(v0, v1, v2, face_id)
    }

    /// Register all three edges, or none of them.
    fn register_triangle(&mut self, tri: TriangleId) -> std::result::Result<(), FaultReason> {
        let hes = self.triangle_cycle(tri.first_halfedge());
        for (i, &he) in hes.iter().enumerate() {
            if let Err(key) = self.add_edge(he) {
                for &done in &hes[..i] {
                    self.remove_edge(done);
                }
                return Err(FaultReason::NonManifoldEdge { key });
            }
        }
        Ok(())
    }

    fn add_edge(&mut self, he: HalfEdgeId) -> std::result::Result<(), EdgeKey> {
        let key = self.edge_key(he);
        match self.pairs.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(EdgePair::new(he));
            }
            Entry::Occupied(mut slot) => {
                let pair = slot.get_mut();
                if pair.is_full() {
                    return Err(key);
                }
                pair.set_second(he);
                let first = pair.first();
                self.halfedges[first.index()].adjacent = he;
                self.halfedges[he.index()].adjacent = first;
            }
        }
        Ok(())
    }

    fn remove_edge(&mut self, he: HalfEdgeId) {
        let key = self.edge_key(he);
        let Some(pair) = self.pairs.get_mut(&key) else {
            return;
        };
        let partner = pair.other(he);
        if pair.remove(he) {
            self.pairs.remove(&key);
        }
        if let Some(partner) = partner {
            self.halfedges[partner.index()].adjacent = HalfEdgeId::invalid();
        }
        self.halfedges[he.index()].adjacent = HalfEdgeId::invalid();
    }

    fn track_extreme(&mut self, tri: TriangleId) {
        for he in self.triangle_cycle(tri.first_halfedge()) {
            let z = self.position(self.start(he)).z;
            if !self.extreme.is_valid() || z > self.position(self.start(self.extreme)).z {
                self.extreme = he;
            }
        }
    }

    // ==================== Accessors ====================

    /// Number of distinct vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of accepted (non-faulty) triangles.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|(_, tris)| tris.len()).sum()
    }

    /// Number of half-edges in the arena, faulty triangles included.
    #[inline]
    pub fn halfedge_count(&self) -> usize {
        self.halfedges.len()
    }

    /// The vertex store.
    #[inline]
    pub fn vertex_store(&self) -> &S {
        &self.vertices
    }

    /// Vertex positions in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3<f64>> + '_ {
        self.vertices.positions().iter()
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertices.positions()[v.index()]
    }

    /// Get a half-edge record.
    #[inline]
    pub fn halfedge(&self, he: HalfEdgeId) -> &HalfEdge {
        &self.halfedges[he.index()]
    }

    /// Bounding box of all inserted vertices.
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.bounds.aabb()
    }

    /// Centre of the bounding box (not the vertex average).
    pub fn centroid(&self) -> Option<Point3<f64>> {
        self.bounding_box().map(|bb| bb.center())
    }

    /// Accepted half-edge whose start vertex has the largest Z coordinate.
    #[inline]
    pub fn extreme_edge(&self) -> Option<HalfEdgeId> {
        self.extreme.is_valid().then_some(self.extreme)
    }

    /// The half-edges claiming an undirected edge.
    pub fn edge_pair(&self, key: EdgeKey) -> Option<&EdgePair> {
        self.pairs.get(&key)
    }

    /// All registered undirected edges.
    pub fn edge_pairs(&self) -> impl Iterator<Item = (EdgeKey, &EdgePair)> + '_ {
        self.pairs.iter().map(|(&k, p)| (k, p))
    }

    // ==================== Edge Queries ====================

    /// Start vertex of a half-edge.
    #[inline]
    pub fn start(&self, he: HalfEdgeId) -> VertexId {
        self.halfedge(he).start
    }

    /// End vertex of a half-edge.
    #[inline]
    pub fn end(&self, he: HalfEdgeId) -> VertexId {
        self.start(self.next(he))
    }

    /// Next half-edge around the triangle.
    #[inline]
    pub fn next(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.halfedge(he).next
    }

    /// The neighbouring triangle's half-edge across this edge.
    #[inline]
    pub fn adjacent(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        let adj = self.halfedge(he).adjacent;
        adj.is_valid().then_some(adj)
    }

    /// Shading normal stored at the start corner of a half-edge.
    #[inline]
    pub fn normal(&self, he: HalfEdgeId) -> &Vector3<f64> {
        &self.halfedge(he).normal
    }

    /// Whether the half-edge's winding has been finalized.
    #[inline]
    pub fn is_frozen(&self, he: HalfEdgeId) -> bool {
        self.halfedge(he).frozen
    }

    /// Directed identity of a half-edge.
    #[inline]
    pub fn edge_id(&self, he: HalfEdgeId) -> EdgeId {
        EdgeId::new(self.start(he), self.end(he))
    }

    /// Undirected identity of a half-edge.
    #[inline]
    pub fn edge_key(&self, he: HalfEdgeId) -> EdgeKey {
        EdgeKey::new(self.start(he), self.end(he))
    }

    /// The three half-edges of a triangle in cycle order, starting at `he`.
    #[inline]
    pub fn triangle_cycle(&self, he: HalfEdgeId) -> [HalfEdgeId; 3] {
        let he1 = self.next(he);
        [he, he1, self.next(he1)]
    }

    fn cycle_positions(&self, he: HalfEdgeId) -> [Point3<f64>; 3] {
        self.triangle_cycle(he).map(|e| *self.position(self.start(e)))
    }

    /// Flat normal of the triangle containing `he`, from its current winding.
    pub fn flat_normal(&self, he: HalfEdgeId) -> Vector3<f64> {
        newell_normal(&self.cycle_positions(he))
    }

    /// Angle between the flat normals of the two triangles sharing this
    /// edge, or `None` on a boundary.
    pub fn dihedral_angle(&self, he: HalfEdgeId) -> Option<f64> {
        self.adjacent(he)
            .map(|adj| self.flat_normal(he).angle(&self.flat_normal(adj)))
    }

    /// Whether the triangle containing `he` faces away from the centroid.
    ///
    /// This is a visibility heuristic: it is reliable for shells that are
    /// star-shaped around the centroid, not for arbitrary concave ones.
    pub fn is_facing_outward(&self, he: HalfEdgeId) -> bool {
        let Some(centroid) = self.centroid() else {
            return false;
        };
        let out = self.position(self.start(he)) - centroid;
        self.flat_normal(he).dot(&out) > 0.0
    }

    // ==================== Triangles ====================

    /// View of one triangle, faulty or not.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> Triangle<'_, S> {
        Triangle::new(self, id)
    }

    /// Whether a triangle was rejected.
    #[inline]
    pub fn is_faulty(&self, id: TriangleId) -> bool {
        self.triangles[id.index()].faulty
    }

    /// The face id a triangle was submitted under.
    #[inline]
    pub fn face_id_of(&self, id: TriangleId) -> i32 {
        self.triangles[id.index()].face_id
    }

    /// Iterate over accepted triangles, grouped by face.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle<'_, S>> + '_ {
        self.faces
            .iter()
            .flat_map(move |(_, tris)| tris.iter().map(move |&t| self.triangle(t)))
    }

    /// Accepted triangle ids in insertion order.
    pub fn accepted_triangle_ids(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.triangles
            .iter()
            .enumerate()
            .filter(|(_, rec)| !rec.faulty)
            .map(|(i, _)| TriangleId::new(i))
    }

    /// Faces and their accepted triangles, in first-seen order.
    pub fn faces(&self) -> impl Iterator<Item = (i32, &[TriangleId])> + '_ {
        self.faces.iter().map(|(id, tris)| (*id, tris.as_slice()))
    }

    /// Accepted triangles of one face.
    pub fn face(&self, face_id: i32) -> Option<&[TriangleId]> {
        self.face_slots
            .get(&face_id)
            .map(|&slot| self.faces[slot].1.as_slice())
    }

    /// Diagnostics for every rejected triangle.
    #[inline]
    pub fn faults(&self) -> &[FaultyTriangle] {
        &self.faults
    }

    /// Views of every rejected triangle.
    pub fn faulty_triangles(&self) -> impl Iterator<Item = Triangle<'_, S>> + '_ {
        self.faults.iter().map(move |f| self.triangle(f.triangle))
    }

    // ==================== Mutation ====================

    /// Reverse the winding of the triangle containing `he`.
    ///
    /// Start vertices rotate one step and `next` links run the other way, so
    /// every arena slot keeps its undirected edge. Normals are negated.
    /// Frozen triangles are left alone and `false` is returned.
    pub(crate) fn reverse_triangle(&mut self, he: HalfEdgeId) -> bool {
        if self.is_frozen(he) {
            return false;
        }
        let [e0, e1, e2] = self.triangle_cycle(he);
        let (s0, s1, s2) = (self.start(e0), self.start(e1), self.start(e2));

        self.halfedges[e0.index()].start = s1;
        self.halfedges[e1.index()].start = s2;
        self.halfedges[e2.index()].start = s0;

        self.halfedges[e2.index()].next = e1;
        self.halfedges[e1.index()].next = e0;
        self.halfedges[e0.index()].next = e2;

        for e in [e0, e1, e2] {
            let n = &mut self.halfedges[e.index()].normal;
            *n = -*n;
        }
        true
    }

    /// Mark all three edges of the triangle containing `he` frozen.
    pub(crate) fn freeze_triangle(&mut self, he: HalfEdgeId) {
        for e in self.triangle_cycle(he) {
            self.halfedges[e.index()].frozen = true;
        }
    }

    pub(crate) fn set_normal(&mut self, he: HalfEdgeId, normal: Vector3<f64>) {
        self.halfedges[he.index()].normal = normal;
    }

    // ==================== Validation ====================

    /// Check that all connectivity is consistent.
    ///
    /// Every triangle must be a 3-cycle over its own arena slots, adjacency
    /// must be symmetric between edges of equal key, every accepted edge must
    /// be registered under its key, and no faulty edge may be registered or
    /// linked.
    pub fn is_valid(&self) -> bool {
        for (t, rec) in self.triangles.iter().enumerate() {
            let first = TriangleId::new(t).first_halfedge();
            let cycle = self.triangle_cycle(first);
            if self.next(cycle[2]) != first {
                return false;
            }
            if cycle.iter().any(|e| e.triangle().index() != t) {
                return false;
            }

            for he in cycle {
                let key = self.edge_key(he);
                let registered = self.pairs.get(&key).is_some_and(|p| p.iter().any(|e| e == he));
                if rec.faulty {
                    if registered || self.adjacent(he).is_some() {
                        return false;
                    }
                    continue;
                }
                if !registered {
                    return false;
                }
                let full = self.pairs[&key].is_full();
                match self.adjacent(he) {
                    Some(adj) => {
                        if !full || self.adjacent(adj) != Some(he) || self.edge_key(adj) != key {
                            return false;
                        }
                    }
                    None => {
                        if full {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_shapes;

    fn single_triangle() -> TriangulatedMesh {
        let mut mesh = TriangulatedMesh::new();
        mesh.add_triangle_from_positions(
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            0,
        )
        .unwrap();
        mesh
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = TriangulatedMesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.bounding_box().is_none());
        assert!(mesh.centroid().is_none());
        assert!(mesh.extreme_edge().is_none());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_add_vertex_deduplicates() {
        let mut mesh = TriangulatedMesh::new();
        let a = mesh.add_vertex(Point3::new(1.0, 2.0, 3.0));
        let b = mesh.add_vertex(Point3::new(4.0, 5.0, 6.0));
        let c = mesh.add_vertex(Point3::new(1.0, 2.0, 3.0));

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn test_newell_matches_cross_product() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.5),
        ];
        let cross = (pts[1] - pts[0]).cross(&(pts[2] - pts[0])).normalize();
        assert!((newell_normal(&pts) - cross).norm() < 1e-12);
    }

    #[test]
    fn test_newell_degenerate_is_zero() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let collinear = [p, Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 3.0, 3.0)];
        assert_eq!(newell_normal(&[p, p, p]), Vector3::zeros());
        assert_eq!(newell_normal(&collinear), Vector3::zeros());
    }

    #[test]
    fn test_single_triangle() {
        let mesh = single_triangle();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.halfedge_count(), 3);
        assert!(mesh.is_valid());

        let tri = mesh.triangles().next().unwrap();
        for he in tri.halfedges() {
            assert!(mesh.adjacent(he).is_none());
            assert!((mesh.normal(he) - Vector3::z()).norm() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_vertex_index() {
        let mut mesh = single_triangle();
        let err = mesh
            .add_triangle(VertexId::new(0), VertexId::new(1), VertexId::new(9), 0)
            .unwrap_err();
        assert_eq!(
            err,
            MeshError::InvalidVertexIndex {
                triangle: 1,
                vertex: 9
            }
        );
        // Nothing was half-built
        assert_eq!(mesh.halfedge_count(), 3);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_shared_edge_links_adjacent() {
        let mut mesh = TriangulatedMesh::new();
        let v: Vec<VertexId> = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
        .into_iter()
        .map(|p| mesh.add_vertex(p))
        .collect();

        mesh.add_triangle(v[0], v[1], v[2], 7).unwrap();
        mesh.add_triangle(v[0], v[2], v[3], 7).unwrap();

        let key = EdgeKey::new(v[0], v[2]);
        let pair = mesh.edge_pair(key).unwrap();
        let second = pair.second().unwrap();
        assert_eq!(mesh.adjacent(pair.first()), Some(second));
        assert_eq!(mesh.adjacent(second), Some(pair.first()));
        // Consistent winding runs the shared edge in opposite directions
        assert_eq!(mesh.edge_id(pair.first()).reversed(), mesh.edge_id(second));
        assert_eq!(mesh.face(7).unwrap().len(), 2);
        assert_eq!(mesh.dihedral_angle(pair.first()), Some(0.0));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_third_claimant_is_faulty_and_rolled_back() {
        let mut mesh = TriangulatedMesh::new();
        let v: Vec<VertexId> = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(5.0, 5.0, 5.0),
        ]
        .into_iter()
        .map(|p| mesh.add_vertex(p))
        .collect();

        mesh.add_triangle(v[0], v[1], v[2], 0).unwrap();
        mesh.add_triangle(v[1], v[0], v[3], 0).unwrap();
        let pairs_before = mesh.edge_pairs().count();

        // (5, 0) is new and registers, then (0, 1) is overfull
        let bad = mesh.add_triangle(v[5], v[0], v[1], 1).unwrap();

        assert!(mesh.is_faulty(bad));
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.faults().len(), 1);
        assert_eq!(
            mesh.faults()[0].reason,
            FaultReason::NonManifoldEdge {
                key: EdgeKey::new(v[0], v[1])
            }
        );
        assert!(mesh.face(1).is_none());
        assert!(mesh.edge_pair(EdgeKey::new(v[5], v[0])).is_none());
        assert_eq!(mesh.edge_pairs().count(), pairs_before);

        // A later triangle can still use the rolled-back edge
        let ok = mesh.add_triangle(v[4], v[5], v[0], 2).unwrap();
        assert!(!mesh.is_faulty(ok));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_rollback_clears_partner_link() {
        let mut mesh = TriangulatedMesh::new();
        let v: Vec<VertexId> = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
        ]
        .into_iter()
        .map(|p| mesh.add_vertex(p))
        .collect();

        mesh.add_triangle(v[0], v[1], v[2], 0).unwrap();
        mesh.add_triangle(v[1], v[0], v[3], 0).unwrap();

        // (2, 1) pairs with the lone edge (1, 2), then (1, 0) is overfull
        let bad = mesh.add_triangle(v[2], v[1], v[0], 1).unwrap();
        assert!(mesh.is_faulty(bad));

        let lone = HalfEdgeId::new(1);
        assert_eq!(mesh.edge_id(lone), EdgeId::new(v[1], v[2]));
        assert!(mesh.adjacent(lone).is_none());
        let pair = mesh.edge_pair(EdgeKey::new(v[1], v[2])).unwrap();
        assert_eq!(pair.first(), lone);
        assert!(!pair.is_full());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_degenerate_triangle_is_faulty() {
        let mut mesh = single_triangle();
        let t = mesh
            .add_triangle(VertexId::new(0), VertexId::new(0), VertexId::new(1), 3)
            .unwrap();
        assert!(mesh.is_faulty(t));
        assert_eq!(mesh.faults()[0].reason, FaultReason::Degenerate);
        assert_eq!(mesh.faults()[0].face_id, 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_faulty_edges_not_in_table() {
        let mesh = test_shapes::cube_with_duplicate();
        assert_eq!(mesh.faults().len(), 1);

        for tri in mesh.faulty_triangles() {
            for he in tri.halfedges() {
                let listed = mesh
                    .edge_pair(mesh.edge_key(he))
                    .is_some_and(|p| p.iter().any(|e| e == he));
                assert!(!listed);
                assert!(mesh.adjacent(he).is_none());
            }
        }
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_reverse_keeps_keys() {
        let mut mesh = single_triangle();
        let first = HalfEdgeId::new(0);
        let keys_before: Vec<EdgeKey> = (0..3).map(|i| mesh.edge_key(HalfEdgeId::new(i))).collect();
        let ids_before: Vec<EdgeId> = (0..3).map(|i| mesh.edge_id(HalfEdgeId::new(i))).collect();

        assert!(mesh.reverse_triangle(first));

        for i in 0..3 {
            let he = HalfEdgeId::new(i);
            assert_eq!(mesh.edge_key(he), keys_before[i]);
            assert_eq!(mesh.edge_id(he), ids_before[i].reversed());
            assert!((mesh.normal(he) + Vector3::z()).norm() < 1e-12);
        }
        assert!((mesh.flat_normal(first) + Vector3::z()).norm() < 1e-12);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_frozen_triangle_does_not_reverse() {
        let mut mesh = single_triangle();
        let he = HalfEdgeId::new(1);
        mesh.freeze_triangle(he);
        assert!(mesh.is_frozen(HalfEdgeId::new(0)));
        assert!(mesh.is_frozen(HalfEdgeId::new(2)));

        let before = mesh.edge_id(he);
        assert!(!mesh.reverse_triangle(he));
        assert_eq!(mesh.edge_id(he), before);
    }

    #[test]
    fn test_bounding_box_and_centroid() {
        let mesh = test_shapes::unit_cube();
        let bb = mesh.bounding_box().unwrap();

        assert_eq!(bb.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bb.extent, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(mesh.centroid().unwrap(), Point3::new(0.5, 0.5, 0.5));

        for p in mesh.vertices() {
            assert!(bb.contains(p));
        }
        for axis in 0..3 {
            assert!(mesh.vertices().any(|p| p[axis] == bb.min[axis]));
            assert!(mesh.vertices().any(|p| p[axis] == bb.max()[axis]));
        }
    }

    #[test]
    fn test_extreme_edge_is_topmost() {
        let mesh = test_shapes::unit_cube();
        let he = mesh.extreme_edge().unwrap();
        assert_eq!(mesh.position(mesh.start(he)).z, 1.0);
    }

    #[test]
    fn test_facing_outward() {
        let mut mesh = TriangulatedMesh::new();
        // Bottom of a box spanning z in [0, 1], wound to face down
        mesh.add_triangle_from_positions(
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
            ],
            0,
        )
        .unwrap();
        mesh.add_vertex(Point3::new(0.5, 0.5, 1.0));

        let he = HalfEdgeId::new(0);
        assert!(mesh.is_facing_outward(he));
        mesh.reverse_triangle(he);
        assert!(!mesh.is_facing_outward(he));
    }

    #[test]
    fn test_triangles_grouped_by_face() {
        let mut mesh = test_shapes::unit_cube();
        assert_eq!(mesh.faces().count(), 6);
        let ids: Vec<i32> = mesh.faces().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.triangles().count(), 12);
        // Restartable
        assert_eq!(mesh.triangles().count(), 12);

        let extra = mesh
            .add_triangle_from_positions(
                [
                    Point3::new(3.0, 0.0, 0.0),
                    Point3::new(4.0, 0.0, 0.0),
                    Point3::new(3.0, 1.0, 0.0),
                ],
                1,
            )
            .unwrap();
        assert_eq!(mesh.face(1).unwrap().last(), Some(&extra));
        assert_eq!(mesh.face_id_of(extra), 1);
    }
}
