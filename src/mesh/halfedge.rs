//! Half-edge records.
//!
//! # Structure
//!
//! - Every triangle owns three **half-edges** linked by `next` into a cycle
//! - A half-edge knows its **start** vertex; its end is `next.start`
//! - Two half-edges claiming the same undirected vertex pair are each other's
//!   **adjacent** edge. A half-edge without one lies on a boundary
//! - Each half-edge carries its own shading **normal**, so corners of one
//!   triangle can be smoothed independently
//! - The **frozen** flag marks a winding finalized by orientation repair
//!
//! Half-edges live in a flat arena owned by
//! [`TriangulatedMesh`](super::TriangulatedMesh); links are arena indices.

use nalgebra::Vector3;

use super::index::{HalfEdgeId, VertexId};

/// A directed edge of one triangle.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    /// The vertex this half-edge starts from.
    pub start: VertexId,

    /// The next half-edge around the same triangle.
    pub next: HalfEdgeId,

    /// The half-edge of the neighbouring triangle sharing this vertex pair.
    /// Invalid on boundary edges and on edges of faulty triangles.
    pub adjacent: HalfEdgeId,

    /// Shading normal at the start corner.
    pub normal: Vector3<f64>,

    /// Whether the winding of this half-edge's triangle is final.
    pub frozen: bool,
}

impl HalfEdge {
    /// Create an unlinked half-edge starting at `start`.
    pub fn new(start: VertexId) -> Self {
        Self {
            start,
            next: HalfEdgeId::invalid(),
            adjacent: HalfEdgeId::invalid(),
            normal: Vector3::zeros(),
            frozen: false,
        }
    }

    /// Check if this half-edge has no adjacent edge.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.adjacent.is_valid()
    }
}

/// The at-most-two half-edges claiming one undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgePair {
    first: HalfEdgeId,
    second: HalfEdgeId,
}

impl EdgePair {
    pub(crate) fn new(first: HalfEdgeId) -> Self {
        Self {
            first,
            second: HalfEdgeId::invalid(),
        }
    }

    /// The first claimant; always present.
    #[inline]
    pub fn first(&self) -> HalfEdgeId {
        self.first
    }

    /// The second claimant, if the edge is shared.
    #[inline]
    pub fn second(&self) -> Option<HalfEdgeId> {
        self.second.is_valid().then_some(self.second)
    }

    /// Whether both slots are taken.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.second.is_valid()
    }

    /// The claimant that is not `he`.
    pub fn other(&self, he: HalfEdgeId) -> Option<HalfEdgeId> {
        if he == self.first {
            self.second()
        } else if he == self.second {
            Some(self.first)
        } else {
            None
        }
    }

    /// Both claimants.
    pub fn iter(&self) -> impl Iterator<Item = HalfEdgeId> {
        std::iter::once(self.first).chain(self.second())
    }

    pub(crate) fn set_second(&mut self, he: HalfEdgeId) {
        self.second = he;
    }

    /// Remove `he`. Returns `true` if the pair is now empty.
    pub(crate) fn remove(&mut self, he: HalfEdgeId) -> bool {
        if he == self.second {
            self.second = HalfEdgeId::invalid();
            false
        } else if he == self.first {
            if self.second.is_valid() {
                self.first = self.second;
                self.second = HalfEdgeId::invalid();
                false
            } else {
                true
            }
        } else {
            false
        }
    }
}
