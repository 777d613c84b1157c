//! Index and identity types for mesh elements.
//!
//! Vertices, half-edges and triangles are addressed by type-safe `u32`
//! wrappers. Edges have two 64-bit identities built from their vertex
//! indices: [`EdgeId`] keeps the direction, [`EdgeKey`] does not.

use std::fmt::{self, Debug};

const INVALID: u32 = u32::MAX;

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(u32);

/// A type-safe half-edge index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId(u32);

/// A type-safe triangle index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TriangleId(u32);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index < INVALID as usize, "index {} too large", index);
                Self(index as u32)
            }

            /// Create an invalid/null index.
            #[inline]
            pub const fn invalid() -> Self {
                Self(INVALID)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw `u32` value.
            #[inline]
            pub fn raw(self) -> u32 {
                self.0
            }

            /// Check if this is a valid (non-null) index.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != INVALID
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(HalfEdgeId, "HE");
impl_index_type!(TriangleId, "T");

impl HalfEdgeId {
    /// The triangle owning this half-edge. Triangles occupy three consecutive
    /// arena slots.
    #[inline]
    pub fn triangle(self) -> TriangleId {
        TriangleId(self.0 / 3)
    }
}

impl TriangleId {
    /// The first arena slot of this triangle.
    #[inline]
    pub fn first_halfedge(self) -> HalfEdgeId {
        HalfEdgeId(self.0 * 3)
    }
}

/// Directed edge identity: `(start << 32) | end`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Identity of the edge running from `start` to `end`.
    #[inline]
    pub fn new(start: VertexId, end: VertexId) -> Self {
        Self(((start.raw() as u64) << 32) | end.raw() as u64)
    }

    /// Start vertex.
    #[inline]
    pub fn start(self) -> VertexId {
        VertexId((self.0 >> 32) as u32)
    }

    /// End vertex.
    #[inline]
    pub fn end(self) -> VertexId {
        VertexId(self.0 as u32)
    }

    /// The same edge running the other way.
    #[inline]
    pub fn reversed(self) -> Self {
        Self::new(self.end(), self.start())
    }

    /// The undirected key of this edge.
    #[inline]
    pub fn key(self) -> EdgeKey {
        EdgeKey::new(self.start(), self.end())
    }

    /// Raw 64-bit value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Undirected edge identity: `(max << 32) | min`.
///
/// Both half-edges of a manifold edge share the same key.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct EdgeKey(u64);

impl EdgeKey {
    /// Key of the undirected edge between `a` and `b`.
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self(((hi.raw() as u64) << 32) | lo.raw() as u64)
    }

    /// The two endpoints, larger index first.
    #[inline]
    pub fn vertices(self) -> (VertexId, VertexId) {
        (VertexId((self.0 >> 32) as u32), VertexId(self.0 as u32))
    }

    /// Raw 64-bit value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}
