//! Vertex stores.
//!
//! A [`VertexStore`] deduplicates positions and hands out sequential
//! [`VertexId`]s in insertion order. Two stores are provided:
//!
//! - [`ExactVertices`]: positions are equal only if their coordinates are
//!   bit-for-bit equal (with `-0.0` folded into `0.0`).
//! - [`WeldedVertices`]: positions within a distance tolerance are merged.

use std::collections::HashMap;

use nalgebra::Point3;

use super::index::VertexId;
use crate::error::{MeshError, Result};

/// Deduplicating, order-stable storage for vertex positions.
pub trait VertexStore {
    /// Number of stored vertices.
    fn len(&self) -> usize;

    /// Whether the store holds no vertices.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the id of a position already in the store.
    fn find(&self, position: &Point3<f64>) -> Option<VertexId>;

    /// Whether an equal position is already stored.
    fn contains(&self, position: &Point3<f64>) -> bool {
        self.find(position).is_some()
    }

    /// Append a position and return its id (always the next sequential index).
    ///
    /// Callers are expected to check [`find`](Self::find) first.
    fn insert(&mut self, position: Point3<f64>) -> VertexId;

    /// Get the position of a vertex.
    fn position(&self, id: VertexId) -> Option<&Point3<f64>> {
        self.positions().get(id.index())
    }

    /// All positions in insertion order.
    fn positions(&self) -> &[Point3<f64>];
}

type BitKey = [u64; 3];

fn bit_key(p: &Point3<f64>) -> BitKey {
    // -0.0 and 0.0 compare equal, so they must hash equal too
    let bits = |c: f64| if c == 0.0 { 0u64 } else { c.to_bits() };
    [bits(p.x), bits(p.y), bits(p.z)]
}

/// Vertex store keyed on exact coordinate values.
#[derive(Debug, Clone, Default)]
pub struct ExactVertices {
    positions: Vec<Point3<f64>>,
    lookup: HashMap<BitKey, VertexId>,
}

impl ExactVertices {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            lookup: HashMap::with_capacity(capacity),
        }
    }
}

impl VertexStore for ExactVertices {
    fn len(&self) -> usize {
        self.positions.len()
    }

    fn find(&self, position: &Point3<f64>) -> Option<VertexId> {
        if position.iter().any(|c| c.is_nan()) {
            return None;
        }
        self.lookup.get(&bit_key(position)).copied()
    }

    fn insert(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.positions.len());
        self.positions.push(position);
        if !position.iter().any(|c| c.is_nan()) {
            self.lookup.entry(bit_key(&position)).or_insert(id);
        }
        id
    }

    fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }
}

type Cell = [i64; 3];

/// Vertex store that welds positions closer than a tolerance.
///
/// Positions are bucketed into a uniform grid whose cell size equals the
/// tolerance, so a lookup only has to inspect the 27 cells around a point.
/// The first stored position within `tolerance` wins.
#[derive(Debug, Clone)]
pub struct WeldedVertices {
    tolerance: f64,
    positions: Vec<Point3<f64>>,
    cells: HashMap<Cell, Vec<VertexId>>,
}

impl WeldedVertices {
    /// Create an empty store welding positions within `tolerance`.
    pub fn new(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(MeshError::invalid_param(
                "tolerance",
                tolerance,
                "must be finite and positive",
            ));
        }
        Ok(Self {
            tolerance,
            positions: Vec::new(),
            cells: HashMap::new(),
        })
    }

    /// The welding distance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn cell_of(&self, p: &Point3<f64>) -> Cell {
        let inv = 1.0 / self.tolerance;
        [
            (p.x * inv).floor() as i64,
            (p.y * inv).floor() as i64,
            (p.z * inv).floor() as i64,
        ]
    }
}

impl VertexStore for WeldedVertices {
    fn len(&self) -> usize {
        self.positions.len()
    }

    fn find(&self, position: &Point3<f64>) -> Option<VertexId> {
        if position.iter().any(|c| !c.is_finite()) {
            return None;
        }
        let [cx, cy, cz] = self.cell_of(position);
        let tol_sq = self.tolerance * self.tolerance;

        let mut best: Option<VertexId> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(ids) = self.cells.get(&[cx + dx, cy + dy, cz + dz]) else {
                        continue;
                    };
                    for &id in ids {
                        let d = (self.positions[id.index()] - position).norm_squared();
                        if d <= tol_sq && best.map_or(true, |b| id < b) {
                            best = Some(id);
                        }
                    }
                }
            }
        }
        best
    }

    fn insert(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.positions.len());
        self.positions.push(position);
        if position.iter().all(|c| c.is_finite()) {
            let cell = self.cell_of(&position);
            self.cells.entry(cell).or_default().push(id);
        }
        id
    }

    fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }
}
