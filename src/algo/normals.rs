//! Crease-aware shading normals.
//!
//! Every triangle corner starts with its triangle's flat normal. This module
//! blends corner normals across smooth regions and keeps them apart across
//! sharp edges.
//!
//! # Algorithm
//!
//! For each vertex P:
//!
//! 1. Collect the half-edges starting at P (one per incident triangle).
//! 2. Walk the fan around P from each boundary edge, stepping from a corner
//!    to the neighbouring triangle's corner across the edge arriving at P
//!    (`next(next(he)).adjacent`). Closed fans are walked from any corner.
//! 3. Start a new smoothing group whenever the angle between consecutive
//!    flat normals exceeds the crease angle.
//! 4. Give every member of a multi-corner group the normalized sum of the
//!    members' flat normals.
//!
//! Angles and sums are taken over flat normals, so a second pass reproduces
//! the first. Run this after [`unify_face_orientation`]: walking a fan relies
//! on neighbouring triangles running their shared edge in opposite
//! directions.
//!
//! [`unify_face_orientation`]: super::orient::unify_face_orientation
//!
//! # Example
//!
//! ```
//! use shellmesh::algo::normals::{balance_normals, NormalOptions};
//! use shellmesh::mesh::TriangulatedMesh;
//! use nalgebra::Point3;
//!
//! let mut mesh = TriangulatedMesh::new();
//! let o = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! let a = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! let b = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
//! let c = mesh.add_vertex(Point3::new(-1.0, 0.0, 0.1));
//! mesh.add_triangle(o, a, b, 0).unwrap();
//! mesh.add_triangle(o, b, c, 0).unwrap();
//!
//! let options = NormalOptions::default().with_crease_degrees(20.0);
//! let report = balance_normals(&mut mesh, &options);
//! assert!(report.smoothed_corners > 0);
//! ```

use std::collections::HashSet;

use log::warn;
use nalgebra::Vector3;

use crate::mesh::{HalfEdgeId, TriangulatedMesh, VertexId, VertexStore};

/// Options for normal smoothing.
#[derive(Debug, Clone)]
pub struct NormalOptions {
    /// Dihedral angle (radians) above which an edge is kept sharp.
    pub crease_angle: f64,
}

impl Default for NormalOptions {
    fn default() -> Self {
        Self {
            crease_angle: std::f64::consts::FRAC_PI_6,
        }
    }
}

impl NormalOptions {
    /// Set the crease angle in radians, clamped to `[0, π]`.
    pub fn with_crease_angle(mut self, radians: f64) -> Self {
        self.crease_angle = radians.clamp(0.0, std::f64::consts::PI);
        self
    }

    /// Set the crease angle in degrees.
    pub fn with_crease_degrees(self, degrees: f64) -> Self {
        self.with_crease_angle(degrees.to_radians())
    }
}

/// Summary of a smoothing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmoothingReport {
    /// Smoothing groups found, singletons included.
    pub groups: usize,
    /// Corners whose normal was replaced by a group average.
    pub smoothed_corners: usize,
}

/// Replace corner normals with smoothing-group averages.
pub fn balance_normals<S: VertexStore>(
    mesh: &mut TriangulatedMesh<S>,
    options: &NormalOptions,
) -> SmoothingReport {
    let num_triangles = mesh.halfedge_count() / 3;
    let mut flat = vec![Vector3::zeros(); num_triangles];
    let mut incident: Vec<Vec<HalfEdgeId>> = vec![Vec::new(); mesh.vertex_count()];

    for t in mesh.accepted_triangle_ids() {
        let first = t.first_halfedge();
        flat[t.index()] = mesh.flat_normal(first);
        for he in mesh.triangle_cycle(first) {
            incident[mesh.start(he).index()].push(he);
        }
    }

    let mut report = SmoothingReport::default();
    for (v, edges) in incident.iter().enumerate() {
        if edges.is_empty() {
            continue;
        }
        let groups = smoothing_groups(mesh, VertexId::new(v), edges, &flat, options.crease_angle);
        report.groups += groups.len();

        for group in groups.iter().filter(|g| g.len() > 1) {
            let sum: Vector3<f64> = group.iter().map(|he| flat[he.triangle().index()]).sum();
            let Some(normal) = sum.try_normalize(0.0) else {
                continue;
            };
            for &he in group {
                mesh.set_normal(he, normal);
            }
            report.smoothed_corners += group.len();
        }
    }
    report
}

/// Split the corners at `v` into smoothing groups.
fn smoothing_groups<S: VertexStore>(
    mesh: &TriangulatedMesh<S>,
    v: VertexId,
    edges: &[HalfEdgeId],
    flat: &[Vector3<f64>],
    crease_angle: f64,
) -> Vec<Vec<HalfEdgeId>> {
    let is_sharp = |a: HalfEdgeId, b: HalfEdgeId| {
        flat[a.triangle().index()].angle(&flat[b.triangle().index()]) > crease_angle
    };

    // Open fans are walked from their free end; whatever is left over forms
    // closed fans.
    let free = edges.iter().copied().filter(|&he| mesh.adjacent(he).is_none());
    let seeds: Vec<HalfEdgeId> = free.chain(edges.iter().copied()).collect();

    let mut visited: HashSet<HalfEdgeId> = HashSet::with_capacity(edges.len());
    let mut groups = Vec::new();

    for seed in seeds {
        if !visited.insert(seed) {
            continue;
        }

        let mut fan: Vec<Vec<HalfEdgeId>> = Vec::new();
        let mut current = vec![seed];
        let mut cur = seed;
        let mut closed = false;

        while visited.len() <= edges.len() {
            let arriving = mesh.next(mesh.next(cur));
            let Some(n) = mesh.adjacent(arriving) else {
                break;
            };
            if n == seed {
                closed = true;
                break;
            }
            if mesh.start(n) != v {
                warn!(
                    "fan walk around {:?} left the vertex at {:?}; winding is inconsistent",
                    v, n
                );
                break;
            }
            if visited.contains(&n) {
                break;
            }

            if is_sharp(cur, n) {
                fan.push(std::mem::take(&mut current));
            }
            current.push(n);
            visited.insert(n);
            cur = n;
        }

        // The last run of a closed fan continues into the first one
        if closed && !fan.is_empty() && !is_sharp(cur, seed) {
            fan[0].extend(current);
        } else {
            fan.push(current);
        }
        groups.extend(fan);
    }
    groups
}
