//! Winding unification.
//!
//! Flips triangle windings so that every triangle faces away from the mesh
//! centroid and every shared edge is traversed in opposite directions by
//! its two triangles.
//!
//! # Algorithm
//!
//! 1. Seed with the half-edge whose start vertex is highest in Z. The top of
//!    a solid is very likely visible from its centroid, so its outward test
//!    is trustworthy. Reverse the seed triangle if it faces inward.
//! 2. Propagate across shared edges with an explicit stack. A neighbour whose
//!    shared edge runs the same direction is reversed, then frozen, then its
//!    other two edges are queued. A frozen neighbour running the same
//!    direction is a contradiction and aborts the run.
//! 3. Any triangle left unfrozen belongs to another shell; seed from it the
//!    same way, in insertion order.
//!
//! Every seed is judged against the centre of the whole mesh's bounding
//! box. Shells that do not enclose that point, such as solids placed side
//! by side, can come out consistently wound but facing inward.
//!
//! Running the algorithm again on its own output changes nothing: every
//! triangle is already frozen.
//!
//! # Example
//!
//! ```
//! use shellmesh::algo::orient::unify_face_orientation;
//! use shellmesh::mesh::TriangulatedMesh;
//! use nalgebra::Point3;
//!
//! let p = [
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(1.0, -1.0, -1.0),
//!     Point3::new(-1.0, 1.0, -1.0),
//!     Point3::new(-1.0, -1.0, 1.0),
//! ];
//! let mut mesh = TriangulatedMesh::new();
//! let v: Vec<_> = p.iter().map(|&q| mesh.add_vertex(q)).collect();
//! // Arbitrary windings
//! mesh.add_triangle(v[0], v[1], v[2], 0).unwrap();
//! mesh.add_triangle(v[0], v[1], v[3], 0).unwrap();
//! mesh.add_triangle(v[1], v[2], v[3], 0).unwrap();
//! mesh.add_triangle(v[0], v[2], v[3], 0).unwrap();
//!
//! let report = unify_face_orientation(&mut mesh).unwrap();
//! assert_eq!(report.shells, 1);
//! assert!(mesh.triangles().all(|t| mesh.is_facing_outward(t.halfedges()[0])));
//! ```

use log::{debug, trace, warn};

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeId, TriangulatedMesh, VertexStore};

/// Summary of a winding unification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientationReport {
    /// Connected shells that were seeded.
    pub shells: usize,
    /// Triangles whose winding was reversed.
    pub reversed: usize,
}

/// Unify the winding of all accepted triangles.
///
/// # Errors
///
/// [`MeshError::InconsistentOrientation`] if two triangles sharing an edge
/// run it the same way and both are already frozen, e.g. on a non-orientable
/// patch. Triangles frozen before the contradiction keep their windings.
pub fn unify_face_orientation<S: VertexStore>(
    mesh: &mut TriangulatedMesh<S>,
) -> Result<OrientationReport> {
    let mut report = OrientationReport::default();
    let mut stack = Vec::new();

    if let Some(seed) = mesh.extreme_edge() {
        orient_shell(mesh, seed, &mut stack, &mut report)?;
    }

    let remaining: Vec<HalfEdgeId> = mesh
        .accepted_triangle_ids()
        .map(|t| t.first_halfedge())
        .collect();
    for seed in remaining {
        orient_shell(mesh, seed, &mut stack, &mut report)?;
    }

    debug!(
        "unified orientation: {} shells, {} triangles reversed",
        report.shells, report.reversed
    );
    Ok(report)
}

/// Orient the shell containing `seed`, unless it is already frozen.
fn orient_shell<S: VertexStore>(
    mesh: &mut TriangulatedMesh<S>,
    seed: HalfEdgeId,
    stack: &mut Vec<HalfEdgeId>,
    report: &mut OrientationReport,
) -> Result<()> {
    if mesh.is_frozen(seed) {
        return Ok(());
    }

    let before = report.reversed;
    if !mesh.is_facing_outward(seed) && mesh.reverse_triangle(seed) {
        trace!("reversed seed triangle {:?}", seed.triangle());
        report.reversed += 1;
    }
    mesh.freeze_triangle(seed);
    report.shells += 1;

    stack.clear();
    stack.extend(mesh.triangle_cycle(seed));

    while let Some(he) = stack.pop() {
        let Some(adj) = mesh.adjacent(he) else {
            continue;
        };

        if mesh.edge_id(adj) == mesh.edge_id(he) {
            if mesh.is_frozen(adj) {
                let id = mesh.edge_id(he);
                warn!(
                    "triangles {:?} and {:?} cannot be oriented consistently",
                    he.triangle(),
                    adj.triangle()
                );
                return Err(MeshError::InconsistentOrientation {
                    start: id.start().index(),
                    end: id.end().index(),
                });
            }
            mesh.reverse_triangle(adj);
            trace!("reversed triangle {:?}", adj.triangle());
            report.reversed += 1;
        }

        if !mesh.is_frozen(adj) {
            mesh.freeze_triangle(adj);
            let [_, n1, n2] = mesh.triangle_cycle(adj);
            stack.push(n1);
            stack.push(n2);
        }
    }

    debug!(
        "oriented shell seeded at {:?}: {} reversed",
        seed.triangle(),
        report.reversed - before
    );
    Ok(())
}
