//! Post-build processing in its required order.
//!
//! Orientation must be final before normals are smoothed, otherwise the
//! averages would mix wrong-signed normals. [`finalize`] runs both steps on
//! one mesh; [`finalize_all`] does the same for many independent meshes,
//! optionally in parallel.

use rayon::prelude::*;

use super::normals::{balance_normals, NormalOptions, SmoothingReport};
use super::orient::{unify_face_orientation, OrientationReport};
use crate::error::Result;
use crate::mesh::{TriangulatedMesh, VertexStore};

/// Options for batch finalization.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Smoothing options applied to every mesh.
    pub normals: NormalOptions,

    /// Whether to process meshes in parallel (default: true).
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            normals: NormalOptions::default(),
            parallel: true,
        }
    }
}

impl BatchOptions {
    /// Set the smoothing options.
    pub fn with_normals(mut self, normals: NormalOptions) -> Self {
        self.normals = normals;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Combined result of orientation and smoothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizeReport {
    /// Orientation summary.
    pub orientation: OrientationReport,
    /// Smoothing summary.
    pub smoothing: SmoothingReport,
}

/// Unify winding, then smooth normals.
///
/// Smoothing is skipped if orientation fails.
pub fn finalize<S: VertexStore>(
    mesh: &mut TriangulatedMesh<S>,
    options: &NormalOptions,
) -> Result<FinalizeReport> {
    let orientation = unify_face_orientation(mesh)?;
    let smoothing = balance_normals(mesh, options);
    Ok(FinalizeReport {
        orientation,
        smoothing,
    })
}

/// Finalize many independent meshes. Results are in input order.
pub fn finalize_all<S: VertexStore + Send>(
    meshes: &mut [TriangulatedMesh<S>],
    options: &BatchOptions,
) -> Vec<Result<FinalizeReport>> {
    if options.parallel {
        meshes
            .par_iter_mut()
            .map(|mesh| finalize(mesh, &options.normals))
            .collect()
    } else {
        meshes
            .iter_mut()
            .map(|mesh| finalize(mesh, &options.normals))
            .collect()
    }
}
