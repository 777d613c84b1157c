//! Error types for shellmesh.
//!
//! Non-manifold input is not an error: offending triangles are recorded as
//! faulty on the mesh and construction continues. The variants here cover
//! caller mistakes and the one fatal topology condition, an orientation
//! contradiction found during winding unification.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A triangle references a vertex index the vertex store never assigned.
    #[error("triangle {triangle} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// Index the triangle would have received.
        triangle: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// Two half-edges sharing an undirected edge run the same direction and
    /// neither can be reversed any more.
    #[error("inconsistent triangle orientation across edge ({start}, {end})")]
    InconsistentOrientation {
        /// Start vertex of the conflicting edge.
        start: usize,
        /// End vertex of the conflicting edge.
        end: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
