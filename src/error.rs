use thiserror::Error;

use crate::redundancy::RedundancyType;

/// Usage errors raised by graph operations and redundancy queries.
///
/// None of these are transient: they signal a call that can never succeed with the given arguments.
/// Absence of a path or a key is never an error and is reported as an empty collection instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("majority percentage must lie in (0, 100], got {0}")]
    InvalidMajorityPercentage(f64),

    #[error("metrics for {0:?} were excluded when the redundancy result was built")]
    ExcludedRedundancyType(RedundancyType),

    #[error("a path query needs at least one endpoint")]
    MissingEndpoints,

    #[error("cannot replace {expected} with {found}: elements are of different kinds")]
    KindMismatch { expected: String, found: String },

    #[error("an edge group needs at least one key")]
    EmptyEdgeGroup,

    #[error("a marked path needs special keys, special nodes, or both")]
    NothingToMark,
}

impl GraphError {
    pub(crate) fn kind_mismatch<E: std::fmt::Debug>(expected: &E, found: &E) -> Self {
        Self::KindMismatch {
            expected: format!("{expected:?}"),
            found: format!("{found:?}"),
        }
    }
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
