//! Error types for matching operations.

use thiserror::Error;

/// Errors from scoring, resolution and lookup.
///
/// None of these are fatal to a reconciliation run: the engine folds
/// `NoCandidateRemaining` into the unmatched bucket, and callers treat
/// `LookupNotFound` as "skip this table".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Neither a comparison target nor any candidates were given.
    #[error("no target name or candidate names provided")]
    Configuration,

    /// A catalog column lost every candidate before it could bid again.
    #[error("no candidate remaining for catalog column '{catalog}'")]
    NoCandidateRemaining { catalog: String },

    /// The table is not present in the data dictionary.
    #[error("table '{table}' does not exist in the data dictionary")]
    LookupNotFound { table: String },
}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;
