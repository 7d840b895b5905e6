use thiserror::Error;

use super::matcher::MatchError;
use super::mutation::MutationError;
use crate::core::tree::path::PathError;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ResolveError {
    #[error("Path resolution failed: {source}")]
    Path {
        #[from]
        source: PathError,
    },

    #[error("Entity matching failed: {source}")]
    Matching {
        #[from]
        source: MatchError,
    },

    #[error("Mutant generation failed: {source}")]
    Mutation {
        #[from]
        source: MutationError,
    },

    #[error("No polymer entity of '{pdb_id}' matches search method '{method}'")]
    NoMatchingEntity { pdb_id: String, method: String },

    #[error("Polymer entity '{entity}' has no canonical sequence")]
    MissingSequence { entity: String },
}

impl ResolveError {
    /// Stable kebab-case name of the failure, used in batch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Path { .. } => "ambiguous-path",
            Self::Matching {
                source: MatchError::EmptyEntityList,
            } => "empty-entity-list",
            Self::Matching {
                source: MatchError::InvalidStrategy { .. },
            } => "invalid-strategy",
            Self::Matching {
                source: MatchError::Path(_),
            } => "ambiguous-path",
            Self::Mutation {
                source: MutationError::UnsupportedResidue { .. },
            } => "unsupported-residue",
            Self::Mutation {
                source: MutationError::PositionOutOfRange { .. },
            } => "position-out-of-range",
            Self::NoMatchingEntity { .. } => "no-matching-entity",
            Self::MissingSequence { .. } => "missing-sequence",
        }
    }
}
