use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-fatal finding raised while resolving an entry.
///
/// Upstream records are frequently incomplete, so most structural problems degrade to
/// a default value plus one of these rather than an error. Advisories travel with the
/// value that produced them; nothing is written to a global warning channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Advisory {
    /// A list with more than one element was found where a single node was expected;
    /// the first element was used.
    AmbiguousPath {
        depth: usize,
        key: String,
        count: usize,
    },
    AlignmentUnavailable {
        entity_id: String,
        reason: String,
    },
    MutationSkipped {
        reason: String,
    },
    MalformedRecord {
        context: String,
        reason: String,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousPath { depth, key, count } => write!(
                f,
                "ambiguous path at depth {} (key '{}'): {} items found, using the first",
                depth, key, count
            ),
            Self::AlignmentUnavailable { entity_id, reason } => {
                write!(f, "alignment unavailable for '{}': {}", entity_id, reason)
            }
            Self::MutationSkipped { reason } => write!(f, "mutation skipped: {}", reason),
            Self::MalformedRecord { context, reason } => {
                write!(f, "malformed {} record ignored: {}", context, reason)
            }
        }
    }
}

/// A value paired with the advisories collected while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub advisories: Vec<Advisory>,
}

impl<T> Resolved<T> {
    pub fn new(value: T, advisories: Vec<Advisory>) -> Self {
        Self { value, advisories }
    }

    pub fn clean(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            advisories: self.advisories,
        }
    }

    /// Moves the advisories into `sink` and returns the bare value.
    pub fn absorb(self, sink: &mut Vec<Advisory>) -> T {
        sink.extend(self.advisories);
        self.value
    }
}
