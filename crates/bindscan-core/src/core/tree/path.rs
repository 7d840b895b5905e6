use crate::core::models::advisory::{Advisory, Resolved};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// One step of a path through a result tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKey<'k> {
    Key(&'k str),
    Index(usize),
}

impl<'k> From<&'k str> for PathKey<'k> {
    fn from(key: &'k str) -> Self {
        PathKey::Key(key)
    }
}

impl From<usize> for PathKey<'_> {
    fn from(index: usize) -> Self {
        PathKey::Index(index)
    }
}

impl fmt::Display for PathKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Key(key) => write!(f, "{}", key),
            PathKey::Index(index) => write!(f, "[{}]", index),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PathError {
    #[error(
        "Ambiguous path at depth {depth} (key '{key}'): found {count} items where one was expected"
    )]
    Ambiguous {
        depth: usize,
        key: String,
        count: usize,
    },
}

/// Walks key paths through nested JSON-like result trees.
///
/// At every step, whatever the key, a list is collapsed first: an empty list resolves
/// to nothing, a singleton list is descended into transparently, and a longer list is
/// ambiguous. Ambiguity is an error in strict mode; otherwise the first element is used
/// and an [`Advisory::AmbiguousPath`] is returned alongside the value. Only then is the
/// key applied, so an index key reaches into a list nested inside the collapsed one.
/// Nulls, missing keys, and type mismatches all resolve to `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathResolver {
    strict: bool,
}

impl PathResolver {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn lenient() -> Self {
        Self { strict: false }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn resolve<'a>(
        &self,
        tree: &'a Value,
        path: &[PathKey<'_>],
    ) -> Result<Resolved<Option<&'a Value>>, PathError> {
        let mut advisories = Vec::new();
        let mut current = tree;

        for (depth, &key) in path.iter().enumerate() {
            match self.step(current, key, depth, &mut advisories)? {
                Some(next) => current = next,
                None => return Ok(Resolved::new(None, advisories)),
            }
        }

        let value = if current.is_null() {
            None
        } else {
            Some(current)
        };
        Ok(Resolved::new(value, advisories))
    }

    pub fn resolve_or<'a>(
        &self,
        tree: &'a Value,
        path: &[PathKey<'_>],
        default: &'a Value,
    ) -> Result<Resolved<&'a Value>, PathError> {
        Ok(self.resolve(tree, path)?.map(|v| v.unwrap_or(default)))
    }

    /// Resolves `path` and reads the result as a string slice.
    pub fn resolve_str<'a>(
        &self,
        tree: &'a Value,
        path: &[PathKey<'_>],
    ) -> Result<Resolved<Option<&'a str>>, PathError> {
        Ok(self.resolve(tree, path)?.map(|v| v.and_then(Value::as_str)))
    }

    fn step<'a>(
        &self,
        node: &'a Value,
        key: PathKey<'_>,
        depth: usize,
        advisories: &mut Vec<Advisory>,
    ) -> Result<Option<&'a Value>, PathError> {
        let node = match (node, key) {
            (Value::Null, _) => return Ok(None),
            (Value::Array(items), _) => match items.as_slice() {
                [] => return Ok(None),
                [only] => only,
                [first, ..] => {
                    if self.strict {
                        return Err(PathError::Ambiguous {
                            depth,
                            key: key.to_string(),
                            count: items.len(),
                        });
                    }
                    advisories.push(Advisory::AmbiguousPath {
                        depth,
                        key: key.to_string(),
                        count: items.len(),
                    });
                    first
                }
            },
            (other, _) => other,
        };

        let next = match (node, key) {
            (Value::Object(map), PathKey::Key(name)) => map.get(name),
            (Value::Array(items), PathKey::Index(index)) => items.get(index),
            _ => None,
        };
        Ok(next.filter(|v| !v.is_null()))
    }
}

/// Views a resolved node as a list of elements: arrays yield their items, a lone
/// object or scalar yields itself, and `None` yields nothing.
pub fn as_items(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    }
}
