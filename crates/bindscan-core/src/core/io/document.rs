use super::schema;
use super::traits::RecordFile;
use crate::core::models::advisory::Resolved;
use crate::core::models::entity::{NonPolymerEntity, PolymerEntity};
use crate::core::tree::path::{PathError, PathResolver, as_items};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Query returned errors: {0}")]
    Query(String),
    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// One deserialized `entry` query result.
///
/// Holds the entry object itself; a full GraphQL response envelope
/// (`{"data": {"entry": ...}}`) is unwrapped on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryDocument {
    root: Value,
}

impl EntryDocument {
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let root = unwrap_envelope(value)?;
        if !root.is_object() {
            return Err(DocumentError::Malformed(format!(
                "expected an entry object, found {}",
                kind_of(&root)
            )));
        }
        Ok(Self { root })
    }

    pub fn from_reader(reader: impl io::Read) -> Result<Self, DocumentError> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn polymer_entities(
        &self,
        resolver: &PathResolver,
    ) -> Result<Resolved<Vec<PolymerEntity<'_>>>, PathError> {
        Ok(resolver
            .resolve(&self.root, schema::POLYMER_ENTITIES)?
            .map(|entities| {
                as_items(entities)
                    .into_iter()
                    .enumerate()
                    .map(|(index, node)| PolymerEntity::new(index, node))
                    .collect()
            }))
    }

    pub fn nonpolymer_entities(
        &self,
        resolver: &PathResolver,
    ) -> Result<Resolved<Vec<NonPolymerEntity<'_>>>, PathError> {
        Ok(resolver
            .resolve(&self.root, schema::NONPOLYMER_ENTITIES)?
            .map(|entities| {
                as_items(entities)
                    .into_iter()
                    .map(NonPolymerEntity::new)
                    .collect()
            }))
    }
}

fn unwrap_envelope(value: Value) -> Result<Value, DocumentError> {
    let Value::Object(mut map) = value else {
        return Ok(value);
    };

    if let Some(errors) = map.get(schema::GRAPHQL_ERRORS).filter(|e| !e.is_null()) {
        let messages: Vec<String> = as_items(Some(errors))
            .into_iter()
            .map(|e| {
                e.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| e.to_string())
            })
            .collect();
        return Err(DocumentError::Query(messages.join("; ")));
    }

    match map.remove(schema::GRAPHQL_DATA) {
        Some(Value::Object(mut data)) => match data.remove(schema::GRAPHQL_ENTRY) {
            Some(Value::Null) | None => Err(DocumentError::Malformed(
                "response envelope contains no entry".to_string(),
            )),
            Some(entry) => Ok(entry),
        },
        Some(other) => Err(DocumentError::Malformed(format!(
            "'data' must be an object, found {}",
            kind_of(&other)
        ))),
        None => Ok(Value::Object(map)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Result documents keyed by upper-cased entry identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSet {
    documents: BTreeMap<String, EntryDocument>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pdb_id: &str, document: EntryDocument) -> Option<EntryDocument> {
        self.documents.insert(normalize_id(pdb_id), document)
    }

    pub fn get(&self, pdb_id: &str) -> Option<&EntryDocument> {
        self.documents.get(&normalize_id(pdb_id))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }
}

impl RecordFile for DocumentSet {
    type Error = DocumentError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let raw: BTreeMap<String, Value> = serde_json::from_reader(reader)?;
        let mut set = DocumentSet::new();
        for (pdb_id, value) in raw {
            let document = EntryDocument::from_value(value).map_err(|e| {
                DocumentError::Malformed(format!("document for '{}': {}", pdb_id, e))
            })?;
            set.insert(&pdb_id, document);
        }
        debug!("Loaded {} result document(s).", set.len());
        Ok(set)
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut *writer, &self.documents)?;
        writeln!(writer)?;
        Ok(())
    }
}

pub fn normalize_id(pdb_id: &str) -> String {
    pdb_id.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn from_value_unwraps_graphql_envelope() {
        let doc = EntryDocument::from_value(json!({
            "data": {"entry": {"rcsb_id": "1ABC", "polymer_entities": []}}
        }))
        .unwrap();
        assert_eq!(doc.root()["rcsb_id"], "1ABC");
    }

    #[test]
    fn from_value_accepts_bare_entry() {
        let doc = EntryDocument::from_value(json!({"rcsb_id": "1ABC"})).unwrap();
        assert_eq!(doc.root()["rcsb_id"], "1ABC");
    }

    #[test]
    fn from_value_surfaces_graphql_errors() {
        let err = EntryDocument::from_value(json!({
            "errors": [{"message": "Entry not found"}],
            "data": {"entry": null}
        }))
        .unwrap_err();
        assert!(matches!(err, DocumentError::Query(msg) if msg.contains("Entry not found")));
    }

    #[test]
    fn from_value_rejects_null_entry_and_non_objects() {
        assert!(matches!(
            EntryDocument::from_value(json!({"data": {"entry": null}})),
            Err(DocumentError::Malformed(_))
        ));
        assert!(matches!(
            EntryDocument::from_value(json!([1, 2])),
            Err(DocumentError::Malformed(_))
        ));
    }

    #[test]
    fn polymer_entities_are_indexed_in_document_order() {
        let doc = EntryDocument::from_value(json!({
            "polymer_entities": [{"rcsb_id": "1ABC_1"}, {"rcsb_id": "1ABC_2"}]
        }))
        .unwrap();
        let entities = doc
            .polymer_entities(&PathResolver::strict())
            .unwrap()
            .value;
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[1].index(), 1);
        assert_eq!(entities[1].label(), "1ABC_2");
    }

    #[test]
    fn missing_entity_lists_yield_empty_views() {
        let doc = EntryDocument::from_value(json!({"rcsb_id": "1ABC"})).unwrap();
        let resolver = PathResolver::lenient();
        assert!(doc.polymer_entities(&resolver).unwrap().value.is_empty());
        assert!(doc.nonpolymer_entities(&resolver).unwrap().value.is_empty());
    }

    #[test]
    fn document_set_lookup_is_case_insensitive() {
        let mut set = DocumentSet::new();
        set.insert(" 4hhb ", EntryDocument::from_value(json!({})).unwrap());
        assert!(set.get("4HHB").is_some());
        assert!(set.get("4hhb").is_some());
        assert_eq!(set.ids().collect::<Vec<_>>(), vec!["4HHB"]);
    }

    #[test]
    fn document_set_round_trips_through_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("documents.json");

        let mut set = DocumentSet::new();
        set.insert("1abc", EntryDocument::from_value(json!({"rcsb_id": "1ABC"})).unwrap());
        set.write_to_path(&path).unwrap();

        let loaded = DocumentSet::read_from_path(&path).unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn document_set_reports_which_document_is_malformed() {
        let input = r#"{"1ABC": {"data": {"entry": null}}}"#;
        let err = DocumentSet::read_from(&mut input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("1ABC"));
    }
}
