use super::advisory::Resolved;
use crate::core::io::schema;
use crate::core::sequence::normalize_sequence;
use crate::core::tree::path::{PathError, PathResolver, as_items};
use serde_json::Value;

/// Read-only view of one polymer entity inside a result document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolymerEntity<'a> {
    index: usize,
    node: &'a Value,
}

impl<'a> PolymerEntity<'a> {
    pub fn new(index: usize, node: &'a Value) -> Self {
        Self { index, node }
    }

    /// Position of this entity in the document's polymer entity list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn node(&self) -> &'a Value {
        self.node
    }

    pub fn id(&self, resolver: &PathResolver) -> Result<Resolved<Option<&'a str>>, PathError> {
        resolver.resolve_str(self.node, schema::ENTITY_ID)
    }

    /// Identifier for messages; falls back to the list position when the record has none.
    pub fn label(&self) -> String {
        PathResolver::lenient()
            .resolve_str(self.node, schema::ENTITY_ID)
            .ok()
            .and_then(|resolved| resolved.value)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", self.index))
    }

    pub fn canonical_sequence(
        &self,
        resolver: &PathResolver,
    ) -> Result<Resolved<Option<String>>, PathError> {
        Ok(resolver
            .resolve_str(self.node, schema::CANONICAL_SEQUENCE)?
            .map(|s| s.map(normalize_sequence)))
    }

    pub fn instance_features(
        &self,
        resolver: &PathResolver,
    ) -> Result<Resolved<Vec<InstanceFeature<'a>>>, PathError> {
        Ok(resolver
            .resolve(self.node, schema::INSTANCE_FEATURES)?
            .map(|features| {
                as_items(features)
                    .into_iter()
                    .map(InstanceFeature::new)
                    .collect()
            }))
    }
}

/// Read-only view of one annotated structural feature of a polymer instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceFeature<'a> {
    node: &'a Value,
}

impl<'a> InstanceFeature<'a> {
    pub fn new(node: &'a Value) -> Self {
        Self { node }
    }

    pub fn kind(&self) -> Option<&'a str> {
        self.node.get(schema::FEATURE_TYPE).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.node.get(schema::FEATURE_NAME).and_then(Value::as_str)
    }

    pub fn is_ligand_interaction(&self) -> bool {
        self.kind() == Some(schema::LIGAND_INTERACTION)
    }

    /// The 1-based `beg_seq_id` of every feature-position record.
    ///
    /// Records without a positive integer start are skipped.
    pub fn begin_positions(&self) -> impl Iterator<Item = u64> + 'a {
        as_items(self.node.get(schema::FEATURE_POSITIONS))
            .into_iter()
            .filter_map(|record| record.get(schema::FEATURE_BEGIN_SEQ_ID))
            .filter_map(Value::as_u64)
            .filter(|&position| position > 0)
    }
}

/// Read-only view of one non-polymer (small molecule) entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonPolymerEntity<'a> {
    node: &'a Value,
}

impl<'a> NonPolymerEntity<'a> {
    pub fn new(node: &'a Value) -> Self {
        Self { node }
    }

    pub fn comp_id(&self, resolver: &PathResolver) -> Result<Resolved<Option<&'a str>>, PathError> {
        resolver.resolve_str(self.node, schema::NONPOLYMER_COMP_ID)
    }

    pub fn is_subject_of_investigation(
        &self,
        resolver: &PathResolver,
    ) -> Result<Resolved<bool>, PathError> {
        Ok(resolver
            .resolve_str(self.node, schema::SUBJECT_OF_INVESTIGATION)?
            .map(|flag| flag == Some(schema::SUBJECT_FLAG_YES)))
    }
}
