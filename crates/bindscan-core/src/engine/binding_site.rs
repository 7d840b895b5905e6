use crate::core::io::schema;
use crate::core::models::advisory::Resolved;
use crate::core::models::entity::PolymerEntity;
use crate::core::models::entry::LigandInteractionMap;
use crate::core::tree::path::{PathError, PathResolver};
use tracing::trace;

/// Collects ligand-interaction residue positions from a polymer entity's annotations.
///
/// Upstream positions are 1-based `beg_seq_id` values; the extracted positions are
/// zero-based indices into the canonical sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindingSiteExtractor {
    resolver: PathResolver,
}

impl BindingSiteExtractor {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Maps each ligand-interaction feature name to the positions it covers.
    ///
    /// With `ligand_filter`, only the feature named after that ligand is kept. Names
    /// with no usable positions never appear in the map.
    pub fn extract(
        &self,
        entity: &PolymerEntity<'_>,
        ligand_filter: Option<&str>,
    ) -> Result<Resolved<LigandInteractionMap>, PathError> {
        let wanted = ligand_filter.map(schema::ligand_feature_name);
        let mut advisories = Vec::new();
        let features = entity
            .instance_features(&self.resolver)?
            .absorb(&mut advisories);

        let mut interactions = LigandInteractionMap::new();
        for feature in features.iter().filter(|f| f.is_ligand_interaction()) {
            let Some(name) = feature.name() else {
                continue;
            };
            if wanted.as_deref().is_some_and(|wanted| wanted != name) {
                continue;
            }

            let positions: Vec<usize> = feature
                .begin_positions()
                .map(|begin| (begin - 1) as usize)
                .collect();
            if positions.is_empty() {
                trace!(feature = name, "Ligand feature has no usable positions.");
                continue;
            }
            interactions
                .entry(name.to_string())
                .or_default()
                .extend(positions);
        }

        Ok(Resolved::new(interactions, advisories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::collections::BTreeSet;

    fn entity_with_features(features: Value) -> Value {
        json!({
            "rcsb_id": "1ABC_1",
            "polymer_entity_instances": [{"rcsb_polymer_instance_feature": features}]
        })
    }

    fn extract(node: &Value, filter: Option<&str>) -> LigandInteractionMap {
        BindingSiteExtractor::default()
            .extract(&PolymerEntity::new(0, node), filter)
            .unwrap()
            .value
    }

    #[test]
    fn single_feature_yields_zero_based_position() {
        let node = entity_with_features(json!([{
            "type": "LIGAND_INTERACTION",
            "name": "ligand SO4",
            "feature_positions": [{"beg_seq_id": 42}]
        }]));
        let map = extract(&node, None);
        assert_eq!(map.len(), 1);
        assert_eq!(map["ligand SO4"], BTreeSet::from([41]));
    }

    #[test]
    fn non_interaction_features_are_ignored() {
        let node = entity_with_features(json!([
            {"type": "SHEET", "name": "sheet 1", "feature_positions": [{"beg_seq_id": 3}]},
            {"type": "LIGAND_INTERACTION", "name": "ligand ATP", "feature_positions": [{"beg_seq_id": 7}]}
        ]));
        let map = extract(&node, None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["ligand ATP"]);
    }

    #[test]
    fn filter_keeps_only_the_named_ligand() {
        let node = entity_with_features(json!([
            {"type": "LIGAND_INTERACTION", "name": "ligand ATP", "feature_positions": [{"beg_seq_id": 7}]},
            {"type": "LIGAND_INTERACTION", "name": "ligand MG", "feature_positions": [{"beg_seq_id": 9}]}
        ]));
        let map = extract(&node, Some("mg"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["ligand MG"]);
        assert_eq!(map["ligand MG"], BTreeSet::from([8]));
    }

    #[test]
    fn repeated_features_merge_positions() {
        let node = entity_with_features(json!([
            {"type": "LIGAND_INTERACTION", "name": "ligand HEM", "feature_positions": [{"beg_seq_id": 58}, {"beg_seq_id": 63}]},
            {"type": "LIGAND_INTERACTION", "name": "ligand HEM", "feature_positions": [{"beg_seq_id": 87}, {"beg_seq_id": 58}]}
        ]));
        let map = extract(&node, None);
        assert_eq!(map["ligand HEM"], BTreeSet::from([57, 62, 86]));
    }

    #[test]
    fn invalid_positions_are_skipped_and_empty_names_never_inserted() {
        let node = entity_with_features(json!([
            {"type": "LIGAND_INTERACTION", "name": "ligand ZN", "feature_positions": [{"beg_seq_id": 0}, {"beg_seq_id": "12"}, {}]},
            {"type": "LIGAND_INTERACTION", "name": "ligand CA"},
            {"type": "LIGAND_INTERACTION", "feature_positions": [{"beg_seq_id": 4}]}
        ]));
        assert!(extract(&node, None).is_empty());
    }

    #[test]
    fn entity_without_instances_has_no_binding_sites() {
        let node = json!({"rcsb_id": "1ABC_1"});
        assert!(extract(&node, Some("ATP")).is_empty());
    }
}
