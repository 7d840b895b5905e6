use crate::core::io::schema;
use crate::core::models::advisory::Resolved;
use crate::core::models::entity::PolymerEntity;
use crate::core::sequence::similarity::Normalization;
use crate::core::tree::path::{PathError, PathResolver};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

pub const DEFAULT_ENTITY_ID: &str = "1";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MatchError {
    #[error("Cannot select an entity from an empty candidate list")]
    EmptyEntityList,

    #[error("Invalid matching strategy '{method}': {reason}")]
    InvalidStrategy { method: String, reason: String },

    #[error(transparent)]
    Path(#[from] PathError),
}

/// User-facing name of a matching strategy, validated once at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMethod {
    ExactId,
    LigandSubject,
    First,
    SequenceSimilarity(Normalization),
}

impl SearchMethod {
    pub const NAMES: [&'static str; 5] =
        ["rcsb_id", "ligand", "first", "similarity-max", "similarity-min"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ExactId => "rcsb_id",
            Self::LigandSubject => "ligand",
            Self::First => "first",
            Self::SequenceSimilarity(Normalization::Longest) => "similarity-max",
            Self::SequenceSimilarity(Normalization::Shortest) => "similarity-min",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchMethod {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "rcsb-id" => Ok(Self::ExactId),
            "ligand" => Ok(Self::LigandSubject),
            "first" => Ok(Self::First),
            "similarity-max" => Ok(Self::SequenceSimilarity(Normalization::Longest)),
            "similarity-min" => Ok(Self::SequenceSimilarity(Normalization::Shortest)),
            "similarity" => Err(MatchError::InvalidStrategy {
                method: s.to_string(),
                reason: "choose a normalization explicitly: 'similarity-max' or 'similarity-min'"
                    .to_string(),
            }),
            _ => Err(MatchError::InvalidStrategy {
                method: s.to_string(),
                reason: format!("expected one of: {}", Self::NAMES.join(", ")),
            }),
        }
    }
}

/// A matching strategy together with the parameters it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchStrategy<'s> {
    ExactId {
        entry_id: &'s str,
        entity_id: &'s str,
    },
    LigandSubject {
        ligand: &'s str,
    },
    First,
    SequenceSimilarity {
        reference: &'s str,
        normalization: Normalization,
    },
}

impl<'s> MatchStrategy<'s> {
    /// Binds a parsed method to its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidStrategy`] when the method needs a parameter that
    /// was not supplied (a ligand for `ligand`, a reference sequence for similarity).
    pub fn bind(
        method: SearchMethod,
        entry_id: &'s str,
        entity_id: &'s str,
        ligand: Option<&'s str>,
        reference: Option<&'s str>,
    ) -> Result<Self, MatchError> {
        match method {
            SearchMethod::ExactId => Ok(Self::ExactId {
                entry_id,
                entity_id,
            }),
            SearchMethod::LigandSubject => ligand
                .map(|ligand| Self::LigandSubject { ligand })
                .ok_or_else(|| MatchError::InvalidStrategy {
                    method: method.to_string(),
                    reason: "no ligand was supplied or identified as subject of investigation"
                        .to_string(),
                }),
            SearchMethod::First => Ok(Self::First),
            SearchMethod::SequenceSimilarity(normalization) => reference
                .map(|reference| Self::SequenceSimilarity {
                    reference,
                    normalization,
                })
                .ok_or_else(|| MatchError::InvalidStrategy {
                    method: method.to_string(),
                    reason: "a reference sequence is required".to_string(),
                }),
        }
    }
}

/// Selects the polymer entity relevant to the caller from a multi-entity entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityMatcher {
    resolver: PathResolver,
}

impl EntityMatcher {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Returns the selected entity, or `None` when a lookup strategy finds no match.
    ///
    /// # Errors
    ///
    /// `First` and `SequenceSimilarity` fail with [`MatchError::EmptyEntityList`] on an
    /// empty candidate list; strict path resolution may fail with [`MatchError::Path`].
    pub fn select<'a>(
        &self,
        entities: &[PolymerEntity<'a>],
        strategy: MatchStrategy<'_>,
    ) -> Result<Resolved<Option<PolymerEntity<'a>>>, MatchError> {
        match strategy {
            MatchStrategy::ExactId {
                entry_id,
                entity_id,
            } => self.by_exact_id(entities, entry_id, entity_id),
            MatchStrategy::LigandSubject { ligand } => self.by_ligand_subject(entities, ligand),
            MatchStrategy::First => entities
                .first()
                .copied()
                .map(|entity| Resolved::clean(Some(entity)))
                .ok_or(MatchError::EmptyEntityList),
            MatchStrategy::SequenceSimilarity {
                reference,
                normalization,
            } => self.by_sequence_similarity(entities, reference, normalization),
        }
    }

    fn by_exact_id<'a>(
        &self,
        entities: &[PolymerEntity<'a>],
        entry_id: &str,
        entity_id: &str,
    ) -> Result<Resolved<Option<PolymerEntity<'a>>>, MatchError> {
        let wanted = format!("{}_{}", entry_id, entity_id);
        let mut advisories = Vec::new();
        for entity in entities {
            if entity.id(&self.resolver)?.absorb(&mut advisories) == Some(wanted.as_str()) {
                return Ok(Resolved::new(Some(*entity), advisories));
            }
        }
        debug!("No polymer entity with id '{}'.", wanted);
        Ok(Resolved::new(None, advisories))
    }

    fn by_ligand_subject<'a>(
        &self,
        entities: &[PolymerEntity<'a>],
        ligand: &str,
    ) -> Result<Resolved<Option<PolymerEntity<'a>>>, MatchError> {
        let wanted = schema::ligand_feature_name(ligand);
        let mut advisories = Vec::new();
        for entity in entities {
            let features = entity
                .instance_features(&self.resolver)?
                .absorb(&mut advisories);
            let found = features
                .iter()
                .filter(|f| f.is_ligand_interaction())
                .any(|f| f.name() == Some(wanted.as_str()));
            if found {
                return Ok(Resolved::new(Some(*entity), advisories));
            }
        }
        debug!("No polymer entity carries a '{}' feature.", wanted);
        Ok(Resolved::new(None, advisories))
    }

    fn by_sequence_similarity<'a>(
        &self,
        entities: &[PolymerEntity<'a>],
        reference: &str,
        normalization: Normalization,
    ) -> Result<Resolved<Option<PolymerEntity<'a>>>, MatchError> {
        if entities.is_empty() {
            return Err(MatchError::EmptyEntityList);
        }

        let mut advisories = Vec::new();
        let mut best: Option<(PolymerEntity<'a>, f64)> = None;
        for entity in entities {
            let sequence = entity
                .canonical_sequence(&self.resolver)?
                .absorb(&mut advisories)
                .unwrap_or_default();
            let score = normalization.score(&sequence, reference);
            trace!(entity = %entity.label(), score, "Scored candidate entity.");

            // Ties keep the earlier candidate.
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((*entity, score));
            }
        }

        Ok(Resolved::new(best.map(|(entity, _)| entity), advisories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn entity_json(id: &str, sequence: &str, ligands: &[&str]) -> Value {
        let features: Vec<Value> = ligands
            .iter()
            .map(|name| {
                json!({
                    "type": "LIGAND_INTERACTION",
                    "name": format!("ligand {}", name),
                    "feature_positions": [{"beg_seq_id": 1}]
                })
            })
            .collect();
        json!({
            "rcsb_id": id,
            "entity_poly": {"pdbx_seq_one_letter_code_can": sequence},
            "polymer_entity_instances": [{"rcsb_polymer_instance_feature": features}]
        })
    }

    fn views(nodes: &[Value]) -> Vec<PolymerEntity<'_>> {
        nodes
            .iter()
            .enumerate()
            .map(|(i, node)| PolymerEntity::new(i, node))
            .collect()
    }

    fn selected_index(
        matcher: &EntityMatcher,
        entities: &[PolymerEntity<'_>],
        strategy: MatchStrategy<'_>,
    ) -> Option<usize> {
        matcher
            .select(entities, strategy)
            .unwrap()
            .value
            .map(|e| e.index())
    }

    #[test]
    fn search_method_parses_known_names() {
        assert_eq!("rcsb_id".parse(), Ok(SearchMethod::ExactId));
        assert_eq!("LIGAND".parse(), Ok(SearchMethod::LigandSubject));
        assert_eq!("first".parse(), Ok(SearchMethod::First));
        assert_eq!(
            "similarity-max".parse(),
            Ok(SearchMethod::SequenceSimilarity(Normalization::Longest))
        );
        assert_eq!(
            "similarity_min".parse(),
            Ok(SearchMethod::SequenceSimilarity(Normalization::Shortest))
        );
    }

    #[test]
    fn search_method_names_round_trip() {
        for name in SearchMethod::NAMES {
            let method: SearchMethod = name.parse().unwrap();
            assert_eq!(method.name(), name);
        }
    }

    #[test]
    fn search_method_rejects_unknown_and_unqualified_names() {
        assert!(matches!(
            "closest".parse::<SearchMethod>(),
            Err(MatchError::InvalidStrategy { .. })
        ));
        assert!(matches!(
            "similarity".parse::<SearchMethod>(),
            Err(MatchError::InvalidStrategy { .. })
        ));
    }

    #[test]
    fn bind_requires_ligand_and_reference_where_needed() {
        assert!(matches!(
            MatchStrategy::bind(SearchMethod::LigandSubject, "1ABC", "1", None, None),
            Err(MatchError::InvalidStrategy { .. })
        ));
        assert!(matches!(
            MatchStrategy::bind(
                SearchMethod::SequenceSimilarity(Normalization::Longest),
                "1ABC",
                "1",
                Some("ATP"),
                None
            ),
            Err(MatchError::InvalidStrategy { .. })
        ));
        assert_eq!(
            MatchStrategy::bind(SearchMethod::LigandSubject, "1ABC", "1", Some("ATP"), None),
            Ok(MatchStrategy::LigandSubject { ligand: "ATP" })
        );
    }

    #[test]
    fn first_returns_index_zero_regardless_of_content() {
        let nodes = vec![json!({}), entity_json("1ABC_2", "MKT", &["ATP"])];
        let entities = views(&nodes);
        let matcher = EntityMatcher::default();
        assert_eq!(
            selected_index(&matcher, &entities, MatchStrategy::First),
            Some(0)
        );
    }

    #[test]
    fn first_fails_on_empty_list() {
        let matcher = EntityMatcher::default();
        assert_eq!(
            matcher.select(&[], MatchStrategy::First).unwrap_err(),
            MatchError::EmptyEntityList
        );
    }

    #[test]
    fn exact_id_matches_entry_and_entity_id() {
        let nodes = vec![
            entity_json("1ABC_1", "MKT", &[]),
            entity_json("1ABC_2", "GGG", &[]),
        ];
        let entities = views(&nodes);
        let matcher = EntityMatcher::default();
        let strategy = MatchStrategy::ExactId {
            entry_id: "1ABC",
            entity_id: "2",
        };
        assert_eq!(selected_index(&matcher, &entities, strategy), Some(1));
    }

    #[test]
    fn exact_id_without_match_returns_none() {
        let nodes = vec![entity_json("1ABC_1", "MKT", &[])];
        let entities = views(&nodes);
        let strategy = MatchStrategy::ExactId {
            entry_id: "9XYZ",
            entity_id: DEFAULT_ENTITY_ID,
        };
        assert_eq!(
            selected_index(&EntityMatcher::default(), &entities, strategy),
            None
        );
    }

    #[test]
    fn ligand_subject_finds_first_entity_with_matching_feature() {
        let nodes = vec![
            entity_json("1ABC_1", "MKT", &["HEM"]),
            entity_json("1ABC_2", "GGG", &["ATP"]),
            entity_json("1ABC_3", "AAA", &["ATP"]),
        ];
        let entities = views(&nodes);
        let strategy = MatchStrategy::LigandSubject { ligand: "atp" };
        assert_eq!(
            selected_index(&EntityMatcher::default(), &entities, strategy),
            Some(1)
        );
    }

    #[test]
    fn ligand_subject_ignores_non_interaction_features() {
        let node = json!({
            "rcsb_id": "1ABC_1",
            "polymer_entity_instances": [{
                "rcsb_polymer_instance_feature": [{"type": "BINDING_SITE", "name": "ligand ATP"}]
            }]
        });
        let nodes = vec![node];
        let entities = views(&nodes);
        let strategy = MatchStrategy::LigandSubject { ligand: "ATP" };
        assert_eq!(
            selected_index(&EntityMatcher::default(), &entities, strategy),
            None
        );
    }

    #[test]
    fn similarity_picks_highest_score() {
        let nodes = vec![
            entity_json("1ABC_1", "GGGGGGGG", &[]),
            entity_json("1ABC_2", "MKTAYIAKQR", &[]),
            entity_json("1ABC_3", "MKTAY", &[]),
        ];
        let entities = views(&nodes);
        let strategy = MatchStrategy::SequenceSimilarity {
            reference: "MKTAYIAKQR",
            normalization: Normalization::Longest,
        };
        assert_eq!(
            selected_index(&EntityMatcher::default(), &entities, strategy),
            Some(1)
        );
    }

    #[test]
    fn similarity_ties_keep_earliest_candidate() {
        let nodes = vec![
            entity_json("1ABC_1", "MKTAY", &[]),
            entity_json("1ABC_2", "MKTAYIAKQR", &[]),
        ];
        let entities = views(&nodes);
        // Both candidates fully contain the reference, so both score 1.0 under
        // shortest-length normalization.
        let strategy = MatchStrategy::SequenceSimilarity {
            reference: "MKTAY",
            normalization: Normalization::Shortest,
        };
        assert_eq!(
            selected_index(&EntityMatcher::default(), &entities, strategy),
            Some(0)
        );
    }

    #[test]
    fn similarity_normalization_changes_the_winner() {
        let nodes = vec![
            entity_json("1ABC_1", "AKQRQ", &[]),
            entity_json("1ABC_2", "MKTAYIAKQRQISFVKSHFSRQ", &[]),
        ];
        let entities = views(&nodes);
        let reference = "MKTAYIAKQRQISFVKSHFSRQAAAA";
        let longest = MatchStrategy::SequenceSimilarity {
            reference,
            normalization: Normalization::Longest,
        };
        assert_eq!(
            selected_index(&EntityMatcher::default(), &entities, longest),
            Some(1)
        );
        let shortest = MatchStrategy::SequenceSimilarity {
            reference,
            normalization: Normalization::Shortest,
        };
        assert_eq!(
            selected_index(&EntityMatcher::default(), &entities, shortest),
            Some(0)
        );
    }

    #[test]
    fn similarity_fails_on_empty_list() {
        let strategy = MatchStrategy::SequenceSimilarity {
            reference: "MKT",
            normalization: Normalization::Longest,
        };
        assert_eq!(
            EntityMatcher::default().select(&[], strategy).unwrap_err(),
            MatchError::EmptyEntityList
        );
    }

    #[test]
    fn strict_matcher_propagates_ambiguous_instances() {
        let node = json!({
            "rcsb_id": "1ABC_1",
            "polymer_entity_instances": [
                {"rcsb_polymer_instance_feature": []},
                {"rcsb_polymer_instance_feature": []}
            ]
        });
        let nodes = vec![node];
        let entities = views(&nodes);
        let matcher = EntityMatcher::new(PathResolver::strict());
        let err = matcher
            .select(&entities, MatchStrategy::LigandSubject { ligand: "ATP" })
            .unwrap_err();
        assert!(matches!(err, MatchError::Path(PathError::Ambiguous { count: 2, .. })));
    }
}
