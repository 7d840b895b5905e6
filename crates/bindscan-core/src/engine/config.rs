use super::matcher::{DEFAULT_ENTITY_ID, SearchMethod};
use crate::core::models::residue::AminoAcid;
use crate::core::tree::path::PathResolver;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationParams {
    pub seed: u64,
    pub homopolymer_residue: AminoAcid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    pub search_method: SearchMethod,
    /// Entity number used by the exact-id strategy.
    pub entity_id: String,
    pub strict_paths: bool,
    pub filter_affinity_nulls: bool,
    pub auto_mutate: bool,
    pub mutation: MutationParams,
}

impl ResolveConfig {
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.strict_paths)
    }
}

#[derive(Default)]
pub struct ResolveConfigBuilder {
    search_method: Option<SearchMethod>,
    entity_id: Option<String>,
    strict_paths: Option<bool>,
    filter_affinity_nulls: Option<bool>,
    auto_mutate: Option<bool>,
    seed: Option<u64>,
    homopolymer_residue: Option<AminoAcid>,
}

impl ResolveConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_method(mut self, method: SearchMethod) -> Self {
        self.search_method = Some(method);
        self
    }
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }
    pub fn strict_paths(mut self, strict: bool) -> Self {
        self.strict_paths = Some(strict);
        self
    }
    pub fn filter_affinity_nulls(mut self, filter: bool) -> Self {
        self.filter_affinity_nulls = Some(filter);
        self
    }
    pub fn auto_mutate(mut self, enabled: bool) -> Self {
        self.auto_mutate = Some(enabled);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn homopolymer_residue(mut self, residue: AminoAcid) -> Self {
        self.homopolymer_residue = Some(residue);
        self
    }

    /// Unset fields fall back to the first-entity search method, entity id `"1"`,
    /// lenient paths, and dropping cofactors without an affinity value. A seed and
    /// homopolymer residue are required only when automatic mutation is enabled.
    pub fn build(self) -> Result<ResolveConfig, ConfigError> {
        let auto_mutate = self.auto_mutate.unwrap_or(false);
        let mutation = if auto_mutate {
            MutationParams {
                seed: self.seed.ok_or(ConfigError::MissingParameter("seed"))?,
                homopolymer_residue: self
                    .homopolymer_residue
                    .ok_or(ConfigError::MissingParameter("homopolymer_residue"))?,
            }
        } else {
            MutationParams {
                seed: self.seed.unwrap_or_default(),
                homopolymer_residue: self.homopolymer_residue.unwrap_or(AminoAcid::Alanine),
            }
        };

        Ok(ResolveConfig {
            search_method: self.search_method.unwrap_or(SearchMethod::First),
            entity_id: self
                .entity_id
                .unwrap_or_else(|| DEFAULT_ENTITY_ID.to_string()),
            strict_paths: self.strict_paths.unwrap_or(false),
            filter_affinity_nulls: self.filter_affinity_nulls.unwrap_or(true),
            auto_mutate,
            mutation,
        })
    }
}
