pub struct DefaultsConfig {
    pub search_method: String,
    pub entity_id: String,
    pub strict_paths: bool,
    pub filter_affinity_nulls: bool,
    pub auto_mutate: bool,
    pub seed: u64,
    pub homopolymer_residue: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            search_method: "first".to_string(),
            entity_id: "1".to_string(),
            strict_paths: false,
            filter_affinity_nulls: true,
            auto_mutate: false,
            seed: 42,
            homopolymer_residue: "A".to_string(),
        }
    }
}
