//! Field paths into RCSB `entry` query results.
//!
//! Every key the pipeline reads from a result document is named here, so a schema
//! change upstream is a change to this file only. The GraphQL query issued by the
//! command-line client selects exactly these fields.

use crate::core::tree::path::PathKey::{self, Key};

pub const GRAPHQL_DATA: &str = "data";
pub const GRAPHQL_ENTRY: &str = "entry";
pub const GRAPHQL_ERRORS: &str = "errors";

pub const ENTRY_ID: &[PathKey<'static>] = &[Key("rcsb_id")];
pub const POLYMER_ENTITIES: &[PathKey<'static>] = &[Key("polymer_entities")];
pub const NONPOLYMER_ENTITIES: &[PathKey<'static>] = &[Key("nonpolymer_entities")];

// --- Polymer entity ---

pub const ENTITY_ID: &[PathKey<'static>] = &[Key("rcsb_id")];
pub const CANONICAL_SEQUENCE: &[PathKey<'static>] =
    &[Key("entity_poly"), Key("pdbx_seq_one_letter_code_can")];
pub const UNIPROT_IDS: &[PathKey<'static>] = &[
    Key("rcsb_polymer_entity_container_identifiers"),
    Key("uniprot_ids"),
];
pub const ALIGNED_REGIONS: &[PathKey<'static>] = &[
    Key("rcsb_polymer_entity_align"),
    Key("aligned_regions"),
];
pub const ALIGNMENT_ACCESSION: &[PathKey<'static>] = &[
    Key("rcsb_polymer_entity_align"),
    Key("reference_database_accession"),
];
pub const INSTANCE_FEATURES: &[PathKey<'static>] = &[
    Key("polymer_entity_instances"),
    Key("rcsb_polymer_instance_feature"),
];
pub const COFACTORS: &[PathKey<'static>] = &[Key("rcsb_cofactors")];

pub const REGION_ENTITY_BEGIN: &str = "entity_beg_seq_id";
pub const REGION_REFERENCE_BEGIN: &str = "ref_beg_seq_id";
pub const REGION_LENGTH: &str = "length";

// --- Instance features ---

pub const FEATURE_TYPE: &str = "type";
pub const FEATURE_NAME: &str = "name";
pub const FEATURE_POSITIONS: &str = "feature_positions";
pub const FEATURE_BEGIN_SEQ_ID: &str = "beg_seq_id";
pub const LIGAND_INTERACTION: &str = "LIGAND_INTERACTION";

// --- Non-polymer entity ---

pub const NONPOLYMER_COMP_ID: &[PathKey<'static>] =
    &[Key("pdbx_entity_nonpoly"), Key("comp_id")];
pub const SUBJECT_OF_INVESTIGATION: &[PathKey<'static>] = &[
    Key("nonpolymer_entity_instances"),
    Key("rcsb_nonpolymer_instance_validation_score"),
    Key("is_subject_of_investigation"),
];
pub const SUBJECT_FLAG_YES: &str = "Y";

/// Name under which ligand-interaction features for `ligand` are annotated.
pub fn ligand_feature_name(ligand: &str) -> String {
    format!("ligand {}", ligand.to_uppercase())
}
