use super::advisory::Advisory;
use super::residue::AminoAcid;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Ligand-interaction feature name → zero-based sequence positions.
pub type LigandInteractionMap = BTreeMap<String, BTreeSet<usize>>;

/// One caller request: an entry identifier plus optional matching hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRequest {
    pub pdb_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ligand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_sequence: Option<String>,
}

impl EntryRequest {
    pub fn new(pdb_id: impl Into<String>) -> Self {
        Self {
            pdb_id: pdb_id.into(),
            ligand: None,
            reference_sequence: None,
        }
    }

    pub fn with_ligand(mut self, ligand: impl Into<String>) -> Self {
        self.ligand = Some(ligand.into());
        self
    }

    pub fn with_reference_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.reference_sequence = Some(sequence.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MutantLabel {
    Reference,
    GlycineScan,
    PhenylalanineScan,
    DissimilarityScan,
    RandomDecoy,
    Homopolymer(AminoAcid),
}

impl MutantLabel {
    pub fn key(&self) -> String {
        match self {
            Self::Reference => "REF".to_string(),
            Self::GlycineScan => "GLY".to_string(),
            Self::PhenylalanineScan => "PHE".to_string(),
            Self::DissimilarityScan => "DIS".to_string(),
            Self::RandomDecoy => "RND".to_string(),
            Self::Homopolymer(residue) => residue.to_one_letter().to_string().repeat(3),
        }
    }
}

impl fmt::Display for MutantLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Sequence variants keyed by label. Every variant has the length of the input sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutantSet {
    variants: BTreeMap<String, String>,
}

impl MutantSet {
    pub(crate) fn insert(&mut self, label: MutantLabel, sequence: String) {
        self.variants.insert(label.key(), sequence);
    }

    pub fn get(&self, label: MutantLabel) -> Option<&str> {
        self.variants.get(&label.key()).map(String::as_str)
    }

    pub fn get_by_key(&self, key: &str) -> Option<&str> {
        self.variants.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variants
            .iter()
            .map(|(label, sequence)| (label.as_str(), sequence.as_str()))
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Mapping of an entity's numbering onto an external reference sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_accession: Option<String>,
    pub entity_begin: i64,
    pub reference_begin: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    /// `reference_begin - entity_begin`; add it to an entity position to get the
    /// reference position.
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cofactor {
    #[serde(default, alias = "cofactor_chem_comp_id")]
    pub chem_comp_id: Option<String>,
    #[serde(default, alias = "cofactor_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub binding_assay_value: Option<f64>,
    #[serde(default)]
    pub binding_assay_value_type: Option<String>,
}

/// The pipeline's output for one entry identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    pub pdb_id: String,
    pub entity_id: Option<String>,
    pub sequence: String,
    #[serde(default)]
    pub uniprot_ids: Vec<String>,
    pub alignment: Option<Alignment>,
    pub ligand: Option<String>,
    pub ligand_interactions: LigandInteractionMap,
    #[serde(default)]
    pub cofactors: Vec<Cofactor>,
    pub mutants: Option<MutantSet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<Advisory>,
}

impl ResolvedEntry {
    /// Union of the positions of every ligand interaction.
    pub fn binding_site_positions(&self) -> BTreeSet<usize> {
        self.ligand_interactions
            .values()
            .flat_map(|positions| positions.iter().copied())
            .collect()
    }
}
