use crate::core::models::entry::{MutantLabel, MutantSet};
use crate::core::models::residue::{AminoAcid, CANONICAL_ONE_LETTER};
use phf::{Map, phf_map};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MutationError {
    #[error("Residue '{residue}' at position {position} has no dissimilar substitute")]
    UnsupportedResidue { residue: char, position: usize },

    #[error("Position {position} is outside a sequence of length {length}")]
    PositionOutOfRange { position: usize, length: usize },
}

// Most dissimilar substitute for each canonical residue, after Miyata's
// physicochemical distance.
static MIYATA_DISSIMILAR: Map<char, char> = phf_map! {
    'A' => 'W',
    'R' => 'G',
    'N' => 'W',
    'D' => 'W',
    'C' => 'K',
    'Q' => 'G',
    'E' => 'W',
    'G' => 'W',
    'H' => 'G',
    'I' => 'D',
    'L' => 'D',
    'K' => 'G',
    'M' => 'D',
    'F' => 'D',
    'P' => 'W',
    'S' => 'W',
    'T' => 'W',
    'W' => 'G',
    'Y' => 'G',
    'V' => 'D',
};

/// The most dissimilar canonical substitute for `residue`, if it is a canonical letter.
pub fn dissimilar_residue(residue: char) -> Option<char> {
    MIYATA_DISSIMILAR
        .get(&residue.to_ascii_uppercase())
        .copied()
}

/// Draws a sequence of `length` residues uniformly from the 20 canonical letters.
pub fn random_decoy<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| CANONICAL_ONE_LETTER[rng.gen_range(0..CANONICAL_ONE_LETTER.len())])
        .collect()
}

/// Like [`random_decoy`], with a generator created from `seed` for this call only.
pub fn random_decoy_seeded(length: usize, seed: u64) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_decoy(length, &mut rng)
}

/// Builds the control variants of `sequence` for a set of binding-site positions.
///
/// The result holds the reference (`REF`), glycine and phenylalanine scans (`GLY`,
/// `PHE`), a dissimilarity scan (`DIS`), a seeded random decoy (`RND`) and a
/// homopolymer keyed by its letter repeated three times. Every variant has the length
/// of `sequence`. Positions are zero-based.
///
/// # Errors
///
/// Returns [`MutationError::PositionOutOfRange`] for a position past the end of the
/// sequence, and [`MutationError::UnsupportedResidue`] when a binding-site residue has
/// no entry in the dissimilarity table.
pub fn generate(
    sequence: &str,
    positions: &BTreeSet<usize>,
    seed: u64,
    homopolymer: AminoAcid,
) -> Result<MutantSet, MutationError> {
    let residues: Vec<char> = sequence.chars().collect();
    let length = residues.len();

    if let Some(&position) = positions.iter().find(|&&p| p >= length) {
        return Err(MutationError::PositionOutOfRange { position, length });
    }

    let dissimilar = substitute_positions(&residues, positions, |position, residue| {
        dissimilar_residue(residue).ok_or(MutationError::UnsupportedResidue { residue, position })
    })?;

    let mut mutants = MutantSet::default();
    mutants.insert(MutantLabel::Reference, sequence.to_string());
    mutants.insert(
        MutantLabel::GlycineScan,
        substitute_positions(&residues, positions, |_, _| Ok('G'))?,
    );
    mutants.insert(
        MutantLabel::PhenylalanineScan,
        substitute_positions(&residues, positions, |_, _| Ok('F'))?,
    );
    mutants.insert(MutantLabel::DissimilarityScan, dissimilar);
    mutants.insert(MutantLabel::RandomDecoy, random_decoy_seeded(length, seed));
    mutants.insert(
        MutantLabel::Homopolymer(homopolymer),
        homopolymer.to_one_letter().to_string().repeat(length),
    );

    debug!(
        length,
        mutated_positions = positions.len(),
        "Generated {} sequence variants.",
        mutants.len()
    );
    Ok(mutants)
}

fn substitute_positions(
    residues: &[char],
    positions: &BTreeSet<usize>,
    substitute: impl Fn(usize, char) -> Result<char, MutationError>,
) -> Result<String, MutationError> {
    let mut mutated = residues.to_vec();
    for &position in positions {
        mutated[position] = substitute(position, residues[position])?;
    }
    Ok(mutated.into_iter().collect())
}
