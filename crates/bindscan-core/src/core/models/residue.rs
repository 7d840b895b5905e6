use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // A
    Glycine,    // G
    Isoleucine, // I
    Leucine,    // L
    Proline,    // P
    Valine,     // V

    // --- Aromatic ---
    Phenylalanine, // F
    Tryptophan,    // W
    Tyrosine,      // Y

    // --- Polar, Uncharged ---
    Asparagine, // N
    Cysteine,   // C
    Glutamine,  // Q
    Serine,     // S
    Threonine,  // T
    Methionine, // M

    // --- Positively Charged (Basic) ---
    Arginine,  // R
    Histidine, // H
    Lysine,    // K

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // D
    GlutamicAcid, // E
}

static ONE_LETTER_CODES: Map<char, AminoAcid> = phf_map! {
    'A' => AminoAcid::Alanine,
    'R' => AminoAcid::Arginine,
    'N' => AminoAcid::Asparagine,
    'D' => AminoAcid::AsparticAcid,
    'C' => AminoAcid::Cysteine,
    'Q' => AminoAcid::Glutamine,
    'E' => AminoAcid::GlutamicAcid,
    'G' => AminoAcid::Glycine,
    'H' => AminoAcid::Histidine,
    'I' => AminoAcid::Isoleucine,
    'L' => AminoAcid::Leucine,
    'K' => AminoAcid::Lysine,
    'M' => AminoAcid::Methionine,
    'F' => AminoAcid::Phenylalanine,
    'P' => AminoAcid::Proline,
    'S' => AminoAcid::Serine,
    'T' => AminoAcid::Threonine,
    'W' => AminoAcid::Tryptophan,
    'Y' => AminoAcid::Tyrosine,
    'V' => AminoAcid::Valine,
};

/// The 20 canonical one-letter codes, in the conventional `ARNDCQEGHILKMFPSTWYV` order.
pub const CANONICAL_ONE_LETTER: [char; 20] = [
    'A', 'R', 'N', 'D', 'C', 'Q', 'E', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W',
    'Y', 'V',
];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseAminoAcidError {
    #[error("'{0}' is not a canonical amino-acid code")]
    Unknown(String),
}

impl AminoAcid {
    pub fn from_one_letter(code: char) -> Option<Self> {
        ONE_LETTER_CODES.get(&code.to_ascii_uppercase()).copied()
    }

    pub fn to_one_letter(self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::Arginine => 'R',
            Self::Asparagine => 'N',
            Self::AsparticAcid => 'D',
            Self::Cysteine => 'C',
            Self::Glutamine => 'Q',
            Self::GlutamicAcid => 'E',
            Self::Glycine => 'G',
            Self::Histidine => 'H',
            Self::Isoleucine => 'I',
            Self::Leucine => 'L',
            Self::Lysine => 'K',
            Self::Methionine => 'M',
            Self::Phenylalanine => 'F',
            Self::Proline => 'P',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Tryptophan => 'W',
            Self::Tyrosine => 'Y',
            Self::Valine => 'V',
        }
    }

    pub fn to_three_letter(self) -> &'static str {
        match self {
            Self::Alanine => "ALA",
            Self::Arginine => "ARG",
            Self::Asparagine => "ASN",
            Self::AsparticAcid => "ASP",
            Self::Cysteine => "CYS",
            Self::Glutamine => "GLN",
            Self::GlutamicAcid => "GLU",
            Self::Glycine => "GLY",
            Self::Histidine => "HIS",
            Self::Isoleucine => "ILE",
            Self::Leucine => "LEU",
            Self::Lysine => "LYS",
            Self::Methionine => "MET",
            Self::Phenylalanine => "PHE",
            Self::Proline => "PRO",
            Self::Serine => "SER",
            Self::Threonine => "THR",
            Self::Tryptophan => "TRP",
            Self::Tyrosine => "TYR",
            Self::Valine => "VAL",
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_one_letter())
    }
}

impl FromStr for AminoAcid {
    type Err = ParseAminoAcidError;

    /// Accepts either a one-letter (`"A"`) or a three-letter (`"ALA"`) code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_one_letter(c)
                .ok_or_else(|| ParseAminoAcidError::Unknown(s.to_string()));
        }
        let upper = trimmed.to_ascii_uppercase();
        CANONICAL_ONE_LETTER
            .iter()
            .filter_map(|&c| Self::from_one_letter(c))
            .find(|aa| aa.to_three_letter() == upper)
            .ok_or_else(|| ParseAminoAcidError::Unknown(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_letter_codes_round_trip_for_every_canonical_residue() {
        for &code in CANONICAL_ONE_LETTER.iter() {
            let aa = AminoAcid::from_one_letter(code).unwrap();
            assert_eq!(aa.to_one_letter(), code);
        }
    }

    #[test]
    fn from_one_letter_is_case_insensitive() {
        assert_eq!(AminoAcid::from_one_letter('g'), Some(AminoAcid::Glycine));
    }

    #[test]
    fn from_one_letter_rejects_non_canonical_codes() {
        assert_eq!(AminoAcid::from_one_letter('X'), None);
        assert_eq!(AminoAcid::from_one_letter('B'), None);
        assert_eq!(AminoAcid::from_one_letter('U'), None);
    }

    #[test]
    fn from_str_accepts_one_and_three_letter_codes() {
        assert_eq!("F".parse::<AminoAcid>(), Ok(AminoAcid::Phenylalanine));
        assert_eq!("phe".parse::<AminoAcid>(), Ok(AminoAcid::Phenylalanine));
        assert_eq!(" TRP ".parse::<AminoAcid>(), Ok(AminoAcid::Tryptophan));
    }

    #[test]
    fn from_str_rejects_unknown_codes() {
        assert!(matches!(
            "XYZ".parse::<AminoAcid>(),
            Err(ParseAminoAcidError::Unknown(_))
        ));
        assert!("".parse::<AminoAcid>().is_err());
    }

    #[test]
    fn three_letter_codes_are_distinct() {
        let names: std::collections::HashSet<_> = CANONICAL_ONE_LETTER
            .iter()
            .map(|&c| AminoAcid::from_one_letter(c).unwrap().to_three_letter())
            .collect();
        assert_eq!(names.len(), 20);
    }
}
