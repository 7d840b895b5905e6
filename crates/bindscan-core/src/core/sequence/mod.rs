//! # Sequence Module
//!
//! Symbol-sequence utilities shared by the matching and mutation stages.
//!
//! - **Similarity** ([`similarity`]) - Longest-common-subsequence length and the two
//!   normalized similarity scores derived from it.

pub mod similarity;

/// Strips the line breaks and padding some records embed in canonical sequences.
pub fn normalize_sequence(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}
