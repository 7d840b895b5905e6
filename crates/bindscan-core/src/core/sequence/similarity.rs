/// Which sequence length a raw LCS length is divided by.
///
/// The two choices disagree when the sequences differ greatly in length: dividing by
/// the shorter sequence rewards a short fragment that is fully contained in a long
/// chain, dividing by the longer one penalizes the length mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalization {
    Longest,
    Shortest,
}

impl Normalization {
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            Normalization::Longest => similarity_max_norm(a, b),
            Normalization::Shortest => similarity_min_norm(a, b),
        }
    }
}

/// Length of the longest common subsequence of `a` and `b`.
///
/// Standard O(|a|·|b|) recurrence, keeping only two rows of the table.
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if inner.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];

    for x in outer {
        for (j, y) in inner.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}

fn lcs_of_strs(a: &str, b: &str) -> (usize, usize, usize) {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    (lcs_length(&a, &b), a.len(), b.len())
}

/// LCS length divided by the length of the longer sequence. `0.0` when both are empty.
pub fn similarity_max_norm(a: &str, b: &str) -> f64 {
    let (lcs, len_a, len_b) = lcs_of_strs(a, b);
    let denominator = len_a.max(len_b);
    if denominator == 0 {
        return 0.0;
    }
    lcs as f64 / denominator as f64
}

/// LCS length divided by the length of the shorter sequence. `0.0` when either is empty.
pub fn similarity_min_norm(a: &str, b: &str) -> f64 {
    let (lcs, len_a, len_b) = lcs_of_strs(a, b);
    let denominator = len_a.min(len_b);
    if denominator == 0 {
        return 0.0;
    }
    lcs as f64 / denominator as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcs_of_textbook_example_is_four() {
        assert_eq!(lcs_length(b"ABCBDAB", b"BDCAB"), 4);
    }

    #[test]
    fn lcs_of_sequence_with_itself_is_its_length() {
        for s in ["", "A", "MKTAYIAKQR", "GGGGGG"] {
            let chars: Vec<char> = s.chars().collect();
            assert_eq!(lcs_length(&chars, &chars), chars.len());
        }
    }

    #[test]
    fn lcs_is_symmetric() {
        let pairs: [(&[u8], &[u8]); 4] = [
            (b"MKTAYIAKQR", b"MKTAYQR"),
            (b"ACGT", b"TGCA"),
            (b"", b"ABC"),
            (b"AAAB", b"BAAA"),
        ];
        for (a, b) in pairs {
            assert_eq!(lcs_length(a, b), lcs_length(b, a));
        }
    }

    #[test]
    fn lcs_of_disjoint_alphabets_is_zero() {
        assert_eq!(lcs_length(b"AAAA", b"CCCC"), 0);
    }

    #[test]
    fn similarity_is_within_unit_interval() {
        let samples = ["M", "MKT", "MKTAYIAKQRQISFVKSHFSRQ", "WWWW", "AKQ"];
        for a in samples {
            for b in samples {
                for score in [similarity_max_norm(a, b), similarity_min_norm(a, b)] {
                    assert!((0.0..=1.0).contains(&score), "{} vs {}: {}", a, b, score);
                }
            }
        }
    }

    #[test]
    fn identical_sequences_score_one() {
        assert_eq!(similarity_max_norm("MKTAY", "MKTAY"), 1.0);
        assert_eq!(similarity_min_norm("MKTAY", "MKTAY"), 1.0);
    }

    #[test]
    fn normalizations_differ_for_contained_fragment() {
        let chain = "MKTAYIAKQRQISFVKSHFSRQ";
        let fragment = "AKQRQ";
        assert_eq!(similarity_min_norm(chain, fragment), 1.0);
        let longest = similarity_max_norm(chain, fragment);
        assert!((longest - 5.0 / 22.0).abs() < 1e-12);
    }

    #[test]
    fn empty_inputs_score_zero_without_panicking() {
        assert_eq!(similarity_max_norm("", ""), 0.0);
        assert_eq!(similarity_min_norm("", ""), 0.0);
        assert_eq!(similarity_min_norm("", "ABC"), 0.0);
        assert_eq!(similarity_max_norm("", "ABC"), 0.0);
    }

    #[test]
    fn normalization_enum_dispatches_to_named_functions() {
        let (a, b) = ("MKTAYIAKQR", "AKQ");
        assert_eq!(Normalization::Longest.score(a, b), similarity_max_norm(a, b));
        assert_eq!(Normalization::Shortest.score(a, b), similarity_min_norm(a, b));
    }
}
