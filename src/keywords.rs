//! Omics keywords and their combinations
//!
//! A study counts as multiomics when it carries at least two of the keywords
//! below in PubMed's "Other Term" field. Every combination of two or more
//! keywords is searched separately and the results are merged per year.

use std::fmt;
use std::str::FromStr;

use crate::error::{PubMedError, Result};

/// Omics subfields searched as PubMed "Other Term" filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    Genomics,
    Lipidomics,
    Proteomics,
    Glycomics,
    Transcriptomics,
    Metabolomics,
    Epigenomics,
    Metagenomics,
    Phosphoproteomics,
}

impl Keyword {
    /// All keywords in canonical order
    pub const ALL: [Keyword; 9] = [
        Keyword::Genomics,
        Keyword::Lipidomics,
        Keyword::Proteomics,
        Keyword::Glycomics,
        Keyword::Transcriptomics,
        Keyword::Metabolomics,
        Keyword::Epigenomics,
        Keyword::Metagenomics,
        Keyword::Phosphoproteomics,
    ];

    /// The term as it appears in a PubMed query
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Genomics => "genomics",
            Keyword::Lipidomics => "lipidomics",
            Keyword::Proteomics => "proteomics",
            Keyword::Glycomics => "glycomics",
            Keyword::Transcriptomics => "transcriptomics",
            Keyword::Metabolomics => "metabolomics",
            Keyword::Epigenomics => "epigenomics",
            Keyword::Metagenomics => "metagenomics",
            Keyword::Phosphoproteomics => "phosphoproteomics",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Keyword {
    type Err = PubMedError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Keyword::ALL
            .into_iter()
            .find(|keyword| keyword.as_str() == name)
            .ok_or_else(|| PubMedError::UnknownKeyword(s.to_string()))
    }
}

/// Two or more distinct keywords, kept in the order of the source list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeywordCombination(Vec<Keyword>);

impl KeywordCombination {
    pub fn keywords(&self) -> &[Keyword] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeywordCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Keyword::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Generate every combination of 2..=K keywords
///
/// Combinations are grouped by size (pairs first) and, within a size,
/// enumerated in lexicographic index order. Each combination preserves the
/// relative order of `keywords`. Fewer than two keywords yields nothing.
///
/// # Example
///
/// ```
/// use multiomics_survey::keywords::{keyword_combinations, Keyword};
///
/// let combinations = keyword_combinations(&Keyword::ALL);
/// assert_eq!(combinations.len(), 502);
/// assert_eq!(
///     combinations[0].keywords(),
///     &[Keyword::Genomics, Keyword::Lipidomics]
/// );
/// ```
pub fn keyword_combinations(keywords: &[Keyword]) -> Vec<KeywordCombination> {
    (2..=keywords.len())
        .flat_map(|size| combinations_of_size(keywords, size))
        .map(KeywordCombination)
        .collect()
}

fn combinations_of_size<T: Copy>(items: &[T], size: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if size == 0 || size > n {
        return Vec::new();
    }

    let mut indices: Vec<usize> = (0..size).collect();
    let mut combinations = vec![indices.iter().map(|&i| items[i]).collect()];

    // Advance the rightmost index that still has room, then pack the rest
    // immediately after it.
    while let Some(pos) = (0..size).rev().find(|&i| indices[i] != i + n - size) {
        indices[pos] += 1;
        for next in pos + 1..size {
            indices[next] = indices[next - 1] + 1;
        }
        combinations.push(indices.iter().map(|&i| items[i]).collect());
    }

    combinations
}
