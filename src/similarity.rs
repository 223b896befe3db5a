use std::fmt;
use std::str::FromStr;

use similar::TextDiff;

use crate::error::ConfigError;

/// Lexical closeness score used to decide whether two items match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Metric {
    /// `1 - levenshtein / max_len`, symmetric.
    #[default]
    Levenshtein,
    /// difflib-style `2 * matches / total_len` from the `similar` crate.
    /// Not guaranteed symmetric for every pair.
    Sequence,
}

impl Metric {
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            Metric::Levenshtein => similarity(a, b),
            Metric::Sequence => sequence_ratio(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Levenshtein => f.write_str("levenshtein"),
            Metric::Sequence => f.write_str("sequence"),
        }
    }
}

impl FromStr for Metric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "levenshtein" | "edit" => Ok(Metric::Levenshtein),
            "sequence" | "difflib" => Ok(Metric::Sequence),
            _ => Err(ConfigError::UnknownMetric(s.to_string())),
        }
    }
}

/// Unit-cost edit distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            let delete = prev[j + 1] + 1;
            let insert = curr[j] + 1;
            curr[j + 1] = substitute.min(delete).min(insert);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Normalized edit similarity in [0, 1]; case-sensitive.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    // Single rounding, so an exact k/n score equals the same threshold literal.
    (longest - levenshtein(a, b)) as f64 / longest as f64
}

pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    f64::from(TextDiff::from_chars(a, b).ratio())
}
