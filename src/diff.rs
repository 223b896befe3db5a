use serde::Serialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::extract::{Category, Document, Sections};
use crate::similarity::Metric;

/// Minimum similarity that counts as a match. Always in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    pub const DEFAULT: f64 = 0.8;

    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Threshold(value))
        } else {
            Err(ConfigError::InvalidThreshold(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_met_by(self, score: f64) -> bool {
        score >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold(Self::DEFAULT)
    }
}

/// Unmatched items of one category, each side in its own source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryDiff {
    pub only_in_a: Vec<String>,
    pub only_in_b: Vec<String>,
}

impl CategoryDiff {
    pub fn is_empty(&self) -> bool {
        self.only_in_a.is_empty() && self.only_in_b.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub included: CategoryDiff,
    pub excluded: CategoryDiff,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub included_only_a: usize,
    pub included_only_b: usize,
    pub excluded_only_a: usize,
    pub excluded_only_b: usize,
}

impl Counters {
    pub fn total(&self) -> usize {
        self.included_only_a + self.included_only_b + self.excluded_only_a + self.excluded_only_b
    }
}

impl DiffResult {
    pub fn get(&self, category: Category) -> &CategoryDiff {
        match category {
            Category::Included => &self.included,
            Category::Excluded => &self.excluded,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty() && self.excluded.is_empty()
    }

    pub fn summary(&self) -> Counters {
        Counters {
            included_only_a: self.included.only_in_a.len(),
            included_only_b: self.included.only_in_b.len(),
            excluded_only_a: self.excluded.only_in_a.len(),
            excluded_only_b: self.excluded.only_in_b.len(),
        }
    }
}

/// Highest score of `item` against any candidate, `None` when there are none.
pub fn best_similarity(item: &str, candidates: &[String], metric: Metric) -> Option<f64> {
    candidates
        .iter()
        .map(|candidate| metric.score(item, candidate))
        .fold(None, |best, score| match best {
            Some(b) if b >= score => Some(b),
            _ => Some(score),
        })
}

// Each item is judged on its own: one counterpart may excuse many items.
// Cost is |items| * |others| edit-distance runs, with no indexing.
fn unmatched(
    items: &[String],
    others: &[String],
    threshold: Threshold,
    metric: Metric,
) -> Vec<String> {
    items
        .iter()
        .filter(|item| {
            best_similarity(item, others, metric).map_or(true, |best| !threshold.is_met_by(best))
        })
        .cloned()
        .collect()
}

fn compare_category(
    a: &[String],
    b: &[String],
    threshold: Threshold,
    metric: Metric,
) -> CategoryDiff {
    CategoryDiff {
        only_in_a: unmatched(a, b, threshold, metric),
        only_in_b: unmatched(b, a, threshold, metric),
    }
}

/// Fuzzy set difference of two extracted documents using edit similarity.
pub fn compare(a: &Sections, b: &Sections, threshold: Threshold) -> DiffResult {
    compare_with(a, b, threshold, Metric::Levenshtein)
}

pub fn compare_with(
    a: &Sections,
    b: &Sections,
    threshold: Threshold,
    metric: Metric,
) -> DiffResult {
    let result = DiffResult {
        included: compare_category(&a.included, &b.included, threshold, metric),
        excluded: compare_category(&a.excluded, &b.excluded, threshold, metric),
    };

    let counters = result.summary();
    debug!(
        threshold = threshold.value(),
        %metric,
        included_only_a = counters.included_only_a,
        included_only_b = counters.included_only_b,
        excluded_only_a = counters.excluded_only_a,
        excluded_only_b = counters.excluded_only_b,
        "comparison finished"
    );
    result
}

/// Extracts both documents and compares them.
pub fn compare_documents(a: &Document, b: &Document, threshold: Threshold) -> DiffResult {
    compare(&a.sections(), &b.sections(), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn threshold_rejects_out_of_range() {
        assert!(Threshold::new(0.0).is_err());
        assert!(Threshold::new(-0.1).is_err());
        assert!(Threshold::new(1.01).is_err());
        assert!(Threshold::new(f64::NAN).is_err());
        assert_eq!(Threshold::new(1.0).map(Threshold::value), Ok(1.0));
        assert_eq!(Threshold::default().value(), 0.8);
    }

    #[test]
    fn score_equal_to_threshold_is_a_match() {
        // "abcd" vs "abcx": one edit over four chars, similarity 0.75.
        let t = Threshold::new(0.75).unwrap();
        let diff = compare_category(&items(&["abcd"]), &items(&["abcx"]), t, Metric::Levenshtein);
        assert!(diff.is_empty());

        let t = Threshold::new(0.76).unwrap();
        let diff = compare_category(&items(&["abcd"]), &items(&["abcx"]), t, Metric::Levenshtein);
        assert_eq!(diff.only_in_a, vec!["abcd"]);
        assert_eq!(diff.only_in_b, vec!["abcx"]);
    }

    #[test]
    fn inexact_binary_ties_still_match() {
        // One shared char out of ten is a similarity of exactly 0.1.
        let t = Threshold::new(0.1).unwrap();
        let diff = compare_category(
            &items(&["abcdefghij"]),
            &items(&["aXXXXXXXXX"]),
            t,
            Metric::Levenshtein,
        );
        assert!(diff.is_empty());

        let t = Threshold::new(0.2).unwrap();
        let diff = compare_category(&items(&["abcde"]), &items(&["aXXXX"]), t, Metric::Levenshtein);
        assert!(diff.is_empty());
    }

    #[test]
    fn one_counterpart_excuses_many_items() {
        let a = items(&["Apple pie", "Apple pies"]);
        let b = items(&["Apple pie"]);
        let diff = compare_category(&a, &b, Threshold::default(), Metric::Levenshtein);
        assert!(diff.is_empty());
    }

    #[test]
    fn output_keeps_source_order() {
        let a = items(&["zeta", "alpha", "mid"]);
        let diff = compare_category(&a, &[], Threshold::default(), Metric::Levenshtein);
        assert_eq!(diff.only_in_a, vec!["zeta", "alpha", "mid"]);
        assert!(diff.only_in_b.is_empty());
    }

    #[test]
    fn best_similarity_picks_maximum() {
        let candidates = items(&["xyz", "abcx", "abcd"]);
        assert_eq!(best_similarity("abcd", &candidates, Metric::Levenshtein), Some(1.0));
        assert_eq!(best_similarity("abcd", &[], Metric::Levenshtein), None);
    }

    #[test]
    fn item_without_candidates_is_unmatched() {
        let t = Threshold::new(1.0).unwrap();
        let diff = compare_category(&items(&[""]), &[], t, Metric::Levenshtein);
        assert_eq!(diff.only_in_a, vec![""]);
    }

    #[test]
    fn summary_counts_each_side() {
        let result = DiffResult {
            included: CategoryDiff {
                only_in_a: items(&["a"]),
                only_in_b: items(&["b", "c"]),
            },
            excluded: CategoryDiff::default(),
        };
        let counters = result.summary();
        assert_eq!(counters.included_only_a, 1);
        assert_eq!(counters.included_only_b, 2);
        assert_eq!(counters.total(), 3);
        assert!(!result.is_empty());
    }
}
