use std::fmt::Write;

use anyhow::Result;

use crate::diff::DiffResult;
use crate::extract::{Category, Sections};

/// Which document an unmatched item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn marker(self) -> &'static str {
        match self {
            Side::A => "- ",
            Side::B => "+ ",
        }
    }

    pub fn mark(self, item: &str) -> String {
        format!("  {}{item}", self.marker())
    }
}

/// Display names for the two documents, usually their paths.
#[derive(Debug, Clone)]
pub struct Labels {
    pub a: String,
    pub b: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            a: "A".into(),
            b: "B".into(),
        }
    }
}

pub fn render_text(result: &DiffResult, labels: &Labels) -> String {
    let mut out = String::new();

    for category in Category::ALL {
        let diff = result.get(category);
        let _ = writeln!(out, "== {category} ==");
        if diff.is_empty() {
            out.push_str("  (no differences)\n");
            continue;
        }
        for (side, label, list) in [
            (Side::A, &labels.a, &diff.only_in_a),
            (Side::B, &labels.b, &diff.only_in_b),
        ] {
            if list.is_empty() {
                continue;
            }
            let _ = writeln!(out, "Only in {label}:");
            for item in list {
                out.push_str(&side.mark(item));
                out.push('\n');
            }
        }
    }

    let counters = result.summary();
    out.push_str("== Summary ==\n");
    let _ = writeln!(out, "Included only in A:   {}", counters.included_only_a);
    let _ = writeln!(out, "Included only in B:   {}", counters.included_only_b);
    let _ = writeln!(out, "Excluded only in A:   {}", counters.excluded_only_a);
    let _ = writeln!(out, "Excluded only in B:   {}", counters.excluded_only_b);
    out
}

pub fn render_sections_text(sections: &Sections) -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let items = sections.get(category);
        let _ = writeln!(out, "== {category} ({}) ==", items.len());
        for item in items {
            let _ = writeln!(out, "  {item}");
        }
    }
    out
}

pub fn render_json(result: &DiffResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Both documents' sections as `{"a": {..}, "b": {..}}`.
pub fn render_sections_json(a: &Sections, b: &Sections) -> Result<String> {
    let value = serde_json::json!({ "a": a, "b": b });
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::CategoryDiff;

    fn sample() -> DiffResult {
        DiffResult {
            included: CategoryDiff {
                only_in_a: vec!["Banana".into()],
                only_in_b: vec!["Durian".into()],
            },
            excluded: CategoryDiff::default(),
        }
    }

    #[test]
    fn text_marks_each_side() {
        let labels = Labels {
            a: "old.txt".into(),
            b: "new.txt".into(),
        };
        let text = render_text(&sample(), &labels);
        assert!(text.contains("== Included ==\nOnly in old.txt:\n  - Banana\nOnly in new.txt:\n  + Durian\n"));
        assert!(text.contains("== Excluded ==\n  (no differences)\n"));
        assert!(text.contains("Included only in B:   1"));
    }

    #[test]
    fn text_has_no_markup() {
        let result = DiffResult {
            included: CategoryDiff {
                only_in_a: vec!["<b>bold</b> & co".into()],
                only_in_b: vec![],
            },
            excluded: CategoryDiff::default(),
        };
        let text = render_text(&result, &Labels::default());
        assert!(text.contains("  - <b>bold</b> & co\n"));
    }

    #[test]
    fn json_uses_snake_case_fields() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["included"]["only_in_a"][0], "Banana");
        assert_eq!(value["included"]["only_in_b"][0], "Durian");
        assert_eq!(value["excluded"]["only_in_a"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn sections_listing() {
        let sections = Sections {
            included: vec!["Apple".into()],
            excluded: vec![],
        };
        assert_eq!(
            render_sections_text(&sections),
            "== Included (1) ==\n  Apple\n== Excluded (0) ==\n"
        );

        let json = render_sections_json(&sections, &Sections::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["a"]["included"][0], "Apple");
        assert_eq!(value["b"]["excluded"].as_array().map(Vec::len), Some(0));
    }
}
