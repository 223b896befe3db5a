use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::ConfigError;

/// Header vocabulary a document uses to open its included/excluded sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// "This class includes" / "This class excludes" headers.
    ConventionA,
    /// Bare "Include" / "Exclude" header lines.
    ConventionB,
}

impl FormatKind {
    pub const ALL: [FormatKind; 2] = [FormatKind::ConventionA, FormatKind::ConventionB];
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::ConventionA => f.write_str("convention-a"),
            FormatKind::ConventionB => f.write_str("convention-b"),
        }
    }
}

impl FromStr for FormatKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "convention-a" | "class" => Ok(FormatKind::ConventionA),
            "b" | "convention-b" | "plain" => Ok(FormatKind::ConventionB),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Included,
    Excluded,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Included, Category::Excluded];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Included => f.write_str("Included"),
            Category::Excluded => f.write_str("Excluded"),
        }
    }
}

/// Items collected from one document, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sections {
    pub included: Vec<String>,
    pub excluded: Vec<String>,
}

impl Sections {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Included => &self.included,
            Category::Excluded => &self.excluded,
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Included => &mut self.included,
            Category::Excluded => &mut self.excluded,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty() && self.excluded.is_empty()
    }
}

/// Raw document text plus its declared format, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub format: Option<FormatKind>,
}

impl Document {
    pub fn new(text: impl Into<String>, format: FormatKind) -> Self {
        Self {
            text: text.into(),
            format: Some(format),
        }
    }

    /// A document whose format is detected from its first header line.
    pub fn infer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: None,
        }
    }

    /// Declared format, else the detected one. Text without any header of
    /// either convention falls back to `ConventionA`; it extracts nothing
    /// under either convention.
    pub fn resolved_format(&self) -> FormatKind {
        self.format
            .or_else(|| detect_format(&self.text))
            .unwrap_or(FormatKind::ConventionA)
    }

    pub fn sections(&self) -> Sections {
        extract(&self.text, self.resolved_format())
    }
}

fn normalize_header(line: &str) -> String {
    line.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Category opened by `line` if it is a section header under `format`.
pub fn header_category(line: &str, format: FormatKind) -> Option<Category> {
    let norm = normalize_header(line);
    match format {
        FormatKind::ConventionA => {
            if norm.starts_with("this class includes") {
                Some(Category::Included)
            } else if norm.starts_with("this class excludes") {
                Some(Category::Excluded)
            } else {
                None
            }
        }
        FormatKind::ConventionB => {
            // Whole line must be the keyword, so prose mentioning it is not a header.
            let word = norm.strip_suffix(':').unwrap_or(&norm).trim_end();
            match word {
                "include" => Some(Category::Included),
                "exclude" => Some(Category::Excluded),
                _ => None,
            }
        }
    }
}

// A bulleted header ("- Include:") still opens its section.
fn line_header(line: &str, format: FormatKind) -> Option<Category> {
    header_category(line, format).or_else(|| header_category(&normalize_item(line), format))
}

/// First header of either convention found in `text`, top to bottom.
pub fn detect_format(text: &str) -> Option<FormatKind> {
    text.lines().find_map(|line| {
        FormatKind::ALL
            .into_iter()
            .find(|format| line_header(line, *format).is_some())
    })
}

/// Strips one leading bullet (`-`, `•`, `*`) or enumerator (`1.`, `2)`,
/// `a.`, `B)`) and surrounding whitespace. Other punctuation is kept.
pub fn normalize_item(line: &str) -> String {
    let trimmed = line.trim();
    strip_list_marker(trimmed).trim().to_string()
}

fn strip_list_marker(s: &str) -> &str {
    if let Some(rest) = s.strip_prefix(['-', '•', '*']) {
        return rest;
    }
    strip_enumerator(s).unwrap_or(s)
}

fn strip_enumerator(s: &str) -> Option<&str> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let label_len = if digits > 0 {
        digits
    } else if s.chars().next()?.is_ascii_alphabetic() {
        1
    } else {
        return None;
    };

    let rest = s[label_len..].strip_prefix(['.', ')'])?;
    // "e.g." and "3.5kg" are text, not enumerators.
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// Splits `text` into included and excluded items under `format`.
///
/// Total over any input: lines outside a recognized section are dropped,
/// and a category with no header comes back empty.
pub fn extract(text: &str, format: FormatKind) -> Sections {
    let mut sections = Sections::default();
    let mut current: Option<Category> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(category) = line_header(line, format) {
            trace!(%category, %format, line, "section header");
            current = Some(category);
            continue;
        }

        let Some(category) = current else {
            continue;
        };
        let item = normalize_item(line);
        if !item.is_empty() {
            sections.list_mut(category).push(item);
        }
    }

    debug!(
        %format,
        included = sections.included.len(),
        excluded = sections.excluded.len(),
        "sections extracted"
    );
    sections
}
