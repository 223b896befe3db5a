use thiserror::Error;

/// Caller misuse detected while setting up a comparison run.
///
/// Parsing and comparing themselves never fail; only configuration does.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid similarity threshold {0}: must be in (0, 1]")]
    InvalidThreshold(f64),

    #[error("unknown document format '{0}' (expected 'a'/'convention-a' or 'b'/'convention-b')")]
    UnknownFormat(String),

    #[error("unknown similarity metric '{0}' (expected 'levenshtein' or 'sequence')")]
    UnknownMetric(String),
}
