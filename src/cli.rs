use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::diff::Threshold;
use crate::extract::FormatKind;
use crate::similarity::Metric;
use crate::utils::is_stdin;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// First document (A); `-` reads stdin
    pub doc_a: PathBuf,

    /// Second document (B); `-` reads stdin
    pub doc_b: PathBuf,

    /// Header convention of A: auto, a (This class includes/excludes) or b (Include/Exclude)
    #[arg(long, default_value = "auto")]
    pub format_a: String,

    /// Header convention of B: auto, a or b
    #[arg(long, default_value = "auto")]
    pub format_b: String,

    /// Minimum similarity counted as a match, in (0, 1]
    #[arg(short, long, env = "SECTDIFF_THRESHOLD", default_value_t = Threshold::DEFAULT)]
    pub threshold: f64,

    /// Similarity metric: levenshtein or sequence
    #[arg(short, long, default_value = "levenshtein")]
    pub metric: String,

    /// Print JSON instead of grouped text
    #[arg(long)]
    pub json: bool,

    /// Normalize EOL (CRLF/CR) before parsing
    #[arg(short = 'E', long)]
    pub normalize_eol: bool,

    /// Only print the extracted sections of both documents
    #[arg(long)]
    pub extract_only: bool,
}

#[derive(Debug)]
pub struct Options {
    pub format_a: Option<FormatKind>,
    pub format_b: Option<FormatKind>,
    pub threshold: Threshold,
    pub metric: Metric,
    pub json: bool,
    pub normalize_eol: bool,
    pub extract_only: bool,
}

fn parse_format(s: &str) -> Result<Option<FormatKind>> {
    if s.trim().eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    let format = s
        .parse::<FormatKind>()
        .with_context(|| format!("Invalid format: {s}"))?;
    Ok(Some(format))
}

pub fn build_options(args: &Args) -> Result<Options> {
    if is_stdin(&args.doc_a) && is_stdin(&args.doc_b) {
        anyhow::bail!("doc_a and doc_b cannot both be read from stdin.");
    }

    let threshold = Threshold::new(args.threshold).context("Invalid --threshold")?;
    let metric = args
        .metric
        .parse::<Metric>()
        .with_context(|| format!("Invalid metric: {}", args.metric))?;

    Ok(Options {
        format_a: parse_format(&args.format_a)?,
        format_b: parse_format(&args.format_b)?,
        threshold,
        metric,
        json: args.json,
        normalize_eol: args.normalize_eol,
        extract_only: args.extract_only,
    })
}
