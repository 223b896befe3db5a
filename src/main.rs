use anyhow::Result;
use clap::Parser;
use tracing::info;

use sectdiff::report::{
    render_json, render_sections_json, render_sections_text, render_text, Labels,
};
use sectdiff::utils::read_text_best_effort;
use sectdiff::{build_options, compare_with, Args, Document};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sectdiff=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let opts = build_options(&args)?;

    let text_a = read_text_best_effort(&args.doc_a, opts.normalize_eol)?;
    let text_b = read_text_best_effort(&args.doc_b, opts.normalize_eol)?;

    let doc_a = Document {
        text: text_a,
        format: opts.format_a,
    };
    let doc_b = Document {
        text: text_b,
        format: opts.format_b,
    };
    let (format_a, format_b) = (doc_a.resolved_format(), doc_b.resolved_format());
    info!(%format_a, %format_b, "document formats resolved");

    let sections_a = doc_a.sections();
    let sections_b = doc_b.sections();

    if opts.extract_only {
        if opts.json {
            println!("{}", render_sections_json(&sections_a, &sections_b)?);
        } else {
            println!("== {} ({format_a}) ==", args.doc_a.display());
            print!("{}", render_sections_text(&sections_a));
            println!("== {} ({format_b}) ==", args.doc_b.display());
            print!("{}", render_sections_text(&sections_b));
        }
        return Ok(());
    }

    let result = compare_with(&sections_a, &sections_b, opts.threshold, opts.metric);

    if opts.json {
        println!("{}", render_json(&result)?);
    } else {
        let labels = Labels {
            a: args.doc_a.display().to_string(),
            b: args.doc_b.display().to_string(),
        };
        print!("{}", render_text(&result, &labels));
    }

    Ok(())
}
