use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use jlpt_grammar_deck::config::{JlptLevel, Settings};
use jlpt_grammar_deck::example::write_examples;
use jlpt_grammar_deck::fetcher::{Fetcher, HttpSource};
use jlpt_grammar_deck::prompt::path_or_prompt;
use jlpt_grammar_deck::utils::elapsed_label;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "fetch_grammar",
    about = "Download JLPT grammar examples from jlptsensei.com into a JSON file"
)]
struct Cli {
    /// JSON file to write the grammar examples to (prompted for when omitted)
    output_file: Option<PathBuf>,
    /// Only fetch these levels (repeatable); levels are always visited N5 to N1
    #[arg(short, long = "level", value_enum, ignore_case = true)]
    levels: Vec<JlptLevel>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let output = path_or_prompt(cli.output_file, "Output file to store grammar examples")?;

    let settings = Settings::from_env()?;
    info!(base_url = %settings.base_url, timeout_secs = settings.timeout_secs, "Settings loaded");

    let source = HttpSource::new(&settings)?;
    let harvest = Fetcher::new(source, settings).fetch_all(&JlptLevel::selection(&cli.levels))?;
    write_examples(&harvest.examples, &output)?;

    println!(
        "Saved {} examples from {} rules ({} pages, {} rules without examples) to {}",
        harvest.examples.len(),
        harvest.stats.rules,
        harvest.stats.pages,
        harvest.stats.skipped,
        output.display()
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", elapsed_label(elapsed));
    }
    Ok(())
}
