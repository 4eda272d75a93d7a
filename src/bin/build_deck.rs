use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use jlpt_grammar_deck::deck::{build_deck, DeckOptions, DECK_NAME};
use jlpt_grammar_deck::prompt::path_or_prompt;
use jlpt_grammar_deck::utils::elapsed_label;

#[derive(Parser)]
#[command(
    name = "build_deck",
    about = "Create an Anki deck from a JSON file of grammar examples"
)]
struct Cli {
    /// JSON file containing the grammar examples (prompted for when omitted)
    input_file: Option<PathBuf>,
    /// Anki package to create, usually with an `.apkg` extension (prompted for when omitted)
    output_file: Option<PathBuf>,
    /// Deck name shown in Anki
    #[arg(long, default_value = DECK_NAME)]
    deck_name: String,
    /// Derive the model and deck ids from this seed instead of picking random ones
    #[arg(long)]
    seed: Option<u64>,
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
    let input = path_or_prompt(
        cli.input_file,
        "Input json file containing grammar examples",
    )?;
    let output = path_or_prompt(cli.output_file, "Output anki deck file")?;

    let options = DeckOptions {
        deck_name: cli.deck_name,
        seed: cli.seed,
    };
    let summary = build_deck(&input, &output, &options)
        .with_context(|| format!("Failed to build deck from {}", input.display()))?;

    println!(
        "Wrote {} notes to {} (deck id {}, model id {})",
        summary.notes,
        output.display(),
        summary.ids.deck_id,
        summary.ids.model_id
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", elapsed_label(elapsed));
    }
    Ok(())
}
