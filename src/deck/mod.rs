//! Grammar examples JSON → Anki deck package.

pub mod package;

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::info;

use crate::example::{read_examples, InterchangeError};
use package::Package;

pub const MODEL_NAME: &str = "Interactive Japanese Grammar Model";
pub const DECK_NAME: &str = "Interactive Japanese Grammar Deck";
pub const DECK_DESCRIPTION: &str =
    "A Japanese Grammar Deck that requires you to translate english sentences into Japanese";

pub const CARD_CSS: &str = r#"
.color {
	color: red;
	font-weight: bold;
}

.level {
	background-color: white;
	border: 1px solid green;
}

.template {
	text-decoration: underline;
}

.hiragana {
	font-size: 12px;
}
"#;

pub const CARD_FRONT: &str = r#"
<span class="level">{{jlpt_level}} </span>
&nbsp; &nbsp; &nbsp; &nbsp;
<span class="template">{{meaning}}</span>
<br><br>
{{english_translation}}
<br><br>
{{type:japanese_sentence}}
"#;

pub const CARD_BACK: &str = r#"
{{FrontSide}}<hr id="answer">
<br>
{{colored_japanese_sentence}}
<br><br>
<span class="hiragana">{{hiragana_transliteration}}</span>
"#;

/// Model and deck ids never collide with Anki's default deck (1).
const ID_RANGE: std::ops::RangeInclusive<i64> = 2..=u32::MAX as i64;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error(transparent)]
    Input(#[from] InterchangeError),
    #[error("i/o error while writing package: {0}")]
    Io(#[from] std::io::Error),
    #[error("anki package error: {0}")]
    Package(#[from] genanki_rs::Error),
}

/// Per-build identifiers. A new pair means Anki treats the package as a new,
/// separate deck and note type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckIds {
    pub model_id: i64,
    pub deck_id: i64,
}

impl DeckIds {
    pub fn random() -> Self {
        Self::draw(&mut rand::rng())
    }

    /// Same seed, same ids.
    pub fn seeded(seed: u64) -> Self {
        Self::draw(&mut StdRng::seed_from_u64(seed))
    }

    fn draw(rng: &mut impl Rng) -> Self {
        Self {
            model_id: rng.random_range(ID_RANGE),
            deck_id: rng.random_range(ID_RANGE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeckOptions {
    pub deck_name: String,
    /// Fixed seed for the model/deck ids; random per run when unset.
    pub seed: Option<u64>,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            deck_name: DECK_NAME.to_string(),
            seed: None,
        }
    }
}

#[derive(Debug)]
pub struct DeckSummary {
    pub ids: DeckIds,
    pub notes: usize,
}

/// Read `input` and write one note per example to the package at `output`.
///
/// The whole input is validated before anything is written, and the package
/// only appears at `output` once it is complete.
pub fn build_deck(
    input: &Path,
    output: &Path,
    options: &DeckOptions,
) -> Result<DeckSummary, DeckError> {
    let examples = read_examples(input)?;
    info!("Loaded {} grammar examples from `{}`", examples.len(), input.display());

    let ids = match options.seed {
        Some(seed) => DeckIds::seeded(seed),
        None => DeckIds::random(),
    };
    info!(model_id = ids.model_id, deck_id = ids.deck_id, "Generated deck identifiers");

    Package {
        ids,
        deck_name: &options.deck_name,
        notes: &examples,
    }
    .write(output)?;
    info!("Wrote {} notes to `{}`", examples.len(), output.display());

    Ok(DeckSummary {
        ids,
        notes: examples.len(),
    })
}
