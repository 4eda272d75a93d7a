//! The `GrammarExample` record and its JSON interchange file.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::utils::write_atomically;

/// Field names in note order. The deck model reuses this order, so changing it
/// breaks compatibility with previously built decks.
pub const FIELD_NAMES: [&str; 6] = [
    "jlpt_level",
    "meaning",
    "japanese_sentence",
    "colored_japanese_sentence",
    "english_translation",
    "hiragana_transliteration",
];

/// One example sentence of a grammar rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarExample {
    pub jlpt_level: String,
    pub meaning: String,
    pub japanese_sentence: String,
    pub colored_japanese_sentence: String,
    pub english_translation: String,
    pub hiragana_transliteration: String,
}

impl GrammarExample {
    /// Field values in [`FIELD_NAMES`] order.
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.jlpt_level,
            &self.meaning,
            &self.japanese_sentence,
            &self.colored_japanese_sentence,
            &self.english_translation,
            &self.hiragana_transliteration,
        ]
    }
}

#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid grammar examples JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a JSON array of examples. Every element must carry exactly the six fields.
pub fn read_examples(path: &Path) -> Result<Vec<GrammarExample>, InterchangeError> {
    let file = File::open(path).map_err(|source| InterchangeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| InterchangeError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Write examples as a pretty-printed (4-space) JSON array, non-ASCII kept as is.
pub fn write_examples(examples: &[GrammarExample], path: &Path) -> Result<(), InterchangeError> {
    info!("Saving to file `{}`", path.display());
    write_atomically(path, |staged| {
        let mut writer = BufWriter::new(staged.as_file());
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        examples.serialize(&mut ser).map_err(std::io::Error::from)?;
        writer.flush()
    })
    .map_err(|source| InterchangeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!("Saved to file `{}`", path.display());
    Ok(())
}
