//! Grammar notes → `.apkg`, through `genanki_rs`.

use std::io;
use std::path::Path;

use genanki_rs::{Deck, Field, Model, Note, Package as AnkiPackage, Template};

use super::{DeckError, DeckIds, CARD_BACK, CARD_CSS, CARD_FRONT, DECK_DESCRIPTION, MODEL_NAME};
use crate::example::{GrammarExample, FIELD_NAMES};
use crate::utils::write_atomically;

/// Everything that goes into one package.
pub struct Package<'a> {
    pub ids: DeckIds,
    pub deck_name: &'a str,
    pub notes: &'a [GrammarExample],
}

impl Package<'_> {
    /// Note type with one field per record field, in record order, and a
    /// single "Card 1" template.
    pub fn model(&self) -> Model {
        let fields = FIELD_NAMES.iter().map(|&name| Field::new(name)).collect();
        let card = Template::new("Card 1").qfmt(CARD_FRONT).afmt(CARD_BACK);
        Model::new(self.ids.model_id, MODEL_NAME, fields, vec![card]).css(CARD_CSS)
    }

    pub fn deck(&self) -> Result<Deck, DeckError> {
        let model = self.model();
        let mut deck = Deck::new(self.ids.deck_id, self.deck_name, DECK_DESCRIPTION);
        for example in self.notes {
            deck.add_note(Note::new(model.clone(), example.fields().to_vec())?);
        }
        Ok(deck)
    }

    /// Assemble the package and write it to `output`. The file only appears
    /// there once the zip is complete.
    pub fn write(&self, output: &Path) -> Result<(), DeckError> {
        let mut package = AnkiPackage::new(vec![self.deck()?], vec![])?;
        write_atomically(output, |staged| -> Result<(), DeckError> {
            let path = staged.path().to_str().ok_or_else(|| {
                io::Error::other(format!(
                    "staging path is not valid UTF-8: {}",
                    staged.path().display()
                ))
            })?;
            package.write_to_file(path)?;
            Ok(())
        })
    }
}
