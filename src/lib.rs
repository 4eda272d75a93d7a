//! JLPT grammar examples: scrape jlptsensei.com into JSON, then package that
//! JSON as an Anki deck.
//!
//! Two pipelines share the [`example::GrammarExample`] record:
//!   1. `fetcher` walks level index → listing pages → rule pages (parsing in `parser`)
//!   2. `deck` turns the JSON array into a `.apkg` package

pub mod config;
pub mod deck;
pub mod example;
pub mod fetcher;
pub mod parser;
pub mod prompt;
pub mod utils;
