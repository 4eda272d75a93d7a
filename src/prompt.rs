//! Interactive fallback for CLI arguments left out on the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::DefaultEditor;

/// `given` if present, otherwise ask on the terminal until a non-empty path is entered.
pub fn path_or_prompt(given: Option<PathBuf>, prompt: &str) -> Result<PathBuf> {
    if let Some(path) = given {
        return Ok(path);
    }

    let mut editor = DefaultEditor::new().context("Failed to open terminal prompt")?;
    loop {
        let line = editor
            .readline(&format!("{}: ", prompt))
            .with_context(|| format!("No value given for `{}`", prompt))?;
        if let Some(path) = parse_answer(&line) {
            return Ok(path);
        }
    }
}

/// Trimmed answer as a path; `None` for a blank line.
fn parse_answer(line: &str) -> Option<PathBuf> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
