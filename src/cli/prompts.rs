//! Interactive prompts using dialoguer

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::{Confirm, Input};

/// Ask for the CSV to analyse. An empty answer means no input.
pub fn prompt_input_path() -> Result<Option<PathBuf>> {
    let answer: String = Input::new()
        .with_prompt("Path to the flight delay CSV (leave empty to quit)")
        .allow_empty(true)
        .interact_text()?;

    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| PathBuf::from(answer)))
}

/// Prompt user to confirm writing the filtered CSV
pub fn confirm_export(path: &Path, flights: usize) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Export {} filtered flight(s) to {}?",
            flights,
            path.display()
        ))
        .default(true)
        .interact()?;
    Ok(confirmed)
}
