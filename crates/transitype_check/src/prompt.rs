use anyhow::Result;
use dialoguer::{Input, MultiSelect, theme::ColorfulTheme};
use log::debug;
use std::io::Write;

use crate::reporter::Reporter;

/// The interactive surface used when no files could be found automatically.
pub trait FilePrompt {
    /// Let the operator pick any number of `candidates`.
    fn select(&mut self, message: &str, candidates: &[String]) -> Result<Vec<String>>;

    /// Ask the operator for a line of free text.
    fn input(&mut self, message: &str) -> Result<String>;
}

/// Terminal prompts backed by `dialoguer`.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self { theme: ColorfulTheme::default() }
    }
}

impl FilePrompt for TerminalPrompt {
    fn select(&mut self, message: &str, candidates: &[String]) -> Result<Vec<String>> {
        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(candidates)
            .interact()?;
        Ok(picked.into_iter().map(|idx| candidates[idx].clone()).collect())
    }

    fn input(&mut self, message: &str) -> Result<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()?)
    }
}

/// Ask the operator which files to trace.
///
/// With candidates, the selection is repeated until at least one file is
/// picked. Without candidates, a comma separated list is read instead, which
/// may come back empty.
pub fn prompt_for_files<W: Write>(
    prompt: &mut dyn FilePrompt,
    candidates: &[String],
    reporter: &mut Reporter<W>,
) -> Result<Vec<String>> {
    // Messages written so far must be visible before the prompt takes over the terminal
    reporter.writer().flush()?;

    if candidates.is_empty() {
        let line =
            prompt.input("No TypeScript files found. Enter files to trace (comma-separated)")?;
        let files = split_file_list(&line);
        debug!("Operator entered {} files", files.len());
        return Ok(files);
    }

    loop {
        let selected = prompt.select("Select TypeScript files to trace", candidates)?;
        if !selected.is_empty() {
            debug!("Operator selected {} of {} files", selected.len(), candidates.len());
            return Ok(selected);
        }
        reporter.warning("Select at least one file (space to toggle, enter to confirm)")?;
    }
}

fn split_file_list(line: &str) -> Vec<String> {
    line.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}
