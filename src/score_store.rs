//! Score ledger persistence module.
//!
//! This module keeps the completion times the game records for each level. The ledger is one
//! plain-text file with a `key=value` line per entry, where the value is elapsed seconds; the
//! format carries no schema version and tolerates foreign lines by skipping them.

use std::{fs, path::PathBuf};

use color_eyre::eyre::Result;

/// Completion time ledger backed by a plain-text file.
///
/// This structure holds the in-memory copy of the ledger together with the file it was loaded
/// from. Entries keep their on-disk order; ranking sorts a copy on demand.
pub(crate) struct ScoreStore {
    /// File the ledger is persisted to.
    ///
    /// This field is fixed at load time; every successful record rewrites this file.
    path: PathBuf,
    /// Loaded `key` to elapsed-seconds entries.
    ///
    /// This field mirrors the file contents minus any lines that failed to parse.
    entries: Vec<(String, f64)>,
}

impl ScoreStore {
    /// Loads the ledger from the given file.
    ///
    /// A missing or unreadable file yields an empty ledger rather than an error, so a fresh
    /// installation starts cleanly; malformed lines within a readable file are skipped.
    pub(crate) fn load(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => parse_entries(&contents),
            Err(_) => Vec::new(),
        };

        Self { path, entries }
    }

    /// Records a completion time under the given key and rewrites the ledger file.
    ///
    /// An existing entry for the key is overwritten, matching how the game treats repeat runs
    /// of the same level.
    ///
    /// # Errors
    ///
    /// This function returns an error if the ledger file cannot be written.
    pub(crate) fn record(&mut self, key: &str, seconds: f64) -> Result<()> {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.0 == key) {
            entry.1 = seconds;
        } else {
            self.entries.push((key.to_owned(), seconds));
        }

        fs::write(&self.path, render_entries(&self.entries))?;

        Ok(())
    }

    /// Returns all entries sorted ascending by elapsed seconds.
    ///
    /// The fastest entry comes first; the results screen highlights it and the runner-up.
    pub(crate) fn ranked(&self) -> Vec<(String, f64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|left, right| left.1.total_cmp(&right.1));
        ranked
    }
}

/// Parses ledger text into entries.
///
/// Each line is expected to be `key=value` with a finite numeric value; lines that do not
/// match are dropped silently so a damaged ledger degrades instead of failing the game.
fn parse_entries(input: &str) -> Vec<(String, f64)> {
    input
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            if key.is_empty() {
                return None;
            }
            let seconds: f64 = value.parse().ok()?;
            seconds.is_finite().then(|| (key.to_owned(), seconds))
        })
        .collect()
}

/// Renders entries back into ledger text.
///
/// The output is the exact line format [`parse_entries`] accepts.
fn render_entries(entries: &[(String, f64)]) -> String {
    let mut output = String::new();
    for (key, seconds) in entries {
        output.push_str(key);
        output.push('=');
        output.push_str(&seconds.to_string());
        output.push('\n');
    }
    output
}
