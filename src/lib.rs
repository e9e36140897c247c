//! Core library for the flowlink terminal puzzle game.
//!
//! The player connects pairs of colored anchors on a square grid by dragging with the mouse,
//! one color at a time, across a sequence of levels. Completion times are recorded into a
//! plain-text ledger and ranked on a results screen.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod board;
mod cli;
mod events;
mod file_loader;
mod level;
mod score_store;
mod types;
mod ui;

pub use app::App;
pub use cli::Cli;
