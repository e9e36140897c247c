//! Event handling functions for user input and application state updates.

use std::{io::Write as _, time::Duration};

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::crossterm::event::{self, Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};

use crate::{
    app::Run,
    board::{Board, Effect},
    file_loader,
    level::LevelSet,
    types::{MainMenuItem, OptionsMenuItem, Screen},
    ui, App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard and mouse events and dispatches them to the appropriate
/// handler functions. It uses a timeout to avoid blocking the UI, which also keeps the in-game
/// timer readout moving while the player is idle.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        match event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => app.exit = true,
                KeyCode::Char('j') => handle_j_events(app)?,
                KeyCode::Char('k') => handle_k_events(app)?,
                KeyCode::Char('l') => handle_l_events(app)?,
                KeyCode::Char('h') => handle_h_events(app),
                _ => {}
            },
            Event::Mouse(mouse) => handle_mouse_events(app, mouse)?,
            _ => {}
        }
    }

    // Start the cumulative timer once the countdown runs out
    if matches!(app.screen, Screen::InGame) {
        if let Some(run) = app.run.as_mut() {
            run.tick();
        }
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
///
/// This function processes the 'j' key press which is used for moving down in menus and lists.
/// The behavior varies depending on the current screen, handling menu navigation and viewport
/// scrolling appropriately.
pub(crate) fn handle_j_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Levels) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Results);
        }
        Screen::OptionsMenu(OptionsMenuItem::Results) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        Screen::LevelMenu => {
            let viewport_set = app
                .viewport_set
                .clone()
                .ok_or_eyre("failed to retrieve cursor-selected set")?;
            let index = app
                .sets
                .iter()
                .position(|set| *set == viewport_set)
                .unwrap_or(0);

            let last_visible = app.viewport_offset + app.viewport_height.saturating_sub(1);
            if index >= last_visible && index + 1 < app.sets.len() {
                app.viewport_offset += 1;
            }
            if let Some(element) = app.sets.get(index + 1) {
                app.viewport_set = Some(element.clone());
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'k' key press events for upward navigation.
///
/// This function processes the 'k' key press which is used for moving up in menus and lists.
/// Like the 'j' handler, behavior varies by screen and includes proper viewport management for
/// scrollable content.
pub(crate) fn handle_k_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Results);
        }
        Screen::OptionsMenu(OptionsMenuItem::Results) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Levels);
        }
        Screen::LevelMenu => {
            let viewport_set = app
                .viewport_set
                .clone()
                .ok_or_eyre("failed to retrieve cursor-selected set")?;
            let index = app
                .sets
                .iter()
                .position(|set| *set == viewport_set)
                .unwrap_or(0);

            if index == app.viewport_offset && app.viewport_offset > 0 {
                app.viewport_offset -= 1;
            }
            if let Some(element) = app.sets.get(index.saturating_sub(1)) {
                app.viewport_set = Some(element.clone());
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items and moving
/// forward in the application flow. It handles screen transitions, level set loading, run
/// creation, and selection confirmation across different contexts.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.run = Some(Run::new(&app.set));
            app.board_area = None;
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Levels);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Levels) => {
            app.screen = Screen::LevelMenu;

            let first = LevelSet::default();
            app.sets.clear();
            app.sets.push(first.clone());
            file_loader::fetch_sets(&mut app.sets)?;
            app.viewport_set = Some(first);
            app.viewport_offset = 0;
        }
        Screen::OptionsMenu(OptionsMenuItem::Results) => {
            app.screen = Screen::Results;
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::LevelMenu => {
            app.set = app
                .viewport_set
                .clone()
                .ok_or_eyre("failed to retrieve cursor-selected set")?;
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// This function processes the 'h' key press which is used for moving back or returning to
/// previous screens. Leaving the in-game screen abandons the run; nothing is recorded for the
/// unfinished level.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => {
            app.run = None;
            app.board_area = None;
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::LevelMenu => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Levels);
        }
        Screen::Results => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        _ => {}
    }
}

/// Handles mouse events for the in-game board.
///
/// Left press, drag and release map onto the board's pointer operations. A drag that moves
/// outside the board rectangle resolves the gesture exactly like a release. Mouse input is
/// ignored outside the in-game screen and while the countdown overlay is up.
pub(crate) fn handle_mouse_events(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if app.screen != Screen::InGame {
        return Ok(());
    }
    let Some(area) = app.board_area else {
        return Ok(());
    };
    let Some(run) = app.run.as_mut() else {
        return Ok(());
    };
    if run.counting_down() {
        return Ok(());
    }

    let cell = ui::board_cell_at(area, run.board.size(), mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(cell) = cell {
                run.board.pointer_down(cell);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(cell) = cell {
                run.board.pointer_enter(cell);
            } else {
                let effects = run.board.pointer_up();
                apply_effects(app, effects)?;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let effects = run.board.pointer_up();
            apply_effects(app, effects)?;
        }
        _ => {}
    }

    Ok(())
}

/// Applies the effects of a resolved drag gesture.
///
/// Chimes become terminal bells, progress reports are dropped because the in-game header reads
/// the link count straight off the board, and level completion advances the run.
fn apply_effects(app: &mut App, effects: Vec<Effect>) -> Result<()> {
    for effect in effects {
        match effect {
            Effect::ConnectChime => bell(1)?,
            Effect::WinChime => bell(2)?,
            Effect::Progress { .. } => {}
            Effect::LevelComplete => advance_level(app)?,
        }
    }

    Ok(())
}

/// Records the finished level's split and moves the run forward.
///
/// The split is the cumulative elapsed time minus the previous level's mark, stored in the
/// ledger under the level's key. The board is rebuilt for the next level, or the run ends on
/// the results screen after the final one.
fn advance_level(app: &mut App) -> Result<()> {
    let Some(run) = app.run.as_mut() else {
        return Ok(());
    };

    let total = run.elapsed();
    let split = total.saturating_sub(run.level_mark);
    let key = app
        .set
        .levels
        .get(run.level_index)
        .map(|level| level.key.clone())
        .ok_or_eyre("run points past the level set")?;
    app.scores.record(&key, split.as_secs_f64())?;
    run.level_mark = total;

    let next = run.level_index + 1;
    if let Some(level) = app.set.levels.get(next) {
        run.level_index = next;
        run.board = Board::new(level);
        app.board_area = None;
    } else {
        app.run = None;
        app.board_area = None;
        app.screen = Screen::Results;
    }

    Ok(())
}

/// Rings the terminal bell the given number of times.
///
/// The bell doubles as the game's audio cue: once for a connected pair, twice for a solved
/// level.
fn bell(count: usize) -> Result<()> {
    let mut stdout = std::io::stdout();
    for _ in 0..count {
        stdout.write_all(b"\x07")?;
    }
    stdout.flush()?;

    Ok(())
}
