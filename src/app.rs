//! Core application state and logic for the puzzle game.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;
use ratatui::{layout::Rect, DefaultTerminal};

use crate::{
    board::Board,
    events,
    level::LevelSet,
    score_store::ScoreStore,
    types::{MainMenuItem, Screen},
    ui,
};

/// Countdown length before a run starts, in seconds.
///
/// This constant controls how long the pre-game overlay is shown before the cumulative timer
/// starts and the board begins accepting mouse input.
pub(crate) const COUNTDOWN_SECS: u64 = 3;

/// Application state container for the puzzle game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the
    /// user wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen
    /// to render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Currently active level set.
    ///
    /// This field holds the set of levels a new run will play through, either the built-in
    /// Classic set or one loaded and selected by the user.
    pub(crate) set: LevelSet,
    /// Collection of all available level sets.
    ///
    /// This field holds the built-in set followed by every valid `.flowmap` file found in the
    /// current working directory, refreshed each time the level menu is opened.
    pub(crate) sets: Vec<LevelSet>,
    /// Level set currently selected in the viewport.
    ///
    /// This field holds the set that is currently under the user cursor in the level menu's
    /// scrollable viewport.
    pub(crate) viewport_set: Option<LevelSet>,
    /// Scrolling offset for the level set list viewport.
    ///
    /// This field holds the offset by which to scroll the sliding window into the
    /// [`sets`](App::sets) vector in the level menu's viewport.
    pub(crate) viewport_offset: usize,
    /// Height of the level set list rendering area.
    ///
    /// This field holds the height of the area in which the list of sets are being rendered as
    /// a measure of terminal cells during the last redraw of the on-screen frame.
    pub(crate) viewport_height: usize,
    /// Active playthrough, if a game is in progress.
    ///
    /// This field is `Some` from the moment Start Game is selected until the run is finished
    /// or abandoned.
    pub(crate) run: Option<Run>,
    /// Board rectangle captured during the last in-game redraw.
    ///
    /// This field records where the grid was drawn so mouse events can be hit-tested back into
    /// grid cells. It is `None` until the in-game screen has rendered once.
    pub(crate) board_area: Option<Rect>,
    /// Completion time ledger.
    ///
    /// This field holds the loaded score ledger; level splits are recorded into it as levels
    /// complete and the results screen ranks its entries.
    pub(crate) scores: ScoreStore,
}

impl Default for App {
    fn default() -> Self {
        Self::new(PathBuf::from("flowlink.scores"))
    }
}

impl App {
    /// Creates a new instance of the App structure with safe defaults.
    ///
    /// The score ledger is loaded eagerly from the given path; a missing file simply yields an
    /// empty ledger. The [`Default`] trait implementation uses this function with the standard
    /// ledger path.
    pub fn new(scores_path: PathBuf) -> Self {
        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            set: LevelSet::default(),
            sets: Vec::new(),
            viewport_set: None,
            viewport_offset: 0,
            viewport_height: 0,
            run: None,
            board_area: None,
            scores: ScoreStore::load(scores_path),
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues
    /// until the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}

/// Active playthrough of a level set.
///
/// This structure tracks which level of the set is on the board, the pre-game countdown, the
/// cumulative timer, and the split mark of the previous level. It is dropped wholesale when
/// the run ends or is abandoned.
pub(crate) struct Run {
    /// Index of the level currently on the board.
    ///
    /// This field indexes into the active set's level list.
    pub(crate) level_index: usize,
    /// Puzzle board for the current level.
    ///
    /// This field is rebuilt from the next level's configuration every time a level completes;
    /// no puzzle state crosses levels.
    pub(crate) board: Board,
    /// Moment the pre-game countdown began.
    ///
    /// This field anchors the countdown overlay. Once the countdown elapses the timer starts
    /// and this field is no longer consulted.
    pub(crate) countdown_from: Instant,
    /// Moment the cumulative timer started.
    ///
    /// This field stays `None` during the countdown. The timer runs across the whole level
    /// sequence, matching the on-screen elapsed readout.
    pub(crate) started: Option<Instant>,
    /// Cumulative time at which the previous level completed.
    ///
    /// This field lets each level's split be computed as the cumulative elapsed time minus
    /// this mark.
    pub(crate) level_mark: Duration,
}

impl Run {
    /// Starts a fresh run over the given level set.
    ///
    /// # Panics
    ///
    /// Panics if the set holds no levels; both the built-in set and file-loaded sets always
    /// hold at least one.
    pub(crate) fn new(set: &LevelSet) -> Self {
        let level = set.levels.first().expect("level set holds at least one level");

        Self {
            level_index: 0,
            board: Board::new(level),
            countdown_from: Instant::now(),
            started: None,
            level_mark: Duration::ZERO,
        }
    }

    /// Starts the cumulative timer once the countdown has elapsed.
    ///
    /// Called from the event loop on every iteration while in game; does nothing after the
    /// timer has started.
    pub(crate) fn tick(&mut self) {
        if self.started.is_none()
            && self.countdown_from.elapsed() >= Duration::from_secs(COUNTDOWN_SECS)
        {
            self.started = Some(Instant::now());
        }
    }

    /// Returns whether the pre-game countdown is still running.
    pub(crate) const fn counting_down(&self) -> bool {
        self.started.is_none()
    }

    /// Returns the whole seconds left on the countdown overlay.
    pub(crate) fn countdown_remaining(&self) -> u64 {
        COUNTDOWN_SECS.saturating_sub(self.countdown_from.elapsed().as_secs())
    }

    /// Returns the cumulative elapsed time of the run.
    ///
    /// The clock reads zero until the countdown has elapsed.
    pub(crate) fn elapsed(&self) -> Duration {
        self.started.map_or(Duration::ZERO, |started| started.elapsed())
    }
}
