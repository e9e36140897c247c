//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::{Marker, DOT},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, BorderType, Borders, Clear, Paragraph,
    },
    Frame,
};

use crate::{
    board::{Board, Cell},
    level::{LevelSet, PairColor},
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Width of one board cell in terminal columns.
///
/// This constant fixes how many character columns a grid cell occupies on screen, which also
/// defines the horizontal granularity of mouse hit-testing.
pub(crate) const CELL_WIDTH: u16 = 4;

/// Height of one board cell in terminal rows.
///
/// This constant fixes how many character rows a grid cell occupies on screen, which also
/// defines the vertical granularity of mouse hit-testing.
pub(crate) const CELL_HEIGHT: u16 = 2;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(frame, *item),
        Screen::LevelMenu => level_menu(app, frame)?,
        Screen::InGame => in_game(app, frame)?,
        Screen::Results => results(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both main and options
/// menus. The generic part includes the centered positioning and border styling, while the
/// specific menu content is handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value() as usize]).split(inner_space)
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start Game", "Options", and "Quit".
/// It highlights the currently selected option and provides visual feedback for user
/// navigation.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let mut opt1 = Line::raw("Start Game").centered();
    let mut opt2 = Line::raw("Options").centered();
    let mut opt3 = Line::raw("Quit").centered();
    match item {
        MainMenuItem::StartGame => {
            opt1 = opt1.style(active_content_style);
            opt2 = opt2.style(content_style);
            opt3 = opt3.style(content_style);
        }
        MainMenuItem::Options => {
            opt1 = opt1.style(content_style);
            opt2 = opt2.style(active_content_style);
            opt3 = opt3.style(content_style);
        }
        MainMenuItem::Quit => {
            opt1 = opt1.style(content_style);
            opt2 = opt2.style(content_style);
            opt3 = opt3.style(active_content_style);
        }
    }

    frame.render_widget(opt1, inner_layout[0]);
    frame.render_widget(opt2, inner_layout[1]);
    frame.render_widget(opt3, inner_layout[2]);
}

/// Renders the options menu screen with configuration choices.
///
/// This function displays the options menu with choices for "Levels" selection, the "Results"
/// screen, and "Return" to the main menu. It provides the same navigation highlighting as the
/// main menu.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(3));

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let mut opt1 = Line::raw("Levels").centered();
    let mut opt2 = Line::raw("Results").centered();
    let mut opt3 = Line::raw("Return").centered();
    match item {
        OptionsMenuItem::Levels => {
            opt1 = opt1.style(active_content_style);
            opt2 = opt2.style(content_style);
            opt3 = opt3.style(content_style);
        }
        OptionsMenuItem::Results => {
            opt1 = opt1.style(content_style);
            opt2 = opt2.style(active_content_style);
            opt3 = opt3.style(content_style);
        }
        OptionsMenuItem::Back => {
            opt1 = opt1.style(content_style);
            opt2 = opt2.style(content_style);
            opt3 = opt3.style(active_content_style);
        }
    }

    frame.render_widget(opt1, inner_layout[0]);
    frame.render_widget(opt2, inner_layout[1]);
    frame.render_widget(opt3, inner_layout[2]);
}

/// Renders the level menu with a scrollable list of available level sets.
///
/// This function displays a viewport containing the built-in set and every loadable level file
/// from the current directory. It provides scrolling functionality and visual indicators for
/// the currently selected set and the set that's actively being used.
///
/// # Errors
///
/// This function may return errors if the viewport set cannot be retrieved.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn level_menu(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(frame.area())[1];
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Fill(1),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Min(1)]).split(space)[0];
    let block = Block::bordered()
        .title_top("Level list")
        .title_bottom("(j) down / (k) up / (l) select / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    app.viewport_height = inner_space.height.into();

    let inner_layout = Layout::horizontal([Constraint::Percentage(5), Constraint::Percentage(100)])
        .split(inner_space);
    let inner_selector = Layout::vertical(vec![Constraint::Max(1); inner_space.height.into()])
        .split(inner_layout[0]);
    let inner_list = Layout::vertical(vec![Constraint::Max(1); inner_space.height.into()])
        .split(inner_layout[1]);

    let mut viewport_sets: Vec<&LevelSet> = app.sets.iter().skip(app.viewport_offset).collect();
    viewport_sets.truncate(inner_space.height.into());

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (idx, set) in viewport_sets.into_iter().enumerate() {
        let viewport_set = app
            .viewport_set
            .clone()
            .ok_or_eyre("failed to retrieve cursor-selected set")?;

        let (selector, entry) = if *set == viewport_set {
            (
                {
                    if *set == app.set {
                        Line::styled(DOT, active_content_style).centered()
                    } else {
                        Line::styled(" ", active_content_style).centered()
                    }
                },
                Line::styled(set.key.clone(), active_content_style),
            )
        } else {
            (
                {
                    if *set == app.set {
                        Line::styled(DOT, content_style).centered()
                    } else {
                        Line::styled(" ", content_style).centered()
                    }
                },
                Line::styled(set.key.clone(), content_style),
            )
        };

        frame.render_widget(selector, inner_selector[idx]);
        frame.render_widget(entry, inner_list[idx]);
    }

    Ok(())
}

/// Renders the in-game screen with the board, header readouts, and connector strokes.
///
/// This function draws the grid as fixed-size character cells, layers the committed
/// connections over it as [`Canvas`] line strokes, and shows the countdown overlay until the
/// timer starts. The rectangle the board was drawn into is captured for mouse hit-testing.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or if no run is
/// active while the in-game screen is drawn.
#[expect(
    clippy::too_many_lines,
    reason = "UI rendering function requires many lines for layout and drawing operations."
)]
pub(crate) fn in_game(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let run = app
        .run
        .as_ref()
        .ok_or_eyre("failed to retrieve active run")?;
    let board = &run.board;

    let dimension = u16::try_from(board.size())?;
    let board_width = dimension * CELL_WIDTH;
    let board_height = dimension * CELL_HEIGHT;

    // Create overall layout: header + board area + tooltip at bottom
    let overall_layout = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(3),
    ])
    .split(frame.area());

    let header_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get header area from layout")?;
    let board_content_area = *overall_layout
        .get(1)
        .ok_or_eyre("failed to get board content area from layout")?;
    let tooltip_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let level_name = app
        .set
        .levels
        .get(run.level_index)
        .map_or("?", |level| level.key.as_str());
    let header = Paragraph::new(vec![
        Line::raw(level_name)
            .centered()
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Line::raw(format!(
            "level {}/{} / linked {}/{} / {}s",
            run.level_index + 1,
            app.set.levels.len(),
            board.connected_count(),
            board.pairs().len(),
            run.elapsed().as_secs()
        ))
        .centered()
        .style(Style::default().fg(Color::Green)),
    ]);
    frame.render_widget(header, header_area);

    // Center the board within the content area
    let main_layout = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(board_height),
        Constraint::Min(1),
    ])
    .split(board_content_area);

    let board_area = main_layout
        .get(1)
        .ok_or_eyre("failed to get board area from layout")?;

    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(board_width),
        Constraint::Min(1),
    ])
    .split(*board_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get board space from horizontal layout")?;

    // Pre-compute stroke coordinates to handle errors before closures
    let mut strokes = Vec::new();
    for (index, pair) in board.pairs().iter().enumerate() {
        if let Some(path) = board.committed_path(index) {
            strokes.push((
                pair_color(pair.color),
                transform_board_to_canvas_coords(path, board.size())?,
            ));
        }
    }

    let cells = Paragraph::new(board_lines(board));
    let connections = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Dot)
        .paint(|ctx| {
            for (color, centers) in &strokes {
                for window in centers.windows(2) {
                    if let (Some(start), Some(end)) = (window.first(), window.last()) {
                        ctx.draw(&CanvasLine {
                            x1: start.0,
                            y1: start.1,
                            x2: end.0,
                            y2: end.1,
                            color: *color,
                        });
                    }
                }
            }
        });

    frame.render_widget(cells, space);
    frame.render_widget(connections, space);

    // Countdown overlay until the timer starts
    if run.counting_down() {
        let overlay = Layout::vertical([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Percentage(40),
        ])
        .split(frame.area())
        .get(1)
        .copied()
        .ok_or_eyre("failed to get countdown area from layout")?;
        let overlay = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(9),
            Constraint::Min(1),
        ])
        .split(overlay)
        .get(1)
        .copied()
        .ok_or_eyre("failed to get centered countdown area from layout")?;

        let remaining = run.countdown_remaining().max(1);

        frame.render_widget(Clear, overlay);
        let block = Block::bordered()
            .style(Color::Green)
            .border_type(BorderType::Rounded);
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);
        frame.render_widget(
            Line::raw(remaining.to_string())
                .centered()
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            inner,
        );
    }

    app.board_area = Some(space);

    // Render tooltip as a block at the bottom center with top border
    let tooltip_area = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(board_width),
        Constraint::Min(1),
    ])
    .split(tooltip_full_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered tooltip area from horizontal layout")?;

    let tooltip_block = Block::bordered()
        .title("drag to link / (h) return to menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}

/// Renders the results screen ranking the recorded completion times.
///
/// This function lists every ledger entry sorted ascending by seconds, tagging the fastest
/// entry and the runner-up. An empty ledger shows a placeholder message instead.
///
/// # Errors
///
/// This function may return errors from layout size conversions.
pub(crate) fn results(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let ranked = app.scores.ranked();

    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(frame.area())
    .get(1)
    .copied()
    .ok_or_eyre("failed to get results area from horizontal layout")?;
    let rows = u16::try_from(ranked.len().max(1))?;
    let space = Layout::vertical([Constraint::Length(rows + 2)])
        .flex(Flex::Center)
        .split(space)
        .first()
        .copied()
        .ok_or_eyre("failed to get results area from vertical layout")?;

    let block = Block::bordered()
        .title_top("Results")
        .title_bottom("(h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);
    let inner_space = block.inner(space);
    frame.render_widget(block, space);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let lines: Vec<Line> = if ranked.is_empty() {
        vec![Line::styled("No times recorded yet.", content_style).centered()]
    } else {
        ranked
            .iter()
            .enumerate()
            .map(|(idx, (key, seconds))| {
                let tag = match idx {
                    0 => " (fastest)",
                    1 => " (runner-up)",
                    _ => "",
                };
                let style = if idx == 0 {
                    active_content_style
                } else {
                    content_style
                };
                Line::styled(format!("{key} - {seconds:.2}s{tag}"), style).centered()
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines), inner_space);

    Ok(())
}

/// Maps a terminal coordinate to the board cell it falls on.
///
/// This function inverts the cell layout of the in-game screen: given the rectangle the board
/// was last drawn into, it returns which grid cell the pointer is over, or `None` when the
/// pointer is outside the board.
pub(crate) fn board_cell_at(area: Rect, size: usize, column: u16, row: u16) -> Option<Cell> {
    if column < area.x || row < area.y {
        return None;
    }
    let cell_col = usize::from((column - area.x) / CELL_WIDTH);
    let cell_row = usize::from((row - area.y) / CELL_HEIGHT);

    (cell_row < size && cell_col < size).then_some((cell_row, cell_col))
}

/// Transforms board cells to canvas coordinates at cell centers.
///
/// This function converts grid cells to the character-unit coordinate space the connection
/// canvas draws in, with the origin at the board center: `x = col_center - width / 2` and
/// `y = height / 2 - row_center`.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn transform_board_to_canvas_coords(
    cells: &[Cell],
    size: usize,
) -> Result<Vec<(f64, f64)>> {
    let span_x = f64::from(u16::try_from(size)?) * f64::from(CELL_WIDTH);
    let span_y = f64::from(u16::try_from(size)?) * f64::from(CELL_HEIGHT);

    cells
        .iter()
        .map(|&(row, col)| {
            let center_x = f64::from(u16::try_from(col)?) * f64::from(CELL_WIDTH)
                + f64::from(CELL_WIDTH) / 2.;
            let center_y = f64::from(u16::try_from(row)?) * f64::from(CELL_HEIGHT)
                + f64::from(CELL_HEIGHT) / 2.;

            Ok((center_x - span_x / 2., span_y / 2. - center_y))
        })
        .collect()
}

/// Maps a pair color to its terminal color.
pub(crate) const fn pair_color(color: PairColor) -> Color {
    match color {
        PairColor::Blue => Color::Blue,
        PairColor::Yellow => Color::Yellow,
        PairColor::Red => Color::Red,
        PairColor::Green => Color::Green,
        PairColor::Cyan => Color::Cyan,
        PairColor::Magenta => Color::Magenta,
    }
}

/// Builds the styled text lines for the board cells.
///
/// Anchors render as marked sockets on their pair's color, loose trails as colored blocks, and
/// empty cells as dim dots. Cells belonging to committed paths are left empty here because the
/// connection canvas draws their strokes on top.
fn board_lines(board: &Board) -> Vec<Line<'static>> {
    let empty_style = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    for row in 0..board.size() {
        let mut top = Vec::new();
        let mut bottom = Vec::new();
        for col in 0..board.size() {
            let cell = (row, col);
            let (top_span, bottom_span) = if let Some(index) = board.anchor_at(cell) {
                let style = Style::default()
                    .fg(Color::White)
                    .bg(index_color(board, index))
                    .add_modifier(Modifier::BOLD);
                (Span::styled(" () ", style), Span::styled("    ", style))
            } else if let Some(index) = board
                .cell(cell)
                .filter(|&index| !board.is_connected(index))
            {
                let style = Style::default().bg(index_color(board, index));
                (Span::styled("    ", style), Span::styled("    ", style))
            } else {
                (
                    Span::styled(format!(" {DOT}  "), empty_style),
                    Span::raw("    "),
                )
            };
            top.push(top_span);
            bottom.push(bottom_span);
        }
        lines.push(Line::from(top));
        lines.push(Line::from(bottom));
    }

    lines
}

/// Returns the terminal color of the pair at the given index.
fn index_color(board: &Board, index: usize) -> Color {
    board
        .pairs()
        .get(index)
        .map_or(Color::White, |pair| pair_color(pair.color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Run;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    /// Creates a minimal test app for UI testing.
    fn create_test_app() -> App {
        App::default()
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    #[test]
    fn test_draw_main_menu() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::MainMenu(MainMenuItem::StartGame);

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing main menu should succeed");
    }

    #[test]
    fn test_draw_options_menu() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::OptionsMenu(OptionsMenuItem::Results);

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing options menu should succeed");
    }

    #[test]
    fn test_draw_level_menu() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::LevelMenu;
        app.sets = vec![LevelSet::default()];
        app.viewport_set = app.sets.first().cloned();

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing level menu should succeed");
    }

    #[test]
    fn test_level_menu_empty_viewport_set_error() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.sets = vec![LevelSet::default()];
        app.viewport_set = None;

        let result = terminal.draw(|frame| {
            let menu_result = level_menu(&mut app, frame);
            assert!(
                menu_result.is_err(),
                "level menu should fail with empty viewport_set"
            );
        });

        assert!(
            result.is_ok(),
            "terminal drawing should succeed even if level_menu fails"
        );
    }

    #[test]
    fn test_draw_in_game_during_countdown() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;
        app.run = Some(Run::new(&app.set));

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing the countdown overlay should succeed");
        assert!(app.board_area.is_some(), "board rectangle must be captured");
    }

    #[test]
    fn test_draw_in_game_while_playing() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;
        let mut run = Run::new(&app.set);
        run.started = Some(Instant::now());
        // Leave a committed connection on the board so the stroke canvas has work to do.
        run.board.pointer_down((0, 3));
        run.board.pointer_enter((0, 4));
        run.board.pointer_enter((1, 4));
        run.board.pointer_enter((1, 5));
        let _ = run.board.pointer_up();
        app.run = Some(run);

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing the live board should succeed");
    }

    #[test]
    fn test_in_game_without_run_error() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;
        app.run = None;

        let result = terminal.draw(|frame| {
            let game_result = in_game(&mut app, frame);
            assert!(game_result.is_err(), "in-game should fail without a run");
        });

        assert!(
            result.is_ok(),
            "terminal drawing should succeed even if in_game fails"
        );
    }

    #[test]
    fn test_draw_results_with_empty_ledger() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::Results;

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing empty results should succeed");
    }

    #[test]
    fn test_board_cell_at_maps_corners() {
        let area = Rect::new(10, 5, 24, 12);

        assert_eq!(board_cell_at(area, 6, 10, 5), Some((0, 0)));
        assert_eq!(board_cell_at(area, 6, 13, 6), Some((0, 0)));
        assert_eq!(board_cell_at(area, 6, 33, 16), Some((5, 5)));
    }

    #[test]
    fn test_board_cell_at_rejects_outside_coordinates() {
        let area = Rect::new(10, 5, 24, 12);

        assert_eq!(board_cell_at(area, 6, 9, 5), None, "left of the board");
        assert_eq!(board_cell_at(area, 6, 10, 4), None, "above the board");
        assert_eq!(board_cell_at(area, 6, 34, 5), None, "right of the board");
        assert_eq!(board_cell_at(area, 6, 10, 17), None, "below the board");
    }

    #[test]
    fn test_transform_board_to_canvas_coords_is_center_symmetric() {
        let coords = transform_board_to_canvas_coords(&[(0, 0), (5, 5)], 6)
            .expect("coordinate transform should succeed");

        assert_eq!(coords.first().copied(), Some((-10.0, 5.0)));
        assert_eq!(coords.last().copied(), Some((10.0, -5.0)));
    }

    #[test]
    fn test_pair_colors_are_distinct() {
        let colors = [
            pair_color(PairColor::Blue),
            pair_color(PairColor::Yellow),
            pair_color(PairColor::Red),
            pair_color(PairColor::Green),
            pair_color(PairColor::Cyan),
            pair_color(PairColor::Magenta),
        ];

        for (idx, color) in colors.iter().enumerate() {
            assert_eq!(
                colors.iter().filter(|entry| *entry == color).count(),
                1,
                "color {idx} must map uniquely"
            );
        }
    }
}
