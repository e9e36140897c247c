//! Path-connection puzzle engine.
//!
//! This module contains the board state machine that lets a pointer drag paths between anchor
//! pairs on a square grid. It is deliberately free of any rendering or timing concerns so the
//! whole gesture protocol can be driven and checked without a terminal.

use crate::level::{ColorPair, Level};

/// Grid coordinate as a `(row, col)` pair.
///
/// This type alias names the coordinate tuples used throughout the board. Row zero is the top of
/// the grid and column zero its left edge.
pub(crate) type Cell = (usize, usize);

/// Observable side effects produced by resolving a drag gesture.
///
/// This enumeration carries everything the board wants the hosting screen to act on. The board
/// itself never plays sounds or touches timers; it only reports that the events happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    /// A single pair was connected by the gesture that just resolved.
    ///
    /// This variant asks the host to play the short connect cue.
    ConnectChime,
    /// Link progress changed.
    ///
    /// This variant reports how many pairs are connected out of the total so hosts that display
    /// a progress readout can update it. Hosts are free to ignore it.
    Progress {
        /// Number of pairs currently connected.
        connected: usize,
        /// Number of pairs configured on the board.
        total: usize,
    },
    /// Every pair on the board is connected.
    ///
    /// This variant asks the host to play the win cue. It is emitted at most once per board,
    /// immediately before [`Effect::LevelComplete`].
    WinChime,
    /// The level is finished.
    ///
    /// This variant tells the host to stop treating the board as live. It is emitted at most
    /// once per board, however many times the completion condition is re-checked afterwards.
    LevelComplete,
}

/// Puzzle board owning the grid, the in-flight drag path, and per-pair completion state.
///
/// This structure is created from a [`Level`] at level start and discarded when the level
/// changes. All mutation happens through the three pointer operations, which mirror the press,
/// enter and release events of a mouse drag.
pub(crate) struct Board {
    /// Grid dimension.
    ///
    /// This field holds the side length of the square grid.
    size: usize,
    /// Anchor pair configuration copied from the level.
    ///
    /// This field is immutable for the lifetime of the board; pairs are addressed everywhere
    /// else by their index into it.
    pairs: Vec<ColorPair>,
    /// Fully materialized cell matrix in row-major order.
    ///
    /// This field stores, for every cell, the index of the pair currently painted on it, if
    /// any. Anchor cells always hold their own pair.
    grid: Vec<Option<usize>>,
    /// Pair being dragged, if a gesture is in flight.
    ///
    /// This field is `None` while idle. A new gesture cannot start until the previous one has
    /// resolved back to `None`.
    active: Option<usize>,
    /// Ordered cells of the in-flight drag path.
    ///
    /// This field is empty while idle. Consecutive cells are always 4-adjacent and no cell
    /// appears twice.
    path: Vec<Cell>,
    /// Last committed path per pair.
    ///
    /// This field records the path that connected each pair, used by the renderer for the
    /// connector strokes. A pair counts as connected exactly when its entry is `Some`.
    committed: Vec<Option<Vec<Cell>>>,
    /// Completion latch.
    ///
    /// This field guards the win effects so they fire once per board even though the
    /// completion condition is re-evaluated after every commit.
    complete_fired: bool,
}

impl Board {
    /// Builds a fresh board for the given level.
    ///
    /// Only the anchors are painted; all remaining cells start empty.
    ///
    /// # Panics
    ///
    /// Panics if the level violates the board preconditions: an anchor out of range, a pair
    /// whose two anchors coincide, or two pairs sharing an anchor cell. [`Level`] construction
    /// already validates these, so a panic here means the level was built by hand incorrectly.
    pub(crate) fn new(level: &Level) -> Self {
        let size = level.size;
        let mut grid = vec![None; size * size];

        for (index, pair) in level.pairs.iter().enumerate() {
            for anchor in [pair.from, pair.to] {
                assert!(
                    anchor.0 < size && anchor.1 < size,
                    "anchor out of grid range"
                );
            }
            assert!(pair.from != pair.to, "pair anchors must be distinct cells");
            for slot in [pair.from, pair.to].map(|anchor| anchor.0 * size + anchor.1) {
                let cell = grid.get_mut(slot).expect("anchor index within grid");
                assert!(cell.is_none(), "anchor cell shared between pairs");
                *cell = Some(index);
            }
        }

        Self {
            size,
            pairs: level.pairs.clone(),
            grid,
            active: None,
            path: Vec::new(),
            committed: vec![None; level.pairs.len()],
            complete_fired: false,
        }
    }

    /// Returns the grid dimension.
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    /// Returns the configured anchor pairs.
    pub(crate) fn pairs(&self) -> &[ColorPair] {
        &self.pairs
    }

    /// Returns the pair painted on the given cell, if any.
    ///
    /// Cells outside the grid are reported as empty.
    pub(crate) fn cell(&self, cell: Cell) -> Option<usize> {
        if cell.0 >= self.size || cell.1 >= self.size {
            return None;
        }
        self.grid
            .get(cell.0 * self.size + cell.1)
            .copied()
            .flatten()
    }

    /// Returns the pair owning the given cell as an anchor, if any.
    pub(crate) fn anchor_at(&self, cell: Cell) -> Option<usize> {
        self.pairs
            .iter()
            .position(|pair| pair.from == cell || pair.to == cell)
    }

    /// Returns whether the given pair is currently connected.
    pub(crate) fn is_connected(&self, index: usize) -> bool {
        self.committed.get(index).is_some_and(Option::is_some)
    }

    /// Returns the committed path of the given pair, if it is connected.
    pub(crate) fn committed_path(&self, index: usize) -> Option<&[Cell]> {
        self.committed.get(index).and_then(|path| path.as_deref())
    }

    /// Returns how many pairs are currently connected.
    pub(crate) fn connected_count(&self) -> usize {
        self.committed.iter().filter(|path| path.is_some()).count()
    }

    /// Returns whether every pair is connected.
    pub(crate) fn is_solved(&self) -> bool {
        self.committed.iter().all(Option::is_some)
    }

    /// Handles the pointer being pressed on a cell.
    ///
    /// A gesture starts only on an anchor cell of a pair that is not already connected; any
    /// other press is ignored, as is a press while a gesture is already in flight.
    pub(crate) fn pointer_down(&mut self, cell: Cell) {
        if self.active.is_some() {
            return;
        }
        if let Some(index) = self.anchor_at(cell) {
            if !self.is_connected(index) {
                self.active = Some(index);
                self.path = vec![cell];
            }
        }
    }

    /// Handles the pointer entering a cell while dragging.
    ///
    /// Invalid moves are silently ignored: a cell already on the path, a cell that is not
    /// 4-adjacent to the path's last cell, or another pair's anchor cell. A valid move first
    /// evicts whatever other pair is painted on the entered cell, then repaints the active
    /// pair's trail from scratch so no stale cells from earlier extensions survive.
    pub(crate) fn pointer_enter(&mut self, cell: Cell) {
        let Some(active) = self.active else {
            return;
        };
        let Some(&last) = self.path.last() else {
            return;
        };
        if cell.0 >= self.size || cell.1 >= self.size {
            return;
        }
        if self.path.contains(&cell) || !adjacent(last, cell) {
            return;
        }
        if self.anchor_at(cell).is_some_and(|index| index != active) {
            return;
        }

        if let Some(other) = self.cell(cell) {
            if other != active {
                self.evict(other);
            }
        }

        self.clear_pair_cells(active);
        self.path.push(cell);
        for &step in &self.path {
            if let Some(slot) = self.grid.get_mut(step.0 * self.size + step.1) {
                *slot = Some(active);
            }
        }
    }

    /// Handles the pointer being released, or leaving the board entirely.
    ///
    /// If the drag path touched both anchors of the active pair, the pair commits and the
    /// appropriate effects are returned; otherwise the attempt is discarded, leaving painted
    /// cells as they were last drawn. Either way the board returns to idle.
    pub(crate) fn pointer_up(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        let Some(active) = self.active.take() else {
            return effects;
        };
        let path = std::mem::take(&mut self.path);

        let touches_both = self
            .pairs
            .get(active)
            .is_some_and(|pair| path.contains(&pair.from) && path.contains(&pair.to));
        if touches_both && !self.is_connected(active) {
            if let Some(slot) = self.committed.get_mut(active) {
                *slot = Some(path);
            }
            effects.push(Effect::ConnectChime);
            effects.push(Effect::Progress {
                connected: self.connected_count(),
                total: self.pairs.len(),
            });
            if self.is_solved() && !self.complete_fired {
                self.complete_fired = true;
                effects.push(Effect::WinChime);
                effects.push(Effect::LevelComplete);
            }
        }

        effects
    }

    /// Evicts a pair from the grid.
    ///
    /// Every cell painted with the pair is cleared except its two anchor cells, its committed
    /// path is dropped, and its connected status is thereby revoked.
    fn evict(&mut self, index: usize) {
        self.clear_pair_cells(index);
        if let Some(slot) = self.committed.get_mut(index) {
            *slot = None;
        }
    }

    /// Clears every grid cell painted with the given pair, keeping its two anchors.
    ///
    /// Used both for evicting a crossed pair and for redrawing the active pair's trail fresh
    /// on each extension, so stale cells from earlier attempts never accumulate.
    fn clear_pair_cells(&mut self, index: usize) {
        let Some((from, to)) = self.pairs.get(index).map(|pair| (pair.from, pair.to)) else {
            return;
        };
        for (slot, value) in self.grid.iter_mut().enumerate() {
            let cell = (slot / self.size, slot % self.size);
            if *value == Some(index) && cell != from && cell != to {
                *value = None;
            }
        }
    }
}

/// Returns whether two cells are 4-adjacent.
///
/// Adjacency is strict Manhattan distance one; the grid does not wrap around.
const fn adjacent(first: Cell, second: Cell) -> bool {
    first.0.abs_diff(second.0) + first.1.abs_diff(second.1) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelSet;

    /// Blue's index in the first Classic level, anchors (0,3)-(1,5).
    const BLUE: usize = 0;
    /// Yellow's index in the first Classic level, anchors (0,5)-(2,3).
    const YELLOW: usize = 1;
    /// Red's index in the first Classic level, anchors (2,2)-(4,4).
    const RED: usize = 2;
    /// Green's index in the first Classic level, anchors (1,3)-(4,3).
    const GREEN: usize = 3;

    /// Short blue route along the top edge.
    const BLUE_SHORT: [Cell; 4] = [(0, 3), (0, 4), (1, 4), (1, 5)];
    /// Yellow route hugging blue's anchors without touching them.
    const YELLOW_ROUTE: [Cell; 5] = [(0, 5), (0, 4), (1, 4), (2, 4), (2, 3)];
    /// Red route through the free cells of row 3.
    const RED_ROUTE: [Cell; 5] = [(2, 2), (3, 2), (3, 3), (3, 4), (4, 4)];
    /// Green route down the left side.
    const GREEN_ROUTE: [Cell; 8] = [
        (1, 3),
        (1, 2),
        (1, 1),
        (2, 1),
        (3, 1),
        (4, 1),
        (4, 2),
        (4, 3),
    ];
    /// Long blue route around the board edge, compatible with all three routes above.
    const BLUE_LONG: [Cell; 18] = [
        (0, 3),
        (0, 2),
        (0, 1),
        (0, 0),
        (1, 0),
        (2, 0),
        (3, 0),
        (4, 0),
        (5, 0),
        (5, 1),
        (5, 2),
        (5, 3),
        (5, 4),
        (5, 5),
        (4, 5),
        (3, 5),
        (2, 5),
        (1, 5),
    ];

    /// Builds a board from the first Classic level.
    fn classic_board() -> Board {
        let set = LevelSet::default();
        Board::new(set.levels.first().expect("classic set has levels"))
    }

    /// Drags a full gesture through the given cells and returns the resolution effects.
    fn drag(board: &mut Board, cells: &[Cell]) -> Vec<Effect> {
        let (&first, rest) = cells.split_first().expect("gesture needs a starting cell");
        board.pointer_down(first);
        for &cell in rest {
            board.pointer_enter(cell);
        }
        board.pointer_up()
    }

    #[test]
    fn test_new_board_paints_only_anchors() {
        let board = classic_board();

        assert_eq!(board.cell((0, 3)), Some(BLUE), "blue from anchor painted");
        assert_eq!(board.cell((1, 5)), Some(BLUE), "blue to anchor painted");
        assert_eq!(board.cell((2, 3)), Some(YELLOW), "yellow to anchor painted");
        assert_eq!(board.cell((0, 0)), None, "plain cell starts empty");
        assert_eq!(board.connected_count(), 0, "no pair starts connected");
    }

    #[test]
    fn test_drag_connects_pair() {
        let mut board = classic_board();

        let effects = drag(&mut board, &BLUE_SHORT);

        assert!(
            effects.contains(&Effect::ConnectChime),
            "connect cue expected"
        );
        assert!(
            effects.contains(&Effect::Progress {
                connected: 1,
                total: 4
            }),
            "progress report expected"
        );
        assert!(board.is_connected(BLUE), "blue should be connected");
        assert!(!board.is_solved(), "three pairs remain");
        let path = board.committed_path(BLUE).expect("blue path recorded");
        assert_eq!(path, BLUE_SHORT);
    }

    #[test]
    fn test_committed_path_touches_both_anchors_and_stays_contiguous() {
        let mut board = classic_board();
        let _ = drag(&mut board, &BLUE_SHORT);

        let path = board.committed_path(BLUE).expect("blue path recorded");
        assert!(path.contains(&(0, 3)), "path holds the from anchor");
        assert!(path.contains(&(1, 5)), "path holds the to anchor");
        for window in path.windows(2) {
            let (&first, &second) = (
                window.first().expect("window of two"),
                window.last().expect("window of two"),
            );
            assert!(adjacent(first, second), "path steps must be 4-adjacent");
        }
        let mut seen = path.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), path.len(), "path cells must be unique");
    }

    #[test]
    fn test_invalid_moves_are_ignored() {
        let mut board = classic_board();
        board.pointer_down((0, 3));

        board.pointer_enter((0, 3));
        board.pointer_enter((2, 3));
        board.pointer_enter((4, 0));

        let _ = board.pointer_up();
        assert_eq!(board.cell((2, 3)), Some(YELLOW), "far anchor untouched");
        assert_eq!(board.cell((4, 0)), None, "non-adjacent cell never painted");
    }

    #[test]
    fn test_foreign_anchor_blocks_movement() {
        let mut board = classic_board();
        board.pointer_down((0, 3));

        // (1,3) is adjacent to blue's start but is green's anchor; blue may not pass through.
        board.pointer_enter((1, 3));

        assert_eq!(board.cell((1, 3)), Some(GREEN), "green anchor keeps its pair");
        let _ = board.pointer_up();
        assert!(
            !board.is_connected(BLUE),
            "blue never reached its far anchor"
        );
    }

    #[test]
    fn test_incomplete_release_discards_attempt_but_keeps_paint() {
        let mut board = classic_board();

        let effects = drag(&mut board, &[(0, 3), (0, 4), (1, 4)]);

        assert!(effects.is_empty(), "discarded attempt has no effects");
        assert!(!board.is_connected(BLUE), "blue stays unconnected");
        assert_eq!(
            board.cell((1, 4)),
            Some(BLUE),
            "painted trail is not rolled back"
        );
    }

    #[test]
    fn test_pointer_down_off_anchor_is_inert() {
        let mut board = classic_board();

        board.pointer_down((3, 0));
        board.pointer_enter((3, 1));

        assert!(board.pointer_up().is_empty(), "no gesture was active");
        assert_eq!(board.cell((3, 1)), None, "nothing was painted");
    }

    #[test]
    fn test_pointer_down_on_connected_anchor_is_inert() {
        let mut board = classic_board();
        let _ = drag(&mut board, &BLUE_SHORT);

        board.pointer_down((0, 3));
        board.pointer_enter((0, 2));

        assert_eq!(
            board.cell((0, 2)),
            None,
            "connected pair cannot be re-dragged"
        );
        assert!(board.pointer_up().is_empty(), "no gesture was active");
    }

    #[test]
    fn test_redraw_clears_stale_trail_of_same_pair() {
        let mut board = classic_board();
        let _ = drag(&mut board, &[(0, 3), (0, 2), (0, 1)]);
        assert_eq!(board.cell((0, 1)), Some(BLUE), "first attempt painted");

        board.pointer_down((0, 3));
        board.pointer_enter((0, 4));

        assert_eq!(board.cell((0, 2)), None, "stale trail cleared on extension");
        assert_eq!(board.cell((0, 1)), None, "stale trail cleared on extension");
        assert_eq!(board.cell((0, 4)), Some(BLUE), "new trail painted");
        let _ = board.pointer_up();
    }

    #[test]
    fn test_crossing_unfinished_trail_evicts_it() {
        let mut board = classic_board();
        // Blue leaves an uncommitted trail through (0,4) and (1,4).
        let _ = drag(&mut board, &[(0, 3), (0, 4), (1, 4)]);

        // Green starts at its (1,3) anchor and crosses the trail cell.
        board.pointer_down((1, 3));
        board.pointer_enter((1, 4));

        assert_eq!(board.cell((1, 4)), Some(GREEN), "crossed cell now holds green");
        assert_eq!(board.cell((0, 4)), None, "rest of blue's trail cleared");
        assert_eq!(board.cell((0, 3)), Some(BLUE), "blue from anchor survives");
        assert_eq!(board.cell((1, 5)), Some(BLUE), "blue to anchor survives");
        let _ = board.pointer_up();
    }

    #[test]
    fn test_crossing_connected_pair_revokes_it() {
        let mut board = classic_board();
        let _ = drag(&mut board, &BLUE_SHORT);
        assert!(board.is_connected(BLUE), "blue connected before the crossing");

        // Yellow's only route out of (0,5) runs straight through blue's trail.
        let effects = drag(&mut board, &YELLOW_ROUTE);

        assert!(
            effects.contains(&Effect::ConnectChime),
            "yellow connected by the gesture"
        );
        assert!(!board.is_connected(BLUE), "blue connection was broken");
        assert!(board.committed_path(BLUE).is_none(), "blue path dropped");
        assert_eq!(board.cell((1, 4)), Some(YELLOW), "crossed cell now yellow");
        assert_eq!(
            board.cell((0, 3)),
            Some(BLUE),
            "blue from anchor keeps its color"
        );
        assert_eq!(
            board.cell((1, 5)),
            Some(BLUE),
            "blue to anchor keeps its color"
        );
    }

    #[test]
    fn test_passing_own_far_anchor_still_completes() {
        let mut board = classic_board();

        // Green runs through its far anchor (4,3) and one cell beyond before release.
        let mut overshoot = GREEN_ROUTE.to_vec();
        overshoot.push((5, 3));
        let effects = drag(&mut board, &overshoot);

        assert!(
            effects.contains(&Effect::ConnectChime),
            "touching both anchors mid-path completes the pair"
        );
        assert!(board.is_connected(GREEN), "green connected");
        assert_eq!(board.cell((5, 3)), Some(GREEN), "overshoot cell stays painted");
    }

    #[test]
    fn test_solving_all_pairs_fires_completion_once() {
        let mut board = classic_board();

        let _ = drag(&mut board, &GREEN_ROUTE);
        let _ = drag(&mut board, &YELLOW_ROUTE);
        let _ = drag(&mut board, &RED_ROUTE);
        assert!(
            board.is_connected(GREEN) && board.is_connected(YELLOW) && board.is_connected(RED),
            "three pairs connected before the last gesture"
        );
        let effects = drag(&mut board, &BLUE_LONG);

        assert!(board.is_solved(), "every pair connected");
        assert!(effects.contains(&Effect::WinChime), "win cue on final pair");
        assert_eq!(
            effects
                .iter()
                .filter(|effect| **effect == Effect::LevelComplete)
                .count(),
            1,
            "completion fires exactly once"
        );
        assert!(
            effects.contains(&Effect::Progress {
                connected: 4,
                total: 4
            }),
            "final progress report expected"
        );
    }

    #[test]
    fn test_solved_board_is_inert() {
        let mut board = classic_board();
        let _ = drag(&mut board, &GREEN_ROUTE);
        let _ = drag(&mut board, &YELLOW_ROUTE);
        let _ = drag(&mut board, &RED_ROUTE);
        let _ = drag(&mut board, &BLUE_LONG);
        assert!(board.is_solved(), "every pair connected");

        // Every pair is connected, so no further gesture can start and the completion
        // re-check never fires its effects again.
        let effects = drag(&mut board, &[(2, 2), (2, 3)]);

        assert!(effects.is_empty(), "no effects after the board is solved");
        assert_eq!(board.cell((2, 3)), Some(YELLOW), "grid left untouched");
        assert!(board.is_solved(), "board stays solved");
    }

    #[test]
    fn test_progress_counts_each_connection() {
        let mut board = classic_board();

        let first = drag(&mut board, &GREEN_ROUTE);
        let second = drag(&mut board, &YELLOW_ROUTE);

        assert!(
            first.contains(&Effect::Progress {
                connected: 1,
                total: 4
            }),
            "first connection reports one of four"
        );
        assert!(
            second.contains(&Effect::Progress {
                connected: 2,
                total: 4
            }),
            "second connection reports two of four"
        );
    }

    #[test]
    fn test_adjacency_is_strict_manhattan_one() {
        assert!(adjacent((2, 2), (2, 3)), "east neighbor");
        assert!(adjacent((2, 2), (1, 2)), "north neighbor");
        assert!(!adjacent((2, 2), (3, 3)), "diagonal is not adjacent");
        assert!(!adjacent((2, 2), (2, 2)), "a cell is not its own neighbor");
        assert!(!adjacent((0, 0), (0, 5)), "no wraparound");
    }
}
