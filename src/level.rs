//! Level data and management module.
//!
//! This module contains the `Level` and `LevelSet` types together with the `.flowmap` text
//! parser used both for the built-in Classic levels and for user-supplied level files. A level
//! file holds the grid size on its first non-blank line, followed by one line per anchor pair:
//! a color name and two `row,col` coordinates.

use std::sync::LazyLock;

use color_eyre::eyre::{bail, OptionExt as _, Result};

use crate::board::Cell;

/// Supported pair colors.
///
/// This enumeration closes over the color names a level file may use. Keeping the set closed
/// lets the renderer map every pair to a terminal color without a fallback case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PairColor {
    /// The color named `blue` in level files.
    Blue,
    /// The color named `yellow` in level files.
    Yellow,
    /// The color named `red` in level files.
    Red,
    /// The color named `green` in level files.
    Green,
    /// The color named `cyan` in level files.
    Cyan,
    /// The color named `magenta` in level files.
    Magenta,
}

impl PairColor {
    /// Parses a lowercase color name into its variant.
    ///
    /// Unknown names yield `None`; the level parser turns that into a proper error.
    fn parse(input: &str) -> Option<Self> {
        match input {
            "blue" => Some(Self::Blue),
            "yellow" => Some(Self::Yellow),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "cyan" => Some(Self::Cyan),
            "magenta" => Some(Self::Magenta),
            _ => None,
        }
    }
}

/// Anchor pair configuration for one color.
///
/// This structure ties a color to the two fixed cells its path must connect. Anchors never
/// move and are never overwritten by a different pair's path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ColorPair {
    /// Color the pair is drawn in.
    pub(crate) color: PairColor,
    /// First anchor cell.
    pub(crate) from: Cell,
    /// Second anchor cell.
    pub(crate) to: Cell,
}

/// Single puzzle level.
///
/// This structure holds everything the board needs to materialize a fresh grid: the square
/// dimension and the anchor pairs. The key doubles as the score ledger entry name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Level {
    /// Display and ledger name of the level.
    pub(crate) key: String,
    /// Side length of the square grid.
    pub(crate) size: usize,
    /// Anchor pairs to connect.
    pub(crate) pairs: Vec<ColorPair>,
}

impl Level {
    /// Parses a level from `.flowmap` text.
    ///
    /// The first non-blank line is the grid size; each following non-blank line describes one
    /// pair as `color row,col row,col`. The parsed level is fully validated so the board can
    /// rely on its invariants.
    ///
    /// # Errors
    ///
    /// This function returns an error if the size line is missing or not a number, the size is
    /// smaller than two, a pair line is malformed, a color name is unknown or repeated, an
    /// anchor lies outside the grid, a pair's anchors coincide, or two pairs share an anchor
    /// cell.
    pub(crate) fn parse(key: &str, data: &str) -> Result<Self> {
        let mut lines = data.lines().map(str::trim).filter(|line| !line.is_empty());

        let size: usize = lines
            .next()
            .ok_or_eyre("missing grid size line")?
            .parse()?;
        if size < 2 {
            bail!("grid size must be at least two");
        }

        let mut pairs = Vec::new();
        for line in lines {
            let mut fields = line.split_whitespace();
            let color = fields
                .next()
                .and_then(PairColor::parse)
                .ok_or_eyre("unknown color name in pair line")?;
            let from = parse_cell(fields.next().ok_or_eyre("missing first anchor")?)?;
            let to = parse_cell(fields.next().ok_or_eyre("missing second anchor")?)?;
            if fields.next().is_some() {
                bail!("trailing fields in pair line");
            }
            pairs.push(ColorPair { color, from, to });
        }
        if pairs.is_empty() {
            bail!("level defines no pairs");
        }

        let mut anchors = Vec::new();
        for (index, pair) in pairs.iter().enumerate() {
            if pairs
                .iter()
                .enumerate()
                .any(|(other, entry)| other != index && entry.color == pair.color)
            {
                bail!("color used by more than one pair");
            }
            if pair.from == pair.to {
                bail!("pair anchors must be distinct cells");
            }
            for anchor in [pair.from, pair.to] {
                if anchor.0 >= size || anchor.1 >= size {
                    bail!("anchor lies outside the grid");
                }
                if anchors.contains(&anchor) {
                    bail!("anchor cell shared between pairs");
                }
                anchors.push(anchor);
            }
        }

        Ok(Self {
            key: key.to_owned(),
            size,
            pairs,
        })
    }
}

/// Ordered playlist of levels.
///
/// This structure is what the level menu selects and what a run plays through. The default set
/// holds the three built-in Classic levels; each user level file becomes a one-level set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LevelSet {
    /// Display name of the set.
    pub(crate) key: String,
    /// Levels played in order.
    pub(crate) levels: Vec<Level>,
}

impl Default for LevelSet {
    fn default() -> Self {
        Self {
            key: "Classic".to_owned(),
            levels: vec![
                Level::parse("Classic I", *CLASSIC_ONE).expect("failed to parse built-in level"),
                Level::parse("Classic II", *CLASSIC_TWO).expect("failed to parse built-in level"),
                Level::parse("Classic III", *CLASSIC_THREE)
                    .expect("failed to parse built-in level"),
            ],
        }
    }
}

/// Parses a `row,col` coordinate field.
///
/// # Errors
///
/// This function returns an error if the comma is missing or either side is not a number.
fn parse_cell(input: &str) -> Result<Cell> {
    let (row, col) = input
        .split_once(',')
        .ok_or_eyre("anchor coordinate must be row,col")?;
    Ok((row.parse()?, col.parse()?))
}

/// First built-in level.
///
/// This static holds the opening layout: four pairs crowded into the upper half of the grid.
static CLASSIC_ONE: LazyLock<&str> = LazyLock::new(|| {
    "\
6
blue 0,3 1,5
yellow 0,5 2,3
red 2,2 4,4
green 1,3 4,3"
});

/// Second built-in level.
///
/// This static holds the middle layout, which pushes the pairs toward the left edge.
static CLASSIC_TWO: LazyLock<&str> = LazyLock::new(|| {
    "\
6
blue 0,0 1,1
red 0,1 2,1
yellow 2,0 1,4
green 3,1 5,0"
});

/// Third built-in level.
///
/// This static holds the closing layout with the longest forced detours.
static CLASSIC_THREE: LazyLock<&str> = LazyLock::new(|| {
    "\
6
blue 0,5 4,3
yellow 2,1 3,5
red 2,2 4,4
green 4,1 3,3"
});
