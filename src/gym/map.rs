use std::{
    fmt,
    fs,
    ops::{Index, IndexMut},
    path::Path,
    str::FromStr,
};

use strum::{EnumIter, FromRepr};

use crate::error::{Malformed, MapError};

/// Position coordinates in the grid, `(x, y)` with `(0, 0)` at the top left
pub type Pos = (usize, usize);

/// The kind of a single map cell, numbered as in the map file format
#[derive(EnumIter, FromRepr, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Empty = 0,
    Trap = 1,
    Objective = 2,
    Bonus = 3,
    Init = 4,
}

impl CellKind {
    pub const EMPTY_SCORE: i64 = 0;
    pub const TRAP_SCORE: i64 = -100;
    pub const OBJECTIVE_SCORE: i64 = 100;
    pub const BONUS_SCORE: i64 = 1;
    pub const INIT_SCORE: i64 = 0;

    /// Reward received when the agent lands on a cell of this kind
    pub const fn reward(self) -> i64 {
        match self {
            Self::Empty => Self::EMPTY_SCORE,
            Self::Trap => Self::TRAP_SCORE,
            Self::Objective => Self::OBJECTIVE_SCORE,
            Self::Bonus => Self::BONUS_SCORE,
            Self::Init => Self::INIT_SCORE,
        }
    }

    /// Character used when drawing the map
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Trap => 'X',
            Self::Objective => 'O',
            Self::Bonus => 'B',
            Self::Init => 'I',
        }
    }
}

impl FromStr for CellKind {
    type Err = Malformed;

    /// A cell is exactly one digit, no sign or padding
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.as_bytes() {
            [d @ b'0'..=b'9'] => CellKind::from_repr(d - b'0'),
            _ => None,
        };
        kind.ok_or_else(|| Malformed::InvalidCell(s.to_owned()))
    }
}

/// A rectangular grid of cells with fixed dimensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
    origin: Pos,
}

impl Grid {
    /// Build a grid from rows of cells
    ///
    /// Rows must all have the same length and at most one cell may be [`CellKind::Init`]
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Result<Self, MapError> {
        let mut builder = GridBuilder::default();
        for (y, row) in rows.into_iter().enumerate() {
            builder.push_row(y + 1, row)?;
        }
        builder.finish()
    }

    /// Read and parse a map file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| MapError::Load {
            path: path.to_owned(),
            source,
        })?;
        let grid: Self = source.parse()?;
        log::info!(
            "loaded {}x{} map from {}, start at {:?}",
            grid.width,
            grid.height,
            path.display(),
            grid.origin
        );
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Start position, the `Init` cell or `(0, 0)` if the map has none
    pub fn origin(&self) -> Pos {
        self.origin
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.0 < self.width && pos.1 < self.height
    }

    /// Overwrite every cell with the corresponding cell of `original`
    ///
    /// **Panics** if the grids differ in size
    pub fn reset_from(&mut self, original: &Grid) {
        assert_eq!(
            (self.width, self.height),
            (original.width, original.height),
            "cannot reset from a grid of a different size"
        );
        self.cells.copy_from_slice(&original.cells);
    }

    /// Turn a bonus at `pos` into an empty cell, leaving any other cell alone
    pub fn consume_bonus(&mut self, pos: Pos) {
        let cell = &mut self[pos];
        if *cell == CellKind::Bonus {
            *cell = CellKind::Empty;
        }
    }

    /// Iterate over the rows of the grid from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.width)
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    fn offset(&self, pos: &Pos) -> usize {
        assert!(
            self.contains(*pos),
            "position {pos:?} is outside the {}x{} grid",
            self.width,
            self.height
        );
        pos.1 * self.width + pos.0
    }
}

impl Index<Pos> for Grid {
    type Output = CellKind;

    fn index(&self, index: Pos) -> &Self::Output {
        &self.cells[self.offset(&index)]
    }
}

impl IndexMut<Pos> for Grid {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        let offset = self.offset(&index);
        &mut self.cells[offset]
    }
}

impl FromStr for Grid {
    type Err = MapError;

    /// Parse lines of comma separated cell kinds
    ///
    /// Blank lines and whitespace around values are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = GridBuilder::default();
        for (i, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .split(',')
                .enumerate()
                .map(|(j, value)| {
                    value
                        .trim()
                        .parse::<CellKind>()
                        .map_err(|reason| MapError::Malformed {
                            line: i + 1,
                            column: j + 1,
                            reason,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            builder.push_row(i + 1, row)?;
        }
        builder.finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line = row
                .iter()
                .map(|&c| (c as u8).to_string())
                .collect::<Vec<_>>()
                .join(",");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Accumulates rows while checking shape and start cell
#[derive(Default)]
struct GridBuilder {
    width: Option<usize>,
    height: usize,
    cells: Vec<CellKind>,
    origin: Option<Pos>,
}

impl GridBuilder {
    fn push_row(&mut self, line: usize, row: Vec<CellKind>) -> Result<(), MapError> {
        let expected = *self.width.get_or_insert(row.len());
        if row.len() != expected {
            return Err(MapError::Malformed {
                line,
                column: row.len().min(expected) + 1,
                reason: Malformed::RaggedRow {
                    expected,
                    found: row.len(),
                },
            });
        }

        for (x, &cell) in row.iter().enumerate() {
            if cell != CellKind::Init {
                continue;
            }
            if let Some(first) = self.origin {
                return Err(MapError::Malformed {
                    line,
                    column: x + 1,
                    reason: Malformed::DuplicateStart { first },
                });
            }
            self.origin = Some((x, self.height));
        }

        self.cells.extend(row);
        self.height += 1;
        Ok(())
    }

    fn finish(self) -> Result<Grid, MapError> {
        let width = self.width.unwrap_or(0);
        if width == 0 || self.height == 0 {
            return Err(MapError::Empty);
        }
        Ok(Grid {
            width,
            height: self.height,
            cells: self.cells,
            origin: self.origin.unwrap_or((0, 0)),
        })
    }
}
