//! The [`CellGrid`] type — a parse-once, read-only grid of [`Cell`]s.
//!
//! A `CellGrid` is produced from raw puzzle text through a caller-supplied
//! symbol map and never mutated afterwards. Obstacle accumulation and other
//! topology edits happen on the graph built from it, not on the grid.

use thiserror::Error;

use crate::geom::{Dir, Point, Range};

/// The classification of a grid position.
///
/// Puzzle-specific tiles map onto these four at parse time; a "track" or
/// "path" tile is simply [`Cell::Open`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Wall,
    Open,
    Start,
    End,
}

impl Cell {
    /// Whether the cell can be walked on (anything but a wall).
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Cell::Wall)
    }
}

/// Errors surfaced while parsing a character grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// A row's length differs from the first row's.
    #[error("row {row} has length {got}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// A character with no mapping in the symbol table.
    #[error("unknown symbol {symbol:?} at {pos}")]
    UnknownSymbol { symbol: char, pos: Point },
    /// A marker the caller requires exactly once was never seen.
    #[error("missing {0:?} marker")]
    MissingMarker(Cell),
    /// A marker the caller requires exactly once appeared again at `second`.
    #[error("duplicate {cell:?} marker at {second}")]
    DuplicateMarker { cell: Cell, second: Point },
}

/// A rectangular, read-only grid of [`Cell`]s with row-major storage.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl CellGrid {
    /// Parse newline-split rows into a grid through `symbols`.
    ///
    /// `symbols` maps each character to a [`Cell`]; returning `None` fails
    /// the parse with [`GridError::UnknownSymbol`]. All rows must have the
    /// same length as the first. An empty input yields an empty grid.
    pub fn parse<S>(
        lines: &[S],
        symbols: impl Fn(char) -> Option<Cell>,
    ) -> Result<CellGrid, GridError>
    where
        S: AsRef<str>,
    {
        let width = lines.first().map_or(0, |l| l.as_ref().chars().count());
        let mut cells = Vec::with_capacity(width * lines.len());

        for (y, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let mut row_len = 0;
            for (x, ch) in line.chars().enumerate() {
                row_len += 1;
                let cell = symbols(ch).ok_or(GridError::UnknownSymbol {
                    symbol: ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                cells.push(cell);
            }
            if row_len != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    got: row_len,
                });
            }
        }

        Ok(CellGrid {
            cells,
            bounds: Range::new(0, 0, width as i32, lines.len() as i32),
        })
    }

    /// Parse with the conventional maze symbol map:
    /// `#` wall, `.` open, `S` start, `E` end.
    pub fn parse_maze<S: AsRef<str>>(lines: &[S]) -> Result<CellGrid, GridError> {
        Self::parse(lines, |ch| match ch {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Open),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            _ => None,
        })
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` is inside the grid bounds.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Read the cell at `p`. Out-of-bounds positions read as [`Cell::Wall`],
    /// so the border behaves as impassable without separate bounds checks.
    #[inline]
    pub fn at(&self, p: Point) -> Cell {
        if !self.bounds.contains(p) {
            return Cell::Wall;
        }
        self.cells[(p.y * self.bounds.width() + p.x) as usize]
    }

    /// Whether the cell at `p` can be walked on.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.at(p).is_passable()
    }

    /// The neighbor of `p` one step in direction `dir`, or `None` if that
    /// falls outside the grid. Wall occupancy is not checked here.
    #[inline]
    pub fn neighbor(&self, p: Point, dir: Dir) -> Option<Point> {
        let n = dir.step(p);
        self.bounds.contains(n).then_some(n)
    }

    /// Find the unique position of `cell`.
    ///
    /// Fails with [`GridError::MissingMarker`] if absent and
    /// [`GridError::DuplicateMarker`] if it appears more than once.
    pub fn locate(&self, cell: Cell) -> Result<Point, GridError> {
        let mut found = None;
        for p in self.bounds.iter() {
            if self.at(p) == cell {
                if found.is_some() {
                    return Err(GridError::DuplicateMarker { cell, second: p });
                }
                found = Some(p);
            }
        }
        found.ok_or(GridError::MissingMarker(cell))
    }

    /// Row-major iterator over `(point, cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().map(|p| (p, self.at(p)))
    }
}
