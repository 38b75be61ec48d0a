//! An immutable walkable/blocked grid.
//!
//! [`Grid`] is a rectangular, row-major array of [`Cell`] values. It is built
//! once (from nested integer rows or a textual map) and never mutated
//! afterwards, so a single grid can be shared read-only between searches.

use std::collections::HashSet;
use std::fmt;

use crate::geom::{Point, Range};

/// Character used for walkable cells in the textual form.
pub const WALKABLE_CHAR: char = '.';
/// Character used for blocked cells in the textual form.
pub const BLOCKED_CHAR: char = '#';
/// Character used for path cells by [`Grid::render_path`].
pub const PATH_CHAR: char = '*';

/// A grid cell: walkable (`0`) or blocked (`1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Walkable,
    Blocked,
}

impl Cell {
    /// Whether movement through this cell is forbidden.
    #[inline]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    fn to_char(self) -> char {
        match self {
            Self::Walkable => WALKABLE_CHAR,
            Self::Blocked => BLOCKED_CHAR,
        }
    }
}

impl TryFrom<i32> for Cell {
    type Error = i32;

    /// Converts `0` and `1`; any other value is handed back as the error.
    fn try_from(v: i32) -> Result<Self, i32> {
        match v {
            0 => Ok(Self::Walkable),
            1 => Ok(Self::Blocked),
            other => Err(other),
        }
    }
}

impl From<Cell> for i32 {
    fn from(c: Cell) -> Self {
        match c {
            Cell::Walkable => 0,
            Cell::Blocked => 1,
        }
    }
}

/// Errors that can occur when building a grid or addressing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The input has no rows, or its rows have no columns.
    Empty,
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A numeric cell value outside {0, 1}.
    InvalidCell { pos: Point, value: i32 },
    /// A character other than `.` or `#` in a textual map.
    InvalidChar { pos: Point, ch: char },
    /// A coordinate outside the grid.
    OutOfBounds { point: Point, bounds: Range },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} columns, expected {expected}"
            ),
            Self::InvalidCell { pos, value } => {
                write!(f, "grid: invalid cell value {value} at {pos}, expected 0 or 1")
            }
            Self::InvalidChar { pos, ch } => write!(
                f,
                "grid: invalid character \u{201c}{ch}\u{201d} at {pos}, expected \
                 \u{201c}{WALKABLE_CHAR}\u{201d} or \u{201c}{BLOCKED_CHAR}\u{201d}"
            ),
            Self::OutOfBounds { point, bounds } => {
                write!(f, "grid: point {point} outside bounds {bounds}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A rectangular grid of [`Cell`] values, indexed by `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<i32>>", into = "Vec<Vec<i32>>")
)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create an all-walkable grid. Either dimension being zero is an error.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            cells: vec![Cell::Walkable; (rows as usize) * (cols as usize)],
            bounds: Range::new(0, 0, rows, cols),
        })
    }

    /// Build a grid from nested rows of `0` (walkable) and `1` (blocked).
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let expected = rows.first().map_or(0, |r| r.as_ref().len());
        if expected == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(GridError::Ragged {
                    row: r,
                    expected,
                    found: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                let cell = Cell::try_from(value).map_err(|value| GridError::InvalidCell {
                    pos: Point::new(r as i32, c as i32),
                    value,
                })?;
                cells.push(cell);
            }
        }
        Ok(Self {
            cells,
            bounds: Range::new(0, 0, rows.len() as i32, expected as i32),
        })
    }

    /// Parse a textual map: one line per row, `.` walkable, `#` blocked.
    ///
    /// Leading and trailing blank lines are ignored; surrounding whitespace
    /// on each line is not.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .skip_while(|l| l.trim().is_empty())
            .collect();
        let end = lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);
        let mut rows = Vec::with_capacity(end);
        for (r, line) in lines[..end].iter().enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(c, ch)| match ch {
                    WALKABLE_CHAR => Ok(0),
                    BLOCKED_CHAR => Ok(1),
                    _ => Err(GridError::InvalidChar {
                        pos: Point::new(r as i32, c as i32),
                        ch,
                    }),
                })
                .collect::<Result<Vec<i32>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    /// Return a copy of this grid with every point of `blocked` set to
    /// [`Cell::Blocked`]. Points outside the grid are ignored.
    pub fn with_blocked(mut self, blocked: impl IntoIterator<Item = Point>) -> Self {
        for p in blocked {
            if let Some(i) = self.index(p) {
                self.cells[i] = Cell::Blocked;
            }
        }
        self
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.width()
    }

    /// The range of valid coordinates.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether the grid contains the given point.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Check that `p` lies inside the grid.
    pub fn check_bounds(&self, p: Point) -> Result<(), GridError> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                point: p,
                bounds: self.bounds,
            })
        }
    }

    /// Get the cell at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is blocked. Points outside the grid count as blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.at(p).is_none_or(Cell::is_blocked)
    }

    /// Iterate over `(Point, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// Render the grid in its textual form with `path` cells drawn as `*`.
    pub fn render_path(&self, path: &[Point]) -> String {
        let on_path: HashSet<Point> = path.iter().copied().collect();
        self.render(|p, cell| {
            if on_path.contains(&p) {
                PATH_CHAR
            } else {
                cell.to_char()
            }
        })
    }

    fn render(&self, mut glyph: impl FnMut(Point, Cell) -> char) -> String {
        let cols = self.cols() as usize;
        let mut out = String::with_capacity(self.cells.len() + self.rows() as usize);
        for (i, (p, cell)) in self.iter().enumerate() {
            if i > 0 && i % cols == 0 {
                out.push('\n');
            }
            out.push(glyph(p, cell));
        }
        out
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.row as usize) * (self.cols() as usize) + p.col as usize)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_, cell| cell.to_char()))
    }
}

impl TryFrom<Vec<Vec<i32>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        Self::from_rows(&rows)
    }
}

impl From<Grid> for Vec<Vec<i32>> {
    fn from(g: Grid) -> Self {
        g.cells
            .chunks(g.cols() as usize)
            .map(|row| row.iter().map(|&c| i32::from(c)).collect())
            .collect()
    }
}
