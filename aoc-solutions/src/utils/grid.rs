//! Rectangular character grids

use aoc_solver::ParseError;

use super::line_error;

/// Offsets of the eight neighbours of a cell.
pub const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Row-major grid of cells addressed by `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Parse a block of equal-width lines, mapping each byte through `cell`.
    ///
    /// `cell` receives the byte and returns `None` for characters that are
    /// not allowed; the error names the line and column.
    pub fn parse<F>(input: &str, mut cell: F) -> Result<Self, ParseError>
    where
        F: FnMut(u8) -> Option<T>,
    {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (line_idx, line) in input.lines().enumerate() {
            let line_no = line_idx + 1;
            let expected = *width.get_or_insert(line.len());
            if line.len() != expected {
                return Err(line_error(
                    line_no,
                    format!("expected {expected} columns, found {}", line.len()),
                ));
            }
            for (col, b) in line.bytes().enumerate() {
                let value = cell(b).ok_or_else(|| {
                    line_error(
                        line_no,
                        format!("unexpected character {:?} at column {}", b as char, col + 1),
                    )
                })?;
                cells.push(value);
            }
            height += 1;
        }

        let width = width.unwrap_or(0);
        if width == 0 {
            return Err(ParseError::MissingData("empty grid".to_string()));
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid of `width` columns over row-major `cells`.
    ///
    /// A trailing partial row is dropped.
    pub fn from_cells(width: usize, mut cells: Vec<T>) -> Self {
        let height = cells.len().checked_div(width).unwrap_or(0);
        cells.truncate(width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.width && y < self.height {
            self.cells.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> &[T] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// In-bounds neighbours of `(x, y)` among the eight surrounding cells.
    pub fn neighbors_8(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBORS_8.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            (nx < self.width && ny < self.height).then_some((nx, ny))
        })
    }

    /// All `(x, y)` positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}
