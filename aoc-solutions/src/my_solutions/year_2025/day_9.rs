//! Day 9: largest rectangle between red tiles
//!
//! Part 2 works on a compressed grid. Compressed index `2i` is the line at
//! the `i`-th distinct coordinate and `2i + 1` the gap up to the next one.
//! A cell is outside the loop when it is off the boundary and a ray cast to
//! the right crosses an even number of vertical edges. A prefix sum of outside
//! cells then checks each candidate rectangle in O(1).
use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::{line_error, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["2025", "geometry"])]
pub struct Solver;

pub type Tile = (i64, i64);

impl AocParser for Solver {
    type SharedData<'a> = Vec<Tile>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tiles = parse_lines(input.trim(), |line| {
            let (x, y) = line
                .split_once(',')
                .ok_or_else(|| anyhow!("expected `x,y`, found {line:?}"))?;
            let x: i64 = x.trim().parse().context("bad x")?;
            let y: i64 = y.trim().parse().context("bad y")?;
            Ok((x, y))
        })?;

        if tiles.len() < 2 {
            return Err(ParseError::MissingData("need at least two red tiles".to_string()));
        }
        for (idx, (a, b)) in tiles.iter().circular_tuple_windows().enumerate() {
            if a.0 != b.0 && a.1 != b.1 {
                return Err(line_error(idx + 1, format!("{a:?} and {b:?} are not in line")));
            }
        }
        Ok(tiles)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .iter()
            .tuple_combinations()
            .map(|(a, b)| area(a, b))
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let floor = CompressedFloor::new(shared);
        let best = shared
            .iter()
            .enumerate()
            .tuple_combinations()
            .filter(|&((i, _), (j, _))| floor.outside_between(i, j) == 0)
            .map(|((_, a), (_, b))| area(a, b))
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}

fn area(a: &Tile, b: &Tile) -> u64 {
    (a.0.abs_diff(b.0) + 1) * (a.1.abs_diff(b.1) + 1)
}

/// Compressed view of the floor, with outside cells counted by prefix sums.
struct CompressedFloor {
    /// Compressed `(x, y)` index of every red tile, in input order.
    tile_cells: Vec<(usize, usize)>,
    width: usize,
    /// `(width + 1) * (height + 1)` prefix sums of outside cells.
    outside_prefix: Vec<u32>,
}

/// Sorted distinct values of one axis.
struct Axis(Vec<i64>);

impl Axis {
    fn new(values: impl Iterator<Item = i64>) -> Self {
        Self(values.sorted_unstable().dedup().collect())
    }

    fn cells(&self) -> usize {
        2 * self.0.len() - 1
    }

    fn cell_of(&self, value: i64) -> usize {
        2 * self.0.partition_point(|&v| v < value)
    }

    /// Doubled coordinate of a point inside compressed cell `c`.
    fn doubled_midpoint(&self, c: usize) -> i64 {
        if c % 2 == 0 {
            2 * self.0[c / 2]
        } else {
            self.0[c / 2] + self.0[c / 2 + 1]
        }
    }

    /// Whether compressed cell `c` covers at least one tile.
    fn has_tiles(&self, c: usize) -> bool {
        c % 2 == 0 || self.0[c / 2 + 1] - self.0[c / 2] > 1
    }
}

impl CompressedFloor {
    fn new(tiles: &[Tile]) -> Self {
        let xs = Axis::new(tiles.iter().map(|t| t.0));
        let ys = Axis::new(tiles.iter().map(|t| t.1));
        let (width, height) = (xs.cells(), ys.cells());

        let tile_cells: Vec<(usize, usize)> =
            tiles.iter().map(|&(x, y)| (xs.cell_of(x), ys.cell_of(y))).collect();

        let mut boundary = vec![false; width * height];
        for (&(ax, ay), &(bx, by)) in tile_cells.iter().circular_tuple_windows() {
            for cy in ay.min(by)..=ay.max(by) {
                for cx in ax.min(bx)..=ax.max(bx) {
                    boundary[cy * width + cx] = true;
                }
            }
        }

        // Vertical edges in doubled coordinates as (x, y_low, y_high).
        let vertical: Vec<(i64, i64, i64)> = tiles
            .iter()
            .circular_tuple_windows()
            .filter(|(a, b)| a.0 == b.0 && a.1 != b.1)
            .map(|(a, b)| (2 * a.0, 2 * a.1.min(b.1), 2 * a.1.max(b.1)))
            .collect();

        let mut outside_prefix = vec![0u32; (width + 1) * (height + 1)];
        for cy in 0..height {
            let py = ys.doubled_midpoint(cy);
            // Half-open in y, so a ray through a vertex is counted once.
            let crossings: Vec<i64> = vertical
                .iter()
                .filter(|&&(_, lo, hi)| lo <= py && py < hi)
                .map(|&(x, _, _)| x)
                .sorted_unstable()
                .collect();

            let mut passed = 0;
            let mut row_sum = 0;
            for cx in 0..width {
                let px = xs.doubled_midpoint(cx);
                while passed < crossings.len() && crossings[passed] < px {
                    passed += 1;
                }
                let inside = passed % 2 == 1 || boundary[cy * width + cx];
                if !inside && xs.has_tiles(cx) && ys.has_tiles(cy) {
                    row_sum += 1;
                }
                outside_prefix[(cy + 1) * (width + 1) + cx + 1] =
                    outside_prefix[cy * (width + 1) + cx + 1] + row_sum;
            }
        }

        tracing::debug!(width, height, "compressed floor");
        Self {
            tile_cells,
            width,
            outside_prefix,
        }
    }

    /// Outside cells in the rectangle spanned by red tiles `i` and `j`.
    fn outside_between(&self, i: usize, j: usize) -> u32 {
        let ((ax, ay), (bx, by)) = (self.tile_cells[i], self.tile_cells[j]);
        let (x0, x1) = (ax.min(bx), ax.max(bx) + 1);
        let (y0, y1) = (ay.min(by), ay.max(by) + 1);
        let at = |x: usize, y: usize| self.outside_prefix[y * (self.width + 1) + x];
        at(x1, y1) + at(x0, y0) - at(x0, y1) - at(x1, y0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "7,1\n11,1\n11,7\n9,7\n9,5\n2,5\n2,3\n7,3\n";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_example() {
        assert_eq!(solve(EXAMPLE, 1), "50");
        assert_eq!(solve(EXAMPLE, 2), "24");
    }

    #[test]
    fn test_rectangle_loop_is_fully_inside() {
        let square = "1,1\n5,1\n5,4\n1,4\n";
        assert_eq!(solve(square, 1), "20");
        assert_eq!(solve(square, 2), "20");
    }

    #[test]
    fn test_notch_excludes_spanning_rectangle() {
        // U shape: the gap between the arms is outside.
        let u_shape = "0,0\n2,0\n2,5\n4,5\n4,0\n6,0\n6,8\n0,8\n";
        assert_eq!(solve(u_shape, 1), "63");
        assert_eq!(solve(u_shape, 2), "27");
    }

    #[test]
    fn test_diagonal_edge_rejected() {
        assert!(matches!(Solver::parse("0,0\n3,3\n0,3\n"), Err(ParseError::InvalidFormat(_))));
    }
}
