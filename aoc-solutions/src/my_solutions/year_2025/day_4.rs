//! Day 4: forklift-accessible paper rolls
use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

/// A roll is accessible with fewer than this many neighbouring rolls.
const CROWDED: usize = 4;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["2025", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<bool>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input.trim(), |b| match b {
            b'@' => Some(true),
            b'.' => Some(false),
            _ => None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let counts = neighbor_counts(shared);
        let accessible = shared
            .positions()
            .filter(|&(x, y)| is_roll(shared, x, y) && counts.get(x, y).is_some_and(|&c| c < CROWDED))
            .count();
        Ok(accessible.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        let mut counts = neighbor_counts(&grid);
        let mut queue: VecDeque<(usize, usize)> = grid
            .positions()
            .filter(|&(x, y)| is_roll(&grid, x, y) && counts.get(x, y).is_some_and(|&c| c < CROWDED))
            .collect();

        let mut removed = 0usize;
        while let Some((x, y)) = queue.pop_front() {
            let Some(cell) = grid.get_mut(x, y) else { continue };
            if !*cell {
                continue;
            }
            *cell = false;
            removed += 1;

            for (nx, ny) in grid.neighbors_8(x, y).collect::<Vec<_>>() {
                if !is_roll(&grid, nx, ny) {
                    continue;
                }
                if let Some(count) = counts.get_mut(nx, ny) {
                    *count -= 1;
                    // Enqueue exactly when the neighbour becomes accessible.
                    if *count == CROWDED - 1 {
                        queue.push_back((nx, ny));
                    }
                }
            }
        }

        tracing::debug!(removed, "no accessible rolls left");
        Ok(removed.to_string())
    }
}

fn is_roll(grid: &Grid<bool>, x: usize, y: usize) -> bool {
    grid.get(x, y).copied().unwrap_or(false)
}

/// Number of rolls among the eight neighbours of every cell.
fn neighbor_counts(grid: &Grid<bool>) -> Grid<usize> {
    let counts = grid
        .positions()
        .map(|(x, y)| grid.neighbors_8(x, y).filter(|&(nx, ny)| is_roll(grid, nx, ny)).count());
    Grid::from_cells(grid.width(), counts.collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.
";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_example() {
        assert_eq!(solve(EXAMPLE, 1), "13");
        assert_eq!(solve(EXAMPLE, 2), "43");
    }

    #[test]
    fn test_solid_block_peels_completely() {
        // Corners start accessible, and removing them exposes the rest.
        assert_eq!(solve("@@@\n@@@\n@@@", 1), "4");
        assert_eq!(solve("@@@\n@@@\n@@@", 2), "9");
    }

    #[test]
    fn test_part_two_leaves_parsed_grid_untouched() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        Solver::solve_part(&mut shared, 2).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "13");
    }

    #[test]
    fn test_invalid_character() {
        assert!(matches!(Solver::parse("@.\n@#"), Err(ParseError::InvalidFormat(_))));
    }
}
