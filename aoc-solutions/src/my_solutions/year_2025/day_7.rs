//! Day 7: tachyon beam splitting
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 7, tags = ["2025", "grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Start,
    Splitter,
}

#[derive(Debug)]
pub struct SharedData {
    manifold: Grid<Cell>,
    start: usize,
    common_result: Option<CommonResult>,
}

#[derive(Debug)]
pub struct CommonResult {
    splits: u64,
    timelines: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let manifold = Grid::parse(input.trim(), |b| match b {
            b'.' => Some(Cell::Empty),
            b'S' => Some(Cell::Start),
            b'^' => Some(Cell::Splitter),
            _ => None,
        })?;

        let mut starts = manifold.row(0).iter().positions(|&c| c == Cell::Start);
        let start = starts
            .next()
            .ok_or_else(|| ParseError::MissingData("no `S` in the first row".to_string()))?;
        if starts.next().is_some() {
            return Err(ParseError::InvalidFormat("(line 1) more than one `S`".to_string()));
        }

        Ok(SharedData {
            manifold,
            start,
            common_result: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).splits.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).timelines.to_string())
    }
}

/// Moves the beams down row by row, tracking how many timelines share each column.
fn solve_once_for_both(shared: &mut SharedData) -> &CommonResult {
    shared.common_result.get_or_insert_with(|| {
        let manifold = &shared.manifold;
        let width = manifold.width();
        let mut beams = vec![0u64; width];
        beams[shared.start] = 1;
        let mut splits = 0;

        for y in 1..manifold.height() {
            let mut next = vec![0u64; width];
            for (x, (&count, &cell)) in beams.iter().zip(manifold.row(y)).enumerate() {
                if count == 0 {
                    continue;
                }
                if cell == Cell::Splitter {
                    splits += 1;
                    // Beams leaving the manifold sideways are lost.
                    if let Some(left) = x.checked_sub(1) {
                        next[left] += count;
                    }
                    if let Some(right) = next.get_mut(x + 1) {
                        *right += count;
                    }
                } else {
                    next[x] += count;
                }
            }
            beams = next;
        }

        let timelines = beams.iter().sum();
        tracing::debug!(splits, timelines, "beams reached the bottom");
        CommonResult { splits, timelines }
    })
}
