//! Day 8: junction box circuits
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::disjoint_set::DisjointSet;
use crate::utils::parse_lines;

/// Number of closest pairs joined for part 1 on a real input.
const PART_1_PAIRS: usize = 1000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["2025", "union-find"])]
pub struct Solver;

pub type Point = [i64; 3];

#[derive(Debug)]
pub struct SharedData {
    boxes: Vec<Point>,
    /// Every pair `(i, j)` with `i < j`, closest first.
    pairs: Option<Vec<(usize, usize)>>,
}

impl SharedData {
    fn sorted_pairs(&mut self) -> &[(usize, usize)] {
        let boxes = &self.boxes;
        self.pairs.get_or_insert_with(|| {
            let mut pairs: Vec<(i64, usize, usize)> = (0..boxes.len())
                .tuple_combinations()
                .map(|(i, j)| (squared_distance(&boxes[i], &boxes[j]), i, j))
                .collect();
            // Stable, so equally distant pairs keep their input order.
            pairs.sort_by_key(|&(dist, _, _)| dist);
            tracing::debug!(pairs = pairs.len(), "sorted junction box pairs");
            pairs.into_iter().map(|(_, i, j)| (i, j)).collect()
        })
    }
}

fn squared_distance(a: &Point, b: &Point) -> i64 {
    a.iter().zip(b).map(|(p, q)| (p - q) * (p - q)).sum()
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let boxes = parse_lines(input.trim(), |line| {
            let coords: Vec<i64> = line
                .split(',')
                .map(|v| v.trim().parse::<i64>())
                .collect::<Result<_, _>>()?;
            <Point>::try_from(coords).map_err(|c| anyhow!("expected 3 coordinates, found {}", c.len()))
        })?;
        Ok(SharedData { boxes, pairs: None })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(largest_circuits_product(shared, PART_1_PAIRS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let n = shared.boxes.len();
        let mut circuits = DisjointSet::new(n);
        let pairs = shared.sorted_pairs().to_vec();
        let (i, j) = pairs
            .into_iter()
            .find(|&(i, j)| circuits.union(i, j) && circuits.components() == 1)
            .ok_or_else(|| SolveError::SolveFailed(format!("{n} boxes never form a single circuit").into()))?;
        Ok((shared.boxes[i][0] * shared.boxes[j][0]).to_string())
    }
}

/// Product of the three largest circuit sizes after joining the `pairs` closest pairs.
fn largest_circuits_product(shared: &mut SharedData, pairs: usize) -> usize {
    let mut circuits = DisjointSet::new(shared.boxes.len());
    for &(i, j) in shared.sorted_pairs().iter().take(pairs) {
        circuits.union(i, j);
    }
    circuits.set_sizes().sorted_unstable_by(|a, b| b.cmp(a)).take(3).product()
}
