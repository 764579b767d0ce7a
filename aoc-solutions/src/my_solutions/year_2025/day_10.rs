//! Day 10: factory machine initialization
use std::collections::VecDeque;

use anyhow::{Context, anyhow, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::parse_lines;

/// Indicator lights are tracked in a `u32` mask, and BFS allocates `2^n` states.
const MAX_LIGHTS: usize = 20;
const EPSILON: f64 = 1e-6;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["2025", "bfs", "linear-algebra"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    light_count: usize,
    /// Target light pattern, light `i` at bit `i`.
    lights: u32,
    /// Light/counter indices wired to each button.
    buttons: Vec<Vec<usize>>,
    joltage: Vec<u64>,
}

struct MachineSyntax {
    lights: Regex,
    button: Regex,
    joltage: Regex,
}

impl MachineSyntax {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            lights: Regex::new(r"^\[([.#]+)\]")?,
            button: Regex::new(r"\(([\d,]*)\)")?,
            joltage: Regex::new(r"\{([\d,]*)\}\s*$")?,
        })
    }

    fn parse_machine(&self, line: &str) -> anyhow::Result<Machine> {
        let pattern = self
            .lights
            .captures(line)
            .ok_or_else(|| anyhow!("missing `[...]` light diagram"))?[1]
            .to_string();
        ensure!(
            pattern.len() <= MAX_LIGHTS,
            "{} lights, at most {MAX_LIGHTS} supported",
            pattern.len()
        );
        let lights = pattern
            .bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'#')
            .fold(0u32, |mask, (i, _)| mask | 1 << i);

        let joltage: Vec<u64> = parse_list(
            &self
                .joltage
                .captures(line)
                .ok_or_else(|| anyhow!("missing `{{...}}` joltage targets"))?[1],
        )
        .context("bad joltage")?;
        ensure!(
            joltage.len() == pattern.len(),
            "{} lights but {} joltage targets",
            pattern.len(),
            joltage.len()
        );

        let buttons = self
            .button
            .captures_iter(line)
            .map(|caps| -> anyhow::Result<Vec<usize>> {
                let wires: Vec<usize> = parse_list(&caps[1]).context("bad button")?;
                if let Some(&bad) = wires.iter().find(|&&w| w >= pattern.len()) {
                    bail!("button wired to light {bad} of {}", pattern.len());
                }
                Ok(wires)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Machine {
            light_count: pattern.len(),
            lights,
            buttons,
            joltage,
        })
    }
}

fn parse_list<T: std::str::FromStr>(list: &str) -> Result<Vec<T>, T::Err> {
    list.split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.trim().parse())
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let syntax = MachineSyntax::new().map_err(|e| ParseError::Other(e.to_string()))?;
        parse_lines(input.trim(), |line| syntax.parse_machine(line.trim()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_per_machine(shared, fewest_toggle_presses)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_per_machine(shared, fewest_joltage_presses)
    }
}

fn sum_per_machine(
    machines: &[Machine],
    presses: impl Fn(&Machine) -> Option<u64>,
) -> Result<String, SolveError> {
    machines
        .iter()
        .enumerate()
        .map(|(idx, machine)| {
            presses(machine).ok_or_else(|| {
                SolveError::SolveFailed(format!("machine {} cannot be configured", idx + 1).into())
            })
        })
        .sum::<Result<u64, _>>()
        .map(|total| total.to_string())
}

/// Breadth-first search over light states, starting from all lights off.
fn fewest_toggle_presses(machine: &Machine) -> Option<u64> {
    let masks: Vec<u32> = machine
        .buttons
        .iter()
        .map(|wires| wires.iter().fold(0, |mask, &w| mask ^ 1 << w))
        .collect();

    let mut presses: Vec<Option<u64>> = vec![None; 1 << machine.light_count];
    presses[0] = Some(0);
    let mut queue = VecDeque::from([0u32]);
    while let Some(state) = queue.pop_front() {
        let depth = presses[state as usize]?;
        if state == machine.lights {
            return Some(depth);
        }
        for &mask in &masks {
            let next = state ^ mask;
            if presses[next as usize].is_none() {
                presses[next as usize] = Some(depth + 1);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Fewest presses so that every counter reaches its joltage target.
///
/// Solves `A x = target` (one row per counter, one column per button) by
/// Gauss-Jordan elimination, then searches the free buttons for the
/// non-negative integer solution with the smallest total.
fn fewest_joltage_presses(machine: &Machine) -> Option<u64> {
    let rows = machine.joltage.len();
    let cols = machine.buttons.len();

    let mut matrix = vec![vec![0.0f64; cols + 1]; rows];
    for (row, &target) in matrix.iter_mut().zip(&machine.joltage) {
        row[cols] = target as f64;
    }
    for (col, wires) in machine.buttons.iter().enumerate() {
        for &w in wires {
            matrix[w][col] = 1.0;
        }
    }

    let mut pivot_cols = Vec::new();
    for col in 0..cols {
        let pivot_row = pivot_cols.len();
        if pivot_row == rows {
            break;
        }
        let Some(best) = (pivot_row..rows)
            .max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))
        else {
            break;
        };
        if matrix[best][col].abs() < EPSILON {
            continue;
        }
        matrix.swap(pivot_row, best);

        let divisor = matrix[pivot_row][col];
        matrix[pivot_row].iter_mut().for_each(|v| *v /= divisor);
        let pivot = matrix[pivot_row].clone();
        for (r, row) in matrix.iter_mut().enumerate() {
            let factor = row[col];
            if r != pivot_row && factor != 0.0 {
                row.iter_mut().zip(&pivot).for_each(|(v, p)| *v -= factor * p);
            }
        }
        pivot_cols.push(col);
    }

    // Rows without a pivot read `0 = rhs`.
    if matrix[pivot_cols.len()..].iter().any(|row| row[cols].abs() > EPSILON) {
        return None;
    }

    let free_cols: Vec<usize> = (0..cols).filter(|c| !pivot_cols.contains(c)).collect();
    // Pressing a button more often than its smallest counter target overshoots.
    let bounds: Vec<u64> = free_cols
        .iter()
        .map(|&c| {
            machine.buttons[c]
                .iter()
                .map(|&w| machine.joltage[w])
                .min()
                .unwrap_or(0)
        })
        .collect();

    let search = FreeSearch {
        matrix: &matrix,
        pivot_count: pivot_cols.len(),
        free_cols: &free_cols,
        bounds: &bounds,
        rhs: cols,
    };
    let mut values = vec![0u64; free_cols.len()];
    let mut best = None;
    search.run(0, 0, &mut values, &mut best);
    tracing::debug!(buttons = cols, free = free_cols.len(), ?best, "solved joltage");
    best
}

struct FreeSearch<'a> {
    matrix: &'a [Vec<f64>],
    pivot_count: usize,
    free_cols: &'a [usize],
    bounds: &'a [u64],
    rhs: usize,
}

impl FreeSearch<'_> {
    fn run(&self, idx: usize, free_total: u64, values: &mut [u64], best: &mut Option<u64>) {
        if best.is_some_and(|b| free_total >= b) {
            return;
        }
        if idx == self.free_cols.len() {
            if let Some(pivot_total) = self.pivot_total(values) {
                let total = free_total + pivot_total;
                if best.is_none_or(|b| total < b) {
                    *best = Some(total);
                }
            }
            return;
        }
        for v in 0..=self.bounds[idx] {
            values[idx] = v;
            self.run(idx + 1, free_total + v, values, best);
        }
        values[idx] = 0;
    }

    /// Sum of the pivot buttons' presses, if all are non-negative integers.
    fn pivot_total(&self, values: &[u64]) -> Option<u64> {
        self.matrix[..self.pivot_count].iter().try_fold(0u64, |total, row| {
            let value = self
                .free_cols
                .iter()
                .zip(values)
                .fold(row[self.rhs], |acc, (&c, &v)| acc - row[c] * v as f64);
            let rounded = value.round();
            (value > -EPSILON && (value - rounded).abs() < EPSILON).then(|| total + rounded as u64)
        })
    }
}
