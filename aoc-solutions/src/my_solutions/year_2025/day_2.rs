//! Day 2: product IDs made of a repeated digit sequence
use std::collections::HashSet;
use std::ops::RangeInclusive;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["2025", "math"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<RangeInclusive<u64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(idx, range)| {
                parse_range(range)
                    .map_err(|e| ParseError::InvalidFormat(format!("(range {}) {e}", idx + 1)))
            })
            .collect()
    }
}

fn parse_range(range: &str) -> anyhow::Result<RangeInclusive<u64>> {
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| anyhow!("expected `start-end`, found {range:?}"))?;
    let start: u64 = start.parse().with_context(|| format!("bad start {start:?}"))?;
    let end: u64 = end.parse().with_context(|| format!("bad end {end:?}"))?;
    if start > end {
        bail!("range {range} is reversed");
    }
    Ok(start..=end)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_repeated_ids(shared, |reps| reps == 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_repeated_ids(shared, |reps| reps >= 2).to_string())
    }
}

fn sum_repeated_ids(ranges: &[RangeInclusive<u64>], allowed_reps: impl Fn(u32) -> bool) -> u128 {
    ranges
        .iter()
        .map(|range| {
            let ids = repeated_ids_in(u128::from(*range.start()), u128::from(*range.end()), &allowed_reps);
            ids.into_iter().sum::<u128>()
        })
        .sum()
}

fn digit_count(n: u128) -> u32 {
    n.checked_ilog10().map_or(1, |d| d + 1)
}

/// IDs in `start..=end` that are a `k`-digit unit written `reps` times, for
/// every `reps` accepted by `allowed_reps`.
///
/// With `d = k * reps` digits such an ID is `unit * (10^d - 1) / (10^k - 1)`,
/// so only the unit range has to be bounded.
fn repeated_ids_in(start: u128, end: u128, allowed_reps: impl Fn(u32) -> bool) -> HashSet<u128> {
    let mut ids = HashSet::new();

    for digits in digit_count(start)..=digit_count(end) {
        let lo = start.max(10u128.pow(digits - 1));
        let hi = end.min(10u128.pow(digits) - 1);
        if lo > hi {
            continue;
        }

        for unit_len in (1..digits).filter(|k| digits % k == 0) {
            if !allowed_reps(digits / unit_len) {
                continue;
            }
            let multiplier = (10u128.pow(digits) - 1) / (10u128.pow(unit_len) - 1);
            let unit_lo = lo.div_ceil(multiplier).max(10u128.pow(unit_len - 1));
            let unit_hi = (hi / multiplier).min(10u128.pow(unit_len) - 1);
            ids.extend((unit_lo..=unit_hi).map(|unit| unit * multiplier));
        }
    }

    ids
}
