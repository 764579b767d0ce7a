//! Day 5: fresh ingredient ID ranges
use std::ops::RangeInclusive;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::line_error;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["2025", "intervals"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    fresh: Vec<RangeInclusive<u64>>,
    available: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut fresh = Vec::new();
        let mut available = Vec::new();
        let mut in_ranges = true;

        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                if !fresh.is_empty() {
                    in_ranges = false;
                }
                continue;
            }
            // An ID before any range means the range section is absent
            if in_ranges && fresh.is_empty() && !line.contains('-') {
                in_ranges = false;
            }
            let parsed = if in_ranges {
                parse_range(line).map(|r| fresh.push(r))
            } else {
                line.parse::<u64>()
                    .with_context(|| format!("bad ingredient ID {line:?}"))
                    .map(|id| available.push(id))
            };
            parsed.map_err(|e| line_error(line_idx + 1, e))?;
        }

        if fresh.is_empty() {
            return Err(ParseError::MissingData("no fresh ID ranges".to_string()));
        }
        Ok(SharedData { fresh, available })
    }
}

fn parse_range(line: &str) -> anyhow::Result<RangeInclusive<u64>> {
    let (start, end) = line
        .split_once('-')
        .ok_or_else(|| anyhow!("expected `start-end`, found {line:?}"))?;
    let start: u64 = start.parse().context("bad range start")?;
    let end: u64 = end.parse().context("bad range end")?;
    if start > end {
        bail!("range {line} is reversed");
    }
    Ok(start..=end)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let merged = merge_ranges(&shared.fresh);
        let fresh = shared
            .available
            .iter()
            .filter(|&&id| {
                // First merged range ending at or after `id`.
                let idx = merged.partition_point(|r| *r.end() < id);
                merged.get(idx).is_some_and(|r| r.contains(&id))
            })
            .count();
        Ok(fresh.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = merge_ranges(&shared.fresh)
            .iter()
            .map(|r| r.end() - r.start() + 1)
            .sum();
        Ok(total.to_string())
    }
}

/// Sorted, disjoint, non-adjacent ranges covering the same IDs as `ranges`.
fn merge_ranges(ranges: &[RangeInclusive<u64>]) -> Vec<RangeInclusive<u64>> {
    let mut sorted = ranges.to_vec();
    sorted.sort_unstable_by_key(|r| *r.start());

    let mut merged: Vec<RangeInclusive<u64>> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const EXAMPLE: &str = "3-5\n10-14\n16-20\n12-18\n\n1\n5\n8\n11\n17\n32\n";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_example() {
        assert_eq!(solve(EXAMPLE, 1), "3");
        assert_eq!(solve(EXAMPLE, 2), "14");
    }

    #[test]
    fn test_adjacent_and_nested_ranges() {
        assert_eq!(solve("1-3\n4-6\n2-2\n\n4", 2), "6");
        assert_eq!(solve("1-10\n3-4\n\n4\n11", 1), "1");
    }

    #[test]
    fn test_missing_ranges() {
        assert!(matches!(Solver::parse("\n1\n2"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("1\n2"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse(""), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn test_malformed_range_after_ranges_reports_line() {
        assert!(matches!(
            Solver::parse("1-2\n7\n\n3"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")
        ));
    }

    #[test]
    fn test_bad_id_reports_line() {
        assert!(matches!(
            Solver::parse("1-2\n\nx"),
            Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 3)")
        ));
    }

    proptest! {
        #[test]
        fn merge_matches_brute_force(
            ranges in prop::collection::vec((0u64..300, 0u64..40), 1..15),
            ids in prop::collection::vec(0u64..350, 0..30),
        ) {
            let fresh: Vec<_> = ranges.iter().map(|&(a, len)| a..=a + len).collect();
            let mut shared = SharedData { fresh: fresh.clone(), available: ids.clone() };

            let covered = (0u64..350).filter(|id| fresh.iter().any(|r| r.contains(id))).count();
            let hits = ids.iter().filter(|id| fresh.iter().any(|r| r.contains(id))).count();

            prop_assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), hits.to_string());
            prop_assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), covered.to_string());
        }
    }
}
