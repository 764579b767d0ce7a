//! Day 3: largest joltage from each battery bank
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["2025", "greedy"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<u8>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input.trim(), |line| {
            line.bytes()
                .map(|b| match b {
                    b'0'..=b'9' => Ok(b - b'0'),
                    _ => Err(anyhow!("unexpected character {:?}", b as char)),
                })
                .collect()
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 2)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 12)
    }
}

fn total_joltage(banks: &[Vec<u8>], picks: usize) -> Result<String, SolveError> {
    banks
        .iter()
        .enumerate()
        .map(|(idx, bank)| {
            max_joltage(bank, picks).ok_or_else(|| {
                SolveError::SolveFailed(
                    format!("bank {} has {} batteries, need {picks}", idx + 1, bank.len()).into(),
                )
            })
        })
        .sum::<Result<u64, _>>()
        .map(|total| total.to_string())
}

/// Largest number formed by `picks` digits of `bank` kept in order.
///
/// The `i`-th digit is the leftmost maximum among positions that still leave
/// room for the remaining picks.
fn max_joltage(bank: &[u8], picks: usize) -> Option<u64> {
    if bank.len() < picks {
        return None;
    }

    let mut start = 0;
    let mut value = 0u64;
    for remaining in (0..picks).rev() {
        let window = &bank[start..bank.len() - remaining];
        let (offset, digit) = window
            .iter()
            .enumerate()
            .fold((0, 0), |best, (i, &d)| if d > best.1 { (i, d) } else { best });
        value = value * 10 + u64::from(digit);
        start += offset + 1;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const EXAMPLE: &str = "987654321111111\n811111111111119\n234234234234278\n818181911112111\n";

    fn solve(input: &str, part: u8) -> Result<String, SolveError> {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part)
    }

    /// Best subsequence of length `picks` by exhaustive recursion
    fn brute_force(bank: &[u8], picks: usize) -> u64 {
        if picks == 0 {
            return 0;
        }
        (0..=bank.len() - picks)
            .map(|i| {
                u64::from(bank[i]) * 10u64.pow(picks as u32 - 1) + brute_force(&bank[i + 1..], picks - 1)
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_example() {
        assert_eq!(solve(EXAMPLE, 1).unwrap(), "357");
        assert_eq!(solve(EXAMPLE, 2).unwrap(), "3121910778619");
    }

    #[test]
    fn test_short_bank_fails_only_for_long_pick() {
        assert_eq!(solve("12345", 1).unwrap(), "45");
        assert!(matches!(solve("12345", 2), Err(SolveError::SolveFailed(_))));
    }

    #[test]
    fn test_non_digit_rejected() {
        assert!(matches!(Solver::parse("123\n1a3"), Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")));
    }

    proptest! {
        #[test]
        fn greedy_matches_exhaustive(bank in prop::collection::vec(1u8..=9, 2..12), picks in 1usize..5) {
            prop_assume!(picks <= bank.len());
            prop_assert_eq!(max_joltage(&bank, picks), Some(brute_force(&bank, picks)));
        }
    }
}
