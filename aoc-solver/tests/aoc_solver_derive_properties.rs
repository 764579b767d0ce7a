//! Property-based tests for the AocSolver derive macro

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

/// Parsed range list with an optional merged form cached by part 1
#[derive(Debug)]
struct Ranges {
    ranges: Vec<(u32, u32)>,
    merged: Option<Vec<(u32, u32)>>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 3)]
struct RangeSolver;

impl AocParser for RangeSolver {
    type SharedData<'a> = Ranges;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let ranges = input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                let (a, b) = l
                    .split_once('-')
                    .ok_or_else(|| ParseError::InvalidFormat(l.to_string()))?;
                let a = a.parse().map_err(|_| ParseError::InvalidFormat(l.to_string()))?;
                let b = b.parse().map_err(|_| ParseError::InvalidFormat(l.to_string()))?;
                Ok((a, b))
            })
            .collect::<Result<_, ParseError>>()?;
        Ok(Ranges {
            ranges,
            merged: None,
        })
    }
}

impl PartSolver<1> for RangeSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut sorted = shared.ranges.clone();
        sorted.sort_unstable();
        let mut merged: Vec<(u32, u32)> = Vec::new();
        for (a, b) in sorted {
            match merged.last_mut() {
                Some(last) if a <= last.1 => last.1 = last.1.max(b),
                _ => merged.push((a, b)),
            }
        }
        let count = merged.len();
        shared.merged = Some(merged);
        Ok(count.to_string())
    }
}

impl PartSolver<2> for RangeSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let merged = shared
            .merged
            .as_ref()
            .ok_or_else(|| SolveError::SolveFailed("part 1 must run first".into()))?;
        let covered: u64 = merged.iter().map(|&(a, b)| u64::from(b - a) + 1).sum();
        Ok(covered.to_string())
    }
}

impl PartSolver<3> for RangeSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.ranges.len().to_string())
    }
}

fn range_strategy() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((0u32..200, 0u32..20).prop_map(|(a, len)| (a, a + len)), 1..12)
}

fn to_input(ranges: &[(u32, u32)]) -> String {
    ranges
        .iter()
        .map(|(a, b)| format!("{a}-{b}"))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Dispatch through `Solver::solve_part` matches calling `PartSolver<N>` directly
    #[test]
    fn solve_part_dispatches_to_matching_part_solver(ranges in range_strategy()) {
        let input = to_input(&ranges);
        let mut via_dispatch = RangeSolver::parse(&input).unwrap();
        let mut direct = RangeSolver::parse(&input).unwrap();

        prop_assert_eq!(
            RangeSolver::solve_part(&mut via_dispatch, 1).unwrap(),
            <RangeSolver as PartSolver<1>>::solve(&mut direct).unwrap()
        );
        prop_assert_eq!(
            RangeSolver::solve_part(&mut via_dispatch, 3).unwrap(),
            <RangeSolver as PartSolver<3>>::solve(&mut direct).unwrap()
        );
    }

    /// State written by part 1 is what part 2 reads
    #[test]
    fn part_two_sees_part_one_state(ranges in range_strategy()) {
        let input = to_input(&ranges);
        let mut shared = RangeSolver::parse(&input).unwrap();

        RangeSolver::solve_part(&mut shared, 1).unwrap();
        let covered: u64 = RangeSolver::solve_part(&mut shared, 2).unwrap().parse().unwrap();

        let brute = (0u32..=220)
            .filter(|x| ranges.iter().any(|&(a, b)| (a..=b).contains(x)))
            .count() as u64;
        prop_assert_eq!(covered, brute);
    }

    /// Part numbers past `max_parts` never reach a part solver
    #[test]
    fn unknown_parts_are_not_implemented(part in prop_oneof![Just(0u8), 4u8..=255]) {
        let mut shared = RangeSolver::parse("1-2").unwrap();
        match RangeSolver::solve_part(&mut shared, part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "Expected PartNotImplemented, got {:?}", other),
        }
    }
}

#[test]
fn test_parts_constant() {
    assert_eq!(<RangeSolver as Solver>::PARTS, 3);
}

#[test]
fn test_part_two_without_part_one_fails() {
    let mut shared = RangeSolver::parse("1-4\n3-9").unwrap();
    assert!(matches!(
        RangeSolver::solve_part(&mut shared, 2),
        Err(SolveError::SolveFailed(_))
    ));
}
