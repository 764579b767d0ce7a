//! Day 1: dial rotations
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse_lines;

const DIAL_SIZE: i32 = 100;
const DIAL_START: i32 = 50;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["2025", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<i32>,
    common_result: Option<CommonResult>,
}

#[derive(Debug)]
pub struct CommonResult {
    zero_stops: u32,
    zero_clicks: u32,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rotations = parse_lines(input.trim(), |line| {
            let (direction, amount) = line.split_at_checked(1).ok_or_else(|| anyhow!("missing rotation direction"))?;
            let amount: i32 = amount.parse()?;
            if amount < 0 {
                bail!("rotation amount must be non negative");
            }
            match direction {
                "L" => Ok(-amount),
                "R" => Ok(amount),
                _ => bail!("first character needs to be 'L' or 'R'"),
            }
        })?;

        Ok(SharedData {
            rotations,
            common_result: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).zero_stops.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).zero_clicks.to_string())
    }
}

fn solve_once_for_both(shared: &mut SharedData) -> &CommonResult {
    shared.common_result.get_or_insert_with(|| {
        let (_, zero_stops, zero_clicks) = shared.rotations.iter().fold(
            (DIAL_START, 0u32, 0u32),
            |(mut dial, mut zero_stops, mut zero_clicks), rotation| {
                let old_dial = dial;
                dial += rotation;
                // Moving left onto or past 0 from a non-zero position clicks 0 once
                // before any full turns are counted below.
                if dial <= 0 && old_dial != 0 {
                    zero_clicks += 1;
                }
                zero_clicks += (dial / DIAL_SIZE).unsigned_abs();
                dial = dial.rem_euclid(DIAL_SIZE);
                if dial == 0 {
                    zero_stops += 1;
                }
                (dial, zero_stops, zero_clicks)
            },
        );

        tracing::debug!(zero_stops, zero_clicks, "dial simulation finished");
        CommonResult {
            zero_stops,
            zero_clicks,
        }
    })
}
