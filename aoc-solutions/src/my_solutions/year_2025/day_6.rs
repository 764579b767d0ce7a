//! Day 6: cephalopod math worksheet
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::line_error;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["2025", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Multiply,
}

impl Operator {
    fn apply(self, numbers: &[u64]) -> u64 {
        match self {
            Operator::Add => numbers.iter().sum(),
            Operator::Multiply => numbers.iter().product(),
        }
    }
}

/// One problem, with its numbers read both ways.
#[derive(Debug)]
pub struct Problem {
    operator: Operator,
    /// One number per worksheet row.
    by_row: Vec<u64>,
    /// One number per character column, rightmost column first.
    by_column: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Problem>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&[u8]> = input
            .lines()
            .map(|l| l.trim_end_matches('\r').as_bytes())
            .collect();
        let last = lines
            .iter()
            .rposition(|l| l.iter().any(|b| !b.is_ascii_whitespace()))
            .ok_or_else(|| ParseError::MissingData("empty worksheet".to_string()))?;
        if last == 0 {
            return Err(ParseError::MissingData("worksheet has no number rows".to_string()));
        }
        let (rows, operator_row) = (&lines[..last], lines[last]);
        let width = lines[..=last].iter().map(|l| l.len()).max().unwrap_or(0);

        // Rows shorter than the widest one are padded with spaces.
        let at = |line: &[u8], col: usize| line.get(col).copied().unwrap_or(b' ');
        let is_separator = |col: usize| lines[..=last].iter().all(|&l| at(l, col) == b' ');

        let mut problems = Vec::new();
        let mut col = 0;
        while col < width {
            if is_separator(col) {
                col += 1;
                continue;
            }
            let start = col;
            while col < width && !is_separator(col) {
                col += 1;
            }
            let span = start..col;

            let operator = match span.clone().map(|c| at(operator_row, c)).find(|&b| b != b' ') {
                Some(b'+') => Operator::Add,
                Some(b'*') => Operator::Multiply,
                other => {
                    return Err(line_error(
                        last + 1,
                        format!(
                            "expected `+` or `*` for the problem at column {}, found {:?}",
                            start + 1,
                            other.map(char::from)
                        ),
                    ));
                }
            };

            let by_row = rows
                .iter()
                .enumerate()
                .map(|(row_idx, &row)| {
                    let digits: Vec<u8> = span.clone().map(|c| at(row, c)).filter(|&b| b != b' ').collect();
                    parse_digits(&digits)
                        .ok_or_else(|| line_error(row_idx + 1, format!("bad number at column {}", start + 1)))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let by_column = span
                .clone()
                .rev()
                .map(|c| {
                    let digits: Vec<u8> = rows.iter().map(|&row| at(row, c)).filter(|&b| b != b' ').collect();
                    parse_digits(&digits).ok_or_else(|| {
                        ParseError::InvalidFormat(format!("bad vertical number at column {}", c + 1))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            problems.push(Problem {
                operator,
                by_row,
                by_column,
            });
        }

        tracing::debug!(problems = problems.len(), rows = rows.len(), "parsed worksheet");
        Ok(problems)
    }
}

fn parse_digits(digits: &[u8]) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0u64, |acc, &b| {
        b.is_ascii_digit()
            .then(|| acc.checked_mul(10)?.checked_add(u64::from(b - b'0')))
            .flatten()
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().map(|p| p.operator.apply(&p.by_row)).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().map(|p| p.operator.apply(&p.by_column)).sum();
        Ok(total.to_string())
    }
}
