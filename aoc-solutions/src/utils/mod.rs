//! Helpers shared by several solvers

pub mod dp_cache;
pub mod disjoint_set;
pub mod grid;

use aoc_solver::ParseError;

/// Parse every line of `input` with `parse_line`, failing on the first bad line.
///
/// The error is reported as `ParseError::InvalidFormat` prefixed with the
/// 1-based line number.
pub fn parse_lines<T, F>(input: &str, mut parse_line: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .map(|(line_idx, line)| {
            parse_line(line).map_err(|e| line_error(line_idx + 1, e))
        })
        .collect()
}

/// Shorthand for [`ParseError::at_line`].
pub fn line_error(line_no: usize, err: impl std::fmt::Display) -> ParseError {
    ParseError::at_line(line_no, err)
}
