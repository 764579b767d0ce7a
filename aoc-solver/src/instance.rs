//! Parsed solver instances with timing

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

/// Answer to one part, with the wall-clock window it was solved in
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Part number the answer belongs to
    pub part: u8,
    /// The answer string
    pub answer: String,
    /// When solving started (UTC)
    pub solve_start: DateTime<Utc>,
    /// When solving completed (UTC)
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// Parsed input for one year-day puzzle
///
/// The shared data lives as long as the input it may borrow from, so every
/// part solved through the same instance sees what earlier parts stored.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input`, recording how long it took
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let parse_start = Utc::now();
        let shared = S::parse(input)?;
        let parse_end = Utc::now();
        debug!(year, day, bytes = input.len(), "parsed input in {}", parse_end - parse_start);

        Ok(Self {
            year,
            day,
            shared,
            parse_start,
            parse_end,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], used by the registry and runner
///
/// # Example
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn example(mut solver: Box<dyn DynSolver>) -> Result<(), Box<dyn std::error::Error>> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("Part {}: {} (took {})", result.part, result.answer, result.duration());
///     }
///     println!("Parse took {}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve the specified part with timing
    ///
    /// # Returns
    /// * `Ok(SolveResult)` - The part was solved successfully with timing info
    /// * `Err(SolveError)` - The part is out of range or solving failed
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_start(&self) -> DateTime<Utc>;

    fn parse_end(&self) -> DateTime<Utc>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    /// Number of parts this solver supports
    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<'a, S: SolverExt> DynSolver for SolverInstance<'a, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let solve_start = Utc::now();
        let answer = S::solve_part_checked_range(&mut self.shared, part)?;
        let solve_end = Utc::now();
        debug!(
            year = self.year,
            day = self.day,
            part,
            "solved in {}",
            solve_end - solve_start
        );

        Ok(SolveResult {
            part,
            answer,
            solve_start,
            solve_end,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::AocParser;

    /// Counts lines; part 2 reports how many times part 1 ran on this instance
    struct Lines;

    impl AocParser for Lines {
        type SharedData<'a> = (Vec<&'a str>, u32);

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            if input.is_empty() {
                return Err(ParseError::MissingData("no lines".into()));
            }
            Ok((input.lines().collect(), 0))
        }
    }

    impl Solver for Lines {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => {
                    shared.1 += 1;
                    Ok(shared.0.len().to_string())
                }
                2 => Ok(shared.1.to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn test_instance_keeps_state_between_parts() {
        let mut instance = SolverInstance::<Lines>::new(2025, 4, "a\nb\nc").unwrap();
        assert_eq!((instance.year(), instance.day(), instance.parts()), (2025, 4, 2));

        let first = instance.solve(1).unwrap();
        assert_eq!((first.part, first.answer.as_str()), (1, "3"));
        assert!(first.duration() >= TimeDelta::zero());

        instance.solve(1).unwrap();
        assert_eq!(instance.solve(2).unwrap().answer, "2");
        assert!(instance.parse_duration() >= TimeDelta::zero());
    }

    #[test]
    fn test_out_of_range_parts_rejected_before_dispatch() {
        let mut instance = SolverInstance::<Lines>::new(2025, 4, "a").unwrap();
        assert!(matches!(instance.solve(0), Err(SolveError::PartOutOfRange(0))));
        assert!(matches!(instance.solve(3), Err(SolveError::PartOutOfRange(3))));
    }

    #[test]
    fn test_parse_failure_propagates() {
        assert!(matches!(
            SolverInstance::<Lines>::new(2025, 4, ""),
            Err(ParseError::MissingData(_))
        ));
    }
}
