//! Parse-once, solve-per-part traits

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle text into the data every part works on
///
/// `SharedData` may borrow from the input (`&'a str`, `Vec<&'a str>`) or own
/// it. Parts get it mutably, so an `Option` field is enough for one part to
/// leave work behind for the next.
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// assert_eq!(Depths::parse("3\n1").unwrap(), vec![3, 1]);
/// ```
pub trait AocParser {
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Answer for part `N`
///
/// `#[derive(AocSolver)]` stitches the `PartSolver<1>..=PartSolver<max_parts>`
/// impls of a type into its [`Solver`] implementation.
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Runtime part dispatch over a parsed input
///
/// Hand-written impls work too:
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl Solver for Depths {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         let increases = |gap: usize| shared.windows(gap + 1).filter(|w| w[gap] > w[0]).count();
///         match part {
///             1 => Ok(increases(1).to_string()),
///             2 => Ok(increases(3).to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut depths = Depths::parse("1\n3\n2\n4\n5").unwrap();
/// assert_eq!(Depths::solve_part(&mut depths, 1).unwrap(), "3");
/// assert_eq!(Depths::solve_part(&mut depths, 2).unwrap(), "2");
/// ```
pub trait Solver: AocParser {
    /// Parts are numbered `1..=PARTS`
    const PARTS: u8;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Bounds-checked entry point used by [`crate::SolverInstance`]
pub trait SolverExt: Solver {
    /// `PartOutOfRange` for parts outside `1..=PARTS`, otherwise [`Solver::solve_part`]
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
