//! Advent of Code Solver Library
//!
//! A type-safe framework for solving Advent of Code problems across multiple
//! years and days. Each problem is a solver with its own input parsing that
//! produces an answer per part.
//!
//! # Overview
//!
//! This library provides:
//! - [`AocParser`]: parse the raw input once into shared data
//! - [`PartSolver<N>`]: solve part `N` against the shared data
//! - [`Solver`]: runtime part dispatch, usually derived with `#[derive(AocSolver)]`
//! - [`DynSolver`]: a type-erased, timed solver instance
//! - [`SolverRegistry`]: year/day lookup, filled from plugins submitted by
//!   `#[derive(AutoRegisterSolver)]`
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{
//!     AocParser, AocSolver, DynSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
//! };
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Day1;
//!
//! impl AocParser for Day1 {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Day1 {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Day1 {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().product::<i64>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register(2023, 1, 2, |input: &str| {
//!         Ok(Box::new(aoc_solver::SolverInstance::<Day1>::new(2023, 1, input)?))
//!     })
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2023, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! assert_eq!(solver.solve(2).unwrap().answer, "6");
//! ```
//!
//! # Part Dependencies
//!
//! Parts receive `&mut SharedData`, so a part can store intermediate
//! results (for example in an `Option` field) that a later part reuses.

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
