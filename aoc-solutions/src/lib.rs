//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organized by year. Each one derives `AutoRegisterSolver`,
//! so linking this crate is enough for
//! `SolverRegistryBuilder::register_all_plugins` to find them.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
