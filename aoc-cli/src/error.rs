//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input file could not be read
    #[error("Input read failed for {year}/{day}: {source}")]
    InputRead {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Solver creation or execution failed
    #[error("Solver execution failed: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one
    ///
    /// Nested `Multiple` errors are flattened so the result is always a
    /// single-level list in the order the errors were combined.
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Input store errors
#[derive(Error, Debug)]
pub enum InputError {
    /// No input file at the expected location
    #[error("missing input file {}", .0.display())]
    Missing(PathBuf),

    /// The input file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_error(msg: &str) -> ArcExecutorError {
        ExecutorError::ThreadPool(msg.to_string()).into()
    }

    fn messages(err: &ArcExecutorError) -> Vec<String> {
        match err.inner() {
            ExecutorError::Multiple(v) => v.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }

    #[test]
    fn test_combine_flattens_in_order() {
        let ab = ArcExecutorError::combine(pool_error("a"), pool_error("b"));
        let cd = ArcExecutorError::combine(pool_error("c"), pool_error("d"));
        let all = ArcExecutorError::combine(ab.clone(), cd);
        assert_eq!(all.to_string(), "Multiple errors occurred (4 total)");
        assert_eq!(
            messages(&all),
            ["a", "b", "c", "d"].map(|m| format!("Thread pool creation failed: {m}"))
        );

        let abe = ArcExecutorError::combine(ab, pool_error("e"));
        assert_eq!(messages(&abe).len(), 3);
        let zab = ArcExecutorError::combine(pool_error("z"), abe);
        assert_eq!(messages(&zab)[0], "Thread pool creation failed: z");
    }

    #[test]
    fn test_combine_opt_without_existing_is_identity() {
        let err = ArcExecutorError::combine_opt(None, ExecutorError::ChannelSend.into());
        assert!(matches!(err.inner(), ExecutorError::ChannelSend));
    }
}
