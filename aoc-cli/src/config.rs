//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Root directory of puzzle inputs, `~` already expanded
    pub input_dir: PathBuf,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
    /// Debug-level logging
    pub verbose: bool,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Self {
        Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            thread_count: args.threads.unwrap_or_else(num_cpus),
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.get(2..).unwrap_or_default());
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_expand_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
        assert_eq!(expand_tilde(Path::new("~")), home);
        assert_eq!(expand_tilde(Path::new("inputs")), PathBuf::from("inputs"));
        assert_eq!(expand_tilde(Path::new("/a/~/b")), PathBuf::from("/a/~/b"));
    }

    #[test]
    fn test_from_args() {
        let args = Args::try_parse_from(["aoc", "--threads", "3", "-v", "--input-dir", "data"])
            .unwrap();
        let config = Config::from_args(args);
        assert_eq!(config.thread_count, 3);
        assert_eq!(config.input_dir, PathBuf::from("data"));
        assert_eq!(config.default_log_filter(), "debug");
    }

    #[test]
    fn test_thread_count_defaults_to_available_parallelism() {
        let config = Config::from_args(Args::try_parse_from(["aoc"]).unwrap());
        assert!(config.thread_count >= 1);
        assert_eq!(config.default_log_filter(), "info");
    }
}
