//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use output::OutputFormatter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() {
    let config = Config::from_args(Args::parse());

    if let Err(e) = init_logging(&config).and_then(|()| run(config)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install a stderr subscriber; `RUST_LOG` wins over the `-v` default
fn init_logging(config: &Config) -> Result<(), CliError> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_log_filter()))
        .map_err(|e| CliError::Config(format!("invalid log filter: {}", e)))?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::Config(format!("failed to install logger: {}", e)))
}

fn run(config: Config) -> Result<(), CliError> {
    let registry = build_registry(&config.tags)?;

    let executor = Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        info!("no solvers found matching the specified filters");
        return Ok(());
    }

    // Missing inputs still run; each of their parts reports an error
    let missing = executor.missing_inputs(&work_items);
    if !missing.is_empty() {
        warn!(
            "missing {} input file(s) under {}",
            missing.len(),
            config.input_dir.display()
        );
        for work in missing {
            warn!("  - {}/day{:02}", work.year, work.day);
        }
    }

    run_executor(executor, work_items, config.quiet)
}

/// Run the executor and print results in order as they arrive
fn run_executor(
    executor: Executor,
    work_items: Vec<executor::WorkItem>,
    quiet: bool,
) -> Result<(), CliError> {
    info!("running {} solver(s)", work_items.len());

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |p| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part: p,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();

    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
        .map_err(CliError::Executor)?;

    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
