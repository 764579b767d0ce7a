//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::warn;

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Parse time of the solver instance that produced this part
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Work items whose input file is absent
    pub fn missing_inputs<'w>(&self, work_items: &'w [WorkItem]) -> Vec<&'w WorkItem> {
        let inputs = &self.sync_executor_config.inputs;
        work_items
            .iter()
            .filter(|w| !inputs.contains(w.year, w.day))
            .collect()
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally splits each work item inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_work_item(&work, tx, sync_executor_config).err())
                .reduce_with(combine_errors)
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(combine_errors)
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }
}

fn combine_errors(
    first: Option<ArcExecutorError>,
    second: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (first, second) {
        (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
        (a, b) => a.or(b),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Send the same failure for every requested part of a work item
fn send_failure(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: ArcExecutorError,
) -> Result<(), ArcExecutorError> {
    warn!(year = work.year, day = work.day, "{}", error);
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
    }
    Ok(())
}

/// Read the input of one work item and run its parts
///
/// Input and solver-creation failures become per-part error results; only
/// channel failures are returned as errors.
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let input = match sync_executor_config.inputs.read(year, day) {
        Ok(input) => input,
        Err(source) => {
            let error = ExecutorError::InputRead { year, day, source }.into();
            return send_failure(work, tx, error);
        }
    };

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_solver_parts_parallel(work, &input, tx, sync_executor_config)
    } else {
        run_solver_sequential(work, &input, tx, sync_executor_config)
    }
}

/// Run each part on its own solver instance, emitting results in part order
fn run_solver_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (result_tx, result_rx) = std::sync::mpsc::channel();
    let (year, day) = (work.year, work.day);
    let registry = &sync_executor_config.registry;

    work.parts
        .clone()
        .into_par_iter()
        .for_each_with(result_tx, |rtx, part| {
            let result = match registry.create_solver(year, day, input) {
                Ok(mut solver) => solve_part(year, day, part, &mut *solver),
                Err(e) => SolverResult::failed(year, day, part, ExecutorError::from(e).into()),
            };
            rtx.send(result).ok();
        });

    let start_part = *work.parts.start();
    let mut buffer: Vec<Option<SolverResult>> = work.parts.clone().map(|_| None).collect();
    let mut next_part = start_part;

    for result in result_rx {
        let idx = (result.part - start_part) as usize;
        if let Some(slot) = buffer.get_mut(idx) {
            *slot = Some(result);
        }
        while let Some(result) = buffer
            .get_mut((next_part - start_part) as usize)
            .and_then(Option::take)
        {
            send(tx, result)?;
            next_part += 1;
        }
    }
    Ok(())
}

/// Run all parts on one solver instance so later parts can reuse earlier work
fn run_solver_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut solver = match sync_executor_config
        .registry
        .create_solver(year, day, input)
    {
        Ok(solver) => solver,
        Err(e) => return send_failure(work, tx, ExecutorError::from(e).into()),
    };

    for part in work.parts.clone() {
        send(tx, solve_part(year, day, part, &mut *solver))?;
    }
    Ok(())
}

/// Solve a single part
fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration,
        },
        Err(e) => {
            let error = ArcExecutorError::from(ExecutorError::from(aoc_solver::SolverError::from(e)));
            warn!(year, day, part, "{}", error);
            SolverResult {
                parse_duration,
                ..SolverResult::failed(year, day, part, error)
            }
        }
    }
}
