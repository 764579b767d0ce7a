//! Day 11: counting paths through the reactor's devices
use std::collections::HashMap;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend, VecBackend};
use crate::utils::line_error;

const OUT: &str = "out";

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["2025", "graph", "dp"])]
pub struct Solver;

/// Device graph with names interned to dense ids.
#[derive(Debug)]
pub struct Reactor<'a> {
    ids: HashMap<&'a str, usize>,
    outputs: Vec<Vec<usize>>,
}

impl<'a> Reactor<'a> {
    fn intern(&mut self, name: &'a str) -> usize {
        let next = self.ids.len();
        let id = *self.ids.entry(name).or_insert(next);
        if id == next {
            self.outputs.push(Vec::new());
        }
        id
    }

    fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    /// Fails if any device can reach itself.
    fn ensure_acyclic(&self) -> Result<(), ParseError> {
        let mut indegree = vec![0usize; self.outputs.len()];
        for &to in self.outputs.iter().flatten() {
            indegree[to] += 1;
        }
        let mut ready: Vec<usize> = (0..indegree.len()).filter(|&n| indegree[n] == 0).collect();
        let mut visited = 0;
        while let Some(node) = ready.pop() {
            visited += 1;
            for &to in &self.outputs[node] {
                indegree[to] -= 1;
                if indegree[to] == 0 {
                    ready.push(to);
                }
            }
        }
        if visited == self.outputs.len() {
            Ok(())
        } else {
            Err(ParseError::InvalidFormat("device connections contain a cycle".to_string()))
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Reactor<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut reactor = Reactor {
            ids: HashMap::new(),
            outputs: Vec::new(),
        };
        let mut described = vec![];

        for (line_idx, line) in input.trim().lines().enumerate() {
            let parsed = (|| -> anyhow::Result<(&'a str, Vec<&'a str>)> {
                let (name, outputs) = line
                    .split_once(':')
                    .ok_or_else(|| anyhow!("expected `name: outputs...`"))?;
                let name = name.trim();
                if name.is_empty() {
                    bail!("missing device name");
                }
                Ok((name, outputs.split_whitespace().collect()))
            })();
            let (name, outputs) = parsed.map_err(|e| line_error(line_idx + 1, e))?;

            let id = reactor.intern(name);
            if described.get(id).copied().unwrap_or(false) {
                return Err(line_error(line_idx + 1, format!("device {name} listed twice")));
            }
            let outputs: Vec<usize> = outputs.into_iter().map(|o| reactor.intern(o)).collect();
            described.resize(reactor.outputs.len(), false);
            described[id] = true;
            reactor.outputs[id] = outputs;
        }

        reactor.ensure_acyclic()?;
        tracing::debug!(devices = reactor.outputs.len(), "parsed reactor");
        Ok(reactor)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_paths(shared, "you", &[]).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_paths(shared, "svr", &["dac", "fft"]).to_string())
    }
}

/// Paths from `start` to `out` that pass through every device in `via`.
///
/// Missing devices leave no such path.
fn count_paths(reactor: &Reactor, start: &str, via: &[&str]) -> u64 {
    let (Some(start), Some(out)) = (reactor.id(start), reactor.id(OUT)) else {
        return 0;
    };
    let Some(via) = via.iter().map(|name| reactor.id(name)).collect::<Option<Vec<_>>>() else {
        return 0;
    };

    if via.is_empty() {
        let problem = PathsToOut {
            outputs: &reactor.outputs,
            out,
        };
        DpCache::with_problem(VecBackend::with_capacity(reactor.outputs.len()), problem).get(&start)
    } else {
        let problem = PathsVia {
            outputs: &reactor.outputs,
            out,
            via: &via,
        };
        let start = (start, problem.visit(start, 0));
        DpCache::with_problem(HashMapBackend::new(), problem).get(&start)
    }
}

/// Paths from a device to `out`.
struct PathsToOut<'r> {
    outputs: &'r [Vec<usize>],
    out: usize,
}

impl DpProblem<usize, u64> for PathsToOut<'_> {
    fn deps(&self, &node: &usize) -> Vec<usize> {
        if node == self.out {
            vec![]
        } else {
            self.outputs[node].clone()
        }
    }

    fn compute(&self, &node: &usize, deps: Vec<u64>) -> u64 {
        if node == self.out { 1 } else { deps.iter().sum() }
    }
}

/// Paths from a device to `out`, keyed by the set of `via` devices already
/// visited (bit `i` for `via[i]`). Only paths that end with every bit set count.
struct PathsVia<'r> {
    outputs: &'r [Vec<usize>],
    out: usize,
    via: &'r [usize],
}

impl PathsVia<'_> {
    fn visit(&self, node: usize, mask: u32) -> u32 {
        self.via
            .iter()
            .position(|&v| v == node)
            .map_or(mask, |bit| mask | 1 << bit)
    }
}

impl DpProblem<(usize, u32), u64> for PathsVia<'_> {
    fn deps(&self, &(node, mask): &(usize, u32)) -> Vec<(usize, u32)> {
        if node == self.out {
            return vec![];
        }
        self.outputs[node]
            .iter()
            .map(|&next| (next, self.visit(next, mask)))
            .collect()
    }

    fn compute(&self, &(node, mask): &(usize, u32), deps: Vec<u64>) -> u64 {
        if node == self.out {
            u64::from(mask == (1 << self.via.len()) - 1)
        } else {
            deps.iter().sum()
        }
    }
}
