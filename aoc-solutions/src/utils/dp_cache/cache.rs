//! Single-threaded DP cache.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::DpProblem;

/// Lazily evaluated memo table over a [`DpProblem`].
///
/// Values are computed on first request, after all of their dependencies,
/// and then served from the backend. The dependency graph must be a DAG.
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
///
/// struct Factorial;
///
/// impl DpProblem<u32, u64> for Factorial {
///     fn deps(&self, n: &u32) -> Vec<u32> {
///         if *n == 0 { vec![] } else { vec![n - 1] }
///     }
///     fn compute(&self, n: &u32, deps: Vec<u64>) -> u64 {
///         if *n == 0 { 1 } else { u64::from(*n) * deps[0] }
///     }
/// }
///
/// let cache = DpCache::with_problem(HashMapBackend::new(), Factorial);
/// assert_eq!(cache.get(&5), 120);
/// ```
pub struct DpCache<I, K, B, P>
where
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Value for `index`, computing it and its dependencies if necessary.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // No borrow is held while dependencies recurse.
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .into_iter()
            .map(|dep| self.get(&dep))
            .collect();

        self.backend
            .borrow_mut()
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
            .clone()
    }

    /// The problem definition this cache evaluates.
    #[cfg(test)]
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Consume the cache, returning its backend with every computed value.
    #[cfg(test)]
    pub fn into_backend(self) -> B {
        self.backend.into_inner()
    }
}
