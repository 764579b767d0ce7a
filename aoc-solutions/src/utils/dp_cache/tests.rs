use std::cell::Cell;

use proptest::prelude::*;

use super::*;

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

/// Counts lattice paths to `(r, c)` moving only down or right
struct GridPaths;

impl DpProblem<(usize, usize), u64> for GridPaths {
    fn deps(&self, &(r, c): &(usize, usize)) -> Vec<(usize, usize)> {
        let mut deps = Vec::new();
        if r > 0 {
            deps.push((r - 1, c));
        }
        if c > 0 {
            deps.push((r, c - 1));
        }
        deps
    }

    fn compute(&self, _pos: &(usize, usize), deps: Vec<u64>) -> u64 {
        if deps.is_empty() { 1 } else { deps.iter().sum() }
    }
}

/// Diamond 0 -> {1, 2} -> 3, counting compute calls
struct Diamond {
    calls: Cell<usize>,
}

impl DpProblem<usize, i32> for Diamond {
    fn deps(&self, n: &usize) -> Vec<usize> {
        match *n {
            0 => vec![1, 2],
            1 | 2 => vec![3],
            _ => vec![],
        }
    }

    fn compute(&self, n: &usize, deps: Vec<i32>) -> i32 {
        self.calls.set(self.calls.get() + 1);
        match *n {
            0 => deps[0] + deps[1],
            1 => deps[0] * 2,
            2 => deps[0] * 3,
            _ => 1,
        }
    }
}

#[test]
fn test_fibonacci_vec_backend() {
    let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&10), 55);
    assert_eq!(cache.get(&90), 2_880_067_194_370_816_120);
}

#[test]
fn test_grid_paths_hashmap_backend() {
    let cache = DpCache::with_problem(HashMapBackend::new(), GridPaths);
    assert_eq!(cache.get(&(4, 4)), 70);
    assert_eq!(cache.get(&(0, 7)), 1);
    assert_eq!(cache.get(&(16, 16)), 601_080_390);
}

#[test]
fn test_shared_dependency_computed_once() {
    let cache = DpCache::with_problem(
        VecBackend::with_capacity(4),
        Diamond {
            calls: Cell::new(0),
        },
    );

    assert_eq!(cache.get(&0), 5);
    assert_eq!(cache.problem().calls.get(), 4);

    assert_eq!(cache.get(&0), 5);
    assert_eq!(cache.get(&3), 1);
    assert_eq!(cache.problem().calls.get(), 4);
}

#[test]
fn test_into_backend_keeps_values() {
    let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
    cache.get(&6);
    let backend = cache.into_backend();
    assert_eq!(backend.get(&6), Some(&8));
    assert_eq!(backend.get(&5), Some(&5));
    assert_eq!(backend.get(&7), None);
}

#[test]
fn test_vec_backend_get_or_insert() {
    let mut backend = VecBackend::new();
    assert_eq!(backend.get(&3), None);
    assert_eq!(*backend.get_or_insert(3, || 42), 42);
    assert_eq!(*backend.get_or_insert(3, || 7), 42);
    assert_eq!(backend.get(&0), None);
    assert_eq!(backend.get(&3), Some(&42));
}

#[test]
fn test_hashmap_backend_get_or_insert() {
    let mut backend = HashMapBackend::new();
    assert_eq!(backend.get(&("a", 1)), None);
    assert_eq!(*backend.get_or_insert(("a", 1), || 10), 10);
    assert_eq!(*backend.get_or_insert(("a", 1), || 20), 10);
    assert_eq!(backend.get(&("a", 2)), None);
}

proptest! {
    #[test]
    fn fibonacci_matches_iteration(n in 0usize..80) {
        let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
        let (mut a, mut b) = (0u64, 1u64);
        for _ in 0..n {
            (a, b) = (b, a + b);
        }
        prop_assert_eq!(cache.get(&n), a);
    }

    #[test]
    fn backends_agree_on_grid_paths(r in 0usize..12, c in 0usize..12) {
        let by_map = DpCache::with_problem(HashMapBackend::new(), GridPaths);
        let by_vec = DpCache::with_problem(VecBackend::new(), FlatGridPaths { width: 12 });
        prop_assert_eq!(by_map.get(&(r, c)), by_vec.get(&(r * 12 + c)));
    }
}

/// [`GridPaths`] over a row-major flattened index
struct FlatGridPaths {
    width: usize,
}

impl DpProblem<usize, u64> for FlatGridPaths {
    fn deps(&self, index: &usize) -> Vec<usize> {
        let (r, c) = (index / self.width, index % self.width);
        GridPaths
            .deps(&(r, c))
            .into_iter()
            .map(|(r, c)| r * self.width + c)
            .collect()
    }

    fn compute(&self, _index: &usize, deps: Vec<u64>) -> u64 {
        if deps.is_empty() { 1 } else { deps.iter().sum() }
    }
}
