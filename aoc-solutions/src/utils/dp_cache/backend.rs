//! Storage backends for the DP cache.

use std::collections::HashMap;
use std::hash::Hash;

/// Storage for computed values.
pub trait Backend<I, K> {
    /// The stored value for `index`, if computed.
    fn get(&self, index: &I) -> Option<&K>;

    /// The stored value for `index`, computing and storing it with `f` when absent.
    fn get_or_insert<F>(&mut self, index: I, f: F) -> &K
    where
        F: FnOnce() -> K;
}

/// Vec-backed storage for dense `usize` indices.
///
/// The vector grows to the largest index inserted so far.
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Pre-allocates room for indices `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.data.get(*index)?.as_ref()
    }

    fn get_or_insert<F>(&mut self, index: usize, f: F) -> &K
    where
        F: FnOnce() -> K,
    {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        self.data[index].get_or_insert_with(f)
    }
}

/// HashMap-backed storage for sparse or composite indices.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert<F>(&mut self, index: I, f: F) -> &K
    where
        F: FnOnce() -> K,
    {
        self.data.entry(index).or_insert_with(f)
    }
}
