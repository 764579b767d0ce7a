//! DP problem definition.

/// Dependency structure and combination step of a DP problem.
///
/// `I` is the index type, `K` the value stored per index.
pub trait DpProblem<I, K> {
    /// Indices this index depends on. Base cases return an empty vector.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value for `index`, given the values of `deps(index)` in the same order.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}
