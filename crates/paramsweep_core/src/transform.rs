use std::fmt;

use crate::sequence::Sequence;

/// A sequence whose values are `rule(source[i])`.
///
/// Size, traversal and parameter paths all come from the source unchanged.
#[derive(Clone)]
pub struct TransformFactor<S, F> {
    source: S,
    rule: F,
}

impl<S, F, U> TransformFactor<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
{
    pub fn new(source: S, rule: F) -> Self {
        Self { source, rule }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn iter(&self) -> impl Iterator<Item = U> + '_ {
        self.source.values().map(&self.rule)
    }
}

impl<S, F, U> Sequence for TransformFactor<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
{
    type Item = U;

    fn size(&self) -> usize {
        self.source.size()
    }

    fn at(&self, index: usize) -> Option<U> {
        self.source.at(index).map(&self.rule)
    }

    fn values(&self) -> Box<dyn Iterator<Item = U> + '_> {
        Box::new(self.iter())
    }

    fn parameters(&self, index: usize) -> Option<Vec<usize>> {
        self.source.parameters(index)
    }
}

impl<S: fmt::Debug, F> fmt::Debug for TransformFactor<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformFactor")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
