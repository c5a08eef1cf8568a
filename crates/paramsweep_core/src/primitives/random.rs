use crate::distributions::RandomNumberGenerator;
use crate::sequence::Sequence;

/// `levels` independent draws taken once, at construction.
///
/// Reproducibility is whatever the generator provides: two factors built
/// from identically seeded generators hold identical values.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomFactor<T> {
    draws: Vec<T>,
}

impl<T> RandomFactor<T> {
    pub fn new<G>(mut generator: G, levels: usize) -> Self
    where
        G: FnMut() -> T,
    {
        let draws: Vec<T> = (0..levels).map(|_| generator()).collect();
        tracing::trace!(levels, "random factor drawn");
        Self { draws }
    }

    pub fn from_generator<G>(generator: &mut G, levels: usize) -> Self
    where
        G: RandomNumberGenerator<Output = T> + ?Sized,
    {
        Self::new(|| generator.generate(), levels)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.draws
    }
}

impl<T: Clone> Sequence for RandomFactor<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.draws.len()
    }

    fn at(&self, index: usize) -> Option<T> {
        self.draws.get(index).cloned()
    }

    fn values(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.draws.iter().cloned())
    }
}
