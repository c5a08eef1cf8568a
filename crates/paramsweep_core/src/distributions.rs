//! Seedable random value generators.
//!
//! [`Distribution`] pairs a `rand` engine with a `rand`/`rand_distr`
//! distribution behind the object-safe [`RandomNumberGenerator`] trait, which
//! is what [`RandomFactor`](crate::RandomFactor) draws from. Reseeding with the
//! same seed always replays the same values, bit for bit.

use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use rand::distr::Distribution as _;
use rand::distr::Uniform;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rand_distr::{Exp, LogNormal, Normal};
use rustc_hash::FxHasher;

use crate::error::{Result, SweepError};

/// Seed used when a generator is built without an explicit one.
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Zero-argument value source with the usual engine reseeding entry points.
pub trait RandomNumberGenerator {
    type Output;

    fn generate(&mut self) -> Self::Output;

    fn reseed(&mut self, seed: u64);

    fn reseed_from_sequence(&mut self, seeds: &[u64]) {
        self.reseed(fold_seed(seeds));
    }

    /// Reseed from any hashable value.
    fn reseed_with<V: Hash + ?Sized>(&mut self, value: &V)
    where
        Self: Sized,
    {
        self.reseed(fold_seed(value));
    }
}

impl<G: RandomNumberGenerator + ?Sized> RandomNumberGenerator for Box<G> {
    type Output = G::Output;

    fn generate(&mut self) -> Self::Output {
        (**self).generate()
    }

    fn reseed(&mut self, seed: u64) {
        (**self).reseed(seed);
    }

    fn reseed_from_sequence(&mut self, seeds: &[u64]) {
        (**self).reseed_from_sequence(seeds);
    }
}

/// Deterministically fold a hashable value into a 64-bit seed.
pub fn fold_seed<V: Hash + ?Sized>(value: &V) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A distribution sampled through its own engine.
#[derive(Debug, Clone)]
pub struct Distribution<T, D, R = SmallRng> {
    dist: D,
    rng: R,
    output: PhantomData<fn() -> T>,
}

impl<T, D, R> Distribution<T, D, R>
where
    D: rand::distr::Distribution<T>,
    R: RngCore + SeedableRng,
{
    pub fn new(rng: R, dist: D) -> Self {
        Self {
            dist,
            rng,
            output: PhantomData,
        }
    }

    pub fn seeded(dist: D, seed: u64) -> Self {
        Self::new(R::seed_from_u64(seed), dist)
    }

    pub fn distribution(&self) -> &D {
        &self.dist
    }
}

impl<T, D, R> RandomNumberGenerator for Distribution<T, D, R>
where
    D: rand::distr::Distribution<T>,
    R: RngCore + SeedableRng,
{
    type Output = T;

    fn generate(&mut self) -> T {
        self.dist.sample(&mut self.rng)
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }
}

pub fn make_dist<T, D, R>(rng: R, dist: D) -> Distribution<T, D, R>
where
    D: rand::distr::Distribution<T>,
    R: RngCore + SeedableRng,
{
    Distribution::new(rng, dist)
}

/// Distributions constructible from a tuple of parameters.
pub trait FromParams: Sized {
    type Output;
    type Params;

    fn from_params(params: Self::Params) -> Result<Self>;
}

/// Build a distribution from its parameters, driven by a [`SmallRng`] seeded
/// with [`DEFAULT_SEED`].
pub fn make_dist_from_params<D>(params: D::Params) -> Result<Distribution<D::Output, D, SmallRng>>
where
    D: FromParams + rand::distr::Distribution<<D as FromParams>::Output>,
{
    let dist = D::from_params(params)?;
    Ok(Distribution::seeded(dist, DEFAULT_SEED))
}

fn invalid(name: &'static str, err: impl std::fmt::Display) -> SweepError {
    SweepError::InvalidDistribution {
        name,
        reason: err.to_string(),
    }
}

macro_rules! impl_from_params_float {
    ($($t:ty),*) => {
        $(
            impl FromParams for Normal<$t> {
                type Output = $t;
                type Params = ($t, $t);

                fn from_params((mean, std_dev): ($t, $t)) -> Result<Self> {
                    // rand_distr only rejects a non-finite spread
                    if std_dev < 0.0 {
                        return Err(invalid("normal", "std_dev must not be negative"));
                    }
                    Normal::new(mean, std_dev).map_err(|e| invalid("normal", e))
                }
            }

            impl FromParams for LogNormal<$t> {
                type Output = $t;
                type Params = ($t, $t);

                fn from_params((mu, sigma): ($t, $t)) -> Result<Self> {
                    if sigma < 0.0 {
                        return Err(invalid("log-normal", "sigma must not be negative"));
                    }
                    LogNormal::new(mu, sigma).map_err(|e| invalid("log-normal", e))
                }
            }

            impl FromParams for Exp<$t> {
                type Output = $t;
                type Params = ($t,);

                fn from_params((lambda,): ($t,)) -> Result<Self> {
                    Exp::new(lambda).map_err(|e| invalid("exponential", e))
                }
            }
        )*
    };
}

macro_rules! impl_from_params_uniform {
    ($($t:ty),*) => {
        $(
            impl FromParams for Uniform<$t> {
                type Output = $t;
                type Params = ($t, $t);

                fn from_params((low, high): ($t, $t)) -> Result<Self> {
                    Uniform::new(low, high).map_err(|e| invalid("uniform", e))
                }
            }
        )*
    };
}

impl_from_params_float!(f32, f64);
impl_from_params_uniform!(i32, i64, u32, u64, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reseeding_replays_sequence() {
        const SEED: u64 = 12;
        const REPETITIONS: usize = 30;
        const LEN: usize = 1000;

        let mut expected_rng = SmallRng::seed_from_u64(SEED);
        let expected_dist = Normal::new(10.0f32, 3.0).unwrap();
        let expected: Vec<f32> = (0..LEN)
            .map(|_| expected_dist.sample(&mut expected_rng))
            .collect();

        let mut dist = make_dist_from_params::<Normal<f32>>((10.0, 3.0)).unwrap();
        let generator: &mut dyn RandomNumberGenerator<Output = f32> = &mut dist;
        for _ in 0..REPETITIONS {
            generator.reseed(SEED);
            let actual: Vec<f32> = (0..LEN).map(|_| generator.generate()).collect();
            assert_eq!(expected, actual);
        }
    }

    #[test]
    fn test_construction_paths_agree() {
        let dist = Normal::new(10.0f64, 3.0).unwrap();
        let mut from_engine: Distribution<f64, _> =
            make_dist(SmallRng::seed_from_u64(DEFAULT_SEED), dist);
        let mut from_params = make_dist_from_params::<Normal<f64>>((10.0, 3.0)).unwrap();

        for _ in 0..100 {
            assert_eq!(
                from_engine.generate().to_bits(),
                from_params.generate().to_bits()
            );
        }
    }

    #[test]
    fn test_sequence_and_value_seeding() {
        let mut a = make_dist_from_params::<Uniform<i64>>((-50, 50)).unwrap();
        let mut b = make_dist_from_params::<Uniform<i64>>((-50, 50)).unwrap();

        a.reseed_from_sequence(&[1, 2, 3]);
        b.reseed_from_sequence(&[1, 2, 3]);
        let first: Vec<i64> = (0..20).map(|_| a.generate()).collect();
        let second: Vec<i64> = (0..20).map(|_| b.generate()).collect();
        assert_eq!(first, second);

        a.reseed_with("experiment-7");
        b.reseed_with("experiment-7");
        assert_eq!(a.generate(), b.generate());
        assert_eq!(fold_seed(&[1u64, 2, 3][..]), fold_seed(&[1u64, 2, 3][..]));
    }

    #[test]
    fn test_invalid_parameters() {
        let err = make_dist_from_params::<Normal<f64>>((0.0, -1.0)).unwrap_err();
        assert!(matches!(
            err,
            SweepError::InvalidDistribution { name: "normal", .. }
        ));
        assert!(make_dist_from_params::<LogNormal<f32>>((0.0, -0.5)).is_err());
        assert!(make_dist_from_params::<Normal<f64>>((0.0, f64::NAN)).is_err());
        assert!(make_dist_from_params::<Normal<f64>>((0.0, 0.0)).is_ok());
        assert!(make_dist_from_params::<Uniform<f64>>((2.0, 1.0)).is_err());
        assert!(make_dist_from_params::<Exp<f64>>((-1.0,)).is_err());
    }
}
