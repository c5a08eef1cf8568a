//! Conversion of a [`SweepFile`] into core sweep structures, and row output.

use std::io::{self, Write};

use paramsweep_core::{
    Arithmetic, Builder, Factor, FromParams, Geometric, NormalFactor, RandomFactor,
    RandomNumberGenerator, RandomOrderA, RangeFactor, Result, Sequence, StepPolicy,
    TransformFactor, make_dist_from_params,
};
use rand::distr::Uniform;
use rand_distr::{Exp, LogNormal, Normal};

use crate::config::{DistributionSpec, FactorSpec, StepKind, SweepFile};

/// A factor whose levels are reported as reals.
pub type Level = Box<dyn Sequence<Item = f64>>;

pub fn build_factor(spec: &FactorSpec) -> Result<Level> {
    let level: Level = match spec {
        FactorSpec::Range {
            min,
            max,
            levels,
            step,
            integer,
        } => match (step, integer) {
            (StepKind::Arithmetic, false) => {
                Box::new(RangeFactor::<f64, Arithmetic>::try_new(*min, *max, *levels)?)
            }
            (StepKind::Geometric, false) => {
                Box::new(RangeFactor::<f64, Geometric>::try_new(*min, *max, *levels)?)
            }
            (StepKind::Arithmetic, true) => integer_range::<Arithmetic>(*min, *max, *levels)?,
            (StepKind::Geometric, true) => integer_range::<Geometric>(*min, *max, *levels)?,
        },
        FactorSpec::Normal {
            mean,
            stddev,
            levels,
        } => Box::new(NormalFactor::try_new(*mean, *stddev, *levels)?),
        FactorSpec::Random {
            distribution,
            levels,
            seed,
        } => Box::new(random_factor(distribution, *levels, *seed)?),
        FactorSpec::Values { values } => Box::new(values.clone()),
        FactorSpec::Concat { factors } => {
            let concat = factors
                .iter()
                .map(build_factor)
                .collect::<Result<Factor<f64>>>()?;
            Box::new(concat)
        }
    };
    Ok(level)
}

fn integer_range<S>(min: f64, max: f64, levels: usize) -> Result<Level>
where
    S: StepPolicy<i64> + 'static,
{
    let range = RangeFactor::<i64, S>::try_new(min.round() as i64, max.round() as i64, levels)?;
    Ok(Box::new(TransformFactor::new(range, |x: i64| x as f64)))
}

fn random_factor(spec: &DistributionSpec, levels: usize, seed: u64) -> Result<RandomFactor<f64>> {
    match *spec {
        DistributionSpec::Uniform { low, high } => draw::<Uniform<f64>>((low, high), levels, seed),
        DistributionSpec::Normal { mean, std_dev } => {
            draw::<Normal<f64>>((mean, std_dev), levels, seed)
        }
        DistributionSpec::LogNormal { mu, sigma } => {
            draw::<LogNormal<f64>>((mu, sigma), levels, seed)
        }
        DistributionSpec::Exponential { lambda } => draw::<Exp<f64>>((lambda,), levels, seed),
    }
}

fn draw<D>(params: D::Params, levels: usize, seed: u64) -> Result<RandomFactor<f64>>
where
    D: FromParams<Output = f64> + rand::distr::Distribution<f64>,
{
    let mut generator = make_dist_from_params::<D>(params)?;
    generator.reseed(seed);
    Ok(RandomFactor::from_generator(&mut generator, levels))
}

/// A built sweep ready for output.
pub struct Sweep {
    summary: String,
    rows: Box<dyn Sequence<Item = Vec<f64>>>,
}

impl Sweep {
    pub fn build(file: &SweepFile) -> Result<Self> {
        let factors = file
            .factors
            .iter()
            .map(build_factor)
            .collect::<Result<Vec<Level>>>()?;

        let builder = Builder::new(factors)
            .with_design(file.design)
            .with_order(file.order)
            .with_replicants(file.replicants)
            .validate()?;
        let summary = builder.to_string();
        tracing::info!(rows = builder.size(), shuffle = file.shuffle, "{summary}");

        let rows: Box<dyn Sequence<Item = Vec<f64>>> = if file.shuffle {
            Box::new(RandomOrderA::try_new(builder)?)
        } else {
            Box::new(builder)
        };
        Ok(Self { summary, rows })
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn size(&self) -> usize {
        self.rows.size()
    }

    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        self.rows.at(index)
    }

    pub fn parameters(&self, index: usize) -> Option<Vec<usize>> {
        self.rows.parameters(index)
    }

    /// Write a header line and one tab-separated line per row.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        show_parameters: bool,
        limit: Option<usize>,
    ) -> io::Result<usize> {
        writeln!(out, "# {}", self.summary)?;
        let count = limit.map_or(self.size(), |limit| limit.min(self.size()));
        for (index, row) in self.rows.values().take(count).enumerate() {
            write!(out, "{index}")?;
            for value in &row {
                write!(out, "\t{value}")?;
            }
            if show_parameters {
                let parameters = self.parameters(index).unwrap_or_default();
                write!(out, "\t{parameters:?}")?;
            }
            writeln!(out)?;
        }
        Ok(count)
    }
}
