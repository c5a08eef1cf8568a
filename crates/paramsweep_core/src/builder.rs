//! Combination of independent factors into sweep rows.
//!
//! A [`Builder`] owns its factors and enumerates rows lazily, either as the
//! full cartesian product or one factor at a time, with every configuration
//! repeated `replicants` times in a row.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{self, SweepError};
use crate::factors::Factors;
use crate::position::{
    advance_full_factorial, advance_one_at_a_time, full_factorial_configurations,
    full_factorial_from_linear, full_factorial_to_linear, one_at_a_time_configurations,
    one_at_a_time_from_configuration, one_at_a_time_to_configuration, radix_boundaries,
};
use crate::sequence::Sequence;

/// How factor levels are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Design {
    /// Every combination of every factor's levels.
    #[default]
    FullFactorial,
    /// A shared baseline (every factor at its first level), then each
    /// non-baseline level of each factor with all others held at baseline.
    OneAtATime,
}

impl Design {
    pub fn name(self) -> &'static str {
        match self {
            Design::FullFactorial => "full factorial",
            Design::OneAtATime => "one at a time",
        }
    }
}

/// Traversal order of the rows.
///
/// Only `Default` changes anything today; `Sorted` is accepted and recorded
/// but enumerates in the default order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Order {
    #[default]
    Default,
    Sorted,
}

impl Order {
    pub fn name(self) -> &'static str {
        match self {
            Order::Default => "default",
            Order::Sorted => "sorted",
        }
    }
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .replace(['_', '-'], " ")
}

impl FromStr for Design {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "full factorial" => Ok(Design::FullFactorial),
            "one at a time" => Ok(Design::OneAtATime),
            _ => Err(SweepError::UnknownDesign(s.to_string())),
        }
    }
}

impl FromStr for Order {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "default" => Ok(Order::Default),
            "sorted" => Ok(Order::Sorted),
            _ => Err(SweepError::UnknownOrder(s.to_string())),
        }
    }
}

impl TryFrom<String> for Design {
    type Error = SweepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Order {
    type Error = SweepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Design> for String {
    fn from(design: Design) -> Self {
        design.name().to_string()
    }
}

impl From<Order> for String {
    fn from(order: Order) -> Self {
        order.name().to_string()
    }
}

impl fmt::Display for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A position in a sweep: which replicate, and one index per factor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub replicant: usize,
    pub indices: Vec<usize>,
}

/// Lazy enumeration of factor combinations.
///
/// `F` is a tuple of sequences (rows are typed tuples) or a `Vec` of
/// sequences (rows are `Vec`s).
#[derive(Debug, Clone)]
pub struct Builder<F> {
    factors: F,
    sizes: Vec<usize>,
    replicants: usize,
    design: Design,
    order: Order,
}

impl<F: Factors> Builder<F> {
    /// Full factorial, one replicate, default order.
    ///
    /// The row count is not checked here; see [`Builder::validate`].
    pub fn new(factors: F) -> Self {
        let sizes = factors.sizes();
        tracing::debug!(?sizes, "sweep builder created");
        Self {
            factors,
            sizes,
            replicants: 1,
            design: Design::default(),
            order: Order::default(),
        }
    }

    /// Like [`Builder::new`], failing if the full factorial row count does
    /// not fit in `usize`.
    pub fn try_new(factors: F) -> error::Result<Self> {
        Self::new(factors).validate()
    }

    /// Check that the current design and replicant count give a row count
    /// that fits in `usize`.
    pub fn validate(self) -> error::Result<Self> {
        self.try_size()?;
        Ok(self)
    }

    pub fn set_design(&mut self, design: Design) -> &mut Self {
        self.design = design;
        self
    }

    pub fn set_replicants(&mut self, replicants: usize) -> &mut Self {
        self.replicants = replicants;
        self
    }

    pub fn set_order(&mut self, order: Order) -> &mut Self {
        if order == Order::Sorted {
            tracing::debug!("sorted order requested; rows keep the default order");
        }
        self.order = order;
        self
    }

    pub fn with_design(mut self, design: Design) -> Self {
        self.set_design(design);
        self
    }

    pub fn with_replicants(mut self, replicants: usize) -> Self {
        self.set_replicants(replicants);
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.set_order(order);
        self
    }

    pub fn factors(&self) -> &F {
        &self.factors
    }

    /// Size of each factor, in order.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn design(&self) -> Design {
        self.design
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn replicants(&self) -> usize {
        self.replicants
    }

    fn checked_configurations(&self) -> Option<usize> {
        match self.design {
            Design::FullFactorial => full_factorial_configurations(&self.sizes),
            Design::OneAtATime => one_at_a_time_configurations(&self.sizes),
        }
    }

    fn too_many_rows(&self) -> SweepError {
        SweepError::TooManyRows {
            replicants: self.replicants,
            factors: self.sizes.len(),
        }
    }

    /// Distinct factor configurations, before replication.
    ///
    /// # Panics
    ///
    /// If the count does not fit in `usize`.
    pub fn configurations(&self) -> usize {
        self.checked_configurations()
            .unwrap_or_else(|| panic!("{}", self.too_many_rows()))
    }

    /// Number of rows, `replicants * configurations()`, or an error if it
    /// does not fit in `usize`.
    pub fn try_size(&self) -> error::Result<usize> {
        self.checked_configurations()
            .and_then(|configurations| configurations.checked_mul(self.replicants))
            .ok_or_else(|| self.too_many_rows())
    }

    /// Number of rows: `replicants * configurations()`. A builder with no
    /// factors has no rows.
    ///
    /// # Panics
    ///
    /// If the count does not fit in `usize`. Builders that passed
    /// [`Builder::validate`] never panic here.
    pub fn size(&self) -> usize {
        self.try_size().unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn to_linear(&self, position: &Position) -> usize {
        match self.design {
            Design::FullFactorial => {
                let boundaries = radix_boundaries(self.replicants, &self.sizes);
                full_factorial_to_linear(position.replicant, &position.indices, &boundaries)
            }
            Design::OneAtATime => {
                let configuration = one_at_a_time_to_configuration(&position.indices, &self.sizes);
                position.replicant + self.replicants * configuration
            }
        }
    }

    pub fn from_linear(&self, d: usize) -> Option<Position> {
        if d >= self.size() {
            return None;
        }
        let position = match self.design {
            Design::FullFactorial => {
                let (replicant, indices) =
                    full_factorial_from_linear(d, self.replicants, &self.sizes);
                Position { replicant, indices }
            }
            Design::OneAtATime => Position {
                replicant: d % self.replicants,
                indices: one_at_a_time_from_configuration(d / self.replicants, &self.sizes),
            },
        };
        Some(position)
    }

    pub fn value_at(&self, d: usize) -> Option<F::Item> {
        let position = self.from_linear(d)?;
        self.factors.item_at(&position.indices)
    }

    /// Flattened parameter paths of every factor at row `d`.
    pub fn get_parameters(&self, d: usize) -> Option<Vec<usize>> {
        let position = self.from_linear(d)?;
        Some(self.parameters_of(&position.indices))
    }

    fn parameters_of(&self, indices: &[usize]) -> Vec<usize> {
        let mut parameters = Vec::with_capacity(indices.len());
        self.factors.parameters_at(indices, &mut parameters);
        parameters
    }

    fn advance_indices(&self, indices: &mut [usize]) -> bool {
        match self.design {
            Design::FullFactorial => advance_full_factorial(indices, &self.sizes),
            Design::OneAtATime => advance_one_at_a_time(indices, &self.sizes),
        }
    }

    pub fn begin(&self) -> BuilderIter<'_, F> {
        self.cursor_at(0)
    }

    pub fn end(&self) -> BuilderIter<'_, F> {
        self.cursor_at(self.size())
    }

    pub fn iter(&self) -> BuilderIter<'_, F> {
        self.begin()
    }

    /// Cursor positioned at row `d`; rows at or past the end give the end
    /// cursor.
    pub fn cursor_at(&self, d: usize) -> BuilderIter<'_, F> {
        match self.from_linear(d) {
            Some(position) => BuilderIter {
                builder: Some(self),
                position: Some(position),
                linear: d,
            },
            None => BuilderIter {
                builder: Some(self),
                position: None,
                linear: self.size(),
            },
        }
    }
}

impl<F: Factors> fmt::Display for Builder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParameterSweep replicants: {}, design: {}, order: {}, factors: ({})",
            self.replicants,
            self.design,
            self.order,
            self.factors.count()
        )
    }
}

impl<F: Factors> Sequence for Builder<F> {
    type Item = F::Item;

    fn size(&self) -> usize {
        Builder::size(self)
    }

    fn at(&self, index: usize) -> Option<F::Item> {
        self.value_at(index)
    }

    fn values(&self) -> Box<dyn Iterator<Item = F::Item> + '_> {
        Box::new(self.iter())
    }

    fn parameters(&self, index: usize) -> Option<Vec<usize>> {
        self.get_parameters(index)
    }
}

impl<'a, F: Factors> IntoIterator for &'a Builder<F> {
    type Item = F::Item;
    type IntoIter = BuilderIter<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cursor over the rows of a [`Builder`].
///
/// The replicate counter moves fastest; when it wraps, the factor indices
/// step to the next configuration. The default cursor belongs to no builder
/// and is already at the end. All end cursors compare equal.
///
/// Cursors are also iterators, so `a.partial_cmp(&b)` resolves to
/// [`Iterator::partial_cmp`]. Use the comparison operators or
/// `PartialOrd::partial_cmp(&a, &b)` to compare positions.
pub struct BuilderIter<'a, F> {
    builder: Option<&'a Builder<F>>,
    position: Option<Position>,
    linear: usize,
}

impl<F: Factors> BuilderIter<'_, F> {
    pub fn is_end(&self) -> bool {
        self.position.is_none()
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn linear(&self) -> usize {
        self.linear
    }

    pub fn value(&self) -> Option<F::Item> {
        let builder = self.builder?;
        builder.factors.item_at(&self.position.as_ref()?.indices)
    }

    pub fn get_parameters(&self) -> Option<Vec<usize>> {
        let builder = self.builder?;
        Some(builder.parameters_of(&self.position.as_ref()?.indices))
    }

    fn advance(&mut self) {
        let Some(builder) = self.builder else {
            debug_assert!(false, "cannot advance a cursor with no builder");
            return;
        };
        let Some(position) = self.position.as_mut() else {
            return;
        };
        self.linear += 1;
        position.replicant += 1;
        if position.replicant < builder.replicants {
            return;
        }
        position.replicant = 0;
        if builder.advance_indices(&mut position.indices) {
            self.position = None;
        }
    }

    fn same_builder(&self, other: &Self) -> bool {
        match (self.builder, other.builder) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<F> Default for BuilderIter<'_, F> {
    fn default() -> Self {
        Self {
            builder: None,
            position: None,
            linear: 0,
        }
    }
}

impl<F> Clone for BuilderIter<'_, F> {
    fn clone(&self) -> Self {
        Self {
            builder: self.builder,
            position: self.position.clone(),
            linear: self.linear,
        }
    }
}

impl<F: Factors> Iterator for BuilderIter<'_, F> {
    type Item = F::Item;

    fn next(&mut self) -> Option<F::Item> {
        if self.is_end() {
            return None;
        }
        let value = self.value();
        self.advance();
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.builder {
            Some(builder) if !self.is_end() => builder.size() - self.linear,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl<F: Factors> ExactSizeIterator for BuilderIter<'_, F> {}

impl<F: Factors> FusedIterator for BuilderIter<'_, F> {}

impl<F: Factors> PartialEq for BuilderIter<'_, F> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_end() || other.is_end() {
            return self.is_end() == other.is_end();
        }
        self.same_builder(other) && self.position == other.position
    }
}

impl<F: Factors> PartialOrd for BuilderIter<'_, F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_end(), other.is_end()) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Greater),
            (false, true) => Some(Ordering::Less),
            (false, false) => self
                .same_builder(other)
                .then(|| self.linear.cmp(&other.linear)),
        }
    }
}

impl<F: Factors> Add<usize> for BuilderIter<'_, F> {
    type Output = Self;

    fn add(self, n: usize) -> Self {
        match self.builder {
            Some(builder) => builder.cursor_at(self.linear + n),
            None => {
                debug_assert!(n == 0, "cannot move a cursor with no builder");
                self
            }
        }
    }
}

impl<F: Factors> Sub<usize> for BuilderIter<'_, F> {
    type Output = Self;

    fn sub(self, n: usize) -> Self {
        match self.builder {
            Some(builder) => {
                debug_assert!(n <= self.linear, "cursor moved before the first row");
                builder.cursor_at(self.linear.saturating_sub(n))
            }
            None => {
                debug_assert!(n == 0, "cannot move a cursor with no builder");
                self
            }
        }
    }
}

impl<F: Factors> Sub for BuilderIter<'_, F> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        self.linear as isize - other.linear as isize
    }
}

impl<F> fmt::Display for BuilderIter<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = if self.builder.is_some() { "set" } else { "null" };
        match &self.position {
            Some(position) => write!(
                f,
                "Iterator < builder=({owner}) replicant={} indices={:?}>",
                position.replicant, position.indices
            ),
            None => write!(f, "Iterator < builder=({owner}) END>"),
        }
    }
}

impl<F> fmt::Debug for BuilderIter<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
