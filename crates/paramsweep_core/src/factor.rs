use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Add, Sub};

use crate::position::{concat_from_linear, concat_to_linear};
use crate::sequence::{Sequence, parameter_width, push_parameters};

/// Build a [`Factor`] from a list of sequences.
///
/// ```
/// use paramsweep_core::factor;
///
/// let levels = factor![vec![1, 2, 3, 4], vec![1, 2, 5]];
/// assert_eq!(levels.size(), 7);
/// ```
#[macro_export]
macro_rules! factor {
    ($($child:expr),* $(,)?) => {
        $crate::Factor::new()$(.with($child))*
    };
}

/// Concatenation of sequences sharing one value type.
///
/// Positions are `(child, element)` pairs; linear offsets count through child
/// 0 first, then child 1, and so on.
pub struct Factor<T> {
    children: Vec<Box<dyn Sequence<Item = T>>>,
    boundaries: Vec<usize>,
}

impl<T> Factor<T> {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            boundaries: Vec::new(),
        }
    }

    pub fn with<S>(mut self, child: S) -> Self
    where
        S: Sequence<Item = T> + 'static,
    {
        self.push(child);
        self
    }

    pub fn push<S>(&mut self, child: S)
    where
        S: Sequence<Item = T> + 'static,
    {
        self.push_boxed(Box::new(child));
    }

    pub fn push_boxed(&mut self, child: Box<dyn Sequence<Item = T>>) {
        let start = self.size();
        self.boundaries.push(start + child.size());
        self.children.push(child);
        tracing::trace!(
            children = self.children.len(),
            size = self.size(),
            "factor child added"
        );
    }

    pub fn children(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, index: usize) -> Option<&dyn Sequence<Item = T>> {
        self.children.get(index).map(|child| child.as_ref())
    }

    pub fn size(&self) -> usize {
        self.boundaries.last().copied().unwrap_or(0)
    }

    /// Inclusive running totals of the child sizes.
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    pub fn to_linear(&self, child: usize, element: usize) -> usize {
        concat_to_linear(child, element, &self.boundaries)
    }

    /// `(child, element)` holding linear offset `d`.
    pub fn from_linear(&self, d: usize) -> Option<(usize, usize)> {
        concat_from_linear(d, &self.boundaries)
    }

    pub fn value_at(&self, d: usize) -> Option<T> {
        let (child, element) = self.from_linear(d)?;
        self.children[child].at(element)
    }

    /// Originating indices of linear offset `d`: the owning child, then one
    /// slot per child. The owning child's slot holds its element index (or
    /// its own parameter path); every other slot is zero-filled to the same
    /// width.
    pub fn get_parameters(&self, d: usize) -> Option<Vec<usize>> {
        let (owner, element) = self.from_linear(d)?;
        let mut parameters = vec![owner];
        for (i, child) in self.children.iter().enumerate() {
            if i == owner {
                push_parameters(child.as_ref(), element, &mut parameters);
            } else {
                let width = parameter_width(child.as_ref());
                parameters.resize(parameters.len() + width, 0);
            }
        }
        Some(parameters)
    }

    pub fn begin(&self) -> FactorIter<'_, T> {
        self.cursor_at(0)
    }

    pub fn end(&self) -> FactorIter<'_, T> {
        self.cursor_at(self.size())
    }

    pub fn iter(&self) -> FactorIter<'_, T> {
        self.begin()
    }

    /// Cursor positioned at linear offset `d`; offsets at or past the end
    /// give the end cursor.
    pub fn cursor_at(&self, d: usize) -> FactorIter<'_, T> {
        match self.from_linear(d) {
            Some((child, element)) => FactorIter {
                factor: Some(self),
                child,
                element,
                linear: d,
            },
            None => FactorIter {
                factor: Some(self),
                child: self.children.len(),
                element: 0,
                linear: self.size(),
            },
        }
    }
}

impl<T> Default for Factor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<Box<dyn Sequence<Item = T>>> for Factor<T> {
    fn from_iter<I: IntoIterator<Item = Box<dyn Sequence<Item = T>>>>(iter: I) -> Self {
        let mut factor = Self::new();
        for child in iter {
            factor.push_boxed(child);
        }
        factor
    }
}

impl<T> fmt::Debug for Factor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factor")
            .field("boundaries", &self.boundaries)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Factor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Factor children: ({}), size: {}",
            self.children.len(),
            self.size()
        )
    }
}

impl<T> Sequence for Factor<T> {
    type Item = T;

    fn size(&self) -> usize {
        Factor::size(self)
    }

    fn at(&self, index: usize) -> Option<T> {
        self.value_at(index)
    }

    fn values(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.iter())
    }

    fn parameters(&self, index: usize) -> Option<Vec<usize>> {
        self.get_parameters(index)
    }
}

impl<'a, T> IntoIterator for &'a Factor<T> {
    type Item = T;
    type IntoIter = FactorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cursor over a [`Factor`].
///
/// The default cursor belongs to no factor and is already at the end. Every
/// end cursor compares equal to every other end cursor, whichever factor it
/// came from.
///
/// Cursors are also iterators, so `a.partial_cmp(&b)` resolves to
/// [`Iterator::partial_cmp`]. Use the comparison operators or
/// `PartialOrd::partial_cmp(&a, &b)` to compare positions.
pub struct FactorIter<'a, T> {
    factor: Option<&'a Factor<T>>,
    child: usize,
    element: usize,
    linear: usize,
}

impl<T> FactorIter<'_, T> {
    pub fn is_end(&self) -> bool {
        match self.factor {
            Some(factor) => self.child >= factor.children.len(),
            None => true,
        }
    }

    /// `(child, element)` of the current position.
    pub fn position(&self) -> Option<(usize, usize)> {
        (!self.is_end()).then_some((self.child, self.element))
    }

    pub fn linear(&self) -> usize {
        self.linear
    }

    pub fn value(&self) -> Option<T> {
        let factor = self.factor?;
        factor.children.get(self.child)?.at(self.element)
    }

    pub fn get_parameters(&self) -> Option<Vec<usize>> {
        if self.is_end() {
            return None;
        }
        self.factor?.get_parameters(self.linear)
    }

    fn advance(&mut self) {
        let Some(factor) = self.factor else {
            debug_assert!(false, "cannot advance a cursor with no factor");
            return;
        };
        if self.is_end() {
            return;
        }
        self.element += 1;
        self.linear += 1;
        while self.child < factor.children.len()
            && self.element >= factor.children[self.child].size()
        {
            self.child += 1;
            self.element = 0;
        }
    }

    fn same_factor(&self, other: &Self) -> bool {
        match (self.factor, other.factor) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Default for FactorIter<'_, T> {
    fn default() -> Self {
        Self {
            factor: None,
            child: 0,
            element: 0,
            linear: 0,
        }
    }
}

impl<T> Clone for FactorIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            factor: self.factor,
            child: self.child,
            element: self.element,
            linear: self.linear,
        }
    }
}

impl<T> Iterator for FactorIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.is_end() {
            return None;
        }
        let value = self.value();
        self.advance();
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.factor {
            Some(factor) if !self.is_end() => factor.size() - self.linear,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for FactorIter<'_, T> {}

impl<T> FusedIterator for FactorIter<'_, T> {}

impl<T> PartialEq for FactorIter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_end() || other.is_end() {
            return self.is_end() == other.is_end();
        }
        self.same_factor(other) && self.linear == other.linear
    }
}

impl<T> PartialOrd for FactorIter<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_end(), other.is_end()) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Greater),
            (false, true) => Some(Ordering::Less),
            (false, false) => self
                .same_factor(other)
                .then(|| self.linear.cmp(&other.linear)),
        }
    }
}

impl<T> Add<usize> for FactorIter<'_, T> {
    type Output = Self;

    fn add(self, n: usize) -> Self {
        match self.factor {
            Some(factor) => factor.cursor_at(self.linear + n),
            None => {
                debug_assert!(n == 0, "cannot move a cursor with no factor");
                self
            }
        }
    }
}

impl<T> Sub<usize> for FactorIter<'_, T> {
    type Output = Self;

    fn sub(self, n: usize) -> Self {
        match self.factor {
            Some(factor) => {
                debug_assert!(n <= self.linear, "cursor moved before the first element");
                factor.cursor_at(self.linear.saturating_sub(n))
            }
            None => {
                debug_assert!(n == 0, "cannot move a cursor with no factor");
                self
            }
        }
    }
}

impl<T> Sub for FactorIter<'_, T> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        self.linear as isize - other.linear as isize
    }
}

impl<T> fmt::Display for FactorIter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = if self.factor.is_some() { "set" } else { "null" };
        if self.is_end() {
            write!(f, "Iterator < factor=({owner}) END>")
        } else {
            write!(
                f,
                "Iterator < factor=({owner}) child={} element={}>",
                self.child, self.element
            )
        }
    }
}

impl<T> fmt::Debug for FactorIter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
