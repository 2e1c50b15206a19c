use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use num_traits::{Bounded, Zero};

/// A trait representing edge weights, capacities and flow amounts.
///
/// Comparisons go through [`PartialOrd`] so that both integer and floating
/// point weights qualify. Callers must not feed incomparable values such as
/// NaN into a graph; ordering between them is unspecified.
pub trait Weight:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + Zero
    + Bounded
    + Debug
{
}

impl<T> Weight for T where
    T: Copy
        + PartialOrd
        + Add<Output = Self>
        + Sub<Output = Self>
        + AddAssign
        + SubAssign
        + Zero
        + Bounded
        + Debug
{
}

/// A weight that also supports negation and multiplication, as required by
/// cost accounting: residual graphs negate costs on backward arcs and the
/// total cost of a flow is the sum of per-edge `flow * cost` products.
pub trait SignedWeight: Weight + Neg<Output = Self> + Mul<Output = Self> {}

impl<T> SignedWeight for T where T: Weight + Neg<Output = Self> + Mul<Output = Self> {}

/// Total-order adapter over [`PartialOrd`] weights.
///
/// Incomparable pairs collapse to `Equal`, which keeps sorting and heap
/// operations well defined without panicking on pathological inputs.
pub(crate) fn cmp_weights<W: Weight>(a: &W, b: &W) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}
