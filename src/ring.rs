use bigdecimal::BigDecimal;
use std::fmt::Debug;

/// Exact arithmetic over the masses and costs of a transport problem.
///
/// The shortest path search only relabels a node on a strict improvement,
/// so every operation must be exact. There are no implementations for
/// `f32` or `f64`; rounding may loop the search or make the distance asymmetric.
///
/// # Implementations
///
/// - [`BigDecimal`]: arbitrary precision, never overflows
/// - `i8` through `i128` and `isize`: only valid while no intermediate
///   sum or product overflows
pub trait Ring: Clone + Ord + Debug {
    /// Additive identity.
    fn zero() -> Self;
    fn plus(&self, other: &Self) -> Self;
    fn minus(&self, other: &Self) -> Self;
    fn times(&self, other: &Self) -> Self;

    /// Sum of all values, zero when empty.
    fn total<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        values
            .into_iter()
            .fold(Self::zero(), |acc, x| acc.plus(x))
    }
    fn is_positive(&self) -> bool {
        self > &Self::zero()
    }
    fn is_negative(&self) -> bool {
        self < &Self::zero()
    }
}

macro_rules! integer {
    ($($t:ty),*) => {$(
        impl Ring for $t {
            fn zero() -> Self {
                0
            }
            fn plus(&self, other: &Self) -> Self {
                self + other
            }
            fn minus(&self, other: &Self) -> Self {
                self - other
            }
            fn times(&self, other: &Self) -> Self {
                self * other
            }
        }
    )*};
}

integer!(i8, i16, i32, i64, i128, isize);

impl Ring for BigDecimal {
    fn zero() -> Self {
        BigDecimal::from(0i64)
    }
    fn plus(&self, other: &Self) -> Self {
        self + other
    }
    fn minus(&self, other: &Self) -> Self {
        self - other
    }
    fn times(&self, other: &Self) -> Self {
        self * other
    }
}
