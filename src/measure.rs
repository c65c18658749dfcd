use super::ring::Ring;

/// Ground metric between elements of a support space.
///
/// Defines the cost of transporting one unit of mass from `x` to `y`.
/// The distance between histograms is only a true metric when this one is:
///
/// 1. `distance(x, y) >= 0`, and `distance(x, y) == 0` iff `x == y`
/// 2. `distance(x, y) == distance(y, x)`
/// 3. `distance(x, z) <= distance(x, y) + distance(y, z)`
///
/// None of these are checked. Violating them yields a well-defined number
/// that is simply not an Earth Mover's Distance.
///
/// # Implementations
///
/// - any `Fn(&X, &X) -> N`, for an explicit distance function
/// - [`Intrinsic`], which defers to the items' own [`Metric`]
pub trait Measure<X, N> {
    /// Returns the cost of transporting one unit of mass from `x` to `y`.
    fn distance(&self, x: &X, y: &X) -> N;
}

impl<X, N, F> Measure<X, N> for F
where
    F: Fn(&X, &X) -> N,
{
    fn distance(&self, x: &X, y: &X) -> N {
        self(x, y)
    }
}

/// An item that can measure its own distance to other items of its type.
///
/// Implementations must satisfy the same axioms as [`Measure`].
pub trait Metric<N: Ring> {
    fn distance(&self, other: &Self) -> N;
}

/// The measure used when no explicit distance function is given.
///
/// Only items implementing [`Metric`] can be measured this way,
/// so a missing capability is a compile error rather than a runtime one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Intrinsic;

impl<X, N> Measure<X, N> for Intrinsic
where
    X: Metric<N>,
    N: Ring,
{
    fn distance(&self, x: &X, y: &X) -> N {
        Metric::distance(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash)]
    struct Celsius(i64);
    impl Metric<i64> for Celsius {
        fn distance(&self, other: &Self) -> i64 {
            (self.0 - other.0).abs()
        }
    }

    #[test]
    fn is_closure_a_measure() {
        let taxicab = |x: &(i64, i64), y: &(i64, i64)| (x.0 - y.0).abs() + (x.1 - y.1).abs();
        assert!(Measure::distance(&taxicab, &(0, 0), &(2, -3)) == 5);
    }
    #[test]
    fn is_intrinsic_deferring_to_metric() {
        let d: i64 = Intrinsic.distance(&Celsius(-4), &Celsius(10));
        assert!(d == 14);
    }
}
