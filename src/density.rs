use super::ring::Ring;
use super::support::Support;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::Hash;

/// A discrete, unnormalized distribution over a support set.
///
/// Provides the weight at each point and iteration over the support.
/// Weights are expected to be nonnegative; a negative weight is a caller
/// error that [`Emd::checked_distance`](crate::Emd::checked_distance)
/// reports and [`Emd::histogram_distance`](crate::Emd::histogram_distance)
/// does not detect.
///
/// # Implementations
///
/// Provided for common collection types:
/// - `BTreeMap<T, N>`: ordered map with O(log n) lookup
/// - `HashMap<T, N>`: hash map with O(1) expected lookup
/// - `Vec<(T, N)>`: association list with O(n) lookup, keys assumed distinct
/// - [`Histogram`](crate::Histogram)
pub trait Density {
    /// The type of elements in the distribution's support.
    type Support: Support;
    /// The ring that weights live in.
    type Mass: Ring;
    /// Returns the weight at point `x`, or zero if not in support.
    fn density(&self, x: &Self::Support) -> Self::Mass;
    /// Iterates over all points of the support.
    fn support(&self) -> impl Iterator<Item = Self::Support>;
    /// Total weight over the support.
    fn mass(&self) -> Self::Mass {
        self.support()
            .map(|x| self.density(&x))
            .fold(<Self::Mass as Ring>::zero(), |acc, w| acc.plus(&w))
    }
}

impl<T, N> Density for BTreeMap<T, N>
where
    T: Ord + Support,
    N: Ring,
{
    type Support = T;
    type Mass = N;
    fn density(&self, x: &Self::Support) -> Self::Mass {
        self.get(x).cloned().unwrap_or_else(N::zero)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.keys().cloned()
    }
}

impl<T, N> Density for HashMap<T, N>
where
    T: Eq + Hash + Support,
    N: Ring,
{
    type Support = T;
    type Mass = N;
    fn density(&self, x: &Self::Support) -> Self::Mass {
        self.get(x).cloned().unwrap_or_else(N::zero)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.keys().cloned()
    }
}

impl<T, N> Density for Vec<(T, N)>
where
    T: Eq + Support,
    N: Ring,
{
    type Support = T;
    type Mass = N;
    fn density(&self, x: &Self::Support) -> Self::Mass {
        self.iter()
            .find(|(a, _)| a == x)
            .map(|(_, w)| w)
            .cloned()
            .unwrap_or_else(N::zero)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.iter().map(|(a, _)| a).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_missing_density_zero() {
        let map = BTreeMap::from([(1i64, 3i64), (2, 4)]);
        assert!(map.density(&1) == 3);
        assert!(map.density(&9) == 0);
    }
    #[test]
    fn is_mass_summed_over_support() {
        let map = HashMap::from([("a", 3i64), ("b", 4), ("c", 0)]);
        assert!(map.mass() == 7);
    }
    #[test]
    fn is_association_list_a_density() {
        let list = vec![('x', 2i32), ('y', 5)];
        assert!(list.density(&'y') == 5);
        assert!(list.density(&'z') == 0);
        assert!(list.mass() == 7);
        assert!(list.support().collect::<Vec<_>>() == vec!['x', 'y']);
    }
}
