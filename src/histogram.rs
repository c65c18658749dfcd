use super::density::Density;
use super::ring::Ring;
use super::support::Support;
use crate::Arbitrary;
use crate::SAMPLING_KEYS;
use crate::SAMPLING_SUPPORT;
use crate::SAMPLING_WEIGHT;
use std::collections::HashMap;

/// A weighted multiset of items.
///
/// The weight of an item is the total mass deposited on it.
/// Inserting an item twice accumulates its weight.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "X: serde::Serialize, N: serde::Serialize",
        deserialize = "X: serde::Deserialize<'de> + Eq + std::hash::Hash, N: serde::Deserialize<'de>"
    ))
)]
pub struct Histogram<X, N> {
    counts: HashMap<X, N>,
}

impl<X, N> Histogram<X, N>
where
    X: Support,
    N: Ring,
{
    pub fn new() -> Self {
        Self::default()
    }
    /// the weight of a given item. zero if it was never deposited.
    pub fn weight(&self, x: &X) -> N {
        self.counts.get(x).cloned().unwrap_or_else(N::zero)
    }
    /// all items in the support
    pub fn support(&self) -> impl Iterator<Item = &X> {
        self.counts.keys()
    }
    /// (item, weight) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&X, &N)> {
        self.counts.iter()
    }
    /// total mass deposited
    pub fn mass(&self) -> N {
        N::total(self.counts.values())
    }
    /// size of the support
    pub fn n(&self) -> usize {
        self.counts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    /// deposit `weight` onto `x`
    pub fn increment(mut self, x: X, weight: N) -> Self {
        self.deposit(x, weight);
        self
    }
    fn deposit(&mut self, x: X, weight: N) {
        let entry = self.counts.entry(x).or_insert_with(N::zero);
        *entry = entry.plus(&weight);
    }
    /// absorb the other histogram into this one.
    pub fn absorb(&mut self, other: &Self) {
        for (x, w) in other.iter() {
            self.deposit(x.clone(), w.clone());
        }
    }
}

impl<X, N> Default for Histogram<X, N> {
    fn default() -> Self {
        Self {
            counts: HashMap::default(),
        }
    }
}

impl<X, N> PartialEq for Histogram<X, N>
where
    X: Support,
    N: Ring,
{
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl<X, N> Eq for Histogram<X, N>
where
    X: Support,
    N: Ring,
{
}

impl<X, N> FromIterator<(X, N)> for Histogram<X, N>
where
    X: Support,
    N: Ring,
{
    fn from_iter<I: IntoIterator<Item = (X, N)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |h, (x, w)| h.increment(x, w))
    }
}

impl<X, N> From<Vec<(X, N)>> for Histogram<X, N>
where
    X: Support,
    N: Ring,
{
    fn from(pairs: Vec<(X, N)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<X, N> From<HashMap<X, N>> for Histogram<X, N>
where
    X: Support,
    N: Ring,
{
    fn from(counts: HashMap<X, N>) -> Self {
        Self { counts }
    }
}

impl<X, N> Density for Histogram<X, N>
where
    X: Support,
    N: Ring,
{
    type Support = X;
    type Mass = N;
    fn density(&self, x: &Self::Support) -> Self::Mass {
        self.weight(x)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.counts.keys().cloned()
    }
    fn mass(&self) -> Self::Mass {
        self.mass()
    }
}

impl<N> Arbitrary for Histogram<i64, N>
where
    N: Ring + From<i32>,
{
    fn random<R: rand::Rng>(rng: &mut R) -> Self {
        (0..SAMPLING_SUPPORT)
            .map(|_| {
                let x = rng.random_range(0..SAMPLING_KEYS);
                let w = rng.random_range(0..SAMPLING_WEIGHT);
                (x, N::from(w))
            })
            .collect()
    }
}
