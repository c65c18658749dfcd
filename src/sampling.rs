use super::histogram::Histogram;
use super::ring::Ring;
use crate::SAMPLING_KEYS;
use crate::SAMPLING_SUPPORT;
use crate::SAMPLING_WEIGHT;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeSet;

/// Seeded source of random integer-keyed histograms.
///
/// Each test or benchmark owns its own Sampler, so fixtures are
/// reproducible and independent of test ordering and threading.
pub struct Sampler {
    rng: SmallRng,
    support: usize,
    keys: i64,
    weight: i32,
}

impl Sampler {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            support: SAMPLING_SUPPORT,
            keys: SAMPLING_KEYS,
            weight: SAMPLING_WEIGHT,
        }
    }
    /// number of (key, weight) draws per histogram
    pub fn support(mut self, support: usize) -> Self {
        self.support = support;
        self
    }
    /// keys are drawn from `0..keys`
    pub fn keys(mut self, keys: i64) -> Self {
        assert!(keys > 0, "key range must be nonempty");
        self.keys = keys;
        self
    }
    /// weights are drawn from `0..weight`
    pub fn weight(mut self, weight: i32) -> Self {
        assert!(weight > 0, "weight range must be nonempty");
        self.weight = weight;
        self
    }
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// independent draws of key and weight. repeated keys accumulate.
    pub fn histogram<N>(&mut self) -> Histogram<i64, N>
    where
        N: Ring + From<i32>,
    {
        (0..self.support)
            .map(|_| {
                let x = self.rng.random_range(0..self.keys);
                let w = self.rng.random_range(0..self.weight);
                (x, N::from(w))
            })
            .collect()
    }

    /// distinct keys whose weights sum to exactly `mass`.
    ///
    /// weights are drawn as usual, then the surplus or deficit is
    /// settled against the smallest keys first, never going below zero.
    pub fn histogram_with_mass<N>(&mut self, mass: i32) -> Histogram<i64, N>
    where
        N: Ring + From<i32>,
    {
        assert!(mass >= 0, "mass must be nonnegative");
        let n = self.support.min(self.keys as usize).max(1);
        let mut keys = BTreeSet::new();
        while keys.len() < n {
            keys.insert(self.rng.random_range(0..self.keys));
        }
        let mut weights = keys
            .into_iter()
            .map(|x| (x, self.rng.random_range(0..self.weight)))
            .collect::<Vec<(i64, i32)>>();
        let mut deficit = mass - weights.iter().map(|(_, w)| w).sum::<i32>();
        for (_, w) in weights.iter_mut() {
            if deficit == 0 {
                break;
            }
            let next = (*w + deficit).max(0);
            deficit -= next - *w;
            *w = next;
        }
        weights
            .into_iter()
            .map(|(x, w)| (x, N::from(w)))
            .collect()
    }
}
