use super::density::Density;
use super::measure::Intrinsic;
use super::measure::Measure;
use super::network::Network;
use super::ring::Ring;
use super::support::Support;
use bigdecimal::BigDecimal;
use rayon::prelude::*;
use std::marker::PhantomData;

/// Earth Mover's Distance over arbitrary-precision decimal weights and costs.
pub type DecimalEmd<M = Intrinsic> = Emd<BigDecimal, M>;
/// Earth Mover's Distance over machine integers. Callers must rule out overflow.
pub type IntegerEmd<M = Intrinsic> = Emd<i64, M>;

/// Distance between two histograms over the same support.
///
/// When the underlying ground metric satisfies the metric axioms
/// and both histograms have equal mass, so does this distance:
///
/// 1. d(p, q) >= 0, and d(p, p) = 0
/// 2. d(p, q) = d(q, p)
/// 3. d(p, q) + d(q, r) >= d(p, r)
pub trait HistogramDistance<X: Support> {
    type N: Ring;
    fn histogram_distance<P, Q>(&self, p: &P, q: &Q) -> Self::N
    where
        P: Density<Support = X, Mass = Self::N>,
        Q: Density<Support = X, Mass = Self::N>;
}

/// Exact Earth Mover's Distance by min-cost max-flow.
///
/// `N` is the ring of weights and costs, `M` the ground metric. With the
/// default [`Intrinsic`] measure, items must implement [`Metric`](crate::Metric).
///
/// Every call builds, solves and discards its own network and distance cache,
/// so one engine can serve many threads as long as its measure is `Sync`.
///
/// Negative weights, a ground distance that is not a metric, and integer
/// overflow are caller errors. They are not detected by
/// [`histogram_distance`](Emd::histogram_distance) and produce meaningless,
/// possibly asymmetric, results. Use [`checked_distance`](Emd::checked_distance)
/// to reject negative weights.
#[derive(Debug, Clone, Copy)]
pub struct Emd<N, M = Intrinsic> {
    measure: M,
    ring: PhantomData<fn() -> N>,
}

impl<N, M> Emd<N, M>
where
    N: Ring,
{
    pub fn new(measure: M) -> Self {
        Self {
            measure,
            ring: PhantomData,
        }
    }
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// optimal transport plan from `p` to `q`
    pub fn coupling<X, P, Q>(&self, p: &P, q: &Q) -> Network<X, N>
    where
        X: Support,
        M: Measure<X, N>,
        P: Density<Support = X, Mass = N>,
        Q: Density<Support = X, Mass = N>,
    {
        Network::from((p, q, &self.measure)).minimize()
    }

    /// minimum total cost of moving the mass of `p` onto `q`.
    /// when masses differ, only the smaller of the two is moved.
    pub fn histogram_distance<X, P, Q>(&self, p: &P, q: &Q) -> N
    where
        X: Support,
        M: Measure<X, N>,
        P: Density<Support = X, Mass = N>,
        Q: Density<Support = X, Mass = N>,
    {
        self.coupling(p, q).cost()
    }

    /// same as [`histogram_distance`](Emd::histogram_distance),
    /// but fails on any negative weight in either histogram
    pub fn checked_distance<X, P, Q>(&self, p: &P, q: &Q) -> anyhow::Result<N>
    where
        X: Support,
        M: Measure<X, N>,
        P: Density<Support = X, Mass = N>,
        Q: Density<Support = X, Mass = N>,
    {
        Self::validate(p, "source")?;
        Self::validate(q, "target")?;
        Ok(self.histogram_distance(p, q))
    }
    fn validate<D>(histogram: &D, side: &str) -> anyhow::Result<()>
    where
        D: Density<Mass = N>,
    {
        for x in histogram.support() {
            let weight = histogram.density(&x);
            anyhow::ensure!(
                !weight.is_negative(),
                "{} histogram carries negative weight {:?}",
                side,
                weight
            );
        }
        Ok(())
    }

    /// symmetric matrix of distances between every pair of `histograms`.
    ///
    /// each unordered pair is solved once, in parallel, and mirrored.
    /// the diagonal is zero without being solved.
    pub fn pairwise<X, P>(&self, histograms: &[P]) -> Vec<Vec<N>>
    where
        X: Support,
        M: Measure<X, N> + Sync,
        P: Density<Support = X, Mass = N> + Sync,
        N: Send,
    {
        let n = histograms.len();
        let upper = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| (i, j, self.histogram_distance(&histograms[i], &histograms[j])))
            .collect::<Vec<_>>();
        let mut matrix = vec![vec![N::zero(); n]; n];
        for (i, j, d) in upper {
            matrix[j][i] = d.clone();
            matrix[i][j] = d;
        }
        log::debug!(
            "{:<32}{:<32}",
            "computed pairwise distances",
            format!("{} histograms", n)
        );
        matrix
    }
}

impl<N> Emd<N, Intrinsic>
where
    N: Ring,
{
    /// measure items by their own [`Metric`](crate::Metric)
    pub fn intrinsic() -> Self {
        Self::new(Intrinsic)
    }
}

impl<N> Default for Emd<N, Intrinsic>
where
    N: Ring,
{
    fn default() -> Self {
        Self::intrinsic()
    }
}

impl<X, N, M> HistogramDistance<X> for Emd<N, M>
where
    X: Support,
    N: Ring,
    M: Measure<X, N>,
{
    type N = N;
    fn histogram_distance<P, Q>(&self, p: &P, q: &Q) -> Self::N
    where
        P: Density<Support = X, Mass = Self::N>,
        Q: Density<Support = X, Mass = Self::N>,
    {
        Emd::histogram_distance(self, p, q)
    }
}
