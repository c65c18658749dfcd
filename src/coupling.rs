use super::ring::Ring;
use super::support::Support;

/// A transport plan (coupling) between two histograms.
///
/// A coupling is a joint distribution π(x, y) whose marginals match the
/// source histogram P and the target histogram Q, up to the smaller of their
/// two masses. The transport cost is the ground cost integrated over π.
///
/// # Algorithm Contract
///
/// Implementations must ensure that after [`minimize`](Coupling::minimize) is called,
/// [`cost`](Coupling::cost) returns the optimal transport cost.
pub trait Coupling {
    /// Support space shared by both histograms.
    type X: Support;
    /// Ring that masses and costs live in.
    type N: Ring;
    /// Optimizes the coupling to minimize total transport cost.
    fn minimize(self) -> Self;
    /// Returns the mass transported from `x` to `y`.
    fn flow(&self, x: &Self::X, y: &Self::X) -> Self::N;
    /// Returns the total transport cost, the integral of `flow(x, y) * distance(x, y)`.
    fn cost(&self) -> Self::N;
}
