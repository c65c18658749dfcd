//! Exact Earth Mover's Distance between weighted histograms.
//!
//! The distance between two histograms is the cheapest way to move the mass of
//! one onto the other, where moving one unit of mass from `x` to `y` costs
//! `distance(x, y)`. We solve this exactly by building a bipartite transportation
//! network and running successive shortest augmenting paths over its residual graph.
//!
//! ## Core Types
//!
//! - [`Emd`]: the distance engine, parametrized by ring and ground metric
//! - [`Network`]: the transportation network, which doubles as the solved [`Coupling`]
//! - [`Histogram`]: a weighted multiset of items
//!
//! ## Traits
//!
//! - [`Ring`]: exact arithmetic over masses and costs
//! - [`Density`]: anything that maps items to nonnegative weight
//! - [`Measure`]: ground metric between items, or any `Fn(&X, &X) -> N`
//! - [`Metric`]: an item that knows its own distance to its peers
//!
//! ## Usage
//!
//! ```
//! use earthmover::*;
//! let emd = IntegerEmd::new(|x: &i64, y: &i64| (x - y).abs());
//! let p = Histogram::from(vec![(0i64, 1i64), (4, 1)]);
//! let q = Histogram::from(vec![(1i64, 1i64), (3, 1)]);
//! assert_eq!(emd.histogram_distance(&p, &q), 2);
//! ```
mod coupling;
mod density;
mod edge;
mod emd;
mod histogram;
mod measure;
mod network;
mod residual;
mod resolver;
mod ring;
mod sampling;
mod support;

pub use coupling::*;
pub use density::*;
pub use edge::*;
pub use emd::*;
pub use histogram::*;
pub use measure::*;
pub use network::*;
pub use residual::*;
pub use resolver::*;
pub use ring::*;
pub use sampling::*;
pub use support::*;

// ============================================================================
// NETWORK LAYOUT
// ============================================================================
/// Node index of the source, which feeds every item of the first histogram.
pub const SOURCE: usize = 0;
/// Node index of the sink, which drains every item of the second histogram.
pub const SINK: usize = 1;

// ============================================================================
// RANDOM HISTOGRAMS
// Defaults for seeded test and benchmark fixtures.
// ============================================================================
/// Number of (key, weight) draws per random histogram.
pub const SAMPLING_SUPPORT: usize = 10;
/// Keys are drawn uniformly from `0..SAMPLING_KEYS`.
pub const SAMPLING_KEYS: i64 = 100;
/// Weights are drawn uniformly from `0..SAMPLING_WEIGHT`.
pub const SAMPLING_WEIGHT: i32 = 100;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation from a caller-owned generator.
pub trait Arbitrary {
    /// Generate a random instance, drawing only from `rng`.
    fn random<R: rand::Rng>(rng: &mut R) -> Self;
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level.
#[cfg(feature = "logging")]
pub fn log(level: log::LevelFilter) -> anyhow::Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}
