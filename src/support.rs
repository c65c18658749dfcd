use std::hash::Hash;

/// Marker trait for types that can carry histogram mass.
///
/// Support elements label the nodes of the transportation network and key
/// the pairwise distance cache, so they must be cloneable, hashable and
/// comparable for equality. Every such type is a Support.
pub trait Support: Clone + Eq + Hash {}

impl<T> Support for T where T: Clone + Eq + Hash {}
