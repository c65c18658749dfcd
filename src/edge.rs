use super::ring::Ring;

/// Role of a node in the transportation network.
///
/// Left nodes carry the items of the first histogram,
/// right nodes the items of the second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vertex<X> {
    Source,
    Sink,
    Left(X),
    Right(X),
}

impl<X> Vertex<X> {
    pub fn item(&self) -> Option<&X> {
        match self {
            Self::Left(x) | Self::Right(x) => Some(x),
            Self::Source | Self::Sink => None,
        }
    }
}

/// A forward arc of the transportation network.
///
/// The reverse residual arc is never stored. It exists exactly when
/// `flow > 0`, with residual capacity `flow` and cost `-cost`.
/// `0 <= flow <= capacity` holds between augmentations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<N> {
    cost: N,
    capacity: N,
    flow: N,
}

impl<N> Edge<N>
where
    N: Ring,
{
    pub fn new(cost: N, capacity: N) -> Self {
        Self {
            cost,
            capacity,
            flow: N::zero(),
        }
    }
    pub fn cost(&self) -> &N {
        &self.cost
    }
    pub fn capacity(&self) -> &N {
        &self.capacity
    }
    pub fn flow(&self) -> &N {
        &self.flow
    }
    /// residual capacity of the forward arc
    pub fn headroom(&self) -> N {
        self.capacity.minus(&self.flow)
    }
    /// forward arc is in the residual network
    pub fn is_open(&self) -> bool {
        self.flow < self.capacity
    }
    /// reverse arc is in the residual network
    pub fn is_undoable(&self) -> bool {
        self.flow.is_positive()
    }
    /// cost of the mass currently carried
    pub fn charge(&self) -> N {
        self.cost.times(&self.flow)
    }
    pub fn push(&mut self, delta: &N) {
        self.flow = self.flow.plus(delta);
    }
    pub fn pull(&mut self, delta: &N) {
        self.flow = self.flow.minus(delta);
    }
}
