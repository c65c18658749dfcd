use super::network::Graph;
use super::ring::Ring;
use crate::SINK;
use crate::SOURCE;
use petgraph::Direction::Incoming;
use petgraph::Direction::Outgoing;
use petgraph::graph::EdgeIndex;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::VecDeque;

/// One hop of a residual path.
///
/// `Forward` traverses an original edge along its direction and spends headroom.
/// `Backward` traverses it against its direction and cancels flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward(EdgeIndex),
    Backward(EdgeIndex),
}

impl Step {
    /// the node this step departs from
    fn tail<X, N>(&self, graph: &Graph<X, N>) -> Option<NodeIndex> {
        match *self {
            Self::Forward(e) => graph.edge_endpoints(e).map(|(a, _)| a),
            Self::Backward(e) => graph.edge_endpoints(e).map(|(_, b)| b),
        }
    }
    /// residual capacity of this step
    fn room<X, N: Ring>(&self, graph: &Graph<X, N>) -> N {
        match *self {
            Self::Forward(e) => graph[e].headroom(),
            Self::Backward(e) => graph[e].flow().clone(),
        }
    }
    fn apply<X, N: Ring>(&self, graph: &mut Graph<X, N>, delta: &N) {
        match *self {
            Self::Forward(e) => graph[e].push(delta),
            Self::Backward(e) => graph[e].pull(delta),
        }
    }
}

/// A cheapest augmenting path, ordered from source to sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Step>);

impl Path {
    pub fn steps(&self) -> &[Step] {
        &self.0
    }
    /// largest amount of flow the whole path can carry
    pub fn bottleneck<X, N: Ring>(&self, graph: &Graph<X, N>) -> Option<N> {
        self.0.iter().map(|step| step.room(graph)).min()
    }
    /// push `delta` along forward steps, cancel it along backward steps
    pub fn augment<X, N: Ring>(&self, graph: &mut Graph<X, N>, delta: &N) {
        for step in self.0.iter() {
            step.apply(graph, delta);
        }
    }
}

/// Search state of a node during one label-correcting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Unseen,
    Queued,
    Settled,
}

/// Read-only view of the residual network of a transportation graph.
///
/// Forward residual arcs are original edges with headroom. Backward residual arcs
/// come from the incoming edges of a node that carry flow, at negated cost.
/// Costs may therefore be negative, so the search is label-correcting rather
/// than Dijkstra. Freshly discovered nodes join the back of the deque, while
/// nodes improved after already being scanned jump to the front.
pub struct Residual<'a, X, N> {
    graph: &'a Graph<X, N>,
}

impl<'a, X, N> Residual<'a, X, N>
where
    N: Ring,
{
    /// cheapest source-to-sink path, or None once the flow is maximum
    pub fn cheapest(&self) -> Option<Path> {
        let n = self.graph.node_count();
        let source = NodeIndex::new(SOURCE);
        let sink = NodeIndex::new(SINK);
        let mut costs = vec![None::<N>; n];
        let mut labels = vec![Label::Unseen; n];
        let mut parent = vec![None::<Step>; n];
        let mut queue = VecDeque::new();
        costs[source.index()] = Some(N::zero());
        labels[source.index()] = Label::Queued;
        queue.push_back(source);
        while let Some(u) = queue.pop_front() {
            labels[u.index()] = Label::Settled;
            let Some(base) = costs[u.index()].clone() else {
                continue;
            };
            let forward = self
                .graph
                .edges_directed(u, Outgoing)
                .filter(|e| e.weight().is_open())
                .map(|e| (e.target(), Step::Forward(e.id()), base.plus(e.weight().cost())));
            let backward = self
                .graph
                .edges_directed(u, Incoming)
                .filter(|e| e.weight().is_undoable())
                .map(|e| (e.source(), Step::Backward(e.id()), base.minus(e.weight().cost())));
            for (v, step, candidate) in forward.chain(backward) {
                let i = v.index();
                if costs[i].as_ref().is_some_and(|best| &candidate >= best) {
                    continue;
                }
                costs[i] = Some(candidate);
                parent[i] = Some(step);
                match labels[i] {
                    Label::Unseen => queue.push_back(v),
                    Label::Settled => queue.push_front(v),
                    Label::Queued => continue,
                }
                labels[i] = Label::Queued;
            }
        }
        costs[sink.index()].as_ref()?;
        let mut steps = Vec::new();
        let mut node = sink;
        while node != source {
            let step = parent[node.index()]?;
            node = step.tail(self.graph)?;
            steps.push(step);
        }
        steps.reverse();
        Some(Path(steps))
    }
}

impl<'a, X, N> From<&'a Graph<X, N>> for Residual<'a, X, N> {
    fn from(graph: &'a Graph<X, N>) -> Self {
        Self { graph }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Edge;
    use crate::Vertex;

    /// source -> a -> sink with a parallel, pricier route through b
    fn diamond() -> Graph<char, i64> {
        let mut graph = Graph::default();
        let s = graph.add_node(Vertex::Source);
        let t = graph.add_node(Vertex::Sink);
        let a = graph.add_node(Vertex::Left('a'));
        let b = graph.add_node(Vertex::Left('b'));
        graph.add_edge(s, a, Edge::new(1, 2));
        graph.add_edge(s, b, Edge::new(5, 3));
        graph.add_edge(a, t, Edge::new(1, 2));
        graph.add_edge(b, t, Edge::new(0, 3));
        graph
    }

    #[test]
    fn is_cheapest_path_found() {
        let graph = diamond();
        let path = Residual::from(&graph).cheapest().expect("path");
        assert!(path.steps().len() == 2);
        assert!(path.bottleneck(&graph) == Some(2));
        let nodes = path
            .steps()
            .iter()
            .map(|s| match *s {
                Step::Forward(e) => graph.edge_endpoints(e).expect("edge").1,
                Step::Backward(_) => unreachable!(),
            })
            .collect::<Vec<_>>();
        assert!(graph[nodes[0]] == Vertex::Left('a'));
        assert!(graph[nodes[1]] == Vertex::Sink);
    }
    #[test]
    fn is_saturated_route_avoided() {
        let mut graph = diamond();
        let path = Residual::from(&graph).cheapest().expect("path");
        path.augment(&mut graph, &2);
        let next = Residual::from(&graph).cheapest().expect("path");
        assert!(next.bottleneck(&graph) == Some(3));
        next.augment(&mut graph, &3);
        assert!(Residual::from(&graph).cheapest().is_none());
    }
    #[test]
    fn is_sink_unreachable_without_edges() {
        let mut graph = Graph::<char, i64>::default();
        graph.add_node(Vertex::Source);
        graph.add_node(Vertex::Sink);
        assert!(Residual::from(&graph).cheapest().is_none());
    }
    #[test]
    fn is_backward_arc_traversed() {
        // s -> l1 -> r1 -> t is the only cheap route at first; once taken,
        // l2 can reach t only by rerouting l1 through r2.
        let mut graph = Graph::<char, i64>::default();
        let s = graph.add_node(Vertex::Source);
        let t = graph.add_node(Vertex::Sink);
        let l1 = graph.add_node(Vertex::Left('a'));
        let l2 = graph.add_node(Vertex::Left('b'));
        let r1 = graph.add_node(Vertex::Right('c'));
        let r2 = graph.add_node(Vertex::Right('d'));
        graph.add_edge(s, l1, Edge::new(0, 1));
        graph.add_edge(s, l2, Edge::new(0, 1));
        graph.add_edge(l1, r1, Edge::new(0, 2));
        graph.add_edge(l1, r2, Edge::new(2, 2));
        graph.add_edge(l2, r1, Edge::new(1, 2));
        graph.add_edge(r1, t, Edge::new(0, 1));
        graph.add_edge(r2, t, Edge::new(0, 1));
        let first = Residual::from(&graph).cheapest().expect("path");
        first.augment(&mut graph, &1);
        let second = Residual::from(&graph).cheapest().expect("path");
        assert!(
            second
                .steps()
                .iter()
                .any(|s| matches!(s, Step::Backward(_)))
        );
        second.augment(&mut graph, &1);
        assert!(Residual::from(&graph).cheapest().is_none());
    }
}
