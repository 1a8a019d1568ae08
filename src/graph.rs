use petgraph::algo::dijkstra;
use petgraph::graphmap::UnGraphMap;

use crate::state::{State, Toggle};

/// Widest machine for which materialising the whole state graph is considered reasonable.
pub const CROSS_CHECK_MAX_WIDTH: usize = 16;

/// The part of the state graph reachable from [`State::ZERO`].
///
/// Nodes are states; an edge joins two states one toggle apart and carries the index of the first toggle in
/// `toggles` which does so. Applying a toggle twice undoes it, so the graph is undirected.
/// No-op toggles add no edges.
///
/// This holds up to `2^width` nodes and is meant for checking small machines, see [`CROSS_CHECK_MAX_WIDTH`].
pub fn state_graph(toggles: &[Toggle]) -> UnGraphMap<State, usize> {
    let mut graph = UnGraphMap::new();
    graph.add_node(State::ZERO);

    let mut pending = vec![State::ZERO];
    while let Some(state) = pending.pop() {
        for (index, toggle) in toggles.iter().enumerate() {
            if toggle.is_noop() {
                continue;
            }

            let next = state ^ *toggle;
            if !graph.contains_node(next) {
                graph.add_node(next);
                pending.push(next);
            }
            // keep the lowest index among duplicate toggles
            if !graph.contains_edge(state, next) {
                graph.add_edge(state, next, index);
            }
        }
    }

    graph
}

/// Shortest distance from [`State::ZERO`] to `target` over [`state_graph`], found with Dijkstra's algorithm
/// at unit cost per edge. `None` if `target` is unreachable.
///
/// Independent of [`search`](crate::search); used to confirm its answers.
pub fn reference_distance(target: State, toggles: &[Toggle]) -> Option<usize> {
    let graph = state_graph(toggles);
    if !graph.contains_node(target) {
        return None;
    }

    dijkstra(&graph, State::ZERO, Some(target), |_| 1usize).get(&target).copied()
}
