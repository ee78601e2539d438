//! Kruskal's minimum spanning tree over the graph store.

use tracing::debug;

use crate::graph::{Connection, Cost, Graph};
use crate::union_find::UnionFind;

/// Minimum spanning forest of `graph`.
///
/// Connections are considered by ascending cost, ties broken by `(a, b)`, so
/// the result is deterministic. A connected graph with `n` sites yields
/// `n - 1` connections; each additional component yields one fewer.
pub fn compute_mst(graph: &Graph) -> Vec<Connection> {
    let mut candidates: Vec<Connection> = graph.connections().to_vec();
    candidates.sort_by_key(|c| (c.cost, c.a, c.b));

    let mut sets = UnionFind::new(graph.len());
    let mut tree = Vec::with_capacity(graph.len().saturating_sub(1));
    for connection in candidates {
        if sets.union(connection.a, connection.b) {
            tree.push(connection);
            if tree.len() + 1 == graph.len() {
                break;
            }
        }
    }

    debug!(
        sites = graph.len(),
        edges = tree.len(),
        components = sets.set_count(),
        "computed minimum spanning forest"
    );
    tree
}

/// Sum of connection costs, `None` if it does not fit in a [`Cost`].
pub fn total_cost(connections: &[Connection]) -> Option<Cost> {
    connections
        .iter()
        .try_fold(0, |total: Cost, c| total.checked_add(c.cost))
}
