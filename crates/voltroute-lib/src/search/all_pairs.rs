use std::collections::BinaryHeap;

use tracing::debug;

use super::{QueueEntry, RouteRequest, RouteResult};
use crate::graph::{Cost, Graph, SiteId};

/// All-pairs shortest distances with next-hop pointers (Floyd–Warshall).
///
/// Costs `O(n³)` to build and `O(n²)` memory; meant for small and medium
/// networks that are queried repeatedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    dist: Vec<Option<Cost>>,
    next: Vec<Option<SiteId>>,
}

impl DistanceMatrix {
    pub fn compute(graph: &Graph) -> Self {
        let size = graph.len();
        let mut dist = vec![None; size * size];
        let mut next = vec![None; size * size];

        for site in 0..size {
            dist[site * size + site] = Some(0);
            next[site * size + site] = Some(site);
        }
        for connection in graph.connections() {
            for (from, to) in [(connection.a, connection.b), (connection.b, connection.a)] {
                let cell = from * size + to;
                if dist[cell].map_or(true, |d| connection.cost < d) {
                    dist[cell] = Some(connection.cost);
                    next[cell] = Some(to);
                }
            }
        }

        for k in 0..size {
            for i in 0..size {
                let Some(ik) = dist[i * size + k] else {
                    continue;
                };
                for j in 0..size {
                    let Some(kj) = dist[k * size + j] else {
                        continue;
                    };
                    let Some(candidate) = ik.checked_add(kj) else {
                        continue;
                    };
                    let cell = i * size + j;
                    if dist[cell].map_or(true, |d| candidate < d) {
                        dist[cell] = Some(candidate);
                        next[cell] = next[i * size + k];
                    }
                }
            }
        }

        debug!(sites = size, "computed all-pairs distance matrix");
        Self { size, dist, next }
    }

    /// Number of sites the matrix was computed for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Shortest distance between two sites, `None` when unreachable.
    pub fn distance(&self, from: SiteId, to: SiteId) -> Option<Cost> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.dist[from * self.size + to]
    }

    /// Reconstruct the shortest path by following next-hop pointers.
    pub fn path(&self, from: SiteId, to: SiteId) -> Option<Vec<SiteId>> {
        self.distance(from, to)?;
        let mut path = vec![from];
        let mut current = from;
        while current != to {
            current = self.next[current * self.size + to]?;
            path.push(current);
            if path.len() > self.size {
                return None;
            }
        }
        Some(path)
    }
}

/// Search the meta-graph over {origin, recharge sites, destination} whose
/// edges are shortest distances no longer than the battery limit.
pub(super) fn meta_route(
    graph: &Graph,
    matrix: &DistanceMatrix,
    request: &RouteRequest,
) -> Option<RouteResult> {
    let limit = request.battery_limit;
    let mut nodes = vec![request.origin];
    nodes.extend(
        graph
            .recharge_sites()
            .filter(|&site| site != request.origin && site != request.destination),
    );
    nodes.push(request.destination);
    let goal = nodes.len() - 1;

    let mut best: Vec<Option<Cost>> = vec![None; nodes.len()];
    let mut previous: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut done = vec![false; nodes.len()];
    let mut heap = BinaryHeap::new();
    let mut seq = 0usize;

    best[0] = Some(0);
    heap.push(QueueEntry {
        cost: 0,
        seq,
        index: 0,
    });

    while let Some(entry) = heap.pop() {
        if done[entry.index] {
            continue;
        }
        done[entry.index] = true;
        if entry.index == goal {
            break;
        }

        let from = nodes[entry.index];
        for (index, &to) in nodes.iter().enumerate() {
            if done[index] {
                continue;
            }
            let Some(hop) = matrix.distance(from, to).filter(|&d| d <= limit) else {
                continue;
            };
            let Some(cost) = entry.cost.checked_add(hop) else {
                continue;
            };
            if best[index].map_or(true, |current| cost < current) {
                best[index] = Some(cost);
                previous[index] = Some(entry.index);
                seq += 1;
                heap.push(QueueEntry { cost, seq, index });
            }
        }
    }

    let total_cost = best[goal]?;

    let mut hops = vec![goal];
    let mut current = goal;
    while let Some(parent) = previous[current] {
        hops.push(parent);
        current = parent;
    }
    hops.reverse();

    let mut path = vec![request.origin];
    for pair in hops.windows(2) {
        let segment = matrix.path(nodes[pair[0]], nodes[pair[1]])?;
        path.extend_from_slice(&segment[1..]);
    }
    let recharge_stops = hops[1..hops.len() - 1]
        .iter()
        .map(|&index| nodes[index])
        .collect();

    debug!(
        meta_nodes = nodes.len(),
        hops = hops.len() - 1,
        total_cost,
        "meta-graph route found"
    );

    Some(RouteResult {
        path,
        total_cost,
        recharge_stops,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SiteRoles;

    fn diamond() -> Graph {
        // 0 -(2)- 1 -(2)- 3 and 0 -(1)- 2 -(5)- 3
        let mut graph = Graph::new();
        for _ in 0..4 {
            graph.add_site(SiteRoles::default());
        }
        graph.add_connection(0, 1, 2).unwrap();
        graph.add_connection(1, 3, 2).unwrap();
        graph.add_connection(0, 2, 1).unwrap();
        graph.add_connection(2, 3, 5).unwrap();
        graph
    }

    #[test]
    fn matrix_holds_shortest_distances() {
        let matrix = DistanceMatrix::compute(&diamond());
        assert_eq!(matrix.distance(0, 3), Some(4));
        assert_eq!(matrix.distance(2, 1), Some(3));
        assert_eq!(matrix.distance(3, 3), Some(0));
        assert_eq!(matrix.path(0, 3), Some(vec![0, 1, 3]));
        assert_eq!(matrix.path(2, 1), Some(vec![2, 0, 1]));
        assert_eq!(matrix.path(1, 1), Some(vec![1]));
    }

    #[test]
    fn unreachable_pairs_have_no_distance() {
        let mut graph = diamond();
        graph.add_site(SiteRoles::default());
        let matrix = DistanceMatrix::compute(&graph);
        assert_eq!(matrix.distance(0, 4), None);
        assert_eq!(matrix.path(4, 0), None);
        assert_eq!(matrix.distance(0, 99), None);
    }

    #[test]
    fn meta_route_joins_segments_through_stations() {
        // 0 - 1 - 2 - 3 - 4, cost 10 each, stations at 1 and 3.
        let mut graph = Graph::new();
        for id in 0..5 {
            let roles = if id % 2 == 1 {
                SiteRoles::recharge()
            } else {
                SiteRoles::default()
            };
            graph.add_site(roles);
        }
        for id in 1..5 {
            graph.add_connection(id - 1, id, 10).unwrap();
        }
        let matrix = DistanceMatrix::compute(&graph);

        let route = meta_route(&graph, &matrix, &RouteRequest::new(0, 4, 30)).unwrap();
        assert_eq!(route.path, vec![0, 1, 2, 3, 4]);
        assert_eq!(route.total_cost, 40);
        assert_eq!(route.recharge_stops, vec![1]);

        let tight = meta_route(&graph, &matrix, &RouteRequest::new(0, 4, 20)).unwrap();
        assert_eq!(tight.recharge_stops, vec![1, 3]);
        assert_eq!(tight.path, vec![0, 1, 2, 3, 4]);
        assert_eq!(tight.total_cost, 40);

        assert!(meta_route(&graph, &matrix, &RouteRequest::new(0, 4, 19)).is_none());
    }

    #[test]
    fn distances_past_cost_range_are_left_unreachable() {
        let half = Cost::MAX / 2 + 1;
        let mut graph = Graph::new();
        for _ in 0..5 {
            graph.add_site(SiteRoles::default());
        }
        graph.add_connection(0, 1, half).unwrap();
        graph.add_connection(1, 2, half).unwrap();
        graph.add_connection(3, 4, 1).unwrap();

        let matrix = DistanceMatrix::compute(&graph);
        assert_eq!(matrix.distance(0, 1), Some(half));
        assert_eq!(matrix.distance(0, 2), None);

        let route = meta_route(&graph, &matrix, &RouteRequest::new(3, 4, 5)).unwrap();
        assert_eq!(route.path, vec![3, 4]);
        assert_eq!(route.total_cost, 1);
    }

    #[test]
    fn meta_route_skips_hops_past_cost_range() {
        let half = Cost::MAX / 2 + 1;
        let mut graph = Graph::new();
        graph.add_site(SiteRoles::default());
        graph.add_site(SiteRoles::recharge());
        graph.add_site(SiteRoles::default());
        graph.add_connection(0, 1, half).unwrap();
        graph.add_connection(1, 2, half).unwrap();

        let matrix = DistanceMatrix::compute(&graph);
        assert!(meta_route(&graph, &matrix, &RouteRequest::new(0, 2, Cost::MAX)).is_none());
    }
}
