//! Route search strategies implementing the Strategy pattern.
//!
//! Each planner encapsulates one algorithm behind the [`RoutePlanner`] trait
//! so [`super::search_route`] can dispatch on [`SearchStrategy`] without
//! knowing the algorithm details.

use std::sync::Arc;

use tracing::debug;

use super::all_pairs::{meta_route, DistanceMatrix};
use super::state_space::{explore, Frontier};
use super::{RouteRequest, RouteResult, SearchStrategy};
use crate::graph::Graph;

/// Trait for route search strategies.
pub trait RoutePlanner: Send + Sync {
    /// The strategy identifier for this planner.
    fn strategy(&self) -> SearchStrategy;

    /// Run the search. Callers must have validated that both endpoints exist,
    /// that they differ and that the battery limit is non-negative; use
    /// [`super::search_route_with`] for that.
    ///
    /// Returns `None` when no feasible route exists.
    fn find_route(&self, graph: &Graph, request: &RouteRequest) -> Option<RouteResult>;
}

/// First-in-first-out state-space search.
#[derive(Debug, Clone, Default)]
pub struct BreadthFirstPlanner;

impl RoutePlanner for BreadthFirstPlanner {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Breadth
    }

    fn find_route(&self, graph: &Graph, request: &RouteRequest) -> Option<RouteResult> {
        explore(graph, request, Frontier::Fifo)
    }
}

/// Cost-ordered state-space search; returns a minimum-cost route.
#[derive(Debug, Clone, Default)]
pub struct CostOrderedPlanner;

impl RoutePlanner for CostOrderedPlanner {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::CostOrdered
    }

    fn find_route(&self, graph: &Graph, request: &RouteRequest) -> Option<RouteResult> {
        explore(graph, request, Frontier::CostOrdered)
    }
}

/// All-pairs precomputation followed by a search over recharge sites.
///
/// A planner built with [`AllPairsPlanner::prepare`] keeps its distance
/// matrix and reuses it for every query against a graph of the same size.
/// The matrix does not track later edits to the graph's connections.
#[derive(Debug, Clone, Default)]
pub struct AllPairsPlanner {
    matrix: Option<Arc<DistanceMatrix>>,
}

impl AllPairsPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Precompute the distance matrix for `graph`.
    pub fn prepare(graph: &Graph) -> Self {
        Self {
            matrix: Some(Arc::new(DistanceMatrix::compute(graph))),
        }
    }

    pub fn matrix(&self) -> Option<&DistanceMatrix> {
        self.matrix.as_deref()
    }
}

impl RoutePlanner for AllPairsPlanner {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::AllPairs
    }

    fn find_route(&self, graph: &Graph, request: &RouteRequest) -> Option<RouteResult> {
        match self.matrix.as_deref() {
            Some(matrix) if matrix.size() == graph.len() => meta_route(graph, matrix, request),
            Some(matrix) => {
                debug!(
                    prepared = matrix.size(),
                    sites = graph.len(),
                    "prepared matrix does not match graph; recomputing"
                );
                meta_route(graph, &DistanceMatrix::compute(graph), request)
            }
            None => meta_route(graph, &DistanceMatrix::compute(graph), request),
        }
    }
}

/// Select the planner for a strategy.
pub fn select_planner(strategy: SearchStrategy) -> Box<dyn RoutePlanner> {
    match strategy {
        SearchStrategy::Breadth => Box::new(BreadthFirstPlanner),
        SearchStrategy::CostOrdered => Box::new(CostOrderedPlanner),
        SearchStrategy::AllPairs => Box::new(AllPairsPlanner::new()),
    }
}
