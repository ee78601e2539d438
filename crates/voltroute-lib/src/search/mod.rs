//! Battery-constrained route search.
//!
//! This module provides:
//! - [`SearchStrategy`] - Supported search strategies
//! - [`RouteRequest`] - Origin, destination, battery limit and strategy
//! - [`RouteResult`] - Path, exact total cost and recharge stops
//! - [`search_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Each strategy is encapsulated in a planner implementing [`RoutePlanner`].
//! The breadth-first and cost-ordered planners explore `(site, battery)`
//! states incrementally; the all-pairs planner precomputes shortest distances
//! and searches a reduced graph over the origin, the destination and every
//! recharge site.
//!
//! # Example
//!
//! ```
//! use voltroute_lib::{search_route, Graph, RouteRequest, SiteRoles};
//!
//! let mut graph = Graph::new();
//! let depot = graph.add_site(SiteRoles::depot());
//! let station = graph.add_site(SiteRoles::recharge());
//! let customer = graph.add_site(SiteRoles::customer());
//! graph.add_connection(depot, station, 10).unwrap();
//! graph.add_connection(station, customer, 10).unwrap();
//!
//! let route = search_route(&graph, &RouteRequest::new(depot, customer, 15))
//!     .unwrap()
//!     .expect("route exists");
//! assert_eq!(route.path, vec![depot, station, customer]);
//! assert_eq!(route.recharge_stops, vec![station]);
//! ```

mod all_pairs;
mod planner;
mod state_space;

pub use all_pairs::DistanceMatrix;
pub use planner::{
    select_planner, AllPairsPlanner, BreadthFirstPlanner, CostOrderedPlanner, RoutePlanner,
};

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Cost, Graph, SiteId};

/// Battery limit used when a caller does not specify one.
pub const DEFAULT_BATTERY_LIMIT: Cost = 50;

/// Supported search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// First-in-first-out exploration of `(site, battery)` states. Finds a
    /// feasible route but not necessarily the cheapest.
    #[serde(rename = "bfs", alias = "breadth")]
    Breadth,
    /// Priority-queue exploration by accumulated cost; minimum-cost answer.
    #[default]
    #[serde(rename = "dijkstra", alias = "cost-ordered")]
    CostOrdered,
    /// All-pairs shortest distances plus a search over recharge sites.
    #[serde(rename = "all-pairs", alias = "floyd-warshall")]
    AllPairs,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::Breadth,
        SearchStrategy::CostOrdered,
        SearchStrategy::AllPairs,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            SearchStrategy::Breadth => "bfs",
            SearchStrategy::CostOrdered => "dijkstra",
            SearchStrategy::AllPairs => "all-pairs",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            SearchStrategy::Breadth => &["bfs", "breadth"],
            SearchStrategy::CostOrdered => &["dijkstra", "cost-ordered"],
            SearchStrategy::AllPairs => &["all-pairs", "floyd-warshall"],
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchStrategy {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase().replace('_', "-");
        for strategy in Self::ALL {
            if strategy.aliases().contains(&normalized.as_str()) {
                return Ok(strategy);
            }
        }

        let suggestions = Self::ALL
            .iter()
            .flat_map(|strategy| strategy.aliases().iter().copied())
            .filter(|alias| strsim::jaro_winkler(alias, &normalized) >= 0.8)
            .map(str::to_string)
            .collect();
        Err(Error::UnknownStrategy {
            name: input.to_string(),
            suggestions,
        })
    }
}

/// Route search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: SiteId,
    pub destination: SiteId,
    /// Cost a vehicle may consume between full charges.
    pub battery_limit: Cost,
    pub strategy: SearchStrategy,
    /// Optional cap on expanded states; the search gives up once reached.
    pub max_expansions: Option<usize>,
}

impl RouteRequest {
    /// Cost-ordered request without an expansion budget.
    pub fn new(origin: SiteId, destination: SiteId, battery_limit: Cost) -> Self {
        Self {
            origin,
            destination,
            battery_limit,
            strategy: SearchStrategy::default(),
            max_expansions: None,
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_expansions(mut self, budget: usize) -> Self {
        self.max_expansions = Some(budget);
        self
    }
}

/// Route returned by every strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Visited sites, from origin to destination inclusive.
    pub path: Vec<SiteId>,
    /// Sum of the costs of the traversed connections.
    pub total_cost: Cost,
    /// Sites where the battery was recharged, in visiting order.
    pub recharge_stops: Vec<SiteId>,
}

impl RouteResult {
    fn stationary(site: SiteId) -> Self {
        Self {
            path: vec![site],
            total_cost: 0,
            recharge_stops: Vec::new(),
        }
    }

    /// Number of connections traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Compute a route with the planner for `request.strategy`.
///
/// Returns `Ok(None)` when no feasible route exists and an error when the
/// request references unknown sites or a negative battery limit.
pub fn search_route(graph: &Graph, request: &RouteRequest) -> Result<Option<RouteResult>> {
    let planner = select_planner(request.strategy);
    search_route_with(planner.as_ref(), graph, request)
}

/// Compute a route with an explicit planner (e.g. a prepared
/// [`AllPairsPlanner`] reused across queries).
pub fn search_route_with(
    planner: &dyn RoutePlanner,
    graph: &Graph,
    request: &RouteRequest,
) -> Result<Option<RouteResult>> {
    graph.ensure_site(request.origin)?;
    graph.ensure_site(request.destination)?;
    if request.battery_limit < 0 {
        return Err(Error::InvalidBatteryLimit {
            limit: request.battery_limit,
        });
    }

    if request.origin == request.destination {
        return Ok(Some(RouteResult::stationary(request.origin)));
    }

    Ok(planner.find_route(graph, request))
}

/// Min-heap entry ordered by cost, then insertion sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    cost: Cost,
    seq: usize,
    index: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
