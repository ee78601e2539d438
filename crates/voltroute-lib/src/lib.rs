//! Voltroute library entry points.
//!
//! This crate stores a delivery network of depots, customers and recharge
//! sites, searches it for routes that respect a battery range, remembers which
//! routes were actually used and suggests routes from that history. Front ends
//! (the CLI) should only depend on the items exported here instead of
//! reimplementing behavior.
//!

pub mod error;
pub mod frequency;
pub mod graph;
pub mod mst;
pub mod network;
pub mod optimizer;
pub mod search;
pub mod tracker;
pub mod union_find;

pub use error::{Error, Result};
pub use frequency::{FrequencyIndex, RouteKey};
pub use graph::{Connection, Cost, Edge, Graph, Site, SiteId, SiteRoles};
pub use mst::compute_mst;
pub use network::{load_network, ConnectionSpec, NetworkDescription};
pub use optimizer::{
    CostMode, OptimizationReport, OptimizerConfig, RouteOptimizer, SegmentUsage, Suggestion,
    SuggestionSource,
};
pub use search::{
    search_route, search_route_with, AllPairsPlanner, RouteRequest, RouteResult, SearchStrategy,
    DEFAULT_BATTERY_LIMIT,
};
pub use tracker::{RouteTracker, SharedTracker, SiteVisits};
pub use union_find::UnionFind;
