//! History-first route suggestions and network reporting.
//!
//! [`RouteOptimizer`] answers "how should I get from A to B?" by first
//! looking at the most used routes recorded in a [`RouteTracker`] and only
//! running a fresh [`search_route`] when history has nothing to offer.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::frequency::RouteKey;
use crate::graph::{Connection, Cost, Graph, SiteId};
use crate::search::{search_route, RouteRequest, RouteResult, SearchStrategy};
use crate::tracker::RouteTracker;

/// Number of segments listed by [`RouteOptimizer::optimization_report`].
pub const REPORTED_SEGMENTS: usize = 5;

/// How the cost of a route taken from history is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    /// `hops × cost_per_hop`. A cheap estimate that ignores real edge costs.
    #[default]
    Approximate,
    /// Replay the path against the graph for the exact cost.
    Replay,
}

/// Optimizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// How many of the most used routes are considered for a suggestion.
    pub history_window: usize,
    /// How many of the most used routes feed the segment report.
    pub report_window: usize,
    /// Per-hop estimate used by [`CostMode::Approximate`].
    pub cost_per_hop: Cost,
    /// Battery limit for searches run on a history miss.
    pub battery_limit: Cost,
    pub strategy: SearchStrategy,
    pub cost_mode: CostMode,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            history_window: 10,
            report_window: 5,
            cost_per_hop: 10,
            battery_limit: crate::search::DEFAULT_BATTERY_LIMIT,
            strategy: SearchStrategy::default(),
            cost_mode: CostMode::default(),
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.battery_limit < 0 {
            return Err(Error::InvalidBatteryLimit {
                limit: self.battery_limit,
            });
        }
        if self.cost_per_hop < 0 {
            return Err(Error::InvalidCostPerHop {
                cost: self.cost_per_hop,
            });
        }
        Ok(())
    }
}

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    History,
    Search,
}

impl fmt::Display for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionSource::History => f.write_str("history"),
            SuggestionSource::Search => f.write_str("search"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub route: RouteResult,
    pub source: SuggestionSource,
}

/// Usage of one directed consecutive site pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentUsage {
    pub from: SiteId,
    pub to: SiteId,
    pub uses: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteUsage {
    pub route: RouteKey,
    pub uses: u64,
}

/// Summary of the busiest routes and the segments they share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationReport {
    pub routes: Vec<RouteUsage>,
    pub segments: Vec<SegmentUsage>,
}

impl fmt::Display for OptimizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.routes.is_empty() {
            return writeln!(f, "No routes registered yet.");
        }

        writeln!(f, "Most used routes:")?;
        for usage in &self.routes {
            writeln!(f, "  {} ({} uses)", usage.route, usage.uses)?;
        }
        writeln!(f, "Busiest segments:")?;
        for segment in &self.segments {
            writeln!(
                f,
                "  {} -> {}: {} uses",
                segment.from, segment.to, segment.uses
            )?;
        }
        Ok(())
    }
}

/// Suggests routes from history and produces network reports.
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
}

impl RouteOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Suggest a route between two sites.
    ///
    /// Among the `history_window` most used routes, those running from
    /// `origin` to `destination` are scored `hops / max(uses, 1)` and the
    /// lowest score wins; ties keep the higher ranked route. On a history miss
    /// a fresh search runs with the configured battery limit and strategy.
    ///
    /// Returns `Ok(None)` when neither history nor the search has a route.
    /// Settings rejected by [`OptimizerConfig::validate`] are an error.
    pub fn suggest_route(
        &self,
        graph: &Graph,
        tracker: &RouteTracker,
        origin: SiteId,
        destination: SiteId,
    ) -> Result<Option<Suggestion>> {
        self.config.validate()?;
        graph.ensure_site(origin)?;
        graph.ensure_site(destination)?;

        if let Some(route) = self.from_history(graph, tracker, origin, destination) {
            debug!(
                origin,
                destination,
                hops = route.hop_count(),
                "suggesting route from history"
            );
            return Ok(Some(Suggestion {
                route,
                source: SuggestionSource::History,
            }));
        }

        let request = RouteRequest::new(origin, destination, self.config.battery_limit)
            .with_strategy(self.config.strategy);
        let route = search_route(graph, &request)?;
        debug!(
            origin,
            destination,
            found = route.is_some(),
            strategy = %self.config.strategy,
            "history miss; searched for a route"
        );
        Ok(route.map(|route| Suggestion {
            route,
            source: SuggestionSource::Search,
        }))
    }

    fn from_history(
        &self,
        graph: &Graph,
        tracker: &RouteTracker,
        origin: SiteId,
        destination: SiteId,
    ) -> Option<RouteResult> {
        let mut best: Option<(f64, RouteResult)> = None;

        for (key, uses) in tracker.top_routes(self.config.history_window) {
            if key.origin() != Some(origin) || key.destination() != Some(destination) {
                continue;
            }
            let score = key.hop_count() as f64 / uses.max(1) as f64;
            if best.as_ref().is_some_and(|(current, _)| score >= *current) {
                continue;
            }

            let total_cost = match self.config.cost_mode {
                CostMode::Approximate => {
                    let estimate = Cost::try_from(key.hop_count())
                        .ok()
                        .and_then(|hops| hops.checked_mul(self.config.cost_per_hop));
                    let Some(cost) = estimate else {
                        debug!(route = %key, "skipping history route with overflowing estimate");
                        continue;
                    };
                    cost
                }
                CostMode::Replay => match graph.path_cost(key.sites()) {
                    Some(cost) => cost,
                    None => {
                        debug!(route = %key, "skipping history route no longer in the graph");
                        continue;
                    }
                },
            };
            best = Some((
                score,
                RouteResult {
                    path: key.into_sites(),
                    total_cost,
                    recharge_stops: Vec::new(),
                },
            ));
        }

        best.map(|(_, route)| route)
    }

    /// Usage-weighted segment counts across the `report_window` most used
    /// routes; the five busiest segments are kept (ties by pair ascending).
    pub fn optimization_report(&self, tracker: &RouteTracker) -> OptimizationReport {
        let top = tracker.top_routes(self.config.report_window);

        let mut tally: HashMap<(SiteId, SiteId), u64> = HashMap::new();
        for (key, uses) in &top {
            for pair in key.segments() {
                *tally.entry(pair).or_insert(0) += uses;
            }
        }

        let mut segments: Vec<SegmentUsage> = tally
            .into_iter()
            .map(|((from, to), uses)| SegmentUsage { from, to, uses })
            .collect();
        segments.sort_by(|a, b| {
            b.uses
                .cmp(&a.uses)
                .then_with(|| (a.from, a.to).cmp(&(b.from, b.to)))
        });
        segments.truncate(REPORTED_SEGMENTS);

        OptimizationReport {
            routes: top
                .into_iter()
                .map(|(route, uses)| RouteUsage { route, uses })
                .collect(),
            segments,
        }
    }

    /// Minimum spanning forest of the network, for overview reporting.
    pub fn compute_mst(&self, graph: &Graph) -> Vec<Connection> {
        crate::mst::compute_mst(graph)
    }
}
