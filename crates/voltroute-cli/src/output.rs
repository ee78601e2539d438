//! Output formatting for command results.
//!
//! Every renderer returns the full text so commands can print it in one go
//! and tests can inspect it without capturing stdout.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use voltroute_lib::{
    mst::total_cost, Connection, Cost, OptimizationReport, RouteKey, RouteResult, SearchStrategy,
    SiteId, SiteVisits, Suggestion,
};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct RouteOutput<'a> {
    origin: SiteId,
    destination: SiteId,
    strategy: SearchStrategy,
    #[serde(flatten)]
    route: &'a RouteResult,
}

pub fn render_route(
    format: OutputFormat,
    origin: SiteId,
    destination: SiteId,
    strategy: SearchStrategy,
    route: &RouteResult,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&RouteOutput {
            origin,
            destination,
            strategy,
            route,
        })?),
        OutputFormat::Text => {
            let mut out = format!(
                "Route from {} to {} ({} hops; strategy: {}):\n",
                origin,
                destination,
                route.hop_count(),
                strategy
            );
            write_route_body(&mut out, route);
            Ok(out)
        }
    }
}

pub fn render_suggestion(format: OutputFormat, suggestion: &Suggestion) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(suggestion)?),
        OutputFormat::Text => {
            let mut out = format!("Suggested route (source: {}):\n", suggestion.source);
            write_route_body(&mut out, &suggestion.route);
            Ok(out)
        }
    }
}

fn write_route_body(out: &mut String, route: &RouteResult) {
    let _ = writeln!(out, "  Path: {}", RouteKey::from(route.path.as_slice()));
    let _ = writeln!(out, "  Total cost: {}", route.total_cost);
    if route.recharge_stops.is_empty() {
        let _ = writeln!(out, "  Recharge stops: none");
    } else {
        let stops: Vec<String> = route.recharge_stops.iter().map(|s| s.to_string()).collect();
        let _ = writeln!(out, "  Recharge stops: {}", stops.join(", "));
    }
}

#[derive(Debug, Serialize)]
struct TreeOutput<'a> {
    total_cost: Cost,
    connections: &'a [Connection],
}

pub fn render_mst(format: OutputFormat, tree: &[Connection]) -> Result<String> {
    let total = total_cost(tree).context("spanning tree total cost overflows")?;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&TreeOutput {
            total_cost: total,
            connections: tree,
        })?),
        OutputFormat::Text => {
            let mut out = format!(
                "Minimum spanning tree ({} connections, total cost {}):\n",
                tree.len(),
                total
            );
            for connection in tree {
                let _ = writeln!(
                    out,
                    "  {} - {} ({})",
                    connection.a, connection.b, connection.cost
                );
            }
            Ok(out)
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    #[serde(flatten)]
    report: &'a OptimizationReport,
    visits: &'a [SiteVisits],
}

pub fn render_report(
    format: OutputFormat,
    report: &OptimizationReport,
    visits: &[SiteVisits],
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ReportOutput { report, visits })?),
        OutputFormat::Text => {
            let mut out = report.to_string();
            if !visits.is_empty() {
                out.push_str("Site visits:\n");
                for entry in visits {
                    let _ = writeln!(out, "  {}: {}", entry.site, entry.visits);
                }
            }
            Ok(out)
        }
    }
}
