use thiserror::Error;

use crate::graph::{Cost, SiteId};

/// Convenient result alias for the voltroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// A search that finds no feasible route is not an error; planners report it
/// as `Ok(None)` so callers branch on it explicitly.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an operation references a site the graph does not contain.
    #[error("unknown site: {id}")]
    InvalidSite { id: SiteId },

    /// Raised when a connection would join a site to itself.
    #[error("invalid connection {a} <-> {b}: self-loops are not permitted")]
    InvalidConnection { a: SiteId, b: SiteId },

    /// Raised when a connection cost is negative.
    #[error("invalid cost {cost} for connection {a} <-> {b}: costs must be non-negative")]
    InvalidCost { a: SiteId, b: SiteId, cost: Cost },

    /// Raised when a connection between the same pair of sites already exists.
    #[error("connection {a} <-> {b} already exists")]
    DuplicateConnection { a: SiteId, b: SiteId },

    /// Raised when a search strategy name is not recognised.
    #[error("unknown search strategy: {name}{}", format_suggestions(.suggestions))]
    UnknownStrategy {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a search is requested with a negative battery limit.
    #[error("battery limit must be non-negative, got {limit}")]
    InvalidBatteryLimit { limit: Cost },

    /// Raised when optimizer settings carry a negative per-hop estimate.
    #[error("cost per hop must be non-negative, got {cost}")]
    InvalidCostPerHop { cost: Cost },

    /// Raised when registering a route without any sites.
    #[error("cannot register an empty route")]
    EmptyRoute,

    /// Raised when a textual route key could not be parsed.
    #[error("invalid route key: {input}")]
    InvalidRouteKey { input: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_strategy_lists_single_suggestion() {
        let err = Error::UnknownStrategy {
            name: "dijkstr".to_string(),
            suggestions: vec!["dijkstra".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown search strategy: dijkstr. Did you mean 'dijkstra'?"
        );
    }

    #[test]
    fn unknown_strategy_without_suggestions() {
        let err = Error::UnknownStrategy {
            name: "teleport".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown search strategy: teleport");
    }
}
