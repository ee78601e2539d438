//! Network descriptions loaded from JSON.
//!
//! A description lists sites by position (the index becomes the [`SiteId`])
//! and connections by endpoint identifiers:
//!
//! ```json
//! {
//!   "sites": [{"depot": true}, {"recharge": true}, {"customer": true}],
//!   "connections": [{"a": 0, "b": 1, "cost": 10}, {"a": 1, "b": 2, "cost": 10}],
//!   "optimizer": {"battery_limit": 15}
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::graph::{Cost, Graph, SiteId, SiteRoles};
use crate::optimizer::OptimizerConfig;

/// Connection entry within a [`NetworkDescription`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    pub a: SiteId,
    pub b: SiteId,
    pub cost: Cost,
}

/// Serializable description of a delivery network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescription {
    #[serde(default)]
    pub sites: Vec<SiteRoles>,
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
    /// Optional optimizer settings shipped alongside the network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<OptimizerConfig>,
}

impl NetworkDescription {
    /// Parse a description from a JSON string.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Build the graph store, validating every connection.
    pub fn build_graph(&self) -> Result<Graph> {
        let mut graph = Graph::new();
        for roles in &self.sites {
            graph.add_site(*roles);
        }
        for spec in &self.connections {
            graph.add_connection(spec.a, spec.b, spec.cost)?;
        }
        Ok(graph)
    }

    /// Capture an existing graph as a description.
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            sites: graph.sites().iter().map(|site| site.roles).collect(),
            connections: graph
                .connections()
                .iter()
                .map(|c| ConnectionSpec {
                    a: c.a,
                    b: c.b,
                    cost: c.cost,
                })
                .collect(),
            optimizer: None,
        }
    }
}

/// Load a network description from a JSON file.
pub fn load_network(path: &Path) -> Result<NetworkDescription> {
    let raw = fs::read_to_string(path)?;
    let description = NetworkDescription::from_json(&raw)?;
    debug!(
        path = %path.display(),
        sites = description.sites.len(),
        connections = description.connections.len(),
        "loaded network description"
    );
    Ok(description)
}
