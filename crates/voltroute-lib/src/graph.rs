use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dense identifier for a site, assigned in insertion order by [`Graph::add_site`].
pub type SiteId = usize;

/// Traversal cost of a connection. Signed so negative input can be rejected.
pub type Cost = i64;

/// Role flags carried by a site. Roles are advisory and may overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteRoles {
    pub depot: bool,
    pub customer: bool,
    pub recharge: bool,
}

impl SiteRoles {
    pub fn depot() -> Self {
        Self {
            depot: true,
            ..Self::default()
        }
    }

    pub fn customer() -> Self {
        Self {
            customer: true,
            ..Self::default()
        }
    }

    pub fn recharge() -> Self {
        Self {
            recharge: true,
            ..Self::default()
        }
    }
}

/// A node in the delivery network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Site {
    pub id: SiteId,
    pub roles: SiteRoles,
}

impl Site {
    pub fn is_recharge(&self) -> bool {
        self.roles.recharge
    }
}

/// An undirected connection, stored once with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Connection {
    pub a: SiteId,
    pub b: SiteId,
    pub cost: Cost,
}

impl Connection {
    fn new(a: SiteId, b: SiteId, cost: Cost) -> Self {
        Self {
            a: a.min(b),
            b: a.max(b),
            cost,
        }
    }
}

/// Adjacency entry as seen from one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: SiteId,
    pub cost: Cost,
}

/// Graph store holding sites and weighted undirected connections.
///
/// Each connection is kept once in the connection list and mirrored into the
/// adjacency list of both endpoints. Adding a second connection between the
/// same pair is rejected with [`Error::DuplicateConnection`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    sites: Vec<Site>,
    adjacency: Vec<Vec<Edge>>,
    connections: Vec<Connection>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a site and return its identifier.
    pub fn add_site(&mut self, roles: SiteRoles) -> SiteId {
        let id = self.sites.len();
        self.sites.push(Site { id, roles });
        self.adjacency.push(Vec::new());
        id
    }

    /// Connect two existing sites with a non-negative cost.
    pub fn add_connection(&mut self, a: SiteId, b: SiteId, cost: Cost) -> Result<()> {
        self.ensure_site(a)?;
        self.ensure_site(b)?;
        if a == b {
            return Err(Error::InvalidConnection { a, b });
        }
        if cost < 0 {
            return Err(Error::InvalidCost { a, b, cost });
        }
        if self.connection_cost(a, b).is_some() {
            return Err(Error::DuplicateConnection { a, b });
        }

        self.adjacency[a].push(Edge { target: b, cost });
        self.adjacency[b].push(Edge { target: a, cost });
        self.connections.push(Connection::new(a, b, cost));
        Ok(())
    }

    /// Remove the connection between `a` and `b` (in either orientation),
    /// returning its cost if it existed.
    pub fn remove_connection(&mut self, a: SiteId, b: SiteId) -> Option<Cost> {
        let key = Connection::new(a, b, 0);
        let position = self
            .connections
            .iter()
            .position(|c| c.a == key.a && c.b == key.b)?;
        let removed = self.connections.remove(position);
        self.adjacency[a].retain(|edge| edge.target != b);
        self.adjacency[b].retain(|edge| edge.target != a);
        Some(removed.cost)
    }

    pub fn site(&self, id: SiteId) -> Option<&Site> {
        self.sites.get(id)
    }

    pub fn contains(&self, id: SiteId) -> bool {
        id < self.sites.len()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Every connection exactly once, in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Return the neighbours for a given site; unknown sites have none.
    pub fn neighbours(&self, id: SiteId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn connection_cost(&self, a: SiteId, b: SiteId) -> Option<Cost> {
        self.neighbours(a)
            .iter()
            .find(|edge| edge.target == b)
            .map(|edge| edge.cost)
    }

    /// Identifiers of all sites flagged as recharge points, ascending.
    pub fn recharge_sites(&self) -> impl Iterator<Item = SiteId> + '_ {
        self.sites
            .iter()
            .filter(|site| site.is_recharge())
            .map(|site| site.id)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Replay a path against the stored connections and return its total cost.
    ///
    /// Returns `None` when any consecutive pair is not connected or the total
    /// does not fit in a [`Cost`].
    pub fn path_cost(&self, path: &[SiteId]) -> Option<Cost> {
        path.windows(2).try_fold(0, |total: Cost, pair| {
            total.checked_add(self.connection_cost(pair[0], pair[1])?)
        })
    }

    pub(crate) fn ensure_site(&self, id: SiteId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::InvalidSite { id })
        }
    }
}
