//! Route registration and usage statistics.
//!
//! [`RouteTracker`] owns the [`FrequencyIndex`] and the per-site visit tally.
//! It is a plain single-owner value; hosts that serve several requests at once
//! should wrap it in a [`SharedTracker`], which serializes registrations behind
//! a write lock so readers never observe a tree mid-rotation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::frequency::{FrequencyIndex, RouteKey};
use crate::graph::{Cost, SiteId};

/// Number of times a site appeared across registered routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SiteVisits {
    pub site: SiteId,
    pub visits: u64,
}

/// Records confirmed routes and answers frequency queries.
#[derive(Debug, Default)]
pub struct RouteTracker {
    index: FrequencyIndex,
    visits: HashMap<SiteId, u64>,
    registrations: u64,
}

impl RouteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route that was used.
    ///
    /// The route's usage count goes up by one and every occurrence of a site
    /// in `path` bumps that site's visit tally. `cost` is only logged.
    pub fn register_route(&mut self, path: &[SiteId], cost: Cost) -> Result<()> {
        if path.is_empty() {
            return Err(Error::EmptyRoute);
        }

        let key = RouteKey::from(path);
        for &site in path {
            *self.visits.entry(site).or_insert(0) += 1;
        }
        let count = self.index.insert_or_increment(key, 1);
        self.registrations += 1;

        debug!(
            route = ?path,
            cost,
            count,
            "registered route"
        );
        Ok(())
    }

    /// The `n` most frequently registered routes.
    pub fn top_routes(&self, n: usize) -> Vec<(RouteKey, u64)> {
        self.index.top_n(n)
    }

    /// Visit counts per site, most visited first (ties by ascending id).
    pub fn node_visit_stats(&self) -> Vec<SiteVisits> {
        let mut stats: Vec<SiteVisits> = self
            .visits
            .iter()
            .map(|(&site, &visits)| SiteVisits { site, visits })
            .collect();
        stats.sort_by(|a, b| b.visits.cmp(&a.visits).then_with(|| a.site.cmp(&b.site)));
        stats
    }

    /// How often an exact route has been registered.
    pub fn route_count(&self, path: &[SiteId]) -> Option<u64> {
        self.index.search(&RouteKey::from(path))
    }

    /// Total number of successful registrations.
    pub fn registrations(&self) -> u64 {
        self.registrations
    }

    pub fn index(&self) -> &FrequencyIndex {
        &self.index
    }
}

/// Cloneable, thread-safe handle to a [`RouteTracker`].
#[derive(Debug, Clone, Default)]
pub struct SharedTracker {
    inner: Arc<RwLock<RouteTracker>>,
}

impl SharedTracker {
    pub fn new(tracker: RouteTracker) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tracker)),
        }
    }

    pub fn register_route(&self, path: &[SiteId], cost: Cost) -> Result<()> {
        self.write().register_route(path, cost)
    }

    pub fn top_routes(&self, n: usize) -> Vec<(RouteKey, u64)> {
        self.read().top_routes(n)
    }

    pub fn node_visit_stats(&self) -> Vec<SiteVisits> {
        self.read().node_visit_stats()
    }

    /// Shared access for compound reads (e.g. route suggestions). Recovers
    /// from lock poisoning.
    pub fn read(&self) -> RwLockReadGuard<'_, RouteTracker> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, RouteTracker> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
