use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::SiteId;

/// Separator used when rendering a route key for humans.
pub const DISPLAY_SEPARATOR: char = '→';

/// Canonical key for a route: the ordered sequence of visited sites.
///
/// Keys compare lexicographically over the site sequence, so two routes share
/// a key only when they visit exactly the same sites in the same order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteKey(Vec<SiteId>);

impl RouteKey {
    pub fn new(sites: Vec<SiteId>) -> Self {
        Self(sites)
    }

    pub fn sites(&self) -> &[SiteId] {
        &self.0
    }

    pub fn origin(&self) -> Option<SiteId> {
        self.0.first().copied()
    }

    pub fn destination(&self) -> Option<SiteId> {
        self.0.last().copied()
    }

    /// Number of connections traversed by the route.
    pub fn hop_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Consecutive site pairs along the route.
    pub fn segments(&self) -> impl Iterator<Item = (SiteId, SiteId)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn into_sites(self) -> Vec<SiteId> {
        self.0
    }
}

impl From<Vec<SiteId>> for RouteKey {
    fn from(sites: Vec<SiteId>) -> Self {
        Self(sites)
    }
}

impl From<&[SiteId]> for RouteKey {
    fn from(sites: &[SiteId]) -> Self {
        Self(sites.to_vec())
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, site) in self.0.iter().enumerate() {
            if position > 0 {
                write!(f, "{DISPLAY_SEPARATOR}")?;
            }
            write!(f, "{site}")?;
        }
        Ok(())
    }
}

impl FromStr for RouteKey {
    type Err = Error;

    /// Parse `0→1→2` or `0,1,2`.
    fn from_str(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidRouteKey {
            input: input.to_string(),
        };

        if input.trim().is_empty() {
            return Err(invalid());
        }

        input
            .split([DISPLAY_SEPARATOR, ','])
            .map(|part| part.trim().parse::<SiteId>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}
