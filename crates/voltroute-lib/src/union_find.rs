//! Disjoint-set forest over dense site identifiers.

use crate::graph::SiteId;

/// Union-by-rank with path-compressing `find`.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<SiteId>,
    rank: Vec<u8>,
    sets: usize,
}

impl UnionFind {
    /// Create `size` singleton sets `{0}, {1}, …`.
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
            sets: size,
        }
    }

    /// Representative of the set containing `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is out of range.
    pub fn find(&mut self, x: SiteId) -> SiteId {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets containing `x` and `y`. Returns `false` if they were
    /// already the same set.
    pub fn union(&mut self, x: SiteId, y: SiteId) -> bool {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return false;
        }

        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
        self.sets -= 1;
        true
    }

    pub fn connected(&mut self, x: SiteId, y: SiteId) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of disjoint sets remaining.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}
