use std::cmp::Ordering;

use super::iter::Iter;
use super::key::RouteKey;
use super::node::{Link, Node};

/// AVL tree mapping route keys to usage counts.
#[derive(Debug, Default)]
pub struct FrequencyIndex {
    root: Link,
    len: usize,
}

impl FrequencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the count stored for `key`, inserting the key with
    /// count `delta` when it is not present. Returns the resulting count.
    pub fn insert_or_increment(&mut self, key: RouteKey, delta: u64) -> u64 {
        let mut outcome = Insertion::default();
        self.root = Some(insert(self.root.take(), key, delta, &mut outcome));
        if outcome.created {
            self.len += 1;
        }
        outcome.count
    }

    /// Exact lookup by key.
    pub fn search(&self, key: &RouteKey) -> Option<u64> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node.count),
            };
        }
        None
    }

    /// Remove `key`, returning its count. Two-child nodes are replaced by
    /// their in-order successor and the path is rebalanced.
    pub fn remove(&mut self, key: &RouteKey) -> Option<u64> {
        let mut removed = None;
        self.root = remove(self.root.take(), key, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// In-order iteration over `(key, count)` pairs.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// The `n` most used routes, ties broken by ascending key.
    pub fn top_n(&self, n: usize) -> Vec<(RouteKey, u64)> {
        let mut entries: Vec<(RouteKey, u64)> = self
            .iter()
            .map(|(key, count)| (key.clone(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> usize {
        Node::height(&self.root)
    }
}

impl<'a> IntoIterator for &'a FrequencyIndex {
    type Item = (&'a RouteKey, u64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Default)]
struct Insertion {
    count: u64,
    created: bool,
}

fn insert(link: Link, key: RouteKey, delta: u64, outcome: &mut Insertion) -> Box<Node> {
    let Some(mut node) = link else {
        outcome.count = delta;
        outcome.created = true;
        return Node::leaf(key, delta);
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            node.left = Some(insert(node.left.take(), key, delta, outcome));
            rebalance(node)
        }
        Ordering::Greater => {
            node.right = Some(insert(node.right.take(), key, delta, outcome));
            rebalance(node)
        }
        Ordering::Equal => {
            node.count = node.count.saturating_add(delta);
            outcome.count = node.count;
            node
        }
    }
}

fn remove(link: Link, key: &RouteKey, removed: &mut Option<u64>) -> Link {
    let mut node = link?;

    match key.cmp(&node.key) {
        Ordering::Less => node.left = remove(node.left.take(), key, removed),
        Ordering::Greater => node.right = remove(node.right.take(), key, removed),
        Ordering::Equal => {
            *removed = Some(node.count);
            match (node.left.take(), node.right.take()) {
                (None, None) => return None,
                (Some(child), None) | (None, Some(child)) => return Some(child),
                (Some(left), Some(right)) => {
                    let (successor, rest) = take_min(right);
                    node.key = successor.key;
                    node.count = successor.count;
                    node.left = Some(left);
                    node.right = rest;
                }
            }
        }
    }

    Some(rebalance(node))
}

/// Detach the minimum node of a subtree, returning it and the rebalanced rest.
fn take_min(mut node: Box<Node>) -> (Box<Node>, Link) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (node, rest)
        }
        Some(left) => {
            let (min, rest) = take_min(left);
            node.left = rest;
            (min, Some(rebalance(node)))
        }
    }
}

/// Restore the AVL invariant at `node`, assuming both subtrees satisfy it.
fn rebalance(mut node: Box<Node>) -> Box<Node> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        // left-right: straighten the left child first
        if node.left.as_ref().is_some_and(|left| left.balance() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        // right-left
        if node.right.as_ref().is_some_and(|right| right.balance() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}
