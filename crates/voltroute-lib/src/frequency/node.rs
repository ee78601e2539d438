use super::key::RouteKey;

pub(super) type Link = Option<Box<Node>>;

/// Tree node owning both of its subtrees.
#[derive(Debug)]
pub(super) struct Node {
    pub(super) key: RouteKey,
    pub(super) count: u64,
    /// Height of the subtree rooted here; a leaf has height 1.
    pub(super) height: usize,
    pub(super) left: Link,
    pub(super) right: Link,
}

impl Node {
    pub(super) fn leaf(key: RouteKey, count: u64) -> Box<Self> {
        Box::new(Self {
            key,
            count,
            height: 1,
            left: None,
            right: None,
        })
    }

    pub(super) fn height(link: &Link) -> usize {
        link.as_ref().map_or(0, |node| node.height)
    }

    pub(super) fn update_height(&mut self) {
        self.height = 1 + Self::height(&self.left).max(Self::height(&self.right));
    }

    /// `height(left) - height(right)`.
    pub(super) fn balance(&self) -> isize {
        Self::height(&self.left) as isize - Self::height(&self.right) as isize
    }
}
