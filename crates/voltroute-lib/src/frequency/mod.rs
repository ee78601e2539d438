//! Route frequency index.
//!
//! A height-balanced (AVL) binary search tree keyed by [`RouteKey`] that
//! stores how many times each exact route has been registered. Insertion and
//! lookup descend by key and cost `O(log n)`; ranking by usage needs a full
//! in-order scan because the tree is ordered by key, not by count.
//!
//! # Example
//!
//! ```
//! use voltroute_lib::frequency::{FrequencyIndex, RouteKey};
//!
//! let mut index = FrequencyIndex::new();
//! index.insert_or_increment(RouteKey::from(vec![0, 1, 2]), 1);
//! index.insert_or_increment(RouteKey::from(vec![0, 1, 2]), 2);
//! index.insert_or_increment(RouteKey::from(vec![0, 3, 2]), 1);
//!
//! assert_eq!(index.search(&RouteKey::from(vec![0, 1, 2])), Some(3));
//! assert_eq!(index.len(), 2);
//! ```

mod iter;
mod key;
mod node;
mod tree;

pub use iter::Iter;
pub use key::RouteKey;
pub use tree::FrequencyIndex;
