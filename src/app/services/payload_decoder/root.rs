//! Locating the listing index array inside the flat payload
//!
//! The decoder needs the array of record indices before it can decode
//! anything. The source convention puts a response envelope at a well-known
//! position whose `data` field references that array, but the convention has
//! drifted across site deployments, so a heuristic scan backs the primary
//! lookup: the first sufficiently long all-integer list in the store.

use tracing::{debug, warn};

use super::store::{FlatStore, Node};
use crate::constants::{FALLBACK_MIN_LIST_LEN, ROOT_DATA_FIELD, WELL_KNOWN_ROOT_POSITION};

/// Locator for the array of listing record indices
///
/// Both structural parameters are injected so the locator is testable with
/// synthetic stores; [`RootLocator::default`] carries the documented source
/// conventions.
#[derive(Debug, Clone)]
pub struct RootLocator {
    /// Store position of the response envelope mapping
    root_position: usize,
    /// Minimum list length for the fallback scan to accept a candidate
    min_list_len: usize,
}

impl Default for RootLocator {
    fn default() -> Self {
        Self {
            root_position: WELL_KNOWN_ROOT_POSITION,
            min_list_len: FALLBACK_MIN_LIST_LEN,
        }
    }
}

impl RootLocator {
    /// Create a locator with custom structural parameters
    pub fn new(root_position: usize, min_list_len: usize) -> Self {
        Self {
            root_position,
            min_list_len,
        }
    }

    /// Locate the listing index array, returning raw index values in store
    /// order
    ///
    /// Tries the well-known envelope position first and falls back to a full
    /// scan. `None` means the payload carries no usable listing array at
    /// all, which is fatal for the whole batch.
    pub fn locate(&self, store: &FlatStore) -> Option<Vec<i64>> {
        if let Some(indices) = self.locate_primary(store) {
            debug!(
                "Listing index array found via envelope at position {}",
                self.root_position
            );
            return Some(indices);
        }

        self.locate_fallback(store)
    }

    /// Primary path: envelope mapping at the well-known position, `data`
    /// field resolved one hop to a list of integers
    fn locate_primary(&self, store: &FlatStore) -> Option<Vec<i64>> {
        let envelope = store.get(self.root_position)?;
        let data = store.resolve(envelope, ROOT_DATA_FIELD)?;
        as_integer_list(data)
    }

    /// Fallback path: scan every position for the first list of at least
    /// `min_list_len` integers
    ///
    /// The lowest-index candidate wins. That tie-break is deliberate but not
    /// semantically verified, so finding more than one candidate is logged
    /// loudly: it means the page embeds several same-shaped lists and the
    /// chosen one may be wrong.
    fn locate_fallback(&self, store: &FlatStore) -> Option<Vec<i64>> {
        let mut candidates = store
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                matches!(node, Node::List(items) if items.len() >= self.min_list_len)
            })
            .filter_map(|(position, node)| as_integer_list(node).map(|list| (position, list)));

        let (position, indices) = candidates.next()?;

        let extra: Vec<usize> = candidates.map(|(p, _)| p).collect();
        if extra.is_empty() {
            debug!(
                "Listing index array found via fallback scan at position {}",
                position
            );
        } else {
            warn!(
                "Multiple candidate listing arrays found (using position {}, ignoring {:?}); \
                 page structure may have changed",
                position, extra
            );
        }

        Some(indices)
    }
}

/// Extract a list node's elements when every element is an integer
fn as_integer_list(node: &Node) -> Option<Vec<i64>> {
    match node {
        Node::List(items) => items
            .iter()
            .map(|item| match item {
                Node::Int(i) => Some(*i),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}
