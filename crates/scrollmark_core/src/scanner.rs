//! Tree scanner
//!
//! Collapses a content tree into positional records, one per visually
//! distinct leaf block, sorted by reveal offset.

use tracing::{debug, trace};

use crate::record::{PositionalRecord, TextGeometry};
use crate::tree::{leaves, ContentTree, FilterPolicy};

/// Options controlling what a scan extracts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Extract plain text content of text leaves (only needed for search)
    pub collect_text: bool,
}

impl ScanOptions {
    /// Options for a text-instance search
    pub fn with_text() -> Self {
        Self { collect_text: true }
    }
}

/// Walk up from `leaf` while the current node is its parent's only child
///
/// Stops at the first ancestor with two or more children, or at `boundary`
/// (the scan root), which is never crossed.
pub fn merged_ancestor<T: ContentTree + ?Sized>(
    tree: &T,
    leaf: T::Node,
    boundary: Option<T::Node>,
) -> T::Node {
    let mut current = leaf;
    while Some(current) != boundary {
        let Some(parent) = tree.parent(current) else {
            break;
        };
        if tree.child_count(parent) != 1 {
            break;
        }
        current = parent;
    }
    current
}

/// Scan `tree` into records sorted by reveal offset
///
/// Leaves whose geometry cannot be resolved are dropped. An empty tree, or
/// one where the policy admits nothing, yields an empty sequence.
pub fn scan<T: ContentTree + ?Sized>(
    tree: &T,
    policy: &FilterPolicy,
    options: ScanOptions,
) -> Vec<PositionalRecord> {
    let iter = leaves(tree, policy);
    let boundary = iter.scan_root();

    let mut records: Vec<PositionalRecord> = iter
        .filter_map(|leaf| record_for_leaf(tree, leaf, boundary, options))
        .collect();

    // Traversal order is not guaranteed monotonic under every layout.
    records.sort_by(|a, b| a.reveal_offset.total_cmp(&b.reveal_offset));

    debug!(records = records.len(), "scanned content tree");
    records
}

fn record_for_leaf<T: ContentTree + ?Sized>(
    tree: &T,
    leaf: T::Node,
    boundary: Option<T::Node>,
    options: ScanOptions,
) -> Option<PositionalRecord> {
    let block = merged_ancestor(tree, leaf, boundary);

    let (Some(size), Some(reveal_offset)) = (tree.extent(block), tree.offset_to_reveal(block))
    else {
        trace!(?leaf, "dropping unresolved leaf");
        return None;
    };

    let text = match tree.line_height(leaf) {
        Some(line_height) => Some(TextGeometry {
            line_height,
            text_extent: tree.extent(leaf)?,
            text_reveal_offset: tree.offset_to_reveal(leaf)?,
        }),
        None => None,
    };

    let content = if options.collect_text {
        tree.text_content(leaf)
    } else {
        None
    };

    Some(PositionalRecord {
        reveal_offset,
        size,
        text,
        content,
    })
}
