//! Content tree abstraction and leaf traversal
//!
//! The core never owns a tree. A host hands in anything implementing
//! [`ContentTree`] and the core pulls what it needs from it, fresh on every
//! scan.
//!
//! ```text
//! ContentTree (host: layout tree, widget tree, test fixture...)
//!     ↓ leaves(tree, policy)
//! Leaves (lazy, document order, filter applied)
//!     ↓ scan()
//! Vec<PositionalRecord>
//! ```

use std::fmt::Debug;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::warn;

/// A tree of renderable content nodes inside one scrollable region
///
/// All offsets are measured along the vertical scroll axis and are relative
/// to the scrollable content, not to the window.
pub trait ContentTree {
    /// Cheap handle to a node
    type Node: Copy + Eq + Debug;

    /// Root of the scrollable content, `None` when nothing is mounted
    fn root(&self) -> Option<Self::Node>;

    /// Children of `node` in document order
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Parent of `node`, `None` at the root or for detached nodes
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Identity tag used by filter policies
    fn key(&self, node: Self::Node) -> Option<&str>;

    /// Resolved height of the node's box, `None` when unsized or detached
    fn extent(&self, node: Self::Node) -> Option<f32>;

    /// Scroll offset that brings the node's top edge to the viewport start
    fn offset_to_reveal(&self, node: Self::Node) -> Option<f32>;

    /// Line height for text nodes, `None` for everything else
    fn line_height(&self, node: Self::Node) -> Option<f32>;

    /// Plain text content of a text node
    fn text_content(&self, node: Self::Node) -> Option<String>;

    /// Number of children of `node`
    fn child_count(&self, node: Self::Node) -> usize {
        self.children(node).len()
    }

    /// Find the first node tagged `key`, depth-first from the root
    fn find_by_key(&self, key: &str) -> Option<Self::Node> {
        let mut stack: Vec<Self::Node> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            if self.key(node) == Some(key) {
                return Some(node);
            }
            stack.extend(self.children(node).into_iter().rev());
        }
        None
    }
}

/// Which part of the tree participates in scanning
///
/// The two rules are mutually exclusive; exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Scan only the subtree of the node tagged with this key
    OnlyChildrenOf(String),
    /// Skip nodes (and their subtrees) tagged with any of these keys
    IgnoreKeys(FxHashSet<String>),
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy::IgnoreKeys(FxHashSet::default())
    }
}

impl FilterPolicy {
    /// Restrict scanning to the subtree tagged `key`
    pub fn only_children_of(key: impl Into<String>) -> Self {
        FilterPolicy::OnlyChildrenOf(key.into())
    }

    /// Skip nodes tagged with any of `keys`
    pub fn ignore_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterPolicy::IgnoreKeys(keys.into_iter().map(Into::into).collect())
    }

    /// Whether a node tagged `key` is excluded
    pub fn is_ignored(&self, key: Option<&str>) -> bool {
        match (self, key) {
            (FilterPolicy::IgnoreKeys(keys), Some(key)) => keys.contains(key),
            _ => false,
        }
    }

    /// The node scanning starts from under this policy
    pub fn scan_root<T: ContentTree + ?Sized>(&self, tree: &T) -> Option<T::Node> {
        match self {
            FilterPolicy::OnlyChildrenOf(key) => {
                let node = tree.find_by_key(key);
                if node.is_none() {
                    warn!(key = key.as_str(), "scan root not found in content tree");
                }
                node
            }
            FilterPolicy::IgnoreKeys(_) => tree.root(),
        }
    }
}

/// Lazy document-order iterator over the leaves admitted by a policy
///
/// The scan root itself is never yielded, even when it has no children.
/// Restart by calling [`leaves`] again.
pub struct Leaves<'a, T: ContentTree + ?Sized> {
    tree: &'a T,
    policy: &'a FilterPolicy,
    root: Option<T::Node>,
    stack: SmallVec<[T::Node; 32]>,
}

impl<'a, T: ContentTree + ?Sized> Leaves<'a, T> {
    /// The node this traversal started from
    pub fn scan_root(&self) -> Option<T::Node> {
        self.root
    }
}

impl<'a, T: ContentTree + ?Sized> Iterator for Leaves<'a, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<T::Node> {
        while let Some(node) = self.stack.pop() {
            if self.policy.is_ignored(self.tree.key(node)) {
                continue;
            }

            let children = self.tree.children(node);
            if children.is_empty() {
                return Some(node);
            }
            self.stack.extend(children.into_iter().rev());
        }
        None
    }
}

/// Traverse the leaves of `tree` admitted by `policy`
pub fn leaves<'a, T: ContentTree + ?Sized>(tree: &'a T, policy: &'a FilterPolicy) -> Leaves<'a, T> {
    let root = policy.scan_root(tree);
    let mut stack = SmallVec::new();
    if let Some(root) = root {
        stack.extend(tree.children(root).into_iter().rev());
    }
    Leaves {
        tree,
        policy,
        root,
        stack,
    }
}


#[cfg(test)]
mod tests {
    use super::fixture::FixtureTree;
    use super::*;

    #[test]
    fn test_leaves_document_order() {
        let mut tree = FixtureTree::new();
        let a = tree.add(0, 0.0, 100.0);
        let a1 = tree.add(a, 0.0, 50.0);
        let a2 = tree.add(a, 50.0, 50.0);
        let b = tree.add(0, 100.0, 40.0);

        let policy = FilterPolicy::default();
        let found: Vec<_> = leaves(&tree, &policy).collect();
        assert_eq!(found, vec![a1, a2, b]);
    }

    #[test]
    fn test_leaves_restartable() {
        let mut tree = FixtureTree::new();
        tree.add(0, 0.0, 10.0);
        tree.add(0, 10.0, 10.0);

        let policy = FilterPolicy::default();
        let first: Vec<_> = leaves(&tree, &policy).collect();
        let second: Vec<_> = leaves(&tree, &policy).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_root_is_never_a_leaf() {
        let tree = FixtureTree::new();
        let policy = FilterPolicy::default();
        assert_eq!(leaves(&tree, &policy).count(), 0);
        assert_eq!(leaves(&FixtureTree::empty(), &policy).count(), 0);
    }

    #[test]
    fn test_ignore_keys_skips_subtree() {
        let mut tree = FixtureTree::new();
        let header = tree.add(0, 0.0, 60.0);
        tree.add(header, 0.0, 60.0);
        tree.set_key(header, "header");
        let body = tree.add(0, 60.0, 200.0);

        let policy = FilterPolicy::ignore_keys(["header"]);
        let found: Vec<_> = leaves(&tree, &policy).collect();
        assert_eq!(found, vec![body]);
    }

    #[test]
    fn test_only_children_of_ignores_everything_else() {
        let mut tree = FixtureTree::new();
        tree.add(0, 0.0, 60.0);
        let article = tree.add(0, 60.0, 200.0);
        tree.set_key(article, "article");
        let p1 = tree.add(article, 60.0, 100.0);
        let p2 = tree.add(article, 160.0, 100.0);

        let policy = FilterPolicy::only_children_of("article");
        let iter = leaves(&tree, &policy);
        assert_eq!(iter.scan_root(), Some(article));
        assert_eq!(iter.collect::<Vec<_>>(), vec![p1, p2]);
    }

    #[test]
    fn test_only_children_of_missing_key() {
        let mut tree = FixtureTree::new();
        tree.add(0, 0.0, 60.0);

        let policy = FilterPolicy::only_children_of("nowhere");
        assert_eq!(leaves(&tree, &policy).count(), 0);
    }

    #[test]
    fn test_find_by_key() {
        let mut tree = FixtureTree::new();
        let a = tree.add(0, 0.0, 10.0);
        let b = tree.add(a, 0.0, 10.0);
        tree.set_key(b, "deep");
        assert_eq!(tree.find_by_key("deep"), Some(b));
        assert_eq!(tree.find_by_key("shallow"), None);
    }
}
