//! Scrollable content view over a [`LayoutTree`]

use scrollmark_core::ContentTree;

use crate::tree::{LayoutNodeId, LayoutTree};

/// The laid out subtree under a scroll container's content root
///
/// Offsets are measured from the top edge of `root`, which is where the
/// scroll container's offset 0 points.
#[derive(Clone, Copy)]
pub struct ScrollContent<'a> {
    tree: &'a LayoutTree,
    root: LayoutNodeId,
}

impl<'a> ScrollContent<'a> {
    pub fn new(tree: &'a LayoutTree, root: LayoutNodeId) -> Self {
        Self { tree, root }
    }

    /// The underlying layout tree
    pub fn tree(&self) -> &'a LayoutTree {
        self.tree
    }

    /// The content root
    pub fn content_root(&self) -> LayoutNodeId {
        self.root
    }
}

impl ContentTree for ScrollContent<'_> {
    type Node = LayoutNodeId;

    fn root(&self) -> Option<LayoutNodeId> {
        self.tree.node_exists(self.root).then_some(self.root)
    }

    fn children(&self, node: LayoutNodeId) -> Vec<LayoutNodeId> {
        self.tree.children(node)
    }

    fn parent(&self, node: LayoutNodeId) -> Option<LayoutNodeId> {
        if node == self.root {
            return None;
        }
        self.tree.parent(node)
    }

    fn key(&self, node: LayoutNodeId) -> Option<&str> {
        self.tree.key(node)
    }

    fn extent(&self, node: LayoutNodeId) -> Option<f32> {
        self.tree.height(node)
    }

    fn offset_to_reveal(&self, node: LayoutNodeId) -> Option<f32> {
        self.tree.offset_within(node, self.root)
    }

    fn line_height(&self, node: LayoutNodeId) -> Option<f32> {
        self.tree.text_context(node).map(|ctx| ctx.line_height_px())
    }

    fn text_content(&self, node: LayoutNodeId) -> Option<String> {
        self.tree.text_context(node).map(|ctx| ctx.content.clone())
    }

    fn child_count(&self, node: LayoutNodeId) -> usize {
        self.tree.child_count(node)
    }

    fn find_by_key(&self, key: &str) -> Option<LayoutNodeId> {
        let node = self.tree.find_by_key(key)?;
        self.offset_to_reveal(node).map(|_| node)
    }
}
