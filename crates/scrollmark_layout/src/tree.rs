//! Layout tree management

use std::collections::HashMap;
use std::sync::Arc;

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use taffy::prelude::*;
use tracing::warn;

use crate::error::{LayoutError, Result};
use crate::text_measure::{EstimatedTextMeasurer, TextLayoutOptions, TextMeasurer};

new_key_type! {
    pub struct LayoutNodeId;
}

/// Context stored with text nodes for measurement during layout
///
/// Taffy calls back with the actual available width, so wrapped text gets
/// its real multi-line height.
#[derive(Clone, Debug)]
pub struct TextMeasureContext {
    /// The text content to measure
    pub content: String,
    /// Font size in pixels
    pub font_size: f32,
    /// Line height multiplier
    pub line_height: f32,
}

impl TextMeasureContext {
    pub fn new(content: impl Into<String>, font_size: f32) -> Self {
        Self {
            content: content.into(),
            font_size,
            line_height: TextLayoutOptions::new().line_height,
        }
    }

    /// Set line height multiplier
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Height of one line in pixels
    pub fn line_height_px(&self) -> f32 {
        self.font_size * self.line_height
    }
}

/// Measure function for text nodes during Taffy layout
fn text_measure_function(
    measurer: &dyn TextMeasurer,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    node_context: Option<&mut TextMeasureContext>,
) -> Size<f32> {
    let width = known_dimensions.width;
    let height = known_dimensions.height;

    if let (Some(w), Some(h)) = (width, height) {
        return Size {
            width: w,
            height: h,
        };
    }

    // Not a text node
    let Some(ctx) = node_context else {
        return Size::ZERO;
    };

    let mut options = TextLayoutOptions::new().with_line_height(ctx.line_height);
    let max_width = match available_space.width {
        AvailableSpace::Definite(w) => Some(w),
        AvailableSpace::MaxContent => None,
        AvailableSpace::MinContent => Some(0.0),
    };
    options.max_width = width.or(max_width);

    let metrics = measurer.measure_with_options(&ctx.content, ctx.font_size, &options);

    Size {
        width: width.unwrap_or(metrics.width),
        height: height.unwrap_or(metrics.height),
    }
}

/// Flexbox layout tree with stable node ids, parent links and key lookup
pub struct LayoutTree {
    taffy: TaffyTree<TextMeasureContext>,
    node_map: SlotMap<LayoutNodeId, NodeId>,
    /// Reverse mapping from Taffy NodeId to our LayoutNodeId
    reverse_map: HashMap<NodeId, LayoutNodeId>,
    /// Identity tags
    keys: SecondaryMap<LayoutNodeId, String>,
    /// Key → node lookup
    key_index: HashMap<String, LayoutNodeId>,
    measurer: Arc<dyn TextMeasurer>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::with_measurer(Arc::new(EstimatedTextMeasurer))
    }

    /// Create a tree that measures text with `measurer`
    pub fn with_measurer(measurer: Arc<dyn TextMeasurer>) -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
            reverse_map: HashMap::new(),
            keys: SecondaryMap::new(),
            key_index: HashMap::new(),
            measurer,
        }
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Result<LayoutNodeId> {
        let taffy_node = self.taffy.new_leaf(style)?;
        Ok(self.register(taffy_node))
    }

    /// Create a new text layout node with measure context
    pub fn create_text_node(
        &mut self,
        style: Style,
        context: TextMeasureContext,
    ) -> Result<LayoutNodeId> {
        let taffy_node = self.taffy.new_leaf_with_context(style, context)?;
        Ok(self.register(taffy_node))
    }

    fn register(&mut self, taffy_node: NodeId) -> LayoutNodeId {
        let id = self.node_map.insert(taffy_node);
        self.reverse_map.insert(taffy_node, id);
        id
    }

    fn taffy_node(&self, id: LayoutNodeId) -> Result<NodeId> {
        self.node_map
            .get(id)
            .copied()
            .ok_or(LayoutError::UnknownNode(id))
    }

    /// Set the style for a node
    pub fn set_style(&mut self, id: LayoutNodeId, style: Style) -> Result<()> {
        let taffy_node = self.taffy_node(id)?;
        self.taffy.set_style(taffy_node, style)?;
        Ok(())
    }

    /// Replace the text of a text node, marking it for re-measurement
    pub fn set_text(&mut self, id: LayoutNodeId, content: impl Into<String>) -> Result<()> {
        let taffy_node = self.taffy_node(id)?;
        let Some(ctx) = self.taffy.get_node_context_mut(taffy_node) else {
            return Err(LayoutError::UnknownNode(id));
        };
        ctx.content = content.into();
        self.taffy.mark_dirty(taffy_node)?;
        Ok(())
    }

    /// Tag a node with an identity key
    ///
    /// Keys are expected to be unique; re-using one moves it (last wins).
    pub fn set_key(&mut self, id: LayoutNodeId, key: impl Into<String>) {
        let key = key.into();
        if !self.node_map.contains_key(id) {
            return;
        }
        if let Some(&previous) = self.key_index.get(&key) {
            if previous != id {
                warn!(key = key.as_str(), "Duplicate layout key registered");
                self.keys.remove(previous);
            }
        }
        if let Some(old) = self.keys.insert(id, key.clone()) {
            self.key_index.remove(&old);
        }
        self.key_index.insert(key, id);
    }

    /// Identity key of a node
    pub fn key(&self, id: LayoutNodeId) -> Option<&str> {
        self.keys.get(id).map(String::as_str)
    }

    /// Look up a node by identity key
    pub fn find_by_key(&self, key: &str) -> Option<LayoutNodeId> {
        self.key_index.get(key).copied()
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) -> Result<()> {
        let parent_node = self.taffy_node(parent)?;
        let child_node = self.taffy_node(child)?;
        self.taffy.add_child(parent_node, child_node)?;
        Ok(())
    }

    /// Compute layout for a tree rooted at the given node
    ///
    /// Width is constrained to `width`; height grows with content.
    pub fn compute_layout(&mut self, root: LayoutNodeId, width: f32) -> Result<()> {
        let taffy_node = self.taffy_node(root)?;
        let measurer = Arc::clone(&self.measurer);
        let available = Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::MaxContent,
        };
        self.taffy.compute_layout_with_measure(
            taffy_node,
            available,
            |known, available, _node_id, ctx, _style| {
                text_measure_function(measurer.as_ref(), known, available, ctx)
            },
        )?;
        Ok(())
    }

    /// Get the computed layout for a node
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Text context of a text node
    pub fn text_context(&self, id: LayoutNodeId) -> Option<&TextMeasureContext> {
        let &taffy_node = self.node_map.get(id)?;
        self.taffy.get_node_context(taffy_node)
    }

    /// Check if a node exists in this tree
    pub fn node_exists(&self, id: LayoutNodeId) -> bool {
        self.node_map.contains_key(id)
    }

    /// Remove a node
    pub fn remove_node(&mut self, id: LayoutNodeId) {
        if let Some(taffy_node) = self.node_map.remove(id) {
            self.reverse_map.remove(&taffy_node);
            let _ = self.taffy.remove(taffy_node);
        }
        if let Some(key) = self.keys.remove(id) {
            self.key_index.remove(&key);
        }
    }

    /// Remove a node and all its descendants
    pub fn remove_subtree(&mut self, id: LayoutNodeId) {
        for child in self.children(id) {
            self.remove_subtree(child);
        }
        self.remove_node(id);
    }

    /// Get children of a layout node
    pub fn children(&self, parent: LayoutNodeId) -> Vec<LayoutNodeId> {
        let Some(&taffy_node) = self.node_map.get(parent) else {
            return Vec::new();
        };

        let Ok(children) = self.taffy.children(taffy_node) else {
            return Vec::new();
        };

        children
            .iter()
            .filter_map(|child_taffy| self.reverse_map.get(child_taffy).copied())
            .collect()
    }

    /// Number of children of a layout node
    pub fn child_count(&self, parent: LayoutNodeId) -> usize {
        self.node_map
            .get(parent)
            .map_or(0, |&taffy_node| self.taffy.child_count(taffy_node))
    }

    /// Parent of a layout node
    pub fn parent(&self, id: LayoutNodeId) -> Option<LayoutNodeId> {
        let &taffy_node = self.node_map.get(id)?;
        let parent = self.taffy.parent(taffy_node)?;
        self.reverse_map.get(&parent).copied()
    }

    /// Vertical position of `id`'s top edge relative to `ancestor`'s top edge
    ///
    /// `None` when `id` is not a descendant of `ancestor` (or is detached).
    pub fn offset_within(&self, id: LayoutNodeId, ancestor: LayoutNodeId) -> Option<f32> {
        let mut offset = 0.0;
        let mut current = id;
        while current != ancestor {
            offset += self.get_layout(current)?.location.y;
            current = self.parent(current)?;
        }
        Some(offset)
    }

    /// Get the content height of a laid out node
    pub fn height(&self, id: LayoutNodeId) -> Option<f32> {
        self.get_layout(id).map(|layout| layout.size.height)
    }

    /// Get the number of nodes in the tree
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}
