//! Vertical scroll container
//!
//! Holds the viewport state a [`PositionController`] repositions. Offsets are
//! positive and grow downward: 0 shows the top of the content,
//! [`max_offset`](ScrollContainer::max_offset) shows its bottom edge.
//!
//! [`PositionController`]: scrollmark_core::PositionController

use scrollmark_core::ScrollHost;
use tracing::trace;

use crate::tree::{LayoutNodeId, LayoutTree};

/// Scroll state for one vertical viewport
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollContainer {
    /// Current scroll offset
    pub offset_y: f32,
    /// Height of the visible viewport
    pub viewport_height: f32,
    /// Total height of the scrolled content
    pub content_height: f32,
    /// Whether the viewport is mounted and sized
    attached: bool,
}

impl ScrollContainer {
    /// Create an attached viewport of the given height with no content yet
    pub fn new(viewport_height: f32) -> Self {
        Self {
            offset_y: 0.0,
            viewport_height,
            content_height: 0.0,
            attached: true,
        }
    }

    /// Largest offset that keeps the viewport filled
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Scroll by a delta, clamped to the content
    ///
    /// Returns the offset actually applied.
    pub fn apply_scroll_delta(&mut self, delta: f32) -> f32 {
        let before = self.offset_y;
        self.offset_y = (self.offset_y + delta).clamp(0.0, self.max_offset());
        self.offset_y - before
    }

    /// Pull the content height from a laid out tree and re-clamp the offset
    pub fn sync_content(&mut self, tree: &LayoutTree, root: LayoutNodeId) {
        self.content_height = tree.height(root).unwrap_or(0.0);
        self.offset_y = self.offset_y.clamp(0.0, self.max_offset());
    }

    /// Resize the viewport
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
        self.attached = true;
        self.offset_y = self.offset_y.clamp(0.0, self.max_offset());
    }

    /// Unmount the viewport; it reports no geometry until resized again
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Check if scrolled to the top
    pub fn is_at_top(&self) -> bool {
        self.offset_y <= 0.0
    }

    /// Check if scrolled to the bottom
    pub fn is_at_bottom(&self) -> bool {
        self.offset_y >= self.max_offset() - 0.5
    }

    /// Scroll progress (0.0 = top, 1.0 = bottom)
    pub fn scroll_progress(&self) -> f32 {
        let max = self.max_offset();
        if max > 0.0 {
            (self.offset_y / max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl ScrollHost for ScrollContainer {
    fn current_offset(&self) -> f32 {
        self.offset_y
    }

    fn max_extent(&self) -> f32 {
        self.max_offset()
    }

    fn has_geometry(&self) -> bool {
        self.attached && self.viewport_height > 0.0
    }

    fn jump_to(&mut self, offset: f32) {
        let clamped = offset.clamp(0.0, self.max_offset());
        if clamped != offset {
            trace!(offset, clamped, "jump clamped to content");
        }
        self.offset_y = clamped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ScrollContainer {
        ScrollContainer {
            content_height: 1000.0,
            ..ScrollContainer::new(400.0)
        }
    }

    #[test]
    fn test_max_offset() {
        assert_eq!(container().max_offset(), 600.0);
        assert_eq!(ScrollContainer::new(400.0).max_offset(), 0.0);
    }

    #[test]
    fn test_scroll_delta_clamps() {
        let mut scroll = container();
        assert_eq!(scroll.apply_scroll_delta(250.0), 250.0);
        assert_eq!(scroll.apply_scroll_delta(1000.0), 350.0);
        assert!(scroll.is_at_bottom());
        assert_eq!(scroll.apply_scroll_delta(-2000.0), -600.0);
        assert!(scroll.is_at_top());
    }

    #[test]
    fn test_jump_clamps_to_content() {
        let mut scroll = container();
        scroll.jump_to(900.0);
        assert_eq!(scroll.current_offset(), 600.0);
        scroll.jump_to(-10.0);
        assert_eq!(scroll.current_offset(), 0.0);
        scroll.jump_to(300.0);
        assert_eq!(scroll.scroll_progress(), 0.5);
    }

    #[test]
    fn test_geometry() {
        let mut scroll = container();
        assert!(scroll.has_geometry());
        scroll.detach();
        assert!(!scroll.has_geometry());
        scroll.set_viewport_height(200.0);
        assert!(scroll.has_geometry());
        assert!(!ScrollContainer::default().has_geometry());
    }

    #[test]
    fn test_shrinking_content_reclamps() {
        let mut scroll = container();
        scroll.jump_to(600.0);
        scroll.set_viewport_height(800.0);
        assert_eq!(scroll.offset_y, 200.0);
    }
}
