//! Scroll host abstraction

/// The scrollable viewport the controller repositions
pub trait ScrollHost {
    /// Current scroll offset along the vertical axis
    fn current_offset(&self) -> f32;

    /// Largest valid scroll offset (content extent minus viewport extent)
    fn max_extent(&self) -> f32;

    /// Whether the viewport is attached and has a resolved size
    fn has_geometry(&self) -> bool;

    /// Jump to `offset` immediately, without animation and without
    /// triggering layout
    fn jump_to(&mut self, offset: f32);
}
