//! Positional records produced by a tree scan

/// Text-specific geometry of a record, measured on the text node itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGeometry {
    /// Height of one line in the text's font metrics
    pub line_height: f32,
    /// Height of the text box (excludes any merged padding)
    pub text_extent: f32,
    /// Offset that brings the text box's top edge to the viewport start
    pub text_reveal_offset: f32,
}

impl TextGeometry {
    /// Offset at which the last line of text ends
    pub fn end_offset(&self) -> f32 {
        self.text_reveal_offset + self.text_extent
    }
}

/// One visually distinct leaf block, as seen by the position engine
///
/// Records are rebuilt on every scan and are never retained across
/// layout passes.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalRecord {
    /// Offset that brings the block's top edge to the viewport start
    pub reveal_offset: f32,
    /// Height of the merged block
    pub size: f32,
    /// Present when the leaf is a text node
    pub text: Option<TextGeometry>,
    /// Plain text content, only collected for text-instance searches
    pub content: Option<String>,
}

impl PositionalRecord {
    /// Create a non-text record
    pub fn block(reveal_offset: f32, size: f32) -> Self {
        Self {
            reveal_offset,
            size,
            text: None,
            content: None,
        }
    }

    /// Create a text record
    pub fn text(reveal_offset: f32, size: f32, text: TextGeometry) -> Self {
        Self {
            reveal_offset,
            size,
            text: Some(text),
            content: None,
        }
    }

    /// Attach plain text content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether this record came from a text node
    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }

    /// Offset just past the bottom edge of the block
    pub fn end_offset(&self) -> f32 {
        self.reveal_offset + self.size
    }
}
