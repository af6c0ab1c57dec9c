//! Text measurement for layout
//!
//! Provides a trait for measuring text dimensions during layout, so text
//! nodes reflow (and change height) when the available width changes.

/// Text layout options that affect measurement
#[derive(Debug, Clone)]
pub struct TextLayoutOptions {
    /// Line height multiplier (1.0 = font size, 1.5 = 150%)
    pub line_height: f32,
    /// Maximum width for wrapping (None = no wrapping)
    pub max_width: Option<f32>,
}

impl Default for TextLayoutOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutOptions {
    /// Create default options
    pub fn new() -> Self {
        Self {
            line_height: 1.2,
            max_width: None,
        }
    }

    /// Set line height multiplier
    pub fn with_line_height(mut self, height: f32) -> Self {
        self.line_height = height;
        self
    }

    /// Set max width for wrapping
    pub fn with_max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Text measurement result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels (line height times line count)
    pub height: f32,
    /// Height of a single line in pixels
    pub line_height: f32,
    /// Number of lines (1 for single-line text)
    pub line_count: u32,
}

/// Trait for measuring text dimensions
///
/// Implement this to back layout with a real font system. Without one,
/// [`EstimatedTextMeasurer`] is used.
pub trait TextMeasurer: Send + Sync {
    /// Measure a text string with full layout options
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics;
}

/// A text measurer that uses per-character estimates
///
/// Every character is `0.55 * font_size` wide; lines wrap when the running
/// width exceeds `max_width`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl EstimatedTextMeasurer {
    /// Estimated advance of one character
    pub fn char_width(font_size: f32) -> f32 {
        font_size * 0.55
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_with_options(
        &self,
        text: &str,
        font_size: f32,
        options: &TextLayoutOptions,
    ) -> TextMetrics {
        let char_count = text.chars().count() as f32;
        let char_width = Self::char_width(font_size);
        let total_width = char_count * char_width;

        let (width, line_count) = match options.max_width {
            // Min-content: one word per line
            Some(max_width) if max_width <= 0.0 => {
                let longest = text
                    .split_whitespace()
                    .map(|word| word.chars().count())
                    .max()
                    .unwrap_or(0) as f32;
                let words = text.split_whitespace().count().max(1) as u32;
                (longest * char_width, words)
            }
            Some(max_width) if total_width > max_width => {
                let lines = (total_width / max_width).ceil() as u32;
                (max_width, lines.max(1))
            }
            _ => (total_width, 1),
        };

        let line_height = font_size * options.line_height;

        TextMetrics {
            width,
            height: line_height * line_count as f32,
            line_height,
            line_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let metrics = EstimatedTextMeasurer.measure_with_options(
            "hello",
            16.0,
            &TextLayoutOptions::new().with_line_height(1.25),
        );
        assert_eq!(metrics.line_count, 1);
        assert_eq!(metrics.line_height, 20.0);
        assert_eq!(metrics.height, 20.0);
        assert!((metrics.width - 44.0).abs() < 1e-4);
    }

    #[test]
    fn test_wraps_to_width() {
        // 100 chars * 8.8px = 880px
        let text = "x".repeat(100);
        let options = TextLayoutOptions::new()
            .with_line_height(1.25)
            .with_max_width(400.0);
        let metrics = EstimatedTextMeasurer.measure_with_options(&text, 16.0, &options);
        assert_eq!(metrics.line_count, 3);
        assert_eq!(metrics.height, 60.0);
        assert_eq!(metrics.width, 400.0);
    }

    #[test]
    fn test_wider_layout_needs_fewer_lines() {
        let text = "lorem ipsum ".repeat(20);
        let narrow = EstimatedTextMeasurer
            .measure_with_options(&text, 16.0, &TextLayoutOptions::new().with_max_width(300.0));
        let wide = EstimatedTextMeasurer
            .measure_with_options(&text, 16.0, &TextLayoutOptions::new().with_max_width(900.0));
        assert!(wide.line_count < narrow.line_count);
        assert!(wide.height < narrow.height);
    }

    #[test]
    fn test_min_content_breaks_every_word() {
        let metrics = EstimatedTextMeasurer.measure_with_options(
            "one three five",
            10.0,
            &TextLayoutOptions::new().with_max_width(0.0),
        );
        assert_eq!(metrics.line_count, 3);
        assert!((metrics.width - 5.0 * 5.5).abs() < 1e-4);
    }
}
