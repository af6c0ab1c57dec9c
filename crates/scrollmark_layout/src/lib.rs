//! Scrollmark Layout
//!
//! A concrete host for [`scrollmark_core`]: a flexbox [`LayoutTree`] powered
//! by Taffy, exposed to the scanner through [`ScrollContent`], and a
//! [`ScrollContainer`] the controller can jump.
//!
//! Text nodes are measured with a [`TextMeasurer`], so changing the layout
//! width reflows paragraphs and changes their height, which is exactly the
//! situation anchor restore exists for.
//!
//! # Example
//!
//! ```rust
//! use scrollmark_core::PositionController;
//! use scrollmark_layout::taffy::prelude::*;
//! use scrollmark_layout::{LayoutTree, ScrollContainer, ScrollContent, TextMeasureContext};
//!
//! let mut tree = LayoutTree::new();
//! let root = tree
//!     .create_node(Style {
//!         flex_direction: FlexDirection::Column,
//!         size: Size {
//!             width: Dimension::Length(320.0),
//!             height: Dimension::Auto,
//!         },
//!         ..Default::default()
//!     })
//!     .unwrap();
//! for i in 0..20 {
//!     let text = TextMeasureContext::new(format!("Paragraph {i} ").repeat(12), 16.0);
//!     let node = tree.create_text_node(Style::default(), text).unwrap();
//!     tree.add_child(root, node).unwrap();
//! }
//! tree.compute_layout(root, 320.0).unwrap();
//!
//! let mut scroll = ScrollContainer::new(480.0);
//! scroll.sync_content(&tree, root);
//! scroll.apply_scroll_delta(600.0);
//!
//! let mut controller = PositionController::default();
//! let anchor = controller
//!     .capture(&ScrollContent::new(&tree, root), &scroll)
//!     .unwrap();
//! assert!(anchor.is_anchored());
//! ```

pub mod content;
pub mod error;
pub mod scroll;
pub mod text_measure;
pub mod tree;


pub use content::ScrollContent;
pub use error::{LayoutError, Result};
pub use scroll::ScrollContainer;
pub use text_measure::{EstimatedTextMeasurer, TextLayoutOptions, TextMeasurer, TextMetrics};
pub use tree::{LayoutNodeId, LayoutTree, TextMeasureContext};

// Re-export taffy for style construction
pub use taffy;
