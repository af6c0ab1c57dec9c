//! Scrollmark Core
//!
//! Keeps a scroll viewport on the same content across layout changes.
//!
//! Instead of a raw pixel offset, the viewport position is tracked as an
//! anchor: *which* leaf block sits at the top of the viewport and *how far*
//! into it the viewport has scrolled. After a relayout (rotation, resize,
//! font change) the anchor is resolved against the new geometry, and text
//! blocks are snapped so no line is cut in half.
//!
//! - **Tree Scanner**: collapses any [`ContentTree`] into sorted
//!   [`PositionalRecord`]s, merging padding wrappers into their leaf
//! - **Position Engine**: [`capture`] and [`resolve_target`], plus
//!   [`snap_to_line`]
//! - **Controller**: [`PositionController`] wires both to debounced scroll
//!   events, layout-change notifications and a [`ScrollHost`]
//!
//! # Example
//!
//! ```rust
//! use scrollmark_core::{capture, resolve_target, PositionalRecord};
//!
//! let before = vec![
//!     PositionalRecord::block(0.0, 100.0),
//!     PositionalRecord::block(100.0, 100.0),
//! ];
//! let anchor = capture(150.0, &before);
//!
//! // Same content, twice as tall after relayout
//! let after = vec![
//!     PositionalRecord::block(0.0, 200.0),
//!     PositionalRecord::block(200.0, 200.0),
//! ];
//! assert_eq!(resolve_target(anchor, &after), Some(300.0));
//! ```

pub mod config;
pub mod controller;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod host;
pub mod position;
pub mod record;
pub mod scanner;
pub mod search;
pub mod tree;

pub use config::AnchorConfig;
pub use controller::{PositionCallback, PositionController};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use engine::{capture, resolve_target, snap_to_line};
pub use error::{Result, ScrollmarkError};
pub use host::ScrollHost;
pub use position::TrackedPosition;
pub use record::{PositionalRecord, TextGeometry};
pub use scanner::{merged_ancestor, scan, ScanOptions};
pub use search::find_text_instance;
pub use tree::{leaves, ContentTree, FilterPolicy, Leaves};
