//! Layout error types

use thiserror::Error;

use crate::tree::LayoutNodeId;

/// Errors raised while building or laying out a content tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The underlying flexbox engine rejected an operation
    #[error("Layout engine error: {0}")]
    Engine(String),

    /// A node id that is not (or no longer) part of the tree
    #[error("Unknown layout node: {0:?}")]
    UnknownNode(LayoutNodeId),
}

impl From<taffy::TaffyError> for LayoutError {
    fn from(err: taffy::TaffyError) -> Self {
        LayoutError::Engine(err.to_string())
    }
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
