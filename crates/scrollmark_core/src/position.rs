//! The persistent scroll anchor

use serde::{Deserialize, Serialize};

/// Which record the viewport is anchored to, and how deep into it
///
/// `index` is the record's ordinal in the last scan, `-1` when there is no
/// valid anchor. `alignment` is the viewport's penetration into the record
/// divided by the record's size, so restoring against a resized record
/// scales the offset with it.
///
/// Both fields are plain data so callers can persist them and seed a new
/// controller with them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedPosition {
    pub index: i32,
    pub alignment: f32,
}

impl TrackedPosition {
    /// No anchor available
    pub const NONE: Self = Self {
        index: -1,
        alignment: 0.0,
    };

    pub fn new(index: i32, alignment: f32) -> Self {
        Self { index, alignment }
    }

    /// Whether this position refers to a record at all
    pub fn is_anchored(&self) -> bool {
        self.index >= 0
    }

    /// The anchored record index, if any
    pub fn record_index(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }
}

impl Default for TrackedPosition {
    fn default() -> Self {
        Self::NONE
    }
}
