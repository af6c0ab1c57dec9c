//! Controller configuration
//!
//! Built in code with the builder methods, or loaded from TOML:
//!
//! ```toml
//! initial_index = 4
//! initial_alignment = 0.35
//! debounce_ms = 150
//! trigger_initial_restore = true
//! ignored_keys = ["toolbar", "footer"]
//! ```
//!
//! `only_children_of = "article"` may be given instead of `ignored_keys`,
//! never together with it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::error::{Result, ScrollmarkError};
use crate::position::TrackedPosition;
use crate::tree::FilterPolicy;

/// Configuration for a [`PositionController`](crate::PositionController)
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorConfig {
    /// Seed anchor index (-1 for none)
    pub initial_index: i32,
    /// Seed anchor alignment
    pub initial_alignment: f32,
    /// Which part of the content tree is scanned
    pub filter: FilterPolicy,
    /// Quiet window before a scroll is captured
    pub debounce: Duration,
    /// Restore the seed anchor after the first completed layout
    pub trigger_initial_restore: bool,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            initial_index: TrackedPosition::NONE.index,
            initial_alignment: TrackedPosition::NONE.alignment,
            filter: FilterPolicy::default(),
            debounce: DEFAULT_DEBOUNCE,
            trigger_initial_restore: false,
        }
    }
}

impl AnchorConfig {
    /// Seed the anchor from a persisted position
    pub fn with_initial(mut self, position: TrackedPosition) -> Self {
        self.initial_index = position.index;
        self.initial_alignment = position.alignment;
        self
    }

    /// Set the debounce window
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Scan only the subtree tagged `key`
    pub fn only_children_of(mut self, key: impl Into<String>) -> Self {
        self.filter = FilterPolicy::only_children_of(key);
        self
    }

    /// Skip nodes tagged with any of `keys`
    pub fn ignore_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = FilterPolicy::ignore_keys(keys);
        self
    }

    /// Restore the seed anchor after the first completed layout
    pub fn trigger_initial_restore(mut self, enabled: bool) -> Self {
        self.trigger_initial_restore = enabled;
        self
    }

    /// The seed anchor
    pub fn initial_position(&self) -> TrackedPosition {
        TrackedPosition::new(self.initial_index, self.initial_alignment)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let raw: RawAnchorConfig = toml::from_str(source)?;
        raw.try_into()
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(&RawAnchorConfig::from(self))
            .map_err(|err| ScrollmarkError::Config(err.to_string()))
    }

    /// Check the seed values
    pub fn validate(&self) -> Result<()> {
        if self.initial_index < -1 {
            return Err(ScrollmarkError::Config(format!(
                "initial_index must be -1 or a record index, got {}",
                self.initial_index
            )));
        }
        if !self.initial_alignment.is_finite() {
            return Err(ScrollmarkError::Config(
                "initial_alignment must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// On-disk shape of [`AnchorConfig`]
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawAnchorConfig {
    initial_index: Option<i32>,
    initial_alignment: Option<f32>,
    debounce_ms: Option<u64>,
    trigger_initial_restore: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    only_children_of: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ignored_keys: Option<Vec<String>>,
}

impl TryFrom<RawAnchorConfig> for AnchorConfig {
    type Error = ScrollmarkError;

    fn try_from(raw: RawAnchorConfig) -> Result<Self> {
        let defaults = AnchorConfig::default();

        let filter = match (raw.only_children_of, raw.ignored_keys) {
            (Some(_), Some(_)) => {
                return Err(ScrollmarkError::Config(
                    "only_children_of and ignored_keys are mutually exclusive".to_string(),
                ));
            }
            (Some(key), None) => FilterPolicy::OnlyChildrenOf(key),
            (None, Some(keys)) => FilterPolicy::ignore_keys(keys),
            (None, None) => defaults.filter,
        };

        let config = AnchorConfig {
            initial_index: raw.initial_index.unwrap_or(defaults.initial_index),
            initial_alignment: raw.initial_alignment.unwrap_or(defaults.initial_alignment),
            filter,
            debounce: raw
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
            trigger_initial_restore: raw
                .trigger_initial_restore
                .unwrap_or(defaults.trigger_initial_restore),
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<&AnchorConfig> for RawAnchorConfig {
    fn from(config: &AnchorConfig) -> Self {
        let (only_children_of, ignored_keys) = match &config.filter {
            FilterPolicy::OnlyChildrenOf(key) => (Some(key.clone()), None),
            FilterPolicy::IgnoreKeys(keys) => {
                let mut keys: Vec<String> = keys.iter().cloned().collect();
                keys.sort();
                (None, Some(keys))
            }
        };
        RawAnchorConfig {
            initial_index: Some(config.initial_index),
            initial_alignment: Some(config.initial_alignment),
            debounce_ms: Some(config.debounce.as_millis() as u64),
            trigger_initial_restore: Some(config.trigger_initial_restore),
            only_children_of,
            ignored_keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnchorConfig::default();
        assert_eq!(config.initial_position(), TrackedPosition::NONE);
        assert_eq!(config.debounce, DEFAULT_DEBOUNCE);
        assert_eq!(config.filter, FilterPolicy::default());
        assert!(!config.trigger_initial_restore);
    }

    #[test]
    fn test_from_toml() {
        let config = AnchorConfig::from_toml_str(
            r#"
            initial_index = 4
            initial_alignment = 0.35
            debounce_ms = 150
            trigger_initial_restore = true
            ignored_keys = ["toolbar", "footer"]
            "#,
        )
        .unwrap();

        assert_eq!(config.initial_position(), TrackedPosition::new(4, 0.35));
        assert_eq!(config.debounce, Duration::from_millis(150));
        assert!(config.trigger_initial_restore);
        assert!(config.filter.is_ignored(Some("footer")));
        assert!(!config.filter.is_ignored(Some("body")));
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            AnchorConfig::from_toml_str("").unwrap(),
            AnchorConfig::default()
        );
    }

    #[test]
    fn test_filters_are_exclusive() {
        let err = AnchorConfig::from_toml_str(
            r#"
            only_children_of = "article"
            ignored_keys = ["footer"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ScrollmarkError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_seed() {
        let err = AnchorConfig::from_toml_str("initial_index = -3").unwrap_err();
        assert!(matches!(err, ScrollmarkError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(AnchorConfig::from_toml_str("debounce = 10").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnchorConfig::default()
            .with_initial(TrackedPosition::new(2, 0.5))
            .with_debounce(Duration::from_millis(250))
            .only_children_of("article")
            .trigger_initial_restore(true);

        let text = config.to_toml_string().unwrap();
        assert_eq!(AnchorConfig::from_toml_str(&text).unwrap(), config);
    }
}
