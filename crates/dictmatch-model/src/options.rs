//! Configuration options for a reconciliation run.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Default score a column must exceed to count as matched.
pub const DEFAULT_MATCH_THRESHOLD: u8 = 80;

/// Default score required for a table name lookup (exact after normalization).
pub const DEFAULT_LOOKUP_THRESHOLD: u8 = 100;

/// Name cleanup applied to both sides before any comparison.
///
/// Empty strings behave the same as unset fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Prefix stripped once from the start of a name (e.g. `tbl_`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Suffix stripped once from the end of a name (e.g. `_v2`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Character sequence deleted everywhere in a name (e.g. `_`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_char: Option<String>,
}

impl NormalizationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = non_empty(prefix.into());
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = non_empty(suffix.into());
        self
    }

    #[must_use]
    pub fn with_reserved_char(mut self, reserved: impl Into<String>) -> Self {
        self.reserved_char = non_empty(reserved.into());
        self
    }

    /// Configured prefix, ignoring empty values.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Configured suffix, ignoring empty values.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref().filter(|s| !s.is_empty())
    }

    /// Configured reserved character, ignoring empty values.
    pub fn reserved_char(&self) -> Option<&str> {
        self.reserved_char.as_deref().filter(|r| !r.is_empty())
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// What happens to a bidder whose best candidate is already held at a higher score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutbidPolicy {
    /// Stop bidding; the column is reported as outbid.
    #[default]
    Drop,
    /// Discard that candidate and bid again on the next best one.
    Rebid,
}

impl OutbidPolicy {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Rebid => "rebid",
        }
    }
}

/// Options controlling column reconciliation and table lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Prefix/suffix/reserved character cleanup.
    #[serde(default)]
    pub normalization: NormalizationConfig,
    /// A column is matched only when its score is strictly greater than this.
    #[serde(default = "default_match_threshold")]
    pub match_threshold: u8,
    /// Minimum score for a table name lookup; 100 means exact after normalization.
    #[serde(default = "default_lookup_threshold")]
    pub lookup_threshold: u8,
    /// Handling of bidders that lose to a stronger existing claim.
    #[serde(default)]
    pub outbid_policy: OutbidPolicy,
}

fn default_match_threshold() -> u8 {
    DEFAULT_MATCH_THRESHOLD
}

fn default_lookup_threshold() -> u8 {
    DEFAULT_LOOKUP_THRESHOLD
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            normalization: NormalizationConfig::default(),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            lookup_threshold: DEFAULT_LOOKUP_THRESHOLD,
            outbid_policy: OutbidPolicy::default(),
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_normalization(mut self, normalization: NormalizationConfig) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn with_match_threshold(mut self, threshold: u8) -> Self {
        self.match_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_lookup_threshold(mut self, threshold: u8) -> Self {
        self.lookup_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_outbid_policy(mut self, policy: OutbidPolicy) -> Self {
        self.outbid_policy = policy;
        self
    }

    /// Checks that both thresholds lie on the 0-100 score scale.
    pub fn validate(&self) -> Result<()> {
        check_threshold("match_threshold", self.match_threshold)?;
        check_threshold("lookup_threshold", self.lookup_threshold)
    }
}

fn check_threshold(name: &'static str, value: u8) -> Result<()> {
    if value > 100 {
        return Err(ModelError::ThresholdOutOfRange { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_are_unset() {
        let config = NormalizationConfig::new()
            .with_prefix("")
            .with_suffix("_v2")
            .with_reserved_char("");
        assert_eq!(config.prefix(), None);
        assert_eq!(config.suffix(), Some("_v2"));
        assert_eq!(config.reserved_char(), None);
    }

    #[test]
    fn defaults_match_reference_thresholds() {
        let options = MatchOptions::default();
        assert_eq!(options.match_threshold, 80);
        assert_eq!(options.lookup_threshold, 100);
        assert_eq!(options.outbid_policy, OutbidPolicy::Drop);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_threshold_above_hundred() {
        let options = MatchOptions::default().with_match_threshold(101);
        let err = options.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "match_threshold must be between 0 and 100, got 101"
        );
    }

    #[test]
    fn deserializes_partial_options() {
        let options: MatchOptions =
            serde_json::from_str(r#"{"outbid_policy":"rebid"}"#).expect("parse options");
        assert_eq!(options.match_threshold, DEFAULT_MATCH_THRESHOLD);
        assert_eq!(options.outbid_policy, OutbidPolicy::Rebid);
    }
}
