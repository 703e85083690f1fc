//! Outcome types of a column reconciliation run.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A catalog column confidently assigned to a dictionary column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMatch {
    /// Dictionary column the catalog column was assigned to.
    pub dictionary: String,
    /// Token-sort similarity (0-100).
    pub score: u8,
}

/// Why a catalog column ended up without a confident assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnmatchedReason {
    /// Held the dictionary column, but the score did not exceed the threshold.
    BelowThreshold { dictionary: String, score: u8 },
    /// Its best candidate was already held at a higher score.
    Outbid {
        dictionary: String,
        score: u8,
        held_score: u8,
    },
    /// Tied for a dictionary column that a stronger bid later took.
    TieSuperseded { dictionary: String, score: u8 },
    /// Tied with the holder of a dictionary column at a score that does not
    /// exceed the threshold.
    TiedBelowThreshold { dictionary: String, score: u8 },
    /// Every candidate was taken away by evictions, or there were none.
    NoCandidateRemaining,
}

impl UnmatchedReason {
    /// Dictionary column the reason refers to, if any.
    pub fn dictionary(&self) -> Option<&str> {
        match self {
            Self::BelowThreshold { dictionary, .. }
            | Self::Outbid { dictionary, .. }
            | Self::TieSuperseded { dictionary, .. }
            | Self::TiedBelowThreshold { dictionary, .. } => Some(dictionary),
            Self::NoCandidateRemaining => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::BelowThreshold { .. } => "below threshold",
            Self::Outbid { .. } => "outbid",
            Self::TieSuperseded { .. } => "tie superseded",
            Self::TiedBelowThreshold { .. } => "tied below threshold",
            Self::NoCandidateRemaining => "no candidate",
        }
    }
}

/// Two catalog columns tied on the same dictionary column; left for manual review.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Advisory {
    pub dictionary: String,
    pub incumbent: String,
    pub challenger: String,
    pub score: u8,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Equal fuzzy score {}: {} and {} in data catalog both match {} in data dictionary. \
             Please check manually.",
            self.score, self.incumbent, self.challenger, self.dictionary
        )
    }
}

/// Which bucket a catalog column landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Matched,
    Unmatched,
    Ambiguous,
}

/// Result of reconciling one table's catalog columns with its dictionary columns.
///
/// Every catalog column appears in exactly one of `matched`, `unmatched`, or
/// `ambiguous`. Ambiguous columns are the parties of advisories whose score
/// exceeds the threshold; ties at or below it are unmatched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub matched: BTreeMap<String, ColumnMatch>,
    pub unmatched: BTreeMap<String, UnmatchedReason>,
    pub ambiguous: BTreeSet<String>,
    pub advisories: Vec<Advisory>,
}

impl AssignmentResult {
    /// True when no catalog column is unmatched.
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }

    pub fn bucket_of(&self, catalog: &str) -> Option<Bucket> {
        if self.matched.contains_key(catalog) {
            Some(Bucket::Matched)
        } else if self.unmatched.contains_key(catalog) {
            Some(Bucket::Unmatched)
        } else if self.ambiguous.contains(catalog) {
            Some(Bucket::Ambiguous)
        } else {
            None
        }
    }

    pub fn matched_names(&self) -> Vec<&str> {
        self.matched.keys().map(String::as_str).collect()
    }

    pub fn unmatched_names(&self) -> Vec<&str> {
        self.unmatched.keys().map(String::as_str).collect()
    }

    /// Number of catalog columns across all buckets.
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len() + self.ambiguous.len()
    }

    /// Advisory lines in display form.
    pub fn advisory_messages(&self) -> Vec<String> {
        self.advisories.iter().map(ToString::to_string).collect()
    }
}
