//! Partitioning of a resolution into matched, unmatched and ambiguous columns.

use std::collections::BTreeSet;

use dictmatch_model::{Advisory, AssignmentResult, ColumnMatch, UnmatchedReason};

use crate::resolver::{Dropped, Resolution};

/// Classifies a resolution against a match threshold.
///
/// - A tie is unresolved when its dictionary column is still held at the
///   tied score. One advisory is emitted per unresolved tie. When the tied
///   score exceeds `threshold` both parties become ambiguous; otherwise the
///   holder is unmatched below threshold and the challenger is unmatched as
///   tied below threshold. Ties later overridden by a stronger bid produce
///   no advisory.
/// - Other claims match when their score is strictly greater than
///   `threshold`; otherwise they are unmatched.
/// - Columns that hold nothing are unmatched with the reason they stopped.
pub fn classify(resolution: &Resolution, threshold: u8) -> AssignmentResult {
    let mut result = AssignmentResult::default();
    let mut advisories = BTreeSet::new();

    for contention in &resolution.contentions {
        if !is_unresolved(resolution, &contention.dictionary, contention.score) {
            continue;
        }
        if contention.score > threshold {
            result.ambiguous.insert(contention.incumbent.clone());
            result.ambiguous.insert(contention.challenger.clone());
        }
        advisories.insert(Advisory {
            dictionary: contention.dictionary.clone(),
            incumbent: contention.incumbent.clone(),
            challenger: contention.challenger.clone(),
            score: contention.score,
        });
    }
    result.advisories = advisories.into_iter().collect();

    for (dictionary, claim) in &resolution.claims {
        if result.ambiguous.contains(&claim.catalog) {
            continue;
        }
        if claim.score > threshold {
            result.matched.insert(
                claim.catalog.clone(),
                ColumnMatch {
                    dictionary: dictionary.clone(),
                    score: claim.score,
                },
            );
        } else {
            result.unmatched.insert(
                claim.catalog.clone(),
                UnmatchedReason::BelowThreshold {
                    dictionary: dictionary.clone(),
                    score: claim.score,
                },
            );
        }
    }

    for (catalog, dropped) in &resolution.dropped {
        if result.ambiguous.contains(catalog) {
            continue;
        }
        let reason = match dropped {
            Dropped::Tied { dictionary, score }
                if is_unresolved(resolution, dictionary, *score) =>
            {
                UnmatchedReason::TiedBelowThreshold {
                    dictionary: dictionary.clone(),
                    score: *score,
                }
            }
            Dropped::Tied { dictionary, score } => UnmatchedReason::TieSuperseded {
                dictionary: dictionary.clone(),
                score: *score,
            },
            Dropped::Outbid {
                dictionary,
                score,
                held_score,
            } => UnmatchedReason::Outbid {
                dictionary: dictionary.clone(),
                score: *score,
                held_score: *held_score,
            },
            Dropped::Exhausted => UnmatchedReason::NoCandidateRemaining,
        };
        result.unmatched.insert(catalog.clone(), reason);
    }

    result
}

/// A holder only changes on a strictly higher bid, so a claim still at the
/// tied score is still held by the incumbent.
fn is_unresolved(resolution: &Resolution, dictionary: &str, score: u8) -> bool {
    resolution
        .claims
        .get(dictionary)
        .is_some_and(|claim| claim.score == score)
}
