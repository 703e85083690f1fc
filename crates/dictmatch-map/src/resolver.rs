//! Conflict resolution turning per-column score vectors into one assignment.
//!
//! Catalog columns bid for dictionary columns with their scores. A dictionary
//! column is held by at most one catalog column at a time. A strictly higher
//! bid evicts the holder, which loses that entry from its own vector and goes
//! back on the work queue to bid on its next best candidate. An equal bid is
//! recorded as a contention and the challenger stops bidding: exact ties are
//! left for manual review instead of being decided arbitrarily.
//!
//! Every re-queue removes one entry from one vector, so the loop terminates.

use std::collections::{BTreeMap, VecDeque};

use dictmatch_model::OutbidPolicy;
use tracing::{debug, trace};

use crate::score::ScoreVector;

/// A held dictionary column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub catalog: String,
    pub score: u8,
}

/// Two catalog columns bid the same score for the same dictionary column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contention {
    pub dictionary: String,
    /// Holder at the time of the tie.
    pub incumbent: String,
    /// Bidder that tied and stopped bidding.
    pub challenger: String,
    pub score: u8,
}

/// Why a catalog column stopped bidding without holding a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dropped {
    /// Tied the holder of its best candidate.
    Tied { dictionary: String, score: u8 },
    /// Its best candidate was held at a higher score.
    Outbid {
        dictionary: String,
        score: u8,
        held_score: u8,
    },
    /// Its score vector ran out.
    Exhausted,
}

/// Converged state of one resolution run.
///
/// Each catalog column is either the holder of exactly one claim or listed
/// in `dropped`, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Dictionary column to its holder.
    pub claims: BTreeMap<String, Claim>,
    /// Ties in the order they were found.
    pub contentions: Vec<Contention>,
    /// Catalog column to the reason it holds nothing.
    pub dropped: BTreeMap<String, Dropped>,
}

impl Resolution {
    /// Dictionary column held by a catalog column, if any.
    pub fn claim_of(&self, catalog: &str) -> Option<(&str, &Claim)> {
        self.claims
            .iter()
            .find(|(_, claim)| claim.catalog == catalog)
            .map(|(dictionary, claim)| (dictionary.as_str(), claim))
    }
}

#[derive(Debug, Clone, Copy)]
struct Held {
    bidder: usize,
    score: u8,
}

/// Runs the bidding procedure over a set of score vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    policy: OutbidPolicy,
}

impl Resolver {
    pub fn new(policy: OutbidPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OutbidPolicy {
        self.policy
    }

    /// Resolves the vectors into a consistent assignment.
    ///
    /// Columns bid in the order given; evicted columns re-bid after every
    /// column already waiting. The vectors are consumed: entries are removed
    /// from a column's vector as it is evicted from them.
    pub fn resolve(&self, vectors: Vec<ScoreVector>) -> Resolution {
        let mut arena = vectors;
        let mut queue: VecDeque<usize> = (0..arena.len()).collect();
        let mut tracker: BTreeMap<String, Held> = BTreeMap::new();
        let mut contentions = Vec::new();
        let mut dropped: BTreeMap<usize, Dropped> = BTreeMap::new();

        while let Some(bidder) = queue.pop_front() {
            let (best, score) = match arena[bidder].best() {
                Ok((name, score)) => (name.to_string(), score),
                Err(error) => {
                    debug!(%error, "catalog column exhausted");
                    dropped.insert(bidder, Dropped::Exhausted);
                    continue;
                }
            };
            trace!(
                catalog = arena[bidder].owner(),
                dictionary = %best,
                score,
                "bid"
            );

            let Some(held) = tracker.get(&best).copied() else {
                tracker.insert(best, Held { bidder, score });
                continue;
            };

            if score == held.score {
                debug!(
                    dictionary = %best,
                    incumbent = arena[held.bidder].owner(),
                    challenger = arena[bidder].owner(),
                    score,
                    "equal score contention"
                );
                contentions.push(Contention {
                    dictionary: best.clone(),
                    incumbent: arena[held.bidder].owner().to_string(),
                    challenger: arena[bidder].owner().to_string(),
                    score,
                });
                dropped.insert(
                    bidder,
                    Dropped::Tied {
                        dictionary: best,
                        score,
                    },
                );
            } else if score > held.score {
                debug!(
                    dictionary = %best,
                    evicted = arena[held.bidder].owner(),
                    by = arena[bidder].owner(),
                    old_score = held.score,
                    new_score = score,
                    "evicting holder"
                );
                arena[held.bidder].remove(&best);
                queue.push_back(held.bidder);
                tracker.insert(best, Held { bidder, score });
            } else {
                match self.policy {
                    OutbidPolicy::Drop => {
                        dropped.insert(
                            bidder,
                            Dropped::Outbid {
                                dictionary: best,
                                score,
                                held_score: held.score,
                            },
                        );
                    }
                    OutbidPolicy::Rebid => {
                        arena[bidder].remove(&best);
                        queue.push_back(bidder);
                    }
                }
            }
        }

        let claims = tracker
            .into_iter()
            .map(|(dictionary, held)| {
                let claim = Claim {
                    catalog: arena[held.bidder].owner().to_string(),
                    score: held.score,
                };
                (dictionary, claim)
            })
            .collect();
        let dropped = dropped
            .into_iter()
            .map(|(bidder, reason)| (arena[bidder].owner().to_string(), reason))
            .collect();

        Resolution {
            claims,
            contentions,
            dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(owner: &str, scores: &[(&str, u8)]) -> ScoreVector {
        ScoreVector::from_scores(owner, scores.iter().copied())
    }

    #[test]
    fn unclaimed_best_is_claimed() {
        let resolution = Resolver::default().resolve(vec![
            vector("A", &[("d1", 90), ("d2", 10)]),
            vector("B", &[("d1", 10), ("d2", 80)]),
        ]);
        assert_eq!(resolution.claims["d1"].catalog, "A");
        assert_eq!(resolution.claims["d2"].catalog, "B");
        assert!(resolution.dropped.is_empty());
        assert!(resolution.contentions.is_empty());
    }

    #[test]
    fn higher_bid_evicts_and_holder_rebids() {
        let resolution = Resolver::default().resolve(vec![
            vector("X", &[("D", 70), ("E", 60)]),
            vector("Y", &[("D", 85), ("E", 5)]),
        ]);
        assert_eq!(
            resolution.claims["D"],
            Claim {
                catalog: "Y".to_string(),
                score: 85
            }
        );
        assert_eq!(
            resolution.claims["E"],
            Claim {
                catalog: "X".to_string(),
                score: 60
            }
        );
    }

    #[test]
    fn equal_bid_records_contention_and_drops_challenger() {
        let resolution = Resolver::default().resolve(vec![
            vector("A", &[("D", 90)]),
            vector("B", &[("D", 90)]),
        ]);
        assert_eq!(resolution.claims["D"].catalog, "A");
        assert_eq!(
            resolution.contentions,
            vec![Contention {
                dictionary: "D".to_string(),
                incumbent: "A".to_string(),
                challenger: "B".to_string(),
                score: 90,
            }]
        );
        assert_eq!(
            resolution.dropped["B"],
            Dropped::Tied {
                dictionary: "D".to_string(),
                score: 90
            }
        );
    }

    #[test]
    fn evicted_column_with_empty_vector_is_exhausted() {
        let resolution = Resolver::default().resolve(vec![
            vector("X", &[("D", 70)]),
            vector("Y", &[("D", 85)]),
        ]);
        assert_eq!(resolution.claims["D"].catalog, "Y");
        assert_eq!(resolution.dropped["X"], Dropped::Exhausted);
    }

    #[test]
    fn empty_vector_is_exhausted_immediately() {
        let resolution = Resolver::default().resolve(vec![vector("X", &[])]);
        assert!(resolution.claims.is_empty());
        assert_eq!(resolution.dropped["X"], Dropped::Exhausted);
    }

    #[test]
    fn drop_policy_stops_outbid_column() {
        let resolution = Resolver::new(OutbidPolicy::Drop).resolve(vec![
            vector("A", &[("D", 90), ("E", 10)]),
            vector("B", &[("D", 70), ("E", 65)]),
        ]);
        assert_eq!(resolution.claims.len(), 1);
        assert_eq!(
            resolution.dropped["B"],
            Dropped::Outbid {
                dictionary: "D".to_string(),
                score: 70,
                held_score: 90
            }
        );
    }

    #[test]
    fn rebid_policy_moves_to_next_candidate() {
        let resolution = Resolver::new(OutbidPolicy::Rebid).resolve(vec![
            vector("A", &[("D", 90), ("E", 10)]),
            vector("B", &[("D", 70), ("E", 65)]),
        ]);
        assert_eq!(resolution.claims["D"].catalog, "A");
        assert_eq!(
            resolution.claims["E"],
            Claim {
                catalog: "B".to_string(),
                score: 65
            }
        );
        assert!(resolution.dropped.is_empty());
    }

    #[test]
    fn eviction_chain_converges() {
        // C evicts B from D1, B then evicts A from D2, A falls back to D3.
        let resolution = Resolver::default().resolve(vec![
            vector("A", &[("D1", 10), ("D2", 50), ("D3", 40)]),
            vector("B", &[("D1", 60), ("D2", 55), ("D3", 0)]),
            vector("C", &[("D1", 90), ("D2", 0), ("D3", 0)]),
        ]);
        assert_eq!(resolution.claims["D1"].catalog, "C");
        assert_eq!(resolution.claims["D2"].catalog, "B");
        assert_eq!(resolution.claims["D3"].catalog, "A");
        assert_eq!(resolution.claim_of("A").map(|(d, _)| d), Some("D3"));
    }
}
