//! Fuzzy scoring of names on a 0-100 scale.
//!
//! The base score is the normalized InDel similarity of two strings
//! (`100 * (1 - indel_distance / (len_a + len_b))`, rounded half to even).
//! Ranking uses the token-sort variant, which sorts whitespace-separated
//! tokens on both sides first so word order does not matter.

use dictmatch_model::NormalizationConfig;
use rapidfuzz::distance::indel;

use crate::error::{MatchError, Result};
use crate::normalize::{normalize, token_sort_key};

/// Order-sensitive similarity of two already-normalized strings.
pub fn similarity(a: &str, b: &str) -> u8 {
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    let ratio = indel::normalized_similarity(a.chars(), b.chars());
    to_score(ratio)
}

/// Similarity after sorting the tokens of both strings.
pub fn token_sort_similarity(a: &str, b: &str) -> u8 {
    similarity(&token_sort_key(a), &token_sort_key(b))
}

fn to_score(ratio: f64) -> u8 {
    (ratio * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

/// Scores a name against every candidate with the token-sort variant.
///
/// Both sides are normalized first. The result is sorted by descending score;
/// equal scores keep candidate order. Look results up by candidate rather
/// than relying on position.
pub fn rank<S: AsRef<str>>(
    name: &str,
    candidates: &[S],
    config: &NormalizationConfig,
) -> Vec<(String, u8)> {
    let name_key = token_sort_key(&normalize(name, config));
    let mut scores: Vec<(String, u8)> = candidates
        .iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            let key = token_sort_key(&normalize(candidate, config));
            (candidate.to_string(), similarity(&name_key, &key))
        })
        .collect();
    scores.sort_by(|a, b| b.1.cmp(&a.1));
    scores
}

/// Outcome of [`check_names`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameScore {
    /// Similarity against the single target.
    Single(u8),
    /// Ranked token-sort scores against each candidate.
    Ranked(Vec<(String, u8)>),
}

/// Compares a name against either one target or a list of candidates.
///
/// A non-empty `target` takes precedence and is scored with the
/// order-sensitive [`similarity`]; otherwise a non-empty candidate list is
/// [`rank`]ed. Supplying neither is a configuration error.
pub fn check_names<S: AsRef<str>>(
    name: &str,
    target: Option<&str>,
    candidates: &[S],
    config: &NormalizationConfig,
) -> Result<NameScore> {
    if let Some(target) = target.filter(|t| !t.is_empty()) {
        let score = similarity(&normalize(name, config), &normalize(target, config));
        return Ok(NameScore::Single(score));
    }
    if !candidates.is_empty() {
        return Ok(NameScore::Ranked(rank(name, candidates, config)));
    }
    Err(MatchError::Configuration)
}

/// Token-sort scores of one catalog column against every dictionary column.
///
/// Entries keep dictionary order, which decides ties for the best entry.
/// The resolver removes entries as the owner gets evicted from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreVector {
    owner: String,
    entries: Vec<(String, u8)>,
}

impl ScoreVector {
    /// Scores `owner` against each dictionary column.
    pub fn build<S: AsRef<str>>(
        owner: &str,
        dictionary: &[S],
        config: &NormalizationConfig,
    ) -> Self {
        let owner_key = token_sort_key(&normalize(owner, config));
        let entries = dictionary
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let key = token_sort_key(&normalize(name, config));
                (name.to_string(), similarity(&owner_key, &key))
            })
            .collect();
        Self {
            owner: owner.to_string(),
            entries,
        }
    }

    /// Builds a vector from precomputed scores, in the given order.
    pub fn from_scores<I, S>(owner: &str, scores: I) -> Self
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<String>,
    {
        Self {
            owner: owner.to_string(),
            entries: scores
                .into_iter()
                .map(|(name, score)| (name.into(), score))
                .collect(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn score_of(&self, dictionary: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(name, _)| name == dictionary)
            .map(|(_, score)| *score)
    }

    /// Highest-scoring remaining entry; the earliest one wins a tie.
    pub fn best(&self) -> Result<(&str, u8)> {
        let mut best: Option<(&str, u8)> = None;
        for (name, score) in &self.entries {
            if best.is_none_or(|(_, top)| *score > top) {
                best = Some((name.as_str(), *score));
            }
        }
        best.ok_or_else(|| MatchError::NoCandidateRemaining {
            catalog: self.owner.clone(),
        })
    }

    /// Removes an entry so the owner cannot bid on it again.
    pub fn remove(&mut self, dictionary: &str) -> Option<u8> {
        let idx = self.entries.iter().position(|(name, _)| name == dictionary)?;
        Some(self.entries.remove(idx).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_hundred() {
        assert_eq!(similarity("id", "id"), 100);
        assert_eq!(similarity("", ""), 100);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0);
        assert_eq!(similarity("abc", ""), 0);
    }

    #[test]
    fn ratio_follows_indel_formula() {
        // lcs("firstname", "first_name") = 9, lengths 9 + 10.
        assert_eq!(similarity("firstname", "first_name"), 95);
        // lcs("lname", "last_name") = 5, lengths 5 + 9.
        assert_eq!(similarity("lname", "last_name"), 71);
    }

    #[test]
    fn halves_round_to_even() {
        // lcs("ab", "ac") = 1 -> 2 / 4 = 50 exactly.
        assert_eq!(similarity("ab", "ac"), 50);
        // lcs = 3, lengths 4 + 4 -> 75 exactly.
        assert_eq!(similarity("abcd", "abce"), 75);
        // lcs = 1, lengths 1 + 7 -> 25 exactly.
        assert_eq!(similarity("a", "abcdefg"), 25);
        // lcs = 1, lengths 1 + 15 -> 12.5, rounds down to even.
        assert_eq!(similarity("a", "abcdefghijklmno"), 12);
    }

    #[test]
    fn similarity_is_order_sensitive() {
        assert!(similarity("first last", "last first") < 100);
        assert_eq!(token_sort_similarity("first last", "last first"), 100);
    }

    #[test]
    fn rank_ignores_word_order_after_reserved_char_removal() {
        let config = NormalizationConfig::new().with_reserved_char("_");
        let ranked = rank(
            "first_name last_name",
            &["last_name first_name", "first_name"],
            &config,
        );
        assert_eq!(ranked[0], ("last_name first_name".to_string(), 100));
        assert!(ranked[1].1 < 100);
    }

    #[test]
    fn rank_sorts_descending_and_keeps_ties_in_order() {
        let ranked = rank("ab", &["xy", "ab", "ac", "ad"], &NormalizationConfig::default());
        let names: Vec<&str> = ranked.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["ab", "ac", "ad", "xy"]);
    }

    #[test]
    fn check_names_prefers_target() {
        let config = NormalizationConfig::new().with_prefix("tbl_");
        let score = check_names("tbl_Users", Some("users"), &["orders"], &config).unwrap();
        assert_eq!(score, NameScore::Single(100));
    }

    #[test]
    fn check_names_ranks_candidates_without_target() {
        let config = NormalizationConfig::default();
        let score = check_names("id", Some(""), &["ID", "name"], &config).unwrap();
        match score {
            NameScore::Ranked(ranked) => assert_eq!(ranked[0], ("ID".to_string(), 100)),
            NameScore::Single(_) => panic!("expected ranked scores"),
        }
    }

    #[test]
    fn check_names_requires_target_or_candidates() {
        let empty: [&str; 0] = [];
        let err = check_names("id", None, &empty, &NormalizationConfig::default()).unwrap_err();
        assert_eq!(err, MatchError::Configuration);
    }

    #[test]
    fn best_prefers_first_on_internal_tie() {
        let vector = ScoreVector::from_scores("col", [("a", 90), ("b", 95), ("c", 95)]);
        assert_eq!(vector.best().unwrap(), ("b", 95));
    }

    #[test]
    fn exhausted_vector_reports_no_candidate() {
        let mut vector = ScoreVector::from_scores("col", [("a", 90)]);
        assert_eq!(vector.remove("a"), Some(90));
        assert_eq!(vector.remove("a"), None);
        assert_eq!(
            vector.best().unwrap_err(),
            MatchError::NoCandidateRemaining {
                catalog: "col".to_string()
            }
        );
    }

    #[test]
    fn build_scores_every_dictionary_column() {
        let vector = ScoreVector::build(
            "FirstName",
            &["id", "first_name", "last_name"],
            &NormalizationConfig::default(),
        );
        assert_eq!(vector.len(), 3);
        assert_eq!(vector.score_of("first_name"), Some(95));
        assert_eq!(vector.best().unwrap(), ("first_name", 95));
    }
}
