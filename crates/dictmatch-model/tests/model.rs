//! Tests for dictmatch-model types.

use dictmatch_model::{
    AssignmentResult, Bucket, ColumnMatch, DataDictionary, MatchOptions, NormalizationConfig,
    OutbidPolicy, UnmatchedReason,
};

#[test]
fn buckets_are_reported_per_column() {
    let mut result = AssignmentResult::default();
    result.matched.insert(
        "FirstName".to_string(),
        ColumnMatch {
            dictionary: "first_name".to_string(),
            score: 95,
        },
    );
    result.unmatched.insert(
        "LName".to_string(),
        UnmatchedReason::BelowThreshold {
            dictionary: "last_name".to_string(),
            score: 71,
        },
    );
    result.ambiguous.insert("Addr".to_string());

    assert_eq!(result.bucket_of("FirstName"), Some(Bucket::Matched));
    assert_eq!(result.bucket_of("LName"), Some(Bucket::Unmatched));
    assert_eq!(result.bucket_of("Addr"), Some(Bucket::Ambiguous));
    assert_eq!(result.bucket_of("Other"), None);
    assert_eq!(result.total(), 3);
    assert!(!result.is_complete());
    assert_eq!(result.unmatched_names(), vec!["LName"]);
}

#[test]
fn unmatched_reason_refers_to_dictionary_column() {
    let outbid = UnmatchedReason::Outbid {
        dictionary: "email".to_string(),
        score: 70,
        held_score: 88,
    };
    assert_eq!(outbid.dictionary(), Some("email"));
    assert_eq!(outbid.label(), "outbid");
    assert_eq!(UnmatchedReason::NoCandidateRemaining.dictionary(), None);
}

#[test]
fn dictionary_collects_from_pairs() {
    let dictionary: DataDictionary = vec![
        (
            "users".to_string(),
            vec!["id".to_string(), " email ".to_string()],
        ),
        ("orders".to_string(), vec!["order_id".to_string()]),
    ]
    .into_iter()
    .collect();

    assert_eq!(dictionary.len(), 2);
    assert_eq!(dictionary.table_names(), vec!["orders", "users"]);
    assert_eq!(
        dictionary.columns("users").map(<[String]>::to_vec),
        Some(vec!["id".to_string(), "email".to_string()])
    );
}

#[test]
fn options_builder_chains() {
    let options = MatchOptions::new()
        .with_normalization(NormalizationConfig::new().with_prefix("tbl_"))
        .with_match_threshold(75)
        .with_outbid_policy(OutbidPolicy::Rebid);
    assert_eq!(options.normalization.prefix(), Some("tbl_"));
    assert_eq!(options.match_threshold, 75);
    assert_eq!(options.lookup_threshold, 100);
    assert_eq!(options.outbid_policy.label(), "rebid");
}
