//! Exact-after-normalization lookup of dictionary keys.

use dictmatch_model::{DEFAULT_LOOKUP_THRESHOLD, NormalizationConfig};

use crate::normalize::normalize;
use crate::score::similarity;

/// Returns the first key whose normalized form equals the normalized name.
///
/// Keys are tried in iteration order. If several keys normalize to the same
/// value, the first one wins.
pub fn find_exact<'a, I>(name: &str, keys: I, config: &NormalizationConfig) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = normalize(name, config);
    keys.into_iter().find(|key| normalize(key, config) == wanted)
}

/// Resolves a catalog table name to its data dictionary table.
///
/// At the default threshold of 100 this is [`find_exact`]. A lower threshold
/// accepts the first key whose similarity reaches it.
pub fn lookup_table<'a, I>(
    table: &str,
    keys: I,
    config: &NormalizationConfig,
    threshold: u8,
) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    if threshold >= DEFAULT_LOOKUP_THRESHOLD {
        return find_exact(table, keys, config);
    }
    let wanted = normalize(table, config);
    keys.into_iter()
        .find(|key| similarity(&normalize(key, config), &wanted) >= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_key_after_prefix_strip() {
        let config = NormalizationConfig::new().with_prefix("tbl_");
        let keys = ["accounts", "Users"];
        assert_eq!(find_exact("tbl_users", keys, &config), Some("Users"));
    }

    #[test]
    fn returns_none_when_absent() {
        let keys = ["accounts", "users"];
        assert_eq!(
            find_exact("orders", keys, &NormalizationConfig::default()),
            None
        );
    }

    #[test]
    fn first_duplicate_wins() {
        let keys = ["USERS", "users"];
        assert_eq!(
            find_exact("Users", keys, &NormalizationConfig::default()),
            Some("USERS")
        );
    }

    #[test]
    fn default_threshold_requires_exact_match() {
        let keys = ["user"];
        let config = NormalizationConfig::default();
        assert_eq!(lookup_table("users", keys, &config, 100), None);
        // lcs("user", "users") = 4, lengths 4 + 5 -> 89.
        assert_eq!(lookup_table("users", keys, &config, 89), Some("user"));
        assert_eq!(lookup_table("users", keys, &config, 90), None);
    }
}
