//! Name normalization applied before any comparison.

use dictmatch_model::NormalizationConfig;

/// Normalizes a name for comparison.
///
/// - Deletes every occurrence of the reserved character
/// - Strips the prefix once, if the name starts with it
/// - Strips the suffix once, if the name ends with it
/// - Converts to lowercase
///
/// Stripping is exact and case-sensitive; unset options are skipped.
pub fn normalize(name: &str, config: &NormalizationConfig) -> String {
    let mut value = match config.reserved_char() {
        Some(reserved) => name.replace(reserved, ""),
        None => name.to_string(),
    };
    if let Some(prefix) = config.prefix()
        && let Some(rest) = value.strip_prefix(prefix)
    {
        value = rest.to_string();
    }
    if let Some(suffix) = config.suffix()
        && let Some(rest) = value.strip_suffix(suffix)
    {
        value = rest.to_string();
    }
    value.to_lowercase()
}

/// Sorts whitespace-separated tokens and joins them with single spaces.
pub fn token_sort_key(value: &str) -> String {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
