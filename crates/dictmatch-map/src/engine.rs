//! Reconciliation engine implementation.

use std::collections::BTreeSet;

use dictmatch_model::{AssignmentResult, DataDictionary, MatchOptions};
use tracing::{debug, info, info_span, warn};

use crate::classify::classify;
use crate::error::{MatchError, Result};
use crate::lookup::lookup_table;
use crate::resolver::Resolver;
use crate::score::ScoreVector;

/// Outcome of reconciling one catalog table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReconciliation {
    /// Table name as it appears in the schema catalog.
    pub catalog_table: String,
    /// Matching table name in the data dictionary.
    pub dictionary_table: String,
    /// Column-level assignment.
    pub result: AssignmentResult,
}

impl TableReconciliation {
    /// True when every catalog column is matched or awaiting review.
    pub fn is_complete(&self) -> bool {
        self.result.is_complete()
    }
}

/// Engine for reconciling catalog column names with data dictionary names.
///
/// Each catalog column is scored against every dictionary column with the
/// token-sort similarity, the scores are resolved into a one-to-one
/// assignment, and the assignment is classified against the match threshold.
/// A run owns all of its state; the engine itself is reusable.
///
/// # Example
///
/// ```
/// use dictmatch_map::Reconciler;
/// use dictmatch_model::MatchOptions;
///
/// let engine = Reconciler::new(MatchOptions::default());
/// let result = engine.reconcile_columns(&["id", "first_name"], &["ID", "FirstName"]);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    options: MatchOptions,
}

impl Reconciler {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Finds the data dictionary table for a catalog table name.
    pub fn lookup_table<'a>(&self, table: &str, dictionary: &'a DataDictionary) -> Option<&'a str> {
        lookup_table(
            table,
            dictionary.table_names(),
            &self.options.normalization,
            self.options.lookup_threshold,
        )
    }

    /// Scores each catalog column against all dictionary columns.
    ///
    /// Duplicate names on either side are scored once, at their first
    /// position.
    pub fn score_vectors<D, C>(&self, dictionary: &[D], catalog: &[C]) -> Vec<ScoreVector>
    where
        D: AsRef<str>,
        C: AsRef<str>,
    {
        let dictionary = unique_names(dictionary, "dictionary");
        unique_names(catalog, "catalog")
            .into_iter()
            .map(|column| ScoreVector::build(column, &dictionary, &self.options.normalization))
            .collect()
    }

    /// Reconciles catalog columns with dictionary columns.
    ///
    /// Every catalog column lands in exactly one of the result's matched,
    /// unmatched, or ambiguous buckets.
    pub fn reconcile_columns<D, C>(&self, dictionary: &[D], catalog: &[C]) -> AssignmentResult
    where
        D: AsRef<str>,
        C: AsRef<str>,
    {
        let span = info_span!(
            "reconcile_columns",
            dictionary_columns = dictionary.len(),
            catalog_columns = catalog.len()
        );
        let _guard = span.enter();

        let vectors = self.score_vectors(dictionary, catalog);
        let resolution = Resolver::new(self.options.outbid_policy).resolve(vectors);
        debug!(
            claims = resolution.claims.len(),
            contentions = resolution.contentions.len(),
            dropped = resolution.dropped.len(),
            "resolution converged"
        );
        let result = classify(&resolution, self.options.match_threshold);
        for advisory in &result.advisories {
            warn!(
                dictionary = %advisory.dictionary,
                incumbent = %advisory.incumbent,
                challenger = %advisory.challenger,
                score = advisory.score,
                "equal score, manual review needed"
            );
        }
        info!(
            matched = result.matched.len(),
            unmatched = result.unmatched.len(),
            ambiguous = result.ambiguous.len(),
            threshold = self.options.match_threshold,
            "columns reconciled"
        );
        result
    }

    /// Looks up a catalog table in the dictionary and reconciles its columns.
    ///
    /// Returns [`MatchError::LookupNotFound`] when the table has no
    /// dictionary entry.
    pub fn reconcile_table<C: AsRef<str>>(
        &self,
        table: &str,
        dictionary: &DataDictionary,
        catalog: &[C],
    ) -> Result<TableReconciliation> {
        let dictionary_table = self.lookup_table(table, dictionary).ok_or_else(|| {
            MatchError::LookupNotFound {
                table: table.to_string(),
            }
        })?;
        debug!(catalog_table = table, dictionary_table, "table resolved");
        let columns = dictionary.columns(dictionary_table).unwrap_or_default();
        let result = self.reconcile_columns(columns, catalog);
        Ok(TableReconciliation {
            catalog_table: table.to_string(),
            dictionary_table: dictionary_table.to_string(),
            result,
        })
    }
}

/// Keeps the columns that were not reported unmatched, preserving order.
///
/// Matched and ambiguous columns stay; this is the column list written back
/// to the schema catalog.
pub fn retain_reconciled<T, F>(columns: &[T], name: F, result: &AssignmentResult) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    columns
        .iter()
        .filter(|column| !result.unmatched.contains_key(name(*column)))
        .cloned()
        .collect()
}

fn unique_names<'a, S: AsRef<str>>(names: &'a [S], side: &str) -> Vec<&'a str> {
    let mut seen = BTreeSet::new();
    let mut unique = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if seen.insert(name) {
            unique.push(name);
        } else {
            warn!(side, name, "duplicate column name ignored");
        }
    }
    unique
}
