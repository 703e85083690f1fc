//! The reconcile pipeline: dictionary, catalog table, assignment, update.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, info_span, warn};

use dictmatch_ingest::{CatalogColumn, SchemaCatalog, read_data_dictionary};
use dictmatch_map::{MatchError, Reconciler, TableReconciliation, retain_reconciled};
use dictmatch_model::{MatchOptions, ReconcileRequest};

/// What a reconcile run ended with.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// The catalog table has no entry in the data dictionary.
    TableNotInDictionary { table: String },
    /// Every catalog column is matched or awaiting review.
    Complete(TableReconciliation),
    /// Some columns were unmatched; the catalog table without them.
    Pruned {
        reconciliation: TableReconciliation,
        /// Update payload for the pruned table.
        table_input: Value,
        /// Where the pruned table was written; `None` on a dry run.
        written: Option<PathBuf>,
    },
}

impl ReconcileOutcome {
    pub fn reconciliation(&self) -> Option<&TableReconciliation> {
        match self {
            Self::TableNotInDictionary { .. } => None,
            Self::Complete(reconciliation) | Self::Pruned { reconciliation, .. } => {
                Some(reconciliation)
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TableNotInDictionary { .. } => 1,
            Self::Complete(_) | Self::Pruned { .. } => 0,
        }
    }
}

/// Runs one request against a catalog.
///
/// `options` carries the thresholds and normalization; the request supplies
/// the table, dictionary file, database, and dry-run flag.
pub fn run_request(
    request: &ReconcileRequest,
    options: MatchOptions,
    catalog: &dyn SchemaCatalog,
) -> Result<ReconcileOutcome> {
    let span = info_span!("reconcile", table = %request.table_name, database = %request.database);
    let _guard = span.enter();

    let dictionary = read_data_dictionary(&request.file, request.sheet())
        .with_context(|| format!("read data dictionary {}", request.file.display()))?;
    let table = catalog
        .get_table(&request.database, &request.table_name)
        .with_context(|| format!("load catalog table {}", request.table_name))?;
    let columns = table.columns();
    let names: Vec<&str> = columns.iter().map(CatalogColumn::name).collect();

    let engine = Reconciler::new(options);
    let reconciliation = match engine.reconcile_table(table.name(), &dictionary, &names) {
        Ok(reconciliation) => reconciliation,
        Err(MatchError::LookupNotFound { table }) => {
            warn!(%table, "table does not exist in the data dictionary");
            return Ok(ReconcileOutcome::TableNotInDictionary { table });
        }
        Err(error) => return Err(error).context("reconcile columns"),
    };
    if reconciliation.is_complete() {
        info!("all columns have been matched");
        return Ok(ReconcileOutcome::Complete(reconciliation));
    }

    let kept = retain_reconciled(&columns, CatalogColumn::name, &reconciliation.result);
    let pruned = table.with_columns(&kept);
    let written = if request.dryrun {
        None
    } else {
        let path = catalog
            .update_table(&request.database, &request.table_name, &pruned)
            .with_context(|| format!("update catalog table {}", request.table_name))?;
        Some(path)
    };
    Ok(ReconcileOutcome::Pruned {
        table_input: pruned.to_table_input(),
        reconciliation,
        written,
    })
}

/// Loads a request file in the camelCase payload format.
pub fn load_request(path: &Path) -> Result<ReconcileRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read request {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse request {}", path.display()))
}
