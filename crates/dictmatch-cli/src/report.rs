//! Human-readable rendering of reconcile results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dictmatch_model::{AssignmentResult, Bucket, UnmatchedReason};

use crate::reconcile::ReconcileOutcome;

/// One line describing how the run ended.
pub fn outcome_message(outcome: &ReconcileOutcome) -> String {
    match outcome {
        ReconcileOutcome::TableNotInDictionary { table } => {
            format!("Table {table} does not exist in data dictionary!")
        }
        ReconcileOutcome::Complete(reconciliation) => format!(
            "For table {}, all columns have been matched.",
            reconciliation.catalog_table
        ),
        ReconcileOutcome::Pruned { reconciliation, .. } => format!(
            "For table {}, the following columns have not been matched: {}",
            reconciliation.catalog_table,
            reconciliation.result.unmatched_names().join(", ")
        ),
    }
}

/// Plain-text summary: counts, advisories, and the outcome line.
pub fn summary_text(outcome: &ReconcileOutcome) -> String {
    let mut lines = Vec::new();
    if let Some(reconciliation) = outcome.reconciliation() {
        let result = &reconciliation.result;
        lines.push(format!(
            "Catalog table: {} (dictionary table: {})",
            reconciliation.catalog_table, reconciliation.dictionary_table
        ));
        lines.push(format!(
            "Matched: {}  Unmatched: {}  Ambiguous: {}",
            result.matched.len(),
            result.unmatched.len(),
            result.ambiguous.len()
        ));
        lines.extend(result.advisory_messages());
    }
    lines.push(outcome_message(outcome));
    lines.join("\n")
}

/// Per-column table of the assignment, one row per catalog column.
pub fn assignment_table(result: &AssignmentResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Catalog column"),
        header_cell("Status"),
        header_cell("Dictionary column"),
        header_cell("Score"),
        header_cell("Detail"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for (catalog, matched) in &result.matched {
        table.add_row(vec![
            Cell::new(catalog),
            bucket_cell(Bucket::Matched),
            Cell::new(&matched.dictionary),
            Cell::new(matched.score),
            dim_cell("-"),
        ]);
    }
    for catalog in &result.ambiguous {
        let advisory = result
            .advisories
            .iter()
            .find(|a| &a.incumbent == catalog || &a.challenger == catalog);
        table.add_row(vec![
            Cell::new(catalog),
            bucket_cell(Bucket::Ambiguous),
            advisory.map_or_else(|| dim_cell("-"), |a| Cell::new(&a.dictionary)),
            advisory.map_or_else(|| dim_cell("-"), |a| Cell::new(a.score)),
            Cell::new("equal score, check manually"),
        ]);
    }
    for (catalog, reason) in &result.unmatched {
        table.add_row(vec![
            Cell::new(catalog),
            bucket_cell(Bucket::Unmatched),
            reason.dictionary().map_or_else(|| dim_cell("-"), Cell::new),
            score_of(reason).map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(reason.label()),
        ]);
    }
    table
}

fn score_of(reason: &UnmatchedReason) -> Option<u8> {
    match reason {
        UnmatchedReason::BelowThreshold { score, .. }
        | UnmatchedReason::Outbid { score, .. }
        | UnmatchedReason::TieSuperseded { score, .. }
        | UnmatchedReason::TiedBelowThreshold { score, .. } => Some(*score),
        UnmatchedReason::NoCandidateRemaining => None,
    }
}

fn bucket_cell(bucket: Bucket) -> Cell {
    let (text, color) = match bucket {
        Bucket::Matched => ("matched", Color::Green),
        Bucket::Unmatched => ("unmatched", Color::Red),
        Bucket::Ambiguous => ("ambiguous", Color::Yellow),
    };
    Cell::new(text).fg(color).add_attribute(Attribute::Bold)
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn dim_cell<T: ToString>(text: T) -> Cell {
    Cell::new(text).add_attribute(Attribute::Dim)
}
