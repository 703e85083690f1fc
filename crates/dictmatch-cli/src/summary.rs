use anyhow::Result;

use dictmatch_cli::reconcile::ReconcileOutcome;
use dictmatch_cli::report::{assignment_table, summary_text};
use dictmatch_map::NameScore;

pub fn print_reconcile(outcome: &ReconcileOutcome, json: bool) -> Result<()> {
    if json {
        if let Some(reconciliation) = outcome.reconciliation() {
            println!("{}", serde_json::to_string_pretty(&reconciliation.result)?);
        }
    } else if let Some(reconciliation) = outcome.reconciliation() {
        println!("{}", assignment_table(&reconciliation.result));
    }
    println!("{}", summary_text(outcome));
    if let ReconcileOutcome::Pruned {
        table_input,
        written,
        ..
    } = outcome
    {
        match written {
            Some(path) => println!("Updated table written to {}", path.display()),
            None => println!("{}", serde_json::to_string_pretty(table_input)?),
        }
    }
    Ok(())
}

pub fn print_lookup(table: &str, found: Option<&str>) {
    match found {
        Some(name) => println!("{table} -> {name}"),
        None => println!("Table {table} does not exist in data dictionary!"),
    }
}

pub fn print_score(score: &NameScore) {
    match score {
        NameScore::Single(score) => println!("{score}"),
        NameScore::Ranked(ranked) => {
            for (candidate, score) in ranked {
                println!("{score:>3}  {candidate}");
            }
        }
    }
}
