//! Integration tests for the reconcile pipeline.

use std::fs;
use std::path::PathBuf;

use dictmatch_cli::reconcile::{ReconcileOutcome, load_request, run_request};
use dictmatch_cli::report::{outcome_message, summary_text};
use dictmatch_ingest::{JsonCatalog, SchemaCatalog};
use dictmatch_model::{MatchOptions, ReconcileRequest};
use serde_json::json;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    catalog: JsonCatalog,
    dictionary: PathBuf,
}

fn fixture(columns: &[&str]) -> Fixture {
    let dir = TempDir::new().unwrap();
    let dictionary = dir.path().join("dictionary.csv");
    fs::write(
        &dictionary,
        "Table Name,Column Name\nusers,id\nusers,first_name\nusers,last_name\norders,order_id\n",
    )
    .unwrap();

    let catalog = JsonCatalog::new(dir.path().join("catalog"));
    let columns: Vec<_> = columns
        .iter()
        .map(|name| json!({"Name": name, "Type": "string"}))
        .collect();
    let document = json!({
        "Table": {
            "Name": "users",
            "DatabaseName": "crm",
            "CreateTime": "2024-01-01T00:00:00",
            "StorageDescriptor": {"Columns": columns}
        }
    });
    let path = catalog.table_path("crm", "users");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, document.to_string()).unwrap();

    Fixture {
        _dir: dir,
        catalog,
        dictionary,
    }
}

fn request(fixture: &Fixture, table: &str) -> ReconcileRequest {
    ReconcileRequest {
        table_name: table.to_string(),
        file: fixture.dictionary.clone(),
        database: "crm".to_string(),
        catalog_dir: fixture.catalog.root().to_path_buf(),
        ..ReconcileRequest::default()
    }
}

#[test]
fn dry_run_reports_unmatched_columns() {
    let fixture = fixture(&["ID", "FirstName", "LName", "Notes"]);
    let request = request(&fixture, "users");
    let outcome = run_request(&request, request.match_options(), &fixture.catalog).unwrap();

    insta::assert_snapshot!(summary_text(&outcome), @r"
    Catalog table: users (dictionary table: users)
    Matched: 2  Unmatched: 2  Ambiguous: 0
    For table users, the following columns have not been matched: LName, Notes
    ");

    let result = &outcome.reconciliation().unwrap().result;
    insta::assert_snapshot!(serde_json::to_string_pretty(result).unwrap(), @r#"
    {
      "matched": {
        "FirstName": {
          "dictionary": "first_name",
          "score": 95
        },
        "ID": {
          "dictionary": "id",
          "score": 100
        }
      },
      "unmatched": {
        "LName": {
          "reason": "below_threshold",
          "dictionary": "last_name",
          "score": 71
        },
        "Notes": {
          "reason": "outbid",
          "dictionary": "last_name",
          "score": 29,
          "held_score": 71
        }
      },
      "ambiguous": [],
      "advisories": []
    }
    "#);

    let ReconcileOutcome::Pruned {
        table_input,
        written,
        ..
    } = &outcome
    else {
        panic!("expected pruned outcome");
    };
    assert!(written.is_none());
    assert!(table_input.get("DatabaseName").is_none());
    assert_eq!(
        table_input["StorageDescriptor"]["Columns"],
        json!([
            {"Name": "ID", "Type": "string"},
            {"Name": "FirstName", "Type": "string"}
        ])
    );
    // Dry run leaves the catalog untouched.
    let stored = fixture.catalog.get_table("crm", "users").unwrap();
    assert_eq!(stored.columns().len(), 4);
}

#[test]
fn apply_writes_pruned_table() {
    let fixture = fixture(&["ID", "FirstName", "Notes"]);
    let mut request = request(&fixture, "users");
    request.dryrun = false;
    let outcome = run_request(&request, request.match_options(), &fixture.catalog).unwrap();

    let ReconcileOutcome::Pruned { written, .. } = &outcome else {
        panic!("expected pruned outcome");
    };
    assert_eq!(
        written.as_deref(),
        Some(fixture.catalog.table_path("crm", "users").as_path())
    );
    let stored = fixture.catalog.get_table("crm", "users").unwrap();
    assert_eq!(stored.column_names(), vec!["ID", "FirstName"]);
}

#[test]
fn complete_table_needs_no_update() {
    let fixture = fixture(&["ID", "FirstName"]);
    let request = request(&fixture, "users");
    let options = MatchOptions::default();
    let outcome = run_request(&request, options, &fixture.catalog).unwrap();

    assert!(matches!(outcome, ReconcileOutcome::Complete(_)));
    assert_eq!(
        outcome_message(&outcome),
        "For table users, all columns have been matched."
    );
    assert_eq!(outcome.exit_code(), 0);
}

#[test]
fn table_missing_from_dictionary_exits_nonzero() {
    let fixture = fixture(&["ID"]);
    let document = json!({
        "Table": {"Name": "payments", "StorageDescriptor": {"Columns": [{"Name": "ID"}]}}
    });
    let path = fixture.catalog.table_path("crm", "payments");
    fs::write(&path, document.to_string()).unwrap();

    let request = request(&fixture, "payments");
    let outcome = run_request(&request, request.match_options(), &fixture.catalog).unwrap();
    assert!(matches!(
        outcome,
        ReconcileOutcome::TableNotInDictionary { ref table } if table == "payments"
    ));
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn lookup_threshold_from_request_allows_near_table_names() {
    let fixture = fixture(&["ID"]);
    let document = json!({
        "Table": {
            "Name": "user",
            "StorageDescriptor": {"Columns": [{"Name": "ID"}, {"Name": "Notes"}]}
        }
    });
    let path = fixture.catalog.table_path("crm", "user");
    fs::write(&path, document.to_string()).unwrap();

    let mut request = request(&fixture, "user");
    let outcome = run_request(&request, request.match_options(), &fixture.catalog).unwrap();
    assert!(matches!(outcome, ReconcileOutcome::TableNotInDictionary { .. }));

    request.lookup_threshold = 85;
    request.dryrun = false;
    let outcome = run_request(&request, request.match_options(), &fixture.catalog).unwrap();
    let reconciliation = outcome.reconciliation().unwrap();
    assert_eq!(reconciliation.dictionary_table, "users");
    let ReconcileOutcome::Pruned { written, .. } = &outcome else {
        panic!("expected pruned outcome");
    };
    assert_eq!(written.as_deref(), Some(path.as_path()));
    let stored = fixture.catalog.get_table("crm", "user").unwrap();
    assert_eq!(stored.column_names(), vec!["ID"]);
}

#[test]
fn missing_catalog_table_is_an_error() {
    let fixture = fixture(&["ID"]);
    let request = request(&fixture, "orders");
    let err = run_request(&request, request.match_options(), &fixture.catalog).unwrap_err();
    assert!(format!("{err:#}").contains("not found in catalog"));
}

#[test]
fn request_file_uses_camel_case_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("request.json");
    fs::write(
        &path,
        r#"{"tableName": "tbl_users", "file": "dd.csv", "reserveChar": "_", "dryrun": false}"#,
    )
    .unwrap();
    let request = load_request(&path).unwrap();
    assert_eq!(request.table_name, "tbl_users");
    assert_eq!(request.reserve_char, "_");
    assert!(!request.dryrun);
    assert_eq!(request.threshold, 80);
}
