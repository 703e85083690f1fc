use anyhow::{Context, Result};
use tracing::{debug, info};

use dictmatch_cli::reconcile::{ReconcileOutcome, load_request, run_request};
use dictmatch_ingest::{JsonCatalog, read_data_dictionary};
use dictmatch_map::{NameScore, check_names, lookup_table};
use dictmatch_model::{CatalogTarget, MatchOptions, ReconcileRequest};

use crate::cli::{LookupArgs, ReconcileArgs, ScoreArgs};

/// Builds the request from the optional request file and the flags.
pub fn build_request(args: &ReconcileArgs) -> Result<ReconcileRequest> {
    let mut request = match &args.request {
        Some(path) => load_request(path)?,
        None => ReconcileRequest::default(),
    };
    let normalization = &args.normalization;
    if let Some(prefix) = &normalization.prefix {
        request.prefix.clone_from(prefix);
    }
    if let Some(suffix) = &normalization.suffix {
        request.suffix.clone_from(suffix);
    }
    if let Some(reserved) = &normalization.reserve_char {
        request.reserve_char.clone_from(reserved);
    }
    if let Some(table) = &args.table {
        request.table_name.clone_from(table);
    }
    if let Some(file) = &args.dictionary {
        request.file.clone_from(file);
    }
    if let Some(sheet) = &args.sheet {
        request.sheet_name.clone_from(sheet);
    }
    if let Some(dir) = &args.catalog_dir {
        request.catalog_dir.clone_from(dir);
    }
    if let Some(database) = &args.database {
        request.database.clone_from(database);
    }
    if let Some(threshold) = args.threshold {
        request.threshold = threshold;
    }
    if let Some(threshold) = args.lookup_threshold {
        request.lookup_threshold = threshold;
    }
    if args.apply {
        request.dryrun = false;
    }
    request.validate().context("invalid reconcile request")?;
    Ok(request)
}

pub fn run_reconcile(args: &ReconcileArgs) -> Result<ReconcileOutcome> {
    let request = build_request(args)?;
    debug!(?request, "reconcile request");
    let options: MatchOptions = request
        .match_options()
        .with_outbid_policy(args.outbid_policy.into());
    let catalog = match request.target {
        CatalogTarget::Json => JsonCatalog::new(&request.catalog_dir),
    };
    let outcome = run_request(&request, options, &catalog)?;
    if let ReconcileOutcome::Pruned {
        written: Some(path),
        ..
    } = &outcome
    {
        info!(path = %path.display(), "pruned table written");
    }
    Ok(outcome)
}

pub fn run_lookup(args: &LookupArgs) -> Result<Option<String>> {
    let dictionary = read_data_dictionary(&args.dictionary, args.sheet.as_deref())
        .with_context(|| format!("read data dictionary {}", args.dictionary.display()))?;
    let found = lookup_table(
        &args.table,
        dictionary.table_names(),
        &args.normalization.config(),
        args.threshold,
    );
    Ok(found.map(str::to_string))
}

pub fn run_score(args: &ScoreArgs) -> Result<NameScore> {
    let score = check_names(
        &args.name,
        args.target.as_deref(),
        &args.candidates,
        &args.normalization.config(),
    )?;
    Ok(score)
}
