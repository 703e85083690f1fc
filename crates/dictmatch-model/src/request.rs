//! Invocation payload for a reconcile run.
//!
//! Field names are camelCase so request files written for the handler's
//! JSON payload load unchanged.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::options::{
    DEFAULT_LOOKUP_THRESHOLD, DEFAULT_MATCH_THRESHOLD, MatchOptions, NormalizationConfig,
};

/// Schema catalog backend a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogTarget {
    /// Table documents stored as JSON files under a catalog directory.
    #[default]
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileRequest {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub reserve_char: String,
    /// Catalog table to reconcile.
    #[serde(default)]
    pub table_name: String,
    /// Data dictionary file.
    #[serde(default)]
    pub file: PathBuf,
    /// Worksheet name, required for spreadsheet dictionaries.
    #[serde(default)]
    pub sheet_name: String,
    /// Root directory of the JSON schema catalog.
    #[serde(default)]
    pub catalog_dir: PathBuf,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub target: CatalogTarget,
    /// Report suggestions only, without updating the catalog.
    #[serde(default = "default_dryrun")]
    pub dryrun: bool,
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Minimum score for the table name lookup; 100 requires an exact match.
    #[serde(default = "default_lookup_threshold")]
    pub lookup_threshold: u8,
}

fn default_dryrun() -> bool {
    true
}

fn default_threshold() -> u8 {
    DEFAULT_MATCH_THRESHOLD
}

fn default_lookup_threshold() -> u8 {
    DEFAULT_LOOKUP_THRESHOLD
}

impl Default for ReconcileRequest {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            reserve_char: String::new(),
            table_name: String::new(),
            file: PathBuf::new(),
            sheet_name: String::new(),
            catalog_dir: PathBuf::new(),
            database: String::new(),
            target: CatalogTarget::default(),
            dryrun: default_dryrun(),
            threshold: default_threshold(),
            lookup_threshold: default_lookup_threshold(),
        }
    }
}

impl ReconcileRequest {
    pub fn normalization(&self) -> NormalizationConfig {
        NormalizationConfig::new()
            .with_prefix(self.prefix.clone())
            .with_suffix(self.suffix.clone())
            .with_reserved_char(self.reserve_char.clone())
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions::new()
            .with_normalization(self.normalization())
            .with_match_threshold(self.threshold)
            .with_lookup_threshold(self.lookup_threshold)
    }

    /// Sheet name, if one was given.
    pub fn sheet(&self) -> Option<&str> {
        let sheet = self.sheet_name.trim();
        if sheet.is_empty() { None } else { Some(sheet) }
    }

    /// Checks that the fields needed for a run are present.
    pub fn validate(&self) -> Result<()> {
        if self.table_name.trim().is_empty() {
            return Err(ModelError::InvalidRequest("tableName is required".into()));
        }
        if self.file.as_os_str().is_empty() {
            return Err(ModelError::InvalidRequest("file is required".into()));
        }
        self.match_options().validate()
    }
}
