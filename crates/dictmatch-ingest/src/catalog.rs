//! Schema catalog access.
//!
//! Catalog tables use the Glue `GetTable` response shape:
//! `{"Table": {"Name": .., "StorageDescriptor": {"Columns": [{"Name": ..}, ..]}, ..}}`.
//! Everything outside the column names is carried through untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Table keys the catalog sets itself and rejects on update.
pub const READ_ONLY_TABLE_KEYS: [&str; 8] = [
    "DatabaseName",
    "CreateTime",
    "UpdateTime",
    "CreatedBy",
    "IsRegisteredWithLakeFormation",
    "CatalogId",
    "VersionId",
    "FederatedTable",
];

/// A store of table definitions grouped by database.
pub trait SchemaCatalog {
    /// Loads a table definition.
    fn get_table(&self, database: &str, table: &str) -> Result<CatalogTable>;

    /// Persists a definition under the name it was loaded with and returns
    /// where it was written.
    fn update_table(
        &self,
        database: &str,
        table: &str,
        definition: &CatalogTable,
    ) -> Result<PathBuf>;
}

/// One catalog column: its name plus whatever else the catalog stores.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogColumn {
    pub name: String,
    /// Remaining column fields (`Type`, `Comment`, ...), kept verbatim.
    pub metadata: Map<String, Value>,
}

impl CatalogColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let name = object.get("Name")?.as_str()?.to_string();
        let metadata = object
            .iter()
            .filter(|(key, _)| key.as_str() != "Name")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Some(Self { name, metadata })
    }

    fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("Name".to_string(), Value::String(self.name.clone()));
        for (key, value) in &self.metadata {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

/// A catalog table definition.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTable {
    document: Value,
}

impl CatalogTable {
    /// Wraps a `GetTable`-shaped document after checking its structure.
    pub fn from_document(document: Value, source: &Path) -> Result<Self> {
        let format_err = |reason: &str| IngestError::CatalogFormat {
            path: source.to_path_buf(),
            reason: reason.to_string(),
        };
        let table = document
            .get("Table")
            .and_then(Value::as_object)
            .ok_or_else(|| format_err("missing \"Table\" object"))?;
        if table.get("Name").and_then(Value::as_str).is_none() {
            return Err(format_err("missing table name"));
        }
        let columns = table
            .get("StorageDescriptor")
            .and_then(|sd| sd.get("Columns"))
            .and_then(Value::as_array)
            .ok_or_else(|| format_err("missing \"StorageDescriptor.Columns\" array"))?;
        if columns.iter().any(|column| CatalogColumn::from_value(column).is_none()) {
            return Err(format_err("every column needs a \"Name\""));
        }
        Ok(Self { document })
    }

    pub fn name(&self) -> &str {
        self.document["Table"]["Name"].as_str().unwrap_or_default()
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn columns(&self) -> Vec<CatalogColumn> {
        self.document["Table"]["StorageDescriptor"]["Columns"]
            .as_array()
            .map(|columns| columns.iter().filter_map(CatalogColumn::from_value).collect())
            .unwrap_or_default()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns().into_iter().map(|column| column.name).collect()
    }

    /// Returns a copy of the table with its column list replaced.
    pub fn with_columns(&self, columns: &[CatalogColumn]) -> Self {
        let mut document = self.document.clone();
        document["Table"]["StorageDescriptor"]["Columns"] =
            Value::Array(columns.iter().map(CatalogColumn::to_value).collect());
        Self { document }
    }

    /// The table object without the keys listed in [`READ_ONLY_TABLE_KEYS`].
    ///
    /// This is the payload an update call accepts.
    pub fn to_table_input(&self) -> Value {
        let mut table = self.document["Table"].clone();
        if let Some(object) = table.as_object_mut() {
            for key in READ_ONLY_TABLE_KEYS {
                object.remove(key);
            }
        }
        table
    }
}

/// Catalog kept as JSON files under `{root}/{database}/{table}.json`.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    root: PathBuf,
}

impl JsonCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self, database: &str, table: &str) -> PathBuf {
        self.root.join(database).join(format!("{table}.json"))
    }
}

impl SchemaCatalog for JsonCatalog {
    fn get_table(&self, database: &str, table: &str) -> Result<CatalogTable> {
        let path = self.table_path(database, table);
        if !path.exists() {
            return Err(IngestError::TableNotFound {
                database: database.to_string(),
                table: table.to_string(),
            });
        }
        let text = fs::read_to_string(&path).map_err(|source| IngestError::FileRead {
            path: path.clone(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&text).map_err(|source| IngestError::CatalogParse {
                path: path.clone(),
                source,
            })?;
        let table = CatalogTable::from_document(document, &path)?;
        debug!(
            path = %path.display(),
            columns = table.columns().len(),
            "catalog table loaded"
        );
        Ok(table)
    }

    fn update_table(
        &self,
        database: &str,
        table: &str,
        definition: &CatalogTable,
    ) -> Result<PathBuf> {
        let path = self.table_path(database, table);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| IngestError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = serde_json::to_string_pretty(definition.document()).map_err(|source| {
            IngestError::CatalogParse {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, text).map_err(|source| IngestError::FileWrite {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), table, "catalog table updated");
        Ok(path)
    }
}
