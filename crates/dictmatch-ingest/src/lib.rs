//! Data dictionary loading and schema catalog access.
//!
//! - [`read_data_dictionary`] turns a dictionary file into a [`DataDictionary`].
//! - [`SchemaCatalog`] reads and writes catalog table definitions;
//!   [`JsonCatalog`] keeps them as JSON documents on disk.
//!
//! [`DataDictionary`]: dictmatch_model::DataDictionary

pub mod catalog;
pub mod dictionary;
pub mod error;

pub use catalog::{CatalogColumn, CatalogTable, JsonCatalog, READ_ONLY_TABLE_KEYS, SchemaCatalog};
pub use dictionary::{DictionaryFormat, read_data_dictionary, read_data_dictionary_from_reader};
pub use error::{IngestError, Result};
