pub mod assignment;
pub mod dictionary;
pub mod error;
pub mod options;
pub mod request;

pub use assignment::{Advisory, AssignmentResult, Bucket, ColumnMatch, UnmatchedReason};
pub use dictionary::DataDictionary;
pub use error::{ModelError, Result};
pub use options::{
    DEFAULT_LOOKUP_THRESHOLD, DEFAULT_MATCH_THRESHOLD, MatchOptions, NormalizationConfig,
    OutbidPolicy,
};
pub use request::{CatalogTarget, ReconcileRequest};
