//! Fuzzy reconciliation of schema catalog column names with data dictionary names.
//!
//! The pipeline for one table is: [`normalize`] both sides, build a
//! [`ScoreVector`] per catalog column, [`Resolver::resolve`] the vectors into a
//! one-to-one assignment, and [`classify`] it into matched, unmatched and
//! ambiguous columns. [`Reconciler`] wires these steps together.

#![deny(unsafe_code)]

pub mod classify;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod normalize;
pub mod resolver;
pub mod score;

pub use classify::classify;
pub use engine::{Reconciler, TableReconciliation, retain_reconciled};
pub use error::{MatchError, Result};
pub use lookup::{find_exact, lookup_table};
pub use normalize::{normalize, token_sort_key};
pub use resolver::{Claim, Contention, Dropped, Resolution, Resolver};
pub use score::{NameScore, ScoreVector, check_names, rank, similarity, token_sort_similarity};
