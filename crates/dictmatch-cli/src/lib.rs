//! Library components of the dictmatch CLI.

pub mod logging;
pub mod reconcile;
pub mod report;
