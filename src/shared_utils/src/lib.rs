//! Small helpers shared between workspace crates: environment lookups and the
//! configuration error type they report.

pub mod config;
pub mod env;
