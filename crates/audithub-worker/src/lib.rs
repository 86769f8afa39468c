//! # audithub-worker
//!
//! Background maintenance for AuditHub. Currently a single task: the
//! periodic sweep of expired session rows.

pub mod reaper;

pub use reaper::SessionReaper;
