//! Scoring and standings engine for programming-course progress tracking.
//!
//! The [`scoring`] module reconciles continuous-integration runs, code-review
//! requests, and manually submitted completion flags into per-student task
//! statuses, deadline-decayed scores, and a ranked standings table. The engine
//! only reads snapshots handed to it through the traits in
//! [`scoring::store`]; persistence and forge synchronization live elsewhere.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
