//! Reconciliation of CI runs, review requests, and completion flags into
//! per-task statuses, deadline-decayed scores, and ranked cohort standings.
//!
//! The engine is a synchronous pass over snapshots supplied by the traits in
//! [`store`]; it issues no retries, holds no locks, and recomputes every
//! derived value on each call.

pub mod decay;
pub mod domain;
pub mod naming;
pub(crate) mod reduce;
pub mod router;
pub mod scorer;
pub(crate) mod snapshot;
pub mod store;

#[cfg(test)]
mod tests;

pub use decay::{DecayConfig, DecayPolicy};
pub use domain::{
    Flag, MergeRequest, MergeRequestStatus, PipelineRun, PipelineStatus, Schedule, ScoredTask,
    ScoredTaskGroup, Standings, Task, TaskGroup, TaskStatus, User, UserScores, UserSummary,
};
pub use naming::CourseUrls;
pub use router::scoring_router;
pub use scorer::Scorer;
pub use store::{
    ProjectNamer, ScheduleProvider, ScoringError, SignalStore, StoreError,
};
