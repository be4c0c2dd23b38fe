use super::domain::{Flag, MergeRequest, PipelineRun, Schedule, User};

/// Failure surfaced by a signal or schedule store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Read-only query surface over the synchronized signal records.
///
/// The `all_*` variants back the bulk caches used for cohort standings; the
/// project/login-scoped variants back single-user scoring.
pub trait SignalStore: Send + Sync {
    fn project_pipelines(&self, project: &str) -> Result<Vec<PipelineRun>, StoreError>;
    fn all_pipelines(&self) -> Result<Vec<PipelineRun>, StoreError>;
    fn project_merge_requests(&self, project: &str) -> Result<Vec<MergeRequest>, StoreError>;
    fn all_merge_requests(&self) -> Result<Vec<MergeRequest>, StoreError>;
    fn user_flags(&self, login: &str) -> Result<Vec<Flag>, StoreError>;
    /// Flags with a recorded submitter.
    fn submitted_flags(&self) -> Result<Vec<Flag>, StoreError>;
    fn cohort_users(&self, cohort: &str, subgroup: Option<&str>) -> Result<Vec<User>, StoreError>;
    fn find_user(&self, login: &str) -> Result<Option<User>, StoreError>;
}

/// Deadline schedule lookup for a cohort.
pub trait ScheduleProvider: Send + Sync {
    fn cohort_schedule(&self, cohort: &str) -> Result<Option<Schedule>, StoreError>;
}

/// Presentational naming collaborator. Called once per scored task; never
/// consulted for scoring decisions.
pub trait ProjectNamer: Send + Sync {
    fn project_name(&self, user: &User) -> String;
    fn project_url(&self, user: &User) -> String;
    fn pipeline_url(&self, user: &User, pipeline: &PipelineRun) -> String;
    fn merge_request_url(&self, user: &User, merge_request: &MergeRequest) -> String;
    fn task_url(&self, task: &str) -> String;
}

/// Error raised by the scoring engine. Any failure aborts the whole
/// computation; there is no partial-result mode.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("failed to {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("no deadline schedule for cohort '{0}'")]
    MissingSchedule(String),
    #[error("user '{0}' has no linked forge account")]
    UserNotLinked(String),
    #[error("unknown user '{0}'")]
    UnknownUser(String),
}

impl ScoringError {
    pub(crate) fn store(operation: &'static str, source: StoreError) -> Self {
        Self::Store { operation, source }
    }
}
