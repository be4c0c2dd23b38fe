use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered course participant.
///
/// `forge_login` is populated once the student links their forge account;
/// scoring rejects users without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub cohort: String,
    pub subgroup: Option<String>,
    pub forge_login: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Outcome of one CI execution against a student's submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Pending,
    Running,
    Success,
    Failed,
}

/// One CI execution keyed by (project, task). Several runs may exist per key;
/// only the most recently started one reflects current code state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRun {
    pub id: i64,
    pub task: String,
    pub project: String,
    pub status: PipelineStatus,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeRequestStatus {
    PendingReview,
    OnReview,
    Merged,
}

/// Code-review request opened against a student's repository for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub id: i64,
    /// Project-scoped sequential number, used when building review links.
    pub iid: i64,
    pub task: String,
    pub project: String,
    pub status: MergeRequestStatus,
}

/// Manually submitted proof-of-completion token. `submitted_by` stays empty
/// until a student claims the flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub id: String,
    pub task: String,
    pub submitted_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Task as published in the deadline schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub max_score: u32,
}

/// Ordered group of tasks sharing one deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub tasks: Vec<Task>,
}

/// Deadline schedule snapshot for a cohort, immutable within a scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub groups: Vec<TaskGroup>,
}

/// Per-task classification derived from the reduced signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Assigned,
    Failed,
    Checking,
    Success,
    OnReview,
    Pending,
}

impl TaskStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TaskStatus::Assigned => "assigned",
            TaskStatus::Failed => "failed",
            TaskStatus::Checking => "checking",
            TaskStatus::Success => "success",
            TaskStatus::OnReview => "on_review",
            TaskStatus::Pending => "pending",
        }
    }

    pub const fn from_pipeline(status: PipelineStatus) -> Self {
        match status {
            PipelineStatus::Failed => TaskStatus::Failed,
            PipelineStatus::Pending | PipelineStatus::Running => TaskStatus::Checking,
            PipelineStatus::Success => TaskStatus::Success,
        }
    }
}

/// One task's scored state for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredTask {
    pub name: String,
    pub short_name: String,
    pub status: TaskStatus,
    pub score: u32,
    pub max_score: u32,
    pub task_url: String,
    /// Link to the latest pipeline, or to the review request once one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_url: Option<String>,
}

/// Scored task group matching the schedule's task order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredTaskGroup {
    pub title: String,
    pub pretty_title: String,
    pub deadline: DateTime<Utc>,
    pub score: u32,
    pub max_score: u32,
    pub tasks: Vec<ScoredTask>,
}

/// Identity fields rendered alongside a standings row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub first_name: String,
    pub last_name: String,
    pub cohort: String,
    pub subgroup: Option<String>,
    pub login: String,
    pub project: String,
    pub project_url: String,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One user's complete scored state across the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScores {
    pub user: UserSummary,
    pub groups: Vec<ScoredTaskGroup>,
    pub score: u32,
    pub max_score: u32,
    pub tasks_on_review: u32,
}

/// Ranked standings for a cohort together with the schedule snapshot used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub schedule: Schedule,
    pub users: Vec<UserScores>,
}

/// Last path segment of a hierarchical task name.
pub fn short_task_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Strips a leading `NN-` ordering prefix and title-cases the remainder, so
/// `"03-smart-pointers"` renders as `"Smart-Pointers"`.
pub fn prettify_title(title: &str) -> String {
    let stripped = title
        .split_once('-')
        .filter(|(prefix, rest)| {
            !prefix.is_empty() && !rest.is_empty() && prefix.chars().all(|c| c.is_ascii_digit())
        })
        .map(|(_, rest)| rest)
        .unwrap_or(title);
    title_case(stripped)
}

fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }
    out
}
