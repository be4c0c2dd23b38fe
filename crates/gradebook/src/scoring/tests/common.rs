use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::config::CourseConfig;
use crate::scoring::domain::{
    Flag, MergeRequest, MergeRequestStatus, PipelineRun, PipelineStatus, Schedule, Task, TaskGroup,
    User,
};
use crate::scoring::naming::CourseUrls;
use crate::scoring::scorer::Scorer;
use crate::scoring::store::{ScheduleProvider, SignalStore, StoreError};

pub(super) fn deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 6, 21, 0, 0)
        .single()
        .expect("valid deadline")
}

pub(super) fn second_deadline() -> DateTime<Utc> {
    deadline() + Duration::days(14)
}

pub(super) fn schedule() -> Schedule {
    Schedule {
        groups: vec![
            TaskGroup {
                title: "01-intro".to_string(),
                deadline: deadline(),
                tasks: vec![
                    Task {
                        name: "01-intro/hello-world".to_string(),
                        max_score: 100,
                    },
                    Task {
                        name: "01-intro/ci-basics".to_string(),
                        max_score: 50,
                    },
                ],
            },
            TaskGroup {
                title: "02-containers".to_string(),
                deadline: second_deadline(),
                tasks: vec![Task {
                    name: "02-containers/vector".to_string(),
                    max_score: 200,
                }],
            },
        ],
    }
}

pub(super) fn student(id: u64, first: &str, last: &str, login: &str) -> User {
    User {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        cohort: "cpp26".to_string(),
        subgroup: Some("a1".to_string()),
        forge_login: Some(login.to_string()),
    }
}

pub(super) fn course_urls() -> CourseUrls {
    CourseUrls::new(&CourseConfig::default())
}

pub(super) fn project_of(user: &User) -> String {
    use crate::scoring::store::ProjectNamer;
    course_urls().project_name(user)
}

pub(super) fn pipeline(
    id: i64,
    project: &str,
    task: &str,
    status: PipelineStatus,
    started_at: DateTime<Utc>,
) -> PipelineRun {
    PipelineRun {
        id,
        task: task.to_string(),
        project: project.to_string(),
        status,
        started_at,
    }
}

pub(super) fn merge_request(
    id: i64,
    project: &str,
    task: &str,
    status: MergeRequestStatus,
) -> MergeRequest {
    MergeRequest {
        id,
        iid: id,
        task: task.to_string(),
        project: project.to_string(),
        status,
    }
}

pub(super) fn flag(task: &str, login: Option<&str>, created_at: DateTime<Utc>) -> Flag {
    Flag {
        id: format!("{{FLAG-{task}}}"),
        task: task.to_string(),
        submitted_by: login.map(str::to_string),
        created_at,
    }
}

/// In-memory store standing in for the datastore and schedule collaborators.
#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) users: Vec<User>,
    pub(super) pipelines: Vec<PipelineRun>,
    pub(super) merge_requests: Vec<MergeRequest>,
    pub(super) flags: Vec<Flag>,
    pub(super) schedules: HashMap<String, Schedule>,
    pub(super) fail_pipelines: bool,
}

impl MemoryStore {
    pub(super) fn with_cohort_schedule(mut self, cohort: &str, schedule: Schedule) -> Self {
        self.schedules.insert(cohort.to_string(), schedule);
        self
    }

    pub(super) fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub(super) fn with_pipeline(mut self, pipeline: PipelineRun) -> Self {
        self.pipelines.push(pipeline);
        self
    }

    pub(super) fn with_merge_request(mut self, merge_request: MergeRequest) -> Self {
        self.merge_requests.push(merge_request);
        self
    }

    pub(super) fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    fn check_pipelines(&self) -> Result<(), StoreError> {
        if self.fail_pipelines {
            Err(StoreError::Unavailable("pipelines offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SignalStore for MemoryStore {
    fn project_pipelines(&self, project: &str) -> Result<Vec<PipelineRun>, StoreError> {
        self.check_pipelines()?;
        Ok(self
            .pipelines
            .iter()
            .filter(|run| run.project == project)
            .cloned()
            .collect())
    }

    fn all_pipelines(&self) -> Result<Vec<PipelineRun>, StoreError> {
        self.check_pipelines()?;
        Ok(self.pipelines.clone())
    }

    fn project_merge_requests(&self, project: &str) -> Result<Vec<MergeRequest>, StoreError> {
        Ok(self
            .merge_requests
            .iter()
            .filter(|request| request.project == project)
            .cloned()
            .collect())
    }

    fn all_merge_requests(&self) -> Result<Vec<MergeRequest>, StoreError> {
        Ok(self.merge_requests.clone())
    }

    fn user_flags(&self, login: &str) -> Result<Vec<Flag>, StoreError> {
        Ok(self
            .flags
            .iter()
            .filter(|flag| flag.submitted_by.as_deref() == Some(login))
            .cloned()
            .collect())
    }

    fn submitted_flags(&self) -> Result<Vec<Flag>, StoreError> {
        Ok(self
            .flags
            .iter()
            .filter(|flag| flag.submitted_by.is_some())
            .cloned()
            .collect())
    }

    fn cohort_users(&self, cohort: &str, subgroup: Option<&str>) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .filter(|user| user.cohort == cohort)
            .filter(|user| subgroup.is_none() || user.subgroup.as_deref() == subgroup)
            .cloned()
            .collect())
    }

    fn find_user(&self, login: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|user| user.forge_login.as_deref() == Some(login))
            .cloned())
    }
}

impl ScheduleProvider for MemoryStore {
    fn cohort_schedule(&self, cohort: &str) -> Result<Option<Schedule>, StoreError> {
        Ok(self.schedules.get(cohort).cloned())
    }
}

pub(super) fn build_scorer(store: MemoryStore) -> Scorer<MemoryStore, MemoryStore, CourseUrls> {
    Scorer::new(
        Arc::new(store.clone()),
        Arc::new(store),
        Arc::new(course_urls()),
    )
}
