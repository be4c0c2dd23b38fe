use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

use gradebook::config::CourseConfig;
use gradebook::scoring::{
    CourseUrls, Flag, MergeRequest, MergeRequestStatus, PipelineRun, PipelineStatus, ProjectNamer,
    Schedule, ScheduleProvider, SignalStore, StoreError, Task, TaskGroup, User,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only in-memory datastore backing the demo commands, the seeded
/// server, and route tests.
#[derive(Default, Clone)]
pub(crate) struct InMemorySignalStore {
    users: Vec<User>,
    pipelines: Vec<PipelineRun>,
    merge_requests: Vec<MergeRequest>,
    flags: Vec<Flag>,
    schedules: HashMap<String, Schedule>,
}

impl SignalStore for InMemorySignalStore {
    fn project_pipelines(&self, project: &str) -> Result<Vec<PipelineRun>, StoreError> {
        Ok(self
            .pipelines
            .iter()
            .filter(|run| run.project == project)
            .cloned()
            .collect())
    }

    fn all_pipelines(&self) -> Result<Vec<PipelineRun>, StoreError> {
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

impl ScheduleProvider for InMemorySignalStore {
    fn cohort_schedule(&self, cohort: &str) -> Result<Option<Schedule>, StoreError> {
        Ok(self.schedules.get(cohort).cloned())
    }
}

pub(crate) const DEMO_COHORT: &str = "cpp26";

fn demo_user(id: u64, first: &str, last: &str, subgroup: &str, login: &str) -> User {
    User {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        cohort: DEMO_COHORT.to_string(),
        subgroup: Some(subgroup.to_string()),
        forge_login: Some(login.to_string()),
    }
}

fn first_deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 20, 21, 0, 0)
        .single()
        .expect("valid deadline")
}

fn second_deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 6, 21, 0, 0)
        .single()
        .expect("valid deadline")
}

/// A small but representative cohort: on-time and late successes, a task held
/// on review, a flag-based completion, and an untouched student.
pub(crate) fn seeded_course() -> InMemorySignalStore {
    let urls = CourseUrls::new(&CourseConfig::default());

    let ada = demo_user(1, "Ada", "Lovelace", "a1", "ada");
    let grace = demo_user(2, "Grace", "Hopper", "a1", "grace");
    let linus = demo_user(3, "Linus", "Sebastian", "a2", "linus");

    let ada_project = urls.project_name(&ada);
    let grace_project = urls.project_name(&grace);
    let linus_project = urls.project_name(&linus);

    let schedule = Schedule {
        groups: vec![
            TaskGroup {
                title: "01-intro".to_string(),
                deadline: first_deadline(),
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
    };

    let pipelines = vec![
        PipelineRun {
            id: 101,
            task: "01-intro/hello-world".to_string(),
            project: ada_project.clone(),
            status: PipelineStatus::Success,
            started_at: first_deadline() - Duration::days(2),
        },
        PipelineRun {
            id: 102,
            task: "01-intro/ci-basics".to_string(),
            project: ada_project.clone(),
            status: PipelineStatus::Success,
            started_at: first_deadline() - Duration::hours(6),
        },
        PipelineRun {
            id: 103,
            task: "02-containers/vector".to_string(),
            project: ada_project.clone(),
            status: PipelineStatus::Success,
            started_at: second_deadline() + Duration::days(5),
        },
        PipelineRun {
            id: 201,
            task: "01-intro/hello-world".to_string(),
            project: grace_project.clone(),
            status: PipelineStatus::Success,
            started_at: first_deadline() + Duration::days(1),
        },
        PipelineRun {
            id: 202,
            task: "01-intro/ci-basics".to_string(),
            project: grace_project.clone(),
            status: PipelineStatus::Failed,
            started_at: first_deadline() - Duration::hours(3),
        },
        PipelineRun {
            id: 301,
            task: "01-intro/hello-world".to_string(),
            project: linus_project,
            status: PipelineStatus::Running,
            started_at: second_deadline() + Duration::days(1),
        },
    ];

    let merge_requests = vec![MergeRequest {
        id: 11,
        iid: 4,
        task: "01-intro/ci-basics".to_string(),
        project: ada_project,
        status: MergeRequestStatus::OnReview,
    }];

    let flags = vec![Flag {
        id: "{FLAG-02-containers/vector}".to_string(),
        task: "02-containers/vector".to_string(),
        submitted_by: Some("grace".to_string()),
        created_at: second_deadline() - Duration::days(1),
    }];

    InMemorySignalStore {
        users: vec![ada, grace, linus],
        pipelines,
        merge_requests,
        flags,
        schedules: HashMap::from([(DEMO_COHORT.to_string(), schedule)]),
    }
}
