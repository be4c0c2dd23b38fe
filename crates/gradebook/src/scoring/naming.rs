use super::domain::{MergeRequest, PipelineRun, User};
use super::store::ProjectNamer;
use crate::config::CourseConfig;

/// Builds student-facing forge URLs from the course namespace configuration.
#[derive(Debug, Clone)]
pub struct CourseUrls {
    base_url: String,
    group: String,
    task_url_prefix: String,
}

impl CourseUrls {
    pub fn new(course: &CourseConfig) -> Self {
        Self {
            base_url: course.base_url.trim_end_matches('/').to_string(),
            group: course.group.clone(),
            task_url_prefix: course.task_url_prefix.trim_end_matches('/').to_string(),
        }
    }
}

// Name parts feed into dash-separated project slugs, so embedded dashes
// would corrupt the parse on the way back.
fn cleanup_name(name: &str) -> String {
    name.replace('-', "")
}

impl ProjectNamer for CourseUrls {
    fn project_name(&self, user: &User) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            user.cohort,
            user.subgroup.as_deref().unwrap_or_default(),
            cleanup_name(&user.first_name),
            cleanup_name(&user.last_name),
            user.forge_login.as_deref().unwrap_or_default(),
        )
    }

    fn project_url(&self, user: &User) -> String {
        format!("{}/{}/{}", self.base_url, self.group, self.project_name(user))
    }

    fn pipeline_url(&self, user: &User, pipeline: &PipelineRun) -> String {
        format!(
            "{}/{}/{}/-/pipelines/{}",
            self.base_url,
            self.group,
            self.project_name(user),
            pipeline.id
        )
    }

    fn merge_request_url(&self, user: &User, merge_request: &MergeRequest) -> String {
        format!(
            "{}/{}/{}/-/merge_requests/{}",
            self.base_url,
            self.group,
            self.project_name(user),
            merge_request.iid
        )
    }

    fn task_url(&self, task: &str) -> String {
        format!("{}/{}", self.task_url_prefix, task)
    }
}
