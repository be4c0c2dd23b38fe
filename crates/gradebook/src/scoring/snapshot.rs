//! The single abstraction behind both scoring paths: a feed supplies one
//! user's worth of signal records whether it is backed by per-project store
//! queries or by a pre-partitioned bulk snapshot.

use std::collections::HashMap;

use super::domain::{Flag, MergeRequest, PipelineRun};
use super::store::{ScoringError, SignalStore};

pub(crate) trait SignalFeed {
    fn pipelines(&self, project: &str) -> Result<Vec<PipelineRun>, ScoringError>;
    fn merge_requests(&self, project: &str) -> Result<Vec<MergeRequest>, ScoringError>;
    fn flags(&self, login: &str) -> Result<Vec<Flag>, ScoringError>;
}

/// Feed that queries the store per user. Used for single-user scoring.
pub(crate) struct StoreFeed<'a, S> {
    store: &'a S,
}

impl<'a, S> StoreFeed<'a, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: SignalStore> SignalFeed for StoreFeed<'_, S> {
    fn pipelines(&self, project: &str) -> Result<Vec<PipelineRun>, ScoringError> {
        self.store
            .project_pipelines(project)
            .map_err(|source| ScoringError::store("list user pipelines", source))
    }

    fn merge_requests(&self, project: &str) -> Result<Vec<MergeRequest>, ScoringError> {
        self.store
            .project_merge_requests(project)
            .map_err(|source| ScoringError::store("list user merge requests", source))
    }

    fn flags(&self, login: &str) -> Result<Vec<Flag>, ScoringError> {
        self.store
            .user_flags(login)
            .map_err(|source| ScoringError::store("list user flags", source))
    }
}

/// Feed backed by three bulk queries partitioned up front, so scoring a whole
/// cohort never issues one query per student.
pub(crate) struct CachedFeed {
    pipelines: HashMap<String, Vec<PipelineRun>>,
    merge_requests: HashMap<String, Vec<MergeRequest>>,
    flags: HashMap<String, Vec<Flag>>,
}

impl CachedFeed {
    pub(crate) fn load<S: SignalStore>(store: &S) -> Result<Self, ScoringError> {
        let mut pipelines: HashMap<String, Vec<PipelineRun>> = HashMap::new();
        for run in store
            .all_pipelines()
            .map_err(|source| ScoringError::store("list all pipelines", source))?
        {
            pipelines.entry(run.project.clone()).or_default().push(run);
        }

        let mut merge_requests: HashMap<String, Vec<MergeRequest>> = HashMap::new();
        for request in store
            .all_merge_requests()
            .map_err(|source| ScoringError::store("list all merge requests", source))?
        {
            merge_requests
                .entry(request.project.clone())
                .or_default()
                .push(request);
        }

        let mut flags: HashMap<String, Vec<Flag>> = HashMap::new();
        for flag in store
            .submitted_flags()
            .map_err(|source| ScoringError::store("list submitted flags", source))?
        {
            if let Some(login) = flag.submitted_by.clone() {
                flags.entry(login).or_default().push(flag);
            }
        }

        Ok(Self {
            pipelines,
            merge_requests,
            flags,
        })
    }
}

impl SignalFeed for CachedFeed {
    fn pipelines(&self, project: &str) -> Result<Vec<PipelineRun>, ScoringError> {
        Ok(self.pipelines.get(project).cloned().unwrap_or_default())
    }

    fn merge_requests(&self, project: &str) -> Result<Vec<MergeRequest>, ScoringError> {
        Ok(self.merge_requests.get(project).cloned().unwrap_or_default())
    }

    fn flags(&self, login: &str) -> Result<Vec<Flag>, ScoringError> {
        Ok(self.flags.get(login).cloned().unwrap_or_default())
    }
}
