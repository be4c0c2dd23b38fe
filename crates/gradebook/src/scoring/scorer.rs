use std::sync::Arc;

use super::decay::{DecayConfig, DecayPolicy};
use super::domain::{
    prettify_title, short_task_name, MergeRequestStatus, Schedule, ScoredTask, ScoredTaskGroup,
    Standings, TaskStatus, User, UserScores, UserSummary,
};
use super::reduce::{current_merge_requests, earliest_flags, latest_pipelines};
use super::snapshot::{CachedFeed, SignalFeed, StoreFeed};
use super::store::{ProjectNamer, ScheduleProvider, ScoringError, SignalStore};

/// Reconciles signal snapshots into per-task statuses, decayed scores, and
/// ranked cohort standings.
///
/// Every public operation is one synchronous pass over data supplied by the
/// collaborators; nothing is cached across calls and nothing is mutated.
pub struct Scorer<S, D, N> {
    store: Arc<S>,
    schedule: Arc<D>,
    urls: Arc<N>,
    policy: DecayPolicy,
    decay: DecayConfig,
}

impl<S, D, N> Scorer<S, D, N>
where
    S: SignalStore,
    D: ScheduleProvider,
    N: ProjectNamer,
{
    pub fn new(store: Arc<S>, schedule: Arc<D>, urls: Arc<N>) -> Self {
        Self {
            store,
            schedule,
            urls,
            policy: DecayPolicy::Exponential,
            decay: DecayConfig::default(),
        }
    }

    /// Select a decay policy and its constants for this scorer.
    pub fn with_decay(mut self, policy: DecayPolicy, decay: DecayConfig) -> Self {
        self.policy = policy;
        self.decay = decay;
        self
    }

    /// Score a single user against their cohort's schedule.
    pub fn score_user(&self, user: &User) -> Result<UserScores, ScoringError> {
        let schedule = self.load_schedule(&user.cohort)?;
        let feed = StoreFeed::new(self.store.as_ref());
        self.score_user_with(&schedule, user, &feed)
    }

    /// Score a user looked up by forge login.
    pub fn score_login(&self, login: &str) -> Result<UserScores, ScoringError> {
        let user = self
            .store
            .find_user(login)
            .map_err(|source| ScoringError::store("find user", source))?
            .ok_or_else(|| ScoringError::UnknownUser(login.to_string()))?;
        self.score_user(&user)
    }

    /// Score every user in a cohort (optionally one subgroup) and rank them.
    ///
    /// Signals are pulled with three bulk queries and partitioned up front;
    /// each user is then scored from the shared snapshot.
    pub fn score_cohort(
        &self,
        cohort: &str,
        subgroup: Option<&str>,
    ) -> Result<Standings, ScoringError> {
        let schedule = self.load_schedule(cohort)?;
        let users = self
            .store
            .cohort_users(cohort, subgroup)
            .map_err(|source| ScoringError::store("list cohort users", source))?;

        let feed = CachedFeed::load(self.store.as_ref())?;

        let mut scores = Vec::with_capacity(users.len());
        for user in &users {
            scores.push(self.score_user_with(&schedule, user, &feed)?);
        }

        scores.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.tasks_on_review.cmp(&a.tasks_on_review))
                .then_with(|| a.user.full_name().cmp(&b.user.full_name()))
        });

        Ok(Standings {
            schedule,
            users: scores,
        })
    }

    fn load_schedule(&self, cohort: &str) -> Result<Schedule, ScoringError> {
        match self
            .schedule
            .cohort_schedule(cohort)
            .map_err(|source| ScoringError::store("fetch deadline schedule", source))?
        {
            Some(schedule) if !schedule.groups.is_empty() => Ok(schedule),
            _ => Err(ScoringError::MissingSchedule(cohort.to_string())),
        }
    }

    fn score_user_with(
        &self,
        schedule: &Schedule,
        user: &User,
        feed: &impl SignalFeed,
    ) -> Result<UserScores, ScoringError> {
        let login = user
            .forge_login
            .as_deref()
            .ok_or_else(|| ScoringError::UserNotLinked(user.full_name()))?;
        let project = self.urls.project_name(user);

        let pipelines = latest_pipelines(feed.pipelines(&project)?);
        let merge_requests = current_merge_requests(feed.merge_requests(&project)?);
        let flags = earliest_flags(feed.flags(login)?);

        let mut scores = UserScores {
            user: UserSummary {
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                cohort: user.cohort.clone(),
                subgroup: user.subgroup.clone(),
                login: login.to_string(),
                project: project.clone(),
                project_url: self.urls.project_url(user),
            },
            groups: Vec::with_capacity(schedule.groups.len()),
            score: 0,
            max_score: 0,
            tasks_on_review: 0,
        };

        for group in &schedule.groups {
            let mut tasks = Vec::with_capacity(group.tasks.len());
            let mut group_score = 0u32;
            let mut group_max = 0u32;
            let mut on_review = 0u32;

            for task in &group.tasks {
                let mut scored = ScoredTask {
                    name: task.name.clone(),
                    short_name: short_task_name(&task.name).to_string(),
                    status: TaskStatus::Assigned,
                    score: 0,
                    max_score: task.max_score,
                    task_url: self.urls.task_url(&task.name),
                    submit_url: None,
                };
                group_max += task.max_score;

                if let Some(pipeline) = pipelines.get(&task.name) {
                    scored.status = TaskStatus::from_pipeline(pipeline.status);
                    if scored.status == TaskStatus::Success {
                        scored.score = self.policy.score(
                            &self.decay,
                            task.max_score,
                            group.deadline,
                            pipeline.started_at,
                        );
                    }
                    scored.submit_url = Some(self.urls.pipeline_url(user, pipeline));

                    if let Some(merge_request) = merge_requests.get(&task.name) {
                        scored.submit_url = Some(self.urls.merge_request_url(user, merge_request));
                        on_review += 1;

                        if scored.status == TaskStatus::Success {
                            match merge_request.status {
                                MergeRequestStatus::OnReview => {
                                    scored.status = TaskStatus::OnReview;
                                    scored.score = 0;
                                }
                                MergeRequestStatus::PendingReview => {
                                    scored.status = TaskStatus::Pending;
                                    scored.score = 0;
                                }
                                // Review finished; the pipeline's credit stands.
                                MergeRequestStatus::Merged => {}
                            }
                        }
                    }
                } else if let Some(flag) = flags.get(&task.name) {
                    // A flag stands in for a success pipeline started at the
                    // submission time, decay included.
                    scored.status = TaskStatus::Success;
                    scored.score = self.policy.score(
                        &self.decay,
                        task.max_score,
                        group.deadline,
                        flag.created_at,
                    );
                }

                group_score += scored.score;
                tasks.push(scored);
            }

            scores.score += group_score;
            scores.max_score += group_max;
            scores.tasks_on_review += on_review;
            scores.groups.push(ScoredTaskGroup {
                title: group.title.clone(),
                pretty_title: prettify_title(&group.title),
                deadline: group.deadline,
                score: group_score,
                max_score: group_max,
                tasks,
            });
        }

        Ok(scores)
    }
}
