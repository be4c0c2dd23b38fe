use chrono::Duration;

use super::common::{deadline, flag, merge_request, pipeline};
use crate::scoring::domain::{MergeRequestStatus, PipelineStatus};
use crate::scoring::reduce::{current_merge_requests, earliest_flags, latest_pipelines};

#[test]
fn latest_pipeline_wins_regardless_of_input_order() {
    let early = pipeline(1, "p", "t", PipelineStatus::Failed, deadline());
    let late = pipeline(
        2,
        "p",
        "t",
        PipelineStatus::Success,
        deadline() + Duration::hours(2),
    );

    let reduced = latest_pipelines(vec![late.clone(), early.clone()]);
    assert_eq!(reduced.get("t"), Some(&late));

    let reduced = latest_pipelines(vec![early, late.clone()]);
    assert_eq!(reduced.get("t"), Some(&late));
}

#[test]
fn open_merge_request_supersedes_merged() {
    let merged = merge_request(1, "p", "t", MergeRequestStatus::Merged);
    let open = merge_request(2, "p", "t", MergeRequestStatus::OnReview);

    let reduced = current_merge_requests(vec![merged.clone(), open.clone()]);
    assert_eq!(reduced.get("t"), Some(&open));

    // A later merged record does not displace a still-open one.
    let reduced = current_merge_requests(vec![open.clone(), merged]);
    assert_eq!(reduced.get("t"), Some(&open));
}

#[test]
fn all_merged_keeps_last_seen() {
    let first = merge_request(1, "p", "t", MergeRequestStatus::Merged);
    let second = merge_request(2, "p", "t", MergeRequestStatus::Merged);

    let reduced = current_merge_requests(vec![first, second.clone()]);
    assert_eq!(reduced.get("t"), Some(&second));
}

#[test]
fn earliest_flag_is_canonical() {
    let first = flag("t", Some("ada"), deadline() - Duration::days(1));
    let resubmitted = flag("t", Some("ada"), deadline() + Duration::days(3));

    let reduced = earliest_flags(vec![resubmitted, first.clone()]);
    assert_eq!(reduced.get("t"), Some(&first));
}

#[test]
fn reducers_are_idempotent() {
    let records = vec![
        pipeline(1, "p", "a", PipelineStatus::Success, deadline()),
        pipeline(2, "p", "a", PipelineStatus::Failed, deadline() + Duration::hours(1)),
        pipeline(3, "p", "b", PipelineStatus::Success, deadline()),
    ];

    let once = latest_pipelines(records);
    let twice = latest_pipelines(once.values().cloned().collect());
    assert_eq!(once, twice);
}

#[test]
fn tasks_reduce_independently() {
    let reduced = current_merge_requests(vec![
        merge_request(1, "p", "a", MergeRequestStatus::Merged),
        merge_request(2, "p", "b", MergeRequestStatus::OnReview),
    ]);

    assert_eq!(reduced.len(), 2);
    assert_eq!(reduced.get("a").map(|r| r.status), Some(MergeRequestStatus::Merged));
    assert_eq!(reduced.get("b").map(|r| r.status), Some(MergeRequestStatus::OnReview));
}
