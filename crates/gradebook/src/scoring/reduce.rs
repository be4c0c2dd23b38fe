//! Per-user signal reduction: collapse each record stream to one
//! representative per task, with a stream-specific tie-break rule.

use std::collections::HashMap;

use super::domain::{Flag, MergeRequest, MergeRequestStatus, PipelineRun};

/// One scan, keep-best-by-rule. `prefer` decides whether a newly scanned
/// record replaces the current representative for its task.
fn representatives<T>(
    records: Vec<T>,
    task: impl Fn(&T) -> &str,
    prefer: impl Fn(&T, &T) -> bool,
) -> HashMap<String, T> {
    let mut map: HashMap<String, T> = HashMap::new();
    for record in records {
        let key = task(&record);
        match map.get(key) {
            Some(current) if !prefer(&record, current) => {}
            _ => {
                let key = key.to_string();
                map.insert(key, record);
            }
        }
    }
    map
}

/// Only the latest CI attempt reflects the current code state.
pub(crate) fn latest_pipelines(runs: Vec<PipelineRun>) -> HashMap<String, PipelineRun> {
    representatives(
        runs,
        |run| run.task.as_str(),
        |new, current| new.started_at > current.started_at,
    )
}

/// A still-open request supersedes a previously seen merged one; among
/// records of equal standing, the last seen wins.
pub(crate) fn current_merge_requests(
    requests: Vec<MergeRequest>,
) -> HashMap<String, MergeRequest> {
    representatives(
        requests,
        |request| request.task.as_str(),
        |new, current| {
            new.status != MergeRequestStatus::Merged || current.status == MergeRequestStatus::Merged
        },
    )
}

/// Flags are submit-once proof: the earliest submission is canonical, so
/// resubmitting cannot reset deadline decay.
pub(crate) fn earliest_flags(flags: Vec<Flag>) -> HashMap<String, Flag> {
    representatives(
        flags,
        |flag| flag.task.as_str(),
        |new, current| new.created_at < current.created_at,
    )
}
