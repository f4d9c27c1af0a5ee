use super::fetcher::fetch_repository;
use super::*;
use crate::error::OrgStatError;
use crate::github::HostingApi;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRepository {
    pub repo: String,
    pub reason: String,
}

/// Outcome of the fetch phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<FailedRepository>,
}

pub fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Fetches contributor statistics for every repository and merges them
/// into `aggregator`.
///
/// At most `max_in_flight` requests run at once; the next repository is
/// only submitted when a slot frees up. Returns once every repository has
/// been attempted. A repository that fails to fetch is logged, recorded in
/// the summary and otherwise ignored.
pub async fn collect_org_stats<A>(
    api: Arc<A>,
    org: &str,
    repos: &[String],
    aggregator: Arc<Aggregator>,
    max_in_flight: usize,
    progress: ProgressBar,
) -> FetchSummary
where
    A: HostingApi + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_in_flight.max(1)));
    let cutoffs = aggregator.cutoffs();
    let mut join_set = JoinSet::new();
    let mut task_repos = HashMap::new();
    let mut summary = FetchSummary {
        attempted: repos.len(),
        ..FetchSummary::default()
    };

    for (i, repo) in repos.iter().enumerate() {
        // The semaphore is never closed.
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };

        let api = Arc::clone(&api);
        let aggregator = Arc::clone(&aggregator);
        let progress = progress.clone();
        let org = org.to_string();
        let repo = repo.clone();

        debug!("{}/{} {}", i + 1, repos.len(), repo);
        let task_repo = repo.clone();
        let handle = join_set.spawn(async move {
            let _permit = permit;
            progress.set_message(repo.clone());

            let result = fetch_repository(api.as_ref(), &org, &repo, &cutoffs)
                .await
                .map(|stats| aggregator.merge(&stats))
                .map_err(|source| OrgStatError::Fetch {
                    repo: repo.clone(),
                    source,
                });

            progress.inc(1);
            result
        });
        task_repos.insert(handle.id(), task_repo);
    }

    while let Some(joined) = join_set.join_next_with_id().await {
        match joined {
            Ok((_, Ok(()))) => summary.succeeded += 1,
            Ok((id, Err(e))) => {
                let repo = task_repos.remove(&id).unwrap_or_default();
                warn!("{}", e);
                summary.failed.push(FailedRepository {
                    repo,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                let repo = task_repos.remove(&e.id()).unwrap_or_default();
                warn!("Fetch task for {} did not complete: {}", repo, e);
                summary.failed.push(FailedRepository {
                    repo,
                    reason: e.to_string(),
                });
            }
        }
    }

    progress.finish_and_clear();
    summary
}
