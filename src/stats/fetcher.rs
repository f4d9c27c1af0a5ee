use super::*;
use crate::error::FetchError;
use crate::github::{ContributorStats, HostingApi};
use tracing::debug;

/// Folds one author's weekly series into a total per window.
///
/// Every point counts towards all-time; the narrower windows each test
/// the point's week start against their own cutoff. Returns `None` for
/// contributors GitHub no longer has an account for.
pub fn collapse(contributor: ContributorStats, cutoffs: &Cutoffs) -> Option<AuthorRepoTotals> {
    let author = contributor.author?;
    let mut totals: WindowSet<WindowedTotals> = WindowSet::default();

    for point in &contributor.weeks {
        for window in Window::ALL {
            if cutoffs.contains_timestamp(window, point.week_start) {
                totals[window].add_point(point);
            }
        }
    }

    Some(AuthorRepoTotals {
        author,
        totals,
        weeks: contributor.weeks.len(),
        last_week_start: contributor.weeks.last().map(|point| point.week_start),
    })
}

pub async fn fetch_repository<A>(
    api: &A,
    org: &str,
    repo: &str,
    cutoffs: &Cutoffs,
) -> Result<RepoStats, FetchError>
where
    A: HostingApi + ?Sized,
{
    let contributors = api.contributor_stats(org, repo).await?;
    debug!("{} has {} contributors", repo, contributors.len());

    let authors = contributors
        .into_iter()
        .filter_map(|contributor| collapse(contributor, cutoffs))
        .collect();

    Ok(RepoStats {
        repo: repo.to_string(),
        authors,
    })
}
