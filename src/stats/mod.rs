use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::github::{AuthorIdentity, WeeklyStatPoint};

pub mod aggregator;
pub mod fetcher;
pub mod pipeline;
pub mod ranker;
pub mod window;

pub use aggregator::Aggregator;
pub use pipeline::{collect_org_stats, FetchSummary};
pub use ranker::RankedReport;
pub use window::{Cutoffs, Window};

/// Contribution sums for one author within one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowedTotals {
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    /// Repositories the author was active in during the window.
    pub repo_count: u64,
}

impl WindowedTotals {
    pub fn add_point(&mut self, point: &WeeklyStatPoint) {
        self.commits += point.commits;
        self.additions += point.additions;
        self.deletions += point.deletions;
    }

    /// Adds the line and commit sums of `other`. Repository counts are
    /// tracked separately by the aggregator.
    pub fn accumulate(&mut self, other: &WindowedTotals) {
        self.commits += other.commits;
        self.additions += other.additions;
        self.deletions += other.deletions;
    }
}

/// One value per [`Window`], indexed by the window itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSet<T>([T; 4]);

impl<T> WindowSet<T> {
    pub fn iter(&self) -> impl Iterator<Item = (Window, &T)> {
        Window::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Window> for WindowSet<T> {
    type Output = T;

    fn index(&self, window: Window) -> &T {
        &self.0[window.position()]
    }
}

impl<T> IndexMut<Window> for WindowSet<T> {
    fn index_mut(&mut self, window: Window) -> &mut T {
        &mut self.0[window.position()]
    }
}

/// What one repository contributed for one author, as produced by the
/// stat fetcher.
#[derive(Debug, Clone)]
pub struct AuthorRepoTotals {
    pub author: AuthorIdentity,
    pub totals: WindowSet<WindowedTotals>,
    /// Length of the weekly series the totals were built from.
    pub weeks: usize,
    /// Week start of the last point in the series.
    pub last_week_start: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct RepoStats {
    pub repo: String,
    pub authors: Vec<AuthorRepoTotals>,
}
