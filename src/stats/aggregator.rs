use super::ranker::{rank, RankedReport, RankedWindow};
use super::*;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// An author's running totals within one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorEntry {
    pub author: AuthorIdentity,
    pub totals: WindowedTotals,
}

/// Author login to running totals, one map per window.
pub type AggregationMap = HashMap<String, AuthorEntry>;

#[derive(Debug, Default)]
struct AggregationState {
    maps: WindowSet<AggregationMap>,
    repositories: usize,
}

/// Organisation-wide totals. Shared between fetch tasks; each merge
/// happens under one lock so a repository is folded in atomically.
#[derive(Debug)]
pub struct Aggregator {
    cutoffs: Cutoffs,
    state: Mutex<AggregationState>,
}

impl Aggregator {
    pub fn new(cutoffs: Cutoffs) -> Self {
        Self {
            cutoffs,
            state: Mutex::new(AggregationState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AggregationState> {
        // A merge cannot panic halfway through a map update.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Folds one repository's per-author totals into every window.
    ///
    /// An author's repository count goes up in a window when they have
    /// any weekly data for the repository and the last week of that
    /// series falls inside the window. All-time counts the repository
    /// whenever the series is non-empty.
    pub fn merge(&self, stats: &RepoStats) {
        let mut state = self.lock();
        debug!("Merging {} authors from {}", stats.authors.len(), stats.repo);

        for contribution in &stats.authors {
            let login = &contribution.author.login;

            for window in Window::ALL {
                let entry = state.maps[window]
                    .entry(login.clone())
                    .or_insert_with(|| AuthorEntry {
                        author: contribution.author.clone(),
                        totals: WindowedTotals::default(),
                    });

                entry.totals.accumulate(&contribution.totals[window]);

                let active = match contribution.last_week_start {
                    Some(_) if window == Window::AllTime => true,
                    Some(start) => self.cutoffs.contains_timestamp(window, start),
                    None => false,
                };
                if contribution.weeks > 0 && active {
                    entry.totals.repo_count += 1;
                }
            }
        }

        state.repositories += 1;
    }

    pub fn cutoffs(&self) -> Cutoffs {
        self.cutoffs
    }

    /// Number of repositories merged so far.
    pub fn repositories(&self) -> usize {
        self.lock().repositories
    }

    pub fn author_count(&self) -> usize {
        self.lock().maps[Window::AllTime].len()
    }

    /// Current totals of `login` in `window`.
    #[cfg(test)]
    pub fn totals(&self, window: Window, login: &str) -> Option<WindowedTotals> {
        self.lock().maps[window].get(login).map(|entry| entry.totals)
    }

    /// Ranks every window, keeping at most `limit` authors each.
    pub fn report(&self, limit: usize) -> RankedReport {
        let state = self.lock();
        let windows = state
            .maps
            .iter()
            .map(|(window, map)| RankedWindow {
                window,
                title: window.title(),
                entries: rank(map.values(), limit),
            })
            .collect();

        RankedReport {
            generated_at: self.cutoffs.now(),
            windows,
        }
    }
}
