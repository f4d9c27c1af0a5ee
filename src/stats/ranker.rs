use super::aggregator::AuthorEntry;
use super::*;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// 1-based position in the window.
    pub rank: usize,
    pub author: AuthorIdentity,
    pub totals: WindowedTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedWindow {
    pub window: Window,
    pub title: &'static str,
    pub entries: Vec<RankedEntry>,
}

/// The top authors of every window, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedReport {
    pub generated_at: DateTime<Utc>,
    pub windows: Vec<RankedWindow>,
}

/// Orders authors by descending commit count and keeps at most `limit`.
///
/// Equal commit counts are broken by login so the output does not depend
/// on map iteration order.
pub fn rank<'a, I>(entries: I, limit: usize) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = &'a AuthorEntry>,
{
    let mut sorted: Vec<&AuthorEntry> = entries.into_iter().collect();
    sorted.sort_by(|a, b| {
        b.totals
            .commits
            .cmp(&a.totals.commits)
            .then_with(|| a.author.login.cmp(&b.author.login))
    });

    sorted
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| RankedEntry {
            rank: i + 1,
            author: entry.author.clone(),
            totals: entry.totals,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(login: &str, commits: u64) -> AuthorEntry {
        AuthorEntry {
            author: AuthorIdentity {
                id: 0,
                login: login.to_string(),
                avatar_url: String::new(),
            },
            totals: WindowedTotals {
                commits,
                ..WindowedTotals::default()
            },
        }
    }

    fn logins(ranked: &[RankedEntry]) -> Vec<&str> {
        ranked.iter().map(|e| e.author.login.as_str()).collect()
    }

    #[test]
    fn ties_rank_above_lower_counts() {
        let entries = vec![entry("c", 10), entry("b", 50), entry("a", 50)];
        let ranked = rank(&entries, 100);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[2].author.login, "c");
        let mut top: Vec<_> = logins(&ranked[..2]);
        top.sort_unstable();
        assert_eq!(top, vec!["a", "b"]);
    }

    #[test]
    fn small_maps_are_returned_whole() {
        let entries = vec![entry("x", 1), entry("y", 3), entry("z", 2)];
        let ranked = rank(&entries, 100);

        assert_eq!(logins(&ranked), vec!["y", "z", "x"]);
        assert_eq!(
            ranked.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn large_maps_keep_the_top_hundred() {
        let entries: Vec<_> = (0..150u64)
            .map(|i| entry(&format!("user{:03}", i), i))
            .collect();
        let ranked = rank(&entries, 100);

        assert_eq!(ranked.len(), 100);
        assert_eq!(ranked[0].totals.commits, 149);
        assert_eq!(ranked[99].totals.commits, 50);
        assert_eq!(ranked[99].rank, 100);
        assert!(ranked.iter().all(|e| e.totals.commits >= 50));
    }

    #[test]
    fn empty_map_ranks_nothing() {
        let entries: Vec<AuthorEntry> = Vec::new();
        assert!(rank(&entries, 100).is_empty());
    }
}
