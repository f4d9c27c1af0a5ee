use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod client;

pub use client::{Credentials, GitHubClient, HostingApi};

/// Repository counts reported by `GET /orgs/{org}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrgInfo {
    #[serde(default)]
    pub public_repos: u64,
    /// Only present when the credential can see private repositories.
    #[serde(default)]
    pub total_private_repos: Option<u64>,
}

impl OrgInfo {
    pub fn repo_count(&self) -> u64 {
        self.public_repos
            .saturating_add(self.total_private_repos.unwrap_or(0))
    }

    /// Number of listing pages needed to cover every repository.
    pub fn page_count(&self, page_size: u32) -> u64 {
        self.repo_count().div_ceil(u64::from(page_size.max(1)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// One week of one author's activity in one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStatPoint {
    /// Start of the week, seconds since the Unix epoch.
    #[serde(rename = "w")]
    pub week_start: i64,
    #[serde(rename = "a")]
    pub additions: u64,
    #[serde(rename = "d")]
    pub deletions: u64,
    #[serde(rename = "c")]
    pub commits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorIdentity {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// One entry of `GET /repos/{org}/{repo}/stats/contributors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorStats {
    /// `null` for commits whose author account no longer exists.
    pub author: Option<AuthorIdentity>,
    #[serde(default)]
    pub weeks: Vec<WeeklyStatPoint>,
}
