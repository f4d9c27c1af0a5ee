use super::*;
use crate::config::Settings;
use crate::error::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::debug;

/// The slice of the hosting API the pipeline depends on.
pub trait HostingApi: Send + Sync {
    /// Every repository of `org`, across all listing pages.
    fn list_repositories(
        &self,
        org: &str,
    ) -> impl Future<Output = Result<Vec<Repository>, FetchError>> + Send;

    /// Weekly per-author series for one repository.
    fn contributor_stats(
        &self,
        org: &str,
        repo: &str,
    ) -> impl Future<Output = Result<Vec<ContributorStats>, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub token: String,
}

pub struct GitHubClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    page_size: u32,
}

impl GitHubClient {
    pub fn new(settings: &Settings, credentials: Credentials) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            credentials,
            page_size: settings.page_size,
        })
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .basic_auth(&self.credentials.user, Some(&self.credentials.token))
            .send()
            .await?;

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                path: path.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })
    }

    pub async fn org_info(&self, org: &str) -> Result<OrgInfo, FetchError> {
        let path = format!("/orgs/{}", org);
        let response = self.get(&path, &[]).await?;
        Self::decode(&path, response).await
    }

    pub async fn repository_page(&self, org: &str, page: u64) -> Result<Vec<Repository>, FetchError> {
        let path = format!("/orgs/{}/repos", org);
        let query = [
            ("page", page.to_string()),
            ("per_page", self.page_size.to_string()),
        ];
        let response = self.get(&path, &query).await?;
        Self::decode(&path, response).await
    }
}

impl HostingApi for GitHubClient {
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>, FetchError> {
        let info = self.org_info(org).await?;
        let pages = info.page_count(self.page_size);
        debug!(
            "{} reports {} repositories, fetching {} pages",
            org,
            info.repo_count(),
            pages
        );

        let mut repos = Vec::new();
        for page in 1..=pages {
            let batch = self.repository_page(org, page).await?;
            let last = batch.len() < self.page_size as usize;
            repos.extend(batch);
            // The reported count is only a hint; a short page is the end.
            if last {
                break;
            }
        }

        Ok(repos)
    }

    async fn contributor_stats(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<ContributorStats>, FetchError> {
        let path = format!("/repos/{}/{}/stats/contributors", org, repo);
        let response = self.get(&path, &[]).await?;

        match response.status() {
            StatusCode::ACCEPTED => Err(FetchError::Computing { path }),
            // Empty repositories have no statistics at all.
            StatusCode::NO_CONTENT => Ok(Vec::new()),
            _ => Self::decode(&path, response).await,
        }
    }
}
