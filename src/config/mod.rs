use crate::error::OrgStatError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Tunables for a run. Every field has a default so an empty settings
/// file (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub user_agent: String,
    /// Repositories requested per listing page.
    pub page_size: u32,
    /// Upper bound on contributor-stat requests in flight at once.
    pub max_concurrent_fetches: usize,
    /// Number of authors kept per window in the report.
    pub top_authors: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("orgstat/{}", env!("CARGO_PKG_VERSION")),
            page_size: 30,
            max_concurrent_fetches: 8,
            top_authors: 100,
        }
    }
}

impl Settings {
    /// Layers defaults, the optional settings file and `ORGSTAT_*`
    /// environment variables, in that order.
    pub fn load(file: Option<&Path>) -> Result<Self, OrgStatError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(config::Environment::with_prefix("ORGSTAT"));

        let settings: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| OrgStatError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), OrgStatError> {
        if self.max_concurrent_fetches == 0 {
            return Err(OrgStatError::Config(
                "max_concurrent_fetches must be at least 1".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(OrgStatError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(OrgStatError::Config("api_url must not be empty".to_string()));
        }
        Ok(())
    }
}
