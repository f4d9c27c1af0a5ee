use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single API request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path} returned {status}")]
    Status { status: StatusCode, path: String },

    /// GitHub answers 202 while it computes repository statistics in
    /// the background.
    #[error("statistics for {path} are still being computed, try again later")]
    Computing { path: String },

    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Run-level errors. `Fetch` is recorded and skipped; every other kind
/// aborts the run.
#[derive(Debug, Error)]
pub enum OrgStatError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("could not list repositories of {org}: {source}")]
    List {
        org: String,
        #[source]
        source: FetchError,
    },

    #[error("could not get stats for {repo}: {source}")]
    Fetch {
        repo: String,
        #[source]
        source: FetchError,
    },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("could not serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write report to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OrgStatError>;
