use serde::{Deserialize, Serialize};

pub mod format;
pub mod html;
pub mod reporter;

pub use reporter::Reporter;

use crate::error::Result;
use crate::stats::{FetchSummary, RankedReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Json,
    Html,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Html,
        }
    }
}

/// Everything a report is rendered from.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub org: String,
    pub report: RankedReport,
    pub summary: FetchSummary,
}

pub trait OutputGenerator {
    fn generate(&mut self, data: &ReportData) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_formats_fall_back_to_html() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("html"), OutputFormat::Html);
        assert_eq!(OutputFormat::from("pdf"), OutputFormat::Html);
    }
}
