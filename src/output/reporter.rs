use super::*;
use crate::error::OrgStatError;
use std::fs;
use std::io::Write;
use tracing::info;

use super::html::HtmlGenerator;

/// Output path meaning standard output.
pub const STDOUT: &str = "-";

pub struct Reporter {
    format: OutputFormat,
    output_path: String,
}

impl Reporter {
    pub fn new(format: &str, output_path: &str) -> Self {
        Self {
            format: OutputFormat::from(format),
            output_path: output_path.to_string(),
        }
    }

    pub fn render(&self, data: &ReportData) -> Result<String> {
        match self.format {
            OutputFormat::Html => HtmlGenerator::new()?.generate(data),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        }
    }

    pub fn generate_report(&self, data: &ReportData) -> Result<()> {
        let content = self.render(data)?;

        let written = if self.output_path == STDOUT {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
        } else {
            fs::write(&self.output_path, content)
        };

        written.map_err(|source| OrgStatError::Write {
            path: self.output_path.clone(),
            source,
        })?;

        if self.output_path != STDOUT {
            info!("Report saved to {}", self.output_path);
        }
        Ok(())
    }
}
