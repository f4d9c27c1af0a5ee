use super::format::thousands;
use super::*;
use crate::error::OrgStatError;
use rust_embed::RustEmbed;
use serde_json::{json, Value};
use std::collections::HashMap;
use tera::{Context, Tera};

#[derive(RustEmbed)]
#[folder = "src/output/templates/"]
#[include = "*.html"]
struct Templates;

#[derive(RustEmbed)]
#[folder = "src/output/assets/"]
#[include = "*.css"]
struct Assets;

const PROFILE_BASE_URL: &str = "https://github.com";

pub struct HtmlGenerator {
    tera: Tera,
}

impl HtmlGenerator {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        for file in Templates::iter() {
            let template_name = file.as_ref();
            let template_str = Self::embedded_text::<Templates>(template_name)?;
            tera.add_raw_template(template_name, &template_str)?;
        }

        tera.register_filter("thousands", Self::thousands_filter);

        Ok(Self { tera })
    }

    fn embedded_text<E: RustEmbed>(name: &str) -> Result<String> {
        let file = E::get(name)
            .ok_or_else(|| tera::Error::msg(format!("embedded file {} not found", name)))?;
        let text = std::str::from_utf8(&file.data)
            .map_err(|e| tera::Error::msg(format!("invalid UTF-8 in {}: {}", name, e)))?;
        Ok(text.to_string())
    }

    fn thousands_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let n = value
            .as_u64()
            .ok_or_else(|| tera::Error::msg(format!("thousands expects a count, got {}", value)))?;
        Ok(Value::String(thousands(n)))
    }

    fn prepare_template_context(&self, data: &ReportData) -> Result<Context> {
        let mut context = Context::new();

        context.insert("css_content", &Self::embedded_text::<Assets>("styles.css")?);
        context.insert("org", &data.org);
        context.insert(
            "generated_date",
            &data
                .report
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        );

        let sections: Vec<Value> = data
            .report
            .windows
            .iter()
            .map(|window| {
                let authors: Vec<Value> = window
                    .entries
                    .iter()
                    .map(|entry| {
                        json!({
                            "rank": entry.rank,
                            "login": entry.author.login,
                            "avatar_url": entry.author.avatar_url,
                            "profile_url": format!("{}/{}", PROFILE_BASE_URL, entry.author.login),
                            "commits": entry.totals.commits,
                            "repo_count": entry.totals.repo_count,
                            "additions": entry.totals.additions,
                            "deletions": entry.totals.deletions,
                        })
                    })
                    .collect();

                json!({
                    "title": window.title,
                    "authors": authors,
                })
            })
            .collect();
        context.insert("sections", &sections);
        context.insert("summary", &data.summary);

        Ok(context)
    }
}

impl OutputGenerator for HtmlGenerator {
    fn generate(&mut self, data: &ReportData) -> Result<String> {
        let context = self.prepare_template_context(data)?;
        self.tera
            .render("report.html", &context)
            .map_err(OrgStatError::from)
    }
}
