use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "AI Resume Analysis Report";
pub const DEFAULT_FOOTER: &str = "Generated by InsightEyes Resume Analyzer • https://insighteyes.ai";

/// Application configuration loaded from environment variables.
/// Every key has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub report: ReportSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let offset_minutes = std::env::var("REPORT_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<i32>()
            .context("REPORT_UTC_OFFSET_MINUTES must be an integer number of minutes")?;
        let utc_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| anyhow!("REPORT_UTC_OFFSET_MINUTES out of range: {offset_minutes}"))?;

        let overflow_policy = std::env::var("REPORT_OVERFLOW_POLICY")
            .unwrap_or_else(|_| "truncate".to_string())
            .parse::<OverflowPolicy>()
            .context("REPORT_OVERFLOW_POLICY must be 'truncate' or 'reject'")?;

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            report: ReportSettings {
                title: std::env::var("REPORT_TITLE").unwrap_or_else(|_| DEFAULT_TITLE.to_string()),
                footer: std::env::var("REPORT_FOOTER")
                    .unwrap_or_else(|_| DEFAULT_FOOTER.to_string()),
                utc_offset,
                overflow_policy,
            },
        })
    }
}

/// What the layout engine does when flow content would reach the footer zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Cut the section to whole lines and mark the cut in the document.
    Truncate,
    /// Fail the export with `ReportError::LayoutOverflow`.
    Reject,
}

impl std::str::FromStr for OverflowPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(OverflowPolicy::Truncate),
            "reject" => Ok(OverflowPolicy::Reject),
            other => Err(anyhow!("unknown overflow policy '{other}'")),
        }
    }
}

/// Settings shared by the text formatter, layout engine, and renderer.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub title: String,
    pub footer: String,
    /// Offset used when formatting capture timestamps.
    pub utc_offset: FixedOffset,
    pub overflow_policy: OverflowPolicy,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            title: DEFAULT_TITLE.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
            utc_offset: Utc.fix(),
            overflow_policy: OverflowPolicy::Truncate,
        }
    }
}
