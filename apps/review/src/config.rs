//! Review tool configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `GITHUB_REPOSITORY`: `owner/name` of the repository under review
//! - `PR_NUMBER` or `GITHUB_EVENT_PATH`: pull request number, or the path of
//!   the `pull_request` event payload that carries it
//!
//! ## Optional Variables
//! - `GITHUB_TOKEN`: API token (required when posting the comment)
//! - `GITHUB_API_URL`: API base URL (default: "https://api.github.com")
//! - `PR_REVIEW_LARGE_THRESHOLD`: changed-line count above which a PR is
//!   flagged as large (default: 2)
//! - `PR_REVIEW_POST_COMMENT`: post the report as a PR comment (default: false)

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_LARGE_PR_THRESHOLD: u64 = 2;

#[derive(Debug, Clone)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
    pub token: Option<String>,
    pub api_url: String,
    pub large_pr_threshold: u64,
    pub post_comment: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let (owner, repo) = parse_repository(&env_required("GITHUB_REPOSITORY")?)?;

        let pr_number = match std::env::var("PR_NUMBER") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PR_NUMBER '{}' is not a number", raw))?,
            Err(_) => {
                let event_path = env_required("GITHUB_EVENT_PATH")
                    .context("set PR_NUMBER or GITHUB_EVENT_PATH")?;
                pr_number_from_event(Path::new(&event_path))?
            }
        };

        let post_comment = env_or("PR_REVIEW_POST_COMMENT", false)?;
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        if post_comment && token.is_none() {
            anyhow::bail!("GITHUB_TOKEN is required when PR_REVIEW_POST_COMMENT is enabled");
        }

        Ok(Self {
            owner,
            repo,
            pr_number,
            token,
            api_url: env_or("GITHUB_API_URL", "https://api.github.com".to_string())?
                .trim_end_matches('/')
                .to_string(),
            large_pr_threshold: env_or("PR_REVIEW_LARGE_THRESHOLD", DEFAULT_LARGE_PR_THRESHOLD)?,
            post_comment,
        })
    }
}

/// Splits `owner/name`.
pub fn parse_repository(value: &str) -> anyhow::Result<(String, String)> {
    match value.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => anyhow::bail!("GITHUB_REPOSITORY '{}' is not in owner/name form", value),
    }
}

#[derive(Deserialize)]
struct PullRequestEvent {
    pull_request: Option<EventPullRequest>,
    number: Option<u64>,
}

#[derive(Deserialize)]
struct EventPullRequest {
    number: u64,
}

/// Reads the pull request number from a workflow event payload.
pub fn pr_number_from_event(path: &Path) -> anyhow::Result<u64> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event payload {}", path.display()))?;
    parse_event_pr_number(&raw)
        .with_context(|| format!("event payload {} has no pull request", path.display()))
}

fn parse_event_pr_number(raw: &str) -> anyhow::Result<u64> {
    let event: PullRequestEvent = serde_json::from_str(raw).context("invalid event payload")?;
    event
        .pull_request
        .map(|pr| pr.number)
        .or(event.number)
        .ok_or_else(|| anyhow::anyhow!("missing pull_request.number"))
}

fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
