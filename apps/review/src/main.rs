//! Pull request review automation.
//!
//! Fetches the pull request under review from GitHub, runs the review rules,
//! prints the report and optionally posts it as a PR comment. Warnings never
//! fail the run.
//!
//! Usage:
//!     GITHUB_REPOSITORY=owner/name PR_NUMBER=12 cargo run -p pr-review

mod config;
mod github;
mod report;
mod rules;

use anyhow::Context;
use config::Config;
use github::{GithubClient, PullRequestApi};
use report::Report;
use rules::ReviewContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,pr_review=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let client = GithubClient::new(&config).context("failed to build GitHub client")?;

    let report = review(&client, config.pr_number, config.large_pr_threshold).await?;
    println!("{}", report.to_markdown());

    publish(&client, &config, &report).await?;

    Ok(())
}

/// Posts the report as a PR comment when enabled. Returns whether a comment
/// was posted; an empty report is never posted.
async fn publish(api: &dyn PullRequestApi, config: &Config, report: &Report) -> anyhow::Result<bool> {
    if !config.post_comment || report.is_empty() {
        return Ok(false);
    }

    api.post_comment(config.pr_number, &report.to_markdown())
        .await
        .with_context(|| format!("failed to comment on PR #{}", config.pr_number))?;
    tracing::info!("Posted review comment on PR #{}", config.pr_number);
    Ok(true)
}

async fn review(api: &dyn PullRequestApi, number: u64, large_pr_threshold: u64) -> anyhow::Result<Report> {
    let pull_request = api
        .pull_request(number)
        .await
        .with_context(|| format!("failed to load PR #{}", number))?;
    let files = api
        .changed_files(number)
        .await
        .with_context(|| format!("failed to list files of PR #{}", number))?;

    tracing::info!(
        pr = pull_request.number,
        additions = pull_request.additions,
        deletions = pull_request.deletions,
        files = files.len(),
        "Reviewing pull request"
    );

    let ctx = ReviewContext { pull_request, files };
    Ok(rules::run_all(&ctx, large_pr_threshold))
}
