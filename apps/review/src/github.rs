use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::Config;

/// GitHub caps the files endpoint at 3000 entries, 100 per page.
const FILES_PER_PAGE: usize = 100;
const MAX_FILE_PAGES: usize = 30;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GitHub answered {status} for {url}: {body}")]
    Status {
        status: StatusCode,
        url: String,
        body: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    pub status: FileStatus,
}

/// The slice of the GitHub API the review needs.
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    async fn pull_request(&self, number: u64) -> Result<PullRequest, GithubError>;
    async fn changed_files(&self, number: u64) -> Result<Vec<ChangedFile>, GithubError>;
    async fn post_comment(&self, number: u64, body: &str) -> Result<(), GithubError>;
}

pub struct GithubClient {
    http: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self, GithubError> {
        let http = Client::builder()
            .user_agent(concat!("pr-review/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, self.owner, self.repo, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/vnd.github+json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<reqwest::Response, GithubError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(GithubError::Status {
            status,
            url: url.to_string(),
            body,
        })
    }
}

#[async_trait]
impl PullRequestApi for GithubClient {
    #[instrument(skip(self))]
    async fn pull_request(&self, number: u64) -> Result<PullRequest, GithubError> {
        let url = self.url(&format!("pulls/{}", number));
        let response = self.send(self.http.get(&url), &url).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn changed_files(&self, number: u64) -> Result<Vec<ChangedFile>, GithubError> {
        let mut files = Vec::new();
        for page in 1..=MAX_FILE_PAGES {
            let url = self.url(&format!(
                "pulls/{}/files?per_page={}&page={}",
                number, FILES_PER_PAGE, page
            ));
            let batch: Vec<ChangedFile> = self.send(self.http.get(&url), &url).await?.json().await?;
            let last_page = batch.len() < FILES_PER_PAGE;
            debug!(page, count = batch.len(), "fetched changed files");
            files.extend(batch);
            if last_page {
                break;
            }
        }
        Ok(files)
    }

    #[instrument(skip(self, body))]
    async fn post_comment(&self, number: u64, body: &str) -> Result<(), GithubError> {
        let url = self.url(&format!("issues/{}/comments", number));
        self.send(self.http.post(&url).json(&CommentBody { body }), &url)
            .await?;
        Ok(())
    }
}
