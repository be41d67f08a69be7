use crate::github::{ChangedFile, FileStatus, PullRequest};
use crate::report::Report;

pub const LARGE_PR_WARNING: &str = ":exclamation: Pull Request size seems relatively large. If Pull Request contains multiple changes, split each into separate PR for faster, easier review.";

/// Everything the rules look at.
#[derive(Debug, Clone)]
pub struct ReviewContext {
    pub pull_request: PullRequest,
    pub files: Vec<ChangedFile>,
}

impl ReviewContext {
    /// Files that existed before the PR and still exist after it.
    pub fn modified_files(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Modified)
            .map(|f| f.filename.as_str())
            .collect()
    }
}

/// Lists the modified files. Always produces a message, even when the list
/// is empty.
pub fn list_changed_files(ctx: &ReviewContext, report: &mut Report) {
    let mut message = String::from("Changed Files in this PR: \n");
    for file in ctx.modified_files() {
        message.push_str(" - ");
        message.push_str(file);
        message.push('\n');
    }
    report.message(message.trim_end());
}

/// Warns when additions plus deletions exceed `threshold`.
pub fn review_large_pr(ctx: &ReviewContext, threshold: u64, report: &mut Report) {
    let size = ctx.pull_request.additions + ctx.pull_request.deletions;
    if size > threshold {
        report.warn(LARGE_PR_WARNING);
    }
}

pub fn run_all(ctx: &ReviewContext, large_pr_threshold: u64) -> Report {
    let mut report = Report::default();
    list_changed_files(ctx, &mut report);
    review_large_pr(ctx, large_pr_threshold, &mut report);
    report
}
