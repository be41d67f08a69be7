/// Findings collected by the review rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    messages: Vec<String>,
    warnings: Vec<String>,
}

impl Report {
    pub fn message(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.warnings.push(text.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.warnings.is_empty()
    }

    /// Markdown body for a PR comment: warnings first, then messages.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("## PR Review\n");
        if !self.warnings.is_empty() {
            out.push_str("\n### Warnings\n\n");
            for warning in &self.warnings {
                out.push_str(&format!(":warning: {}\n\n", warning));
            }
        }
        if !self.messages.is_empty() {
            out.push_str("\n### Messages\n\n");
            for message in &self.messages {
                out.push_str(&format!(":book: {}\n\n", message));
            }
        }
        out.trim_end().to_string() + "\n"
    }
}
