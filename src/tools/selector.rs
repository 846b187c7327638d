//! Fuzzy selection.
//!
//! Candidates are written to the selector's stdin; the chosen line is read
//! back from stdout. Exit status 1 (no match) and 130 (interrupted) both mean
//! nothing was chosen.

use tracing::debug;

use super::error::ToolError;
use super::process::{describe_status, run_output};

/// Exit status when no candidate matched.
const EXIT_NO_MATCH: i32 = 1;

/// Exit status when the user aborted the selector.
const EXIT_INTERRUPTED: i32 = 130;

/// What to show in the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    /// Candidate labels, one per line.
    pub candidates: Vec<String>,
    /// Visible height in lines.
    pub height: usize,
    /// Prompt string.
    pub prompt: String,
    /// Initial query.
    pub query: Option<String>,
}

impl SelectionRequest {
    /// Creates a request sized to the candidate list.
    ///
    /// The height reserves two extra lines for the prompt and the info line.
    #[must_use]
    pub fn new(candidates: Vec<String>, prompt: impl Into<String>) -> Self {
        let height = candidates.len() + 2;
        Self {
            candidates,
            height,
            prompt: prompt.into(),
            query: None,
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }
}

/// An interactive line picker.
#[allow(async_fn_in_trait)]
pub trait FuzzySelector {
    /// Returns the chosen label, or `None` when nothing was chosen.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot run or fails unexpectedly.
    async fn select(&self, request: &SelectionRequest) -> Result<Option<String>, ToolError>;
}

/// Builds the argument list for an fzf-compatible selector.
///
/// `--select-1` accepts automatically when exactly one candidate matches.
#[must_use]
pub fn selector_args(request: &SelectionRequest) -> Vec<String> {
    let mut args = vec![
        "--height".to_string(),
        request.height.to_string(),
        "--prompt".to_string(),
        request.prompt.clone(),
        "--select-1".to_string(),
    ];
    if let Some(query) = &request.query {
        args.push("--query".to_string());
        args.push(query.clone());
    }
    args
}

/// Selector backed by `fzf` or a compatible binary.
#[derive(Debug, Clone)]
pub struct FzfSelector {
    command: String,
}

impl FzfSelector {
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl FuzzySelector for FzfSelector {
    async fn select(&self, request: &SelectionRequest) -> Result<Option<String>, ToolError> {
        let mut input = request.candidates.join("\n");
        input.push('\n');

        let output = run_output(&self.command, &selector_args(request), Some(&input)).await?;

        match output.status.code() {
            Some(0) => {
                let chosen = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok((!chosen.is_empty()).then_some(chosen))
            }
            Some(EXIT_NO_MATCH) | Some(EXIT_INTERRUPTED) => {
                debug!("選択されませんでした");
                Ok(None)
            }
            _ => Err(ToolError::Failed(
                self.command.clone(),
                describe_status(&output.status),
            )),
        }
    }
}

/// Mock selector for testing.
#[derive(Debug, Default)]
pub struct MockSelector {
    choice: Option<String>,
    requests: std::sync::Mutex<Vec<SelectionRequest>>,
}

impl MockSelector {
    /// A selector that always returns `label`.
    #[must_use]
    pub fn choosing(label: impl Into<String>) -> Self {
        Self {
            choice: Some(label.into()),
            ..Self::default()
        }
    }

    /// A selector that never chooses anything.
    #[must_use]
    pub fn cancelling() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get_requests(&self) -> Vec<SelectionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl FuzzySelector for MockSelector {
    async fn select(&self, request: &SelectionRequest) -> Result<Option<String>, ToolError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.choice.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_height_follows_candidates() {
        let request = SelectionRequest::new(vec!["a/b".into(), "c/d".into()], "repo> ");
        assert_eq!(request.height, 4);
        assert!(request.query.is_none());
    }

    #[test]
    fn test_selector_args() {
        let request = SelectionRequest::new(vec!["a/b".into()], "repo> ");
        assert_eq!(
            selector_args(&request),
            vec!["--height", "3", "--prompt", "repo> ", "--select-1"]
        );
    }

    #[test]
    fn test_selector_args_with_query() {
        let request = SelectionRequest::new(vec!["a/b".into()], "> ")
            .with_query(Some("shell".to_string()));
        let args = selector_args(&request);
        assert_eq!(&args[args.len() - 2..], &["--query", "shell"]);
    }

    #[tokio::test]
    async fn test_missing_selector() {
        let selector = FzfSelector::new("shellkit-definitely-missing-fzf-12345");
        let request = SelectionRequest::new(vec!["a/b".into()], "> ");
        assert!(matches!(
            selector.select(&request).await,
            Err(ToolError::NotInstalled(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_code_mapping() {
        let request = SelectionRequest::new(vec!["a/b".into()], "> ");

        // `false` exits with 1: treated as no selection.
        let none = FzfSelector::new("false").select(&request).await.unwrap();
        assert!(none.is_none());

        // `true` exits 0 with empty output: nothing chosen.
        let empty = FzfSelector::new("true").select(&request).await.unwrap();
        assert!(empty.is_none());
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockSelector::choosing("a/b");
        let request = SelectionRequest::new(vec!["a/b".into()], "> ");
        assert_eq!(mock.select(&request).await.unwrap(), Some("a/b".to_string()));
        assert_eq!(mock.get_requests(), vec![request]);

        let cancelling = MockSelector::cancelling();
        let request = SelectionRequest::new(vec!["x/y".into()], "> ");
        assert!(cancelling.select(&request).await.unwrap().is_none());
    }
}
