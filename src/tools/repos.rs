//! Repository listing.
//!
//! Wraps an external repository manager that prints one full repository
//! path per line (by default `ghq list --full-path`).

use std::path::PathBuf;

use tracing::debug;

use super::error::ToolError;
use super::process::{describe_status, run_output};
use crate::config::RepositoriesConfig;

/// Lists known repositories.
#[allow(async_fn_in_trait)]
pub trait RepositoryLister {
    /// Returns every known repository path.
    ///
    /// # Errors
    ///
    /// Returns an error if the lister cannot run or reports a failure.
    async fn list(&self) -> Result<Vec<PathBuf>, ToolError>;
}

/// Parses lister output into paths, skipping blank lines.
#[must_use]
pub fn parse_listing(output: &str) -> Vec<PathBuf> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Repository lister backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandLister {
    command: String,
    args: Vec<String>,
}

impl CommandLister {
    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    #[must_use]
    pub fn from_config(config: &RepositoriesConfig) -> Self {
        Self::new(&config.command, config.args.clone())
    }
}

impl RepositoryLister for CommandLister {
    async fn list(&self) -> Result<Vec<PathBuf>, ToolError> {
        let output = run_output(&self.command, &self.args, None).await?;
        if !output.status.success() {
            return Err(ToolError::Failed(
                self.command.clone(),
                describe_status(&output.status),
            ));
        }

        let repositories = parse_listing(&String::from_utf8_lossy(&output.stdout));
        debug!("{} 件のリポジトリを取得しました", repositories.len());
        Ok(repositories)
    }
}

/// Mock lister for testing.
#[derive(Debug, Default, Clone)]
pub struct MockLister {
    repositories: Vec<PathBuf>,
}

impl MockLister {
    #[must_use]
    pub fn new(repositories: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            repositories: repositories.into_iter().map(Into::into).collect(),
        }
    }
}

impl RepositoryLister for MockLister {
    async fn list(&self) -> Result<Vec<PathBuf>, ToolError> {
        Ok(self.repositories.clone())
    }
}
