//! Repository jumper.
//!
//! Lists local repositories, shows them in a fuzzy selector labelled by their
//! last two path segments (`owner/name`), and records a directory change for
//! the chosen one.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::shell::ShellContext;
use crate::tools::{FuzzySelector, RepositoryLister, SelectionRequest, ToolError};

/// Repository jump error type.
#[derive(Debug, Error)]
pub enum JumpError {
    /// The lister returned nothing.
    #[error("リポジトリが見つかりません")]
    NoRepositories,

    /// The lister or selector failed.
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl JumpError {
    /// Returns a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoRepositories => "ghq get <repository> でリポジトリを取得してください",
            Self::Tool(e) => e.suggestion(),
        }
    }
}

/// Result of a jump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpOutcome {
    /// The working directory was changed to this repository.
    Changed(PathBuf),
    /// The user chose nothing; the working directory is unchanged.
    NoSelection,
}

/// Returns the selector label for a repository: its last two path segments.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use shellkit::jump::label_for;
///
/// assert_eq!(label_for(Path::new("/src/github.com/alice/tools")), "alice/tools");
/// assert_eq!(label_for(Path::new("solo")), "solo");
/// ```
#[must_use]
pub fn label_for(path: &Path) -> String {
    let segments: Vec<String> = path
        .components()
        .rev()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .take(2)
        .collect();

    segments
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("/")
}

/// Chooses a repository and changes into it.
pub struct RepositoryJumper<L, S>
where
    L: RepositoryLister,
    S: FuzzySelector,
{
    lister: L,
    selector: S,
    prompt: String,
}

impl<L, S> RepositoryJumper<L, S>
where
    L: RepositoryLister,
    S: FuzzySelector,
{
    pub fn new(lister: L, selector: S, prompt: impl Into<String>) -> Self {
        Self {
            lister,
            selector,
            prompt: prompt.into(),
        }
    }

    /// Lists repositories, asks the selector, and records the directory change.
    ///
    /// Labels that collide resolve to the first repository in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`JumpError::NoRepositories`] for an empty listing, or
    /// [`JumpError::Tool`] if an external tool fails.
    pub async fn jump(
        &self,
        query: Option<String>,
        context: &mut ShellContext,
    ) -> Result<JumpOutcome, JumpError> {
        let repositories = self.lister.list().await?;
        if repositories.is_empty() {
            return Err(JumpError::NoRepositories);
        }
        debug!("リポジトリ {}件", repositories.len());

        let labels: Vec<String> = repositories.iter().map(|p| label_for(p)).collect();
        let request = SelectionRequest::new(labels.clone(), &self.prompt).with_query(query);

        let Some(chosen) = self.selector.select(&request).await? else {
            info!("リポジトリが選択されませんでした");
            return Ok(JumpOutcome::NoSelection);
        };

        let target = labels
            .iter()
            .position(|label| *label == chosen)
            .map(|index| repositories[index].clone());

        match target {
            Some(path) => {
                info!("移動します: {:?}", path);
                context.change_directory(&path);
                Ok(JumpOutcome::Changed(path))
            }
            None => {
                debug!("選択されたラベルに対応するリポジトリがありません: {}", chosen);
                Ok(JumpOutcome::NoSelection)
            }
        }
    }

    #[cfg(test)]
    fn selector(&self) -> &S {
        &self.selector
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ShellEffect;
    use crate::tools::{MockLister, MockSelector};

    mod label_tests {
        use super::*;

        #[test]
        fn test_label_last_two_segments() {
            assert_eq!(
                label_for(Path::new("/home/me/ghq/github.com/owner/repo")),
                "owner/repo"
            );
        }

        #[test]
        fn test_label_trailing_slash() {
            assert_eq!(label_for(Path::new("/src/owner/repo/")), "owner/repo");
        }

        #[test]
        fn test_label_short_paths() {
            assert_eq!(label_for(Path::new("/repo")), "repo");
            assert_eq!(label_for(Path::new("")), "");
        }
    }

    mod jump_tests {
        use super::*;

        fn repos() -> MockLister {
            MockLister::new([
                "/ghq/github.com/alice/tools",
                "/ghq/github.com/bob/site",
                "/ghq/github.com/carol/notes",
            ])
        }

        #[tokio::test]
        async fn test_empty_listing_is_error() {
            let jumper = RepositoryJumper::new(
                MockLister::new(Vec::<PathBuf>::new()),
                MockSelector::choosing("x/y"),
                "repo> ",
            );
            let mut context = ShellContext::new("/start");

            let result = jumper.jump(None, &mut context).await;

            assert!(matches!(result, Err(JumpError::NoRepositories)));
            assert_eq!(context.cwd(), Path::new("/start"));
            assert!(jumper.selector().get_requests().is_empty());
        }

        #[tokio::test]
        async fn test_selection_changes_directory() {
            let jumper = RepositoryJumper::new(repos(), MockSelector::choosing("bob/site"), "repo> ");
            let mut context = ShellContext::new("/start");

            let outcome = jumper.jump(None, &mut context).await.unwrap();

            let expected = PathBuf::from("/ghq/github.com/bob/site");
            assert_eq!(outcome, JumpOutcome::Changed(expected.clone()));
            assert_eq!(context.cwd(), expected.as_path());
            assert_eq!(context.effects(), &[ShellEffect::ChangeDirectory(expected)]);
        }

        #[tokio::test]
        async fn test_request_labels_and_height() {
            let jumper = RepositoryJumper::new(repos(), MockSelector::cancelling(), "pick> ");
            let mut context = ShellContext::new("/start");

            jumper
                .jump(Some("no".to_string()), &mut context)
                .await
                .unwrap();

            let requests = jumper.selector().get_requests();
            assert_eq!(requests.len(), 1);
            assert_eq!(
                requests[0].candidates,
                vec!["alice/tools", "bob/site", "carol/notes"]
            );
            assert_eq!(requests[0].height, 5);
            assert_eq!(requests[0].prompt, "pick> ");
            assert_eq!(requests[0].query.as_deref(), Some("no"));
        }

        #[tokio::test]
        async fn test_no_selection_keeps_directory() {
            let jumper = RepositoryJumper::new(repos(), MockSelector::cancelling(), "repo> ");
            let mut context = ShellContext::new("/start");

            let outcome = jumper.jump(None, &mut context).await.unwrap();

            assert_eq!(outcome, JumpOutcome::NoSelection);
            assert_eq!(context.cwd(), Path::new("/start"));
            assert!(context.effects().is_empty());
        }

        #[tokio::test]
        async fn test_colliding_labels_pick_first() {
            let lister = MockLister::new([
                "/ghq/github.com/alice/tools",
                "/ghq/gitlab.com/alice/tools",
            ]);
            let jumper =
                RepositoryJumper::new(lister, MockSelector::choosing("alice/tools"), "repo> ");
            let mut context = ShellContext::new("/start");

            let outcome = jumper.jump(None, &mut context).await.unwrap();

            assert_eq!(
                outcome,
                JumpOutcome::Changed(PathBuf::from("/ghq/github.com/alice/tools"))
            );
        }

        #[tokio::test]
        async fn test_unknown_label_is_no_selection() {
            let jumper = RepositoryJumper::new(repos(), MockSelector::choosing("zed/zz"), "repo> ");
            let mut context = ShellContext::new("/start");

            let outcome = jumper.jump(None, &mut context).await.unwrap();
            assert_eq!(outcome, JumpOutcome::NoSelection);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(JumpError::NoRepositories.to_string(), "リポジトリが見つかりません");
        let tool = JumpError::from(ToolError::NotInstalled("fzf".to_string()));
        assert!(tool.to_string().contains("fzf"));
        assert!(!tool.suggestion().is_empty());
    }
}
