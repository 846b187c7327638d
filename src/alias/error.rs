//! Error types for alias registration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Alias registration error type.
#[derive(Debug, Error)]
pub enum AliasError {
    /// Wrong number of arguments.
    #[error("使い方: add_alias <name> <command>（引数が{got}個指定されました）")]
    Usage {
        /// Number of arguments actually supplied.
        got: usize,
    },

    /// The alias name cannot be written as `alias NAME=...`.
    #[error("エイリアス名が不正です: '{0}'")]
    InvalidName(String),

    /// Failed to create the alias file's parent directory.
    #[error("ディレクトリを作成できません: {}", .0.display())]
    DirectoryCreation(PathBuf, #[source] io::Error),

    /// Failed to read the alias file.
    #[error("エイリアスファイルを読み込めません: {}", .0.display())]
    Read(PathBuf, #[source] io::Error),

    /// Failed to append to the alias file.
    #[error("エイリアスファイルに書き込めません: {}", .0.display())]
    Write(PathBuf, #[source] io::Error),
}

impl AliasError {
    /// Returns true if this is a usage error.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }

    /// Returns a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Usage { .. } => "例: add_alias gs 'git status'",
            Self::InvalidName(_) => "空白・'='・引用符を含まない名前を指定してください",
            Self::DirectoryCreation(..) | Self::Write(..) => {
                "alias_file の場所と書き込み権限を確認してください"
            }
            Self::Read(..) => "alias_file の読み取り権限を確認してください",
        }
    }
}

/// Result type for alias operations.
pub type Result<T> = std::result::Result<T, AliasError>;
