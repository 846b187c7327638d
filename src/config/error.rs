//! Configuration error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Home directory could not be determined.
    #[error("ホームディレクトリを特定できません")]
    HomeDirectoryNotFound,

    /// Config file exists but could not be read.
    #[error("設定ファイルを読み込めません: {}", .0.display())]
    Read(PathBuf, #[source] io::Error),

    /// Config file is not valid JSON for the expected layout.
    #[error("設定ファイルの形式が不正です: {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),

    /// Failed to serialize the configuration.
    #[error("設定のシリアライズに失敗しました: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ConfigError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::HomeDirectoryNotFound => "HOME 環境変数を設定してください",
            Self::Read(_, _) => "設定ファイルのパーミッションを確認してください",
            Self::Parse(_, _) => "設定ファイルを JSON として修正するか削除してください",
            Self::Serialize(_) => "設定値を確認してください",
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
