//! External tool error types.
//!
//! Errors raised while running the external binaries shellkit delegates to.
//! A cancelled countdown is not an error; it is reported as
//! [`CountdownStatus::Cancelled`](crate::types::CountdownStatus).

use thiserror::Error;

/// Errors that can occur while invoking an external tool.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// The binary is not installed or not on `PATH`.
    #[error("コマンド '{0}' が見つかりません")]
    NotInstalled(String),

    /// The binary exists but could not be started.
    #[error("コマンド '{0}' を起動できません: {1}")]
    Spawn(String, String),

    /// The binary ran but reported a failure.
    #[error("コマンド '{0}' が失敗しました: {1}")]
    Failed(String, String),

    /// The binary did not finish in time.
    #[error("コマンド '{0}' がタイムアウトしました（{1}秒）")]
    Timeout(String, u64),

    /// Reading from or writing to the binary failed.
    #[error("コマンド '{0}' との入出力に失敗しました: {1}")]
    Io(String, String),
}

impl ToolError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NotInstalled(_) => {
                "コマンドをインストールするか、設定ファイルでコマンド名を変更してください"
            }
            Self::Spawn(_, _) => "コマンドの実行権限を確認してください",
            Self::Failed(_, _) => "コマンドを単体で実行してエラー内容を確認してください",
            Self::Timeout(_, _) => "設定ファイルでタイムアウト時間を延長してください",
            Self::Io(_, _) => "端末の状態を確認してから再実行してください",
        }
    }
}
