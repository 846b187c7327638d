//! Desktop notifications.
//!
//! Notifications are delivered by an external notifier binary invoked as
//! `<command> -message M -title T [-appIcon PATH] [-sound NAME]`. When the
//! binary is missing, fails, or hangs past the timeout, the notification is
//! printed to the terminal instead. Notifying never fails the caller.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use super::error::ToolError;
use super::process::{command_exists, describe_status, run_output};
use crate::config::NotifierConfig;
use crate::types::Notification;

/// A sink for desktop notifications.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Shows `notification`. Delivery problems are handled internally.
    async fn notify(&self, notification: &Notification);
}

/// Builds the argument list for the notifier binary.
#[must_use]
pub fn notifier_args(notification: &Notification) -> Vec<String> {
    let mut args = vec![
        "-message".to_string(),
        notification.message.clone(),
        "-title".to_string(),
        notification.title.clone(),
    ];
    if let Some(icon) = &notification.icon {
        args.push("-appIcon".to_string());
        args.push(icon.to_string_lossy().into_owned());
    }
    if let Some(sound) = &notification.sound {
        args.push("-sound".to_string());
        args.push(sound.clone());
    }
    args
}

/// Formats the plain terminal fallback line.
#[must_use]
pub fn fallback_line(notification: &Notification) -> String {
    format!("[{}] {}", notification.title, notification.message)
}

// ============================================================================
// CommandNotifier
// ============================================================================

/// Notifier backed by an external binary with a terminal fallback.
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    command: String,
    timeout_seconds: u64,
    available: bool,
}

impl CommandNotifier {
    /// Creates a notifier, checking once whether the binary is installed.
    #[must_use]
    pub fn new(command: impl Into<String>, timeout_seconds: u64) -> Self {
        let command = command.into();
        let available = command_exists(&command);
        if !available {
            debug!("通知コマンド '{}' が見つかりません。端末に表示します", command);
        }
        Self {
            command,
            timeout_seconds,
            available,
        }
    }

    #[must_use]
    pub fn from_config(config: &NotifierConfig) -> Self {
        Self::new(&config.command, config.timeout_seconds)
    }

    /// Returns true if the notifier binary was found.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), ToolError> {
        let args = notifier_args(notification);
        let output = timeout(
            Duration::from_secs(self.timeout_seconds),
            run_output(&self.command, &args, None),
        )
        .await
        .map_err(|_| ToolError::Timeout(self.command.clone(), self.timeout_seconds))??;

        if output.status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed(
                self.command.clone(),
                describe_status(&output.status),
            ))
        }
    }
}

impl Notifier for CommandNotifier {
    async fn notify(&self, notification: &Notification) {
        if self.available {
            match self.deliver(notification).await {
                Ok(()) => {
                    debug!("通知を送信しました: {}", notification.message);
                    return;
                }
                Err(e) => warn!("通知の送信に失敗しました: {}", e),
            }
        }

        println!("{}", fallback_line(notification));
    }
}

// ============================================================================
// MockNotifier
// ============================================================================

/// Mock notifier for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

impl Notifier for MockNotifier {
    async fn notify(&self, notification: &Notification) {
        self.notifications.lock().unwrap().push(notification.clone());
    }
}
