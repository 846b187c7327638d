//! Countdown timers.
//!
//! A countdown blocks for a number of minutes and reports whether it
//! finished naturally or was cancelled by the user. Two implementations exist:
//!
//! - [`ExternalCountdown`] runs an external timer binary as `<command> <N>m`
//!   attached to the terminal. Exit status zero means completion, anything
//!   else means cancellation.
//! - [`BuiltinCountdown`] ticks in-process and treats Ctrl-C as cancellation.

use std::io::Write;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::error::ToolError;
use super::process::{command_exists, spawn_interactive};
use crate::config::{CountdownBackend, CountdownConfig};
use crate::types::CountdownStatus;

/// Formats a minute count as the external timer's duration string.
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    format!("{}m", minutes)
}

/// Formats remaining seconds as `MM:SS`.
#[must_use]
pub fn format_remaining(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// A blocking countdown.
#[allow(async_fn_in_trait)]
pub trait Countdown {
    /// Counts down `minutes` minutes.
    ///
    /// # Errors
    ///
    /// Returns an error only if the countdown could not run at all.
    /// User cancellation is `Ok(CountdownStatus::Cancelled)`.
    async fn run(&self, minutes: u32) -> Result<CountdownStatus, ToolError>;
}

// ============================================================================
// ExternalCountdown
// ============================================================================

/// Countdown delegated to an external timer binary.
#[derive(Debug, Clone)]
pub struct ExternalCountdown {
    command: String,
}

impl ExternalCountdown {
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Returns true if the timer binary is on `PATH`.
    #[must_use]
    pub fn is_available(&self) -> bool {
        command_exists(&self.command)
    }
}

impl Countdown for ExternalCountdown {
    async fn run(&self, minutes: u32) -> Result<CountdownStatus, ToolError> {
        let args = vec![format_duration(minutes)];
        let mut child = spawn_interactive(&self.command, &args)?;

        // Ctrl-C reaches the timer as well; keep this process alive so the
        // timer's exit can be observed.
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let status = tokio::select! {
            status = child.wait() => status
                .map_err(|e| ToolError::Io(self.command.clone(), e.to_string()))?,
            _ = &mut ctrl_c => {
                debug!("割り込みを受信しました。タイマーの終了を待ちます");
                let _ = child.start_kill();
                let _ = child.wait().await;
                return Ok(CountdownStatus::Cancelled);
            }
        };

        debug!("{} {} 終了: {:?}", self.command, args[0], status);
        Ok(CountdownStatus::from_success(status.success()))
    }
}

// ============================================================================
// BuiltinCountdown
// ============================================================================

/// In-process countdown rendering the remaining time on stderr.
#[derive(Debug, Clone)]
pub struct BuiltinCountdown {
    tick: Duration,
    render: bool,
}

impl Default for BuiltinCountdown {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            render: true,
        }
    }
}

impl BuiltinCountdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `tick` as the length of one counted second and disables rendering.
    #[must_use]
    pub fn with_tick(tick: Duration) -> Self {
        Self {
            tick,
            render: false,
        }
    }

    fn render_remaining(&self, remaining: u64) {
        if self.render {
            eprint!("\r残り時間 {}", format_remaining(remaining));
            let _ = std::io::stderr().flush();
        }
    }

    fn clear_line(&self) {
        if self.render {
            eprint!("\r\x1b[2K");
            let _ = std::io::stderr().flush();
        }
    }
}

impl Countdown for BuiltinCountdown {
    async fn run(&self, minutes: u32) -> Result<CountdownStatus, ToolError> {
        let mut remaining = u64::from(minutes) * 60;
        let mut ticker = interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        ticker.tick().await;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        while remaining > 0 {
            self.render_remaining(remaining);
            tokio::select! {
                _ = &mut ctrl_c => {
                    self.clear_line();
                    return Ok(CountdownStatus::Cancelled);
                }
                _ = ticker.tick() => remaining -= 1,
            }
        }

        self.clear_line();
        Ok(CountdownStatus::Completed)
    }
}

// ============================================================================
// Backend selection
// ============================================================================

/// The countdown chosen from configuration.
#[derive(Debug, Clone)]
pub enum CountdownBackendImpl {
    External(ExternalCountdown),
    Builtin(BuiltinCountdown),
}

impl CountdownBackendImpl {
    /// Picks the countdown implementation for `config`.
    ///
    /// An external backend whose binary is missing falls back to the
    /// built-in countdown.
    #[must_use]
    pub fn from_config(config: &CountdownConfig) -> Self {
        match config.backend {
            CountdownBackend::Builtin => {
                info!("内蔵タイマーを使用します");
                Self::Builtin(BuiltinCountdown::new())
            }
            CountdownBackend::External => {
                let external = ExternalCountdown::new(&config.command);
                if external.is_available() {
                    Self::External(external)
                } else {
                    warn!(
                        "タイマーコマンド '{}' が見つかりません。内蔵タイマーを使用します",
                        config.command
                    );
                    Self::Builtin(BuiltinCountdown::new())
                }
            }
        }
    }
}

impl Countdown for CountdownBackendImpl {
    async fn run(&self, minutes: u32) -> Result<CountdownStatus, ToolError> {
        match self {
            Self::External(countdown) => countdown.run(minutes).await,
            Self::Builtin(countdown) => countdown.run(minutes).await,
        }
    }
}

// ============================================================================
// MockCountdown
// ============================================================================

/// Mock countdown for testing.
///
/// Returns scripted statuses in order (then `Completed`) and records the
/// requested durations.
#[derive(Debug, Default)]
pub struct MockCountdown {
    runs: std::sync::Mutex<Vec<u32>>,
    script: std::sync::Mutex<std::collections::VecDeque<CountdownStatus>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockCountdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock returning `statuses` for successive runs.
    #[must_use]
    pub fn with_script(statuses: impl IntoIterator<Item = CountdownStatus>) -> Self {
        Self {
            script: std::sync::Mutex::new(statuses.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Durations requested so far, in order.
    #[must_use]
    pub fn runs(&self) -> Vec<u32> {
        self.runs.lock().unwrap().clone()
    }

    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.lock().unwrap().len()
    }
}

impl Countdown for MockCountdown {
    async fn run(&self, minutes: u32) -> Result<CountdownStatus, ToolError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(ToolError::NotInstalled("mock".to_string()));
        }
        self.runs.lock().unwrap().push(minutes);
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(CountdownStatus::Completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30), "30m");
        assert_eq!(format_duration(0), "0m");
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(90), "01:30");
        assert_eq!(format_remaining(25 * 60), "25:00");
        assert_eq!(format_remaining(120 * 60 + 59), "120:59");
    }

    #[tokio::test]
    async fn test_builtin_zero_minutes_completes() {
        let countdown = BuiltinCountdown::with_tick(Duration::from_millis(1));
        assert_eq!(countdown.run(0).await.unwrap(), CountdownStatus::Completed);
    }

    #[tokio::test]
    async fn test_builtin_one_minute_fast_tick() {
        let countdown = BuiltinCountdown::with_tick(Duration::from_millis(1));
        assert_eq!(countdown.run(1).await.unwrap(), CountdownStatus::Completed);
    }

    #[tokio::test]
    async fn test_external_missing_binary() {
        let countdown = ExternalCountdown::new("shellkit-definitely-missing-timer-12345");
        assert!(!countdown.is_available());
        let result = countdown.run(1).await;
        assert!(matches!(result, Err(ToolError::NotInstalled(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_external_exit_status_mapping() {
        let completed = ExternalCountdown::new("true");
        assert_eq!(completed.run(1).await.unwrap(), CountdownStatus::Completed);

        let cancelled = ExternalCountdown::new("false");
        assert_eq!(cancelled.run(1).await.unwrap(), CountdownStatus::Cancelled);
    }

    #[test]
    fn test_backend_builtin_from_config() {
        let config = CountdownConfig {
            backend: CountdownBackend::Builtin,
            command: "timer".to_string(),
        };
        assert!(matches!(
            CountdownBackendImpl::from_config(&config),
            CountdownBackendImpl::Builtin(_)
        ));
    }

    #[test]
    fn test_backend_falls_back_when_missing() {
        let config = CountdownConfig {
            backend: CountdownBackend::External,
            command: "shellkit-definitely-missing-timer-12345".to_string(),
        };
        assert!(matches!(
            CountdownBackendImpl::from_config(&config),
            CountdownBackendImpl::Builtin(_)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_backend_external_when_present() {
        let config = CountdownConfig {
            backend: CountdownBackend::External,
            command: "true".to_string(),
        };
        assert!(matches!(
            CountdownBackendImpl::from_config(&config),
            CountdownBackendImpl::External(_)
        ));
    }

    #[tokio::test]
    async fn test_mock_script_and_runs() {
        let mock = MockCountdown::with_script([CountdownStatus::Cancelled]);
        assert_eq!(mock.run(5).await.unwrap(), CountdownStatus::Cancelled);
        assert_eq!(mock.run(7).await.unwrap(), CountdownStatus::Completed);
        assert_eq!(mock.runs(), vec![5, 7]);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockCountdown::new();
        mock.set_should_fail(true);
        assert!(mock.run(5).await.is_err());
        assert_eq!(mock.run_count(), 0);
    }
}
