//! Configuration for shellkit.
//!
//! Settings are read from a JSON file. Every field has a serde default, so a
//! missing file or a partial file still yields a usable configuration. The
//! file location is `$SHELLKIT_CONFIG` when set, otherwise
//! `<config dir>/shellkit/config.json`.

pub mod error;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{CycleParams, DEFAULT_REST_MINUTES, DEFAULT_WORK_MINUTES};

pub use error::{ConfigError, Result};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SHELLKIT_CONFIG";

// ============================================================================
// Defaults
// ============================================================================

fn default_alias_file() -> String {
    "~/.zsh_aliases".to_string()
}

fn default_rc_file() -> String {
    "~/.zshrc".to_string()
}

fn default_work_minutes() -> u32 {
    DEFAULT_WORK_MINUTES
}

fn default_rest_minutes() -> u32 {
    DEFAULT_REST_MINUTES
}

fn default_title() -> String {
    "Pomodoro".to_string()
}

fn default_stand_up_message() -> String {
    "折り返しです。立ち上がってストレッチしましょう".to_string()
}

fn default_work_end_message() -> String {
    "作業セッションが終了しました。休憩しましょう".to_string()
}

fn default_rest_end_message() -> String {
    "休憩終了です。作業に戻りましょう".to_string()
}

fn default_work_sound() -> Option<String> {
    Some("Glass".to_string())
}

fn default_rest_sound() -> Option<String> {
    Some("Crystal".to_string())
}

fn default_countdown_command() -> String {
    "timer".to_string()
}

fn default_notifier_command() -> String {
    "terminal-notifier".to_string()
}

fn default_notifier_timeout_seconds() -> u64 {
    5
}

fn default_repositories_command() -> String {
    "ghq".to_string()
}

fn default_repositories_args() -> Vec<String> {
    vec!["list".to_string(), "--full-path".to_string()]
}

fn default_selector_command() -> String {
    "fzf".to_string()
}

fn default_selector_prompt() -> String {
    "repo> ".to_string()
}

// ============================================================================
// Sections
// ============================================================================

/// Work/rest cycle settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PomoConfig {
    /// Default work duration in minutes.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,

    /// Default rest duration in minutes.
    #[serde(default = "default_rest_minutes")]
    pub rest_minutes: u32,

    /// Title used for every notification.
    #[serde(default = "default_title")]
    pub title: String,

    /// Sent between the two work halves.
    #[serde(default = "default_stand_up_message")]
    pub stand_up_message: String,

    /// Sent when the work session ends.
    #[serde(default = "default_work_end_message")]
    pub work_end_message: String,

    /// Sent when the rest ends.
    #[serde(default = "default_rest_end_message")]
    pub rest_end_message: String,

    /// Icon shown with notifications.
    #[serde(default)]
    pub icon: Option<String>,

    /// Sound for the stand-up and work-end notifications.
    #[serde(default = "default_work_sound")]
    pub work_sound: Option<String>,

    /// Sound for the rest-end notification.
    #[serde(default = "default_rest_sound")]
    pub rest_sound: Option<String>,
}

impl Default for PomoConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            rest_minutes: default_rest_minutes(),
            title: default_title(),
            stand_up_message: default_stand_up_message(),
            work_end_message: default_work_end_message(),
            rest_end_message: default_rest_end_message(),
            icon: None,
            work_sound: default_work_sound(),
            rest_sound: default_rest_sound(),
        }
    }
}

impl PomoConfig {
    /// Returns the configured default cycle durations.
    pub fn default_params(&self) -> CycleParams {
        CycleParams::new(self.work_minutes, self.rest_minutes)
    }

    /// Returns the icon path with `~` expanded.
    pub fn icon_path(&self) -> Option<PathBuf> {
        self.icon.as_deref().map(expand_tilde)
    }
}

/// Which countdown implementation drives the cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CountdownBackend {
    /// Run the external countdown binary, falling back to the built-in one
    /// when it is not installed.
    #[default]
    External,
    /// Always count down in-process.
    Builtin,
}

/// Countdown timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountdownConfig {
    /// Countdown implementation.
    #[serde(default)]
    pub backend: CountdownBackend,

    /// External countdown binary, invoked as `<command> <N>m`.
    #[serde(default = "default_countdown_command")]
    pub command: String,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            backend: CountdownBackend::default(),
            command: default_countdown_command(),
        }
    }
}

/// Desktop notifier settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Notifier binary.
    #[serde(default = "default_notifier_command")]
    pub command: String,

    /// Timeout for a single notifier call in seconds.
    #[serde(default = "default_notifier_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            command: default_notifier_command(),
            timeout_seconds: default_notifier_timeout_seconds(),
        }
    }
}

/// Repository lister settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoriesConfig {
    /// Lister binary.
    #[serde(default = "default_repositories_command")]
    pub command: String,

    /// Arguments requesting full paths, one per line.
    #[serde(default = "default_repositories_args")]
    pub args: Vec<String>,
}

impl Default for RepositoriesConfig {
    fn default() -> Self {
        Self {
            command: default_repositories_command(),
            args: default_repositories_args(),
        }
    }
}

/// Fuzzy selector settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Selector binary.
    #[serde(default = "default_selector_command")]
    pub command: String,

    /// Prompt shown by the selector.
    #[serde(default = "default_selector_prompt")]
    pub prompt: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            command: default_selector_command(),
            prompt: default_selector_prompt(),
        }
    }
}

// ============================================================================
// ShellkitConfig
// ============================================================================

/// Top-level configuration.
///
/// # Example
///
/// ```
/// use shellkit::config::ShellkitConfig;
///
/// let config: ShellkitConfig = serde_json::from_str(r#"{"alias_file": "/tmp/a"}"#).unwrap();
/// assert_eq!(config.alias_file, "/tmp/a");
/// assert_eq!(config.pomo.work_minutes, 60);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShellkitConfig {
    /// File that aliases are appended to.
    #[serde(default = "default_alias_file")]
    pub alias_file: String,

    /// Interactive shell config reloaded after an alias is added.
    #[serde(default = "default_rc_file")]
    pub rc_file: String,

    #[serde(default)]
    pub pomo: PomoConfig,

    #[serde(default)]
    pub countdown: CountdownConfig,

    #[serde(default)]
    pub notifier: NotifierConfig,

    #[serde(default)]
    pub repositories: RepositoriesConfig,

    #[serde(default)]
    pub selector: SelectorConfig,
}

impl Default for ShellkitConfig {
    fn default() -> Self {
        Self {
            alias_file: default_alias_file(),
            rc_file: default_rc_file(),
            pomo: PomoConfig::default(),
            countdown: CountdownConfig::default(),
            notifier: NotifierConfig::default(),
            repositories: RepositoriesConfig::default(),
            selector: SelectorConfig::default(),
        }
    }
}

impl ShellkitConfig {
    /// Loads the configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be resolved or the file exists
    /// but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads the configuration from `path`, using defaults if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!("設定ファイルを読み込みました: {:?}", path);
                serde_json::from_str(&contents)
                    .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("設定ファイルがないためデフォルト値を使用します: {:?}", path);
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Read(path.to_path_buf(), e)),
        }
    }

    /// Returns the alias file path with `~` expanded.
    pub fn alias_file_path(&self) -> PathBuf {
        expand_tilde(&self.alias_file)
    }

    /// Returns the shell rc file path with `~` expanded.
    pub fn rc_file_path(&self) -> PathBuf {
        expand_tilde(&self.rc_file)
    }

    /// Serializes the configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// Resolves the config file location.
///
/// # Errors
///
/// Returns [`ConfigError::HomeDirectoryNotFound`] if neither the override nor
/// a config directory is available.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|dir| dir.join("shellkit").join("config.json"))
        .ok_or(ConfigError::HomeDirectoryNotFound)
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or with no resolvable home directory, are
/// returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

// ============================================================================
// Tests
// ============================================================================
