//! Shell context and effects.
//!
//! A child process cannot change its parent shell's working directory or
//! re-source its configuration. Instead, operations record *effects* on a
//! [`ShellContext`], and the CLI hands them back to the calling shell:
//!
//! - With `SHELLKIT_EFFECTS_FILE` set (done by the wrapper functions from
//!   `shellkit init`), effects are written to that file as shell commands and
//!   the wrapper sources it after the binary exits.
//! - Without it, the CLI prints the target directory on stdout and a reload
//!   hint on stderr.

pub mod init;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub use init::{init_script, ShellKind};

/// Environment variable naming the effects file.
pub const EFFECTS_ENV: &str = "SHELLKIT_EFFECTS_FILE";

/// Errors raised while reading or applying shell state.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The current directory could not be determined.
    #[error("カレントディレクトリを取得できません: {0}")]
    CurrentDirectory(#[source] io::Error),

    /// The effects file could not be written.
    #[error("エフェクトファイルに書き込めません: {}", .0.display())]
    EffectsWrite(PathBuf, #[source] io::Error),
}

// ============================================================================
// ShellEffect
// ============================================================================

/// A change to apply in the calling shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEffect {
    /// Change the working directory.
    ChangeDirectory(PathBuf),
    /// Re-source the interactive configuration file.
    Reload(PathBuf),
}

impl ShellEffect {
    /// Renders the effect as a single shell command.
    #[must_use]
    pub fn to_script_line(&self) -> String {
        match self {
            Self::ChangeDirectory(path) => format!("cd -- {}", shell_quote(&path.to_string_lossy())),
            Self::Reload(path) => format!("source {}", shell_quote(&path.to_string_lossy())),
        }
    }
}

/// Quotes `value` for POSIX shells using single quotes.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Renders effects as a script, one command per line.
#[must_use]
pub fn render_script(effects: &[ShellEffect]) -> String {
    effects
        .iter()
        .map(|effect| effect.to_script_line() + "\n")
        .collect()
}

/// Writes effects to `path`, replacing its contents.
///
/// # Errors
///
/// Returns [`ShellError::EffectsWrite`] if the file cannot be written.
pub fn write_effects_file(path: &Path, effects: &[ShellEffect]) -> Result<(), ShellError> {
    debug!("エフェクトを書き込みます: {:?} ({}件)", path, effects.len());
    fs::write(path, render_script(effects))
        .map_err(|e| ShellError::EffectsWrite(path.to_path_buf(), e))
}

/// Returns the effects file requested by the shell wrapper, if any.
#[must_use]
pub fn effects_file_from_env() -> Option<PathBuf> {
    std::env::var_os(EFFECTS_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

// ============================================================================
// ShellContext
// ============================================================================

/// Explicit stand-in for the calling shell's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellContext {
    cwd: PathBuf,
    effects: Vec<ShellEffect>,
}

impl ShellContext {
    /// Creates a context rooted at `cwd`.
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            effects: Vec::new(),
        }
    }

    /// Creates a context from the process's current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::CurrentDirectory`] if it cannot be read.
    pub fn from_env() -> Result<Self, ShellError> {
        std::env::current_dir()
            .map(Self::new)
            .map_err(ShellError::CurrentDirectory)
    }

    /// The working directory the shell will end up in.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Records a directory change.
    pub fn change_directory(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.cwd = path.clone();
        self.effects.push(ShellEffect::ChangeDirectory(path));
    }

    /// Records a configuration reload. Repeated requests collapse into one.
    pub fn request_reload(&mut self, rc_file: impl Into<PathBuf>) {
        let effect = ShellEffect::Reload(rc_file.into());
        if !self.effects.contains(&effect) {
            self.effects.push(effect);
        }
    }

    /// Effects recorded so far, in order.
    #[must_use]
    pub fn effects(&self) -> &[ShellEffect] {
        &self.effects
    }
}

// ============================================================================
// Tests
// ============================================================================
