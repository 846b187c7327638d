//! Alias registration.
//!
//! Aliases are appended to a plain text file that the user's shell sources.
//! Each registration writes two lines:
//!
//! ```text
//! # Added by shellkit on 2024-05-01 09:30:00
//! alias gs='git status'
//! ```
//!
//! The file is append-only. Registering a name that already exists only
//! warns; the new line is still appended, and since the shell evaluates the
//! file top to bottom the last definition wins. Every successful registration
//! requests a reload of the interactive shell configuration.

pub mod error;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::config::ShellkitConfig;
use crate::shell::ShellContext;
use crate::types::AliasEntry;

pub use error::{AliasError, Result};

/// Format of the timestamp in the comment line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// The alias that was written.
    pub entry: AliasEntry,
    /// Whether the name was already defined before this call.
    pub duplicate: bool,
    /// File the alias was appended to.
    pub alias_file: PathBuf,
}

/// Checks that `name` can appear on the left of `alias NAME=`.
fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '=' | '\'' | '"'));
    if invalid {
        return Err(AliasError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Appends aliases to the alias file.
#[derive(Debug, Clone)]
pub struct AliasRegistrar {
    alias_file: PathBuf,
    rc_file: PathBuf,
}

impl AliasRegistrar {
    /// Creates a registrar writing to `alias_file` and reloading `rc_file`.
    #[must_use]
    pub fn new(alias_file: impl Into<PathBuf>, rc_file: impl Into<PathBuf>) -> Self {
        Self {
            alias_file: alias_file.into(),
            rc_file: rc_file.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ShellkitConfig) -> Self {
        Self::new(config.alias_file_path(), config.rc_file_path())
    }

    /// Returns the alias file path.
    #[must_use]
    pub fn alias_file(&self) -> &Path {
        &self.alias_file
    }

    /// Registers an alias from raw command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::Usage`] unless exactly two arguments are given;
    /// the alias file is not touched in that case.
    pub fn register_args(
        &self,
        args: &[String],
        context: &mut ShellContext,
    ) -> Result<Registration> {
        match args {
            [name, command] => self.add(name, command, context),
            _ => Err(AliasError::Usage { got: args.len() }),
        }
    }

    /// Appends `alias NAME='COMMAND'` and requests a shell reload.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the file cannot be
    /// created, read, or written.
    pub fn add(
        &self,
        name: &str,
        command: &str,
        context: &mut ShellContext,
    ) -> Result<Registration> {
        validate_name(name)?;
        self.ensure_file()?;

        let duplicate = self.contains(name)?;
        if duplicate {
            debug!(
                "エイリアス '{}' は既に {:?} に定義されています",
                name, self.alias_file
            );
        }

        let entry = AliasEntry::new(name, command);
        self.append(&entry)?;
        info!("エイリアスを追加しました: {}", entry.to_line());

        context.request_reload(&self.rc_file);

        Ok(Registration {
            entry,
            duplicate,
            alias_file: self.alias_file.clone(),
        })
    }

    /// Lists aliases in file order. A missing file has no aliases.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::Read`] if the file exists but cannot be read.
    pub fn list(&self) -> Result<Vec<AliasEntry>> {
        Ok(self
            .read_contents()?
            .lines()
            .filter_map(AliasEntry::parse_line)
            .collect())
    }

    /// Returns true if an `alias NAME=` line already exists.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::Read`] if the file exists but cannot be read.
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|entry| entry.name == name))
    }

    fn read_contents(&self) -> Result<String> {
        match fs::read_to_string(&self.alias_file) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(AliasError::Read(self.alias_file.clone(), e)),
        }
    }

    /// Creates the alias file and its parent directory if missing.
    fn ensure_file(&self) -> Result<()> {
        if let Some(parent) = self.alias_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AliasError::DirectoryCreation(parent.to_path_buf(), e))?;
            }
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.alias_file)
            .map(|_| ())
            .map_err(|e| AliasError::Write(self.alias_file.clone(), e))
    }

    fn append(&self, entry: &AliasEntry) -> Result<()> {
        let contents = self.read_contents()?;
        let mut block = String::new();
        if !contents.is_empty() && !contents.ends_with('\n') {
            block.push('\n');
        }
        block.push_str(&format!(
            "# Added by shellkit on {}\n{}\n",
            Local::now().format(TIMESTAMP_FORMAT),
            entry.to_line()
        ));

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.alias_file)
            .map_err(|e| AliasError::Write(self.alias_file.clone(), e))?;
        file.write_all(block.as_bytes())
            .map_err(|e| AliasError::Write(self.alias_file.clone(), e))
    }
}

// ============================================================================
// Tests
// ============================================================================
