//! shellkit library
//!
//! Core functionality behind the `shellkit` CLI:
//! - Work/rest cycle controller driving an external countdown and notifier
//! - Alias registration into a shell-sourced alias file
//! - Repository jumping through a lister and a fuzzy selector
//! - Shell context and effects handed back to the calling shell
//! - Configuration, CLI parsing and display utilities

pub mod alias;
pub mod cli;
pub mod config;
pub mod jump;
pub mod pomo;
pub mod shell;
pub mod tools;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    AliasEntry, CountdownStatus, CycleOutcome, CycleParams, Notification, Phase,
};

pub use alias::{AliasError, AliasRegistrar, Registration};
pub use config::{ConfigError, ShellkitConfig};
pub use jump::{label_for, JumpError, JumpOutcome, RepositoryJumper};
pub use pomo::{CycleController, CycleMessages};
pub use shell::{ShellContext, ShellEffect, ShellError, ShellKind};

// Re-export external tool seams
pub use tools::{
    Countdown, FuzzySelector, MockCountdown, MockLister, MockNotifier, MockSelector, Notifier,
    RepositoryLister, ToolError,
};
