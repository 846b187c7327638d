//! Wrappers around the external command-line tools shellkit orchestrates.
//!
//! # Overview
//!
//! Each capability is a small trait with one real implementation that runs an
//! external binary and one mock for tests:
//!
//! | Trait              | Real implementation   | Default binary           |
//! |--------------------|-----------------------|--------------------------|
//! | [`Countdown`]      | [`ExternalCountdown`] | `timer`                  |
//! | [`Notifier`]       | [`CommandNotifier`]   | `terminal-notifier`      |
//! | [`RepositoryLister`] | [`CommandLister`]   | `ghq list --full-path`   |
//! | [`FuzzySelector`]  | [`FzfSelector`]       | `fzf`                    |
//!
//! [`Interrupt`] ([`CtrlCInterrupt`]) lets a cycle notice Ctrl-C outside a
//! running countdown.
//!
//! All calls are awaited one at a time; nothing here runs concurrently.
//!
//! # Error Handling
//!
//! Infrastructure failures (missing binary, spawn error, timeout) surface as
//! [`ToolError`]. A cancelled countdown or an empty selection is a normal
//! result, not an error.

pub mod countdown;
pub mod error;
pub mod interrupt;
pub mod notifier;
pub mod process;
pub mod repos;
pub mod selector;

pub use countdown::{
    BuiltinCountdown, Countdown, CountdownBackendImpl, ExternalCountdown, MockCountdown,
};
pub use error::ToolError;
pub use interrupt::{CtrlCInterrupt, Interrupt, MockInterrupt};
pub use notifier::{CommandNotifier, MockNotifier, Notifier};
pub use process::command_exists;
pub use repos::{CommandLister, MockLister, RepositoryLister};
pub use selector::{FuzzySelector, FzfSelector, MockSelector, SelectionRequest};
