//! CLI module for shellkit.
//!
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;

pub use commands::{AliasCommand, Cli, Commands, PomoArgs};
pub use display::Display;
