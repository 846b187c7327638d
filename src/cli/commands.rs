//! Command definitions for shellkit.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::shell::ShellKind;

// ============================================================================
// CLI Structure
// ============================================================================

/// shellkit - interactive shell helpers
#[derive(Parser, Debug)]
#[command(
    name = "shellkit",
    version,
    about = "シェル作業のためのヘルパーCLI",
    long_about = "ポモドーロ風の作業/休憩サイクル、エイリアス登録、リポジトリ移動を提供します。\n\
                  シェル統合を有効にするには rc ファイルに eval \"$(shellkit init zsh)\" を追加してください。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run one work/rest cycle
    Pomo(PomoArgs),

    /// Manage shell aliases
    Alias {
        #[command(subcommand)]
        command: AliasCommand,
    },

    /// Pick a repository and change into it
    Jump {
        /// Initial selector query
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Print shell integration functions
    Init {
        /// Shell to generate functions for
        #[arg(value_enum)]
        shell: ShellKind,
    },

    /// Show the resolved configuration
    Config,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Alias subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AliasCommand {
    /// Append an alias: add <name> <command>
    Add {
        /// Alias name followed by the command it expands to
        #[arg(
            value_name = "NAME COMMAND",
            num_args = 0..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
    },

    /// List registered aliases
    List,
}

// ============================================================================
// Pomo Command Arguments
// ============================================================================

/// Arguments for the pomo command
#[derive(Args, Debug, Clone, Default)]
pub struct PomoArgs {
    /// Work duration in minutes (default from config, 60)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub work: Option<u32>,

    /// Rest duration in minutes (default from config, 10)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub rest: Option<u32>,
}

// ============================================================================
// Tests
// ============================================================================
