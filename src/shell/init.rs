//! Shell integration scripts.
//!
//! `shellkit init <shell>` prints wrapper functions meant to be evaluated
//! from the user's rc file:
//!
//! ```sh
//! eval "$(shellkit init zsh)"
//! ```
//!
//! Each wrapper runs the binary with a fresh effects file and sources that
//! file afterwards, so directory changes and config reloads happen in the
//! calling shell. The wrapper returns the binary's exit status.

use clap::ValueEnum;

use super::EFFECTS_ENV;

/// Shells with an integration script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellKind {
    Zsh,
    Bash,
}

impl ShellKind {
    /// Returns the shell's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShellKind::Zsh => "zsh",
            ShellKind::Bash => "bash",
        }
    }
}

/// Renders the integration script for `shell`, invoking `bin`.
#[must_use]
pub fn init_script(shell: ShellKind, bin: &str) -> String {
    format!(
        r#"# shellkit integration for {shell}
__shellkit_run() {{
  local __shellkit_effects __shellkit_status
  __shellkit_effects="$(mktemp "${{TMPDIR:-/tmp}}/shellkit.XXXXXX")" || return 1
  {env}="$__shellkit_effects" command {bin} "$@"
  __shellkit_status=$?
  if [ -s "$__shellkit_effects" ]; then
    source "$__shellkit_effects"
  fi
  rm -f "$__shellkit_effects"
  return $__shellkit_status
}}

add_alias() {{ __shellkit_run alias add "$@"; }}
pomo() {{ __shellkit_run pomo "$@"; }}
repo() {{ __shellkit_run jump "$@"; }}
"#,
        shell = shell.as_str(),
        env = EFFECTS_ENV,
        bin = bin,
    )
}
