//! End-to-end tests for the shellkit binary.
//!
//! Every test points `SHELLKIT_CONFIG` at a config file inside a temporary
//! directory, so alias files and tool commands never touch the real home.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    /// Creates a sandbox whose countdown and notifier are `true`.
    fn new() -> Self {
        let sandbox = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        sandbox.write_config(json!({}));
        sandbox
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn alias_file(&self) -> PathBuf {
        self.path().join("shell").join("aliases.zsh")
    }

    fn rc_file(&self) -> PathBuf {
        self.path().join(".zshrc")
    }

    /// Writes a config with sandbox paths, overlaying `extra` sections.
    fn write_config(&self, extra: serde_json::Value) {
        let mut config = json!({
            "alias_file": self.alias_file(),
            "rc_file": self.rc_file(),
            "countdown": { "backend": "external", "command": "true" },
            "notifier": { "command": "true", "timeout_seconds": 5 },
        });
        if let (Some(base), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }
        fs::write(self.path().join("config.json"), config.to_string()).unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("shellkit").unwrap();
        cmd.current_dir(self.path())
            .env("SHELLKIT_CONFIG", self.path().join("config.json"))
            .env_remove("SHELLKIT_EFFECTS_FILE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Writes an executable script standing in for the selector.
    #[cfg(unix)]
    fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

// ============================================================================
// Help / Init / Config
// ============================================================================

#[test]
fn test_pomo_help_exits_zero() {
    Sandbox::new()
        .cmd()
        .args(["pomo", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_init_zsh_defines_wrappers() {
    Sandbox::new()
        .cmd()
        .args(["init", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add_alias()"))
        .stdout(predicate::str::contains("pomo()"))
        .stdout(predicate::str::contains("repo()"))
        .stdout(predicate::str::contains("SHELLKIT_EFFECTS_FILE"));
}

#[test]
fn test_config_shows_resolved_values() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains("\"work_minutes\": 60"));
}

#[test]
fn test_invalid_config_reports_error() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.path().join("config.json"), "{ not json").unwrap();
    sandbox
        .cmd()
        .args(["alias", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("エラー:"));
}

// ============================================================================
// Alias
// ============================================================================

#[test]
fn test_alias_add_one_argument_is_usage_error() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["alias", "add", "gs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("add_alias <name> <command>"));

    assert!(!sandbox.alias_file().exists());
}

#[test]
fn test_alias_add_twice_appends_both() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["alias", "add", "gs", "git status"])
        .assert()
        .success()
        .stderr(predicate::str::contains("source"));

    sandbox
        .cmd()
        .args(["alias", "add", "gs", "git status -sb"])
        .assert()
        .success()
        .stderr(predicate::str::contains("警告"));

    let contents = fs::read_to_string(sandbox.alias_file()).unwrap();
    let alias_lines: Vec<&str> = contents
        .lines()
        .filter(|line| line.starts_with("alias gs="))
        .collect();
    assert_eq!(
        alias_lines,
        vec!["alias gs='git status'", "alias gs='git status -sb'"]
    );
    assert_eq!(
        contents
            .lines()
            .filter(|line| line.starts_with("# Added by shellkit on "))
            .count(),
        2
    );
}

#[test]
fn test_alias_add_writes_reload_effect() {
    let sandbox = Sandbox::new();
    let effects = sandbox.path().join("effects.sh");

    sandbox
        .cmd()
        .env("SHELLKIT_EFFECTS_FILE", &effects)
        .args(["alias", "add", "ll", "ls -la"])
        .assert()
        .success();

    let script = fs::read_to_string(&effects).unwrap();
    assert_eq!(
        script,
        format!("source '{}'\n", sandbox.rc_file().display())
    );
}

#[test]
fn test_alias_add_survives_unwritable_effects_file() {
    let sandbox = Sandbox::new();
    let effects = sandbox.path().join("missing").join("effects.sh");

    sandbox
        .cmd()
        .env("SHELLKIT_EFFECTS_FILE", &effects)
        .args(["alias", "add", "ll", "ls -la"])
        .assert()
        .success()
        .stdout(predicate::str::contains("エイリアスを追加しました"))
        .stderr(predicate::str::contains("警告: シェルへの反映に失敗しました"))
        .stderr(predicate::str::contains("source"))
        .stderr(predicate::str::contains("エラー:").not());

    let contents = fs::read_to_string(sandbox.alias_file()).unwrap();
    assert!(contents.contains("alias ll='ls -la'"));
}

#[test]
fn test_alias_list() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["alias", "add", "gs", "git status"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["alias", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gs → git status"));
}

// ============================================================================
// Pomo
// ============================================================================

#[test]
fn test_pomo_completes_with_succeeding_timer() {
    Sandbox::new()
        .cmd()
        .args(["pomo", "2", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ポモドーロが完了しました"));
}

#[test]
fn test_pomo_cancelled_timer_exits_one() {
    let sandbox = Sandbox::new();
    sandbox.write_config(json!({
        "countdown": { "backend": "external", "command": "false" },
    }));

    sandbox
        .cmd()
        .arg("pomo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("作業タイマーがキャンセルされました"));
}

#[test]
fn test_pomo_rejects_zero_minutes() {
    Sandbox::new().cmd().args(["pomo", "0"]).assert().failure();
}

// ============================================================================
// Jump
// ============================================================================

#[test]
fn test_jump_without_repositories_fails() {
    let sandbox = Sandbox::new();
    sandbox.write_config(json!({
        "repositories": { "command": "true", "args": [] },
    }));

    sandbox
        .cmd()
        .arg("jump")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("リポジトリが見つかりません"))
        .stderr(predicate::str::contains("ヒント"));
}

#[cfg(unix)]
#[test]
fn test_jump_prints_selected_path() {
    let sandbox = Sandbox::new();
    let selector = sandbox.script("pick-first", "head -n 1");
    sandbox.write_config(json!({
        "repositories": {
            "command": "printf",
            "args": ["%s\\n", "/ghq/github.com/alice/tools", "/ghq/github.com/bob/site"],
        },
        "selector": { "command": selector, "prompt": "repo> " },
    }));

    sandbox
        .cmd()
        .arg("jump")
        .assert()
        .success()
        .stdout("/ghq/github.com/alice/tools\n");
}

#[cfg(unix)]
#[test]
fn test_jump_writes_cd_effect() {
    let sandbox = Sandbox::new();
    let selector = sandbox.script("pick-first", "head -n 1");
    let effects = sandbox.path().join("effects.sh");
    sandbox.write_config(json!({
        "repositories": {
            "command": "printf",
            "args": ["%s\\n", "/ghq/github.com/alice/tools"],
        },
        "selector": { "command": selector, "prompt": "repo> " },
    }));

    sandbox
        .cmd()
        .env("SHELLKIT_EFFECTS_FILE", &effects)
        .arg("jump")
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        fs::read_to_string(&effects).unwrap(),
        "cd -- '/ghq/github.com/alice/tools'\n"
    );
}

#[cfg(unix)]
#[test]
fn test_jump_no_selection_exits_zero() {
    let sandbox = Sandbox::new();
    let selector = sandbox.script("cancel", "cat >/dev/null\nexit 130");
    sandbox.write_config(json!({
        "repositories": {
            "command": "printf",
            "args": ["%s\\n", "/ghq/github.com/alice/tools"],
        },
        "selector": { "command": selector, "prompt": "repo> " },
    }));

    sandbox
        .cmd()
        .arg("jump")
        .assert()
        .success()
        .stdout(predicate::str::contains("リポジトリが選択されませんでした"));
}
