//! Display utilities for shellkit.
//!
//! Results go to stdout; warnings, hints and errors go to stderr so that
//! `cd "$(shellkit jump)"` only ever captures a path.

use std::path::Path;

use crate::alias::Registration;
use crate::types::{AliasEntry, CycleOutcome, CycleParams};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the cycle about to start.
    pub fn show_cycle_start(params: &CycleParams) {
        println!("{}", Self::format_cycle_start(params));
    }

    /// Shows how a cycle ended.
    pub fn show_cycle_outcome(outcome: CycleOutcome) {
        if outcome.is_completed() {
            println!("* {}", outcome.summary());
        } else {
            eprintln!("[] {}", outcome.summary());
        }
    }

    /// Shows a registered alias, warning first if the name already existed.
    pub fn show_alias_added(registration: &Registration) {
        if registration.duplicate {
            Self::show_duplicate_warning(&registration.entry.name, &registration.alias_file);
        }
        println!("* エイリアスを追加しました: {}", registration.entry.to_line());
    }

    /// Warns that an alias name is already defined.
    pub fn show_duplicate_warning(name: &str, alias_file: &Path) {
        eprintln!(
            "警告: エイリアス '{}' は既に {} に存在します（後の定義が優先されます）",
            name,
            alias_file.display()
        );
    }

    /// Shows registered aliases.
    pub fn show_aliases(entries: &[AliasEntry]) {
        if entries.is_empty() {
            println!("登録されたエイリアスはありません");
            return;
        }
        for line in Self::format_alias_table(entries) {
            println!("{}", line);
        }
    }

    /// Shows that the selector returned nothing.
    pub fn show_no_selection() {
        println!("リポジトリが選択されませんでした");
    }

    /// Shows that the lister returned nothing.
    pub fn show_no_repositories(suggestion: &str) {
        println!("リポジトリが見つかりません");
        Self::show_suggestion(suggestion);
    }

    /// Warns that the calling shell could not be updated.
    pub fn show_effects_warning(message: &str) {
        eprintln!("警告: シェルへの反映に失敗しました: {}", message);
    }

    /// Tells the user to reload their shell manually.
    pub fn show_reload_hint(rc_file: &Path) {
        eprintln!(
            "反映するには次を実行してください: source {}",
            rc_file.display()
        );
    }

    /// Shows the config file location and its resolved contents.
    pub fn show_config(path: &Path, exists: bool, json: &str) {
        let marker = if exists { "" } else { "（未作成・デフォルト値）" };
        println!("設定ファイル: {}{}", path.display(), marker);
        println!("{}", json);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Shows a hint below an error message.
    pub fn show_suggestion(suggestion: &str) {
        eprintln!("  ヒント: {}", suggestion);
    }

    fn format_cycle_start(params: &CycleParams) -> String {
        let (first, second) = params.work_split();
        format!(
            "> 作業 {}分（{}分 + {}分）→ 休憩 {}分",
            params.work_minutes, first, second, params.rest_minutes
        )
    }

    /// Aligns alias names into a column.
    fn format_alias_table(entries: &[AliasEntry]) -> Vec<String> {
        let width = entries
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0);
        entries
            .iter()
            .map(|e| {
                let pad = width - e.name.chars().count();
                format!("{}{} → {}", e.name, " ".repeat(pad), e.command)
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
