//! Core data types for shellkit.
//!
//! This module defines the data structures used for:
//! - Work/rest cycle parameters and the half split of the work duration
//! - Countdown and cycle outcomes
//! - Notification content handed to the notifier
//! - Alias entries written to the alias file

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default work duration in minutes.
pub const DEFAULT_WORK_MINUTES: u32 = 60;

/// Default rest duration in minutes.
pub const DEFAULT_REST_MINUTES: u32 = 10;

// ============================================================================
// Phase
// ============================================================================

/// One of the three sequential timed segments of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// First half of the work session
    WorkFirstHalf,
    /// Second half of the work session
    WorkSecondHalf,
    /// Rest after the work session
    Rest,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::WorkFirstHalf => "work_first_half",
            Phase::WorkSecondHalf => "work_second_half",
            Phase::Rest => "rest",
        }
    }
}

// ============================================================================
// CycleParams
// ============================================================================

/// Durations of one work/rest cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleParams {
    /// Work duration in minutes
    pub work_minutes: u32,
    /// Rest duration in minutes
    pub rest_minutes: u32,
}

impl Default for CycleParams {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            rest_minutes: DEFAULT_REST_MINUTES,
        }
    }
}

impl CycleParams {
    /// Creates parameters with the given durations.
    pub fn new(work_minutes: u32, rest_minutes: u32) -> Self {
        Self {
            work_minutes,
            rest_minutes,
        }
    }

    /// Splits the work duration into `(floor(work / 2), remainder)`.
    ///
    /// For an odd duration the first half is one minute shorter.
    pub fn work_split(&self) -> (u32, u32) {
        let half = self.work_minutes / 2;
        (half, self.work_minutes - half)
    }

    /// Returns the duration in minutes of the given phase.
    pub fn minutes_for(&self, phase: Phase) -> u32 {
        let (first, second) = self.work_split();
        match phase {
            Phase::WorkFirstHalf => first,
            Phase::WorkSecondHalf => second,
            Phase::Rest => self.rest_minutes,
        }
    }
}

// ============================================================================
// CountdownStatus / CycleOutcome
// ============================================================================

/// How a single countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// The duration elapsed naturally
    Completed,
    /// The user stopped the countdown early
    Cancelled,
}

impl CountdownStatus {
    /// Maps a process exit status: success means completion.
    pub fn from_success(success: bool) -> Self {
        if success {
            CountdownStatus::Completed
        } else {
            CountdownStatus::Cancelled
        }
    }

    /// Returns true if the countdown was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CountdownStatus::Cancelled)
    }
}

/// Result of a full work/rest cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// All three phases finished
    Completed,
    /// One of the work halves was cancelled; rest never started
    WorkCancelled,
    /// Work finished but the rest phase was cancelled
    RestCancelled,
}

impl CycleOutcome {
    /// Returns the user-visible summary line for this outcome.
    pub fn summary(&self) -> &'static str {
        match self {
            CycleOutcome::Completed => "ポモドーロが完了しました",
            CycleOutcome::WorkCancelled => "作業タイマーがキャンセルされました",
            CycleOutcome::RestCancelled => "休憩タイマーがキャンセルされました",
        }
    }

    /// Returns true if every phase finished.
    pub fn is_completed(&self) -> bool {
        matches!(self, CycleOutcome::Completed)
    }
}

// ============================================================================
// Notification
// ============================================================================

/// Content of a single desktop notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    /// Notification title
    pub title: String,
    /// Notification body
    pub message: String,
    /// Path to the icon shown next to the notification
    pub icon: Option<PathBuf>,
    /// Name of the sound to play
    pub sound: Option<String>,
}

impl Notification {
    /// Creates a notification with a title and message.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            icon: None,
            sound: None,
        }
    }

    /// Sets the icon path.
    pub fn with_icon(mut self, icon: Option<PathBuf>) -> Self {
        self.icon = icon;
        self
    }

    /// Sets the sound name.
    pub fn with_sound(mut self, sound: Option<String>) -> Self {
        self.sound = sound;
        self
    }
}

// ============================================================================
// AliasEntry
// ============================================================================

/// A shell alias as stored in the alias file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Alias name
    pub name: String,
    /// Command the alias expands to
    pub command: String,
}

impl AliasEntry {
    /// Creates a new alias entry.
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }

    /// Renders the `alias NAME='COMMAND'` line.
    ///
    /// Single quotes inside the command are written as `'\''`.
    pub fn to_line(&self) -> String {
        format!("alias {}='{}'", self.name, self.command.replace('\'', r"'\''"))
    }

    /// Parses an `alias NAME='COMMAND'` line, returning None for anything else.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix("alias ")?;
        let (name, value) = rest.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let command = match value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
            Some(quoted) => quoted.replace(r"'\''", "'"),
            None => match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
                Some(quoted) => quoted.to_string(),
                None => value.to_string(),
            },
        };

        Some(Self::new(name, command))
    }
}

// ============================================================================
// Tests
// ============================================================================
