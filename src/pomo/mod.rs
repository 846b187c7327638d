//! Work/rest cycle controller.
//!
//! A cycle runs three countdowns in sequence:
//!
//! ```text
//! work (first half) ──▶ "stand up" ──▶ work (second half) ──▶ "work ended"
//!                                                                  │
//!                                   "back to work" ◀── rest ◀──────┘
//! ```
//!
//! The work duration is split as `floor(work / 2)` followed by the remainder,
//! so an odd duration gives a first half one minute shorter than the second.
//! A cancelled countdown ends the whole cycle immediately: cancelling either
//! work half skips the rest phase and every later notification. Ctrl-C while
//! a notification is being sent cancels the phase that would follow it.

use tracing::info;

use crate::config::PomoConfig;
use crate::tools::{Countdown, CtrlCInterrupt, Interrupt, Notifier, ToolError};
use crate::types::{CycleOutcome, CycleParams, Notification, Phase};

// ============================================================================
// CycleMessages
// ============================================================================

/// Notifications sent at each transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleMessages {
    /// Sent between the two work halves.
    pub stand_up: Notification,
    /// Sent when the work session ends.
    pub work_end: Notification,
    /// Sent when the rest ends.
    pub rest_end: Notification,
}

impl CycleMessages {
    /// Builds the three notifications from configuration.
    #[must_use]
    pub fn from_config(config: &PomoConfig) -> Self {
        let icon = config.icon_path();
        let build = |message: &str, sound: &Option<String>| {
            Notification::new(&config.title, message)
                .with_icon(icon.clone())
                .with_sound(sound.clone())
        };

        Self {
            stand_up: build(&config.stand_up_message, &config.work_sound),
            work_end: build(&config.work_end_message, &config.work_sound),
            rest_end: build(&config.rest_end_message, &config.rest_sound),
        }
    }
}

impl Default for CycleMessages {
    fn default() -> Self {
        Self::from_config(&PomoConfig::default())
    }
}

// ============================================================================
// CycleController
// ============================================================================

/// Sequences countdowns and notifications for one work/rest cycle.
pub struct CycleController<C, N, I = CtrlCInterrupt>
where
    C: Countdown,
    N: Notifier,
    I: Interrupt,
{
    countdown: C,
    notifier: N,
    interrupt: I,
    messages: CycleMessages,
}

impl<C, N> CycleController<C, N>
where
    C: Countdown,
    N: Notifier,
{
    /// Creates a controller that treats Ctrl-C during notifications as
    /// cancellation.
    pub fn new(countdown: C, notifier: N, messages: CycleMessages) -> Self {
        Self::with_interrupt(countdown, notifier, CtrlCInterrupt, messages)
    }
}

impl<C, N, I> CycleController<C, N, I>
where
    C: Countdown,
    N: Notifier,
    I: Interrupt,
{
    /// Creates a controller with an explicit interrupt source.
    pub fn with_interrupt(
        countdown: C,
        notifier: N,
        interrupt: I,
        messages: CycleMessages,
    ) -> Self {
        Self {
            countdown,
            notifier,
            interrupt,
            messages,
        }
    }

    /// Runs one full cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if a countdown cannot run at all. User cancellation
    /// is reported through [`CycleOutcome`], not as an error.
    pub async fn run_cycle(&self, params: CycleParams) -> Result<CycleOutcome, ToolError> {
        let (first, second) = params.work_split();
        info!(
            "サイクル開始: 作業 {}分 ({} + {}), 休憩 {}分",
            params.work_minutes, first, second, params.rest_minutes
        );

        if !self.run_phase(Phase::WorkFirstHalf, &params).await? {
            return Ok(CycleOutcome::WorkCancelled);
        }
        if !self.deliver(&self.messages.stand_up).await {
            return Ok(CycleOutcome::WorkCancelled);
        }

        if !self.run_phase(Phase::WorkSecondHalf, &params).await? {
            return Ok(CycleOutcome::WorkCancelled);
        }
        if !self.deliver(&self.messages.work_end).await {
            return Ok(CycleOutcome::RestCancelled);
        }

        if !self.run_phase(Phase::Rest, &params).await? {
            return Ok(CycleOutcome::RestCancelled);
        }
        // Every phase has finished; an interrupt here has nothing left to cancel.
        self.deliver(&self.messages.rest_end).await;

        info!("サイクル完了");
        Ok(CycleOutcome::Completed)
    }

    /// Runs the countdown for `phase`; returns false if it was cancelled.
    async fn run_phase(&self, phase: Phase, params: &CycleParams) -> Result<bool, ToolError> {
        let minutes = params.minutes_for(phase);
        info!("{} 開始 ({}分)", phase.as_str(), minutes);

        let status = self.countdown.run(minutes).await?;
        if status.is_cancelled() {
            info!("{} がキャンセルされました", phase.as_str());
            return Ok(false);
        }

        info!("{} 終了", phase.as_str());
        Ok(true)
    }

    /// Sends `notification`; returns false if interrupted first.
    async fn deliver(&self, notification: &Notification) -> bool {
        tokio::select! {
            biased;
            _ = self.interrupt.triggered() => {
                info!("通知中に割り込まれました");
                false
            }
            _ = self.notifier.notify(notification) => true,
        }
    }

    /// Returns the countdown (for inspection in tests).
    pub fn countdown(&self) -> &C {
        &self.countdown
    }

    /// Returns the notifier (for inspection in tests).
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

// ============================================================================
// Tests
// ============================================================================
