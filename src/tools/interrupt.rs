//! User interrupts between countdowns.
//!
//! Once a countdown has listened for Ctrl-C, SIGINT no longer terminates the
//! process. Each step of a cycle that is not itself a countdown (sending a
//! notification) races against an [`Interrupt`] so a Ctrl-C there still
//! cancels the cycle instead of being dropped.

use std::future;

use tracing::debug;

/// A source of user interrupts.
#[allow(async_fn_in_trait)]
pub trait Interrupt {
    /// Resolves when the user asks to stop.
    async fn triggered(&self);
}

/// Interrupt raised by Ctrl-C (SIGINT).
#[derive(Debug, Clone, Copy, Default)]
pub struct CtrlCInterrupt;

impl Interrupt for CtrlCInterrupt {
    async fn triggered(&self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => debug!("割り込みを受信しました"),
            Err(e) => {
                // Without a signal handler there is nothing to wait for.
                debug!("割り込みを監視できません: {}", e);
                future::pending::<()>().await;
            }
        }
    }
}

/// Mock interrupt for testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockInterrupt {
    fired: bool,
}

impl MockInterrupt {
    /// An interrupt that never fires.
    #[must_use]
    pub fn quiet() -> Self {
        Self { fired: false }
    }

    /// An interrupt that has already fired.
    #[must_use]
    pub fn fired() -> Self {
        Self { fired: true }
    }
}

impl Interrupt for MockInterrupt {
    async fn triggered(&self) {
        if !self.fired {
            future::pending::<()>().await;
        }
    }
}
