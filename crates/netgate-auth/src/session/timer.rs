//! Session countdown timer.
//!
//! The timer is a client-facing view of the session window, not an
//! enforcement mechanism: the controller revokes network access on its
//! own schedule regardless of what this timer shows. It counts down in
//! one-second ticks and emits exactly one expiry notification per armed
//! window.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Lifecycle of one armed countdown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Armed but no tick observed yet.
    Armed,
    /// Counting down, at least one second remaining.
    Counting,
    /// The window elapsed. Terminal until re-armed.
    Expired,
}

/// Countdown over a granted session window.
pub struct SessionTimer {
    rx: watch::Receiver<(TimerState, u64)>,
    handle: JoinHandle<()>,
}

impl SessionTimer {
    /// Arm a countdown that expires after `duration`.
    pub fn arm_for(duration: Duration) -> Self {
        let total_seconds = duration.as_secs();
        let (tx, rx) = watch::channel((TimerState::Armed, total_seconds));

        let handle = tokio::spawn(async move {
            if total_seconds == 0 {
                let _ = tx.send((TimerState::Expired, 0));
                return;
            }

            let mut remaining = total_seconds;
            let mut ticks = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick fires immediately; consume it so the
            // countdown starts a full second after arming.
            ticks.tick().await;
            let _ = tx.send((TimerState::Counting, remaining));

            loop {
                ticks.tick().await;
                remaining -= 1;
                if remaining == 0 {
                    debug!("Session window elapsed");
                    let _ = tx.send((TimerState::Expired, 0));
                    return;
                }
                let _ = tx.send((TimerState::Counting, remaining));
            }
        });

        Self { rx, handle }
    }

    /// Arm a countdown ending at `expires_at`. An instant already in the
    /// past arms an immediately-expiring window.
    pub fn arm(expires_at: DateTime<Utc>) -> Self {
        let remaining = (expires_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        Self::arm_for(remaining)
    }

    pub fn state(&self) -> TimerState {
        self.rx.borrow().0
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.rx.borrow().1
    }

    /// Subscribe to tick and expiry updates.
    pub fn subscribe(&self) -> watch::Receiver<(TimerState, u64)> {
        self.rx.clone()
    }

    /// Wait until the armed window expires.
    pub async fn expired(&mut self) {
        while self.rx.borrow().0 != TimerState::Expired {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Replace the current window with a fresh one of `duration`.
    pub fn rearm(&mut self, duration: Duration) {
        let fresh = Self::arm_for(duration);
        let old = std::mem::replace(self, fresh);
        old.handle.abort();
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn advance_secs(secs: u64) {
        for _ in 0..secs {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_by_one_second_ticks() {
        let timer = SessionTimer::arm_for(Duration::from_secs(5));
        tokio::task::yield_now().await;
        assert_eq!(timer.state(), TimerState::Counting);
        assert_eq!(timer.remaining_seconds(), 5);

        advance_secs(2).await;
        assert_eq!(timer.remaining_seconds(), 3);
        assert_eq!(timer.state(), TimerState::Counting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_exactly_once() {
        let mut timer = SessionTimer::arm_for(Duration::from_secs(3));
        let mut rx = timer.subscribe();
        tokio::task::yield_now().await;

        advance_secs(5).await;
        timer.expired().await;
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.remaining_seconds(), 0);

        // Drain the receiver until the sender side is gone: exactly one
        // Expired update was published.
        let mut expiries = 0;
        while rx.changed().await.is_ok() {
            let (state, _) = *rx.borrow_and_update();
            if state == TimerState::Expired {
                expiries += 1;
            }
        }
        assert_eq!(expiries, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_expires_immediately() {
        let mut timer = SessionTimer::arm_for(Duration::ZERO);
        timer.expired().await;
        assert_eq!(timer.state(), TimerState::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_restarts_countdown() {
        let mut timer = SessionTimer::arm_for(Duration::from_secs(2));
        tokio::task::yield_now().await;
        advance_secs(3).await;
        timer.expired().await;
        assert_eq!(timer.state(), TimerState::Expired);

        timer.rearm(Duration::from_secs(4));
        tokio::task::yield_now().await;
        assert_eq!(timer.state(), TimerState::Counting);
        assert_eq!(timer.remaining_seconds(), 4);

        advance_secs(4).await;
        timer.expired().await;
        assert_eq!(timer.state(), TimerState::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn test_past_deadline_arms_expired_window() {
        let mut timer = SessionTimer::arm(Utc::now() - chrono::Duration::minutes(1));
        timer.expired().await;
        assert_eq!(timer.state(), TimerState::Expired);
    }
}
