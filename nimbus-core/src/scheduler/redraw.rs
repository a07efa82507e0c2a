//! One-shot redraw timer with second alignment
//!
//! The scheduler does not sleep. It records the deadline of the one
//! pending timer and the owner of the rendering context waits for it,
//! then hands the handle back through `fire`. Each firing re-anchors to the
//! wall clock, so late wake-ups never accumulate into drift.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

/// Interactive redraw period
pub const INTERACTIVE_UPDATE_RATE_MS: i64 = 1000;

/// Delay from `now_ms` to the next whole second
///
/// Always in `1..=1000`; a timer armed exactly on a boundary waits a full
/// period rather than firing immediately.
pub fn delay_until_next_second(now_ms: i64) -> i64 {
    INTERACTIVE_UPDATE_RATE_MS - now_ms.rem_euclid(INTERACTIVE_UPDATE_RATE_MS)
}

/// Period of the host's ambient tick
pub const AMBIENT_UPDATE_RATE_MS: i64 = 60_000;

/// Delay from `now_ms` to the next whole minute, in `1..=60_000`
pub fn delay_until_next_minute(now_ms: i64) -> i64 {
    AMBIENT_UPDATE_RATE_MS - now_ms.rem_euclid(AMBIENT_UPDATE_RATE_MS)
}

/// The one outstanding scheduled redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerHandle {
    deadline_ms: i64,
    generation: u32,
}

impl TimerHandle {
    /// Wall-clock time at which the timer fires, epoch milliseconds
    pub fn deadline_ms(&self) -> i64 {
        self.deadline_ms
    }
}

/// Shared cancellation flag
///
/// Handed to whoever tears the face down; once cancelled the scheduler
/// never arms again and ignores any handle still in flight.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Result of a timer firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Handle was stopped, replaced or cancelled; nothing to do
    Stale,
    /// Redraw now; `next` is the re-armed timer, if any
    Redraw { next: Option<TimerHandle> },
}

/// Owner of at most one pending redraw timer
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    pending: Option<TimerHandle>,
    generation: u32,
    token: CancelToken,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that stops this scheduler for good
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Currently pending timer
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Arm the timer for the next second boundary if none is pending
    ///
    /// Returns the pending handle, or `None` once cancelled.
    pub fn start(&mut self, now_ms: i64) -> Option<TimerHandle> {
        if self.token.is_cancelled() {
            self.pending = None;
            return None;
        }
        if self.pending.is_none() {
            self.arm(now_ms);
        }
        self.pending
    }

    /// Drop the pending timer, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            trace!("redraw timer stopped ({})", handle.deadline_ms);
        }
    }

    /// Handle a timer firing
    ///
    /// `keep_running` is the state machine's current verdict; the timer
    /// re-arms only while it holds.
    pub fn fire(&mut self, handle: TimerHandle, now_ms: i64, keep_running: bool) -> TickOutcome {
        if self.token.is_cancelled() || self.pending != Some(handle) {
            return TickOutcome::Stale;
        }
        self.pending = None;

        // A wake-up ahead of the deadline still belongs to that second
        let next = if keep_running {
            self.arm(now_ms.max(handle.deadline_ms));
            self.pending
        } else {
            None
        };
        TickOutcome::Redraw { next }
    }

    fn arm(&mut self, now_ms: i64) {
        self.generation = self.generation.wrapping_add(1);
        let deadline_ms = now_ms + delay_until_next_second(now_ms);
        trace!("redraw timer armed for {}", deadline_ms);
        self.pending = Some(TimerHandle {
            deadline_ms,
            generation: self.generation,
        });
    }
}
