//! Redraw scheduler
//!
//! Owns the single pending redraw timer and keeps it phase-locked to
//! wall-clock second boundaries.

pub mod redraw;

pub use redraw::{
    delay_until_next_minute, delay_until_next_second, CancelToken, RedrawScheduler, TickOutcome,
    TimerHandle, AMBIENT_UPDATE_RATE_MS, INTERACTIVE_UPDATE_RATE_MS,
};
