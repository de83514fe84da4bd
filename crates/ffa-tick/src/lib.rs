//! Tick-based task scheduling.
//!
//! # Tick Execution Model
//!
//! ```text
//! Tick N:
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Phase 1: Absorb tasks registered since the last tick       │
//! │  Phase 2: Run due tasks in registration order               │
//! │           (cancellations take effect after each task)       │
//! │  Phase 3: Drop finished one-shot and stopped tasks          │
//! │  Phase 4: Advance tick counter                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on the caller's thread. Tasks get `&mut C` and register
//! further work through the [`Spawner`] the context exposes, so a countdown
//! can reschedule or stop itself without touching the scheduler directly.

mod scheduler;
mod tps;

pub use scheduler::{Flow, Scheduler, Spawner, TaskContext, TaskHandle};
pub use tps::TpsTracker;

/// Server ticks per second of game time.
pub const TICKS_PER_SECOND: u32 = 20;

/// Number of ticks in `secs` seconds of game time.
#[must_use]
pub const fn seconds(secs: u32) -> u64 {
    secs as u64 * TICKS_PER_SECOND as u64
}
