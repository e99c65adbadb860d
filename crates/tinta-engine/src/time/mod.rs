//! Time utilities.
//!
//! Timers here never read the clock themselves: callers pass `Instant`s in,
//! which keeps them deterministic under test.

mod countdown;

pub use countdown::{Countdown, CountdownEvent};
