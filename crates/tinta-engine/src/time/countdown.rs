use std::time::{Duration, Instant};

/// Outcome of [`Countdown::tick`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Not running.
    Idle,
    /// Running; this much time is left.
    Running(Duration),
    /// The deadline passed during this tick. Reported exactly once.
    Elapsed,
}

/// Cancellable fixed-duration timer.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: Duration,
    deadline: Option<Instant>,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self { duration, deadline: None }
    }

    /// (Re)start at `now`.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.duration);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Advance to `now`.
    pub fn tick(&mut self, now: Instant) -> CountdownEvent {
        let Some(deadline) = self.deadline else {
            return CountdownEvent::Idle;
        };
        if now >= deadline {
            self.deadline = None;
            CountdownEvent::Elapsed
        } else {
            CountdownEvent::Running(deadline.saturating_duration_since(now))
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
