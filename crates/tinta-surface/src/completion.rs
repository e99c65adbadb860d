use std::time::{Duration, Instant};

use tinta_engine::time::{Countdown, CountdownEvent};

/// `done / total`, or 0 when there is nothing to do.
pub fn ratio(done: usize, total: usize) -> f32 {
    if total == 0 { 0.0 } else { (done as f32 / total as f32).min(1.0) }
}

/// One-shot celebration once progress passes a threshold.
#[derive(Debug, Clone)]
pub struct CompletionTracker {
    threshold: f32,
    celebrated: bool,
    countdown: Countdown,
}

impl CompletionTracker {
    pub fn new(threshold: f32, celebration: Duration) -> Self {
        Self { threshold, celebrated: false, countdown: Countdown::new(celebration) }
    }

    /// Report progress. Returns true when this call starts the celebration.
    pub fn update(&mut self, done: usize, total: usize, now: Instant) -> bool {
        if self.celebrated || done == 0 || ratio(done, total) <= self.threshold {
            return false;
        }
        self.celebrated = true;
        self.countdown.start(now);
        log::info!("completion passed {:.0}%", self.threshold * 100.0);
        true
    }

    pub fn tick(&mut self, now: Instant) -> CountdownEvent {
        self.countdown.tick(now)
    }

    pub fn is_celebrating(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn has_celebrated(&self) -> bool {
        self.celebrated
    }

    /// Re-arm and cancel any running celebration.
    pub fn reset(&mut self) {
        self.celebrated = false;
        self.countdown.cancel();
    }
}
