//! Per-image load state machine.
//!
//! ```text
//! Idle ──begin_load──▶ Loading ──ok──▶ Ready ⇄ Filling
//!                         │                 reset
//!                         └──err──▶ Error
//! ```
//!
//! `begin_load` is accepted from every phase. Only the newest ticket may
//! complete a load; older completions are dropped.

/// Load phase of a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    Loading,
    /// Loaded, nothing filled since load or reset.
    Ready,
    /// Loaded, with at least one successful fill since load or reset.
    Filling,
    /// The last load failed.
    Error(String),
}

/// Identifies one load request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Phase,
    issued: u64,
    pending: Option<LoadTicket>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self { phase: Phase::Idle, issued: 0, pending: None }
    }
}

impl Lifecycle {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.phase, Phase::Ready | Phase::Filling)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        let ticket = LoadTicket(self.issued);
        self.pending = Some(ticket);
        self.phase = Phase::Loading;
        log::debug!("load {} started", self.issued);
        ticket
    }

    /// Claim the completion of `ticket`. False for superseded tickets.
    pub fn accept(&mut self, ticket: LoadTicket) -> bool {
        if self.pending != Some(ticket) {
            log::debug!("load {} superseded, result dropped", ticket.0);
            return false;
        }
        self.pending = None;
        true
    }

    pub fn ready(&mut self) {
        self.phase = Phase::Ready;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("load failed: {message}");
        self.phase = Phase::Error(message);
    }

    pub fn mark_filled(&mut self) {
        if self.phase == Phase::Ready {
            self.phase = Phase::Filling;
        }
    }

    pub fn reset(&mut self) {
        if self.phase == Phase::Filling {
            self.phase = Phase::Ready;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_ticket_wins() {
        let mut lc = Lifecycle::default();
        let first = lc.begin_load();
        let second = lc.begin_load();
        assert!(!lc.accept(first));
        assert_eq!(lc.phase(), &Phase::Loading);
        assert!(lc.accept(second));
        assert!(!lc.accept(second));
    }

    #[test]
    fn fill_and_reset_transitions() {
        let mut lc = Lifecycle::default();
        lc.mark_filled();
        assert_eq!(lc.phase(), &Phase::Idle);
        let t = lc.begin_load();
        lc.accept(t);
        lc.ready();
        lc.mark_filled();
        assert_eq!(lc.phase(), &Phase::Filling);
        lc.reset();
        assert_eq!(lc.phase(), &Phase::Ready);
        lc.fail("boom");
        lc.reset();
        assert_eq!(lc.phase(), &Phase::Error("boom".into()));
    }
}
