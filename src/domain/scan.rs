use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// A decoded code as it leaves the capture loop. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct ScanEvent {
    pub code: String,
    pub at: Instant,
}

impl ScanEvent {
    pub fn now(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            at: Instant::now(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum LookupState {
    Pending,
    SettledAt(Instant),
}

/// Suppresses repeated triggers for the same physical scan.
///
/// A code is accepted when it differs from the last accepted code, or the
/// cooldown window has elapsed since that code was last accepted. Accepted
/// codes also enter an in-flight set that blocks duplicate lookups while one
/// is outstanding; membership expires a fixed interval after the lookup
/// settles, success or failure.
#[derive(Debug)]
pub struct ScanGate {
    cooldown: Duration,
    inflight_expiry: Duration,
    last_code: Option<String>,
    last_at: Option<Instant>,
    in_flight: HashMap<String, LookupState>,
}

impl ScanGate {
    pub fn new(cooldown: Duration, inflight_expiry: Duration) -> Self {
        Self {
            cooldown,
            inflight_expiry,
            last_code: None,
            last_at: None,
            in_flight: HashMap::new(),
        }
    }

    /// Decide whether a decoded code is a new scan worth acting on.
    /// Acceptance records the code as the last one seen and marks its lookup
    /// as in flight; the caller must later report the lookup via [`settle`].
    ///
    /// [`settle`]: ScanGate::settle
    pub fn accept(&mut self, event: &ScanEvent) -> bool {
        let code = event.code.as_str();
        let now = event.at;
        self.purge_expired(now);

        if self.in_flight.contains_key(code) {
            return false;
        }
        if let (Some(last), Some(at)) = (self.last_code.as_deref(), self.last_at) {
            if last == code && now.duration_since(at) < self.cooldown {
                return false;
            }
        }

        self.last_code = Some(code.to_string());
        self.last_at = Some(now);
        self.in_flight.insert(code.to_string(), LookupState::Pending);
        true
    }

    /// Report that the lookup for `code` finished (either way). The code
    /// stays blocked until the expiry interval after this instant.
    pub fn settle(&mut self, code: &str, now: Instant) {
        if let Some(state) = self.in_flight.get_mut(code) {
            *state = LookupState::SettledAt(now);
        }
    }

    fn purge_expired(&mut self, now: Instant) {
        let expiry = self.inflight_expiry;
        self.in_flight.retain(|_, state| match state {
            LookupState::Pending => true,
            LookupState::SettledAt(at) => now.duration_since(*at) < expiry,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, Instant};

    fn gate() -> ScanGate {
        ScanGate::new(Duration::from_millis(1000), Duration::from_millis(2000))
    }

    #[tokio::test(start_paused = true)]
    async fn same_code_is_suppressed_inside_cooldown() {
        let mut gate = gate();
        assert!(gate.accept(&ScanEvent::now("M-100")));
        gate.settle("M-100", Instant::now());

        advance(Duration::from_millis(500)).await;
        assert!(!gate.accept(&ScanEvent::now("M-100")));
    }

    #[tokio::test(start_paused = true)]
    async fn different_code_is_accepted_immediately() {
        let mut gate = gate();
        assert!(gate.accept(&ScanEvent::now("M-100")));
        assert!(gate.accept(&ScanEvent::now("M-200")));
    }

    #[tokio::test(start_paused = true)]
    async fn same_code_is_accepted_after_inflight_expiry() {
        let mut gate = gate();
        assert!(gate.accept(&ScanEvent::now("M-100")));
        gate.settle("M-100", Instant::now());

        // Past the cooldown but inside the in-flight expiry window.
        advance(Duration::from_millis(1500)).await;
        assert!(!gate.accept(&ScanEvent::now("M-100")));

        advance(Duration::from_millis(600)).await;
        assert!(gate.accept(&ScanEvent::now("M-100")));
    }

    #[tokio::test(start_paused = true)]
    async fn unsettled_lookup_blocks_indefinitely() {
        let mut gate = gate();
        assert!(gate.accept(&ScanEvent::now("M-100")));

        advance(Duration::from_secs(60)).await;
        assert!(!gate.accept(&ScanEvent::now("M-100")));

        gate.settle("M-100", Instant::now());
        advance(Duration::from_millis(2000)).await;
        assert!(gate.accept(&ScanEvent::now("M-100")));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_sightings_accept_at_most_once_per_window() {
        let mut gate = gate();
        let mut accepted = 0;
        for _ in 0..25 {
            if gate.accept(&ScanEvent::now("M-100")) {
                accepted += 1;
                gate.settle("M-100", Instant::now());
            }
            advance(Duration::from_millis(100)).await;
        }
        // t=0 accepts; the settle-plus-expiry window then gates the rest
        // until t=2100, which accepts again.
        assert_eq!(accepted, 2);
    }
}
