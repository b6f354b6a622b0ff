use std::time::Duration;

use tokio::sync::watch;

/// Runtime settings for the admin client. Loaded from the environment by the
/// binary and injected everywhere else; components that care about changes
/// subscribe instead of polling ambient storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend_base_url: String,
    /// Capture tick period.
    pub frame_interval_ms: u64,
    /// Fixed center-crop zoom applied to every frame before decoding.
    pub zoom_factor: f32,
    /// Minimum time before the same scanned code is accepted again.
    pub scan_cooldown_ms: u64,
    /// How long a code stays blocked after its lookup settles.
    pub inflight_expiry_ms: u64,
    pub assistant_enabled: bool,
    pub dollar_widget_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_base_url: "http://localhost:4000".to_string(),
            frame_interval_ms: 33,
            zoom_factor: 2.0,
            scan_cooldown_ms: 1000,
            inflight_expiry_ms: 2000,
            assistant_enabled: false,
            dollar_widget_enabled: false,
        }
    }
}

impl Settings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn scan_cooldown(&self) -> Duration {
        Duration::from_millis(self.scan_cooldown_ms)
    }

    pub fn inflight_expiry(&self) -> Duration {
        Duration::from_millis(self.inflight_expiry_ms)
    }
}

/// Shared settings holder with change subscription.
#[derive(Debug)]
pub struct SettingsService {
    tx: watch::Sender<Settings>,
}

impl SettingsService {
    pub fn new(initial: Settings) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> Settings {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every subsequent [`update`].
    ///
    /// [`update`]: SettingsService::update
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.tx.subscribe()
    }

    pub fn update(&self, mutate: impl FnOnce(&mut Settings)) {
        self.tx.send_modify(mutate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_observe_updates() {
        let service = SettingsService::new(Settings::default());
        let mut rx = service.subscribe();

        service.update(|s| s.assistant_enabled = true);

        rx.changed().await.expect("sender still alive");
        assert!(rx.borrow().assistant_enabled);
        assert!(service.current().assistant_enabled);
    }

    #[test]
    fn default_windows_match_the_scan_gate_contract() {
        let settings = Settings::default();
        assert_eq!(settings.scan_cooldown(), Duration::from_millis(1000));
        assert_eq!(settings.inflight_expiry(), Duration::from_millis(2000));
    }
}
