use std::sync::Arc;

use tokio::sync::watch;

use crate::config::Settings;
use crate::domain::chat::ChatMessage;
use crate::domain::errors::DomainError;
use crate::domain::ports::Assistant;

/// Assistant chat behind the `assistant_enabled` setting. The flag is read
/// live from the settings subscription, so toggling it takes effect on the
/// next call without rebuilding the service.
pub struct AssistantService<A> {
    assistant: Arc<A>,
    settings: watch::Receiver<Settings>,
}

impl<A: Assistant> AssistantService<A> {
    pub fn new(assistant: Arc<A>, settings: watch::Receiver<Settings>) -> Self {
        Self {
            assistant,
            settings,
        }
    }

    /// Whether the widget should be shown at all.
    pub fn is_enabled(&self) -> bool {
        self.settings.borrow().assistant_enabled
    }

    /// Complete the conversation, or reject it when the feature is off.
    pub async fn complete(&self, history: &[ChatMessage]) -> Result<String, DomainError> {
        if !self.is_enabled() {
            return Err(DomainError::Validation(
                "Assistant is disabled".to_string(),
            ));
        }
        self.assistant.complete(history).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::config::SettingsService;
    use crate::domain::chat::ChatRole;

    struct FakeAssistant {
        calls: AtomicUsize,
    }

    impl FakeAssistant {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Assistant for FakeAssistant {
        async fn complete(&self, history: &[ChatMessage]) -> Result<String, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("echo of {} messages", history.len()))
        }
    }

    fn question() -> Vec<ChatMessage> {
        vec![ChatMessage {
            role: ChatRole::User,
            content: "Which boots sell best?".to_string(),
        }]
    }

    #[tokio::test]
    async fn disabled_setting_blocks_before_any_completion_call() {
        let settings = SettingsService::new(Settings::default());
        let assistant = FakeAssistant::new();
        let service = AssistantService::new(assistant.clone(), settings.subscribe());

        assert!(!service.is_enabled());
        let err = service
            .complete(&question())
            .await
            .expect_err("disabled assistant must reject");

        assert_eq!(err.to_string(), "Assistant is disabled");
        assert_eq!(assistant.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn enabling_the_setting_takes_effect_on_the_next_call() {
        let settings = SettingsService::new(Settings::default());
        let assistant = FakeAssistant::new();
        let service = AssistantService::new(assistant.clone(), settings.subscribe());

        settings.update(|s| s.assistant_enabled = true);

        assert!(service.is_enabled());
        let reply = service
            .complete(&question())
            .await
            .expect("enabled assistant completes");
        assert_eq!(reply, "echo of 1 messages");
        assert_eq!(assistant.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn disabling_mid_session_cuts_off_further_calls() {
        let settings = SettingsService::new(Settings {
            assistant_enabled: true,
            ..Settings::default()
        });
        let assistant = FakeAssistant::new();
        let service = AssistantService::new(assistant.clone(), settings.subscribe());

        service
            .complete(&question())
            .await
            .expect("first call goes through");

        settings.update(|s| s.assistant_enabled = false);

        service
            .complete(&question())
            .await
            .expect_err("toggled-off assistant must reject");
        assert_eq!(assistant.calls.load(Ordering::SeqCst), 1);
    }
}
