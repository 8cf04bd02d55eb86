use crate::notify::{NotificationChannel, NotificationError};
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

/// Log-only channel used as the default wiring when no real SMS/voice
/// provider is configured. Always succeeds for a non-empty target.
#[derive(Debug, Clone, Default)]
pub struct ConsoleChannel;

impl ConsoleChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationChannel for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
    }

    async fn send(
        &self,
        target: &str,
        message: &str,
        language: &str,
    ) -> Result<String, NotificationError> {
        if target.trim().is_empty() {
            return Err(NotificationError::InvalidTarget(
                "empty notification target".to_string(),
            ));
        }

        let message_id = format!("console-{}", Uuid::new_v4());
        info!(
            target = %target,
            language = %language,
            message_id = %message_id,
            body = %message,
            "📨 Console notification delivered"
        );
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_channel_returns_message_id() {
        let channel = ConsoleChannel::new();
        let id = channel.send("+911234567890", "hello", "en").await.unwrap();
        assert!(id.starts_with("console-"));
    }

    #[tokio::test]
    async fn test_console_channel_rejects_empty_target() {
        let channel = ConsoleChannel::new();
        let result = channel.send("  ", "hello", "en").await;
        assert!(matches!(result, Err(NotificationError::InvalidTarget(_))));
    }
}
