use crate::logging::log_notification_operation;
use crate::notify::{NotificationAttempt, NotificationChannel};
use futures::future::join_all;
use std::sync::Arc;

/// Fans one summary message out to every configured channel and collects
/// independent per-channel outcomes.
#[derive(Clone, Default)]
pub struct NotificationDispatcher {
    channels: Vec<Arc<dyn NotificationChannel>>,
}

impl NotificationDispatcher {
    pub fn new(channels: Vec<Arc<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Attempt delivery on every channel concurrently. Never fails; each
    /// channel's outcome lands in its own attempt record.
    pub async fn dispatch(
        &self,
        target: &str,
        message: &str,
        language: &str,
    ) -> Vec<NotificationAttempt> {
        let sends = self.channels.iter().map(|channel| {
            let channel = channel.clone();
            async move {
                let name = channel.name().to_string();
                match channel.send(target, message, language).await {
                    Ok(message_id) => {
                        log_notification_operation(&name, target, "delivered", None);
                        NotificationAttempt {
                            channel: name,
                            target: target.to_string(),
                            success: true,
                            error: None,
                            provider_message_id: Some(message_id),
                        }
                    }
                    Err(error) => {
                        log_notification_operation(
                            &name,
                            target,
                            "failed",
                            Some(&error.to_string()),
                        );
                        NotificationAttempt {
                            channel: name,
                            target: target.to_string(),
                            success: false,
                            error: Some(error.to_string()),
                            provider_message_id: None,
                        }
                    }
                }
            }
        });

        join_all(sends).await
    }
}
