//! # Notification Dispatch
//!
//! Sends the run summary through one or more channels, recording an
//! independent outcome per channel. A failure on one channel never aborts
//! the others, and the dispatcher itself never fails: the caller receives
//! one [`NotificationAttempt`] per requested channel regardless.
//!
//! Transport is out of scope; the [`NotificationChannel`] trait is the seam
//! an SMS/voice provider integration implements. The crate ships a log-only
//! [`ConsoleChannel`] as the default wiring.

pub mod channels;
pub mod dispatcher;

pub use channels::ConsoleChannel;
pub use dispatcher::NotificationDispatcher;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error raised by a channel for a single send.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationError {
    #[error("channel {channel} failed: {message}")]
    ChannelFailure { channel: String, message: String },

    #[error("invalid target: {0}")]
    InvalidTarget(String),
}

/// Per-channel outcome record. One per requested channel per run,
/// independent of whether other channels succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAttempt {
    pub channel: String,
    pub target: String,
    pub success: bool,
    pub error: Option<String>,
    pub provider_message_id: Option<String>,
}

/// One outbound notification transport.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Channel name used in attempt records and logs.
    fn name(&self) -> &str;

    /// Deliver `message` to `target`, returning the provider message id.
    async fn send(
        &self,
        target: &str,
        message: &str,
        language: &str,
    ) -> Result<String, NotificationError>;
}
