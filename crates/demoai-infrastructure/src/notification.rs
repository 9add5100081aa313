//! Notification sink implementations.

use demoai_core::notification::{Notification, NotificationLevel, NotificationSink};
use tokio::sync::mpsc;

/// Forwards notifications to a channel for the host to render.
///
/// Sending never blocks; once the receiver is dropped, notifications are
/// discarded.
#[derive(Debug, Clone)]
pub struct ChannelNotificationSink {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotificationSink {
    pub fn new(sender: mpsc::UnboundedSender<Notification>) -> Self {
        Self { sender }
    }

    /// Creates a sink together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl NotificationSink for ChannelNotificationSink {
    fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            tracing::debug!("[ChannelNotificationSink] Receiver dropped, notification discarded");
        }
    }
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        let Notification {
            level,
            title,
            description,
            ..
        } = notification;
        match level {
            NotificationLevel::Error => tracing::warn!("[Notification] {}: {}", title, description),
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!("[Notification] {}: {}", title, description)
            }
        }
    }
}
