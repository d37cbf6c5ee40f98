//! Change notification.
//!
//! A [`Notifier`] delivers a rendered [`ChangeSet`] to a human. Two
//! implementations are provided: [`LogNotifier`] writes to the log and
//! [`WebhookNotifier`] posts to a Slack/Discord-compatible webhook.

use async_trait::async_trait;
use coursewatch_diff::ChangeSet;
use reqwest::Client;
use thiserror::Error;
use tracing::info;

/// Result type for notification operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport-level failure reaching the webhook.
    #[error("notification http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status.
    #[error("webhook returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Delivers change reports.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers the change set. Implementations must not be called with an
    /// empty set; the watcher only notifies when something changed.
    async fn notify(&self, changes: &ChangeSet) -> NotifyResult<()>;
}

/// Writes change reports to the log. The default when no webhook is
/// configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, changes: &ChangeSet) -> NotifyResult<()> {
        for line in changes.render().lines() {
            info!("{line}");
        }
        Ok(())
    }
}

/// Posts change reports as JSON (`{"text": "..."}`) to a configured URL.
/// The shape matches what Slack- and Discord-style incoming webhooks
/// accept.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    client: Client,
}

impl WebhookNotifier {
    /// Creates a notifier posting to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, changes: &ChangeSet) -> NotifyResult<()> {
        let body = serde_json::json!({ "text": changes.render() });
        let response = self.client.post(&self.url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status()));
        }
        info!(count = changes.len(), "change report delivered");
        Ok(())
    }
}
