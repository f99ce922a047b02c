//! Posts formatted notifications to a chat incoming webhook.
//!
//! One attempt per outcome, no retries. Only `content` outcomes are sent.

use crate::chat::Outcome;
use crate::config::RelayConfig;
use crate::error::{HookError, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct Relay {
    webhook_url: String,
    client: reqwest::Client,
}

impl Relay {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            webhook_url: webhook_url.into(),
            client,
        })
    }

    /// `None` when no webhook URL is configured
    pub fn from_config(config: &RelayConfig) -> Result<Option<Self>> {
        match &config.webhook_url {
            Some(url) => {
                debug!("Chat relay enabled");
                Self::new(url.clone(), Duration::from_secs(config.timeout_secs)).map(Some)
            }
            None => {
                debug!("Chat relay disabled (CHAT_WEBHOOK_URL not set)");
                Ok(None)
            }
        }
    }

    /// Post the notification carried by `outcome`. Returns whether anything
    /// was sent.
    pub async fn deliver(&self, outcome: &Outcome) -> Result<bool> {
        let Some(notification) = outcome.content() else {
            debug!(outcome = outcome.label(), "Nothing to relay");
            return Ok(false);
        };

        debug!(
            attachments = notification.attachments.len(),
            channel = ?notification.channel,
            "Posting notification"
        );

        let resp = self
            .client
            .post(&self.webhook_url)
            .json(notification)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Chat webhook returned error");
            return Err(HookError::Relay(format!("HTTP {status}: {body}")));
        }

        info!("Notification delivered");
        Ok(true)
    }
}
