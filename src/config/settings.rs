use crate::config::Policy;
use crate::error::{HookError, Result};

#[derive(Debug, Clone)]
pub struct Settings {
    pub policy: Policy,
    pub relay: RelayConfig,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Incoming-webhook URL of the chat server; relaying is off when unset
    pub webhook_url: Option<String>,
    pub timeout_secs: u64,
}

pub fn load_settings() -> Result<Settings> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let relay = RelayConfig {
        webhook_url: std::env::var("CHAT_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty()),
        timeout_secs: std::env::var("RELAY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| HookError::Config("Invalid RELAY_TIMEOUT_SECS".to_string()))?,
    };

    if let Some(url) = &relay.webhook_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(HookError::Config(format!(
                "CHAT_WEBHOOK_URL must be an http(s) URL, got {url}"
            )));
        }
    }

    Ok(Settings {
        policy: Policy::default(),
        relay,
    })
}
