use anyhow::Context;
use clap::Parser;
use gitlab_notify::chat::Relay;
use gitlab_notify::config::load_settings;
use gitlab_notify::gitlab::{DELIVERY_HEADER, EVENT_HEADER};
use gitlab_notify::logging::log_error;
use gitlab_notify::{Dispatcher, Envelope};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

/// Format one GitLab webhook event as a chat notification
#[derive(Debug, Parser)]
#[command(name = "gitlab-notify", version, about)]
struct Args {
    /// Value of the X-Gitlab-Event header, e.g. "Push Hook"
    #[arg(short, long, env = "GITLAB_EVENT")]
    event: String,

    /// JSON body file; read from stdin when omitted
    #[arg(short, long)]
    body: Option<PathBuf>,

    /// Post to this channel instead of the webhook's default
    #[arg(short, long)]
    channel: Option<String>,

    /// Value of the X-Gitlab-Event-UUID header
    #[arg(long)]
    delivery_id: Option<String>,

    /// Post the notification to CHAT_WEBHOOK_URL as well as printing it
    #[arg(long)]
    deliver: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let settings = load_settings().context("loading settings")?;
    tracing::debug!(
        relay_enabled = settings.relay.webhook_url.is_some(),
        "Configuration loaded"
    );

    let raw = read_body(args.body.as_deref()).await?;
    let body: serde_json::Value =
        serde_json::from_str(&raw).context("request body is not valid JSON")?;

    let delivery_id = args
        .delivery_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let headers = [(EVENT_HEADER, args.event), (DELIVERY_HEADER, delivery_id)];
    let envelope = Envelope::from_parts(headers, body, args.channel, chrono::Utc::now());

    let dispatcher = Dispatcher::new(settings.policy.clone());
    let outcome = dispatcher.dispatch(&envelope);
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if args.deliver {
        let Some(relay) = Relay::from_config(&settings.relay)? else {
            anyhow::bail!("--deliver needs CHAT_WEBHOOK_URL to be set");
        };
        if let Err(e) = relay.deliver(&outcome).await {
            log_error("deliver", &e);
            return Err(e).context("delivering notification");
        }
    }

    Ok(())
}

// Logs go to stderr; stdout carries the outcome JSON
fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gitlab_notify=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn read_body(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("reading stdin")?;
            Ok(raw)
        }
    }
}
