//! Routes a webhook envelope to its formatter and turns the result into an
//! [`Outcome`].

use crate::chat::{Attachment, ErrorReply, Notification, Outcome};
use crate::config::Policy;
use crate::error::HookError;
use crate::format::{FormatContext, Formatter, format_unknown};
use crate::gitlab::Envelope;
use crate::logging::{Timer, error_chain, log_error};

/// Sender name of the message posted when formatting fails
pub const ERROR_HANDLER_NAME: &str = "Rocket.Cat ErrorHandler";

pub struct Dispatcher {
    policy: Policy,
}

impl Dispatcher {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn dispatch(&self, envelope: &Envelope) -> Outcome {
        let _timer = Timer::new("dispatch");
        let kind = envelope.kind();

        let span = tracing::info_span!(
            "dispatch",
            event = %envelope.event,
            kind = kind.map_or("unknown", |k| k.as_str()),
            delivery_id = envelope.delivery_id.as_deref().unwrap_or("-"),
        );
        let _guard = span.enter();

        if kind.is_none() && self.policy.ignore_unknown_events {
            tracing::info!("Unknown event ignored");
            let message = format!("unknown event {}", envelope.event);
            return Outcome::Error(ErrorReply::new(message));
        }

        let ctx = FormatContext {
            policy: &self.policy,
            kind,
            event: &envelope.event,
            received_at: envelope.received_at,
        };
        let formatter: Formatter = match kind {
            Some(kind) => kind.formatter(),
            None => format_unknown,
        };

        let outcome = match formatter(&ctx, &envelope.body) {
            Ok(Some(notification)) => Outcome::Content(notification),
            Ok(None) => Outcome::Suppressed,
            Err(e) => {
                log_error("format_event", &e);
                self.error_outcome(&e)
            }
        };

        let outcome = match (outcome, &envelope.channel) {
            (Outcome::Content(mut notification), Some(channel)) => {
                notification.channel = Some(format!("#{channel}"));
                Outcome::Content(notification)
            }
            (outcome, _) => outcome,
        };

        tracing::info!(outcome = outcome.label(), "Event dispatched");
        outcome
    }

    fn error_outcome(&self, error: &HookError) -> Outcome {
        if self.policy.ignore_error_messages {
            return Outcome::Error(ErrorReply::new(format!("gitlabevent error: {error}")));
        }

        let chain = error_chain(error);
        let message = chain.last().map(String::as_str).unwrap_or_default();
        let detail = format!(
            "Error: '{error}', \n Message: '{message}', \n Stack: '{}'",
            chain.join(" <- ")
        );

        let notification = Notification::new(ERROR_HANDLER_NAME)
            .with_icon(self.policy.icon(None))
            .with_text("Webhookリクエストを整形中にエラーが起きました。詳細は以下")
            .with_attachment(Attachment::plain(detail, self.policy.notif_color.clone()));
        Outcome::Content(notification)
    }
}
