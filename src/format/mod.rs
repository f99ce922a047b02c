//! Per-event formatters
//!
//! Each formatter turns one webhook body into a [`Notification`], or into
//! `None` when the policy says the event should not be posted. Formatters
//! never recover from their own errors; the dispatcher does that.

mod build;
mod comment;
mod issue;
mod merge_request;
mod pipeline;
mod push;
mod system;
mod tag;
mod unknown;
mod wiki;

pub use unknown::format_unknown;

use crate::chat::text::{display_name, iso_timestamp, truncated_title};
use crate::chat::{Attachment, Notification};
use crate::config::Policy;
use crate::error::Result;
use crate::gitlab::{EventKind, Person};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Everything a formatter may consult besides the body
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    pub policy: &'a Policy,
    /// `None` for event names outside [`EventKind`]
    pub kind: Option<EventKind>,
    /// Raw event header value
    pub event: &'a str,
    pub received_at: DateTime<Utc>,
}

/// `Ok(None)` means suppressed
pub type Formatter = fn(&FormatContext<'_>, &Value) -> Result<Option<Notification>>;

impl EventKind {
    pub fn formatter(self) -> Formatter {
        match self {
            EventKind::Push => push::format_push,
            EventKind::TagPush => tag::format_tag_push,
            EventKind::MergeRequest => merge_request::format_merge_request,
            EventKind::Note | EventKind::ConfidentialNote => comment::format_comment,
            EventKind::Issue | EventKind::ConfidentialIssue => issue::format_issue,
            EventKind::Pipeline => pipeline::format_pipeline,
            EventKind::Build => build::format_build,
            EventKind::WikiPage => wiki::format_wiki_page,
            EventKind::System => system::format_system,
        }
    }
}

impl FormatContext<'_> {
    pub fn is_confidential(&self) -> bool {
        self.kind.is_some_and(|k| k.is_confidential())
    }

    /// Localized verb, or the raw action when none is configured
    pub fn verb<'s>(&'s self, action: &'s str) -> &'s str {
        self.policy.verb(action).unwrap_or(action)
    }

    /// Attachment attributed to `author`, stamped with `ts` or the receive time
    pub fn attachment(
        &self,
        author: &Person,
        text: impl Into<String>,
        ts: Option<&str>,
        color: Option<&str>,
    ) -> Attachment {
        let text = text.into();
        let title = (self.policy.attachment_title_size > 0)
            .then(|| truncated_title(&text, self.policy.attachment_title_size));
        let ts = ts
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| iso_timestamp(&self.received_at));

        Attachment {
            author_name: Some(display_name(&author.name)),
            author_icon: author.avatar_url.clone(),
            ts: Some(ts),
            text,
            color: color.unwrap_or(&self.policy.notif_color).to_string(),
            title,
        }
    }

    /// Text-only attachment in the default color
    pub fn plain(&self, text: impl Into<String>) -> Attachment {
        Attachment::plain(text, self.policy.notif_color.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::context;
    use super::*;

    #[test]
    fn test_attachment_defaults() {
        let policy = Policy::default();
        let ctx = context(&policy, "Push Hook");
        let author = Person {
            name: "Zoe\u{0308}".into(),
            username: None,
            avatar_url: Some("https://a/z.png".into()),
        };

        let attachment = ctx.attachment(&author, "hello", None, None);
        assert_eq!(attachment.author_name.as_deref(), Some("Zoe"));
        assert_eq!(attachment.author_icon.as_deref(), Some("https://a/z.png"));
        assert_eq!(attachment.ts.as_deref(), Some("2024-05-01T09:30:00.000Z"));
        assert_eq!(attachment.color, "#6498CC");
        assert_eq!(attachment.title, None);
    }

    #[test]
    fn test_attachment_title_when_enabled() {
        let policy = Policy {
            attachment_title_size: 4,
            ..Policy::default()
        };
        let ctx = context(&policy, "Push Hook");
        let attachment = ctx.attachment(&Person::new("a"), "abcdefgh", Some("t"), Some("#000"));
        assert_eq!(attachment.title.as_deref(), Some("abcd..."));
        assert_eq!(attachment.ts.as_deref(), Some("t"));
        assert_eq!(attachment.color, "#000");
    }

    #[test]
    fn test_verb_passthrough() {
        let policy = Policy::default();
        let ctx = context(&policy, "Merge Request Hook");
        assert_eq!(ctx.verb("merge"), "マージ");
        assert_eq!(ctx.verb("approved"), "approved");
    }
}
