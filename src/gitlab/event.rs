use chrono::{DateTime, Utc};
use serde_json::Value;

/// Header carrying the event name
pub const EVENT_HEADER: &str = "x-gitlab-event";
/// Header carrying GitLab's per-delivery id
pub const DELIVERY_HEADER: &str = "x-gitlab-event-uuid";

/// Every event name this crate knows how to format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Push,
    TagPush,
    MergeRequest,
    Note,
    ConfidentialNote,
    Issue,
    ConfidentialIssue,
    Pipeline,
    Build,
    WikiPage,
    System,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::Push,
        EventKind::TagPush,
        EventKind::MergeRequest,
        EventKind::Note,
        EventKind::ConfidentialNote,
        EventKind::Issue,
        EventKind::ConfidentialIssue,
        EventKind::Pipeline,
        EventKind::Build,
        EventKind::WikiPage,
        EventKind::System,
    ];

    /// Exact, case-sensitive match on the header value
    pub fn from_header(name: &str) -> Option<Self> {
        let kind = match name {
            "Push Hook" => EventKind::Push,
            "Tag Push Hook" => EventKind::TagPush,
            "Merge Request Hook" => EventKind::MergeRequest,
            "Note Hook" => EventKind::Note,
            "Confidential Note Hook" => EventKind::ConfidentialNote,
            "Issue Hook" => EventKind::Issue,
            "Confidential Issue Hook" => EventKind::ConfidentialIssue,
            // "Pipeline Event" is what older GitLab releases sent
            "Pipeline Hook" | "Pipeline Event" => EventKind::Pipeline,
            // GitLab < 9.3 calls jobs builds
            "Build Hook" | "Job Hook" => EventKind::Build,
            "Wiki Page Hook" => EventKind::WikiPage,
            "System Hook" => EventKind::System,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::TagPush => "tag_push",
            EventKind::MergeRequest => "merge_request",
            EventKind::Note => "note",
            EventKind::ConfidentialNote => "confidential_note",
            EventKind::Issue => "issue",
            EventKind::ConfidentialIssue => "confidential_issue",
            EventKind::Pipeline => "pipeline",
            EventKind::Build => "build",
            EventKind::WikiPage => "wiki_page",
            EventKind::System => "system",
        }
    }

    pub fn is_confidential(&self) -> bool {
        matches!(
            self,
            EventKind::ConfidentialIssue | EventKind::ConfidentialNote
        )
    }
}

/// One inbound webhook request, as handed over by whatever hosts the hook
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Raw value of the event header, empty when the header was missing
    pub event: String,
    pub delivery_id: Option<String>,
    pub body: Value,
    /// Channel override from the `channel` query parameter
    pub channel: Option<String>,
    /// Used as the attachment timestamp when the event carries none
    pub received_at: DateTime<Utc>,
}

impl Envelope {
    pub fn new(event: impl Into<String>, body: Value, received_at: DateTime<Utc>) -> Self {
        Self {
            event: event.into(),
            delivery_id: None,
            body,
            channel: None,
            received_at,
        }
    }

    /// Build an envelope from request headers (any casing), the parsed body,
    /// and the `channel` query parameter.
    pub fn from_parts<I, K, V>(
        headers: I,
        body: Value,
        channel: Option<String>,
        received_at: DateTime<Utc>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut event = String::new();
        let mut delivery_id = None;
        for (name, value) in headers {
            let name = name.as_ref();
            if name.eq_ignore_ascii_case(EVENT_HEADER) {
                event = value.into();
            } else if name.eq_ignore_ascii_case(DELIVERY_HEADER) {
                delivery_id = Some(value.into());
            }
        }

        Self {
            event,
            delivery_id,
            body,
            channel: channel.filter(|c| !c.is_empty()),
            received_at,
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_header(&self.event)
    }
}
