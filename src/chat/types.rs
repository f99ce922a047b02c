use serde::{Serialize, Serializer};

/// One attachment block of an incoming-webhook message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    pub text: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Attachment {
    /// Attachment with only text and color, used for commit lists and dumps
    pub fn plain(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            author_name: None,
            author_icon: None,
            ts: None,
            text: text.into(),
            color: color.into(),
            title: None,
        }
    }
}

/// Message body accepted by a Rocket.Chat incoming webhook
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Sender name shown in the channel
    pub username: Option<String>,
    /// `null` lets the chat server use the integration's own avatar. Left out
    /// of anonymous messages altogether.
    pub icon_url: Option<String>,
    pub text: String,
    pub attachments: Vec<Attachment>,
    pub channel: Option<String>,
}

impl Notification {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::anonymous()
        }
    }

    /// No sender override; the integration's configured name is used
    pub fn anonymous() -> Self {
        Self {
            username: None,
            icon_url: None,
            text: String::new(),
            attachments: Vec::new(),
            channel: None,
        }
    }

    pub fn with_icon(mut self, icon_url: Option<String>) -> Self {
        self.icon_url = icon_url;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

#[derive(Serialize)]
struct WireNotification<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<&'a [Attachment]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
}

impl Serialize for Notification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Inner `None` goes out as `null`
        let icon_url = match (&self.username, &self.icon_url) {
            (None, None) => None,
            (_, icon_url) => Some(icon_url.as_deref()),
        };
        WireNotification {
            username: self.username.as_deref(),
            icon_url,
            text: (!self.text.is_empty()).then_some(self.text.as_str()),
            attachments: (!self.attachments.is_empty()).then_some(self.attachments.as_slice()),
            channel: self.channel.as_deref(),
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReply {
    pub success: bool,
    pub message: String,
}

impl ErrorReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Result of handling one webhook request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Post this message
    Content(Notification),
    /// Reject the request without posting anything
    Error(ErrorReply),
    /// Policy says this event is not worth a message
    Suppressed,
}

impl Outcome {
    pub fn content(&self) -> Option<&Notification> {
        match self {
            Outcome::Content(notification) => Some(notification),
            _ => None,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, Outcome::Suppressed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Content(_) => "content",
            Outcome::Error(_) => "error",
            Outcome::Suppressed => "suppressed",
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Wire<'a> {
    Content(&'a Notification),
    Error(&'a ErrorReply),
}

/// `{"content": …}`, `{"error": …}` or bare `false`
impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Content(notification) => Wire::Content(notification).serialize(serializer),
            Outcome::Error(reply) => Wire::Error(reply).serialize(serializer),
            Outcome::Suppressed => serializer.serialize_bool(false),
        }
    }
}
