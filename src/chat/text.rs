//! Text and link helpers shared by the event formatters

use crate::config::Policy;
use crate::error::Result;
use crate::gitlab::Person;
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::sync::LazyLock;

static REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^refs/(?:tags|heads)/(.+)$").expect("ref pattern is valid"));

/// `refs/heads/main` -> `main`, `refs/tags/v1` -> `v1`; anything else as-is
pub fn ref_name(git_ref: &str) -> &str {
    REF_RE
        .captures(git_ref)
        .and_then(|caps| caps.get(1))
        .map_or(git_ref, |m| m.as_str())
}

/// Drop combining diacritical marks (U+0300..=U+036F)
pub fn display_name(name: &str) -> String {
    name.chars()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// `@name` token for a person, or `None` when there is nobody to mention.
///
/// With `convert_user_name` the GitLab username is looked up in the chat
/// account table and people without an entry are not mentioned.
pub fn mention(person: &Person, policy: &Policy) -> Option<String> {
    if policy.convert_user_name {
        return person
            .username
            .as_deref()
            .and_then(|u| policy.chat_account(u))
            .map(|account| format!("@{account}"));
    }
    if person.name.is_empty() {
        return None;
    }
    Some(format!("@{}", display_name(&person.name)))
}

/// Mention tokens in first-seen order, each at most once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentionSet {
    tokens: Vec<String>,
}

impl MentionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the token was new
    pub fn insert(&mut self, token: Option<String>) -> bool {
        match token {
            Some(token) if !self.tokens.contains(&token) => {
                self.tokens.push(token);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// First eight characters of a commit id
pub fn short_sha(id: &str) -> String {
    id.chars().take(8).collect()
}

/// `[label](url)`
pub fn link(label: impl std::fmt::Display, url: &str) -> String {
    format!("[{label}]({url})")
}

/// First candidate that is present and non-empty
pub fn first_present<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Commit timestamp as `Mon, 12 Dec 2011 12:27:31 GMT`; unparsable input is
/// returned unchanged.
pub fn http_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| {
            t.with_timezone(&Utc)
                .format("%a, %d %b %Y %H:%M:%S GMT")
                .to_string()
        })
        .unwrap_or_else(|_| timestamp.to_string())
}

/// `2024-01-31T09:15:00.000Z`
pub fn iso_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body dump with four-space indentation, keys in body order
pub fn pretty_json(body: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    body.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// First line of a message without trailing whitespace
pub fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default().trim_end()
}

/// First line, with `...` when more non-blank lines follow
pub fn summary_line(message: &str) -> String {
    let mut lines = message.lines();
    let first = lines.next().unwrap_or_default().trim_end();
    if lines.any(|l| !l.trim().is_empty()) {
        format!("{first}...")
    } else {
        first.to_string()
    }
}

/// Leading `size` characters followed by `...`
pub fn truncated_title(text: &str, size: usize) -> String {
    let head: String = text.chars().take(size).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ref_name() {
        assert_eq!(ref_name("refs/heads/main"), "main");
        assert_eq!(ref_name("refs/heads/feature/login"), "feature/login");
        assert_eq!(ref_name("refs/tags/v1.0.0"), "v1.0.0");
        let merge_ref = "refs/merge-requests/1/head";
        assert_eq!(ref_name(merge_ref), merge_ref);
        assert_eq!(ref_name("main"), "main");
    }

    #[test]
    fn test_display_name_strips_combining_marks() {
        assert_eq!(display_name("Jose\u{0301} Mu\u{0308}ller"), "Jose Muller");
        // precomposed characters are left alone
        assert_eq!(display_name("José"), "José");
    }

    #[test]
    fn test_mention_by_display_name() {
        let policy = Policy::default();
        let person = Person {
            name: "Rene\u{0301}".into(),
            username: Some("rene".into()),
            avatar_url: None,
        };
        assert_eq!(mention(&person, &policy).as_deref(), Some("@Rene"));
        assert_eq!(mention(&Person::default(), &policy), None);
    }

    #[test]
    fn test_mention_with_account_remapping() {
        let policy = Policy {
            convert_user_name: true,
            ..Policy::default()
        };
        let mapped = Person {
            name: "User One".into(),
            username: Some("gitlab_user1".into()),
            avatar_url: None,
        };
        let unmapped = Person {
            name: "Someone".into(),
            username: Some("someone".into()),
            avatar_url: None,
        };
        assert_eq!(mention(&mapped, &policy).as_deref(), Some("@chat_user1"));
        assert_eq!(mention(&unmapped, &policy), None);
    }

    #[test]
    fn test_mention_set_keeps_first_seen_order() {
        let mut set = MentionSet::new();
        assert!(set.insert(Some("@b".into())));
        assert!(set.insert(Some("@a".into())));
        assert!(!set.insert(Some("@b".into())));
        assert!(!set.insert(None));
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_text(), "@b @a");
    }

    #[test]
    fn test_first_present_skips_empty() {
        assert_eq!(
            first_present([None, Some(""), Some("b"), Some("c")]).as_deref(),
            Some("b")
        );
        assert_eq!(first_present([None, Some("")]), None);
    }

    #[test]
    fn test_http_date() {
        assert_eq!(
            http_date("2011-12-12T14:27:31+02:00"),
            "Mon, 12 Dec 2011 12:27:31 GMT"
        );
        assert_eq!(http_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_pretty_json_uses_four_spaces_and_keeps_order() {
        let body = json!({ "z": 1, "a": { "b": true } });
        assert_eq!(
            pretty_json(&body).unwrap(),
            "{\n    \"z\": 1,\n    \"a\": {\n        \"b\": true\n    }\n}"
        );
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line("fix readme\n"), "fix readme");
        assert_eq!(summary_line("fix readme\n\nlong body"), "fix readme...");
        assert_eq!(first_line("subject  \nbody"), "subject");
    }

    #[test]
    fn test_short_sha_and_title() {
        assert_eq!(short_sha("da1560886d4f094c3e6c"), "da156088");
        assert_eq!(short_sha("abc"), "abc");
        assert_eq!(truncated_title("hello world", 5), "hello...");
    }
}
