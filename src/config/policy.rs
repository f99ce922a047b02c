//! Notification policy tables
//!
//! Everything here is read-only once the dispatcher is built. Formatters
//! receive the policy through [`crate::format::FormatContext`].

use std::collections::HashMap;

/// Color used when an action or status has no color of its own
pub const NOTIF_COLOR: &str = "#6498CC";

#[derive(Debug, Clone)]
pub struct Policy {
    /// Prepend `@all` to tag notifications. The bot account also needs the
    /// chat server's mention-all permission for this to reach anyone.
    pub mention_all_allowed: bool,
    pub notif_color: String,
    pub ignore_confidential: bool,
    pub ignore_unknown_events: bool,
    pub ignore_error_messages: bool,
    /// Leave `icon_url` null and let the chat server pick the bot avatar
    pub use_chat_avatar: bool,
    pub default_avatar: Option<String>,
    /// Mention people by their remapped chat account instead of display name
    pub convert_user_name: bool,
    pub status_colors: HashMap<String, String>,
    pub action_verbs: HashMap<String, String>,
    pub issue_actions: HashMap<String, bool>,
    pub merge_request_actions: HashMap<String, bool>,
    pub pipeline_statuses: HashMap<String, bool>,
    /// GitLab username -> chat username
    pub chat_accounts: HashMap<String, String>,
    /// 0 disables attachment titles
    pub attachment_title_size: usize,
}

fn table<V: Clone>(entries: &[(&str, V)]) -> HashMap<String, V> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            mention_all_allowed: false,
            notif_color: NOTIF_COLOR.to_string(),
            ignore_confidential: true,
            ignore_unknown_events: false,
            ignore_error_messages: false,
            use_chat_avatar: true,
            default_avatar: None,
            convert_user_name: false,
            status_colors: table(&[
                ("success", "#2faa60".to_string()),
                ("pending", "#e75e40".to_string()),
                ("failed", "#d22852".to_string()),
                ("canceled", "#5c5c5c".to_string()),
                ("created", "#ffc107".to_string()),
                ("running", "#607d8b".to_string()),
            ]),
            action_verbs: table(&[
                ("create", "作成".to_string()),
                ("destroy", "削除".to_string()),
                ("update", "更新".to_string()),
                ("rename", "リネーム".to_string()),
                ("transfer", "移行".to_string()),
                ("add", "追加".to_string()),
                ("remove", "削除".to_string()),
                ("open", "起票".to_string()),
                ("merge", "マージ".to_string()),
                ("close", "クローズ".to_string()),
                ("reopen", "再開".to_string()),
            ]),
            issue_actions: table(&[
                ("open", true),
                ("update", false),
                ("close", false),
                ("reopen", false),
            ]),
            merge_request_actions: table(&[
                ("open", true),
                ("update", false),
                ("merge", true),
                ("close", false),
            ]),
            pipeline_statuses: table(&[
                ("running", false),
                ("pending", false),
                ("success", true),
                ("failed", true),
                ("canceled", false),
                ("skipped", false),
            ]),
            chat_accounts: table(&[
                ("gitlab_user1", "chat_user1".to_string()),
                ("gitlab_user2", "chat_user2".to_string()),
            ]),
            attachment_title_size: 0,
        }
    }
}

/// Only an explicit `false` suppresses; unlisted keys pass through
fn allowed(table: &HashMap<String, bool>, key: Option<&str>) -> bool {
    key.and_then(|k| table.get(k)).copied().unwrap_or(true)
}

impl Policy {
    /// Localized verb for an action, if one is configured
    pub fn verb(&self, action: &str) -> Option<&str> {
        self.action_verbs.get(action).map(String::as_str)
    }

    pub fn allows_issue_action(&self, action: Option<&str>) -> bool {
        allowed(&self.issue_actions, action)
    }

    pub fn allows_merge_request_action(&self, action: Option<&str>) -> bool {
        allowed(&self.merge_request_actions, action)
    }

    pub fn allows_pipeline_status(&self, status: &str) -> bool {
        allowed(&self.pipeline_statuses, Some(status))
    }

    /// Color for a pipeline/build status, falling back to the default color
    pub fn status_color(&self, status: &str) -> &str {
        self.status_colors
            .get(status)
            .map(String::as_str)
            .unwrap_or(&self.notif_color)
    }

    /// Resolve `icon_url` from an avatar chain that was already narrowed
    /// to its first non-empty candidate.
    pub fn icon(&self, avatar: Option<String>) -> Option<String> {
        if self.use_chat_avatar {
            return None;
        }
        avatar.or_else(|| self.default_avatar.clone())
    }

    pub fn chat_account(&self, gitlab_username: &str) -> Option<&str> {
        self.chat_accounts.get(gitlab_username).map(String::as_str)
    }
}
