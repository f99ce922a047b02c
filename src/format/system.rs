use super::FormatContext;
use crate::chat::Notification;
use crate::chat::text::pretty_json;
use crate::error::Result;
use crate::gitlab::SystemEvent;
use serde::Deserialize;
use serde_json::Value;

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn describe(event: &SystemEvent, action: &str) -> String {
    let member = |access: &Option<String>| {
        let user = field(&event.user_username);
        let access = field(access);
        format!("ユーザ `{user}`（権限：{access}）")
    };

    match event.event_name.as_str() {
        "project_create" | "project_destroy" | "project_update" => {
            let path = field(&event.path_with_namespace);
            format!("プロジェクト `{path}` が{action}されました。")
        }
        "project_rename" | "project_transfer" => {
            let old = field(&event.old_path_with_namespace);
            let new = field(&event.path_with_namespace);
            format!("プロジェクト `{old}` が `{new}` に{action}しました。")
        }
        "user_add_to_team" => {
            let member = member(&event.project_access);
            let project = field(&event.project_path_with_namespace);
            format!("{member}が、プロジェクト `{project}` に{action}されました。")
        }
        "user_remove_from_team" => {
            let member = member(&event.project_access);
            let project = field(&event.project_path_with_namespace);
            format!("{member}が、プロジェクト `{project}` から{action}されました。")
        }
        "user_add_to_group" => {
            let member = member(&event.group_access);
            let group = field(&event.group_path);
            format!("{member} が、グループ `{group}` に{action}されました。")
        }
        "user_remove_from_group" => {
            let member = member(&event.group_access);
            let group = field(&event.group_path);
            format!("{member} が、グループ `{group}` から{action}されました。")
        }
        "user_create" | "user_destroy" => {
            let name = field(&event.username);
            format!("ユーザ `{name}` が{action}されました。")
        }
        "user_rename" => {
            let old = field(&event.old_username);
            let new = field(&event.username);
            format!("ユーザ `{old}` が `{new}` に{action}されました。")
        }
        "key_create" | "key_destroy" => {
            let name = field(&event.username);
            format!("`{name}` がキーを{action}しました。")
        }
        "group_create" | "group_destroy" => {
            let path = field(&event.path);
            format!("グループ `{path}` が{action}されました。")
        }
        "group_rename" => {
            let old = field(&event.old_full_path);
            let new = field(&event.full_path);
            format!("グループ `{old}` が `{new}` に{action}されました。")
        }
        _ => "判別できないシステムイベントがありました。".to_string(),
    }
}

/// System hooks are posted without a sender override; the raw body follows
/// the summary for operators.
pub fn format_system(ctx: &FormatContext<'_>, body: &Value) -> Result<Option<Notification>> {
    let event = SystemEvent::deserialize(body)?;
    let action = event
        .action_keyword()
        .and_then(|keyword| ctx.policy.verb(keyword))
        .unwrap_or_default();

    tracing::debug!(event_name = %event.event_name, "Formatting system event");

    Ok(Some(
        Notification::anonymous()
            .with_text(describe(&event, action))
            .with_attachment(ctx.plain(pretty_json(body)?)),
    ))
}
