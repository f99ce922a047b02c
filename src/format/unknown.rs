use super::FormatContext;
use crate::chat::Notification;
use crate::chat::text::{first_present, pretty_json};
use crate::error::Result;
use serde_json::Value;

/// Best-effort message for an event name we have no formatter for. The
/// whole body is attached so someone can write one.
pub fn format_unknown(ctx: &FormatContext<'_>, body: &Value) -> Result<Option<Notification>> {
    let user = body.get("user").filter(|u| u.is_object());
    let user_field = |key: &str| user.and_then(|u| u.get(key)).and_then(Value::as_str);
    let body_field = |key: &str| body.get(key).and_then(Value::as_str);

    // A `user` object without a name still falls through to the flat fields
    let sender = first_present([user_field("name"), body_field("user_name")])
        .unwrap_or_else(|| "Unknown user".to_string());
    let avatar = first_present([user_field("avatar_url"), body_field("user_avatar")]);

    tracing::warn!(event = %ctx.event, "Unrecognized webhook event");

    let name = ctx.event;
    let text = format!("判別できないイベント '{name}' のWebhookリクエストがありました。詳細は以下");
    let icon = ctx.policy.icon(avatar);
    let raw = ctx.plain(pretty_json(body)?);

    Ok(Some(
        Notification::new(sender)
            .with_icon(icon)
            .with_text(text)
            .with_attachment(raw),
    ))
}
