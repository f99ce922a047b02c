use super::FormatContext;
use crate::chat::Notification;
use crate::chat::text::link;
use crate::error::Result;
use crate::gitlab::BuildEvent;
use serde::Deserialize;
use serde_json::Value;

/// Build Hook (GitLab < 9.3) and Job Hook; always posted
pub fn format_build(ctx: &FormatContext<'_>, body: &Value) -> Result<Option<Notification>> {
    let event = BuildEvent::deserialize(body)?;
    let homepage = event.repository.homepage.as_deref().unwrap_or_default();

    let name = &event.build_name;
    let project = link(&event.project_name, homepage);
    let status = &event.build_status;
    let text = format!("ビルド {name}（{project}） *{status}*");
    let color = ctx.policy.status_color(status);

    Ok(Some(
        Notification::new(format!("gitlab/{}", event.repository.name))
            .with_icon(ctx.policy.icon(None))
            .with_attachment(ctx.attachment(&event.actor(), text, None, Some(color))),
    ))
}
