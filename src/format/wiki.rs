use super::FormatContext;
use crate::chat::Notification;
use crate::chat::text::{first_present, link};
use crate::error::{HookError, Result};
use crate::gitlab::WikiPageEvent;
use serde::Deserialize;
use serde_json::Value;

pub fn format_wiki_page(ctx: &FormatContext<'_>, body: &Value) -> Result<Option<Notification>> {
    let event = WikiPageEvent::deserialize(body)?;
    let page = &event.object_attributes;
    let project_path = event
        .project
        .path_with_namespace
        .as_deref()
        .ok_or(HookError::MissingField("project.path_with_namespace"))?;
    let action = page.action.as_deref().unwrap_or_default();

    // Deleted pages have nothing to link to
    let title = if action == "delete" {
        page.title.clone()
    } else {
        link(&page.title, &page.url)
    };
    let verb = ctx.policy.verb(action).unwrap_or("modified");
    let avatar = first_present([
        event.project.avatar_url.as_deref(),
        event.user.avatar_url.as_deref(),
    ]);

    let author = &event.user.name;
    let text = format!("Wikiページ {title} が{verb}されました。（by {author}）");
    let icon = ctx.policy.icon(avatar);

    Ok(Some(
        Notification::new(project_path)
            .with_icon(icon)
            .with_text(text),
    ))
}
