use super::FormatContext;
use crate::chat::Notification;
use crate::chat::text::{first_present, link, ref_name, short_sha};
use crate::error::Result;
use crate::gitlab::PushEvent;
use serde::Deserialize;
use serde_json::Value;

pub fn format_tag_push(ctx: &FormatContext<'_>, body: &Value) -> Result<Option<Notification>> {
    let event = PushEvent::deserialize(body)?;
    let project = event.project()?;
    let web_url = project.web_url();
    let tag = ref_name(&event.git_ref);
    let avatar = first_present([project.avatar_url.as_deref(), event.user_avatar.as_deref()]);

    let message = match &event.checkout_sha {
        None => {
            let tags = link(tag, &format!("{web_url}/tags/"));
            format!("タグ {tags} が削除されました。")
        }
        Some(sha) => {
            let label = format!("{tag} {}", short_sha(sha));
            let tag_link = link(label, &format!("{web_url}/tags/{tag}"));
            format!("タグ {tag_link} が付与されました。")
        }
    };

    let text = if ctx.policy.mention_all_allowed {
        "@all"
    } else {
        ""
    };

    Ok(Some(
        Notification::new(format!("gitlab/{}", project.name))
            .with_icon(ctx.policy.icon(avatar))
            .with_text(text)
            .with_attachment(ctx.attachment(&event.actor(), message, None, None)),
    ))
}
