use super::FormatContext;
use crate::chat::text::{first_present, link, mention};
use crate::chat::{MentionSet, Notification};
use crate::error::Result;
use crate::gitlab::MergeRequestEvent;
use serde::Deserialize;
use serde_json::Value;

pub fn format_merge_request(ctx: &FormatContext<'_>, body: &Value) -> Result<Option<Notification>> {
    let event = MergeRequestEvent::deserialize(body)?;
    let mr = &event.object_attributes;
    let action = mr.action.as_deref();

    if !ctx.policy.allows_merge_request_action(action) {
        tracing::debug!(action = ?action, "Merge request action suppressed");
        return Ok(None);
    }

    let user = &event.user;
    let assignee = event.assignee();
    let mut mentions = MentionSet::new();

    match action {
        Some("open") | Some("update") => {
            if let Some(assignee) = assignee {
                mentions.insert(mention(assignee, ctx.policy));
            }
        }
        Some("merge") => {
            if let Some(assignee) = assignee.filter(|a| !a.same_as(user)) {
                mentions.insert(mention(assignee, ctx.policy));
            }
            if let Some(author) = event.last_commit_author().filter(|a| !a.same_as(user)) {
                mentions.insert(mention(author, ctx.policy));
            }
        }
        _ => {}
    }

    let avatar = first_present([
        mr.target.avatar_url.as_deref(),
        mr.source.avatar_url.as_deref(),
        user.avatar_url.as_deref(),
    ]);
    let text = format!(
        "マージリクエスト {}（{} → {}）が{}されました。",
        link(format!("!{}：{}", mr.iid, mr.title), &mr.url),
        mr.source_branch,
        mr.target_branch,
        ctx.verb(action.unwrap_or_default())
    );

    Ok(Some(
        Notification::new(format!("gitlab/{}", mr.target.name))
            .with_icon(ctx.policy.icon(avatar))
            .with_text(mentions.to_text())
            .with_attachment(ctx.attachment(user, text, mr.updated_at.as_deref(), None)),
    ))
}
