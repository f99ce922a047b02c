use super::FormatContext;
use crate::chat::text::{first_present, link, mention};
use crate::chat::{MentionSet, Notification};
use crate::error::Result;
use crate::gitlab::IssueEvent;
use serde::Deserialize;
use serde_json::Value;

/// Issue Hook and Confidential Issue Hook
pub fn format_issue(ctx: &FormatContext<'_>, body: &Value) -> Result<Option<Notification>> {
    // Decided on the event name alone, before the body is read
    if ctx.policy.ignore_confidential && ctx.is_confidential() {
        tracing::debug!("Confidential issue suppressed");
        return Ok(None);
    }

    let event = IssueEvent::deserialize(body)?;
    let issue = &event.object_attributes;

    if ctx.policy.ignore_confidential && issue.confidential {
        tracing::debug!("Issue marked confidential suppressed");
        return Ok(None);
    }

    let action = issue.action.as_deref();
    if !ctx.policy.allows_issue_action(action) {
        tracing::debug!(action = ?action, "Issue action suppressed");
        return Ok(None);
    }

    let project = event.project()?;
    let user = &event.user;
    let avatar = first_present([project.avatar_url.as_deref(), user.avatar_url.as_deref()]);

    let mut mentions = MentionSet::new();
    if let Some(assignee) = event.assignee().filter(|a| !a.same_as(user)) {
        mentions.insert(mention(assignee, ctx.policy));
    }

    let title = link(&issue.title, &issue.url);
    let verb = ctx.verb(action.unwrap_or_default());
    let description = &issue.description;
    let text = format!("issue {title} が{verb}されました。\n\n{description}");

    Ok(Some(
        Notification::new(format!("gitlab/{}", project.name))
            .with_icon(ctx.policy.icon(avatar))
            .with_text(mentions.to_text())
            .with_attachment(ctx.attachment(user, text, issue.updated_at.as_deref(), None)),
    ))
}
