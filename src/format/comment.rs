use super::FormatContext;
use crate::chat::text::{first_present, link, mention, short_sha, summary_line};
use crate::chat::{MentionSet, Notification};
use crate::error::{HookError, Result};
use crate::gitlab::{CommentTarget, NoteEvent};
use serde::Deserialize;
use serde_json::Value;

/// Note Hook and Confidential Note Hook
pub fn format_comment(ctx: &FormatContext<'_>, body: &Value) -> Result<Option<Notification>> {
    if ctx.policy.ignore_confidential && ctx.is_confidential() {
        tracing::debug!("Confidential note suppressed");
        return Ok(None);
    }

    let event = NoteEvent::deserialize(body)?;
    let project = event.project()?;
    let comment = &event.object_attributes;
    let user = &event.user;
    let avatar = first_present([project.avatar_url.as_deref(), user.avatar_url.as_deref()]);

    let Some(target) = event.target() else {
        return Err(HookError::Unsupported("note without a known target".into()));
    };

    let mut mentions = MentionSet::new();
    let text = match target {
        CommentTarget::MergeRequest(mr) => {
            let author = mr.last_commit.as_ref().and_then(|c| c.author.as_ref());
            for person in [mr.assignee.as_ref(), author].into_iter().flatten() {
                if !person.same_as(user) {
                    mentions.insert(mention(person, ctx.policy));
                }
            }
            let label = format!("#{} {}", mr.id, mr.title);
            format!(
                "マージリクエスト {} にコメントがありました。",
                link(label, &comment.url)
            )
        }
        CommentTarget::Commit(commit) => {
            if !commit.author.name.is_empty() && !commit.author.same_as(user) {
                mentions.insert(mention(&commit.author, ctx.policy));
            }
            let sha = short_sha(&commit.id);
            let summary = summary_line(&commit.message);
            let label = format!("{sha} {summary}");
            format!(
                "コミット {} にコメントがありました。",
                link(label, &comment.url)
            )
        }
        CommentTarget::Issue(issue) => {
            let label = format!("#{} {}", issue.id, issue.title);
            format!(
                "issue {} にコメントがありました。",
                link(label, &comment.url)
            )
        }
        CommentTarget::Snippet(snippet) => {
            let label = format!("#{} {}", snippet.id, snippet.title);
            format!(
                "コードスニペット {} にコメントがありました。",
                link(label, &comment.url)
            )
        }
    };
    let note = &comment.note;
    let text = format!("{text}\n{note}");

    Ok(Some(
        Notification::new(format!("gitlab/{}", project.name))
            .with_icon(ctx.policy.icon(avatar))
            .with_text(mentions.to_text())
            .with_attachment(ctx.attachment(user, text, comment.updated_at.as_deref(), None)),
    ))
}
