use super::FormatContext;
use crate::chat::Notification;
use crate::chat::text::{first_present, link, short_sha};
use crate::error::Result;
use crate::gitlab::PipelineEvent;
use serde::Deserialize;
use serde_json::Value;

pub fn format_pipeline(ctx: &FormatContext<'_>, body: &Value) -> Result<Option<Notification>> {
    let event = PipelineEvent::deserialize(body)?;
    let pipeline = &event.object_attributes;

    if !ctx.policy.allows_pipeline_status(&pipeline.status) {
        tracing::debug!(status = %pipeline.status, "Pipeline status suppressed");
        return Ok(None);
    }

    let project = event.project()?;
    let actor = event.actor();
    let commit = &event.commit;
    let avatar = first_present([project.avatar_url.as_deref(), actor.avatar_url.as_deref()]);
    let time = pipeline
        .finished_at
        .as_deref()
        .or(pipeline.created_at.as_deref());

    let status = &pipeline.status;
    let sha = link(short_sha(&commit.id), &commit.url);
    let author = &commit.author.name;
    let text = format!("パイプライン *{status}*\n対象コミット: {sha}（by {author}）");
    let color = ctx.policy.status_color(status);

    Ok(Some(
        Notification::new(format!("gitlab/{}", project.name))
            .with_icon(ctx.policy.icon(avatar))
            .with_attachment(ctx.attachment(&actor, text, time, Some(color))),
    ))
}
