use super::FormatContext;
use crate::chat::Notification;
use crate::chat::text::{first_line, first_present, http_date, link, ref_name, short_sha};
use crate::error::Result;
use crate::gitlab::PushEvent;
use serde::Deserialize;
use serde_json::Value;

pub fn format_push(ctx: &FormatContext<'_>, body: &Value) -> Result<Option<Notification>> {
    let event = PushEvent::deserialize(body)?;
    let project = event.project()?;
    let web_url = project.web_url();
    let branch = ref_name(&event.git_ref);
    let actor = event.actor();
    let avatar = first_present([project.avatar_url.as_deref(), event.user_avatar.as_deref()]);

    let icon = ctx.policy.icon(avatar);
    let notification = Notification::new(format!("gitlab/{}", project.name)).with_icon(icon);
    let project_link = link(&project.name, web_url);

    // A deletion is recognised whatever `before` holds
    if event.checkout_sha.is_none() && event.commits.is_empty() {
        tracing::debug!(branch = %branch, "Branch deleted");
        let text = format!("{project_link}からブランチ {branch} が削除されました。");
        return Ok(Some(notification.with_attachment(ctx.attachment(&actor, text, None, None))));
    }

    let branch_link = link(branch, &format!("{web_url}/commits/{branch}"));

    if event.is_new_ref() {
        tracing::debug!(branch = %branch, "Branch created");
        let default_branch = project.default_branch.as_deref().unwrap_or("master");
        let text = format!(
            "{project_link}に新しいブランチ {branch_link} が作成されました。\n\n\
             このコミットは、{default_branch}から{}コミット進んでいます。",
            event.total_commits_count
        );
        return Ok(Some(notification.with_attachment(ctx.attachment(&actor, text, None, None))));
    }

    let summary = format!(
        "{project_link}のブランチ {branch_link} に{}コミットpushされました。",
        event.total_commits_count
    );
    let commits = event
        .commits
        .iter()
        .map(|commit| {
            format!(
                "  - {} {} by {}: {}",
                http_date(commit.timestamp.as_deref().unwrap_or_default()),
                link(short_sha(&commit.id), &commit.url),
                commit.author.name,
                first_line(&commit.message)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Some(
        notification
            .with_attachment(ctx.attachment(&actor, summary, None, None))
            .with_attachment(ctx.plain(commits)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Policy;
    use crate::format::testing::context;
    use crate::gitlab::fixtures;
    use serde_json::json;

    fn format(body: &Value) -> Notification {
        let policy = Policy::default();
        format_push(&context(&policy, "Push Hook"), body)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_normal_push_lists_commits() {
        let notification = format(&fixtures::push_body());

        assert_eq!(notification.username.as_deref(), Some("gitlab/Diaspora"));
        assert_eq!(notification.icon_url, None);
        assert_eq!(notification.attachments.len(), 2);

        let summary = &notification.attachments[0].text;
        assert_eq!(
            summary,
            "[Diaspora](http://example.com/mike/diaspora)のブランチ \
             [main](http://example.com/mike/diaspora/commits/main) に2コミットpushされました。"
        );
        assert!(!summary.contains("refs/heads"));
        assert_eq!(
            notification.attachments[0].author_name.as_deref(),
            Some("John Smith")
        );

        let lines: Vec<&str> = notification.attachments[1].text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "  - Mon, 12 Dec 2011 12:27:31 GMT \
             [b6568db1](http://example.com/mike/diaspora/commit/b6568db1bc1dcd7f8b4d5a946b0b91f9dacd7327) \
             by Jordi Mallach: Update Catalan translation to e38cb41."
        );
        assert!(lines[1].contains("[da156088]"));
        assert!(lines[1].ends_with("by GitLab dev user: fixed readme"));
        assert_eq!(notification.attachments[1].author_name, None);
    }

    #[test]
    fn test_branch_deletion_ignores_before() {
        for before in ["0000000000000000000000000000000000000000", "95790bf8"] {
            let mut body = fixtures::push_body();
            body["before"] = json!(before);
            body["checkout_sha"] = Value::Null;
            body["commits"] = json!([]);
            body["total_commits_count"] = json!(0);

            let notification = format(&body);
            assert_eq!(notification.attachments.len(), 1);
            assert_eq!(
                notification.attachments[0].text,
                "[Diaspora](http://example.com/mike/diaspora)からブランチ main が削除されました。"
            );
        }
    }

    #[test]
    fn test_branch_creation_reports_commits_ahead() {
        let mut body = fixtures::push_body();
        body["before"] = json!("0000000000000000000000000000000000000000");
        body["ref"] = json!("refs/heads/feature/login");
        body["total_commits_count"] = json!(5);

        let notification = format(&body);
        assert_eq!(notification.attachments.len(), 1);
        let text = &notification.attachments[0].text;
        assert!(text.contains(
            "新しいブランチ [feature/login](http://example.com/mike/diaspora/commits/feature/login) が作成されました。"
        ));
        assert!(text.ends_with("このコミットは、mainから5コミット進んでいます。"));
    }

    #[test]
    fn test_avatar_chain_when_chat_avatar_disabled() {
        let policy = Policy {
            use_chat_avatar: false,
            ..Policy::default()
        };
        let body = fixtures::push_body();
        let notification = format_push(&context(&policy, "Push Hook"), &body)
            .unwrap()
            .unwrap();
        assert_eq!(
            notification.icon_url.as_deref(),
            body["user_avatar"].as_str()
        );
    }

    #[test]
    fn test_missing_ref_is_an_error() {
        let policy = Policy::default();
        let result = format_push(&context(&policy, "Push Hook"), &json!({ "commits": [] }));
        assert!(result.is_err());
    }
}
