//! Trimmed-down webhook bodies modelled on GitLab's documented examples

use serde_json::{Value, json};

fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
        for (key, value) in extra {
            base.insert(key, value);
        }
    }
    base
}

fn project() -> Value {
    json!({
        "name": "Diaspora",
        "web_url": "http://example.com/mike/diaspora",
        "avatar_url": null,
        "path_with_namespace": "mike/diaspora",
        "default_branch": "main",
        "homepage": "http://example.com/mike/diaspora"
    })
}

pub fn push_body() -> Value {
    json!({
        "object_kind": "push",
        "before": "95790bf891e76fee5e1747ab589903a6a1f80f22",
        "after": "da1560886d4f094c3e6c9ef40349f7d38b5d27d7",
        "ref": "refs/heads/main",
        "checkout_sha": "da1560886d4f094c3e6c9ef40349f7d38b5d27d7",
        "user_name": "John Smith",
        "user_username": "jsmith",
        "user_avatar": "https://s.gravatar.com/avatar/d4c74594d841139328695756648b6bd6?s=8://s.gravatar.com/avatar/d4c74594d841139328695756648b6bd6?s=80",
        "project": project(),
        "repository": {
            "name": "Diaspora",
            "url": "git@example.com:mike/diaspora.git",
            "homepage": "http://example.com/mike/diaspora"
        },
        "commits": [
            {
                "id": "b6568db1bc1dcd7f8b4d5a946b0b91f9dacd7327",
                "message": "Update Catalan translation to e38cb41.\n\nSee https://gitlab.com/gitlab-org/gitlab for more information",
                "timestamp": "2011-12-12T14:27:31+02:00",
                "url": "http://example.com/mike/diaspora/commit/b6568db1bc1dcd7f8b4d5a946b0b91f9dacd7327",
                "author": { "name": "Jordi Mallach", "email": "jordi@softcatala.org" }
            },
            {
                "id": "da1560886d4f094c3e6c9ef40349f7d38b5d27d7",
                "message": "fixed readme\n",
                "timestamp": "2012-01-03T23:36:29+02:00",
                "url": "http://example.com/mike/diaspora/commit/da1560886d4f094c3e6c9ef40349f7d38b5d27d7",
                "author": { "name": "GitLab dev user", "email": "gitlabdev@dv6700.(none)" }
            }
        ],
        "total_commits_count": 2
    })
}

pub fn tag_body(checkout_sha: Option<&str>) -> Value {
    json!({
        "object_kind": "tag_push",
        "before": "0000000000000000000000000000000000000000",
        "after": "82b3d5ae55f7080f1e6022629cdb57bfae7cccc7",
        "ref": "refs/tags/v1.0.0",
        "checkout_sha": checkout_sha,
        "user_name": "John Smith",
        "user_avatar": "https://s.gravatar.com/avatar/d4c74594d841139328695756648b6bd6?s=8://s.gravatar.com/avatar/d4c74594d841139328695756648b6bd6?s=80",
        "project": project(),
        "commits": [],
        "total_commits_count": 0
    })
}

pub fn merge_request_body(action: &str) -> Value {
    json!({
        "object_kind": "merge_request",
        "user": {
            "name": "Administrator",
            "username": "root",
            "avatar_url": "http://www.gravatar.com/avatar/e64c7d89f26bd1972efa854d13d7dd61?s=40&d=identicon"
        },
        "project": project(),
        "object_attributes": {
            "id": 99,
            "iid": 1,
            "title": "MS-Viewport",
            "url": "http://example.com/diaspora/merge_requests/1",
            "source_branch": "ms-viewport",
            "target_branch": "master",
            "state": "opened",
            "action": action,
            "updated_at": "2013-12-03T17:23:34Z",
            "source": {
                "name": "Awesome Project",
                "web_url": "http://example.com/awesome_space/awesome_project",
                "avatar_url": null
            },
            "target": {
                "name": "Awesome Project",
                "web_url": "http://example.com/awesome_space/awesome_project",
                "avatar_url": null
            },
            "last_commit": {
                "id": "da1560886d4f094c3e6c9ef40349f7d38b5d27d7",
                "message": "fixed readme",
                "author": { "name": "GitLab dev user", "email": "gitlabdev@dv6700.(none)" }
            }
        },
        "assignees": [
            {
                "name": "User1",
                "username": "user1",
                "avatar_url": "http://www.gravatar.com/avatar/e64c7d89f26bd1972efa854d13d7dd61?s=40&d=identicon"
            }
        ]
    })
}

pub fn issue_body(action: &str) -> Value {
    json!({
        "object_kind": "issue",
        "user": {
            "name": "Administrator",
            "username": "root",
            "avatar_url": "http://www.gravatar.com/avatar/e64c7d89f26bd1972efa854d13d7dd61?s=40&d=identicon"
        },
        "project": project(),
        "object_attributes": {
            "id": 301,
            "iid": 23,
            "title": "New API: create/update/delete file",
            "description": "Create new API for manipulations with repository",
            "url": "http://example.com/diaspora/issues/23",
            "action": action,
            "confidential": false,
            "updated_at": "2013-12-03T17:15:43Z"
        },
        "assignees": [
            {
                "name": "User1",
                "username": "user1",
                "avatar_url": "http://www.gravatar.com/avatar/e64c7d89f26bd1972efa854d13d7dd61?s=40&d=identicon"
            }
        ]
    })
}

/// Note body without a target; `extra` supplies `merge_request`, `commit`,
/// `issue` or `snippet`.
pub fn note_body(extra: Value) -> Value {
    let base = json!({
        "object_kind": "note",
        "user": {
            "name": "Administrator",
            "username": "root",
            "avatar_url": "http://www.gravatar.com/avatar/e64c7d89f26bd1972efa854d13d7dd61?s=40&d=identicon"
        },
        "project": project(),
        "object_attributes": {
            "id": 1243,
            "note": "This is a commit comment. How does this work?",
            "noteable_type": "Commit",
            "url": "http://example.com/gitlab-org/gitlab-test/commit/cfe32cf61b73a0d5e9f13e774abde7ff789b1660#note_1243",
            "updated_at": "2015-05-17 18:08:09 UTC"
        }
    });
    merge(base, extra)
}

pub fn pipeline_body(status: &str) -> Value {
    json!({
        "object_kind": "pipeline",
        "object_attributes": {
            "id": 31,
            "ref": "master",
            "status": status,
            "created_at": "2016-08-12 15:23:28 UTC",
            "finished_at": "2016-08-12 15:26:29 UTC"
        },
        "user": {
            "name": "Administrator",
            "username": "root",
            "avatar_url": "http://www.gravatar.com/avatar/e32bd13e2add097461cb96824b7a829c?s=80&d=identicon"
        },
        "project": project(),
        "commit": {
            "id": "bcbb5ec396a2c0f828686f14fac9b80b780504f2",
            "message": "test\n",
            "timestamp": "2016-08-12T17:23:21+02:00",
            "url": "http://example.com/gitlab-org/gitlab-test/commit/bcbb5ec396a2c0f828686f14fac9b80b780504f2",
            "author": { "name": "User", "email": "user@gitlab.com" }
        }
    })
}

pub fn build_body(status: &str) -> Value {
    json!({
        "object_kind": "build",
        "ref": "gitlab-script-trigger",
        "build_id": 1977,
        "build_name": "test",
        "build_stage": "test",
        "build_status": status,
        "project_id": 380,
        "project_name": "gitlab-org/gitlab-test",
        "user": {
            "id": 3,
            "name": "User",
            "email": "user@gitlab.com",
            "avatar_url": "http://www.gravatar.com/avatar/e32bd13e2add097461cb96824b7a829c?s=80&d=identicon"
        },
        "repository": {
            "name": "gitlab_test",
            "url": "http://192.168.64.1:3005/gitlab-org/gitlab-test.git",
            "homepage": "http://192.168.64.1:3005/gitlab-org/gitlab-test"
        }
    })
}

pub fn wiki_body(action: &str) -> Value {
    json!({
        "object_kind": "wiki_page",
        "user": {
            "name": "Administrator",
            "username": "root",
            "avatar_url": "http://www.gravatar.com/avatar/e64c7d89f26bd1972efa854d13d7dd61?s=80&d=identicon"
        },
        "project": project(),
        "object_attributes": {
            "title": "Awesome",
            "content": "awesome content goes here",
            "format": "markdown",
            "slug": "awesome",
            "url": "http://example.com/root/awesome-project/-/wikis/awesome",
            "action": action
        }
    })
}

pub fn system_user_add_to_team() -> Value {
    json!({
        "created_at": "2012-07-21T07:30:56Z",
        "updated_at": "2012-07-21T07:38:22Z",
        "event_name": "user_add_to_team",
        "access_level": "Maintainer",
        "project_access": "Maintainer",
        "project_id": 74,
        "project_name": "StoreCloud",
        "project_path": "storecloud",
        "project_path_with_namespace": "jsmith/storecloud",
        "user_email": "johnsmith@gmail.com",
        "user_name": "John Smith",
        "user_username": "johnsmith",
        "user_id": 41,
        "project_visibility": "private"
    })
}
