//! Typed views over GitLab webhook bodies
//!
//! Only the fields the formatters read are modelled; everything else in the
//! body is ignored. A field that is required here and missing from the body
//! surfaces as a formatting error at the dispatcher.

use crate::error::{HookError, Result};
use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like an absent field
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A GitLab user, assignee or commit author
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Person {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Usernames win when both sides have one; commit authors only carry a
    /// name and e-mail, so fall back to comparing names.
    pub fn same_as(&self, other: &Person) -> bool {
        match (&self.username, &other.username) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == other.name,
        }
    }

    /// Actor of events that only carry flat `user_name`/`user_avatar` fields.
    /// A nested `user` object is preferred when newer GitLab sends one.
    pub fn from_flat(
        nested: Option<&Person>,
        user_name: Option<&str>,
        user_avatar: Option<&str>,
    ) -> Person {
        if let Some(user) = nested {
            return user.clone();
        }
        Person {
            name: user_name.unwrap_or_default().to_string(),
            username: None,
            avatar_url: user_avatar.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub path_with_namespace: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

impl Project {
    pub fn web_url(&self) -> &str {
        self.web_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or(self.homepage.as_deref())
            .unwrap_or_default()
    }
}

/// Events carry the project under `project`, older ones under `repository`
pub fn pick_project<'a>(
    project: Option<&'a Project>,
    repository: Option<&'a Project>,
) -> Result<&'a Project> {
    project
        .or(repository)
        .ok_or(HookError::MissingField("project"))
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default)]
    pub author: Person,
}

/// Push Hook and Tag Push Hook share one body layout
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub checkout_sha: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_avatar: Option<String>,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub repository: Option<Project>,
    #[serde(default, deserialize_with = "nullable")]
    pub commits: Vec<Commit>,
    #[serde(default, deserialize_with = "nullable")]
    pub total_commits_count: u64,
}

impl PushEvent {
    pub fn project(&self) -> Result<&Project> {
        pick_project(self.project.as_ref(), self.repository.as_ref())
    }

    pub fn actor(&self) -> Person {
        Person::from_flat(None, self.user_name.as_deref(), self.user_avatar.as_deref())
    }

    /// GitLab sends forty zeros as `before` when a ref is created
    pub fn is_new_ref(&self) -> bool {
        self.before
            .as_deref()
            .is_some_and(|before| before.chars().all(|c| c == '0'))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastCommit {
    #[serde(default)]
    pub author: Option<Person>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequestAttributes {
    pub iid: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub source_branch: String,
    #[serde(default, deserialize_with = "nullable")]
    pub target_branch: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub target: Project,
    pub source: Project,
    #[serde(default)]
    pub last_commit: Option<LastCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequestEvent {
    pub user: Person,
    pub object_attributes: MergeRequestAttributes,
    #[serde(default, deserialize_with = "nullable")]
    pub assignees: Vec<Person>,
    #[serde(default)]
    pub assignee: Option<Person>,
}

impl MergeRequestEvent {
    /// First entry of `assignees`, or the single `assignee` of older payloads
    pub fn assignee(&self) -> Option<&Person> {
        self.assignees.first().or(self.assignee.as_ref())
    }

    pub fn last_commit_author(&self) -> Option<&Person> {
        self.object_attributes
            .last_commit
            .as_ref()
            .and_then(|c| c.author.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueAttributes {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub confidential: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueEvent {
    pub user: Person,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub repository: Option<Project>,
    pub object_attributes: IssueAttributes,
    #[serde(default, deserialize_with = "nullable")]
    pub assignees: Vec<Person>,
    #[serde(default)]
    pub assignee: Option<Person>,
}

impl IssueEvent {
    pub fn project(&self) -> Result<&Project> {
        pick_project(self.project.as_ref(), self.repository.as_ref())
    }

    pub fn assignee(&self) -> Option<&Person> {
        self.assignees.first().or(self.assignee.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteAttributes {
    #[serde(default, deserialize_with = "nullable")]
    pub note: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteMergeRequest {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub assignee: Option<Person>,
    #[serde(default)]
    pub last_commit: Option<LastCommit>,
}

/// Issue or snippet a note was left on
#[derive(Debug, Clone, Deserialize)]
pub struct NoteItem {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteEvent {
    pub user: Person,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub repository: Option<Project>,
    pub object_attributes: NoteAttributes,
    #[serde(default)]
    pub merge_request: Option<NoteMergeRequest>,
    #[serde(default)]
    pub commit: Option<Commit>,
    #[serde(default)]
    pub issue: Option<NoteItem>,
    #[serde(default)]
    pub snippet: Option<NoteItem>,
}

/// What a note was left on
#[derive(Debug, Clone, Copy)]
pub enum CommentTarget<'a> {
    MergeRequest(&'a NoteMergeRequest),
    Commit(&'a Commit),
    Issue(&'a NoteItem),
    Snippet(&'a NoteItem),
}

impl NoteEvent {
    pub fn project(&self) -> Result<&Project> {
        pick_project(self.project.as_ref(), self.repository.as_ref())
    }

    pub fn target(&self) -> Option<CommentTarget<'_>> {
        if let Some(mr) = &self.merge_request {
            return Some(CommentTarget::MergeRequest(mr));
        }
        if let Some(commit) = &self.commit {
            return Some(CommentTarget::Commit(commit));
        }
        if let Some(issue) = &self.issue {
            return Some(CommentTarget::Issue(issue));
        }
        self.snippet.as_ref().map(CommentTarget::Snippet)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineAttributes {
    pub status: String,
    #[serde(default)]
    pub finished_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineEvent {
    #[serde(default)]
    pub user: Option<Person>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_avatar: Option<String>,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub repository: Option<Project>,
    pub object_attributes: PipelineAttributes,
    pub commit: Commit,
}

impl PipelineEvent {
    pub fn project(&self) -> Result<&Project> {
        pick_project(self.project.as_ref(), self.repository.as_ref())
    }

    pub fn actor(&self) -> Person {
        Person::from_flat(
            self.user.as_ref(),
            self.user_name.as_deref(),
            self.user_avatar.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildEvent {
    pub build_name: String,
    pub build_status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub project_name: String,
    pub repository: Project,
    #[serde(default)]
    pub user: Option<Person>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_avatar: Option<String>,
}

impl BuildEvent {
    pub fn actor(&self) -> Person {
        Person::from_flat(
            self.user.as_ref(),
            self.user_name.as_deref(),
            self.user_avatar.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiPageAttributes {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiPageEvent {
    pub user: Person,
    pub project: Project,
    pub object_attributes: WikiPageAttributes,
}

/// System hook body; which fields are present depends on `event_name`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SystemEvent {
    pub event_name: String,
    pub path_with_namespace: Option<String>,
    pub old_path_with_namespace: Option<String>,
    pub user_username: Option<String>,
    pub project_access: Option<String>,
    pub project_path_with_namespace: Option<String>,
    pub group_access: Option<String>,
    pub group_path: Option<String>,
    pub username: Option<String>,
    pub old_username: Option<String>,
    pub path: Option<String>,
    pub full_path: Option<String>,
    pub old_full_path: Option<String>,
}

impl SystemEvent {
    /// Second `_`-separated segment: `user_add_to_team` -> `add`
    pub fn action_keyword(&self) -> Option<&str> {
        self.event_name.split('_').nth(1)
    }
}
