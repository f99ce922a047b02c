mod event;
mod payloads;

#[cfg(test)]
pub(crate) mod fixtures;

pub use event::{DELIVERY_HEADER, EVENT_HEADER, Envelope, EventKind};
pub use payloads::{
    BuildEvent, CommentTarget, Commit, IssueAttributes, IssueEvent, LastCommit,
    MergeRequestAttributes, MergeRequestEvent, NoteAttributes, NoteEvent, NoteItem,
    NoteMergeRequest, Person, PipelineAttributes, PipelineEvent, Project, PushEvent, SystemEvent,
    WikiPageAttributes, WikiPageEvent, pick_project,
};
