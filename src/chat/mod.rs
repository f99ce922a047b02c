mod relay;
pub mod text;
mod types;

pub use relay::Relay;
pub use text::MentionSet;
pub use types::{Attachment, ErrorReply, Notification, Outcome};
