pub mod chat;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod gitlab;
pub mod logging;

pub use chat::{Notification, Outcome};
pub use dispatch::Dispatcher;
pub use error::{HookError, Result};
pub use gitlab::{Envelope, EventKind};
