mod policy;
mod settings;

pub use policy::{NOTIF_COLOR, Policy};
pub use settings::{RelayConfig, Settings, load_settings};
