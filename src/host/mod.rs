//! Host platform integration
//!
//! - `platform`: the bridge trait the embedding host implements
//! - `bridge`: pad events already decoded by the host (Android TV)
//! - `remote`: TV remote keypresses arriving as keyboard events

pub mod bridge;
pub mod platform;
pub mod remote;

pub use bridge::HostAction;
pub use platform::{NoPlatform, PlatformBridge};
pub use remote::{is_android_tv, AndroidTvMode, KeyOutcome};
