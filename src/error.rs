//! Error types for padnav
//!
//! The input surface itself never fails: unknown buttons, missing pads and
//! absent collaborators degrade to no-ops. These errors only come out of
//! construction and parsing.

use thiserror::Error;

/// Errors raised while building or configuring the helper
#[derive(Debug, Error)]
pub enum HelperError {
    /// The gamepad backend could not be initialised
    #[error("gamepad backend unavailable: {0}")]
    Backend(String),

    /// A force-feedback effect could not be created or played
    #[error("force feedback failed on pad {index}: {reason}")]
    ForceFeedback { index: u32, reason: String },

    /// The platform bridge reported an action code other than down (0) or up (1)
    #[error("unknown host pad action code {0}")]
    UnknownHostAction(i32),

    /// Scroll behaviour string not one of smooth/auto/instant
    #[error("invalid scroll behavior '{0}' (expected smooth, auto or instant)")]
    InvalidScrollBehavior(String),
}

/// Result alias for fallible helper operations
pub type Result<T> = std::result::Result<T, HelperError>;
