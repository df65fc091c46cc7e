//! TV remote keys delivered as keyboard events
//!
//! Only active when running on Android TV. Mapped keys are reported under
//! [`PadId::Remote`] and the host should suppress the key's default action.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::helper::GamepadHelper;
use crate::input::vocabulary::{fire_remote_to_standard, RawButton};
use crate::input::{PadId, PadReporter};

/// Whether Android TV remote handling is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AndroidTvMode {
    /// Detect from the platform user agent
    #[default]
    Auto,
    On,
    Off,
}

impl AndroidTvMode {
    pub fn resolve(self, user_agent: Option<&str>) -> bool {
        match self {
            AndroidTvMode::Auto => user_agent.is_some_and(is_android_tv),
            AndroidTvMode::On => true,
            AndroidTvMode::Off => false,
        }
    }
}

/// What the host should do with the keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key was consumed as a remote button
    PreventDefault,
    Passthrough,
}

/// Android user agent that also mentions a TV or a Fire TV device (`AFT`)
pub fn is_android_tv(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    ua.contains("android") && (ua.contains("tv") || user_agent.contains("AFT"))
}

impl GamepadHelper {
    pub fn on_key_down(&mut self, key_code: u32) -> KeyOutcome {
        self.on_remote_key(key_code, true)
    }

    pub fn on_key_up(&mut self, key_code: u32) -> KeyOutcome {
        self.on_remote_key(key_code, false)
    }

    fn on_remote_key(&mut self, key_code: u32, down: bool) -> KeyOutcome {
        if !self.running_on_android_tv {
            return KeyOutcome::Passthrough;
        }

        let Some(index) = fire_remote_to_standard(key_code) else {
            trace!("Key {} is not a remote button", key_code);
            return KeyOutcome::Passthrough;
        };

        let raw = RawButton::Index(index);
        if down {
            self.report_down(&PadId::Remote, raw);
        } else {
            self.report_up(&PadId::Remote, raw);
        }
        KeyOutcome::PreventDefault
    }
}
