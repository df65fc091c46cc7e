//! Host-reported pad events
//!
//! When the platform polls gamepads natively it reports Android key codes
//! with a down/up action and the device id. Codes are translated to standard
//! indices and fed into the normal dispatch path.

use std::convert::TryFrom;
use tracing::debug;

use crate::error::HelperError;
use crate::helper::GamepadHelper;
use crate::input::vocabulary::{android_host_to_standard, RawButton};
use crate::input::{PadId, PadReporter};

/// Action code sent by the host bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Down,
    Up,
}

impl TryFrom<i32> for HostAction {
    type Error = HelperError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(HostAction::Down),
            1 => Ok(HostAction::Up),
            other => Err(HelperError::UnknownHostAction(other)),
        }
    }
}

impl GamepadHelper {
    /// Entry point for the host bridge callback `(action, pad, key)`
    ///
    /// Unknown actions and unmapped key codes are dropped.
    pub fn on_host_pad_event(&mut self, action: i32, pad: u32, key: u32) {
        let action = match HostAction::try_from(action) {
            Ok(action) => action,
            Err(e) => {
                debug!("Host pad event ignored: {}", e);
                return;
            }
        };

        let Some(index) = android_host_to_standard(key) else {
            debug!("Host key {} on pad {} has no mapping", key, pad);
            return;
        };

        let pad = PadId::Slot(pad);
        let raw = RawButton::Index(index);
        match action {
            HostAction::Down => self.report_down(&pad, raw),
            HostAction::Up => self.report_up(&pad, raw),
        }
    }
}
