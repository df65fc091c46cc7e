//! Event dispatch: overlay capture, remote suppression, fan-out

use tracing::trace;

use crate::input::vocabulary::{axis_name, canonicalize, RawButton};
use crate::input::{PadId, PadReporter};
use crate::nav::OverlayDialog;

impl PadReporter for super::GamepadHelper {
    /// Route a press to the overlay while it is open, else to every listener
    fn report_down(&mut self, pad: &PadId, raw: RawButton) {
        let button = canonicalize(raw, pad.family());

        if self.is_overlay_open() {
            trace!("Overlay captured {} from pad {}", button, pad);
            let overlay = self
                .overlay
                .as_mut()
                .map(|o| o.as_mut() as &mut dyn OverlayDialog);
            self.navigator
                .overlay_pad_down(self.ui.as_mut(), self.platform.as_mut(), overlay, button);
            return;
        }

        if pad.is_remote() && self.ignore_keyboard {
            trace!("Remote {} ignored", button);
            return;
        }

        self.registry.emit_down(pad, button);
    }

    /// Releases are swallowed while the overlay owns focus
    fn report_up(&mut self, pad: &PadId, raw: RawButton) {
        if self.is_overlay_open() {
            return;
        }

        if pad.is_remote() && self.ignore_keyboard {
            return;
        }

        self.registry.emit_up(pad, canonicalize(raw, pad.family()));
    }

    fn report_velocity(&mut self, pad: &PadId, axis: u32, value: f32) {
        if self.is_overlay_open() {
            return;
        }

        let Some(name) = axis_name(pad.family(), axis) else {
            return;
        };

        if !self.tables.update_velocity(pad, axis, value) {
            return;
        }

        self.registry.emit_velocity(pad, name, value);
    }
}
