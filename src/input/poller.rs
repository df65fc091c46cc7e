//! Frame polling: scheduling and snapshot diffing
//!
//! Each display refresh the engine reads every connected pad, diffs it
//! against [`PadTables`] and turns the differences into [`PadSignal`]s.
//! Buttons are edge-triggered. Each axis drives two independent digital
//! directions (past +[`AXES_THRESHOLD`] and past -[`AXES_THRESHOLD`]) and
//! is also forwarded raw as a velocity; velocity change detection happens at
//! dispatch time.

use super::pad::PadId;
use super::source::GamepadSnapshot;
use super::state::{PadTables, Transition};
use super::vocabulary::{Hand, Polarity, RawButton, AXES_THRESHOLD};

/// Raw event produced by diffing one snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadSignal {
    Down(RawButton),
    Up(RawButton),
    Velocity { axis: u32, value: f32 },
}

fn axis_raw(hand: Option<Hand>, axis: u32, polarity: Polarity) -> RawButton {
    match hand {
        Some(hand) => RawButton::VrAxis { hand, axis, polarity },
        None => RawButton::Axis { axis, polarity },
    }
}

fn push_transition(out: &mut Vec<PadSignal>, raw: RawButton, transition: Option<Transition>) {
    match transition {
        Some(Transition::Down) => out.push(PadSignal::Down(raw)),
        Some(Transition::Up) => out.push(PadSignal::Up(raw)),
        None => {}
    }
}

/// Diff `snapshot` against the tables for `pad`, updating them
///
/// `hand` selects VR axis naming (`vr{Hand}.a{i}{pos|neg}`); `None` uses the
/// traditional `a{i}{pos|neg}` ids. Signals come out in button order, then
/// per axis: positive edge, negative edge, velocity.
pub fn diff_snapshot(
    tables: &mut PadTables,
    pad: &PadId,
    snapshot: &GamepadSnapshot,
    hand: Option<Hand>,
) -> Vec<PadSignal> {
    let mut signals = Vec::new();

    for (i, button) in snapshot.buttons.iter().enumerate() {
        let raw = RawButton::Index(i as u32);
        let transition = tables.update_button(pad, raw, button.pressed);
        push_transition(&mut signals, raw, transition);
    }

    for (i, &value) in snapshot.axes.iter().enumerate() {
        let axis = i as u32;

        let pos = axis_raw(hand, axis, Polarity::Pos);
        let transition = tables.update_button(pad, pos, value > AXES_THRESHOLD);
        push_transition(&mut signals, pos, transition);

        let neg = axis_raw(hand, axis, Polarity::Neg);
        let transition = tables.update_button(pad, neg, value < -AXES_THRESHOLD);
        push_transition(&mut signals, neg, transition);

        signals.push(PadSignal::Velocity { axis, value });
    }

    signals
}

/// Display-refresh scheduling state
///
/// In normal mode every frame requests the next one. Manual mode stops the
/// self-rescheduling so an external driver calls the forced-poll entry
/// point instead, and a forced poll never requests a frame by itself.
#[derive(Debug, Clone)]
pub struct FrameSchedule {
    pending: bool,
    manual: bool,
    forced: bool,
}

impl FrameSchedule {
    pub fn new() -> Self {
        Self {
            pending: true,
            manual: false,
            forced: false,
        }
    }

    /// Consume the outstanding frame request
    pub fn take_pending(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    /// Start of frame work: request the next frame unless manual or forced
    pub fn begin_frame(&mut self) {
        if !self.manual && !self.forced {
            self.pending = true;
        }
    }

    /// Switch manual polling; leaving manual mode re-arms the frame request
    pub fn set_manual(&mut self, manual: bool) {
        self.manual = manual;
        if !manual {
            self.pending = true;
        }
    }

    pub fn set_forced(&mut self, forced: bool) {
        self.forced = forced;
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl Default for FrameSchedule {
    fn default() -> Self {
        Self::new()
    }
}
