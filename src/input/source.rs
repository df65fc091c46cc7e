//! Gamepad snapshot types and the collaborator traits that produce them
//!
//! The engine never talks to hardware directly. A [`GamepadSource`] hands it
//! per-frame snapshots of physical pads, and an optional [`VrSession`] does
//! the same for the two VR hands.

use crate::error::Result;

use super::vocabulary::Hand;

/// State of one button in a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ButtonSnapshot {
    pub pressed: bool,
    /// Analog value in [0, 1] (triggers); 0/1 for digital buttons
    pub value: f32,
}

impl ButtonSnapshot {
    pub fn digital(pressed: bool) -> Self {
        Self {
            pressed,
            value: if pressed { 1.0 } else { 0.0 },
        }
    }
}

/// Point-in-time view of a gamepad in standard layout order
#[derive(Debug, Clone, PartialEq)]
pub struct GamepadSnapshot {
    /// Slot index
    pub index: u32,
    /// Device id string (product name)
    pub id: String,
    pub connected: bool,
    pub buttons: Vec<ButtonSnapshot>,
    /// Axis values in [-1, 1], Y pointing down
    pub axes: Vec<f32>,
    /// Whether a dual-rumble actuator is present
    pub has_rumble: bool,
}

impl GamepadSnapshot {
    /// Connected pad with `buttons` released buttons and `axes` centred axes
    pub fn new(index: u32, id: impl Into<String>, buttons: usize, axes: usize) -> Self {
        Self {
            index,
            id: id.into(),
            connected: true,
            buttons: vec![ButtonSnapshot::default(); buttons],
            axes: vec![0.0; axes],
            has_rumble: false,
        }
    }
}

/// Hot-plug notification from a source
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionChange {
    Connected(GamepadSnapshot),
    Disconnected(GamepadSnapshot),
}

/// Dual-rumble effect parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RumbleEffect {
    pub start_delay_ms: u32,
    pub duration_ms: u32,
    pub weak_magnitude: f32,
    pub strong_magnitude: f32,
}

impl RumbleEffect {
    /// Both motors at full strength, no delay
    pub fn full(duration_ms: u32) -> Self {
        Self {
            start_delay_ms: 0,
            duration_ms,
            weak_magnitude: 1.0,
            strong_magnitude: 1.0,
        }
    }
}

/// Producer of physical gamepad snapshots
pub trait GamepadSource {
    /// Snapshots of all pads, connected or not
    fn snapshots(&mut self) -> Vec<GamepadSnapshot>;

    /// Snapshot of one slot
    fn snapshot(&mut self, index: u32) -> Option<GamepadSnapshot> {
        self.snapshots().into_iter().find(|s| s.index == index)
    }

    /// Hot-plug changes since the last call
    fn connection_changes(&mut self) -> Vec<ConnectionChange> {
        Vec::new()
    }

    /// Play a rumble effect
    ///
    /// `Ok(false)` means the pad has no actuator, so callers may fall back.
    fn play_dual_rumble(&mut self, _index: u32, _effect: RumbleEffect) -> Result<bool> {
        Ok(false)
    }
}

/// Source for hosts without a gamepad API
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGamepads;

impl GamepadSource for NoGamepads {
    fn snapshots(&mut self) -> Vec<GamepadSnapshot> {
        Vec::new()
    }
}

/// One tracked VR input source
#[derive(Debug, Clone, PartialEq)]
pub struct VrInputSource {
    /// `None` for sources that report no handedness; those are skipped
    pub hand: Option<Hand>,
    pub gamepad: Option<GamepadSnapshot>,
}

/// Active VR session
pub trait VrSession {
    fn input_sources(&self) -> Vec<VrInputSource>;
}
