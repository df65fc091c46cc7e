//! Per-pad held-button and velocity tables
//!
//! Both tables are edge-triggered: callers only hear about a button when its
//! held flag flips, and about an axis when its value differs from the last
//! value reported for that pad.

use std::collections::{HashMap, HashSet};

use super::pad::PadId;
use super::vocabulary::RawButton;

/// A held-state flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Down,
    Up,
}

/// Held buttons and last reported velocities for every pad
#[derive(Debug, Default)]
pub struct PadTables {
    held: HashMap<PadId, HashSet<RawButton>>,
    velocities: HashMap<(PadId, u32), f32>,
}

impl PadTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current pressed state and report a flip, if any
    pub fn update_button(&mut self, pad: &PadId, raw: RawButton, pressed: bool) -> Option<Transition> {
        let held = self.held.entry(pad.clone()).or_default();
        if pressed {
            held.insert(raw).then_some(Transition::Down)
        } else {
            held.remove(&raw).then_some(Transition::Up)
        }
    }

    pub fn is_held(&self, pad: &PadId, raw: RawButton) -> bool {
        self.held.get(pad).is_some_and(|h| h.contains(&raw))
    }

    /// Store `value` for the axis if it differs from the last one
    ///
    /// Axes start at 0.0, so an initial 0.0 is not a change. NaN readings
    /// are never a change.
    pub fn update_velocity(&mut self, pad: &PadId, axis: u32, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }
        let last = self.velocities.entry((pad.clone(), axis)).or_insert(0.0);
        if *last == value {
            return false;
        }
        *last = value;
        true
    }

    pub fn last_velocity(&self, pad: &PadId, axis: u32) -> f32 {
        self.velocities.get(&(pad.clone(), axis)).copied().unwrap_or(0.0)
    }

    /// Forget held buttons for a pad (on connect/disconnect)
    pub fn reset_pad(&mut self, pad: &PadId) {
        self.held.remove(pad);
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.held.clear();
        self.velocities.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.held.values().all(|h| h.is_empty()) && self.velocities.is_empty()
    }
}
