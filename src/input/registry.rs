//! Listener registrations
//!
//! A registration is a bundle of optional callbacks. Every registration
//! receives every event; none can stop propagation. Registration is purely
//! about callbacks: process-wide settings (overlay, VR session, keyboard
//! flags) have their own setters on [`GamepadHelper`](crate::GamepadHelper).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use super::pad::PadId;
use super::vocabulary::{AxisName, ButtonName};

/// Button down/up callback: `(pad, button)`
pub type ButtonCallback = Arc<dyn Fn(&PadId, ButtonName) + Send + Sync>;

/// Velocity callback: `(pad, axis, value in [-1, 1])`
pub type VelocityCallback = Arc<dyn Fn(&PadId, AxisName, f32) + Send + Sync>;

/// Connect/disconnect callback
pub type ConnectionCallback = Arc<dyn Fn(&GamepadInfo) + Send + Sync>;

/// Opaque registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reg-{}", self.0)
    }
}

/// Metadata handed to connect/disconnect callbacks
#[derive(Debug, Clone, PartialEq)]
pub struct GamepadInfo {
    /// Registration receiving the callback
    pub registration: RegistrationId,
    /// Pad slot index
    pub index: u32,
    /// Device id string reported by the backend
    pub device_id: String,
    pub buttons: usize,
    pub axes: usize,
}

/// Callbacks for one registration, each independently optional
#[derive(Clone, Default)]
pub struct Listener {
    pub down: Option<ButtonCallback>,
    pub up: Option<ButtonCallback>,
    pub velocity: Option<VelocityCallback>,
    pub on_connect: Option<ConnectionCallback>,
    pub on_disconnect: Option<ConnectionCallback>,
    /// Drop events from [`PadId::Remote`] for this registration only
    pub suppress_remotes: bool,
}

impl Listener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_down(mut self, f: impl Fn(&PadId, ButtonName) + Send + Sync + 'static) -> Self {
        self.down = Some(Arc::new(f));
        self
    }

    pub fn on_up(mut self, f: impl Fn(&PadId, ButtonName) + Send + Sync + 'static) -> Self {
        self.up = Some(Arc::new(f));
        self
    }

    pub fn on_velocity(mut self, f: impl Fn(&PadId, AxisName, f32) + Send + Sync + 'static) -> Self {
        self.velocity = Some(Arc::new(f));
        self
    }

    pub fn on_connect(mut self, f: impl Fn(&GamepadInfo) + Send + Sync + 'static) -> Self {
        self.on_connect = Some(Arc::new(f));
        self
    }

    pub fn on_disconnect(mut self, f: impl Fn(&GamepadInfo) + Send + Sync + 'static) -> Self {
        self.on_disconnect = Some(Arc::new(f));
        self
    }

    pub fn suppress_remotes(mut self, suppress: bool) -> Self {
        self.suppress_remotes = suppress;
        self
    }

    fn accepts(&self, pad: &PadId) -> bool {
        !(self.suppress_remotes && pad.is_remote())
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("down", &self.down.is_some())
            .field("up", &self.up.is_some())
            .field("velocity", &self.velocity.is_some())
            .field("on_connect", &self.on_connect.is_some())
            .field("on_disconnect", &self.on_disconnect.is_some())
            .field("suppress_remotes", &self.suppress_remotes)
            .finish()
    }
}

/// Table of active registrations
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<RegistrationId, Listener>,
    next_id: u64,
    /// Live registration count, gates per-frame polling
    live: i64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a listener and return its handle
    pub fn register(&mut self, listener: Listener) -> RegistrationId {
        self.next_id += 1;
        let id = RegistrationId(self.next_id);
        debug!("Registered listener {} ({:?})", id, listener);
        self.entries.insert(id, listener);
        self.live += 1;
        id
    }

    /// Remove a registration; unknown ids are ignored
    ///
    /// Returns whether a registration was removed.
    pub fn unregister(&mut self, id: RegistrationId) -> bool {
        if self.entries.remove(&id).is_some() {
            self.live -= 1;
            debug!("Unregistered listener {}", id);
            true
        } else {
            trace!("Unregister of unknown listener {} ignored", id);
            false
        }
    }

    pub fn live_count(&self) -> i64 {
        self.live
    }

    /// True when nobody is listening; clamps the live count back to zero
    pub fn is_idle(&mut self) -> bool {
        if self.live <= 0 {
            self.live = 0;
            return true;
        }
        false
    }

    pub fn contains(&self, id: RegistrationId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of all live registrations, oldest first
    pub fn ids(&self) -> Vec<RegistrationId> {
        self.entries.keys().copied().collect()
    }

    pub fn emit_down(&self, pad: &PadId, button: ButtonName) {
        for listener in self.entries.values().filter(|l| l.accepts(pad)) {
            if let Some(down) = &listener.down {
                down(pad, button);
            }
        }
    }

    pub fn emit_up(&self, pad: &PadId, button: ButtonName) {
        for listener in self.entries.values().filter(|l| l.accepts(pad)) {
            if let Some(up) = &listener.up {
                up(pad, button);
            }
        }
    }

    pub fn emit_velocity(&self, pad: &PadId, axis: AxisName, value: f32) {
        for listener in self.entries.values().filter(|l| l.accepts(pad)) {
            if let Some(velocity) = &listener.velocity {
                velocity(pad, axis, value);
            }
        }
    }

    /// Call every `on_connect` with metadata stamped with its registration id
    pub fn emit_connect(&self, index: u32, device_id: &str, buttons: usize, axes: usize) {
        for (id, listener) in &self.entries {
            if let Some(cb) = &listener.on_connect {
                cb(&GamepadInfo {
                    registration: *id,
                    index,
                    device_id: device_id.to_string(),
                    buttons,
                    axes,
                });
            }
        }
    }

    pub fn emit_disconnect(&self, index: u32, device_id: &str, buttons: usize, axes: usize) {
        for (id, listener) in &self.entries {
            if let Some(cb) = &listener.on_disconnect {
                cb(&GamepadInfo {
                    registration: *id,
                    index,
                    device_id: device_id.to_string(),
                    buttons,
                    axes,
                });
            }
        }
    }
}
