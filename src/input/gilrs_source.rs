//! Physical gamepads through gilrs
//!
//! Snapshots follow the W3C "standard" gamepad layout: buttons 0-16 in
//! standard order and axes 0-3 (left X/Y, right X/Y) with Y pointing down.

use gilrs::ff::{BaseEffect, BaseEffectType, Effect, EffectBuilder, Replay, Ticks};
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use std::collections::HashMap;
use tracing::{debug, info};

use super::source::{ButtonSnapshot, ConnectionChange, GamepadSnapshot, GamepadSource, RumbleEffect};
use crate::error::{HelperError, Result};

/// gilrs buttons in standard layout order
const STANDARD_ORDER: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

/// (axis, sign) in standard order; gilrs reports Y up, the standard layout Y down
const STANDARD_AXES: [(Axis, f32); 4] = [
    (Axis::LeftStickX, 1.0),
    (Axis::LeftStickY, -1.0),
    (Axis::RightStickX, 1.0),
    (Axis::RightStickY, -1.0),
];

fn slot_index(id: GamepadId) -> u32 {
    usize::from(id) as u32
}

fn snapshot_of(id: GamepadId, gamepad: &Gamepad<'_>) -> GamepadSnapshot {
    let buttons = STANDARD_ORDER
        .iter()
        .map(|&button| {
            let pressed = gamepad.is_pressed(button);
            let value = gamepad
                .button_data(button)
                .map(|data| data.value())
                .unwrap_or(if pressed { 1.0 } else { 0.0 });
            ButtonSnapshot { pressed, value }
        })
        .collect();

    let axes = STANDARD_AXES
        .iter()
        .map(|&(axis, sign)| gamepad.value(axis) * sign)
        .collect();

    GamepadSnapshot {
        index: slot_index(id),
        id: gamepad.name().to_string(),
        connected: gamepad.is_connected(),
        buttons,
        axes,
        has_rumble: gamepad.is_ff_supported(),
    }
}

fn magnitude(m: f32) -> u16 {
    (m.clamp(0.0, 1.0) * u16::MAX as f32) as u16
}

/// Gamepad source backed by gilrs
pub struct GilrsSource {
    gilrs: Gilrs,
    pending: Vec<ConnectionChange>,
    /// Effects stop when dropped, so the last one per pad is kept alive
    effects: HashMap<u32, Effect>,
}

impl GilrsSource {
    pub fn new() -> Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| HelperError::Backend(e.to_string()))?;
        info!("gilrs initialized");

        Ok(Self {
            gilrs,
            pending: Vec::new(),
            effects: HashMap::new(),
        })
    }

    /// Drain gilrs events so cached pad state is current
    fn pump(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    let snapshot = snapshot_of(id, &self.gilrs.gamepad(id));
                    info!("Gamepad {} connected: \"{}\"", snapshot.index, snapshot.id);
                    self.pending.push(ConnectionChange::Connected(snapshot));
                },
                EventType::Disconnected => {
                    let mut snapshot = snapshot_of(id, &self.gilrs.gamepad(id));
                    snapshot.connected = false;
                    info!("Gamepad {} disconnected", snapshot.index);
                    self.effects.remove(&snapshot.index);
                    self.pending.push(ConnectionChange::Disconnected(snapshot));
                },
                _ => {},
            }
        }
    }

    fn find(&self, index: u32) -> Option<GamepadId> {
        self.gilrs
            .gamepads()
            .map(|(id, _)| id)
            .find(|&id| slot_index(id) == index)
    }
}

impl GamepadSource for GilrsSource {
    fn snapshots(&mut self) -> Vec<GamepadSnapshot> {
        self.pump();
        self.gilrs
            .gamepads()
            .map(|(id, gamepad)| snapshot_of(id, &gamepad))
            .collect()
    }

    fn connection_changes(&mut self) -> Vec<ConnectionChange> {
        self.pump();
        std::mem::take(&mut self.pending)
    }

    fn play_dual_rumble(&mut self, index: u32, effect: RumbleEffect) -> Result<bool> {
        let Some(id) = self.find(index) else {
            return Ok(false);
        };
        if !self.gilrs.gamepad(id).is_ff_supported() {
            return Ok(false);
        }

        let scheduling = Replay {
            play_for: Ticks::from_ms(effect.duration_ms),
            with_delay: Ticks::from_ms(effect.start_delay_ms),
            ..Default::default()
        };
        let ff_error = |e: gilrs::ff::Error| HelperError::ForceFeedback {
            index,
            reason: e.to_string(),
        };

        let rumble = EffectBuilder::new()
            .add_effect(BaseEffect {
                kind: BaseEffectType::Strong {
                    magnitude: magnitude(effect.strong_magnitude),
                },
                scheduling,
                envelope: Default::default(),
            })
            .add_effect(BaseEffect {
                kind: BaseEffectType::Weak {
                    magnitude: magnitude(effect.weak_magnitude),
                },
                scheduling,
                envelope: Default::default(),
            })
            .gamepads(&[id])
            .finish(&mut self.gilrs)
            .map_err(ff_error)?;
        rumble.play().map_err(ff_error)?;

        debug!("Rumble on pad {} for {} ms", index, effect.duration_ms);
        self.effects.insert(index, rumble);
        Ok(true)
    }
}
