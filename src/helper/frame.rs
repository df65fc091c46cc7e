//! Per-frame polling, hot-plug and timers

use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

use crate::input::poller::{diff_snapshot, PadSignal};
use crate::input::source::{ConnectionChange, GamepadSnapshot};
use crate::input::vocabulary::Hand;
use crate::input::{PadId, PadReporter};

/// Grace period before per-pad state is purged after a VR session change
pub(crate) const VR_PURGE_DELAY: Duration = Duration::from_millis(500);

impl super::GamepadHelper {
    /// Drive the helper from a display-refresh or timer tick
    ///
    /// Runs due timers, applies hot-plug changes, then polls if a frame is
    /// pending. In manual mode nothing is polled here; call [`force_poll`].
    ///
    /// [`force_poll`]: Self::force_poll
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.run_timers(now);
        self.drain_connections();

        if self.frames.take_pending() {
            self.on_frame();
        }
    }

    /// Poll once without requesting another frame
    pub fn force_poll(&mut self) {
        self.force_poll_at(Instant::now());
    }

    pub fn force_poll_at(&mut self, now: Instant) {
        self.frames.set_forced(true);
        self.run_timers(now);
        self.drain_connections();
        self.on_frame();
        self.frames.set_forced(false);
    }

    /// Whether the next [`tick`](Self::tick) will poll
    pub fn frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    fn run_timers(&mut self, now: Instant) {
        if self.vr_purge_at.is_some_and(|deadline| now >= deadline) {
            debug!("Purging pad state after VR session change");
            self.tables.clear();
            self.vr_purge_at = None;
        }
    }

    /// Apply every hot-plug change the source queued since the last drain
    fn drain_connections(&mut self) {
        for change in self.source.connection_changes() {
            self.handle_connection(change);
        }
    }

    /// Apply a hot-plug change: reset the pad's held buttons and notify listeners
    pub fn handle_connection(&mut self, change: ConnectionChange) {
        match change {
            ConnectionChange::Connected(pad) => {
                info!("Gamepad {} connected: \"{}\"", pad.index, pad.id);
                self.tables.reset_pad(&PadId::Slot(pad.index));
                self.registry
                    .emit_connect(pad.index, &pad.id, pad.buttons.len(), pad.axes.len());
            }
            ConnectionChange::Disconnected(pad) => {
                info!("Gamepad {} disconnected", pad.index);
                self.tables.reset_pad(&PadId::Slot(pad.index));
                self.registry
                    .emit_disconnect(pad.index, &pad.id, pad.buttons.len(), pad.axes.len());
            }
        }
    }

    fn on_frame(&mut self) {
        if self.host_handles_gamepad {
            return;
        }

        self.frames.begin_frame();

        if self.registry.is_idle() {
            return;
        }

        for snapshot in self.source.snapshots() {
            if !snapshot.connected {
                continue;
            }
            self.poll_pad(PadId::Slot(snapshot.index), &snapshot, None);
        }

        let vr_pads: Vec<(Hand, GamepadSnapshot)> = match &self.vr_session {
            Some(session) => session
                .input_sources()
                .into_iter()
                .filter_map(|source| match (source.hand, source.gamepad) {
                    (Some(hand), Some(gamepad)) => Some((hand, gamepad)),
                    _ => None,
                })
                .collect(),
            None => Vec::new(),
        };

        for (hand, snapshot) in vr_pads {
            self.poll_pad(PadId::for_hand(hand), &snapshot, Some(hand));
        }
    }

    fn poll_pad(&mut self, pad: PadId, snapshot: &GamepadSnapshot, hand: Option<Hand>) {
        for signal in diff_snapshot(&mut self.tables, &pad, snapshot, hand) {
            match signal {
                PadSignal::Down(raw) => {
                    trace!("Pad {} down {}", pad, raw);
                    self.report_down(&pad, raw);
                }
                PadSignal::Up(raw) => {
                    trace!("Pad {} up {}", pad, raw);
                    self.report_up(&pad, raw);
                }
                PadSignal::Velocity { axis, value } => self.report_velocity(&pad, axis, value),
            }
        }
    }
}
