//! GamepadHelper - the explicit input context
//!
//! One helper owns everything that used to be process-wide state:
//! - Listener registrations
//! - Per-pad held buttons and velocities
//! - Frame scheduling (normal, manual, host-delegated)
//! - The navigation highlight
//! - Collaborators: gamepad source, platform bridge, UI tree, overlay, VR session
//!
//! All work happens on the caller's thread. Callbacks run synchronously
//! inside dispatch and should return quickly.

mod dispatch;
mod frame;
mod navigation;


use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{PadnavConfig, VirtualPadConfig};
use crate::host::{AndroidTvMode, NoPlatform, PlatformBridge};
use crate::input::poller::FrameSchedule;
use crate::input::registry::{Listener, RegistrationId, Registry};
use crate::input::source::{GamepadSource, NoGamepads, RumbleEffect, VrSession};
use crate::input::state::PadTables;
use crate::nav::{EmptyUi, Navigator, OverlayDialog, ScrollBehavior, UiTree};
use crate::touch::VirtualPad;

/// Explicit context for pad input and directional navigation
pub struct GamepadHelper {
    /// Listener registrations
    pub(crate) registry: Registry,
    /// Held buttons and last velocities per pad
    pub(crate) tables: PadTables,
    /// Frame request state
    pub(crate) frames: FrameSchedule,
    /// Highlight state machine
    pub(crate) navigator: Navigator,
    pub(crate) source: Box<dyn GamepadSource>,
    pub(crate) platform: Box<dyn PlatformBridge>,
    pub(crate) ui: Box<dyn UiTree>,
    /// Modal overlay, if the host has one
    pub(crate) overlay: Option<Box<dyn OverlayDialog>>,
    pub(crate) vr_session: Option<Box<dyn VrSession>>,
    /// Deadline for the delayed table purge after a VR session change
    pub(crate) vr_purge_at: Option<Instant>,
    /// Platform polls pads itself; frame polling is passive
    pub(crate) host_handles_gamepad: bool,
    pub(crate) android_tv_mode: AndroidTvMode,
    pub(crate) running_on_android_tv: bool,
    /// Drop every event from the remote pad
    pub(crate) ignore_keyboard: bool,
    next_virtual_pad: u64,
}

impl GamepadHelper {
    /// Helper with no pads, no platform services and an empty UI
    pub fn new() -> Self {
        let mut helper = Self {
            registry: Registry::new(),
            tables: PadTables::new(),
            frames: FrameSchedule::new(),
            navigator: Navigator::new(),
            source: Box::new(NoGamepads),
            platform: Box::new(NoPlatform),
            ui: Box::new(EmptyUi),
            overlay: None,
            vr_session: None,
            vr_purge_at: None,
            host_handles_gamepad: false,
            android_tv_mode: AndroidTvMode::Auto,
            running_on_android_tv: false,
            ignore_keyboard: false,
            next_virtual_pad: 0,
        };
        helper.refresh_platform();
        helper
    }

    pub fn with_source(mut self, source: Box<dyn GamepadSource>) -> Self {
        self.source = source;
        self
    }

    /// Attach the platform bridge; host delegation and Android TV detection follow it
    pub fn with_platform(mut self, platform: Box<dyn PlatformBridge>) -> Self {
        self.platform = platform;
        self.refresh_platform();
        self
    }

    pub fn with_ui(mut self, ui: Box<dyn UiTree>) -> Self {
        self.ui = ui;
        self
    }

    pub fn with_overlay(mut self, overlay: Box<dyn OverlayDialog>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    fn refresh_platform(&mut self) {
        self.host_handles_gamepad = self.platform.host_handles_gamepad();
        if self.host_handles_gamepad {
            info!("Host platform handles gamepad polling");
        }
        self.refresh_android_tv();
    }

    fn refresh_android_tv(&mut self) {
        let user_agent = self.platform.user_agent();
        self.running_on_android_tv = self.android_tv_mode.resolve(user_agent.as_deref());
        debug!("Android TV remote handling: {}", self.running_on_android_tv);
    }

    /// Apply the runtime-adjustable parts of a configuration
    pub fn apply_config(&mut self, config: &PadnavConfig) {
        self.set_manual_polling(config.polling.manual);
        self.set_scroll_behavior(config.navigation.scroll_behavior);
        self.set_ignore_keyboard(config.remote.ignore_keyboard);
        self.set_android_tv_mode(config.remote.android_tv);
    }

    /// Add a listener; it receives every event from now on
    pub fn register(&mut self, listener: Listener) -> RegistrationId {
        self.registry.register(listener)
    }

    /// Remove a listener; unknown ids are ignored
    pub fn unregister(&mut self, id: RegistrationId) {
        self.registry.unregister(id);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Replace or remove the overlay collaborator
    pub fn set_overlay(&mut self, overlay: Option<Box<dyn OverlayDialog>>) {
        self.overlay = overlay;
    }

    pub fn set_ignore_keyboard(&mut self, ignore: bool) {
        self.ignore_keyboard = ignore;
    }

    pub fn ignores_keyboard(&self) -> bool {
        self.ignore_keyboard
    }

    pub fn set_android_tv_mode(&mut self, mode: AndroidTvMode) {
        self.android_tv_mode = mode;
        self.refresh_android_tv();
    }

    pub fn is_running_on_android_tv(&self) -> bool {
        self.running_on_android_tv
    }

    pub fn set_manual_polling(&mut self, manual: bool) {
        if manual != self.frames.is_manual() {
            debug!("Manual polling: {}", manual);
        }
        self.frames.set_manual(manual);
    }

    pub fn set_scroll_behavior(&mut self, behavior: ScrollBehavior) {
        self.navigator.set_scroll_behavior(behavior);
    }

    pub fn scroll_behavior(&self) -> ScrollBehavior {
        self.navigator.scroll_behavior()
    }

    /// Attach or clear the VR session
    ///
    /// Either way all per-pad tables are purged once the grace delay has
    /// passed, so frames already in flight never see half-cleared state.
    pub fn set_vr_session(&mut self, session: Option<Box<dyn VrSession>>) {
        info!("VR session {}", if session.is_some() { "attached" } else { "cleared" });
        self.vr_session = session;
        self.vr_purge_at = Some(Instant::now() + frame::VR_PURGE_DELAY);
    }

    /// Whether the modal overlay is currently displayed
    pub fn is_overlay_open(&self) -> bool {
        self.overlay.is_some() && self.ui.is_overlay_open()
    }

    /// Rumble a pad, falling back to platform vibration
    pub fn vibrate(&mut self, index: u32, duration_ms: u32) {
        match self.source.play_dual_rumble(index, RumbleEffect::full(duration_ms)) {
            Ok(true) => return,
            Ok(false) => {}
            Err(e) => warn!("Rumble failed: {}", e),
        }

        if !self.platform.vibrate(duration_ms) {
            debug!("No vibration available for pad {}", index);
        }
    }

    /// Create an on-screen pad with a fresh `virtPad.{n}` id
    pub fn create_virtual_pad(&mut self, config: &VirtualPadConfig) -> VirtualPad {
        self.next_virtual_pad += 1;
        let id = format!("virtPad.{}", self.next_virtual_pad);
        debug!("Created virtual pad {}", id);
        VirtualPad::new(id, config)
    }

    /// Drop all listeners, pad state, highlight and VR session
    pub fn teardown(&mut self) {
        for id in self.registry.ids() {
            self.registry.unregister(id);
        }
        self.tables.clear();
        self.navigator.reset();
        self.vr_session = None;
        self.vr_purge_at = None;
        info!("Gamepad helper torn down");
    }
}

impl Default for GamepadHelper {
    fn default() -> Self {
        Self::new()
    }
}
