//! Test doubles for the helper's collaborators
//!
//! Every fake is a cheap handle over shared state, so a test can keep a
//! clone for inspection after boxing the other into the helper.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{HelperError, Result};
use crate::host::PlatformBridge;
use crate::input::source::{
    ConnectionChange, GamepadSnapshot, GamepadSource, RumbleEffect, VrInputSource, VrSession,
};
use crate::input::vocabulary::RawButton;
use crate::input::{PadId, PadReporter};
use crate::nav::{
    ComputedStyle, ElementId, ElementKind, HighlightClass, OverlayDialog, Rect, ScrollBehavior,
    UiTree,
};
use crate::touch::{ButtonVisual, PadSurface, StickVisual};

// ---------------------------------------------------------------------------
// UI tree

/// Side effect recorded by [`FakeUi`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    Click(ElementId),
    PointerPress(ElementId),
    Focus(ElementId),
    Blur(ElementId),
    Scroll(ElementId, ScrollBehavior),
    SetRange(ElementId, i64),
}

#[derive(Debug)]
struct Node {
    parent: Option<ElementId>,
    selectable: bool,
    rect: Rect,
    style: ComputedStyle,
    kind: ElementKind,
    classes: HashSet<HighlightClass>,
}

#[derive(Debug, Default)]
struct UiState {
    /// Document order
    nodes: Vec<(ElementId, Node)>,
    overlay_root: Option<ElementId>,
    actions: Vec<UiAction>,
}

impl UiState {
    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.iter().find(|(el, _)| *el == id).map(|(_, n)| n)
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|(el, _)| *el == id).map(|(_, n)| n)
    }

    fn is_descendant(&self, mut id: ElementId, ancestor: ElementId) -> bool {
        while let Some(parent) = self.node(id).and_then(|n| n.parent) {
            if parent == ancestor {
                return true;
            }
            id = parent;
        }
        false
    }
}

/// In-memory element tree
#[derive(Debug, Clone, Default)]
pub struct FakeUi {
    state: Arc<Mutex<UiState>>,
}

impl FakeUi {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, parent: Option<ElementId>, rect: Rect, selectable: bool) -> ElementId {
        let mut state = self.state.lock();
        let id = ElementId(state.nodes.len() as u64 + 1);
        state.nodes.push((
            id,
            Node {
                parent,
                selectable,
                rect,
                style: ComputedStyle::visible(),
                kind: ElementKind::Other,
                classes: HashSet::new(),
            },
        ));
        id
    }

    pub fn add_container(&mut self, parent: Option<ElementId>) -> ElementId {
        self.add(parent, Rect::default(), false)
    }

    pub fn add_selectable(&mut self, parent: Option<ElementId>, rect: Rect) -> ElementId {
        self.add(parent, rect, true)
    }

    pub fn set_style(&mut self, id: ElementId, style: ComputedStyle) {
        if let Some(node) = self.state.lock().node_mut(id) {
            node.style = style;
        }
    }

    pub fn set_kind(&mut self, id: ElementId, kind: ElementKind) {
        if let Some(node) = self.state.lock().node_mut(id) {
            node.kind = kind;
        }
    }

    pub fn open_overlay(&mut self, root: ElementId) {
        self.state.lock().overlay_root = Some(root);
    }

    pub fn close_overlay(&mut self) {
        self.state.lock().overlay_root = None;
    }

    pub fn has_class(&self, id: ElementId, class: HighlightClass) -> bool {
        self.state.lock().node(id).is_some_and(|n| n.classes.contains(&class))
    }

    pub fn range_value(&self, id: ElementId) -> Option<i64> {
        match self.state.lock().node(id).map(|n| n.kind) {
            Some(ElementKind::Range { value, .. }) => Some(value),
            _ => None,
        }
    }

    pub fn actions(&self) -> Vec<UiAction> {
        self.state.lock().actions.clone()
    }

    fn record(&mut self, action: UiAction) {
        self.state.lock().actions.push(action);
    }
}

impl UiTree for FakeUi {
    fn open_overlay_root(&self) -> Option<ElementId> {
        self.state.lock().overlay_root
    }

    fn selectable_elements(&self, scope: Option<ElementId>) -> Vec<ElementId> {
        let state = self.state.lock();
        state
            .nodes
            .iter()
            .filter(|(_, n)| n.selectable)
            .filter(|(id, _)| scope.map_or(true, |root| state.is_descendant(*id, root)))
            .map(|(id, _)| *id)
            .collect()
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.state.lock().node(element).and_then(|n| n.parent)
    }

    fn computed_style(&self, element: ElementId) -> ComputedStyle {
        self.state
            .lock()
            .node(element)
            .map(|n| n.style)
            .unwrap_or_else(ComputedStyle::visible)
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.state.lock().node(element).map(|n| n.rect).unwrap_or_default()
    }

    fn kind(&self, element: ElementId) -> ElementKind {
        self.state.lock().node(element).map_or(ElementKind::Other, |n| n.kind)
    }

    fn elements_with_class(&self, class: HighlightClass) -> Vec<ElementId> {
        self.state
            .lock()
            .nodes
            .iter()
            .filter(|(_, n)| n.classes.contains(&class))
            .map(|(id, _)| *id)
            .collect()
    }

    fn set_class(&mut self, element: ElementId, class: HighlightClass, enabled: bool) {
        if let Some(node) = self.state.lock().node_mut(element) {
            if enabled {
                node.classes.insert(class);
            } else {
                node.classes.remove(&class);
            }
        }
    }

    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior) {
        self.record(UiAction::Scroll(element, behavior));
    }

    fn click(&mut self, element: ElementId) {
        self.record(UiAction::Click(element));
    }

    fn pointer_press(&mut self, element: ElementId) {
        self.record(UiAction::PointerPress(element));
    }

    fn focus(&mut self, element: ElementId) {
        self.record(UiAction::Focus(element));
    }

    fn blur(&mut self, element: ElementId) {
        self.record(UiAction::Blur(element));
    }

    fn set_range_value(&mut self, element: ElementId, value: i64) {
        if let Some(node) = self.state.lock().node_mut(element) {
            if let ElementKind::Range { value: current, .. } = &mut node.kind {
                *current = value;
            }
        }
        self.record(UiAction::SetRange(element, value));
    }
}

// ---------------------------------------------------------------------------
// Overlay and platform

#[derive(Debug, Clone, Default)]
pub struct FakeOverlay {
    dismissed: Arc<Mutex<usize>>,
}

impl FakeOverlay {
    pub fn dismissed(&self) -> usize {
        *self.dismissed.lock()
    }
}

impl OverlayDialog for FakeOverlay {
    fn dismiss_dialog_window(&mut self) {
        *self.dismissed.lock() += 1;
    }
}

#[derive(Debug, Default)]
struct PlatformState {
    host_handles_gamepad: bool,
    user_agent: Option<String>,
    supports_vibration: bool,
    keyboard_requests: usize,
    vibrations: Vec<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct FakePlatform {
    state: Arc<Mutex<PlatformState>>,
}

impl FakePlatform {
    pub fn host_polling() -> Self {
        let platform = Self::default();
        platform.state.lock().host_handles_gamepad = true;
        platform
    }

    pub fn with_user_agent(self, ua: &str) -> Self {
        self.state.lock().user_agent = Some(ua.to_string());
        self
    }

    pub fn with_vibration(self) -> Self {
        self.state.lock().supports_vibration = true;
        self
    }

    pub fn keyboard_requests(&self) -> usize {
        self.state.lock().keyboard_requests
    }

    pub fn vibrations(&self) -> Vec<u32> {
        self.state.lock().vibrations.clone()
    }
}

impl PlatformBridge for FakePlatform {
    fn host_handles_gamepad(&self) -> bool {
        self.state.lock().host_handles_gamepad
    }

    fn user_agent(&self) -> Option<String> {
        self.state.lock().user_agent.clone()
    }

    fn force_open_keyboard(&mut self) {
        self.state.lock().keyboard_requests += 1;
    }

    fn vibrate(&mut self, duration_ms: u32) -> bool {
        let mut state = self.state.lock();
        if state.supports_vibration {
            state.vibrations.push(duration_ms);
        }
        state.supports_vibration
    }
}

// ---------------------------------------------------------------------------
// Gamepads and VR

#[derive(Debug, Default)]
struct SourceState {
    pads: HashMap<u32, GamepadSnapshot>,
    changes: Vec<ConnectionChange>,
    rumbles: Vec<(u32, RumbleEffect)>,
    rumble_fails: bool,
    reads: usize,
}

/// Scriptable gamepad source
#[derive(Debug, Clone, Default)]
pub struct FakeSource {
    state: Arc<Mutex<SourceState>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the snapshot for `snapshot.index`
    pub fn set_pad(&self, snapshot: GamepadSnapshot) {
        self.state.lock().pads.insert(snapshot.index, snapshot);
    }

    /// Mutate a stored snapshot in place
    pub fn update_pad(&self, index: u32, f: impl FnOnce(&mut GamepadSnapshot)) {
        if let Some(pad) = self.state.lock().pads.get_mut(&index) {
            f(pad);
        }
    }

    pub fn push_change(&self, change: ConnectionChange) {
        self.state.lock().changes.push(change);
    }

    pub fn fail_rumble(&self) {
        self.state.lock().rumble_fails = true;
    }

    pub fn rumbles(&self) -> Vec<(u32, RumbleEffect)> {
        self.state.lock().rumbles.clone()
    }

    /// How many times snapshots were read
    pub fn reads(&self) -> usize {
        self.state.lock().reads
    }
}

impl GamepadSource for FakeSource {
    fn snapshots(&mut self) -> Vec<GamepadSnapshot> {
        let mut state = self.state.lock();
        state.reads += 1;
        let mut pads: Vec<_> = state.pads.values().cloned().collect();
        pads.sort_by_key(|p| p.index);
        pads
    }

    fn connection_changes(&mut self) -> Vec<ConnectionChange> {
        std::mem::take(&mut self.state.lock().changes)
    }

    fn play_dual_rumble(&mut self, index: u32, effect: RumbleEffect) -> Result<bool> {
        let mut state = self.state.lock();
        let has_rumble = state.pads.get(&index).is_some_and(|p| p.has_rumble);
        if !has_rumble {
            return Ok(false);
        }
        if state.rumble_fails {
            return Err(HelperError::ForceFeedback {
                index,
                reason: "effect upload rejected".into(),
            });
        }
        state.rumbles.push((index, effect));
        Ok(true)
    }
}

/// VR session with scriptable input sources
#[derive(Debug, Clone, Default)]
pub struct FakeVr {
    sources: Arc<Mutex<Vec<VrInputSource>>>,
}

impl FakeVr {
    pub fn set_sources(&self, sources: Vec<VrInputSource>) {
        *self.sources.lock() = sources;
    }
}

impl VrSession for FakeVr {
    fn input_sources(&self) -> Vec<VrInputSource> {
        self.sources.lock().clone()
    }
}

// ---------------------------------------------------------------------------
// Touch pad

/// Raw report captured by [`RecordingReporter`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reported {
    Down(RawButton),
    Up(RawButton),
    Velocity(u32, f32),
}

/// Reporter that records everything, without change detection
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub reports: Vec<Reported>,
}

impl PadReporter for RecordingReporter {
    fn report_down(&mut self, _pad: &PadId, raw: RawButton) {
        self.reports.push(Reported::Down(raw));
    }

    fn report_up(&mut self, _pad: &PadId, raw: RawButton) {
        self.reports.push(Reported::Up(raw));
    }

    fn report_velocity(&mut self, _pad: &PadId, axis: u32, value: f32) {
        self.reports.push(Reported::Velocity(axis, value));
    }
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    pub size: Option<(u32, u32)>,
    pub resized: Vec<(u32, u32)>,
    pub sticks: Vec<StickVisual>,
    pub buttons: Vec<ButtonVisual>,
}

impl FakeSurface {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            size: Some((width, height)),
            ..Default::default()
        }
    }

    pub fn clear(&mut self) {
        self.resized.clear();
        self.sticks.clear();
        self.buttons.clear();
    }
}

impl PadSurface for FakeSurface {
    fn host_size(&self) -> Option<(u32, u32)> {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resized.push((width, height));
    }

    fn draw_stick(&mut self, stick: &StickVisual) {
        self.sticks.push(stick.clone());
    }

    fn draw_button(&mut self, button: &ButtonVisual) {
        self.buttons.push(button.clone());
    }
}
