//! On-screen touch pad
//!
//! A virtual pad turns touches on its canvas into the same canonical events
//! physical pads produce. Circular buttons report a standard button index
//! (or run a custom callback); touches elsewhere drive a floating stick
//! anchored where the finger went down.
//!
//! Button hit-zones are laid out by [`VirtualPad::render`], so a button can
//! only be hit once the pad has been rendered at least once.

use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

use super::surface::{
    decode_glyph, ButtonVisual, Circle, GlyphVisual, PadSurface, StickVisual, DEFAULT_FILL,
    DEFAULT_GLYPH_COLOR, DEFAULT_STROKE, GLYPH_OUTLINE, KNOB_FILL,
};
use crate::config::{TouchButtonConfig, VirtualPadConfig};
use crate::input::vocabulary::RawButton;
use crate::input::{PadId, PadReporter};

/// Button radius when none is configured
pub const DEFAULT_BUTTON_RADIUS: f32 = 24.0;

/// Stick radius used when the configured one is unusable
pub const DEFAULT_STICK_RADIUS: f32 = 80.0;

/// Knob radius as a fraction of the stick radius
const KNOB_SCALE: f32 = 0.3;

/// Custom button callback
pub type TouchCallback = Arc<dyn Fn() + Send + Sync>;

/// Observer for every pointer event on the pad
pub type PointerHook = Arc<dyn Fn(&PointerEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Touch,
    Mouse,
}

/// Pointer event in pad-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn touch(id: u64, x: f32, y: f32) -> Self {
        Self { id, x, y, kind: PointerKind::Touch }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stick {
    Left,
    Right,
}

impl Stick {
    /// (y axis, x axis) indices; y is always reported first
    fn axes(self) -> (u32, u32) {
        match self {
            Stick::Left => (1, 0),
            Stick::Right => (3, 2),
        }
    }
}

/// A finger driving a stick
#[derive(Debug, Clone, Copy, PartialEq)]
struct StickTrack {
    pointer: u64,
    anchor: (f32, f32),
    current: (f32, f32),
}

/// Runtime state of one configured button
#[derive(Clone)]
pub struct TouchButton {
    config: TouchButtonConfig,
    on_press: Option<TouchCallback>,
    on_release: Option<TouchCallback>,
    /// Hit-zone centre from the last layout
    center: Option<(f32, f32)>,
    radius: f32,
    pressed_by: Option<u64>,
}

impl TouchButton {
    fn new(config: TouchButtonConfig) -> Self {
        let radius = usable_radius(config.radius, DEFAULT_BUTTON_RADIUS);
        Self {
            config,
            on_press: None,
            on_release: None,
            center: None,
            radius,
            pressed_by: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_by.is_some()
    }

    pub fn center(&self) -> Option<(f32, f32)> {
        self.center
    }

    fn hit(&self, x: f32, y: f32) -> bool {
        self.center
            .is_some_and(|(cx, cy)| ((x - cx).powi(2) + (y - cy).powi(2)).sqrt() < self.radius)
    }
}

impl fmt::Debug for TouchButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchButton")
            .field("button", &self.config.button)
            .field("custom", &self.on_press.is_some())
            .field("center", &self.center)
            .field("radius", &self.radius)
            .field("pressed_by", &self.pressed_by)
            .finish()
    }
}

/// Centre of a button laid out inside a `width` x `height` pad
///
/// Anchors are offsets from the named edge to the button's edge; a right or
/// bottom anchor wins over left or top. Unanchored axes sit at 0.
pub fn layout_button(config: &TouchButtonConfig, width: f32, height: f32) -> ((f32, f32), f32) {
    let radius = usable_radius(config.radius, DEFAULT_BUTTON_RADIUS);

    let mut x = 0.0;
    if let Some(left) = config.left {
        x = left + radius;
    }
    if let Some(right) = config.right {
        x = width - right - radius;
    }

    let mut y = 0.0;
    if let Some(top) = config.top {
        y = top + radius;
    }
    if let Some(bottom) = config.bottom {
        y = height - bottom - radius;
    }

    ((x, y), radius)
}

/// Finite positive radius, else `fallback`
fn usable_radius(radius: Option<f32>, fallback: f32) -> f32 {
    radius.filter(|r| r.is_finite() && *r > 0.0).unwrap_or(fallback)
}

/// Touch-driven pad instance
pub struct VirtualPad {
    id: PadId,
    left_stick: bool,
    right_stick: bool,
    radius: f32,
    no_render: bool,
    buttons: Vec<TouchButton>,
    left: Option<StickTrack>,
    right: Option<StickTrack>,
    size: (u32, u32),
    down_hook: Option<PointerHook>,
    move_hook: Option<PointerHook>,
    up_hook: Option<PointerHook>,
}

impl VirtualPad {
    pub fn new(id: impl Into<String>, config: &VirtualPadConfig) -> Self {
        let radius = usable_radius(Some(config.touchstick_radius), DEFAULT_STICK_RADIUS);
        if radius != config.touchstick_radius {
            warn!(
                "Touch stick radius {} is not usable, falling back to {}",
                config.touchstick_radius, radius
            );
        }

        Self {
            id: PadId::Virtual(id.into()),
            left_stick: config.left_stick,
            right_stick: config.right_stick,
            radius,
            no_render: config.no_render,
            buttons: config.buttons.iter().cloned().map(TouchButton::new).collect(),
            left: None,
            right: None,
            size: (0, 0),
            down_hook: None,
            move_hook: None,
            up_hook: None,
        }
    }

    pub fn id(&self) -> &PadId {
        &self.id
    }

    pub fn buttons(&self) -> &[TouchButton] {
        &self.buttons
    }

    /// Replace button `index`'s pad report with custom callbacks
    ///
    /// Out-of-range indices are ignored.
    pub fn set_button_callbacks(
        &mut self,
        index: usize,
        on_press: TouchCallback,
        on_release: Option<TouchCallback>,
    ) {
        if let Some(button) = self.buttons.get_mut(index) {
            button.on_press = Some(on_press);
            button.on_release = on_release;
        }
    }

    pub fn on_pointer_down(&mut self, hook: PointerHook) {
        self.down_hook = Some(hook);
    }

    pub fn on_pointer_move(&mut self, hook: PointerHook) {
        self.move_hook = Some(hook);
    }

    pub fn on_pointer_up(&mut self, hook: PointerHook) {
        self.up_hook = Some(hook);
    }

    pub fn is_tracking(&self, stick: Stick) -> bool {
        self.track(stick).is_some()
    }

    fn track(&self, stick: Stick) -> Option<&StickTrack> {
        match stick {
            Stick::Left => self.left.as_ref(),
            Stick::Right => self.right.as_ref(),
        }
    }

    fn enabled(&self, stick: Stick) -> bool {
        match stick {
            Stick::Left => self.left_stick,
            Stick::Right => self.right_stick,
        }
    }

    fn slot(&mut self, stick: Stick) -> &mut Option<StickTrack> {
        match stick {
            Stick::Left => &mut self.left,
            Stick::Right => &mut self.right,
        }
    }

    /// Stick a new touch at `x` should drive, if any
    fn pick_stick(&self, x: f32) -> Option<Stick> {
        if !self.left_stick && !self.right_stick {
            return None;
        }
        if self.right_stick && (!self.left_stick || x > self.size.0 as f32 / 2.0) {
            return Some(Stick::Right);
        }
        Some(Stick::Left)
    }

    /// Report normalised displacement for a tracked stick, y before x
    fn report_stick(&self, stick: Stick, reporter: &mut dyn PadReporter) {
        if !self.enabled(stick) {
            return;
        }
        let Some(track) = self.track(stick) else {
            return;
        };

        let r = self.radius;
        let dx = (track.current.0 - track.anchor.0).clamp(-r, r);
        let dy = (track.current.1 - track.anchor.1).clamp(-r, r);

        let (y_axis, x_axis) = stick.axes();
        reporter.report_velocity(&self.id, y_axis, dy / r);
        reporter.report_velocity(&self.id, x_axis, dx / r);
    }

    pub fn pointer_down(&mut self, event: &PointerEvent, reporter: &mut dyn PadReporter) {
        if let Some(hook) = &self.down_hook {
            hook(event);
        }
        if event.kind != PointerKind::Touch {
            return;
        }

        for button in self.buttons.iter_mut() {
            if !button.hit(event.x, event.y) {
                continue;
            }
            button.pressed_by = Some(event.id);

            if let Some(on_press) = &button.on_press {
                on_press();
                return;
            }
            if let Some(index) = button.config.button {
                reporter.report_down(&self.id, RawButton::Index(index));
                return;
            }
        }

        let Some(stick) = self.pick_stick(event.x) else {
            return;
        };
        trace!("Pointer {} anchors {:?} stick on {}", event.id, stick, self.id);
        *self.slot(stick) = Some(StickTrack {
            pointer: event.id,
            anchor: (event.x, event.y),
            current: (event.x, event.y),
        });
        self.report_stick(stick, reporter);
    }

    pub fn pointer_move(&mut self, event: &PointerEvent, reporter: &mut dyn PadReporter) {
        if let Some(hook) = &self.move_hook {
            hook(event);
        }
        if event.kind != PointerKind::Touch {
            return;
        }

        for stick in [Stick::Left, Stick::Right] {
            if !self.enabled(stick) {
                continue;
            }
            if let Some(track) = self.slot(stick) {
                if track.pointer == event.id {
                    track.current = (event.x, event.y);
                    self.report_stick(stick, reporter);
                }
            }
        }
    }

    pub fn pointer_up(&mut self, event: &PointerEvent, reporter: &mut dyn PadReporter) {
        if let Some(hook) = &self.up_hook {
            hook(event);
        }
        if event.kind != PointerKind::Touch {
            return;
        }

        for button in self.buttons.iter_mut() {
            if button.pressed_by != Some(event.id) {
                continue;
            }
            button.pressed_by = None;

            if let Some(on_release) = &button.on_release {
                on_release();
                return;
            }
            if let Some(index) = button.config.button {
                reporter.report_up(&self.id, RawButton::Index(index));
                return;
            }
        }

        for stick in [Stick::Left, Stick::Right] {
            if !self.enabled(stick) {
                continue;
            }
            let slot = self.slot(stick);
            if slot.is_some_and(|t| t.pointer == event.id) {
                *slot = None;
                let (y_axis, x_axis) = stick.axes();
                reporter.report_velocity(&self.id, y_axis, 0.0);
                reporter.report_velocity(&self.id, x_axis, 0.0);
            }
        }
    }

    /// Lay out and draw the pad
    ///
    /// Safe to call every frame. Does nothing while the host has no size;
    /// in `no_render` mode only the layout is updated.
    pub fn render(&mut self, surface: &mut dyn PadSurface) {
        let Some((width, height)) = surface.host_size() else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }

        surface.resize(width, height);
        self.size = (width, height);

        for button in self.buttons.iter_mut() {
            let (center, radius) = layout_button(&button.config, width as f32, height as f32);
            button.center = Some(center);
            button.radius = radius;
        }

        if self.no_render {
            return;
        }

        for stick in [Stick::Left, Stick::Right] {
            if !self.enabled(stick) {
                continue;
            }
            if let Some(track) = self.track(stick) {
                surface.draw_stick(&StickVisual {
                    ring: Circle { x: track.anchor.0, y: track.anchor.1, radius: self.radius },
                    knob: Circle {
                        x: track.current.0,
                        y: track.current.1,
                        radius: (self.radius * KNOB_SCALE).ceil(),
                    },
                    stroke: DEFAULT_STROKE,
                    knob_fill: KNOB_FILL,
                });
            }
        }

        for button in &self.buttons {
            let Some((x, y)) = button.center else {
                continue;
            };
            let config = &button.config;

            let glyph = config.glyph.as_deref().and_then(decode_glyph).map(|glyph| GlyphVisual {
                glyph,
                font_px: (button.radius * 0.75).round() as u32,
                color: config.glyph_color.clone().unwrap_or_else(|| DEFAULT_GLYPH_COLOR.to_string()),
                outline: GLYPH_OUTLINE,
            });

            surface.draw_button(&ButtonVisual {
                circle: Circle { x, y, radius: button.radius },
                fill: config.fill.clone().unwrap_or_else(|| DEFAULT_FILL.to_string()),
                stroke: config.stroke.clone().unwrap_or_else(|| DEFAULT_STROKE.to_string()),
                glyph,
            });
        }
    }
}

impl fmt::Debug for VirtualPad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualPad")
            .field("id", &self.id)
            .field("left_stick", &self.left_stick)
            .field("right_stick", &self.right_stick)
            .field("radius", &self.radius)
            .field("buttons", &self.buttons)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeSurface, RecordingReporter, Reported};
    use parking_lot::Mutex;

    fn pad(config: VirtualPadConfig) -> VirtualPad {
        VirtualPad::new("virtPad.1", &config)
    }

    fn rendered(config: VirtualPadConfig) -> VirtualPad {
        let mut pad = pad(config);
        pad.render(&mut FakeSurface::sized(800, 400));
        pad
    }

    fn vel(axis: u32, value: f32) -> Reported {
        Reported::Velocity(axis, value)
    }

    #[test]
    fn test_layout_from_anchors() {
        let config = TouchButtonConfig {
            right: Some(20.0),
            bottom: Some(10.0),
            radius: Some(30.0),
            ..Default::default()
        };
        assert_eq!(layout_button(&config, 800.0, 400.0), ((750.0, 360.0), 30.0));

        let config = TouchButtonConfig {
            left: Some(5.0),
            top: Some(5.0),
            ..Default::default()
        };
        assert_eq!(layout_button(&config, 800.0, 400.0), ((29.0, 29.0), 24.0));
    }

    #[test]
    fn test_stick_velocity_clamps_to_unit() {
        let mut pad = rendered(VirtualPadConfig::default());
        let mut reporter = RecordingReporter::default();

        pad.pointer_down(&PointerEvent::touch(1, 100.0, 200.0), &mut reporter);
        pad.pointer_move(&PointerEvent::touch(1, 400.0, 40.0), &mut reporter);
        pad.pointer_move(&PointerEvent::touch(1, 140.0, 200.0), &mut reporter);

        assert_eq!(
            reporter.reports,
            vec![vel(1, 0.0), vel(0, 0.0), vel(1, -1.0), vel(0, 1.0), vel(1, 0.0), vel(0, 0.5)]
        );
    }

    #[test]
    fn test_release_resets_stick() {
        let mut pad = rendered(VirtualPadConfig::default());
        let mut reporter = RecordingReporter::default();

        pad.pointer_down(&PointerEvent::touch(7, 600.0, 200.0), &mut reporter);
        assert!(pad.is_tracking(Stick::Right));
        pad.pointer_move(&PointerEvent::touch(7, 620.0, 220.0), &mut reporter);
        reporter.reports.clear();

        pad.pointer_up(&PointerEvent::touch(7, 620.0, 220.0), &mut reporter);
        assert!(!pad.is_tracking(Stick::Right));
        assert_eq!(reporter.reports, vec![vel(3, 0.0), vel(2, 0.0)]);
    }

    #[test]
    fn test_stick_selection() {
        let mut reporter = RecordingReporter::default();

        let mut both = rendered(VirtualPadConfig::default());
        both.pointer_down(&PointerEvent::touch(1, 100.0, 10.0), &mut reporter);
        both.pointer_down(&PointerEvent::touch(2, 700.0, 10.0), &mut reporter);
        assert!(both.is_tracking(Stick::Left));
        assert!(both.is_tracking(Stick::Right));

        let mut right_only = rendered(VirtualPadConfig { left_stick: false, ..Default::default() });
        right_only.pointer_down(&PointerEvent::touch(1, 100.0, 10.0), &mut reporter);
        assert!(right_only.is_tracking(Stick::Right));

        let mut left_only = rendered(VirtualPadConfig { right_stick: false, ..Default::default() });
        left_only.pointer_down(&PointerEvent::touch(1, 700.0, 10.0), &mut reporter);
        assert!(left_only.is_tracking(Stick::Left));

        let mut none = rendered(VirtualPadConfig {
            left_stick: false,
            right_stick: false,
            ..Default::default()
        });
        none.pointer_down(&PointerEvent::touch(1, 700.0, 10.0), &mut reporter);
        assert!(!none.is_tracking(Stick::Left) && !none.is_tracking(Stick::Right));
    }

    #[test]
    fn test_button_reports_standard_index() {
        let config = VirtualPadConfig {
            buttons: vec![TouchButtonConfig {
                right: Some(0.0),
                bottom: Some(0.0),
                button: Some(0),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut pad = rendered(config);
        let mut reporter = RecordingReporter::default();

        // Centre at (776, 376)
        pad.pointer_down(&PointerEvent::touch(3, 770.0, 370.0), &mut reporter);
        assert!(pad.buttons()[0].is_pressed());
        // A second finger elsewhere drives a stick
        pad.pointer_down(&PointerEvent::touch(4, 100.0, 100.0), &mut reporter);
        pad.pointer_up(&PointerEvent::touch(3, 770.0, 370.0), &mut reporter);

        assert_eq!(
            reporter.reports,
            vec![
                Reported::Down(RawButton::Index(0)),
                vel(1, 0.0),
                vel(0, 0.0),
                Reported::Up(RawButton::Index(0)),
            ]
        );
        assert!(pad.is_tracking(Stick::Left));
    }

    #[test]
    fn test_button_needs_layout() {
        let config = VirtualPadConfig {
            right_stick: false,
            left_stick: false,
            buttons: vec![TouchButtonConfig { button: Some(1), ..Default::default() }],
            ..Default::default()
        };
        let mut pad = pad(config);
        let mut reporter = RecordingReporter::default();

        pad.pointer_down(&PointerEvent::touch(1, 10.0, 10.0), &mut reporter);
        assert!(reporter.reports.is_empty());
    }

    #[test]
    fn test_custom_callback_short_circuits() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let config = VirtualPadConfig {
            buttons: vec![TouchButtonConfig {
                left: Some(0.0),
                top: Some(0.0),
                button: Some(9),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut pad = rendered(config);
        let down_log = log.clone();
        let up_log = log.clone();
        pad.set_button_callbacks(
            0,
            Arc::new(move || down_log.lock().push("press")),
            Some(Arc::new(move || up_log.lock().push("release"))),
        );
        let mut reporter = RecordingReporter::default();

        pad.pointer_down(&PointerEvent::touch(1, 24.0, 24.0), &mut reporter);
        pad.pointer_up(&PointerEvent::touch(1, 24.0, 24.0), &mut reporter);

        assert_eq!(*log.lock(), vec!["press", "release"]);
        assert!(reporter.reports.is_empty());
    }

    #[test]
    fn test_hooks_see_mouse_but_mouse_drives_nothing() {
        let seen = Arc::new(Mutex::new(0));
        let mut pad = rendered(VirtualPadConfig::default());
        let counter = seen.clone();
        pad.on_pointer_down(Arc::new(move |_| *counter.lock() += 1));
        let mut reporter = RecordingReporter::default();

        let mouse = PointerEvent { id: 1, x: 10.0, y: 10.0, kind: PointerKind::Mouse };
        pad.pointer_down(&mouse, &mut reporter);

        assert_eq!(*seen.lock(), 1);
        assert!(!pad.is_tracking(Stick::Left));
        assert!(reporter.reports.is_empty());
    }

    #[test]
    fn test_render_draws_sticks_and_buttons() {
        let config = VirtualPadConfig {
            buttons: vec![TouchButtonConfig {
                left: Some(10.0),
                top: Some(10.0),
                radius: Some(40.0),
                glyph: Some("&#xE768;".into()),
                fill: Some("red".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut pad = pad(config);
        let mut surface = FakeSurface::sized(800, 400);
        let mut reporter = RecordingReporter::default();

        pad.render(&mut surface);
        pad.pointer_down(&PointerEvent::touch(5, 300.0, 300.0), &mut reporter);
        pad.pointer_move(&PointerEvent::touch(5, 310.0, 300.0), &mut reporter);
        surface.clear();
        pad.render(&mut surface);

        assert_eq!(surface.resized, vec![(800, 400)]);
        assert_eq!(surface.sticks.len(), 1);
        assert_eq!(surface.sticks[0].ring, Circle { x: 300.0, y: 300.0, radius: 80.0 });
        assert_eq!(surface.sticks[0].knob, Circle { x: 310.0, y: 300.0, radius: 24.0 });

        let button = &surface.buttons[0];
        assert_eq!(button.circle, Circle { x: 50.0, y: 50.0, radius: 40.0 });
        assert_eq!(button.fill, "red");
        assert_eq!(button.stroke, DEFAULT_STROKE);
        let glyph = button.glyph.as_ref().unwrap();
        assert_eq!(glyph.glyph, '\u{E768}');
        assert_eq!(glyph.font_px, 30);
        assert_eq!(glyph.color, DEFAULT_GLYPH_COLOR);
    }

    #[test]
    fn test_render_skips_zero_size_and_no_render() {
        let config = VirtualPadConfig {
            no_render: true,
            buttons: vec![TouchButtonConfig { left: Some(0.0), top: Some(0.0), ..Default::default() }],
            ..Default::default()
        };
        let mut pad = pad(config);

        let mut hidden = FakeSurface::sized(0, 300);
        pad.render(&mut hidden);
        assert!(hidden.resized.is_empty());
        assert_eq!(pad.buttons()[0].center(), None);

        let mut surface = FakeSurface::sized(200, 100);
        pad.render(&mut surface);
        assert_eq!(surface.resized, vec![(200, 100)]);
        assert!(surface.buttons.is_empty());
        assert_eq!(pad.buttons()[0].center(), Some((24.0, 24.0)));
    }
    #[test]
    fn test_unusable_radii_fall_back_to_defaults() {
        for bad in [-10.0, 0.0, f32::NAN, f32::INFINITY] {
            let mut pad = pad(VirtualPadConfig {
                touchstick_radius: bad,
                ..Default::default()
            });
            let mut reporter = RecordingReporter::default();

            pad.pointer_down(&PointerEvent::touch(1, 100.0, 100.0), &mut reporter);
            pad.pointer_move(&PointerEvent::touch(1, 140.0, 100.0), &mut reporter);

            assert_eq!(
                reporter.reports,
                vec![vel(3, 0.0), vel(2, 0.0), vel(3, 0.0), vel(2, 0.5)]
            );
        }

        let config = TouchButtonConfig {
            left: Some(0.0),
            top: Some(0.0),
            radius: Some(-5.0),
            ..Default::default()
        };
        assert_eq!(layout_button(&config, 800.0, 400.0), ((24.0, 24.0), 24.0));
    }
}
