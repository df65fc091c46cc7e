//! UI tree collaborator
//!
//! The navigator works on opaque [`ElementId`]s and asks the host UI for
//! everything else: selectable elements in document order, bounding
//! rectangles, computed visibility, class toggles and activation.

use std::fmt;

use super::ScrollBehavior;

/// Opaque handle to a host UI element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned bounding rectangle in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// The slice of computed style visibility depends on
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComputedStyle {
    /// `display: none`
    pub display_none: bool,
    /// `visibility: hidden`
    pub visibility_hidden: bool,
    pub opacity: f32,
}

impl ComputedStyle {
    pub fn visible() -> Self {
        Self {
            display_none: false,
            visibility_hidden: false,
            opacity: 1.0,
        }
    }

    /// Whether this element alone hides its subtree
    pub fn hides(&self) -> bool {
        self.display_none || self.visibility_hidden || self.opacity == 0.0
    }
}

/// What activating an element has to do beyond a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `input`/`textarea`: needs focus and the on-screen keyboard
    TextInput,
    /// `input type=range`
    Range { value: i64, min: i64, max: i64 },
    /// Overlay popup menu entry, activated with a pointer press
    PopupMenuItem,
    Other,
}

/// Highlight markers the navigator toggles on elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightClass {
    /// Main-UI highlight (`gamepadHighlighted`)
    Main,
    /// Overlay highlight (`adlGamepadSelected`)
    Overlay,
}

impl HighlightClass {
    pub fn class_name(self) -> &'static str {
        match self {
            HighlightClass::Main => "gamepadHighlighted",
            HighlightClass::Overlay => "adlGamepadSelected",
        }
    }
}

/// Host UI operations used by navigation
pub trait UiTree {
    /// Root of the modal overlay while it is displayed
    fn open_overlay_root(&self) -> Option<ElementId>;

    /// Selectable elements under `scope` (whole document for `None`), in document order
    fn selectable_elements(&self, scope: Option<ElementId>) -> Vec<ElementId>;

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    fn computed_style(&self, element: ElementId) -> ComputedStyle;

    fn bounding_rect(&self, element: ElementId) -> Rect;

    fn kind(&self, element: ElementId) -> ElementKind;

    /// Elements currently carrying `class`, in document order
    fn elements_with_class(&self, class: HighlightClass) -> Vec<ElementId>;

    fn set_class(&mut self, element: ElementId, class: HighlightClass, enabled: bool);

    /// Scroll so the element sits in the centre of the view
    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior);

    fn click(&mut self, element: ElementId);

    /// Synthetic pointer-down followed by pointer-up
    fn pointer_press(&mut self, element: ElementId);

    fn focus(&mut self, element: ElementId);

    fn blur(&mut self, element: ElementId);

    /// Set a range input's value and fire its input and change notifications
    fn set_range_value(&mut self, element: ElementId, value: i64);

    fn is_overlay_open(&self) -> bool {
        self.open_overlay_root().is_some()
    }
}

/// UI with no elements, for headless hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyUi;

impl UiTree for EmptyUi {
    fn open_overlay_root(&self) -> Option<ElementId> {
        None
    }

    fn selectable_elements(&self, _scope: Option<ElementId>) -> Vec<ElementId> {
        Vec::new()
    }

    fn parent(&self, _element: ElementId) -> Option<ElementId> {
        None
    }

    fn computed_style(&self, _element: ElementId) -> ComputedStyle {
        ComputedStyle::visible()
    }

    fn bounding_rect(&self, _element: ElementId) -> Rect {
        Rect::default()
    }

    fn kind(&self, _element: ElementId) -> ElementKind {
        ElementKind::Other
    }

    fn elements_with_class(&self, _class: HighlightClass) -> Vec<ElementId> {
        Vec::new()
    }

    fn set_class(&mut self, _element: ElementId, _class: HighlightClass, _enabled: bool) {}

    fn scroll_into_view(&mut self, _element: ElementId, _behavior: ScrollBehavior) {}

    fn click(&mut self, _element: ElementId) {}

    fn pointer_press(&mut self, _element: ElementId) {}

    fn focus(&mut self, _element: ElementId) {}

    fn blur(&mut self, _element: ElementId) {}

    fn set_range_value(&mut self, _element: ElementId, _value: i64) {}
}

/// Modal overlay ("ADL") collaborator
pub trait OverlayDialog {
    /// Close the topmost dialog window
    fn dismiss_dialog_window(&mut self);
}
