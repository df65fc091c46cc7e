//! Highlight state machine for main-UI and overlay navigation
//!
//! The main-UI item and the overlay item are independent slots. While the
//! overlay holds an item it owns the visible highlight; once that item is
//! cleared the main-UI item is active again and navigation resumes from it.

use tracing::{debug, trace, warn};

use super::geometry::{is_visible, navigate, Direction};
use super::ui::{ElementId, ElementKind, HighlightClass, OverlayDialog, UiTree};
use super::ScrollBehavior;
use crate::host::PlatformBridge;
use crate::input::vocabulary::{convert_for_overlay_navigation, Button, ButtonName};

/// Active highlight: the overlay item if any, else the main-UI item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    /// Main-UI ("title") highlight
    Main(ElementId),
    /// Highlight inside the open overlay
    Overlay(ElementId),
}

impl Highlight {
    pub fn main(self) -> Option<ElementId> {
        match self {
            Highlight::Main(el) => Some(el),
            _ => None,
        }
    }

    pub fn overlay(self) -> Option<ElementId> {
        match self {
            Highlight::Overlay(el) => Some(el),
            _ => None,
        }
    }
}

/// Focus navigation driven by canonical button presses
#[derive(Debug, Default)]
pub struct Navigator {
    main_item: Option<ElementId>,
    overlay_item: Option<ElementId>,
    scroll_behavior: ScrollBehavior,
}

fn overlay_button(button: ButtonName) -> Option<Button> {
    convert_for_overlay_navigation(button).known()
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight(&self) -> Highlight {
        match (self.overlay_item, self.main_item) {
            (Some(el), _) => Highlight::Overlay(el),
            (None, Some(el)) => Highlight::Main(el),
            (None, None) => Highlight::None,
        }
    }

    /// Main-UI item, kept while the overlay owns the highlight
    pub fn main_item(&self) -> Option<ElementId> {
        self.main_item
    }

    pub fn scroll_behavior(&self) -> ScrollBehavior {
        self.scroll_behavior
    }

    pub fn set_scroll_behavior(&mut self, behavior: ScrollBehavior) {
        self.scroll_behavior = behavior;
    }

    /// Forget both items without touching the UI
    pub fn reset(&mut self) {
        self.main_item = None;
        self.overlay_item = None;
    }

    /// Main-UI navigation for a canonical button
    ///
    /// Directions move the highlight inside `scope`, or adjust a highlighted
    /// range input for left/right. `a` activates the highlighted element.
    ///
    /// # Returns
    /// Whether the button was consumed.
    pub fn handle_ui_selection(
        &mut self,
        ui: &mut dyn UiTree,
        platform: &mut dyn PlatformBridge,
        scope: Option<ElementId>,
        button: ButtonName,
    ) -> bool {
        let Some(button) = overlay_button(button) else {
            return false;
        };

        if let (Some(item), Button::Left | Button::Right) = (self.main_item, button) {
            if let ElementKind::Range { value, min, max } = ui.kind(item) {
                let next = if button == Button::Right {
                    (value + 1).min(max)
                } else {
                    (value - 1).max(min)
                };
                trace!("Range {} adjusted {} -> {}", item, value, next);
                ui.set_range_value(item, next);
                return true;
            }
        }

        if let Some(direction) = Direction::from_button(button) {
            let current = self.recover_main_item(ui);

            if let Some(item) = current {
                ui.blur(item);
            }
            let current = current.filter(|&item| is_visible(ui, item));

            if let Some(selected) = navigate(ui, direction, current, scope) {
                self.highlight_selected(ui, Some(selected), scope);
            }
            return true;
        }

        if button == Button::A {
            if let Some(item) = self.main_item {
                activate(ui, platform, item);
                return true;
            }
        }

        false
    }

    /// Current main-UI item, recovered from the highlight classes if unset
    fn recover_main_item(&mut self, ui: &dyn UiTree) -> Option<ElementId> {
        if let Some(item) = self.main_item {
            return Some(item);
        }

        let recovered = ui
            .elements_with_class(HighlightClass::Main)
            .into_iter()
            .next()
            .or_else(|| {
                ui.elements_with_class(HighlightClass::Overlay)
                    .into_iter()
                    .find(|&el| is_visible(ui, el))
            });

        if let Some(item) = recovered {
            debug!("Recovered highlighted element {}", item);
            self.main_item = Some(item);
        }
        recovered
    }

    /// Overlay navigation for a canonical button
    ///
    /// Directions move the overlay highlight, `a` activates and clears it,
    /// `b` clears it and dismisses the dialog.
    pub fn overlay_pad_down(
        &mut self,
        ui: &mut dyn UiTree,
        platform: &mut dyn PlatformBridge,
        overlay: Option<&mut dyn OverlayDialog>,
        button: ButtonName,
    ) {
        let Some(button) = overlay_button(button) else {
            trace!("Overlay ignored {}", button);
            return;
        };

        if let Some(direction) = Direction::from_button(button) {
            if let Some(root) = ui.open_overlay_root() {
                let current = self.overlay_item;
                if let Some(selected) = navigate(ui, direction, current, Some(root)) {
                    for el in ui.selectable_elements(None) {
                        ui.set_class(el, HighlightClass::Main, false);
                        ui.set_class(el, HighlightClass::Overlay, false);
                    }
                    ui.set_class(selected, HighlightClass::Overlay, true);
                    self.overlay_item = Some(selected);
                    ui.scroll_into_view(selected, self.scroll_behavior);
                }
            }
        }

        if button == Button::A {
            if let Some(item) = self.overlay_item {
                if ui.kind(item) == ElementKind::PopupMenuItem {
                    ui.pointer_press(item);
                } else {
                    activate(ui, platform, item);
                }
                self.overlay_item = None;
            }
        }

        if button == Button::B {
            self.clear_overlay_item();
            match overlay {
                Some(overlay) => overlay.dismiss_dialog_window(),
                None => warn!("Overlay dismissal requested but no overlay is configured"),
            }
        }
    }

    fn clear_overlay_item(&mut self) {
        self.overlay_item = None;
    }

    /// Remove the main-UI highlight
    pub fn clear_title_item(&mut self, ui: &mut dyn UiTree) {
        if let Some(item) = self.main_item.take() {
            ui.set_class(item, HighlightClass::Main, false);
        }
    }

    /// Replace the main-UI highlight with `element`
    pub fn set_title_item(&mut self, ui: &mut dyn UiTree, element: Option<ElementId>) {
        self.clear_title_item(ui);

        if let Some(el) = element {
            ui.set_class(el, HighlightClass::Main, true);
            self.main_item = Some(el);
        }
    }

    /// Mark `element` as the only highlighted selectable under `scope`
    ///
    /// `None` scope covers the whole document. The element becomes the
    /// main-UI highlight and is scrolled to the centre of the view.
    pub fn highlight_selected(
        &mut self,
        ui: &mut dyn UiTree,
        element: Option<ElementId>,
        scope: Option<ElementId>,
    ) {
        for el in ui.selectable_elements(scope) {
            ui.set_class(el, HighlightClass::Main, Some(el) == element);
        }

        if let Some(el) = element {
            self.main_item = Some(el);
            ui.scroll_into_view(el, self.scroll_behavior);
        }
    }
}

/// Click, plus keyboard and focus for text inputs
fn activate(ui: &mut dyn UiTree, platform: &mut dyn PlatformBridge, element: ElementId) {
    ui.click(element);

    if ui.kind(element) == ElementKind::TextInput {
        platform.force_open_keyboard();
        ui.focus(element);
    }
}
