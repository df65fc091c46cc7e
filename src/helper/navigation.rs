//! Navigation entry points for host UIs

use crate::input::vocabulary::ButtonName;
use crate::nav::{ElementId, Highlight, OverlayDialog, UiTree};

impl super::GamepadHelper {
    /// Main-UI navigation inside `scope`; returns whether the button was used
    pub fn handle_ui_selection(&mut self, scope: Option<ElementId>, button: ButtonName) -> bool {
        self.navigator
            .handle_ui_selection(self.ui.as_mut(), self.platform.as_mut(), scope, button)
    }

    /// Overlay navigation, as if `button` was pressed while the overlay is open
    pub fn overlay_pad_down(&mut self, button: ButtonName) {
        let overlay = self
            .overlay
            .as_mut()
            .map(|o| o.as_mut() as &mut dyn OverlayDialog);
        self.navigator
            .overlay_pad_down(self.ui.as_mut(), self.platform.as_mut(), overlay, button);
    }

    pub fn set_title_item(&mut self, element: Option<ElementId>) {
        self.navigator.set_title_item(self.ui.as_mut(), element);
    }

    pub fn clear_title_item(&mut self) {
        self.navigator.clear_title_item(self.ui.as_mut());
    }

    pub fn highlight_selected(&mut self, element: Option<ElementId>, scope: Option<ElementId>) {
        self.navigator.highlight_selected(self.ui.as_mut(), element, scope);
    }

    pub fn highlight(&self) -> Highlight {
        self.navigator.highlight()
    }

    pub fn ui(&self) -> &dyn UiTree {
        self.ui.as_ref()
    }

    pub fn ui_mut(&mut self) -> &mut dyn UiTree {
        self.ui.as_mut()
    }
}
