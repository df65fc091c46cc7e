//! Nearest-neighbour element search along a direction

use super::ui::{ElementId, Rect, UiTree};
use crate::input::vocabulary::Button;

/// Overlap tolerance when deciding whether a candidate lies in a direction
pub const GP_HIGHLIGHT_PADDING: f32 = 12.0;

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Digital direction for a canonical button, if it is one
    pub fn from_button(button: Button) -> Option<Direction> {
        match button {
            Button::Up => Some(Direction::Up),
            Button::Down => Some(Direction::Down),
            Button::Left => Some(Direction::Left),
            Button::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// Whether `candidate` lies in this direction from `current`
    pub fn admits(self, current: &Rect, candidate: &Rect) -> bool {
        match self {
            Direction::Right => candidate.left >= current.right() - GP_HIGHLIGHT_PADDING,
            Direction::Left => candidate.right() <= current.left + GP_HIGHLIGHT_PADDING,
            Direction::Up => candidate.bottom() <= current.top + GP_HIGHLIGHT_PADDING,
            Direction::Down => candidate.top >= current.bottom() - GP_HIGHLIGHT_PADDING,
        }
    }
}

/// Element and all its ancestors are displayed, visible and not transparent
pub fn is_visible(ui: &dyn UiTree, element: ElementId) -> bool {
    let mut next = Some(element);
    while let Some(current) = next {
        if ui.computed_style(current).hides() {
            return false;
        }
        next = ui.parent(current);
    }
    true
}

/// Visible selectable elements, in document order
///
/// While the overlay is open the scope is forced to the overlay root.
pub fn selectable_candidates(ui: &dyn UiTree, scope: Option<ElementId>) -> Vec<ElementId> {
    let scope = ui.open_overlay_root().or(scope);

    ui.selectable_elements(scope)
        .into_iter()
        .filter(|&el| is_visible(ui, el))
        .collect()
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Element to move to from `current` in `direction`
///
/// With no current element, or one that is not a candidate, the first
/// candidate wins outright. Otherwise the eligible candidate with the
/// nearest centre wins, earliest on ties. If nothing is eligible the first
/// candidate is returned.
pub fn navigate(
    ui: &dyn UiTree,
    direction: Direction,
    current: Option<ElementId>,
    scope: Option<ElementId>,
) -> Option<ElementId> {
    let candidates = selectable_candidates(ui, scope);
    let first = *candidates.first()?;

    let current = match current {
        Some(el) if candidates.contains(&el) => el,
        _ => return Some(first),
    };

    let from = ui.bounding_rect(current);
    let from_center = from.center();

    let mut best = first;
    let mut best_distance = f32::INFINITY;

    for &candidate in candidates.iter().filter(|&&el| el != current) {
        let bounds = ui.bounding_rect(candidate);
        if !direction.admits(&from, &bounds) {
            continue;
        }

        let d = distance(from_center, bounds.center());
        if d < best_distance {
            best = candidate;
            best_distance = d;
        }
    }

    Some(best)
}
