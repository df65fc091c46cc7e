//! Directional navigation over selectable UI elements
//!
//! `geometry` finds the next element in a direction; `navigator` owns the
//! single highlight slot and drives class toggles, scrolling and activation
//! for both the main UI and the modal overlay.

pub mod geometry;
pub mod navigator;
pub mod ui;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HelperError;

pub use geometry::{navigate, Direction, GP_HIGHLIGHT_PADDING};
pub use navigator::{Highlight, Navigator};
pub use ui::{
    ComputedStyle, ElementId, ElementKind, EmptyUi, HighlightClass, OverlayDialog, Rect, UiTree,
};

/// How highlighted elements are scrolled into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Auto,
    Instant,
}

impl ScrollBehavior {
    pub fn as_str(self) -> &'static str {
        match self {
            ScrollBehavior::Smooth => "smooth",
            ScrollBehavior::Auto => "auto",
            ScrollBehavior::Instant => "instant",
        }
    }
}

impl fmt::Display for ScrollBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScrollBehavior {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smooth" => Ok(ScrollBehavior::Smooth),
            "auto" => Ok(ScrollBehavior::Auto),
            "instant" => Ok(ScrollBehavior::Instant),
            _ => Err(HelperError::InvalidScrollBehavior(s.to_string())),
        }
    }
}
