//! On-screen touch pads

pub mod surface;
pub mod virtual_pad;

pub use surface::{ButtonVisual, Circle, GlyphVisual, PadSurface, StickVisual};
pub use virtual_pad::{PointerEvent, PointerHook, PointerKind, Stick, TouchCallback, VirtualPad};
