//! Drawing collaborator for the on-screen pad
//!
//! The pad computes geometry and colours; the surface only draws.

/// Stick ring and button outline colour
pub const DEFAULT_STROKE: &str = "#ffffff";
/// Button fill
pub const DEFAULT_FILL: &str = "rgba(255, 255, 255, 0.5)";
/// Stick knob fill
pub const KNOB_FILL: &str = "rgba(255, 255, 255, 0.4)";
pub const DEFAULT_GLYPH_COLOR: &str = "#ffffff";
/// Outline drawn around glyphs
pub const GLYPH_OUTLINE: &str = "#000000";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// A touch stick in use: outline at the anchor, filled knob at the finger
#[derive(Debug, Clone, PartialEq)]
pub struct StickVisual {
    pub ring: Circle,
    pub knob: Circle,
    pub stroke: &'static str,
    pub knob_fill: &'static str,
}

/// A touch button: filled and outlined circle, optional glyph on top
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonVisual {
    pub circle: Circle,
    pub fill: String,
    pub stroke: String,
    pub glyph: Option<GlyphVisual>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphVisual {
    pub glyph: char,
    /// Bold icon font size in pixels
    pub font_px: u32,
    pub color: String,
    pub outline: &'static str,
}

/// Canvas the pad renders into
pub trait PadSurface {
    /// Size of the host element in pixels; `None` when not attached
    fn host_size(&self) -> Option<(u32, u32)>;

    /// Resize the backing store, clearing it
    fn resize(&mut self, width: u32, height: u32);

    fn draw_stick(&mut self, stick: &StickVisual);

    fn draw_button(&mut self, button: &ButtonVisual);
}

/// Decode a glyph written as `&#xE768;` or `fluent.&#xE768;`
pub fn decode_glyph(glyph: &str) -> Option<char> {
    let hex = glyph
        .replace("fluent.&#x", "")
        .replace("&#x", "")
        .replace(';', "");
    u32::from_str_radix(hex.trim(), 16)
        .ok()
        .and_then(char::from_u32)
}
