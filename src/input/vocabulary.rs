//! Canonical button and axis vocabulary
//!
//! Every hardware family reports buttons differently: the W3C "standard"
//! gamepad layout uses indices 0-16, the Android TV host bridge reports
//! Android key codes, Fire TV remotes send DOM key codes and each VR hand
//! has its own small layout. This module folds all of them into one closed
//! set of names ([`Button`]) and the four stick axes ([`AxisName`]).
//!
//! Lookups never fail. A raw id with no mapping comes back as
//! [`ButtonName::Raw`] and displays exactly as it went in.

use std::fmt;
use std::str::FromStr;

/// Axis deflection that counts as a digital press in either direction
pub const AXES_THRESHOLD: f32 = 0.55;

/// Hardware family a raw id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadFamily {
    /// W3C standard mapping (browser gamepads, gilrs, virtual pads)
    Standard,
    /// Android key codes reported by the TV host bridge
    AndroidHost,
    /// DOM key codes produced by a Fire TV remote
    FireRemote,
    /// Left VR controller
    VrLeft,
    /// Right VR controller
    VrRight,
}

/// Controller hand for VR input sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Family used to resolve this hand's buttons
    pub fn family(self) -> PadFamily {
        match self {
            Hand::Left => PadFamily::VrLeft,
            Hand::Right => PadFamily::VrRight,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Hand::Left => "vrLeft",
            Hand::Right => "vrRight",
        }
    }
}

/// Direction of an axis crossing the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Pos,
    Neg,
}

impl Polarity {
    fn suffix(self) -> &'static str {
        match self {
            Polarity::Pos => "pos",
            Polarity::Neg => "neg",
        }
    }
}

/// Raw, family-specific identifier of a button or axis direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawButton {
    /// Numeric button index or key code
    Index(u32),
    /// Axis `axis` past the threshold on a traditional pad (`a{i}{pos|neg}`)
    Axis { axis: u32, polarity: Polarity },
    /// Axis on a VR controller (`vr{Hand}.a{i}{pos|neg}`)
    VrAxis { hand: Hand, axis: u32, polarity: Polarity },
}

impl fmt::Display for RawButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawButton::Index(idx) => write!(f, "{}", idx),
            RawButton::Axis { axis, polarity } => write!(f, "a{}{}", axis, polarity.suffix()),
            RawButton::VrAxis { hand, axis, polarity } => {
                write!(f, "{}.a{}{}", hand.prefix(), axis, polarity.suffix())
            }
        }
    }
}

/// Canonical semantic button names shared by every family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    Lb,
    Rb,
    Lt,
    Rt,
    Select,
    Start,
    Ls,
    Rs,
    Up,
    Down,
    Left,
    Right,
    Center,
    LeftStickUp,
    LeftStickDown,
    LeftStickLeft,
    LeftStickRight,
    RightStickUp,
    RightStickDown,
    RightStickLeft,
    RightStickRight,
    /// Unlabelled third button on the left VR controller
    UnknownLeft,
    /// Unlabelled third button on the right VR controller
    UnknownRight,
}

/// Standard layout in index order (0..=16)
const STANDARD_BUTTONS: [Button; 17] = [
    Button::A,
    Button::B,
    Button::X,
    Button::Y,
    Button::Lb,
    Button::Rb,
    Button::Lt,
    Button::Rt,
    Button::Select,
    Button::Start,
    Button::Ls,
    Button::Rs,
    Button::Up,
    Button::Down,
    Button::Left,
    Button::Right,
    Button::Center,
];

const ALL_BUTTONS: [Button; 27] = [
    Button::A,
    Button::B,
    Button::X,
    Button::Y,
    Button::Lb,
    Button::Rb,
    Button::Lt,
    Button::Rt,
    Button::Select,
    Button::Start,
    Button::Ls,
    Button::Rs,
    Button::Up,
    Button::Down,
    Button::Left,
    Button::Right,
    Button::Center,
    Button::LeftStickUp,
    Button::LeftStickDown,
    Button::LeftStickLeft,
    Button::LeftStickRight,
    Button::RightStickUp,
    Button::RightStickDown,
    Button::RightStickLeft,
    Button::RightStickRight,
    Button::UnknownLeft,
    Button::UnknownRight,
];

impl Button {
    /// Wire name of the button (`"a"`, `"lup"`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Button::A => "a",
            Button::B => "b",
            Button::X => "x",
            Button::Y => "y",
            Button::Lb => "lb",
            Button::Rb => "rb",
            Button::Lt => "lt",
            Button::Rt => "rt",
            Button::Select => "select",
            Button::Start => "start",
            Button::Ls => "ls",
            Button::Rs => "rs",
            Button::Up => "up",
            Button::Down => "down",
            Button::Left => "left",
            Button::Right => "right",
            Button::Center => "center",
            Button::LeftStickUp => "lup",
            Button::LeftStickDown => "ldown",
            Button::LeftStickLeft => "lleft",
            Button::LeftStickRight => "lright",
            Button::RightStickUp => "rup",
            Button::RightStickDown => "rdown",
            Button::RightStickLeft => "rleft",
            Button::RightStickRight => "rright",
            Button::UnknownLeft => "unknown-left",
            Button::UnknownRight => "unknown-right",
        }
    }

    /// Button at a standard-layout index
    pub fn from_standard_index(index: u32) -> Option<Button> {
        STANDARD_BUTTONS.get(index as usize).copied()
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Button {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_BUTTONS
            .iter()
            .copied()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| format!("unknown button name '{}'", s))
    }
}

/// Result of canonicalisation: a known name, or the raw id passed through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonName {
    Known(Button),
    Raw(RawButton),
}

impl ButtonName {
    /// The canonical button, if the raw id was mapped
    pub fn known(&self) -> Option<Button> {
        match self {
            ButtonName::Known(b) => Some(*b),
            ButtonName::Raw(_) => None,
        }
    }
}

impl fmt::Display for ButtonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonName::Known(b) => b.fmt(f),
            ButtonName::Raw(raw) => raw.fmt(f),
        }
    }
}

/// Canonical names of the four continuous stick axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisName {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

impl AxisName {
    pub fn as_str(self) -> &'static str {
        match self {
            AxisName::LeftX => "leftX",
            AxisName::LeftY => "leftY",
            AxisName::RightX => "rightX",
            AxisName::RightY => "rightY",
        }
    }
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map an Android host key code to a standard-layout index
pub fn android_host_to_standard(key: u32) -> Option<u32> {
    match key {
        4 => Some(1),    // back
        19 => Some(12),  // dpad up
        20 => Some(13),  // dpad down
        21 => Some(14),  // dpad left
        22 => Some(15),  // dpad right
        23 => Some(0),   // dpad center
        96 => Some(0),   // a
        97 => Some(1),   // b
        99 => Some(2),   // x
        100 => Some(3),  // y
        102 => Some(4),  // l1
        103 => Some(5),  // r1
        106 => Some(10), // left thumb
        107 => Some(11), // right thumb
        108 => Some(9),  // start
        109 => Some(8),  // select
        130 => Some(16), // center
        _ => None,
    }
}

/// Map a Fire TV remote key code to a standard-layout index
pub fn fire_remote_to_standard(key: u32) -> Option<u32> {
    match key {
        13 => Some(0),  // select
        38 => Some(12), // up
        40 => Some(13), // down
        37 => Some(14), // left
        39 => Some(15), // right
        179 => Some(9), // play/pause
        227 => Some(4), // rewind
        228 => Some(5), // fast forward
        4 => Some(1),   // back
        _ => None,
    }
}

fn standard_axis_button(axis: u32, polarity: Polarity) -> Option<Button> {
    match (axis, polarity) {
        (0, Polarity::Neg) => Some(Button::LeftStickLeft),
        (0, Polarity::Pos) => Some(Button::LeftStickRight),
        (1, Polarity::Neg) => Some(Button::LeftStickUp),
        (1, Polarity::Pos) => Some(Button::LeftStickDown),
        (2, Polarity::Neg) => Some(Button::RightStickLeft),
        (2, Polarity::Pos) => Some(Button::RightStickRight),
        (3, Polarity::Neg) => Some(Button::RightStickUp),
        (3, Polarity::Pos) => Some(Button::RightStickDown),
        _ => None,
    }
}

fn vr_button(hand: Hand, index: u32) -> Option<Button> {
    let name = match (hand, index) {
        (Hand::Left, 0) => Button::Lt,
        (Hand::Left, 1) => Button::Lb,
        (Hand::Left, 2) => Button::UnknownLeft,
        (Hand::Left, 3) => Button::Ls,
        (Hand::Left, 4) => Button::X,
        (Hand::Left, 5) => Button::Y,
        (Hand::Right, 0) => Button::Rt,
        (Hand::Right, 1) => Button::Rb,
        (Hand::Right, 2) => Button::UnknownRight,
        (Hand::Right, 3) => Button::Rs,
        (Hand::Right, 4) => Button::A,
        (Hand::Right, 5) => Button::B,
        _ => return None,
    };
    Some(name)
}

fn vr_axis_button(hand: Hand, axis: u32, polarity: Polarity) -> Option<Button> {
    // Only the thumbstick (axes 2/3) carries directions on VR controllers
    let name = match (hand, axis, polarity) {
        (Hand::Left, 2, Polarity::Neg) => Button::LeftStickLeft,
        (Hand::Left, 2, Polarity::Pos) => Button::LeftStickRight,
        (Hand::Left, 3, Polarity::Neg) => Button::LeftStickUp,
        (Hand::Left, 3, Polarity::Pos) => Button::LeftStickDown,
        (Hand::Right, 2, Polarity::Neg) => Button::RightStickLeft,
        (Hand::Right, 2, Polarity::Pos) => Button::RightStickRight,
        (Hand::Right, 3, Polarity::Neg) => Button::RightStickUp,
        (Hand::Right, 3, Polarity::Pos) => Button::RightStickDown,
        _ => return None,
    };
    Some(name)
}

/// Resolve a raw id from `family` to its canonical name
///
/// Android host and Fire remote codes are first translated to a standard
/// index. Anything unmapped passes through as [`ButtonName::Raw`].
pub fn canonicalize(raw: RawButton, family: PadFamily) -> ButtonName {
    let known = match (family, raw) {
        (PadFamily::Standard, RawButton::Index(idx)) => Button::from_standard_index(idx),
        (PadFamily::Standard, RawButton::Axis { axis, polarity }) => {
            standard_axis_button(axis, polarity)
        }
        (PadFamily::AndroidHost, RawButton::Index(key)) => {
            android_host_to_standard(key).and_then(Button::from_standard_index)
        }
        (PadFamily::FireRemote, RawButton::Index(key)) => {
            fire_remote_to_standard(key).and_then(Button::from_standard_index)
        }
        (PadFamily::VrLeft, RawButton::Index(idx)) => vr_button(Hand::Left, idx),
        (PadFamily::VrRight, RawButton::Index(idx)) => vr_button(Hand::Right, idx),
        (PadFamily::VrLeft, RawButton::VrAxis { hand: Hand::Left, axis, polarity }) => {
            vr_axis_button(Hand::Left, axis, polarity)
        }
        (PadFamily::VrRight, RawButton::VrAxis { hand: Hand::Right, axis, polarity }) => {
            vr_axis_button(Hand::Right, axis, polarity)
        }
        _ => None,
    };

    known.map(ButtonName::Known).unwrap_or(ButtonName::Raw(raw))
}

/// Standard-layout lookup (`standardButtonConversion` in host pages)
pub fn canonicalize_standard(raw: RawButton) -> ButtonName {
    canonicalize(raw, PadFamily::Standard)
}

/// VR lookup for one hand
pub fn canonicalize_vr(raw: RawButton, hand: Hand) -> ButtonName {
    canonicalize(raw, hand.family())
}

/// Canonical axis name for an axis index of a family
pub fn axis_name(family: PadFamily, axis: u32) -> Option<AxisName> {
    match (family, axis) {
        (PadFamily::VrLeft, 2) => Some(AxisName::LeftX),
        (PadFamily::VrLeft, 3) => Some(AxisName::LeftY),
        (PadFamily::VrRight, 2) => Some(AxisName::RightX),
        (PadFamily::VrRight, 3) => Some(AxisName::RightY),
        (PadFamily::VrLeft | PadFamily::VrRight, _) => None,
        (_, 0) => Some(AxisName::LeftX),
        (_, 1) => Some(AxisName::LeftY),
        (_, 2) => Some(AxisName::RightX),
        (_, 3) => Some(AxisName::RightY),
        _ => None,
    }
}

/// Alias left-stick directions onto the digital directions
///
/// Only overlay navigation uses this; everything else keeps the stick names.
pub fn convert_for_overlay_navigation(name: ButtonName) -> ButtonName {
    match name {
        ButtonName::Known(Button::LeftStickUp) => ButtonName::Known(Button::Up),
        ButtonName::Known(Button::LeftStickDown) => ButtonName::Known(Button::Down),
        ButtonName::Known(Button::LeftStickLeft) => ButtonName::Known(Button::Left),
        ButtonName::Known(Button::LeftStickRight) => ButtonName::Known(Button::Right),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_face_buttons() {
        assert_eq!(canonicalize_standard(RawButton::Index(0)), ButtonName::Known(Button::A));
        assert_eq!(canonicalize_standard(RawButton::Index(3)), ButtonName::Known(Button::Y));
        assert_eq!(canonicalize_standard(RawButton::Index(16)), ButtonName::Known(Button::Center));
    }

    #[test]
    fn test_standard_axis_directions() {
        let up = RawButton::Axis { axis: 1, polarity: Polarity::Neg };
        let rright = RawButton::Axis { axis: 2, polarity: Polarity::Pos };
        assert_eq!(canonicalize_standard(up).to_string(), "lup");
        assert_eq!(canonicalize_standard(rright).to_string(), "rright");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        let name = canonicalize_standard(RawButton::Index(999));
        assert_eq!(name, ButtonName::Raw(RawButton::Index(999)));
        assert_eq!(name.to_string(), "999");

        let axis = RawButton::Axis { axis: 7, polarity: Polarity::Pos };
        assert_eq!(canonicalize_standard(axis).to_string(), "a7pos");
    }

    #[test]
    fn test_android_host_codes() {
        assert_eq!(canonicalize(RawButton::Index(4), PadFamily::AndroidHost).to_string(), "b");
        assert_eq!(canonicalize(RawButton::Index(23), PadFamily::AndroidHost).to_string(), "a");
        assert_eq!(canonicalize(RawButton::Index(22), PadFamily::AndroidHost).to_string(), "right");
        assert_eq!(canonicalize(RawButton::Index(109), PadFamily::AndroidHost).to_string(), "select");
        assert_eq!(canonicalize(RawButton::Index(5), PadFamily::AndroidHost).to_string(), "5");
    }

    #[test]
    fn test_fire_remote_codes() {
        assert_eq!(canonicalize(RawButton::Index(13), PadFamily::FireRemote).to_string(), "a");
        assert_eq!(canonicalize(RawButton::Index(179), PadFamily::FireRemote).to_string(), "start");
        assert_eq!(canonicalize(RawButton::Index(228), PadFamily::FireRemote).to_string(), "rb");
    }

    #[test]
    fn test_vr_hands_differ() {
        assert_eq!(canonicalize_vr(RawButton::Index(0), Hand::Left).to_string(), "lt");
        assert_eq!(canonicalize_vr(RawButton::Index(0), Hand::Right).to_string(), "rt");
        assert_eq!(canonicalize_vr(RawButton::Index(4), Hand::Left).to_string(), "x");
        assert_eq!(canonicalize_vr(RawButton::Index(4), Hand::Right).to_string(), "a");
        assert_eq!(canonicalize_vr(RawButton::Index(9), Hand::Right).to_string(), "9");
    }

    #[test]
    fn test_vr_axis_names_are_hand_prefixed() {
        let raw = RawButton::VrAxis { hand: Hand::Left, axis: 3, polarity: Polarity::Neg };
        assert_eq!(raw.to_string(), "vrLeft.a3neg");
        assert_eq!(canonicalize_vr(raw, Hand::Left), ButtonName::Known(Button::LeftStickUp));

        // A right-hand axis never resolves through the left table
        let right = RawButton::VrAxis { hand: Hand::Right, axis: 2, polarity: Polarity::Pos };
        assert_eq!(canonicalize_vr(right, Hand::Left), ButtonName::Raw(right));
        assert_eq!(canonicalize_vr(right, Hand::Right).to_string(), "rright");

        // Axes 0/1 are the touchpad, not a direction
        let touchpad = RawButton::VrAxis { hand: Hand::Right, axis: 0, polarity: Polarity::Pos };
        assert_eq!(canonicalize_vr(touchpad, Hand::Right).to_string(), "vrRight.a0pos");
    }

    #[test]
    fn test_axis_names() {
        assert_eq!(axis_name(PadFamily::Standard, 0), Some(AxisName::LeftX));
        assert_eq!(axis_name(PadFamily::Standard, 3), Some(AxisName::RightY));
        assert_eq!(axis_name(PadFamily::Standard, 4), None);
        assert_eq!(axis_name(PadFamily::VrLeft, 0), None);
        assert_eq!(axis_name(PadFamily::VrLeft, 3), Some(AxisName::LeftY));
        assert_eq!(axis_name(PadFamily::VrRight, 2), Some(AxisName::RightX));
    }

    #[test]
    fn test_overlay_aliases() {
        let lleft = ButtonName::Known(Button::LeftStickLeft);
        assert_eq!(convert_for_overlay_navigation(lleft), ButtonName::Known(Button::Left));
        let rup = ButtonName::Known(Button::RightStickUp);
        assert_eq!(convert_for_overlay_navigation(rup), rup);
    }

    #[test]
    fn test_button_from_str() {
        assert_eq!("lright".parse::<Button>(), Ok(Button::LeftStickRight));
        assert_eq!("unknown-left".parse::<Button>(), Ok(Button::UnknownLeft));
        assert!("zz".parse::<Button>().is_err());
    }
}
