//! Logical input source identifiers

use std::fmt;

use super::vocabulary::{Hand, PadFamily};

/// Identifies where an event came from
///
/// Stable for the lifetime of a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PadId {
    /// Physical gamepad slot (browser index, gilrs id, or host-bridge device id)
    Slot(u32),
    /// Left VR controller
    VrLeft,
    /// Right VR controller
    VrRight,
    /// TV remote keypresses
    Remote,
    /// On-screen touch pad (`virtPad.{n}`)
    Virtual(String),
}

impl PadId {
    /// Button family used to canonicalise raw ids from this source
    ///
    /// Remote and host-bridge codes are converted to standard indices before
    /// they reach dispatch, so only the VR hands differ.
    pub fn family(&self) -> PadFamily {
        match self {
            PadId::VrLeft => PadFamily::VrLeft,
            PadId::VrRight => PadFamily::VrRight,
            _ => PadFamily::Standard,
        }
    }

    pub fn for_hand(hand: Hand) -> Self {
        match hand {
            Hand::Left => PadId::VrLeft,
            Hand::Right => PadId::VrRight,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, PadId::Remote)
    }
}

impl fmt::Display for PadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PadId::Slot(idx) => write!(f, "{}", idx),
            PadId::VrLeft => f.write_str("vrLeft"),
            PadId::VrRight => f.write_str("vrRight"),
            PadId::Remote => f.write_str("remote"),
            PadId::Virtual(id) => f.write_str(id),
        }
    }
}
