//! padnav - unified pad input and D-pad focus navigation
//!
//! Physical gamepads, VR controllers, TV remotes, host-reported pads and
//! on-screen touch pads are normalised into one vocabulary of named buttons
//! and stick axes, then fanned out to registered listeners with
//! edge-triggered semantics. The same events drive spatial focus
//! navigation over a host UI tree.

pub mod config;
pub mod error;
pub mod helper;
pub mod host;
pub mod input;
pub mod nav;
pub mod touch;

#[cfg(test)]
mod testing;

pub use config::PadnavConfig;
pub use error::{HelperError, Result};
pub use helper::GamepadHelper;
pub use input::{AxisName, Button, ButtonName, Listener, PadId, RegistrationId};
pub use nav::{Highlight, ScrollBehavior};
