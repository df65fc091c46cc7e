//! Input normalisation
//!
//! - `vocabulary`: raw ids to canonical names for every hardware family
//! - `registry`: listener registrations and fan-out
//! - `state`: per-pad held buttons and last velocities
//! - `poller`: frame scheduling and snapshot diffing
//! - `source`: snapshot types and the gamepad/VR collaborator traits
//! - `gilrs_source`: physical gamepads via gilrs

pub mod gilrs_source;
pub mod pad;
pub mod poller;
pub mod registry;
pub mod source;
pub mod state;
pub mod vocabulary;

pub use gilrs_source::GilrsSource;
pub use pad::PadId;
pub use registry::{GamepadInfo, Listener, RegistrationId, Registry};
pub use source::{
    ButtonSnapshot, ConnectionChange, GamepadSnapshot, GamepadSource, NoGamepads, RumbleEffect,
    VrInputSource, VrSession,
};
pub use vocabulary::{AxisName, Button, ButtonName, Hand, PadFamily, Polarity, RawButton};

/// Sink for raw pad events
///
/// Implemented by the dispatch path; virtual pads and host adapters report
/// through it so every source obeys the same overlay and suppression rules.
pub trait PadReporter {
    fn report_down(&mut self, pad: &PadId, raw: RawButton);

    fn report_up(&mut self, pad: &PadId, raw: RawButton);

    /// Raw axis value for `axis` of `pad`; change detection is up to the sink
    fn report_velocity(&mut self, pad: &PadId, axis: u32, value: f32);
}
