//! Host platform bridge collaborator

/// Services the embedding platform may provide
///
/// Every method has a harmless default so hosts only implement what they
/// actually offer.
pub trait PlatformBridge {
    /// The platform polls pads itself and reports them through the host bridge
    fn host_handles_gamepad(&self) -> bool {
        false
    }

    /// User agent string used for Android TV detection
    fn user_agent(&self) -> Option<String> {
        None
    }

    /// Ask the platform to show its on-screen keyboard
    fn force_open_keyboard(&mut self) {}

    /// Generic device vibration; returns false when unsupported
    fn vibrate(&mut self, _duration_ms: u32) -> bool {
        false
    }
}

/// Bridge for hosts with no platform services
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPlatform;

impl PlatformBridge for NoPlatform {}
