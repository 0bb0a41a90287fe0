use anyhow::Result;

use crate::audio::AudioDevice;

/// Trait for the device scanner collaborator - the platform glue that detects
/// connect/disconnect events and answers liveness queries.
pub trait DeviceScanner {
    /// Begin delivering connect/disconnect events to the host's listener.
    fn start(&self) -> Result<()>;

    /// Stop delivering events.
    fn stop(&self) -> Result<()>;

    /// Whether the device is still physically active right now.
    fn is_device_active(&self, device: &AudioDevice) -> bool;
}

/// Receives scanner events. Implemented by the selection engine; platform glue
/// must invoke it on its delivery thread, one event at a time, in delivery
/// order. Each call completes its registry mutation, selection, and any
/// resulting routing before returning.
pub trait DeviceListener {
    fn on_device_connected(&mut self, device: AudioDevice) -> crate::error::Result<()>;
    fn on_device_disconnected(&mut self, device: AudioDevice) -> crate::error::Result<()>;
}

/// Trait for the platform audio manager - abstracts the low-level audio focus,
/// mute, and routing hardware calls.
pub trait AudioDeviceManager {
    /// Snapshot the current hardware audio state for later restoration.
    fn cache_audio_state(&self);

    /// Restore the state captured by [`cache_audio_state`](Self::cache_audio_state).
    fn restore_audio_state(&self);

    fn mute(&self, mute: bool);

    /// Acquire audio focus for the client application. The platform may deny
    /// the request.
    fn set_audio_focus(&self) -> Result<()>;

    fn enable_speakerphone(&self, enable: bool);

    fn enable_bluetooth_sco(&self, enable: bool);

    /// Whether the device has an earpiece capability at all.
    fn has_earpiece(&self) -> bool;
}

/// Applies device-specific audio routing while the switch is activated.
/// Injected into the engine so targets can swap in their own routing.
pub trait DeviceRouter {
    fn route_to(&self, device: &AudioDevice) -> Result<()>;
    fn restore_default_routing(&self) -> Result<()>;
}
