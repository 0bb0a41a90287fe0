use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::traits::{AudioDeviceManager, DeviceRouter};
use crate::audio::AudioDevice;

/// Default router implementing the speakerphone/SCO table for each device
/// kind over the platform audio manager.
pub struct PlatformDeviceRouter<A: AudioDeviceManager> {
    audio_manager: Arc<A>,
}

impl<A: AudioDeviceManager> PlatformDeviceRouter<A> {
    pub fn new(audio_manager: Arc<A>) -> Self {
        Self { audio_manager }
    }
}

impl<A: AudioDeviceManager> DeviceRouter for PlatformDeviceRouter<A> {
    fn route_to(&self, device: &AudioDevice) -> Result<()> {
        debug!("Routing audio to {}", device);
        match device {
            AudioDevice::BluetoothHeadset { .. } => {
                self.audio_manager.enable_speakerphone(false);
                self.audio_manager.enable_bluetooth_sco(true);
            }
            AudioDevice::Earpiece | AudioDevice::WiredHeadset { .. } => {
                self.audio_manager.enable_speakerphone(false);
                self.audio_manager.enable_bluetooth_sco(false);
            }
            AudioDevice::Speakerphone => {
                // SCO must be torn down before the speaker takes over
                self.audio_manager.enable_bluetooth_sco(false);
                self.audio_manager.enable_speakerphone(true);
            }
        }
        Ok(())
    }

    fn restore_default_routing(&self) -> Result<()> {
        debug!("Restoring default audio routing");
        Ok(())
    }
}
