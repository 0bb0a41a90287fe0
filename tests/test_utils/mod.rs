//! Shared fixtures for exercising the switch against mock collaborators.

#![allow(dead_code)]

use std::sync::Arc;

use audio_device_switch::audio::{AudioDevice, AudioSwitch, DeviceKind};
use audio_device_switch::config::{Config, GeneralConfig};
use audio_device_switch::system::{DeviceListener, MockAudioDeviceManager, MockDeviceScanner};

pub fn test_config(preferred_devices: Vec<DeviceKind>) -> Config {
    Config {
        general: GeneralConfig::default(),
        preferred_devices,
    }
}

/// A switch wired to mock collaborators, with handles kept for assertions.
pub struct SwitchFixture {
    pub scanner: MockDeviceScanner,
    pub manager: Arc<MockAudioDeviceManager>,
    pub switch: AudioSwitch<MockDeviceScanner, MockAudioDeviceManager>,
}

impl SwitchFixture {
    pub fn new() -> Self {
        Self::with_preferred(Vec::new())
    }

    pub fn with_preferred(preferred: Vec<DeviceKind>) -> Self {
        let scanner = MockDeviceScanner::new();
        let manager = Arc::new(MockAudioDeviceManager::new());
        let switch = AudioSwitch::new(scanner.clone(), manager.clone(), &test_config(preferred))
            .expect("valid preferred device list");
        Self {
            scanner,
            manager,
            switch,
        }
    }

    /// Report a device as physically active and deliver its connect event.
    pub fn connect(&mut self, device: AudioDevice) {
        self.scanner.set_device_active(device.clone(), true);
        self.switch
            .on_device_connected(device)
            .expect("connect event");
    }

    /// Mark a device gone and deliver its disconnect event.
    pub fn disconnect(&mut self, device: AudioDevice) {
        self.scanner.set_device_active(device.clone(), false);
        self.switch
            .on_device_disconnected(device)
            .expect("disconnect event");
    }
}

pub fn bluetooth(name: &str) -> AudioDevice {
    AudioDevice::bluetooth_headset(name)
}

pub fn wired() -> AudioDevice {
    AudioDevice::wired_headset()
}
