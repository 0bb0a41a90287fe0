use serde::{Deserialize, Serialize};
use std::fmt;

/// The four kinds of audio device the switch can route call audio to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    BluetoothHeadset,
    WiredHeadset,
    Earpiece,
    Speakerphone,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::BluetoothHeadset => write!(f, "Bluetooth Headset"),
            DeviceKind::WiredHeadset => write!(f, "Wired Headset"),
            DeviceKind::Earpiece => write!(f, "Earpiece"),
            DeviceKind::Speakerphone => write!(f, "Speakerphone"),
        }
    }
}

/// An audio device reported by the platform.
///
/// Earpiece and Speakerphone are singletons: any two instances compare equal.
/// Bluetooth headsets also compare their pairing address when both sides carry
/// one, so two different paired headsets stay distinguishable; a headset
/// without an address matches any headset of the same kind.
#[derive(Debug, Clone)]
pub enum AudioDevice {
    BluetoothHeadset {
        name: Option<String>,
        address: Option<String>,
    },
    WiredHeadset {
        name: Option<String>,
    },
    Earpiece,
    Speakerphone,
}

impl AudioDevice {
    pub fn bluetooth_headset(name: impl Into<String>) -> Self {
        AudioDevice::BluetoothHeadset {
            name: Some(name.into()),
            address: None,
        }
    }

    pub fn bluetooth_headset_with_address(
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        AudioDevice::BluetoothHeadset {
            name: Some(name.into()),
            address: Some(address.into()),
        }
    }

    pub fn wired_headset() -> Self {
        AudioDevice::WiredHeadset { name: None }
    }

    pub fn kind(&self) -> DeviceKind {
        match self {
            AudioDevice::BluetoothHeadset { .. } => DeviceKind::BluetoothHeadset,
            AudioDevice::WiredHeadset { .. } => DeviceKind::WiredHeadset,
            AudioDevice::Earpiece => DeviceKind::Earpiece,
            AudioDevice::Speakerphone => DeviceKind::Speakerphone,
        }
    }

    /// The human-readable name, falling back to the kind's label.
    pub fn name(&self) -> &str {
        match self {
            AudioDevice::BluetoothHeadset { name, .. } => {
                name.as_deref().unwrap_or("Bluetooth Headset")
            }
            AudioDevice::WiredHeadset { name } => name.as_deref().unwrap_or("Wired Headset"),
            AudioDevice::Earpiece => "Earpiece",
            AudioDevice::Speakerphone => "Speakerphone",
        }
    }
}

impl PartialEq for AudioDevice {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                AudioDevice::BluetoothHeadset { address: a, .. },
                AudioDevice::BluetoothHeadset { address: b, .. },
            ) => match (a, b) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            },
            _ => self.kind() == other.kind(),
        }
    }
}

impl Eq for AudioDevice {}

impl fmt::Display for AudioDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.kind())
    }
}
