use std::fmt;

use super::device::AudioDevice;

/// Platform audio-focus state carried in change snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFocus {
    #[default]
    None,
    Gain,
    Loss,
    GainTransient,
}

impl fmt::Display for AudioFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioFocus::None => write!(f, "AUDIOFOCUS_NONE"),
            AudioFocus::Gain => write!(f, "AUDIOFOCUS_GAIN"),
            AudioFocus::Loss => write!(f, "AUDIOFOCUS_LOSS"),
            AudioFocus::GainTransient => write!(f, "AUDIOFOCUS_GAIN_TRANSIENT"),
        }
    }
}

/// Immutable snapshot published on every observable change.
///
/// Snapshots travel through a single-slot replace-on-write channel: a late
/// subscriber sees only the most recent value, not history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioDeviceChange {
    /// Currently available devices in priority order.
    pub audio_devices: Vec<AudioDevice>,
    /// The device currently designated as the active audio route.
    pub selected_device: Option<AudioDevice>,
    pub audio_focus: AudioFocus,
}

impl fmt::Display for AudioDeviceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.audio_devices.iter().map(AudioDevice::name).collect();
        write!(
            f,
            "{} {} {:?}",
            self.audio_focus,
            self.selected_device
                .as_ref()
                .map(AudioDevice::name)
                .unwrap_or("none"),
            names
        )
    }
}
