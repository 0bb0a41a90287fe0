pub mod audio;
pub mod config;
pub mod error;
pub mod logging;
pub mod priority;
pub mod system;

pub use audio::{AudioDevice, AudioDeviceChange, AudioFocus, AudioSwitch, DeviceKind, LifecycleState};
pub use config::Config;
pub use error::{Result, SwitchError};
