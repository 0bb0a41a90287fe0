pub mod change;
pub mod device;
pub mod registry;
pub mod switch;

pub use change::{AudioDeviceChange, AudioFocus};
pub use device::{AudioDevice, DeviceKind};
pub use registry::{DeviceRegistry, InsertOutcome};
pub use switch::{AudioSwitch, LifecycleState};
