use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::traits::{AudioDeviceManager, DeviceRouter, DeviceScanner};
use crate::audio::AudioDevice;

/// Mock scanner for testing - provides controllable device liveness.
///
/// Clones share state, so tests can keep a handle after injecting one into
/// the switch.
#[derive(Clone)]
pub struct MockDeviceScanner {
    started: Arc<AtomicBool>,
    start_calls: Arc<AtomicUsize>,
    stop_calls: Arc<AtomicUsize>,
    active_devices: Arc<Mutex<Vec<AudioDevice>>>,
    should_fail_start: Arc<AtomicBool>,
}

impl MockDeviceScanner {
    pub fn new() -> Self {
        Self {
            started: Arc::new(AtomicBool::new(false)),
            start_calls: Arc::new(AtomicUsize::new(0)),
            stop_calls: Arc::new(AtomicUsize::new(0)),
            active_devices: Arc::new(Mutex::new(Vec::new())),
            should_fail_start: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark a device as physically active (or not) for liveness queries.
    pub fn set_device_active(&self, device: AudioDevice, active: bool) {
        let mut devices = self.active_devices.lock().unwrap();
        devices.retain(|known| known != &device);
        if active {
            devices.push(device);
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Relaxed)
    }

    pub fn start_call_count(&self) -> usize {
        self.start_calls.load(Ordering::Relaxed)
    }

    pub fn stop_call_count(&self) -> usize {
        self.stop_calls.load(Ordering::Relaxed)
    }

    /// Configure the mock to fail scanner startup.
    pub fn set_start_failure(&self, should_fail: bool) {
        self.should_fail_start.store(should_fail, Ordering::Relaxed);
    }
}

impl DeviceScanner for MockDeviceScanner {
    fn start(&self) -> Result<()> {
        if self.should_fail_start.load(Ordering::Relaxed) {
            return Err(anyhow::anyhow!("Mock scanner start failure"));
        }
        self.start_calls.fetch_add(1, Ordering::Relaxed);
        self.started.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.stop_calls.fetch_add(1, Ordering::Relaxed);
        self.started.store(false, Ordering::Relaxed);
        Ok(())
    }

    fn is_device_active(&self, device: &AudioDevice) -> bool {
        self.active_devices
            .lock()
            .unwrap()
            .iter()
            .any(|known| known == device)
    }
}

impl Default for MockDeviceScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// A single recorded platform audio control call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCall {
    CacheAudioState,
    RestoreAudioState,
    Mute(bool),
    SetAudioFocus,
    Speakerphone(bool),
    BluetoothSco(bool),
}

/// Mock platform audio manager for testing - records every control call in
/// order and supports audio-focus denial.
#[derive(Clone)]
pub struct MockAudioDeviceManager {
    calls: Arc<Mutex<Vec<ControlCall>>>,
    earpiece_present: Arc<AtomicBool>,
    should_fail_focus: Arc<AtomicBool>,
}

impl MockAudioDeviceManager {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            earpiece_present: Arc::new(AtomicBool::new(true)),
            should_fail_focus: Arc::new(AtomicBool::new(false)),
        }
    }

    /// All control calls made so far, in order.
    pub fn calls(&self) -> Vec<ControlCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn cache_call_count(&self) -> usize {
        self.count(|call| *call == ControlCall::CacheAudioState)
    }

    pub fn restore_call_count(&self) -> usize {
        self.count(|call| *call == ControlCall::RestoreAudioState)
    }

    pub fn focus_call_count(&self) -> usize {
        self.count(|call| *call == ControlCall::SetAudioFocus)
    }

    pub fn mute_calls(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ControlCall::Mute(mute) => Some(mute),
                _ => None,
            })
            .collect()
    }

    pub fn speakerphone_calls(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ControlCall::Speakerphone(enable) => Some(enable),
                _ => None,
            })
            .collect()
    }

    pub fn sco_calls(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ControlCall::BluetoothSco(enable) => Some(enable),
                _ => None,
            })
            .collect()
    }

    /// Configure whether the platform reports an earpiece capability.
    pub fn set_earpiece_present(&self, present: bool) {
        self.earpiece_present.store(present, Ordering::Relaxed);
    }

    /// Configure the mock to deny audio-focus acquisition.
    pub fn set_focus_failure(&self, should_fail: bool) {
        self.should_fail_focus.store(should_fail, Ordering::Relaxed);
    }

    fn count(&self, predicate: impl Fn(&ControlCall) -> bool) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    fn record(&self, call: ControlCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AudioDeviceManager for MockAudioDeviceManager {
    fn cache_audio_state(&self) {
        self.record(ControlCall::CacheAudioState);
    }

    fn restore_audio_state(&self) {
        self.record(ControlCall::RestoreAudioState);
    }

    fn mute(&self, mute: bool) {
        self.record(ControlCall::Mute(mute));
    }

    fn set_audio_focus(&self) -> Result<()> {
        self.record(ControlCall::SetAudioFocus);
        if self.should_fail_focus.load(Ordering::Relaxed) {
            return Err(anyhow::anyhow!("Mock audio focus denial"));
        }
        Ok(())
    }

    fn enable_speakerphone(&self, enable: bool) {
        self.record(ControlCall::Speakerphone(enable));
    }

    fn enable_bluetooth_sco(&self, enable: bool) {
        self.record(ControlCall::BluetoothSco(enable));
    }

    fn has_earpiece(&self) -> bool {
        self.earpiece_present.load(Ordering::Relaxed)
    }
}

impl Default for MockAudioDeviceManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock router for testing - records routed devices and supports routing
/// failure injection.
#[derive(Clone)]
pub struct MockDeviceRouter {
    routed_devices: Arc<Mutex<Vec<AudioDevice>>>,
    restore_calls: Arc<AtomicUsize>,
    should_fail_route: Arc<AtomicBool>,
}

impl MockDeviceRouter {
    pub fn new() -> Self {
        Self {
            routed_devices: Arc::new(Mutex::new(Vec::new())),
            restore_calls: Arc::new(AtomicUsize::new(0)),
            should_fail_route: Arc::new(AtomicBool::new(false)),
        }
    }

    /// All devices routed to so far, in order.
    pub fn routed_devices(&self) -> Vec<AudioDevice> {
        self.routed_devices.lock().unwrap().clone()
    }

    pub fn restore_call_count(&self) -> usize {
        self.restore_calls.load(Ordering::Relaxed)
    }

    /// Configure the mock to fail routing.
    pub fn set_route_failure(&self, should_fail: bool) {
        self.should_fail_route.store(should_fail, Ordering::Relaxed);
    }
}

impl DeviceRouter for MockDeviceRouter {
    fn route_to(&self, device: &AudioDevice) -> Result<()> {
        self.routed_devices.lock().unwrap().push(device.clone());
        if self.should_fail_route.load(Ordering::Relaxed) {
            return Err(anyhow::anyhow!("Mock routing failure"));
        }
        Ok(())
    }

    fn restore_default_routing(&self) -> Result<()> {
        self.restore_calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl Default for MockDeviceRouter {
    fn default() -> Self {
        Self::new()
    }
}
