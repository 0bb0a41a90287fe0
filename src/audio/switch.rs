use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use super::change::{AudioDeviceChange, AudioFocus};
use super::device::{AudioDevice, DeviceKind};
use super::registry::{DeviceRegistry, InsertOutcome};
use crate::config::Config;
use crate::error::{Result, SwitchError};
use crate::priority::PriorityPolicy;
use crate::system::{
    AudioDeviceManager, DeviceListener, DeviceRouter, DeviceScanner, PlatformDeviceRouter,
};

/// Lifecycle phase of the switch.
///
/// Owned exclusively by the switch; lifecycle methods and event callbacks
/// must be driven by a single serialized caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Stopped,
    Started,
    Activated,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Stopped => write!(f, "stopped"),
            LifecycleState::Started => write!(f, "started"),
            LifecycleState::Activated => write!(f, "activated"),
        }
    }
}

/// Selects and activates the best available audio device for a call.
///
/// The switch ingests connect/disconnect events from the scanner, keeps a
/// priority-ordered registry of available devices, and exposes a
/// start/activate/deactivate lifecycle that coordinates audio focus, mute,
/// and device-specific routing. Every observable change is published as an
/// [`AudioDeviceChange`] snapshot through a replace-on-write channel.
pub struct AudioSwitch<S, A, R = PlatformDeviceRouter<A>>
where
    S: DeviceScanner,
    A: AudioDeviceManager,
    R: DeviceRouter,
{
    scanner: S,
    audio_manager: Arc<A>,
    router: R,
    registry: DeviceRegistry,
    state: LifecycleState,
    selected_device: Option<AudioDevice>,
    user_selected_device: Option<AudioDevice>,
    audio_focus: AudioFocus,
    change_tx: watch::Sender<AudioDeviceChange>,
    logging_enabled: bool,
}

impl<S: DeviceScanner, A: AudioDeviceManager> AudioSwitch<S, A> {
    /// Create a switch with the default platform router.
    pub fn new(scanner: S, audio_manager: Arc<A>, config: &Config) -> Result<Self> {
        let router = PlatformDeviceRouter::new(audio_manager.clone());
        Self::with_router(scanner, audio_manager, router, config)
    }
}

impl<S, A, R> AudioSwitch<S, A, R>
where
    S: DeviceScanner,
    A: AudioDeviceManager,
    R: DeviceRouter,
{
    /// Create a switch with a custom routing implementation.
    pub fn with_router(scanner: S, audio_manager: Arc<A>, router: R, config: &Config) -> Result<Self> {
        let policy = Arc::new(PriorityPolicy::resolve(&config.preferred_devices)?);
        info!("Preferred device order: {:?}", policy.order());

        let (change_tx, _) = watch::channel(AudioDeviceChange::default());

        Ok(Self {
            scanner,
            audio_manager,
            router,
            registry: DeviceRegistry::new(policy),
            state: LifecycleState::Stopped,
            selected_device: None,
            user_selected_device: None,
            audio_focus: AudioFocus::None,
            change_tx,
            logging_enabled: config.general.logging_enabled,
        })
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The device currently designated as the active audio route.
    pub fn selected_device(&self) -> Option<&AudioDevice> {
        self.selected_device.as_ref()
    }

    /// Currently available devices in priority order.
    pub fn available_devices(&self) -> Vec<AudioDevice> {
        self.registry.snapshot()
    }

    /// Subscribe to change snapshots. The receiver always observes the latest
    /// published value; intermediate values are overwritten, not queued.
    pub fn subscribe(&self) -> watch::Receiver<AudioDeviceChange> {
        self.change_tx.subscribe()
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    pub fn set_logging_enabled(&mut self, enabled: bool) {
        self.logging_enabled = enabled;
    }

    /// Start listening for device changes. Redundant while already started
    /// or activated.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            LifecycleState::Stopped => {
                self.scanner.start()?;
                self.state = LifecycleState::Started;
                info!("Audio switch started");
                Ok(())
            }
            LifecycleState::Started | LifecycleState::Activated => {
                self.log_debug(
                    "Redundant start() invocation while already in the started or activated state",
                );
                Ok(())
            }
        }
    }

    /// Stop listening for device changes, deactivating first if needed.
    /// Redundant while already stopped.
    pub fn stop(&mut self) -> Result<()> {
        match self.state {
            LifecycleState::Activated => {
                self.deactivate()?;
                self.close_scanner()
            }
            LifecycleState::Started => self.close_scanner(),
            LifecycleState::Stopped => {
                self.log_debug("Redundant stop() invocation while already in the stopped state");
                Ok(())
            }
        }
    }

    /// Route audio to the selected device, acquiring audio focus and forcing
    /// mute off. While already activated, only re-asserts the routing for the
    /// selected device. Calling from the stopped state is a programming error.
    ///
    /// The state transition commits before the platform side effects run; a
    /// collaborator failure propagates to the caller but the switch stays
    /// activated.
    pub fn activate(&mut self) -> Result<()> {
        match self.state {
            LifecycleState::Started => {
                self.state = LifecycleState::Activated;
                self.audio_manager.cache_audio_state();
                // Mute is always forced off for call audio
                self.audio_manager.mute(false);
                self.audio_manager.set_audio_focus()?;
                self.audio_focus = AudioFocus::Gain;
                if let Some(device) = self.selected_device.clone() {
                    self.router.route_to(&device)?;
                }
                self.publish_change();
                Ok(())
            }
            LifecycleState::Activated => {
                if let Some(device) = self.selected_device.clone() {
                    self.router.route_to(&device)?;
                }
                Ok(())
            }
            LifecycleState::Stopped => Err(SwitchError::InvalidState {
                operation: "activate",
                state: self.state,
            }),
        }
    }

    /// Restore the audio state captured by [`activate`](Self::activate) and
    /// release audio focus. Redundant unless activated.
    pub fn deactivate(&mut self) -> Result<()> {
        match self.state {
            LifecycleState::Activated => {
                self.router.restore_default_routing()?;
                self.audio_manager.restore_audio_state();
                self.audio_focus = AudioFocus::None;
                self.state = LifecycleState::Started;
                self.publish_change();
                Ok(())
            }
            LifecycleState::Started | LifecycleState::Stopped => {
                self.log_debug("Redundant deactivate() invocation while not in the activated state");
                Ok(())
            }
        }
    }

    /// Record a user override (`None` clears it) and re-run selection. The
    /// override wins over priority ranking only while the scanner reports the
    /// device physically active; it may name a device that is not currently
    /// available.
    pub fn select_device(&mut self, device: Option<AudioDevice>) -> Result<()> {
        if let Some(ref device) = device {
            self.log_debug(&format!("Selected device = {device}"));
        } else {
            self.log_debug("Cleared user device selection");
        }
        self.user_selected_device = device;
        self.select_audio_device(false)
    }

    /// Re-run the selection algorithm after a registry mutation or override
    /// change. `list_changed` reports whether registry membership changed, so
    /// an unchanged selection can still publish a fresh membership snapshot.
    fn select_audio_device(&mut self, list_changed: bool) -> Result<()> {
        let candidate = self.best_device();
        if candidate == self.selected_device {
            if list_changed {
                self.publish_change();
            }
            return Ok(());
        }

        self.log_debug(&format!(
            "Current user selected device = {:?}",
            self.user_selected_device
        ));
        self.selected_device = candidate;

        // Re-assert routing for the new device if a call is in progress. The
        // snapshot is published even when routing fails, so subscribers stay
        // consistent with the updated selection.
        let routing = if self.state == LifecycleState::Activated {
            self.activate()
        } else {
            Ok(())
        };

        self.publish_change();
        routing
    }

    fn best_device(&self) -> Option<AudioDevice> {
        if let Some(user_selected) = &self.user_selected_device {
            if self.scanner.is_device_active(user_selected) {
                return Some(user_selected.clone());
            }
        }
        self.registry
            .snapshot()
            .into_iter()
            .find(|device| self.scanner.is_device_active(device))
    }

    fn close_scanner(&mut self) -> Result<()> {
        self.scanner.stop()?;
        self.state = LifecycleState::Stopped;
        info!("Audio switch stopped");
        Ok(())
    }

    fn publish_change(&self) {
        let change = AudioDeviceChange {
            audio_devices: self.registry.snapshot(),
            selected_device: self.selected_device.clone(),
            audio_focus: self.audio_focus,
        };
        self.log_debug(&format!("Publishing device change: {change}"));
        self.change_tx.send_replace(change);
    }

    fn log_debug(&self, message: &str) {
        if self.logging_enabled {
            debug!("{message}");
        }
    }
}

impl<S, A, R> DeviceListener for AudioSwitch<S, A, R>
where
    S: DeviceScanner,
    A: AudioDeviceManager,
    R: DeviceRouter,
{
    fn on_device_connected(&mut self, device: AudioDevice) -> Result<()> {
        self.log_debug(&format!("on_device_connected({device})"));
        match self.registry.insert(device) {
            InsertOutcome::Added => self.select_audio_device(true),
            InsertOutcome::AlreadyPresent => self.select_audio_device(false),
            // Earpiece stays suppressed while a wired headset is plugged in
            InsertOutcome::Rejected => Ok(()),
        }
    }

    fn on_device_disconnected(&mut self, device: AudioDevice) -> Result<()> {
        self.log_debug(&format!("on_device_disconnected({device})"));
        let removed = self.registry.remove(&device);

        if self.user_selected_device.as_ref() == Some(&device) {
            self.user_selected_device = None;
        }

        // Unplugging the wired headset makes the earpiece eligible again
        if device.kind() == DeviceKind::WiredHeadset && removed && self.audio_manager.has_earpiece()
        {
            self.registry.insert(AudioDevice::Earpiece);
        }

        self.select_audio_device(removed)
    }
}
