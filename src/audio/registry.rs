use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::device::{AudioDevice, DeviceKind};
use crate::priority::PriorityPolicy;

/// Outcome of an insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The device was added and membership changed.
    Added,
    /// A device of this kind was already present; the existing entry is kept.
    AlreadyPresent,
    /// An Earpiece was offered while a WiredHeadset is present; the entry is
    /// dropped entirely rather than recorded.
    Rejected,
}

/// Priority-ordered set of currently available devices, deduplicated by kind.
///
/// The registry synchronizes internally, so event-delivery threads can insert
/// and remove while the selection algorithm reads snapshots. It never holds an
/// Earpiece and a WiredHeadset at the same time: inserting a WiredHeadset
/// evicts any Earpiece, and inserting an Earpiece next to a WiredHeadset is
/// rejected.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    policy: Arc<PriorityPolicy>,
    devices: Arc<Mutex<BTreeMap<usize, AudioDevice>>>,
}

impl DeviceRegistry {
    pub fn new(policy: Arc<PriorityPolicy>) -> Self {
        Self {
            policy,
            devices: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    pub fn insert(&self, device: AudioDevice) -> InsertOutcome {
        let mut devices = self.devices.lock().unwrap();
        let kind = device.kind();

        if kind == DeviceKind::Earpiece
            && devices.contains_key(&self.policy.rank(DeviceKind::WiredHeadset))
        {
            return InsertOutcome::Rejected;
        }

        let rank = self.policy.rank(kind);
        if devices.contains_key(&rank) {
            return InsertOutcome::AlreadyPresent;
        }

        if kind == DeviceKind::WiredHeadset {
            devices.remove(&self.policy.rank(DeviceKind::Earpiece));
        }
        devices.insert(rank, device);
        InsertOutcome::Added
    }

    /// Remove the entry matching the device's kind. Returns whether
    /// membership changed.
    pub fn remove(&self, device: &AudioDevice) -> bool {
        self.devices
            .lock()
            .unwrap()
            .remove(&self.policy.rank(device.kind()))
            .is_some()
    }

    pub fn contains_kind(&self, kind: DeviceKind) -> bool {
        self.devices
            .lock()
            .unwrap()
            .contains_key(&self.policy.rank(kind))
    }

    pub fn contains(&self, device: &AudioDevice) -> bool {
        self.contains_kind(device.kind())
    }

    /// The current membership in priority order, best-ranked first.
    pub fn snapshot(&self) -> Vec<AudioDevice> {
        self.devices.lock().unwrap().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.devices.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.lock().unwrap().is_empty()
    }
}
