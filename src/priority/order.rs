use tracing::debug;

use crate::audio::DeviceKind;
use crate::error::{Result, SwitchError};

/// Built-in preference order used when the caller supplies none.
pub const DEFAULT_PREFERRED_ORDER: [DeviceKind; 4] = [
    DeviceKind::BluetoothHeadset,
    DeviceKind::WiredHeadset,
    DeviceKind::Earpiece,
    DeviceKind::Speakerphone,
];

/// Resolved device-kind ordering used to rank available devices.
///
/// Resolution moves the caller's kinds to the front in the order given; the
/// remaining default kinds keep their relative order after them. The resolved
/// order always contains each of the four kinds exactly once.
#[derive(Debug, Clone)]
pub struct PriorityPolicy {
    order: Vec<DeviceKind>,
}

impl PriorityPolicy {
    /// Resolve a caller-supplied preference list against the default order.
    /// A list naming the same kind twice is a configuration error.
    pub fn resolve(preferred: &[DeviceKind]) -> Result<Self> {
        if let Some(duplicate) = first_duplicate(preferred) {
            return Err(SwitchError::DuplicatePreferredDevice(duplicate));
        }

        let order = if preferred.is_empty() || preferred == DEFAULT_PREFERRED_ORDER {
            DEFAULT_PREFERRED_ORDER.to_vec()
        } else {
            let mut order = preferred.to_vec();
            order.extend(
                DEFAULT_PREFERRED_ORDER
                    .iter()
                    .copied()
                    .filter(|kind| !preferred.contains(kind)),
            );
            order
        };

        debug!("Resolved preferred device order: {:?}", order);
        Ok(Self { order })
    }

    /// Rank of a kind in the resolved order; lower ranks are selected first.
    pub fn rank(&self, kind: DeviceKind) -> usize {
        self.order
            .iter()
            .position(|&candidate| candidate == kind)
            .unwrap_or(self.order.len())
    }

    pub fn order(&self) -> &[DeviceKind] {
        &self.order
    }
}

fn first_duplicate(kinds: &[DeviceKind]) -> Option<DeviceKind> {
    kinds
        .iter()
        .enumerate()
        .find(|(index, kind)| kinds[..*index].contains(kind))
        .map(|(_, kind)| *kind)
}
