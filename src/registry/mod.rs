// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device registry.
//!
//! The [`Registry`] owns every registered [`Device`] and is the only place
//! device state lives. Readers get snapshot copies; writers replace a
//! device's state through [`commit`](Registry::commit) or
//! [`commit_with`](Registry::commit_with).
//!
//! The registry never publishes. Wiring commits to observers is the job of
//! the [`Dispatcher`](crate::dispatch::Dispatcher) and the
//! [`ControlHub`](crate::hub::ControlHub).
//!
//! # Locking
//!
//! Each entry has its own mutex, so commits to different devices run in
//! parallel. The id map sits behind a reader/writer lock that is only held
//! long enough to find an entry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::device::Device;
use crate::error::RegistryError;
use crate::event::DeviceId;
use crate::state::DeviceState;

type Entry = Arc<Mutex<Device>>;

#[derive(Debug, Default)]
struct Entries {
    /// Registration order.
    order: Vec<DeviceId>,
    by_id: HashMap<DeviceId, Entry>,
}

/// Set of registered devices keyed by [`DeviceId`].
///
/// Enumeration follows registration order. Devices are never removed.
///
/// # Examples
///
/// ```
/// use devctl::device::Device;
/// use devctl::event::DeviceId;
/// use devctl::registry::Registry;
/// use devctl::state::DeviceState;
///
/// let registry = Registry::new();
/// let id = DeviceId::new("light-1").unwrap();
/// registry.register(Device::toggle(id.clone(), false)).unwrap();
///
/// let updated = registry.commit(&id, DeviceState::boolean(true)).unwrap();
/// assert_eq!(updated.state(), &DeviceState::boolean(true));
/// assert_eq!(registry.get(&id), Some(updated));
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<Entries>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a device and returns the stored snapshot.
    ///
    /// The revision restarts at zero whatever the incoming snapshot carried.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateId` if a device with the same id is
    /// already registered. The registered device is left untouched.
    pub fn register(&self, device: Device) -> Result<Device, RegistryError> {
        let mut entries = self.entries.write();
        if entries.by_id.contains_key(device.id()) {
            tracing::warn!(device_id = %device.id(), "Duplicate device registration");
            return Err(RegistryError::DuplicateId(device.id().clone()));
        }

        let device = device.into_registered();
        let id = device.id().clone();
        tracing::debug!(device_id = %id, kind = %device.kind(), "Device registered");
        entries.order.push(id.clone());
        entries
            .by_id
            .insert(id, Arc::new(Mutex::new(device.clone())));
        Ok(device)
    }

    /// Returns a snapshot of a device.
    #[must_use]
    pub fn get(&self, id: &DeviceId) -> Option<Device> {
        self.entry(id).map(|entry| entry.lock().clone())
    }

    /// Returns snapshots of all devices in registration order.
    #[must_use]
    pub fn list_all(&self) -> Vec<Device> {
        let entries = self.entries.read();
        entries
            .order
            .iter()
            .filter_map(|id| entries.by_id.get(id))
            .map(|entry| entry.lock().clone())
            .collect()
    }

    /// Returns whether a device with this id is registered.
    #[must_use]
    pub fn contains(&self, id: &DeviceId) -> bool {
        self.entries.read().by_id.contains_key(id)
    }

    /// Returns the ids of all devices in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<DeviceId> {
        self.entries.read().order.clone()
    }

    /// Returns the number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().order.len()
    }

    /// Returns `true` if no device is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().order.is_empty()
    }

    /// Replaces a device's state and returns the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` for an unknown id, or
    /// `RegistryError::KindMismatch` if `state` does not fit the device kind.
    /// The device is unchanged on error.
    pub fn commit(&self, id: &DeviceId, state: DeviceState) -> Result<Device, RegistryError> {
        self.commit_with(id, |_| Ok::<_, RegistryError>(state))
    }

    /// Computes and commits a new state while holding the device's lock.
    ///
    /// `f` receives the current snapshot. No other commit to the same device
    /// can interleave between reading the snapshot and storing the result.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or `NotFound` / `KindMismatch`
    /// converted into `E`. The device is unchanged on error.
    pub fn commit_with<F, E>(&self, id: &DeviceId, f: F) -> Result<Device, E>
    where
        F: FnOnce(&Device) -> Result<DeviceState, E>,
        E: From<RegistryError>,
    {
        let entry = self
            .entry(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;

        let mut device = entry.lock();
        let state = f(&device)?;

        if !device.kind().accepts_state(&state) {
            tracing::error!(
                device_id = %id,
                kind = %device.kind(),
                state = %state.state_type(),
                "Refusing state that does not fit device kind"
            );
            return Err(RegistryError::KindMismatch {
                id: id.clone(),
                kind: device.kind(),
                state: state.state_type(),
            }
            .into());
        }

        device.apply(state);
        tracing::trace!(
            device_id = %id,
            revision = device.revision(),
            state = %device.state(),
            "State committed"
        );
        Ok(device.clone())
    }

    fn entry(&self, id: &DeviceId) -> Option<Entry> {
        self.entries.read().by_id.get(id).cloned()
    }
}
