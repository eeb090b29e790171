// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Virtual devices.
//!
//! A [`Device`] is an immutable identity ([`DeviceId`], [`DeviceKind`],
//! [`DeviceInfo`]) plus a mutable [`DeviceState`]. Values of this type are
//! snapshots: the [`Registry`](crate::registry::Registry) owns the live
//! device and hands out copies, so changing a snapshot never affects the
//! registered device.
//!
//! # Kinds
//!
//! | Kind | State | Accepted actions |
//! |------|-------|------------------|
//! | [`DeviceKind::StatelessTrigger`] | `Empty` | `Trigger` |
//! | [`DeviceKind::Toggle`] | `Boolean` | `SetBoolean` |
//! | [`DeviceKind::Dimmable`] | `Range` | `SetLevel`, `SetBoolean` |
//!
//! # Examples
//!
//! ```
//! use devctl::device::{Device, DeviceInfo, DeviceKind};
//! use devctl::event::DeviceId;
//! use devctl::state::DeviceState;
//!
//! let id = DeviceId::new("light-1").unwrap();
//! let light = Device::toggle(id, false).with_info(DeviceInfo::new().with_title("Bulb"));
//!
//! assert_eq!(light.kind(), DeviceKind::Toggle);
//! assert_eq!(light.state(), &DeviceState::boolean(false));
//! assert_eq!(light.revision(), 0);
//! ```

mod info;
mod kind;

pub use info::DeviceInfo;
pub use kind::DeviceKind;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::event::DeviceId;
use crate::state::DeviceState;
use crate::types::Level;

/// Snapshot of a virtual device.
///
/// The state variant always matches the kind; constructors refuse any other
/// combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDevice")]
pub struct Device {
    id: DeviceId,
    kind: DeviceKind,
    state: DeviceState,
    #[serde(skip_serializing_if = "DeviceInfo::is_empty")]
    info: DeviceInfo,
    revision: u64,
}

impl Device {
    /// Creates a device in the initial state of its kind.
    #[must_use]
    pub fn new(id: DeviceId, kind: DeviceKind) -> Self {
        Self {
            id,
            kind,
            state: kind.initial_state(),
            info: DeviceInfo::default(),
            revision: 0,
        }
    }

    /// Creates a device with an explicit initial state.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::KindMismatch` if `state` is not the variant
    /// `kind` holds.
    pub fn with_state(
        id: DeviceId,
        kind: DeviceKind,
        state: DeviceState,
    ) -> Result<Self, RegistryError> {
        if !kind.accepts_state(&state) {
            return Err(RegistryError::KindMismatch {
                id,
                kind,
                state: state.state_type(),
            });
        }
        Ok(Self {
            state,
            ..Self::new(id, kind)
        })
    }

    /// Creates a stateless trigger device.
    #[must_use]
    pub fn trigger(id: DeviceId) -> Self {
        Self::new(id, DeviceKind::StatelessTrigger)
    }

    /// Creates a toggle device with the given on/off value.
    #[must_use]
    pub fn toggle(id: DeviceId, on: bool) -> Self {
        Self {
            state: DeviceState::boolean(on),
            ..Self::new(id, DeviceKind::Toggle)
        }
    }

    /// Creates a dimmable device with the given level and on/off value.
    #[must_use]
    pub fn dimmable(id: DeviceId, level: Level, on: bool) -> Self {
        Self {
            state: DeviceState::range(level, on),
            ..Self::new(id, DeviceKind::Dimmable)
        }
    }

    /// Attaches descriptive metadata.
    #[must_use]
    pub fn with_info(mut self, info: DeviceInfo) -> Self {
        self.info = info;
        self
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Returns the device kind.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Returns the descriptive metadata.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Returns how many commits have been applied since registration.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the state and bumps the revision.
    ///
    /// Callers check the kind first; see
    /// [`Registry::commit`](crate::registry::Registry::commit).
    pub(crate) fn apply(&mut self, state: DeviceState) {
        debug_assert!(self.kind.accepts_state(&state));
        self.state = state;
        self.revision = self.revision.saturating_add(1);
    }

    /// Restarts the revision count for a freshly registered device.
    pub(crate) fn into_registered(self) -> Self {
        Self { revision: 0, ..self }
    }
}

/// Unchecked wire form of a [`Device`], validated on conversion.
#[derive(Deserialize)]
struct RawDevice {
    id: DeviceId,
    kind: DeviceKind,
    state: DeviceState,
    #[serde(default)]
    info: DeviceInfo,
    #[serde(default)]
    revision: u64,
}

impl TryFrom<RawDevice> for Device {
    type Error = RegistryError;

    fn try_from(raw: RawDevice) -> Result<Self, Self::Error> {
        let mut device = Self::with_state(raw.id, raw.kind, raw.state)?;
        device.info = raw.info;
        device.revision = raw.revision;
        Ok(device)
    }
}
