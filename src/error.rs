// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `devctl` library.
//!
//! Every failure is returned as a typed value so the input layer can tell
//! "unknown device" apart from "wrong action for this device" and message the
//! user accordingly. Nothing in the library panics on bad input.

use thiserror::Error;

use crate::action::ActionType;
use crate::device::DeviceKind;
use crate::event::DeviceId;
use crate::state::StateType;

/// The main error type for this library.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while registering or committing device state.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// An action could not be applied to a device.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A level is outside the allowed `[0, 100]` range.
    #[error("level {0} is out of range [0, 100]")]
    LevelOutOfRange(f32),

    /// A level is NaN or infinite.
    #[error("level {0} is not a finite number")]
    NotFinite(f32),

    /// A device identifier was empty.
    #[error("device id must not be empty")]
    EmptyDeviceId,
}

/// Errors returned by the [`Registry`](crate::registry::Registry).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A device with this id is already registered.
    #[error("device {0} is already registered")]
    DuplicateId(DeviceId),

    /// No device with this id is registered.
    #[error("device {0} not found")]
    NotFound(DeviceId),

    /// The state variant does not belong to the device kind.
    ///
    /// This is a programming error in device construction or in a reducer,
    /// never a user error.
    #[error("{state} state does not fit {kind} device {id}")]
    KindMismatch {
        /// The device the state was meant for.
        id: DeviceId,
        /// The device kind.
        kind: DeviceKind,
        /// The variant of the rejected state.
        state: StateType,
    },
}

/// Errors returned by the [`Dispatcher`](crate::dispatch::Dispatcher).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchError {
    /// The target device is not registered.
    #[error("device {0} not found")]
    DeviceNotFound(DeviceId),

    /// The device kind does not accept this action.
    #[error("{kind} device {id} does not accept {action} actions")]
    UnsupportedAction {
        /// The target device.
        id: DeviceId,
        /// The device kind.
        kind: DeviceKind,
        /// The rejected action type.
        action: ActionType,
    },

    /// The action carried a value the configured policy refuses.
    #[error("invalid action value: {0}")]
    InvalidActionValue(#[from] ValueError),

    /// A reducer produced a state that does not fit the device kind.
    #[error("{state} state does not fit {kind} device {id}")]
    KindMismatch {
        /// The target device.
        id: DeviceId,
        /// The device kind.
        kind: DeviceKind,
        /// The variant of the produced state.
        state: StateType,
    },

    /// The registry failed in a way no action can cause.
    #[error("unexpected registry error: {0}")]
    Registry(RegistryError),
}

impl From<RegistryError> for DispatchError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => Self::DeviceNotFound(id),
            RegistryError::KindMismatch { id, kind, state } => {
                Self::KindMismatch { id, kind, state }
            }
            RegistryError::DuplicateId(_) => {
                tracing::error!(error = %err, "Registration error reached dispatch");
                Self::Registry(err)
            }
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
