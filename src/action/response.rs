// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coarse outcome codes for action sources.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::DispatchError;

/// Outcome of an action, as reported back to the action source.
///
/// Host control surfaces usually only distinguish success, a refused action
/// and an unknown target.
///
/// # Examples
///
/// ```
/// use devctl::action::ActionResponse;
/// use devctl::error::DispatchError;
/// use devctl::event::DeviceId;
///
/// let missing = DeviceId::new("garage-door").unwrap();
/// let err = DispatchError::DeviceNotFound(missing);
/// assert_eq!(ActionResponse::from_error(&err), ActionResponse::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionResponse {
    /// The action was applied.
    Ok,
    /// The device exists but refused the action.
    Fail,
    /// The target device is unknown.
    Unknown,
}

impl ActionResponse {
    /// Maps a dispatch error to a response code.
    #[must_use]
    pub const fn from_error(err: &DispatchError) -> Self {
        match err {
            DispatchError::DeviceNotFound(_) => Self::Unknown,
            DispatchError::UnsupportedAction { .. }
            | DispatchError::InvalidActionValue(_)
            | DispatchError::KindMismatch { .. }
            | DispatchError::Registry(_) => Self::Fail,
        }
    }

    /// Maps a dispatch outcome to a response code.
    #[must_use]
    pub const fn from_result(result: &Result<Device, DispatchError>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(err) => Self::from_error(err),
        }
    }

    /// Returns `true` for [`Ok`](Self::Ok).
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ActionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::Fail => f.write_str("FAIL"),
            Self::Unknown => f.write_str("UNKNOWN"),
        }
    }
}
