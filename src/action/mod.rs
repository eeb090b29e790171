// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actions that request a device state change.
//!
//! An action source (a UI, a remote command channel) maps its own input
//! format into an [`Action`] and hands it to the
//! [`Dispatcher`](crate::dispatch::Dispatcher) together with the target
//! device id. The outcome can be reported back as an [`ActionResponse`].
//!
//! # Available Actions
//!
//! | Action | Payload | Accepted by |
//! |--------|---------|-------------|
//! | [`Action::Trigger`] | - | stateless triggers |
//! | [`Action::SetBoolean`] | `bool` | toggles, dimmables |
//! | [`Action::SetLevel`] | `f32` (0-100) | dimmables |
//!
//! # Examples
//!
//! ```
//! use devctl::action::{Action, ActionType};
//!
//! let action = Action::SetLevel { value: 55.0 };
//! assert_eq!(action.action_type(), ActionType::SetLevel);
//!
//! let json = serde_json::to_string(&action).unwrap();
//! assert_eq!(json, r#"{"type":"set_level","value":55.0}"#);
//! ```

mod response;

pub use response::ActionResponse;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A typed request to change a device's state.
///
/// `SetLevel` carries the raw value from the action source; it is validated
/// against `[0, 100]` during dispatch according to the configured
/// [`LevelPolicy`](crate::types::LevelPolicy).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Signal that the device was activated.
    Trigger,

    /// Turn the device on or off.
    SetBoolean {
        /// The requested on/off value.
        value: bool,
    },

    /// Set the brightness level.
    SetLevel {
        /// The requested level, expected within `[0, 100]`.
        value: f32,
    },
}

impl Action {
    /// Returns the action type without its payload.
    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        match self {
            Self::Trigger => ActionType::Trigger,
            Self::SetBoolean { .. } => ActionType::SetBoolean,
            Self::SetLevel { .. } => ActionType::SetLevel,
        }
    }

    /// Creates a `SetBoolean` action that turns the device on.
    #[must_use]
    pub const fn turn_on() -> Self {
        Self::SetBoolean { value: true }
    }

    /// Creates a `SetBoolean` action that turns the device off.
    #[must_use]
    pub const fn turn_off() -> Self {
        Self::SetBoolean { value: false }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trigger => f.write_str("trigger"),
            Self::SetBoolean { value } => write!(f, "set_boolean({value})"),
            Self::SetLevel { value } => write!(f, "set_level({value})"),
        }
    }
}

/// Variant tag of an [`Action`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// [`Action::Trigger`].
    Trigger,
    /// [`Action::SetBoolean`].
    SetBoolean,
    /// [`Action::SetLevel`].
    SetLevel,
}

impl ActionType {
    /// Returns the tag name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::SetBoolean => "set_boolean",
            Self::SetLevel => "set_level",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
