// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Level;

/// Current state of a virtual device.
///
/// The active variant always matches the owning device's
/// [`DeviceKind`](crate::device::DeviceKind):
///
/// | Kind | State |
/// |------|-------|
/// | `StatelessTrigger` | [`Empty`](Self::Empty) |
/// | `Toggle` | [`Boolean`](Self::Boolean) |
/// | `Dimmable` | [`Range`](Self::Range) |
///
/// # Examples
///
/// ```
/// use devctl::state::DeviceState;
/// use devctl::types::Level;
///
/// let state = DeviceState::range(Level::new(55.0).unwrap(), false);
/// assert_eq!(state.level(), Some(Level::new(55.0).unwrap()));
/// assert_eq!(state.is_on(), Some(false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceState {
    /// No state; the device only reports activity.
    Empty,

    /// A single on/off value.
    Boolean {
        /// Whether the device is on.
        value: bool,
    },

    /// A level with an independent on/off switch.
    Range {
        /// Brightness level.
        level: Level,
        /// Whether the device is on.
        on: bool,
    },
}

impl DeviceState {
    /// Creates a boolean state.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Boolean { value }
    }

    /// Creates a range state.
    #[must_use]
    pub const fn range(level: Level, on: bool) -> Self {
        Self::Range { level, on }
    }

    /// Returns the variant tag of this state.
    #[must_use]
    pub const fn state_type(&self) -> StateType {
        match self {
            Self::Empty => StateType::Empty,
            Self::Boolean { .. } => StateType::Boolean,
            Self::Range { .. } => StateType::Range,
        }
    }

    /// Returns the on/off value, if the state has one.
    #[must_use]
    pub const fn is_on(&self) -> Option<bool> {
        match self {
            Self::Empty => None,
            Self::Boolean { value } => Some(*value),
            Self::Range { on, .. } => Some(*on),
        }
    }

    /// Returns the level, for range states.
    #[must_use]
    pub const fn level(&self) -> Option<Level> {
        match self {
            Self::Range { level, .. } => Some(*level),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("-"),
            Self::Boolean { value: true } => f.write_str("on"),
            Self::Boolean { value: false } => f.write_str("off"),
            Self::Range { level, on } => {
                write!(f, "{level} ({})", if *on { "on" } else { "off" })
            }
        }
    }
}

/// Variant tag of a [`DeviceState`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateType {
    /// [`DeviceState::Empty`].
    Empty,
    /// [`DeviceState::Boolean`].
    Boolean,
    /// [`DeviceState::Range`].
    Range,
}

impl StateType {
    /// Returns the tag name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Boolean => "boolean",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(v: f32) -> Level {
        Level::new(v).unwrap()
    }

    #[test]
    fn state_type_matches_variant() {
        assert_eq!(DeviceState::Empty.state_type(), StateType::Empty);
        assert_eq!(DeviceState::boolean(true).state_type(), StateType::Boolean);
        assert_eq!(
            DeviceState::range(Level::MIN, false).state_type(),
            StateType::Range
        );
    }

    #[test]
    fn is_on_reads_both_variants() {
        assert_eq!(DeviceState::Empty.is_on(), None);
        assert_eq!(DeviceState::boolean(true).is_on(), Some(true));
        assert_eq!(DeviceState::range(level(10.0), true).is_on(), Some(true));
    }

    #[test]
    fn level_only_for_range() {
        assert_eq!(DeviceState::boolean(true).level(), None);
        assert_eq!(
            DeviceState::range(level(30.0), false).level(),
            Some(level(30.0))
        );
    }

    #[test]
    fn display() {
        assert_eq!(DeviceState::Empty.to_string(), "-");
        assert_eq!(DeviceState::boolean(false).to_string(), "off");
        assert_eq!(
            DeviceState::range(level(55.0), true).to_string(),
            "55% (on)"
        );
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(DeviceState::range(level(55.0), true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "range", "level": 55.0, "on": true})
        );

        let json = serde_json::to_value(DeviceState::Empty).unwrap();
        assert_eq!(json, serde_json::json!({"type": "empty"}));
    }

    #[test]
    fn deserialize_rejects_out_of_range_level() {
        let raw = r#"{"type": "range", "level": 120.0, "on": false}"#;
        assert!(serde_json::from_str::<DeviceState>(raw).is_err());
    }
}
