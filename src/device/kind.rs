// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device kinds and the capabilities each one carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::ActionType;
use crate::state::{DeviceState, StateType};
use crate::types::Level;

/// Closed set of device categories.
///
/// The kind is fixed when a device is created. It decides which actions the
/// device accepts and which [`DeviceState`] variant it holds.
///
/// # Examples
///
/// ```
/// use devctl::action::ActionType;
/// use devctl::device::DeviceKind;
/// use devctl::state::StateType;
///
/// let kind = DeviceKind::Dimmable;
/// assert_eq!(kind.state_type(), StateType::Range);
/// assert!(kind.supports(ActionType::SetLevel));
/// assert!(kind.supports(ActionType::SetBoolean));
/// assert!(!kind.supports(ActionType::Trigger));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// A push button without state.
    StatelessTrigger,
    /// An on/off device.
    Toggle,
    /// An on/off device with an independent brightness level.
    Dimmable,
}

impl DeviceKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 3] = [Self::StatelessTrigger, Self::Toggle, Self::Dimmable];

    /// Returns the state variant devices of this kind hold.
    #[must_use]
    pub const fn state_type(&self) -> StateType {
        match self {
            Self::StatelessTrigger => StateType::Empty,
            Self::Toggle => StateType::Boolean,
            Self::Dimmable => StateType::Range,
        }
    }

    /// Returns the action types devices of this kind accept.
    #[must_use]
    pub const fn accepted_actions(&self) -> &'static [ActionType] {
        match self {
            Self::StatelessTrigger => &[ActionType::Trigger],
            Self::Toggle => &[ActionType::SetBoolean],
            Self::Dimmable => &[ActionType::SetLevel, ActionType::SetBoolean],
        }
    }

    /// Returns whether devices of this kind accept the given action type.
    #[must_use]
    pub fn supports(&self, action: ActionType) -> bool {
        self.accepted_actions().contains(&action)
    }

    /// Returns whether `state` is the variant this kind holds.
    #[must_use]
    pub fn accepts_state(&self, state: &DeviceState) -> bool {
        state.state_type() == self.state_type()
    }

    /// Returns the initial state of a freshly created device: empty, off, or
    /// off at level 0.
    #[must_use]
    pub const fn initial_state(&self) -> DeviceState {
        match self {
            Self::StatelessTrigger => DeviceState::Empty,
            Self::Toggle => DeviceState::boolean(false),
            Self::Dimmable => DeviceState::range(Level::MIN, false),
        }
    }

    /// Returns the kind name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StatelessTrigger => "stateless_trigger",
            Self::Toggle => "toggle",
            Self::Dimmable => "dimmable",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_types() {
        assert_eq!(DeviceKind::StatelessTrigger.state_type(), StateType::Empty);
        assert_eq!(DeviceKind::Toggle.state_type(), StateType::Boolean);
        assert_eq!(DeviceKind::Dimmable.state_type(), StateType::Range);
    }

    #[test]
    fn trigger_accepts_only_trigger() {
        let kind = DeviceKind::StatelessTrigger;
        assert!(kind.supports(ActionType::Trigger));
        assert!(!kind.supports(ActionType::SetBoolean));
        assert!(!kind.supports(ActionType::SetLevel));
    }

    #[test]
    fn toggle_accepts_only_set_boolean() {
        let kind = DeviceKind::Toggle;
        assert!(kind.supports(ActionType::SetBoolean));
        assert!(!kind.supports(ActionType::Trigger));
        assert!(!kind.supports(ActionType::SetLevel));
    }

    #[test]
    fn initial_state_fits_kind() {
        for kind in DeviceKind::ALL {
            assert!(kind.accepts_state(&kind.initial_state()), "{kind}");
        }
    }

    #[test]
    fn accepts_state_rejects_other_variants() {
        assert!(!DeviceKind::Toggle.accepts_state(&DeviceState::Empty));
        assert!(!DeviceKind::Dimmable.accepts_state(&DeviceState::boolean(true)));
    }

    #[test]
    fn display_and_serde_agree() {
        for kind in DeviceKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
