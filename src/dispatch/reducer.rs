// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-kind state reducers.
//!
//! A reducer is a pure function from the current device snapshot and an
//! action to the next state. There is exactly one reducer per
//! [`DeviceKind`]; [`reducer_for`] is the lookup table.

use crate::action::Action;
use crate::device::{Device, DeviceKind};
use crate::error::DispatchError;
use crate::state::DeviceState;
use crate::types::LevelPolicy;

/// Computes the next state of a device, or why the action is refused.
pub(crate) type Reducer = fn(&Device, Action, LevelPolicy) -> Result<DeviceState, DispatchError>;

/// Returns the reducer for a device kind.
pub(crate) fn reducer_for(kind: DeviceKind) -> Reducer {
    match kind {
        DeviceKind::StatelessTrigger => reduce_trigger,
        DeviceKind::Toggle => reduce_toggle,
        DeviceKind::Dimmable => reduce_dimmable,
    }
}

fn reduce_trigger(
    device: &Device,
    action: Action,
    _: LevelPolicy,
) -> Result<DeviceState, DispatchError> {
    match action {
        // Nothing to change; the commit still records the activation.
        Action::Trigger => Ok(*device.state()),
        _ => Err(unsupported(device, action)),
    }
}

fn reduce_toggle(
    device: &Device,
    action: Action,
    _: LevelPolicy,
) -> Result<DeviceState, DispatchError> {
    match action {
        Action::SetBoolean { value } => Ok(DeviceState::boolean(value)),
        _ => Err(unsupported(device, action)),
    }
}

fn reduce_dimmable(
    device: &Device,
    action: Action,
    policy: LevelPolicy,
) -> Result<DeviceState, DispatchError> {
    let DeviceState::Range { level, on } = *device.state() else {
        return Err(DispatchError::KindMismatch {
            id: device.id().clone(),
            kind: device.kind(),
            state: device.state().state_type(),
        });
    };

    match action {
        Action::SetLevel { value } => Ok(DeviceState::range(policy.apply(value)?, on)),
        Action::SetBoolean { value } => Ok(DeviceState::range(level, value)),
        Action::Trigger => Err(unsupported(device, action)),
    }
}

fn unsupported(device: &Device, action: Action) -> DispatchError {
    DispatchError::UnsupportedAction {
        id: device.id().clone(),
        kind: device.kind(),
        action: action.action_type(),
    }
}
