// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state types.
//!
//! [`DeviceState`] is the only mutable part of a device. Its variant is tied
//! to the device kind; [`StateType`] names a variant without its payload and
//! is what errors report when a state does not fit a device.
//!
//! # Examples
//!
//! ```
//! use devctl::state::{DeviceState, StateType};
//!
//! let state = DeviceState::boolean(true);
//! assert_eq!(state.state_type(), StateType::Boolean);
//! assert_eq!(state.is_on(), Some(true));
//! ```

mod device_state;

pub use device_state::{DeviceState, StateType};
