// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for device state.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so a [`DeviceState`](crate::state::DeviceState) can never hold an
//! out-of-range value.
//!
//! # Types
//!
//! - [`Level`] - Brightness level (0-100%)
//! - [`LevelPolicy`] - How out-of-range levels coming from actions are handled

mod level;
mod policy;

pub use level::Level;
pub use policy::LevelPolicy;
