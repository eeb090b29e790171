// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control hub for a set of virtual devices.
//!
//! This module provides the high-level API most applications need: one
//! value that registers devices, applies actions and hands out update
//! subscriptions.
//!
//! # Overview
//!
//! The [`ControlHub`] ties together:
//!
//! - a [`Registry`](crate::registry::Registry) holding device state,
//! - a [`Dispatcher`](crate::dispatch::Dispatcher) validating actions,
//! - a [`Broadcaster`](crate::subscription::Broadcaster) fanning out updates.
//!
//! [`HubConfig`] selects how out-of-range levels are handled.
//!
//! # Examples
//!
//! ## Listing devices
//!
//! ```
//! use devctl::hub::ControlHub;
//!
//! let hub = ControlHub::sample_home();
//! for device in hub.list_all() {
//!     println!("{}: {}", device.info().display_name(), device.state());
//! }
//! ```
//!
//! ## Strict level handling
//!
//! ```
//! use devctl::action::{Action, ActionResponse};
//! use devctl::device::Device;
//! use devctl::hub::{ControlHub, HubConfig};
//! use devctl::types::{Level, LevelPolicy};
//!
//! # fn main() -> devctl::Result<()> {
//! let hub = ControlHub::with_config(HubConfig::new().with_level_policy(LevelPolicy::Reject));
//! let id = "dimmer-1".parse()?;
//! hub.register(Device::dimmable(id, Level::MIN, false))?;
//!
//! let id = "dimmer-1".parse()?;
//! let response = hub.perform(&id, Action::SetLevel { value: 150.0 });
//! assert_eq!(response, ActionResponse::Fail);
//! # Ok(())
//! # }
//! ```

mod config;
mod control_hub;

pub use config::HubConfig;
pub use control_hub::ControlHub;
