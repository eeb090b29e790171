// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identity shared by registry, dispatcher and broadcaster.
//!
//! Update events themselves are plain [`Device`](crate::device::Device)
//! snapshots delivered through [`subscription`](crate::subscription); this
//! module only holds the key they are routed by.
//!
//! # Examples
//!
//! ```
//! use devctl::event::DeviceId;
//!
//! let id: DeviceId = "toggle-button".parse().unwrap();
//! assert_eq!(id.to_string(), "toggle-button");
//!
//! let generated = DeviceId::random();
//! assert_ne!(generated, DeviceId::random());
//! ```

mod device_id;

pub use device_id::DeviceId;
