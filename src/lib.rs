// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `devctl` - virtual device registry and control update broadcaster.
//!
//! This library keeps a set of virtual devices with typed state, applies
//! typed actions to them and broadcasts every state change to subscribed
//! observers, replaying the latest known state to late subscribers.
//!
//! It is the core behind a "device controls" surface: a presenter renders
//! the [`Device`] snapshots it receives, and an input layer turns user
//! gestures into [`Action`]s. Rendering and input handling stay outside
//! this crate.
//!
//! # Supported Devices
//!
//! - **Stateless trigger**: a push button, accepts `Trigger`
//! - **Toggle**: an on/off device, accepts `SetBoolean`
//! - **Dimmable**: on/off plus a 0-100 level, accepts `SetLevel` and `SetBoolean`
//!
//! # Quick Start
//!
//! ```
//! use devctl::{Action, ControlHub, DeviceFilter, DeviceId};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> devctl::Result<()> {
//!     let hub = ControlHub::sample_home();
//!     let dimmer = DeviceId::new("dimmable-bulb")?;
//!
//!     // Watch the dimmer; the current state arrives first
//!     let mut updates = hub.subscribe(DeviceFilter::from(dimmer.clone()));
//!     let initial = updates.recv().await.unwrap();
//!     println!("initial: {}", initial.state());
//!
//!     // Change it
//!     hub.dispatch(&dimmer, Action::SetLevel { value: 55.0 })?;
//!     hub.dispatch(&dimmer, Action::turn_on())?;
//!
//!     let first = updates.recv().await.unwrap();
//!     let second = updates.recv().await.unwrap();
//!     assert_eq!(second.state().to_string(), "55% (on)");
//!     assert!(first.revision() < second.revision());
//!     Ok(())
//! }
//! ```
//!
//! ## Building Blocks
//!
//! [`ControlHub`] is a thin wiring layer. The parts are public and can be
//! combined directly:
//!
//! ```
//! use devctl::{Action, Broadcaster, Device, DeviceId, Dispatcher, Registry};
//!
//! let registry = Registry::new();
//! let broadcaster = Broadcaster::new();
//! let id = DeviceId::new("light-1").unwrap();
//! registry.register(Device::toggle(id.clone(), false)).unwrap();
//!
//! let light = Dispatcher::new()
//!     .dispatch(&registry, &broadcaster, &id, Action::turn_on())
//!     .unwrap();
//! assert_eq!(light.state().is_on(), Some(true));
//! ```
//!
//! # Logging
//!
//! The library emits [`tracing`] events and never installs a subscriber;
//! applications choose how to collect them.

pub mod action;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod hub;
pub mod registry;
pub mod sample;
pub mod state;
pub mod subscription;
pub mod types;

pub use action::{Action, ActionResponse, ActionType};
pub use device::{Device, DeviceInfo, DeviceKind};
pub use dispatch::Dispatcher;
pub use error::{DispatchError, Error, RegistryError, Result, ValueError};
pub use event::DeviceId;
pub use hub::{ControlHub, HubConfig};
pub use registry::Registry;
pub use state::{DeviceState, StateType};
pub use subscription::{Broadcaster, DeviceFilter, Subscribable, Subscription, SubscriptionId};
pub use types::{Level, LevelPolicy};
