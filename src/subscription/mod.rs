// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for device state updates.
//!
//! Observers learn about device state through a [`Broadcaster`]: every
//! committed snapshot is published to it, and each [`Subscription`]
//! receives the snapshots its [`DeviceFilter`] selects.
//!
//! # Overview
//!
//! - [`Broadcaster`] - fan-out with a per-device latest-value cache
//! - [`Subscription`] - a cancellable feed; also a [`Stream`](tokio_stream::Stream)
//! - [`SubscriptionId`] - identifies a subscription for unsubscribing
//! - [`DeviceFilter`] - all devices, or a set of ids
//! - [`Subscribable`] - trait for anything that hands out subscriptions
//!
//! # Delivery guarantees
//!
//! - A new subscription first receives the latest snapshot of every matching
//!   device it already knows, then live publishes.
//! - Per subscription, snapshots arrive in publish order.
//! - After cancellation nothing more is delivered.
//!
//! # Usage
//!
//! ```
//! use devctl::hub::ControlHub;
//! use devctl::subscription::DeviceFilter;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let hub = ControlHub::sample_home();
//! let mut updates = hub.subscribe(DeviceFilter::All);
//!
//! // One replayed snapshot per registered device
//! for _ in 0..3 {
//!     let device = updates.recv().await.unwrap();
//!     println!("{} is {}", device.id(), device.state());
//! }
//!
//! hub.unsubscribe(updates.id());
//! assert!(updates.recv().await.is_none());
//! # }
//! ```

mod broadcaster;
mod filter;
mod handle;
mod subscribable;

pub use broadcaster::{Broadcaster, SubscriptionId};
pub use filter::DeviceFilter;
pub use handle::Subscription;
pub use subscribable::Subscribable;
