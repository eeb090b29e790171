// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for sources of device updates.

use crate::event::DeviceId;

use super::{Broadcaster, DeviceFilter, Subscription, SubscriptionId};

/// Trait for types that hand out device update subscriptions.
///
/// Implemented by [`Broadcaster`] and by
/// [`ControlHub`](crate::hub::ControlHub), so presenters can be written
/// against either.
///
/// # Examples
///
/// ```
/// use devctl::hub::ControlHub;
/// use devctl::subscription::{Subscribable, Subscription};
///
/// fn watch_everything(source: &impl Subscribable) -> Subscription {
///     source.subscribe_all()
/// }
///
/// let hub = ControlHub::sample_home();
/// let mut updates = watch_everything(&hub);
/// assert!(updates.try_recv().is_some());
/// ```
pub trait Subscribable {
    /// Subscribes to the devices selected by `filter`.
    ///
    /// The latest known snapshot of each matching device is delivered first.
    fn subscribe(&self, filter: DeviceFilter) -> Subscription;

    /// Cancels a subscription by its id.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Subscribes to every device.
    fn subscribe_all(&self) -> Subscription {
        self.subscribe(DeviceFilter::All)
    }

    /// Subscribes to the listed devices.
    fn subscribe_ids<I>(&self, ids: I) -> Subscription
    where
        I: IntoIterator<Item = DeviceId>,
        Self: Sized,
    {
        self.subscribe(DeviceFilter::ids(ids))
    }
}

impl Subscribable for Broadcaster {
    fn subscribe(&self, filter: DeviceFilter) -> Subscription {
        Broadcaster::subscribe(self, filter)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        Broadcaster::unsubscribe(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;

    fn id(raw: &str) -> DeviceId {
        DeviceId::new(raw).unwrap()
    }

    fn first_id(source: &impl Subscribable, ids: Vec<DeviceId>) -> Option<DeviceId> {
        let mut sub = source.subscribe_ids(ids);
        sub.try_recv().map(|d| d.id().clone())
    }

    #[test]
    fn subscribe_ids_through_trait() {
        let broadcaster = Broadcaster::new();
        broadcaster.publish(Device::trigger(id("button")));
        broadcaster.publish(Device::toggle(id("light-1"), false));

        assert_eq!(first_id(&broadcaster, vec![id("light-1")]), Some(id("light-1")));
        assert_eq!(first_id(&broadcaster, vec![id("ghost")]), None);
    }

    #[test]
    fn unsubscribe_through_trait() {
        let broadcaster = Broadcaster::new();
        let sub = Subscribable::subscribe_all(&broadcaster);
        assert!(Subscribable::unsubscribe(&broadcaster, sub.id()));
        assert_eq!(broadcaster.subscriber_count(), 0);
    }
}
