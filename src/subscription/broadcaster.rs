// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Replay-of-latest update broadcaster.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::device::Device;
use crate::event::DeviceId;

use super::filter::DeviceFilter;
use super::handle::Subscription;

/// Unique identifier for a subscription.
///
/// Returned by [`Subscription::id`] and accepted by
/// [`Broadcaster::unsubscribe`]. IDs are never reused by the same
/// broadcaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

#[derive(Debug)]
struct Subscriber {
    filter: DeviceFilter,
    sender: mpsc::UnboundedSender<Device>,
    active: Arc<AtomicBool>,
}

impl Subscriber {
    fn close(&self) {
        self.active.store(false, Ordering::Release);
    }
}

/// State shared by all clones of a broadcaster.
#[derive(Debug, Default)]
pub(super) struct Inner {
    /// Latest snapshot per device.
    latest: HashMap<DeviceId, Device>,
    /// Devices in the order they were first published.
    order: Vec<DeviceId>,
    subscribers: HashMap<SubscriptionId, Subscriber>,
    next_id: u64,
}

impl Inner {
    pub(super) fn remove(&mut self, id: SubscriptionId) -> bool {
        match self.subscribers.remove(&id) {
            Some(subscriber) => {
                subscriber.close();
                tracing::trace!(subscription = %id, "Subscription removed");
                true
            }
            None => false,
        }
    }
}

/// Fan-out of device snapshots with replay of the latest value.
///
/// The broadcaster keeps the most recent snapshot of every device it has
/// seen. A new subscription first receives those snapshots (one per
/// matching device, in first-publication order), then every later matching
/// publish in publish order.
///
/// Each subscription owns an unbounded queue, so [`publish`](Self::publish)
/// never blocks on a slow consumer. A single short critical section guards
/// the cache and the subscriber table; replay and publish both run inside it,
/// which keeps a replayed snapshot from overtaking a newer publish.
///
/// Cloning a broadcaster is cheap; clones share subscribers and cache.
///
/// # Stale snapshots
///
/// A snapshot whose [`revision`](Device::revision) is lower than the cached
/// one for the same device is dropped, so a late publisher can never roll
/// observers back to an older state.
///
/// # Examples
///
/// ```
/// use devctl::device::Device;
/// use devctl::event::DeviceId;
/// use devctl::subscription::{Broadcaster, DeviceFilter};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let broadcaster = Broadcaster::new();
/// let id = DeviceId::new("light-1").unwrap();
///
/// broadcaster.publish(Device::toggle(id.clone(), false));
///
/// // Late subscribers get the latest snapshot first
/// let mut updates = broadcaster.subscribe(DeviceFilter::All);
/// let replayed = updates.recv().await.unwrap();
/// assert_eq!(replayed.id(), &id);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Broadcaster {
    inner: Arc<Mutex<Inner>>,
}

impl Broadcaster {
    /// Creates a broadcaster with no subscribers and an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to snapshots of the devices selected by `filter`.
    ///
    /// The latest known snapshot of each matching device is queued before
    /// this returns.
    #[must_use]
    pub fn subscribe(&self, filter: DeviceFilter) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let active = Arc::new(AtomicBool::new(true));

        let mut inner = self.inner.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;

        let mut replayed = 0usize;
        for device_id in inner.order.iter().filter(|d| filter.matches(d)) {
            if let Some(device) = inner.latest.get(device_id) {
                // The receiver is still in hand, so this cannot fail.
                let _ = sender.send(device.clone());
                replayed += 1;
            }
        }

        inner.subscribers.insert(
            id,
            Subscriber {
                filter,
                sender,
                active: Arc::clone(&active),
            },
        );
        drop(inner);

        tracing::debug!(subscription = %id, replayed, "Subscription created");
        Subscription::new(id, receiver, active, Arc::downgrade(&self.inner))
    }

    /// Cancels a subscription.
    ///
    /// Nothing is delivered to it afterwards and its queue is released.
    /// Returns `true` if the subscription was still active; calling it again
    /// is harmless.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.lock().remove(id)
    }

    /// Publishes a device snapshot to all matching subscriptions.
    ///
    /// Stale snapshots are dropped.
    pub fn publish(&self, device: Device) {
        let _ = self.publish_counted(device);
    }

    /// Publishes a device snapshot and returns how many subscriptions
    /// received it.
    ///
    /// Returns 0 for a stale snapshot or when nobody matches.
    #[must_use = "use `publish` if the delivery count is not needed"]
    pub fn publish_counted(&self, device: Device) -> usize {
        let mut inner = self.inner.lock();
        let id = device.id().clone();

        match inner.latest.get(&id).map(Device::revision) {
            Some(cached) if cached > device.revision() => {
                tracing::debug!(
                    device_id = %id,
                    cached,
                    published = device.revision(),
                    "Dropping stale snapshot"
                );
                return 0;
            }
            Some(_) => {}
            None => inner.order.push(id.clone()),
        }

        let mut delivered = 0usize;
        let mut closed = Vec::new();
        for (sub_id, subscriber) in &inner.subscribers {
            if !subscriber.filter.matches(&id) {
                continue;
            }
            if subscriber.sender.send(device.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(*sub_id);
            }
        }
        for sub_id in closed {
            inner.remove(sub_id);
        }

        tracing::trace!(
            device_id = %id,
            revision = device.revision(),
            delivered,
            "Snapshot published"
        );
        inner.latest.insert(id, device);
        delivered
    }

    /// Returns the cached snapshot of a device.
    #[must_use]
    pub fn latest(&self, id: &DeviceId) -> Option<Device> {
        self.inner.lock().latest.get(id).cloned()
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Returns the number of devices in the latest-value cache.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.inner.lock().latest.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DeviceState;

    fn id(raw: &str) -> DeviceId {
        DeviceId::new(raw).unwrap()
    }

    /// Toggle snapshot at a given revision.
    fn light(raw: &str, on: bool, revision: u64) -> Device {
        let mut device = Device::toggle(id(raw), on);
        for _ in 0..revision {
            device.apply(DeviceState::boolean(on));
        }
        device
    }

    fn drain(sub: &mut Subscription) -> Vec<Device> {
        std::iter::from_fn(|| sub.try_recv()).collect()
    }

    #[test]
    fn new_broadcaster_is_empty() {
        let broadcaster = Broadcaster::new();
        assert_eq!(broadcaster.subscriber_count(), 0);
        assert_eq!(broadcaster.device_count(), 0);
    }

    #[test]
    fn publish_without_subscribers_still_caches() {
        let broadcaster = Broadcaster::new();
        assert_eq!(broadcaster.publish_counted(light("light-1", true, 1)), 0);
        assert_eq!(
            broadcaster.latest(&id("light-1")).unwrap().state(),
            &DeviceState::boolean(true)
        );
    }

    #[test]
    fn subscribe_replays_latest_in_first_publication_order() {
        let broadcaster = Broadcaster::new();
        broadcaster.publish(light("b", false, 0));
        broadcaster.publish(light("a", false, 0));
        broadcaster.publish(light("b", true, 1));

        let mut sub = broadcaster.subscribe(DeviceFilter::All);
        let replay = drain(&mut sub);

        assert_eq!(replay.len(), 2);
        assert_eq!(replay[0].id(), &id("b"));
        assert_eq!(replay[0].state(), &DeviceState::boolean(true));
        assert_eq!(replay[1].id(), &id("a"));
    }

    #[test]
    fn replay_respects_filter() {
        let broadcaster = Broadcaster::new();
        broadcaster.publish(light("a", false, 0));
        broadcaster.publish(light("b", false, 0));

        let mut sub = broadcaster.subscribe(DeviceFilter::from(id("b")));
        let replay = drain(&mut sub);
        assert_eq!(replay.len(), 1);
        assert_eq!(replay[0].id(), &id("b"));
    }

    #[test]
    fn live_publishes_follow_publish_order() {
        let broadcaster = Broadcaster::new();
        let mut sub = broadcaster.subscribe(DeviceFilter::All);

        broadcaster.publish(light("a", true, 1));
        broadcaster.publish(light("b", true, 1));
        broadcaster.publish(light("a", false, 2));

        let ids: Vec<_> = drain(&mut sub)
            .iter()
            .map(|d| (d.id().to_string(), d.revision()))
            .collect();
        assert_eq!(
            ids,
            vec![("a".into(), 1), ("b".into(), 1), ("a".into(), 2)]
        );
    }

    #[test]
    fn filtered_subscription_skips_other_devices() {
        let broadcaster = Broadcaster::new();
        let mut sub = broadcaster.subscribe(DeviceFilter::from(id("a")));

        assert_eq!(broadcaster.publish_counted(light("b", true, 1)), 0);
        assert_eq!(broadcaster.publish_counted(light("a", true, 1)), 1);

        let received = drain(&mut sub);
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].id(), &id("a"));
    }

    #[test]
    fn stale_snapshot_is_dropped() {
        let broadcaster = Broadcaster::new();
        broadcaster.publish(light("a", true, 3));
        let mut sub = broadcaster.subscribe(DeviceFilter::All);
        let _ = drain(&mut sub);

        assert_eq!(broadcaster.publish_counted(light("a", false, 2)), 0);
        assert!(sub.try_recv().is_none());
        assert_eq!(broadcaster.latest(&id("a")).unwrap().revision(), 3);
    }

    #[test]
    fn equal_revision_is_delivered() {
        let broadcaster = Broadcaster::new();
        broadcaster.publish(light("a", false, 0));
        let mut sub = broadcaster.subscribe(DeviceFilter::All);
        let _ = drain(&mut sub);

        assert_eq!(broadcaster.publish_counted(light("a", false, 0)), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let broadcaster = Broadcaster::new();
        let mut sub = broadcaster.subscribe(DeviceFilter::All);
        assert_eq!(broadcaster.subscriber_count(), 1);

        assert!(broadcaster.unsubscribe(sub.id()));
        assert!(!broadcaster.unsubscribe(sub.id()));
        assert_eq!(broadcaster.subscriber_count(), 0);

        broadcaster.publish(light("a", true, 1));
        assert!(sub.try_recv().is_none());
        assert!(!sub.is_active());
    }

    #[test]
    fn unsubscribe_discards_queued_snapshots() {
        let broadcaster = Broadcaster::new();
        let mut sub = broadcaster.subscribe(DeviceFilter::All);
        broadcaster.publish(light("a", true, 1));

        broadcaster.unsubscribe(sub.id());
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let broadcaster = Broadcaster::new();
        let sub = broadcaster.subscribe(DeviceFilter::All);
        let _other = broadcaster.subscribe(DeviceFilter::All);
        assert_eq!(broadcaster.subscriber_count(), 2);

        drop(sub);
        assert_eq!(broadcaster.subscriber_count(), 1);
    }

    #[test]
    fn subscription_ids_are_unique() {
        let broadcaster = Broadcaster::new();
        let a = broadcaster.subscribe(DeviceFilter::All);
        let b = broadcaster.subscribe(DeviceFilter::All);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn clone_shares_state() {
        let broadcaster = Broadcaster::new();
        let clone = broadcaster.clone();

        let _sub = broadcaster.subscribe(DeviceFilter::All);
        assert_eq!(clone.subscriber_count(), 1);

        clone.publish(light("a", true, 1));
        assert!(broadcaster.latest(&id("a")).is_some());
    }

    #[test]
    fn subscription_outlives_broadcaster() {
        let broadcaster = Broadcaster::new();
        broadcaster.publish(light("a", true, 1));
        let mut sub = broadcaster.subscribe(DeviceFilter::All);
        drop(broadcaster);

        assert!(sub.try_recv().is_some());
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn subscription_id_display() {
        let broadcaster = Broadcaster::new();
        let sub = broadcaster.subscribe(DeviceFilter::All);
        assert_eq!(sub.id().to_string(), format!("Sub({})", sub.id().value()));
    }
}
