// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription handle returned by the broadcaster.

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use parking_lot::Mutex;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio_stream::Stream;

use crate::device::Device;

use super::broadcaster::{Inner, SubscriptionId};

/// A live feed of device snapshots.
///
/// Created by [`Broadcaster::subscribe`](super::Broadcaster::subscribe).
/// Consume it with [`recv`](Self::recv), [`try_recv`](Self::try_recv) or as
/// a [`Stream`]. The feed ends (yields `None`) once the subscription is
/// cancelled, either through [`unsubscribe`](Self::unsubscribe) or
/// [`Broadcaster::unsubscribe`](super::Broadcaster::unsubscribe), or when
/// every broadcaster clone is gone and the queue is drained.
///
/// Dropping the handle cancels the subscription.
///
/// # Examples
///
/// ```
/// use devctl::device::Device;
/// use devctl::event::DeviceId;
/// use devctl::subscription::{Broadcaster, DeviceFilter};
/// use tokio_stream::StreamExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let broadcaster = Broadcaster::new();
/// let mut updates = broadcaster.subscribe(DeviceFilter::All);
///
/// broadcaster.publish(Device::toggle(DeviceId::new("light-1").unwrap(), true));
///
/// let device = updates.next().await.unwrap();
/// assert_eq!(device.state().is_on(), Some(true));
/// # }
/// ```
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: mpsc::UnboundedReceiver<Device>,
    active: Arc<AtomicBool>,
    broadcaster: Weak<Mutex<Inner>>,
}

impl Subscription {
    pub(super) fn new(
        id: SubscriptionId,
        receiver: mpsc::UnboundedReceiver<Device>,
        active: Arc<AtomicBool>,
        broadcaster: Weak<Mutex<Inner>>,
    ) -> Self {
        Self {
            id,
            receiver,
            active,
            broadcaster,
        }
    }

    /// Returns the subscription id.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns `false` once the subscription has been cancelled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Waits for the next snapshot.
    ///
    /// Returns `None` once the subscription is cancelled. Cancel-safe.
    pub async fn recv(&mut self) -> Option<Device> {
        if !self.is_active() {
            self.release();
            return None;
        }
        let device = self.receiver.recv().await;
        self.accept(device)
    }

    /// Returns the next queued snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<Device> {
        if !self.is_active() {
            self.release();
            return None;
        }
        match self.receiver.try_recv() {
            Ok(device) => self.accept(Some(device)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => self.accept(None),
        }
    }

    /// Cancels the subscription.
    ///
    /// Returns `true` if it was still active.
    pub fn unsubscribe(&mut self) -> bool {
        let removed = self
            .broadcaster
            .upgrade()
            .is_some_and(|inner| inner.lock().remove(self.id));
        let was_active = self.active.swap(false, Ordering::AcqRel);
        self.release();
        removed || was_active
    }

    /// Filters out snapshots that raced with a cancellation.
    fn accept(&mut self, device: Option<Device>) -> Option<Device> {
        match device {
            Some(device) if self.is_active() => Some(device),
            Some(_) => {
                self.release();
                None
            }
            None => {
                self.active.store(false, Ordering::Release);
                None
            }
        }
    }

    /// Drops anything still queued.
    fn release(&mut self) {
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
    }
}

impl Stream for Subscription {
    type Item = Device;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if !this.is_active() {
            this.release();
            return Poll::Ready(None);
        }
        this.receiver
            .poll_recv(cx)
            .map(|device| this.accept(device))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.broadcaster.upgrade() {
            inner.lock().remove(self.id);
        }
    }
}
