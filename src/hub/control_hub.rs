// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control hub wiring registry, dispatcher and broadcaster together.

use std::sync::Arc;

use crate::action::{Action, ActionResponse};
use crate::device::Device;
use crate::dispatch::Dispatcher;
use crate::error::{DispatchError, RegistryError};
use crate::event::DeviceId;
use crate::registry::Registry;
use crate::sample;
use crate::state::DeviceState;
use crate::subscription::{
    Broadcaster, DeviceFilter, Subscribable, Subscription, SubscriptionId,
};

use super::config::HubConfig;

/// Hub for a set of virtual devices.
///
/// The `ControlHub` owns one [`Registry`], one [`Broadcaster`] and one
/// [`Dispatcher`] and keeps them consistent:
///
/// - **Registration** adds the device and seeds the broadcaster with its
///   initial snapshot, so every subscriber learns about it.
/// - **Dispatch** validates the action, commits the new state and publishes
///   the updated snapshot.
/// - **Subscriptions** replay the latest snapshot of each matching device,
///   then follow live changes.
///
/// Cloning a hub is cheap and every clone shares the same devices and
/// subscribers, so it can be handed to several producers and consumers.
///
/// # Examples
///
/// ```
/// use devctl::action::Action;
/// use devctl::event::DeviceId;
/// use devctl::hub::ControlHub;
/// use devctl::sample;
/// use devctl::subscription::DeviceFilter;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> devctl::Result<()> {
/// let hub = ControlHub::sample_home();
/// let bulb = DeviceId::new(sample::TOGGLE_ID)?;
///
/// let mut updates = hub.subscribe(DeviceFilter::from(bulb));
///
/// // Replay of the current state
/// let current = updates.recv().await.unwrap();
/// assert_eq!(current.state().is_on(), Some(false));
///
/// // Live update after an action
/// hub.dispatch(current.id(), Action::turn_on())?;
/// let updated = updates.recv().await.unwrap();
/// assert_eq!(updated.state().is_on(), Some(true));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControlHub {
    registry: Arc<Registry>,
    broadcaster: Broadcaster,
    dispatcher: Dispatcher,
}

impl ControlHub {
    /// Creates an empty hub with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty hub with the given configuration.
    #[must_use]
    pub fn with_config(config: HubConfig) -> Self {
        Self {
            dispatcher: Dispatcher::with_policy(config.level_policy),
            ..Self::default()
        }
    }

    /// Creates a hub with the default configuration and registers `devices`
    /// in order.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateId` if two devices share an id.
    pub fn with_devices<I>(devices: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Device>,
    {
        let hub = Self::new();
        for device in devices {
            hub.register(device)?;
        }
        Ok(hub)
    }

    /// Creates a hub holding the [`sample`] devices.
    #[must_use]
    pub fn sample_home() -> Self {
        let hub = Self::new();
        for device in sample::sample_home() {
            if let Err(e) = hub.register(device) {
                tracing::error!(error = %e, "Failed to register sample device");
            }
        }
        hub
    }

    // =========================================================================
    // Devices
    // =========================================================================

    /// Registers a device and publishes its initial snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateId` if the id is taken. Nothing is
    /// published in that case.
    pub fn register(&self, device: Device) -> Result<(), RegistryError> {
        let registered = self.registry.register(device)?;
        self.broadcaster.publish(registered);
        Ok(())
    }

    /// Returns a snapshot of a device.
    #[must_use]
    pub fn get(&self, id: &DeviceId) -> Option<Device> {
        self.registry.get(id)
    }

    /// Returns snapshots of all devices in registration order.
    ///
    /// A one-shot listing, unlike [`subscribe`](Self::subscribe).
    #[must_use]
    pub fn list_all(&self) -> Vec<Device> {
        self.registry.list_all()
    }

    /// Returns the number of registered devices.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.registry.len()
    }

    /// Replaces a device's state directly and publishes the result.
    ///
    /// Bypasses action validation; the state must still fit the kind.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `KindMismatch` from the registry.
    pub fn commit(&self, id: &DeviceId, state: DeviceState) -> Result<Device, RegistryError> {
        let device = self.registry.commit(id, state)?;
        self.broadcaster.publish(device.clone());
        Ok(device)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Applies an action to a device and publishes the result.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::dispatch`].
    pub fn dispatch(&self, id: &DeviceId, action: Action) -> Result<Device, DispatchError> {
        self.dispatcher
            .dispatch(&self.registry, &self.broadcaster, id, action)
    }

    /// Applies an action and reports only the coarse outcome.
    #[must_use]
    pub fn perform(&self, id: &DeviceId, action: Action) -> ActionResponse {
        ActionResponse::from_result(&self.dispatch(id, action))
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Subscribes to the devices selected by `filter`.
    ///
    /// The current snapshot of every matching registered device is delivered
    /// first, then each later change.
    #[must_use]
    pub fn subscribe(&self, filter: DeviceFilter) -> Subscription {
        self.broadcaster.subscribe(filter)
    }

    /// Cancels a subscription. Idempotent.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.broadcaster.subscriber_count()
    }

    // =========================================================================
    // Parts
    // =========================================================================

    /// Returns the device registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the broadcaster.
    #[must_use]
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Returns the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher
    }
}

impl Subscribable for ControlHub {
    fn subscribe(&self, filter: DeviceFilter) -> Subscription {
        ControlHub::subscribe(self, filter)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        ControlHub::unsubscribe(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceKind;
    use crate::types::{Level, LevelPolicy};

    fn id(raw: &str) -> DeviceId {
        DeviceId::new(raw).unwrap()
    }

    fn drain(sub: &mut Subscription) -> Vec<Device> {
        std::iter::from_fn(|| sub.try_recv()).collect()
    }

    #[test]
    fn new_hub_is_empty() {
        let hub = ControlHub::new();
        assert_eq!(hub.device_count(), 0);
        assert_eq!(hub.subscriber_count(), 0);
        assert_eq!(hub.dispatcher().policy(), LevelPolicy::Clamp);
    }

    #[test]
    fn with_config_sets_policy() {
        let hub = ControlHub::with_config(HubConfig::new().with_level_policy(LevelPolicy::Reject));
        assert_eq!(hub.dispatcher().policy(), LevelPolicy::Reject);
    }

    #[test]
    fn sample_home_registers_three_devices() {
        let hub = ControlHub::sample_home();
        let kinds: Vec<_> = hub.list_all().iter().map(Device::kind).collect();
        assert_eq!(
            kinds,
            vec![
                DeviceKind::StatelessTrigger,
                DeviceKind::Toggle,
                DeviceKind::Dimmable
            ]
        );
    }

    #[test]
    fn with_devices_rejects_duplicates() {
        let result = ControlHub::with_devices([
            Device::toggle(id("a"), false),
            Device::toggle(id("a"), true),
        ]);
        assert_eq!(result.unwrap_err(), RegistryError::DuplicateId(id("a")));
    }

    #[test]
    fn register_seeds_subscribers() {
        let hub = ControlHub::new();
        let mut sub = hub.subscribe(DeviceFilter::All);

        hub.register(Device::toggle(id("light-1"), false)).unwrap();
        let received = drain(&mut sub);
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].id(), &id("light-1"));

        // Late subscribers get it through replay
        let mut late = hub.subscribe(DeviceFilter::All);
        assert_eq!(drain(&mut late).len(), 1);
    }

    #[test]
    fn imported_revision_does_not_stall_updates() {
        let raw = r#"{"id": "light-1", "kind": "toggle", "state": {"type": "boolean", "on": false}, "revision": 18446744073709551615}"#;
        let imported: Device = serde_json::from_str(raw).unwrap();
        let hub = ControlHub::with_devices([imported]).unwrap();
        let light = id("light-1");

        let mut sub = hub.subscribe(DeviceFilter::All);
        assert_eq!(drain(&mut sub)[0].revision(), 0);

        let updated = hub.dispatch(&light, Action::turn_on()).unwrap();
        assert_eq!(updated.revision(), 1);
        assert_eq!(sub.try_recv(), Some(updated.clone()));
        assert_eq!(hub.broadcaster().latest(&light), Some(updated.clone()));

        let mut late = hub.subscribe(DeviceFilter::All);
        assert_eq!(drain(&mut late), vec![updated]);
    }

    #[test]
    fn failed_registration_publishes_nothing() {
        let hub = ControlHub::with_devices([Device::toggle(id("a"), false)]).unwrap();
        let mut sub = hub.subscribe(DeviceFilter::All);
        let _ = drain(&mut sub);

        assert!(hub.register(Device::toggle(id("a"), true)).is_err());
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn dispatch_updates_registry_and_subscribers() {
        let hub = ControlHub::sample_home();
        let dimmer = id(sample::DIMMABLE_ID);
        let mut sub = hub.subscribe(DeviceFilter::from(dimmer.clone()));
        let _ = drain(&mut sub);

        hub.dispatch(&dimmer, Action::SetLevel { value: 40.0 }).unwrap();

        let published = sub.try_recv().unwrap();
        assert_eq!(published.state().level(), Some(Level::new(40.0).unwrap()));
        assert_eq!(hub.get(&dimmer), Some(published));
    }

    #[test]
    fn perform_reports_response_codes() {
        let hub = ControlHub::sample_home();
        assert_eq!(
            hub.perform(&id(sample::BUTTON_ID), Action::Trigger),
            ActionResponse::Ok
        );
        assert_eq!(
            hub.perform(&id(sample::BUTTON_ID), Action::turn_on()),
            ActionResponse::Fail
        );
        assert_eq!(
            hub.perform(&id("garage"), Action::Trigger),
            ActionResponse::Unknown
        );
    }

    #[test]
    fn direct_commit_publishes() {
        let hub = ControlHub::sample_home();
        let bulb = id(sample::TOGGLE_ID);
        let mut sub = hub.subscribe(DeviceFilter::from(bulb.clone()));
        let _ = drain(&mut sub);

        hub.commit(&bulb, DeviceState::boolean(true)).unwrap();
        assert_eq!(sub.try_recv().unwrap().state(), &DeviceState::boolean(true));

        assert!(hub.commit(&bulb, DeviceState::Empty).is_err());
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn clones_share_state() {
        let hub = ControlHub::sample_home();
        let clone = hub.clone();
        let bulb = id(sample::TOGGLE_ID);

        clone.dispatch(&bulb, Action::turn_on()).unwrap();
        assert_eq!(hub.get(&bulb).unwrap().state().is_on(), Some(true));

        let _sub = clone.subscribe(DeviceFilter::All);
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[test]
    fn subscribable_trait_uses_hub_broadcaster() {
        let hub = ControlHub::sample_home();
        let mut sub = Subscribable::subscribe_ids(&hub, [id(sample::BUTTON_ID)]);
        assert_eq!(drain(&mut sub).len(), 1);
        assert!(Subscribable::unsubscribe(&hub, sub.id()));
    }
}
