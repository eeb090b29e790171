// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Action dispatch.
//!
//! The [`Dispatcher`] turns an `(id, action)` pair into a committed and
//! published state change:
//!
//! 1. look the device up in the [`Registry`],
//! 2. run the reducer for its [`DeviceKind`](crate::device::DeviceKind),
//! 3. commit the new state,
//! 4. publish the updated snapshot to the [`Broadcaster`].
//!
//! Steps 1 to 3 run under the device's lock, so concurrent dispatches on the
//! same device are serialized and neither overwrites the other's fields.
//! Nothing is committed or published when the action is refused.

mod reducer;

use crate::action::Action;
use crate::device::Device;
use crate::error::DispatchError;
use crate::event::DeviceId;
use crate::registry::Registry;
use crate::subscription::Broadcaster;
use crate::types::LevelPolicy;

use reducer::reducer_for;

/// Validates actions and applies them to registered devices.
///
/// Stateless apart from its [`LevelPolicy`]; one dispatcher can serve any
/// number of registries.
///
/// # Examples
///
/// ```
/// use devctl::action::Action;
/// use devctl::device::Device;
/// use devctl::dispatch::Dispatcher;
/// use devctl::event::DeviceId;
/// use devctl::registry::Registry;
/// use devctl::state::DeviceState;
/// use devctl::subscription::Broadcaster;
///
/// let registry = Registry::new();
/// let broadcaster = Broadcaster::new();
/// let id = DeviceId::new("light-1").unwrap();
/// registry.register(Device::toggle(id.clone(), false)).unwrap();
///
/// let updated = Dispatcher::new()
///     .dispatch(&registry, &broadcaster, &id, Action::turn_on())
///     .unwrap();
/// assert_eq!(updated.state(), &DeviceState::boolean(true));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatcher {
    policy: LevelPolicy,
}

impl Dispatcher {
    /// Creates a dispatcher with the default level policy (clamp).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher with the given level policy.
    #[must_use]
    pub const fn with_policy(policy: LevelPolicy) -> Self {
        Self { policy }
    }

    /// Returns the level policy.
    #[must_use]
    pub const fn policy(&self) -> LevelPolicy {
        self.policy
    }

    /// Applies an action to a device, commits the result and publishes it.
    ///
    /// Returns the updated snapshot.
    ///
    /// # Errors
    ///
    /// - `DeviceNotFound` if no device has this id
    /// - `UnsupportedAction` if the device kind does not accept the action
    /// - `InvalidActionValue` if the action value is refused by the policy
    /// - `KindMismatch` if the stored state does not fit the device kind
    ///
    /// The device is unchanged and nothing is published on error.
    pub fn dispatch(
        &self,
        registry: &Registry,
        broadcaster: &Broadcaster,
        id: &DeviceId,
        action: Action,
    ) -> Result<Device, DispatchError> {
        let result = registry.commit_with(id, |device| {
            reducer_for(device.kind())(device, action, self.policy)
        });

        match result {
            Ok(device) => {
                tracing::debug!(
                    device_id = %id,
                    %action,
                    state = %device.state(),
                    revision = device.revision(),
                    "Action applied"
                );
                broadcaster.publish(device.clone());
                Ok(device)
            }
            Err(e) => {
                log_rejection(id, action, &e);
                Err(e)
            }
        }
    }
}

fn log_rejection(id: &DeviceId, action: Action, err: &DispatchError) {
    match err {
        DispatchError::DeviceNotFound(_) => {
            tracing::debug!(device_id = %id, %action, "Action for unknown device");
        }
        DispatchError::UnsupportedAction { .. } | DispatchError::InvalidActionValue(_) => {
            tracing::warn!(device_id = %id, %action, error = %err, "Action rejected");
        }
        DispatchError::KindMismatch { .. } => {
            tracing::error!(
                device_id = %id,
                %action,
                error = %err,
                "Device state does not fit its kind"
            );
        }
        DispatchError::Registry(_) => {
            tracing::error!(device_id = %id, %action, error = %err, "Action failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionType;
    use crate::device::DeviceKind;
    use crate::error::ValueError;
    use crate::state::DeviceState;
    use crate::subscription::DeviceFilter;
    use crate::types::Level;

    fn id(raw: &str) -> DeviceId {
        DeviceId::new(raw).unwrap()
    }

    fn level(value: f32) -> Level {
        Level::new(value).unwrap()
    }

    struct Fixture {
        registry: Registry,
        broadcaster: Broadcaster,
    }

    impl Fixture {
        fn new() -> Self {
            let registry = Registry::new();
            registry.register(Device::trigger(id("button"))).unwrap();
            registry.register(Device::toggle(id("light-1"), false)).unwrap();
            registry
                .register(Device::dimmable(id("dimmer-1"), Level::MIN, false))
                .unwrap();
            Self {
                registry,
                broadcaster: Broadcaster::new(),
            }
        }

        fn dispatch(&self, raw: &str, action: Action) -> Result<Device, DispatchError> {
            Dispatcher::new().dispatch(&self.registry, &self.broadcaster, &id(raw), action)
        }
    }

    #[test]
    fn toggle_turns_on() {
        let fx = Fixture::new();
        let updated = fx.dispatch("light-1", Action::turn_on()).unwrap();

        assert_eq!(updated.state(), &DeviceState::boolean(true));
        assert_eq!(
            fx.registry.get(&id("light-1")).unwrap().state(),
            &DeviceState::boolean(true)
        );
    }

    #[test]
    fn dimmer_level_then_on() {
        let fx = Fixture::new();
        fx.dispatch("dimmer-1", Action::SetLevel { value: 55.0 })
            .unwrap();
        let updated = fx.dispatch("dimmer-1", Action::turn_on()).unwrap();

        assert_eq!(updated.state(), &DeviceState::range(level(55.0), true));
        assert_eq!(updated.revision(), 2);
    }

    #[test]
    fn level_above_range_is_clamped_by_default() {
        let fx = Fixture::new();
        let updated = fx
            .dispatch("dimmer-1", Action::SetLevel { value: 150.0 })
            .unwrap();
        assert_eq!(updated.state().level(), Some(Level::MAX));
    }

    #[test]
    fn level_above_range_is_rejected_under_reject_policy() {
        let fx = Fixture::new();
        let result = Dispatcher::with_policy(LevelPolicy::Reject).dispatch(
            &fx.registry,
            &fx.broadcaster,
            &id("dimmer-1"),
            Action::SetLevel { value: 150.0 },
        );

        assert_eq!(
            result,
            Err(DispatchError::InvalidActionValue(
                ValueError::LevelOutOfRange(150.0)
            ))
        );
        let dimmer = fx.registry.get(&id("dimmer-1")).unwrap();
        assert_eq!(dimmer.state(), &DeviceState::range(Level::MIN, false));
        assert_eq!(dimmer.revision(), 0);
    }

    #[test]
    fn unsupported_action_leaves_state_and_publishes_nothing() {
        let fx = Fixture::new();
        let mut sub = fx.broadcaster.subscribe(DeviceFilter::All);

        let result = fx.dispatch("button", Action::turn_on());
        assert_eq!(
            result,
            Err(DispatchError::UnsupportedAction {
                id: id("button"),
                kind: DeviceKind::StatelessTrigger,
                action: ActionType::SetBoolean,
            })
        );
        assert_eq!(fx.registry.get(&id("button")).unwrap().revision(), 0);
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn unknown_device() {
        let fx = Fixture::new();
        assert_eq!(
            fx.dispatch("ghost", Action::Trigger),
            Err(DispatchError::DeviceNotFound(id("ghost")))
        );
    }

    #[test]
    fn trigger_commits_and_publishes_same_state() {
        let fx = Fixture::new();
        let mut sub = fx.broadcaster.subscribe(DeviceFilter::All);

        let updated = fx.dispatch("button", Action::Trigger).unwrap();
        assert_eq!(updated.state(), &DeviceState::Empty);
        assert_eq!(updated.revision(), 1);

        let published = sub.try_recv().unwrap();
        assert_eq!(published, updated);
    }

    #[test]
    fn dispatch_publishes_committed_snapshot() {
        let fx = Fixture::new();
        let mut sub = fx.broadcaster.subscribe(DeviceFilter::from(id("light-1")));

        fx.dispatch("dimmer-1", Action::turn_on()).unwrap();
        fx.dispatch("light-1", Action::turn_on()).unwrap();

        let published = sub.try_recv().unwrap();
        assert_eq!(published.id(), &id("light-1"));
        assert_eq!(published.state(), &DeviceState::boolean(true));
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn policy_accessor() {
        assert_eq!(Dispatcher::new().policy(), LevelPolicy::Clamp);
        assert_eq!(
            Dispatcher::with_policy(LevelPolicy::Reject).policy(),
            LevelPolicy::Reject
        );
    }
}
