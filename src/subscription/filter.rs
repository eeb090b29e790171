// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device filters for subscriptions.

use std::collections::HashSet;

use crate::event::DeviceId;

/// Selects which devices a subscription observes.
///
/// # Examples
///
/// ```
/// use devctl::event::DeviceId;
/// use devctl::subscription::DeviceFilter;
///
/// let light = DeviceId::new("light-1").unwrap();
/// let dimmer = DeviceId::new("dimmer-1").unwrap();
///
/// let filter = DeviceFilter::ids([light.clone()]);
/// assert!(filter.matches(&light));
/// assert!(!filter.matches(&dimmer));
///
/// assert!(DeviceFilter::All.matches(&dimmer));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeviceFilter {
    /// Every device, including devices first published after subscribing.
    #[default]
    All,
    /// Only the listed devices.
    Ids(HashSet<DeviceId>),
}

impl DeviceFilter {
    /// Creates a filter for the given ids.
    ///
    /// An empty set matches nothing.
    #[must_use]
    pub fn ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = DeviceId>,
    {
        Self::Ids(ids.into_iter().collect())
    }

    /// Returns whether the filter selects the device.
    #[must_use]
    pub fn matches(&self, id: &DeviceId) -> bool {
        match self {
            Self::All => true,
            Self::Ids(ids) => ids.contains(id),
        }
    }
}

impl From<DeviceId> for DeviceFilter {
    fn from(id: DeviceId) -> Self {
        Self::ids([id])
    }
}

impl FromIterator<DeviceId> for DeviceFilter {
    fn from_iter<T: IntoIterator<Item = DeviceId>>(iter: T) -> Self {
        Self::ids(iter)
    }
}
