// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ready-made demo devices.
//!
//! A small home with one device of each kind, useful for demos and tests.

use crate::device::{Device, DeviceInfo, DeviceKind};
use crate::event::DeviceId;

/// Structure name shared by all sample devices.
pub const STRUCTURE: &str = "Sample Home";

/// Id of the sample push button.
pub const BUTTON_ID: &str = "simple-button";

/// Id of the sample on/off bulb.
pub const TOGGLE_ID: &str = "toggle-button";

/// Id of the sample dimmable bulb.
pub const DIMMABLE_ID: &str = "dimmable-bulb";

/// Returns the sample devices: a button, a bulb and a dimmable bulb.
///
/// Lights start off; the dimmable bulb starts at level 0.
///
/// # Examples
///
/// ```
/// use devctl::device::DeviceKind;
/// use devctl::sample;
///
/// let devices = sample::sample_home();
/// let kinds: Vec<_> = devices.iter().map(|d| d.kind()).collect();
/// assert_eq!(
///     kinds,
///     [DeviceKind::StatelessTrigger, DeviceKind::Toggle, DeviceKind::Dimmable]
/// );
/// ```
#[must_use]
pub fn sample_home() -> Vec<Device> {
    vec![
        sample_device(BUTTON_ID, DeviceKind::StatelessTrigger, "Button", "Kitchen"),
        sample_device(TOGGLE_ID, DeviceKind::Toggle, "Bulb", "Restroom"),
        sample_device(DIMMABLE_ID, DeviceKind::Dimmable, "Dimmable bulb", "Hall"),
    ]
}

fn sample_device(id: &'static str, kind: DeviceKind, title: &str, zone: &str) -> Device {
    let info = DeviceInfo::new()
        .with_title(title)
        .with_subtitle(zone)
        .with_zone(zone)
        .with_structure(STRUCTURE);
    Device::new(DeviceId::from_static(id), kind).with_info(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DeviceState;
    use crate::types::Level;

    #[test]
    fn three_devices_with_expected_ids() {
        let ids: Vec<_> = sample_home()
            .iter()
            .map(|d| d.id().as_str().to_owned())
            .collect();
        assert_eq!(ids, [BUTTON_ID, TOGGLE_ID, DIMMABLE_ID]);
    }

    #[test]
    fn initial_states() {
        let devices = sample_home();
        assert_eq!(devices[0].state(), &DeviceState::Empty);
        assert_eq!(devices[1].state(), &DeviceState::boolean(false));
        assert_eq!(devices[2].state(), &DeviceState::range(Level::MIN, false));
        assert!(devices.iter().all(|d| d.revision() == 0));
    }

    #[test]
    fn descriptive_info() {
        let devices = sample_home();
        let dimmer = devices[2].info();
        assert_eq!(dimmer.title.as_deref(), Some("Dimmable bulb"));
        assert_eq!(dimmer.zone.as_deref(), Some("Hall"));
        assert!(
            devices
                .iter()
                .all(|d| d.info().structure.as_deref() == Some(STRUCTURE))
        );
        assert_eq!(devices[0].info().zone.as_deref(), Some("Kitchen"));
        assert_eq!(devices[1].info().display_name(), "Bulb");
    }
}
