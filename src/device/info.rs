// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Descriptive device metadata.

use serde::{Deserialize, Serialize};

/// Descriptive identity of a device: where it is and what to call it.
///
/// Fixed at creation and never changed by actions. Presentation concerns
/// (status text, colours, icons) are left to whoever renders the device.
///
/// # Examples
///
/// ```
/// use devctl::device::DeviceInfo;
///
/// let info = DeviceInfo::new()
///     .with_title("Dimmable bulb")
///     .with_zone("Hall")
///     .with_structure("Sample Home");
///
/// assert_eq!(info.display_name(), "Dimmable bulb");
/// assert_eq!(info.zone.as_deref(), Some("Hall"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Main label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Secondary label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Room or area the device is in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// Home or building the zone belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
}

impl DeviceInfo {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the zone.
    #[must_use]
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Sets the structure.
    #[must_use]
    pub fn with_structure(mut self, structure: impl Into<String>) -> Self {
        self.structure = Some(structure.into());
        self
    }

    /// Returns the title, or an empty string when unset.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.zone.is_none()
            && self.structure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        assert!(DeviceInfo::new().is_empty());
        assert_eq!(DeviceInfo::new().display_name(), "");
    }

    #[test]
    fn builder_sets_fields() {
        let info = DeviceInfo::new()
            .with_title("Bulb")
            .with_subtitle("Restroom")
            .with_zone("Restroom")
            .with_structure("Sample Home");

        assert!(!info.is_empty());
        assert_eq!(info.title.as_deref(), Some("Bulb"));
        assert_eq!(info.subtitle.as_deref(), Some("Restroom"));
        assert_eq!(info.structure.as_deref(), Some("Sample Home"));
    }

    #[test]
    fn unset_fields_are_not_serialized() {
        let info = DeviceInfo::new().with_zone("Kitchen");
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json, serde_json::json!({"zone": "Kitchen"}));
    }
}
