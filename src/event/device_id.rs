// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identifier type.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValueError;

/// Stable identifier of a virtual device.
///
/// An opaque, non-empty string. Identifiers are cheap to clone (the text is
/// shared) and compare by value.
///
/// # Examples
///
/// ```
/// use devctl::event::DeviceId;
///
/// let id = DeviceId::new("dimmable-bulb").unwrap();
/// assert_eq!(id.as_str(), "dimmable-bulb");
///
/// // Empty identifiers are rejected
/// assert!(DeviceId::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(Arc<str>);

impl DeviceId {
    /// Creates a device identifier from any non-empty string.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyDeviceId` if `raw` is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValueError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValueError::EmptyDeviceId);
        }
        Ok(Self(Arc::from(raw)))
    }

    /// Creates an identifier from a non-empty literal.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        debug_assert!(!raw.is_empty());
        Self(Arc::from(raw))
    }

    /// Creates a fresh random identifier (hyphenated UUID v4).
    #[must_use]
    pub fn random() -> Self {
        Self(Arc::from(Uuid::new_v4().to_string()))
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceId({})", self.0)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for DeviceId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DeviceId {
    type Error = ValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0.to_string()
    }
}
