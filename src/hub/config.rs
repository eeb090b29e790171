// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for a control hub.

use serde::{Deserialize, Serialize};

use crate::types::LevelPolicy;

/// Configuration for a [`ControlHub`](super::ControlHub).
///
/// # Examples
///
/// ```
/// use devctl::hub::HubConfig;
/// use devctl::types::LevelPolicy;
///
/// let config = HubConfig::default().with_level_policy(LevelPolicy::Reject);
/// assert_eq!(config.level_policy, LevelPolicy::Reject);
///
/// // Also loadable from any serde format; missing fields use defaults
/// let config: HubConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.level_policy, LevelPolicy::Clamp);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// How out-of-range `SetLevel` values are handled.
    pub level_policy: LevelPolicy,
}

impl HubConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level policy.
    #[must_use]
    pub fn with_level_policy(mut self, policy: LevelPolicy) -> Self {
        self.level_policy = policy;
        self
    }
}
