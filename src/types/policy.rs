// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Out-of-range level handling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

use super::Level;

/// How a raw level carried by an action is turned into a [`Level`].
///
/// Non-finite values (NaN, infinities) are rejected under every policy.
///
/// # Examples
///
/// ```
/// use devctl::types::{Level, LevelPolicy};
///
/// assert_eq!(LevelPolicy::Clamp.apply(150.0).unwrap(), Level::MAX);
/// assert!(LevelPolicy::Reject.apply(150.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelPolicy {
    /// Silently clamp finite values into `[0, 100]`.
    #[default]
    Clamp,
    /// Refuse values outside `[0, 100]`.
    Reject,
}

impl LevelPolicy {
    /// Converts a raw level according to this policy.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for non-finite input, and
    /// `ValueError::LevelOutOfRange` for out-of-range input under
    /// [`Reject`](Self::Reject).
    pub fn apply(self, raw: f32) -> Result<Level, ValueError> {
        match self {
            Self::Clamp => Level::clamped(raw),
            Self::Reject => Level::new(raw),
        }
    }

    /// Returns the policy name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for LevelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
