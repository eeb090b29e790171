// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Level type for dimmable devices.
//!
//! This module provides a type-safe representation of brightness levels,
//! ensuring values are always finite and within the range 0-100.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Brightness level as a percentage (0.0-100.0).
///
/// # Examples
///
/// ```
/// use devctl::types::Level;
///
/// let level = Level::new(55.0).unwrap();
/// assert_eq!(level.value(), 55.0);
///
/// // Predefined bounds
/// assert_eq!(Level::MIN.value(), 0.0);
/// assert_eq!(Level::MAX.value(), 100.0);
///
/// // Invalid values return error
/// assert!(Level::new(150.0).is_err());
/// assert!(Level::new(f32::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Level(f32);

impl Level {
    /// Minimum level (0%).
    pub const MIN: Self = Self(0.0);

    /// Maximum level (100%).
    pub const MAX: Self = Self(100.0);

    /// Creates a new level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for NaN or infinite values and
    /// `ValueError::LevelOutOfRange` for finite values outside `[0, 100]`.
    pub fn new(value: f32) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::NotFinite(value));
        }
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(ValueError::LevelOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Creates a level, clamping finite values to the valid range.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for NaN or infinite values, which have
    /// no meaningful clamped counterpart.
    ///
    /// # Examples
    ///
    /// ```
    /// use devctl::types::Level;
    ///
    /// assert_eq!(Level::clamped(150.0).unwrap(), Level::MAX);
    /// assert_eq!(Level::clamped(-3.0).unwrap(), Level::MIN);
    /// ```
    pub fn clamped(value: f32) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::NotFinite(value));
        }
        Ok(Self(value.clamp(Self::MIN.0, Self::MAX.0)))
    }

    /// Returns the level as a percentage.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Returns the level as a fraction between 0.0 and 1.0.
    #[must_use]
    pub fn as_fraction(&self) -> f32 {
        self.0 / 100.0
    }
}

impl fmt::Display for Level {
    // Whole percent, the way the level is shown to users.
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 as i32)
    }
}

impl TryFrom<f32> for Level {
    type Error = ValueError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for f32 {
    fn from(level: Level) -> Self {
        level.0
    }
}
