// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning for [`ZoomPan`](crate::ZoomPan).

use core::fmt;

use crate::modes::InitialZoom;

/// Error returned when a configuration value is unusable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// The value lies outside the range the field accepts.
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The value is NaN or infinite.
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { field, value } => {
                write!(f, "configuration field `{field}` is out of range: {value}")
            }
            Self::NotFinite { field } => {
                write!(f, "configuration field `{field}` must be finite")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Checks that `value` is finite and lies in `lo..=hi`.
///
/// # Errors
///
/// Returns [`ConfigError`] naming `field` if the check fails.
pub fn check_range(field: &'static str, value: f64, lo: f64, hi: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value < lo || value > hi {
        return Err(ConfigError::OutOfRange { field, value });
    }
    Ok(())
}

/// Static tuning of one zoom/pan engine.
///
/// All distances are in pixels and all durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomPanConfig {
    /// Largest zoom level a gesture settles at.
    pub max_spread_zoom: f64,
    /// Factor applied to pan deltas once the offset leaves its bounds.
    pub pan_end_friction: f64,
    /// Let horizontal drags of a zoomed page hand over to the main scroll
    /// once the page reaches its pan limit.
    pub allow_pan_to_next: bool,
    /// How the starting zoom level is picked.
    pub initial_zoom: InitialZoom,
    /// How far below the initial zoom a pinch may go, as a fraction of the
    /// initial zoom.
    pub zoom_undershoot: f64,
    /// Pinch overshoot above `max_spread_zoom` needed to reach the full
    /// headroom, in multiples of the initial zoom.
    pub zoom_overshoot_span: f64,
    /// Below this initial zoom a double tap goes to natural size instead of
    /// `max_spread_zoom`.
    pub double_tap_natural_threshold: f64,
    /// Duration of the double-tap zoom toggle.
    pub double_tap_duration_ms: f64,
    /// Duration of the post-pinch settle back into range.
    pub zoom_settle_duration_ms: f64,
    /// Duration of the bounce back into pan bounds.
    pub bounce_duration_ms: f64,
}

impl Default for ZoomPanConfig {
    fn default() -> Self {
        Self {
            max_spread_zoom: 1.33,
            pan_end_friction: 0.35,
            allow_pan_to_next: true,
            initial_zoom: InitialZoom::Fit,
            zoom_undershoot: 1.0 / 3.0,
            zoom_overshoot_span: 6.0,
            double_tap_natural_threshold: 0.7,
            double_tap_duration_ms: 333.0,
            zoom_settle_duration_ms: 200.0,
            bounce_duration_ms: 300.0,
        }
    }
}

impl ZoomPanConfig {
    /// Checks every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("max_spread_zoom", self.max_spread_zoom, 1.0, f64::MAX)?;
        check_range("pan_end_friction", self.pan_end_friction, f64::MIN_POSITIVE, 1.0)?;
        check_range("zoom_undershoot", self.zoom_undershoot, 0.0, 0.999)?;
        check_range(
            "zoom_overshoot_span",
            self.zoom_overshoot_span,
            f64::MIN_POSITIVE,
            f64::MAX,
        )?;
        check_range(
            "double_tap_natural_threshold",
            self.double_tap_natural_threshold,
            0.0,
            1.0,
        )?;
        check_range("double_tap_duration_ms", self.double_tap_duration_ms, 0.0, f64::MAX)?;
        check_range("zoom_settle_duration_ms", self.zoom_settle_duration_ms, 0.0, f64::MAX)?;
        check_range("bounce_duration_ms", self.bounce_duration_ms, 0.0, f64::MAX)?;
        if let InitialZoom::FitWidth { margin } = self.initial_zoom {
            check_range("initial_zoom.margin", margin, 0.0, f64::MAX)?;
        }
        Ok(())
    }
}
