// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning for [`Pager`](crate::Pager).

use understory_event_state::tap::{DOUBLE_TAP_RADIUS, DOUBLE_TAP_WINDOW_MS};
use understory_zoom_pan::{ConfigError, ZoomPanConfig, check_range};

/// Static tuning of a page carousel.
///
/// All distances are in pixels and all durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PagerConfig {
    /// Swipe past the last page to the first and back.
    pub loop_pages: bool,
    /// Gap between slides as a fraction of the viewport width.
    pub slide_spacing: f64,
    /// Factor applied to main-scroll drags past the first or last page when
    /// not looping.
    pub main_scroll_end_friction: f64,
    /// Horizontal travel a drag must exceed to change page.
    pub min_swipe_distance: f64,
    /// Travel that locks a drag to one axis.
    pub direction_check_offset: f64,
    /// Maximum per-axis distance between the two taps of a double tap.
    pub double_tap_radius: f64,
    /// Window in which a second tap makes a double tap.
    pub double_tap_window_ms: f64,
    /// Keep the zoom level of neighboring image pages in sync with the
    /// current one.
    pub share_zoom_level: bool,
    /// The last two fingers of a pinch lifting closer together than this
    /// count as a zoom release rather than a pan release.
    pub zoom_release_window_ms: f64,
    /// Terminal travel under which a release counts as a fast flick.
    pub fast_flick_distance: f64,
    /// Terminal travel in the drag's direction that commits a slow swipe.
    pub committed_flick_offset: f64,
    /// Shortest page-settle animation.
    pub swipe_min_duration_ms: f64,
    /// Longest page-settle animation.
    pub swipe_max_duration_ms: f64,
    /// Page-settle duration without usable flick speed, and when snapping
    /// back against the flick.
    pub swipe_return_duration_ms: f64,
    /// Page shown first. Out-of-range values fall back to `0`.
    pub initial_index: usize,
    /// Tuning shared by every page's zoom/pan engine.
    pub zoom_pan: ZoomPanConfig,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            loop_pages: false,
            slide_spacing: 0.12,
            main_scroll_end_friction: 0.35,
            min_swipe_distance: 30.0,
            direction_check_offset: 10.0,
            double_tap_radius: DOUBLE_TAP_RADIUS,
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            share_zoom_level: false,
            zoom_release_window_ms: 150.0,
            fast_flick_distance: 10.0,
            committed_flick_offset: 20.0,
            swipe_min_duration_ms: 250.0,
            swipe_max_duration_ms: 400.0,
            swipe_return_duration_ms: 333.0,
            initial_index: 0,
            zoom_pan: ZoomPanConfig::default(),
        }
    }
}

impl PagerConfig {
    /// Checks every field, including the nested [`ZoomPanConfig`].
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("slide_spacing", self.slide_spacing, 0.0, f64::MAX)?;
        check_range(
            "main_scroll_end_friction",
            self.main_scroll_end_friction,
            f64::MIN_POSITIVE,
            1.0,
        )?;
        check_range("min_swipe_distance", self.min_swipe_distance, 0.0, f64::MAX)?;
        check_range(
            "direction_check_offset",
            self.direction_check_offset,
            f64::MIN_POSITIVE,
            f64::MAX,
        )?;
        check_range("double_tap_radius", self.double_tap_radius, 0.0, f64::MAX)?;
        check_range("double_tap_window_ms", self.double_tap_window_ms, 0.0, f64::MAX)?;
        check_range("zoom_release_window_ms", self.zoom_release_window_ms, 0.0, f64::MAX)?;
        check_range("fast_flick_distance", self.fast_flick_distance, 0.0, f64::MAX)?;
        check_range("committed_flick_offset", self.committed_flick_offset, 0.0, f64::MAX)?;
        check_range(
            "swipe_min_duration_ms",
            self.swipe_min_duration_ms,
            0.0,
            f64::MAX,
        )?;
        check_range(
            "swipe_max_duration_ms",
            self.swipe_max_duration_ms,
            self.swipe_min_duration_ms,
            f64::MAX,
        )?;
        check_range(
            "swipe_return_duration_ms",
            self.swipe_return_duration_ms,
            0.0,
            f64::MAX,
        )?;
        self.zoom_pan.validate()
    }
}
