// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How a freshly sized page picks its starting zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialZoom {
    /// Fit the whole content inside the viewport, never enlarging past
    /// natural size.
    #[default]
    Fit,
    /// Fill the viewport width minus `margin` pixels, top edge aligned.
    ///
    /// Used by compact "switcher" layouts where pages are shown as a
    /// horizontal strip.
    FitWidth {
        /// Horizontal space left free, in pixels.
        margin: f64,
    },
}

/// A zoom level requested by the host rather than by a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomRequest {
    /// Return to the page's initial zoom level.
    Initial,
    /// Jump to an explicit zoom level, clamped to the admissible range and
    /// anchored at the top center of the viewport.
    Level(f64),
}
