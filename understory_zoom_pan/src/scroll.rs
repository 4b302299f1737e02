// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand-off between page panning and the carousel's main scroll.

/// Receiver for main-scroll moves requested while a zoomed page is dragged
/// horizontally.
pub trait MainScrollDriver {
    /// Moves the main scroll to `x`. Returns `true` if the main scroll is now
    /// shifted away from the current page's resting position.
    fn move_main_scroll(&mut self, x: f64) -> bool;
}

/// Snapshot of the main scroll and gesture state for one horizontal move.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MainScrollContext {
    /// Current main-scroll position.
    pub position: f64,
    /// Main-scroll position when the gesture started.
    pub start_position: f64,
    /// The main scroll is away from the current page's resting position.
    pub shifted: bool,
    /// The main scroll is animating.
    pub animating: bool,
    /// The gesture is locked horizontally.
    pub horizontal: bool,
    /// A pinch already changed the zoom during this gesture.
    pub zoom_started: bool,
}
