// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use understory_event_state::tap::Tap;
use understory_zoom_pan::ZoomPanEvent;

use crate::holder::HolderId;

/// Output of a [`Pager`](crate::Pager), drained by the host with
/// [`Pager::drain_events`](crate::Pager::drain_events).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PagerEvent {
    /// The main scroll moved to this horizontal offset.
    MainScrollOffset(f64),
    /// A holder moved inside the main scroll.
    HolderPosition {
        /// The holder.
        holder: HolderId,
        /// Its new horizontal offset.
        x: f64,
    },
    /// A holder now shows a different page and should load it. `None` means
    /// the holder has nothing to show.
    HolderBound {
        /// The holder.
        holder: HolderId,
        /// Logical page index.
        index: Option<usize>,
    },
    /// Output of one page's engine.
    Page {
        /// Holder the engine belongs to.
        holder: HolderId,
        /// The engine's event.
        event: ZoomPanEvent,
    },
    /// A drag was released over the main scroll, whether or not the page
    /// changed.
    Swipe {
        /// Current page after the release.
        current: usize,
        /// Net page change not yet settled by a completed animation.
        index_diff: isize,
        /// Page change this release asked for; `0` for none.
        items_diff: isize,
        /// Current page before the release.
        previous: usize,
    },
    /// The current page changed.
    Swiped {
        /// New current page.
        current: usize,
        /// Signed change.
        diff: isize,
    },
    /// The main scroll came to rest after a release.
    SwipeAnimationComplete {
        /// Current page.
        current: usize,
        /// Net page change since the last completed animation.
        index_diff: isize,
        /// Page change the last release asked for; `0` for none.
        items_diff: isize,
    },
    /// A single tap.
    Tap(Tap),
    /// A double tap at this point.
    DoubleTap(Point),
    /// The viewport changed size after it was first set.
    ViewportSizeChanged(Size),
}
