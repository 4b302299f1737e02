// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom_pan --heading-base-level=0

//! Understory Zoom Pan: a per-page zoom and pan engine for touch viewers.
//!
//! [`ZoomPan`] owns the zoom level and content offset of one page and turns
//! gesture sub-events into continuous state:
//! - Pinch zoom that keeps the content under the fingers' midpoint anchored,
//!   with damped over- and undershoot past the admissible zoom range.
//! - One-finger panning with elastic friction past the [`PanBounds`].
//! - Momentum after release, decaying frame-rate independently, followed by a
//!   bounce back into bounds.
//! - Animated zoom jumps for double tap and host requests.
//!
//! It does **not** classify gestures or read a clock. A router (for example
//! `understory_pager`) decides which sub-event a pointer stream means and
//! passes the host's time in milliseconds. Output is queued as
//! [`ZoomPanEvent`]s for the host to apply.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_zoom_pan::{ZoomPan, ZoomPanConfig};
//!
//! let mut page = ZoomPan::new(ZoomPanConfig::default(), Size::new(400.0, 800.0));
//! page.on_content_size_known(Size::new(800.0, 800.0));
//! assert_eq!(page.zoom_level(), 0.5);
//!
//! // Spread two fingers around the center of the viewport.
//! page.handle_zoom_start(Point::new(150.0, 400.0), Point::new(250.0, 400.0));
//! page.handle_zoom_move(Point::new(100.0, 400.0), Point::new(300.0, 400.0));
//! page.handle_zoom_end(0.0);
//! assert_eq!(page.zoom_level(), 1.0);
//!
//! for event in page.drain_events() {
//!     // Apply transforms and zoom notifications to the host surface.
//!     let _ = event;
//! }
//! ```
//!
//! ## Bounds
//!
//! Offsets are the position of the content's top-left corner in the
//! viewport. [`PanBounds`] is ordered numerically, `min <= center <= max` on
//! each axis, so content wider than the viewport may sit anywhere between its
//! right edge flush (`min`) and its left edge flush (`max = 0`).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod geometry;
mod modes;
pub mod momentum;
mod scroll;

pub use config::{ConfigError, ZoomPanConfig, check_range};
pub use engine::{ZoomPan, ZoomPanEvent, ZoomPanPhase};
pub use geometry::{Axis, PanBounds, distance, midpoint, round_half_up, round_point};
pub use modes::{InitialZoom, ZoomRequest};
pub use scroll::{MainScrollContext, MainScrollDriver};
