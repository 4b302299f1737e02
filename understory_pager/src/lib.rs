// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pager --heading-base-level=0

//! Understory Pager: a horizontally paged carousel of zoomable pages.
//!
//! [`Pager`] takes a normalized pointer stream (down, move and up with the
//! full list of active touch points) and decides what it means:
//! - A horizontal drag that is not absorbed by a zoomed page's pan moves the
//!   main scroll; the release either changes the page or springs back.
//! - A pan of a zoomed page is handed to that page's [`ZoomPanTarget`], which
//!   passes the drag over to the main scroll once the content edge is
//!   reached.
//! - Two fingers pinch-zoom the current page.
//! - Releases that never moved become taps, and two nearby taps inside the
//!   double-tap window toggle the page's zoom.
//!
//! Three [`SlideHolder`]s (previous, current, next) travel with the main
//! scroll in a [`HolderRing`]. When the current page changes the ring rotates
//! and only the holder that wrapped around is rebound to a new page.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_event_state::pointer::TouchPoint;
//! use understory_event_state::tap::TapTarget;
//! use understory_pager::{PageKind, Pager, PagerConfig, PagerEvent};
//!
//! let pages = vec![PageKind::Image; 3];
//! let mut pager = Pager::new(PagerConfig::default(), pages).unwrap();
//! pager.set_viewport_size(Size::new(400.0, 800.0));
//!
//! // Drag one finger 60px to the left and let go.
//! pager.pointer_down(&[TouchPoint::new(0, 300.0, 400.0)], 0.0);
//! for (i, x) in [285.0, 270.0, 255.0, 240.0].into_iter().enumerate() {
//!     pager.pointer_move(&[TouchPoint::new(0, x, 400.0)], 16.0 * (i + 1) as f64);
//! }
//! pager.pointer_up(&[], None, TapTarget::Content, 80.0);
//!
//! assert_eq!(pager.current_index(), 1);
//! assert!(pager
//!     .drain_events()
//!     .any(|e| e == PagerEvent::Swiped { current: 1, diff: 1 }));
//!
//! // Let the main scroll settle on the new page.
//! pager.tick(1_000.0);
//! assert_eq!(pager.main_scroll_position(), -448.0);
//! ```
//!
//! ## Hosting
//!
//! The pager never reads a clock: every entry point takes the host's time in
//! milliseconds. Call [`Pager::tick`] on each display frame while
//! [`Pager::needs_tick`] returns `true`, then apply the [`PagerEvent`]s from
//! [`Pager::drain_events`] to the surface.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod event;
mod holder;
mod main_scroll;
mod page;
mod pager;
mod target;

pub use config::PagerConfig;
pub use event::PagerEvent;
pub use holder::{CURRENT_SLOT, HolderId, HolderRing, NEXT_SLOT, PREVIOUS_SLOT, SlideHolder};
pub use page::PageKind;
pub use pager::Pager;
pub use target::ZoomPanTarget;
