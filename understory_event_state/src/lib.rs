// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: small state managers for touch gestures.
//!
//! This crate provides focused state machines for interactions that need
//! stateful tracking across multiple pointer events. Each module handles one
//! pattern:
//!
//! - [`pointer`]: the normalized [`TouchPoint`](pointer::TouchPoint) consumed by
//!   everything else.
//! - [`direction`]: the one-time horizontal/vertical lock of a drag.
//! - [`session`]: per-gesture state (start/current points, flags, and a short
//!   rolling position history).
//! - [`flick`]: release velocity estimation with jitter suppression.
//! - [`tap`]: tap and double-tap recognition with a delayed single tap.
//!
//! ## Design Philosophy
//!
//! Each state manager is designed to be:
//!
//! - **Minimal and focused**: each handles one specific interaction pattern.
//! - **Clock-agnostic**: time is passed in by the caller as milliseconds.
//! - **Integration-friendly**: works with any event source once the host has
//!   normalized pointer coordinates.
//!
//! The crate does not decide what a gesture *means* for content; that belongs
//! to a router built on top of it (for example `understory_pager`).
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::Point;
//! use understory_event_state::direction::{Direction, detect_direction};
//! use understory_event_state::session::GestureSession;
//!
//! let start = Point::new(200.0, 300.0);
//! let mut session = GestureSession::new(start, 0.0);
//!
//! let p = Point::new(170.0, 304.0);
//! session.direction = detect_direction(start, p, 10.0);
//! assert_eq!(session.direction, Some(Direction::Horizontal));
//!
//! session.advance(p);
//! session.record(60.0, p);
//! let flick = session.flick(60.0);
//! assert_eq!(flick.x.offset, -30.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod direction;
pub mod flick;
pub mod pointer;
pub mod session;
pub mod tap;
