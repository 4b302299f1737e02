// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic animation and timer primitives.
//!
//! This crate does not own a clock or a frame loop. The host calls into it with
//! a monotonically increasing time in milliseconds (for example from
//! `requestAnimationFrame` or a compositor frame callback) and applies whatever
//! it reports. It provides:
//!
//! - [`Easing`]: the small set of `[0, 1] → [0, 1]` curves used by gesture
//!   release animations.
//! - [`Animator`]: a set of named animations keyed by a caller-chosen type.
//!   Each key holds at most one animation; starting another under the same key
//!   cancels the first. Animations are either [`Tween`]s between two values or
//!   *driven* entries that simply receive the elapsed time on every tick and
//!   decide for themselves when to stop.
//! - [`Timer`]: a single cancellable deadline carrying a payload, used for
//!   things like delayed tap delivery.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::{Animator, Easing, Frame};
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! enum Key {
//!     Scroll,
//! }
//!
//! let mut animator = Animator::new();
//! animator.start(Key::Scroll, 0.0, 100.0, 200.0, Easing::CubicOut, 0.0);
//!
//! // Halfway through, the value has been eased past the linear midpoint.
//! let frames = animator.tick(100.0);
//! let Frame::Update { value, .. } = frames[0] else { unreachable!() };
//! assert!(value > 50.0);
//!
//! // Past the end the tween snaps exactly to its end value and is removed.
//! let frames = animator.tick(250.0);
//! assert_eq!(frames[0], Frame::Complete { key: Key::Scroll, value: 100.0 });
//! assert!(animator.is_empty());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod animator;
mod easing;
mod timer;

pub use animator::{Animator, Frame, Frames, Tween};
pub use easing::Easing;
pub use timer::Timer;
